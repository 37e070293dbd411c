use crate::task::Task;
use crate::types::{Priority, Status};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Everything the dashboard shows, computed in one pass over the cache.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total: usize,
    pub completed: usize,
    /// Not-done tasks whose end falls within the next seven days.
    pub due_soon: usize,
    pub status_counts: [usize; 4],
    pub priority_counts: [usize; 3],
}

impl Summary {
    pub fn status_count(&self, status: Status) -> usize {
        self.status_counts[status.rank() as usize]
    }

    pub fn priority_count(&self, priority: Priority) -> usize {
        match priority {
            Priority::Low => self.priority_counts[0],
            Priority::Medium => self.priority_counts[1],
            Priority::High => self.priority_counts[2],
        }
    }
}

pub fn summarize(tasks: &[Task], now: DateTime<Utc>) -> Summary {
    let horizon = now + Duration::days(7);
    let mut status_counts = [0usize; 4];
    let mut priority_counts = [0usize; 3];
    let mut due_soon = 0;

    for task in tasks {
        status_counts[task.status.rank() as usize] += 1;
        match task.priority {
            Priority::Low => priority_counts[0] += 1,
            Priority::Medium => priority_counts[1] += 1,
            Priority::High => priority_counts[2] += 1,
        }
        if task.status != Status::Done {
            if let Some(end) = task.end_time {
                if now <= end && end <= horizon {
                    due_soon += 1;
                }
            }
        }
    }

    Summary {
        total: tasks.len(),
        completed: status_counts[Status::Done.rank() as usize],
        due_soon,
        status_counts,
        priority_counts,
    }
}

// ---------------------------------------------------------------------------
// Chart series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct PieSlice {
    pub name: &'static str,
    pub value: usize,
    pub fill: &'static str,
}

/// Status distribution with the fixed color map, in the order the source
/// dashboard renders: Done, InProgress, Review, Todo.
pub fn pie_series(summary: &Summary) -> Vec<PieSlice> {
    [Status::Done, Status::InProgress, Status::Review, Status::Todo]
        .into_iter()
        .map(|s| PieSlice {
            name: s.as_str(),
            value: summary.status_count(s),
            fill: s.color(),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct BarPoint {
    pub name: &'static str,
    pub count: usize,
}

/// Priority distribution, Low / Medium / High.
pub fn bar_series(summary: &Summary) -> Vec<BarPoint> {
    Priority::all()
        .iter()
        .map(|&p| BarPoint {
            name: p.as_str(),
            count: summary.priority_count(p),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
