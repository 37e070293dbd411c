use crate::task::Task;
use crate::types::{Priority, Status};
use chrono::{DateTime, Utc};
use std::fmt;

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// The list view's filter state. `None` means "All"; the three predicates
/// are independent and combined with AND.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub search: String,
}

impl ListFilter {
    pub fn matches(&self, task: &Task) -> bool {
        let status_ok = self.status.map(|s| task.status == s).unwrap_or(true);
        let priority_ok = self.priority.map(|p| task.priority == p).unwrap_or(true);
        let search_ok = if self.search.is_empty() {
            true
        } else {
            let needle = self.search.to_lowercase();
            task.name.to_lowercase().contains(&needle)
                || task
                    .description
                    .as_deref()
                    .map(|d| d.to_lowercase().contains(&needle))
                    .unwrap_or(false)
        };
        status_ok && priority_ok && search_ok
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Newest start first.
    StartDesc,
    /// Oldest start first.
    StartAsc,
    /// High before Medium before Low.
    Priority,
    /// Name, lexicographic.
    Name,
    /// Workflow order: Todo, InProgress, Review, Done.
    Status,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::StartDesc => "date",
            SortKey::StartAsc => "date-asc",
            SortKey::Priority => "priority",
            SortKey::Name => "name",
            SortKey::Status => "status",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortKey {
    type Err = crate::error::TaskdeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" | "start-desc" => Ok(SortKey::StartDesc),
            "date-asc" | "start-asc" => Ok(SortKey::StartAsc),
            "priority" => Ok(SortKey::Priority),
            "name" => Ok(SortKey::Name),
            "status" => Ok(SortKey::Status),
            _ => Err(crate::error::TaskdeckError::InvalidSortKey(s.to_string())),
        }
    }
}

/// A missing start sorts as the epoch, matching the source's
/// `new Date(0)` fallback.
fn start_or_epoch(task: &Task) -> DateTime<Utc> {
    task.start_time.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Filter then stable-sort; ties keep their prior relative order.
pub fn filter_and_sort(tasks: &[Task], filter: &ListFilter, sort: SortKey) -> Vec<Task> {
    let mut rows: Vec<Task> = tasks.iter().filter(|t| filter.matches(t)).cloned().collect();
    match sort {
        SortKey::StartDesc => rows.sort_by_key(|t| std::cmp::Reverse(start_or_epoch(t))),
        SortKey::StartAsc => rows.sort_by_key(start_or_epoch),
        SortKey::Priority => rows.sort_by_key(|t| t.priority.rank()),
        SortKey::Name => rows.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::Status => rows.sort_by_key(|t| t.status.rank()),
    }
    rows
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn task(id: &str, name: &str, status: Status, priority: Priority) -> Task {
        Task {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            status,
            priority,
            start_time: None,
            end_time: None,
            note: None,
            date: None,
        }
    }

    fn sample() -> Vec<Task> {
        let mut a = task("1", "Fix login", Status::Todo, Priority::High);
        a.description = Some("OAuth redirect broken".to_string());
        a.start_time = Some(Utc.with_ymd_and_hms(2025, 1, 3, 9, 0, 0).unwrap());
        let mut b = task("2", "Write docs", Status::Done, Priority::Low);
        b.start_time = Some(Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap());
        let c = task("3", "Review PR", Status::Review, Priority::Medium);
        vec![a, b, c]
    }

    #[test]
    fn filters_are_independent_and_anded() {
        let tasks = sample();
        let all = ListFilter::default();
        assert_eq!(filter_and_sort(&tasks, &all, SortKey::Name).len(), 3);

        let by_status = ListFilter {
            status: Some(Status::Done),
            ..ListFilter::default()
        };
        let rows = filter_and_sort(&tasks, &by_status, SortKey::Name);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "2");

        // Adding a priority filter narrows without changing status matching.
        let both = ListFilter {
            status: Some(Status::Done),
            priority: Some(Priority::High),
            ..ListFilter::default()
        };
        assert!(filter_and_sort(&tasks, &both, SortKey::Name).is_empty());
    }

    #[test]
    fn search_matches_name_or_description_case_insensitive() {
        let tasks = sample();
        let by_name = ListFilter {
            search: "LOGIN".to_string(),
            ..ListFilter::default()
        };
        assert_eq!(filter_and_sort(&tasks, &by_name, SortKey::Name).len(), 1);

        let by_description = ListFilter {
            search: "oauth".to_string(),
            ..ListFilter::default()
        };
        let rows = filter_and_sort(&tasks, &by_description, SortKey::Name);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "1");
    }

    #[test]
    fn priority_sort_puts_high_first() {
        let rows = filter_and_sort(&sample(), &ListFilter::default(), SortKey::Priority);
        let priorities: Vec<Priority> = rows.iter().map(|t| t.priority).collect();
        assert_eq!(priorities, [Priority::High, Priority::Medium, Priority::Low]);
    }

    #[test]
    fn status_sort_follows_workflow_order() {
        let rows = filter_and_sort(&sample(), &ListFilter::default(), SortKey::Status);
        let ids: Vec<&str> = rows.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "3", "2"]);
    }

    #[test]
    fn start_sorts_treat_missing_as_epoch() {
        let rows = filter_and_sort(&sample(), &ListFilter::default(), SortKey::StartAsc);
        // Task 3 has no start, so it sorts before both dated tasks.
        let ids: Vec<&str> = rows.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["3", "2", "1"]);

        let rows = filter_and_sort(&sample(), &ListFilter::default(), SortKey::StartDesc);
        let ids: Vec<&str> = rows.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn sort_is_stable_on_ties() {
        let tasks = vec![
            task("1", "a", Status::Todo, Priority::High),
            task("2", "b", Status::Todo, Priority::High),
            task("3", "c", Status::Todo, Priority::High),
        ];
        let rows = filter_and_sort(&tasks, &ListFilter::default(), SortKey::Priority);
        let ids: Vec<&str> = rows.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }
}
