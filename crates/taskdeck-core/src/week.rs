use crate::task::Task;
use chrono::{Datelike, Duration, NaiveDate, Timelike};

// ---------------------------------------------------------------------------
// Week layout
// ---------------------------------------------------------------------------

/// Monday of the week containing `date` (Sunday rolls back six days).
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// The seven days of the week containing `date`, Monday first.
pub fn week_days(date: NaiveDate) -> [NaiveDate; 7] {
    let start = start_of_week(date);
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

// ---------------------------------------------------------------------------
// Hour slots
// ---------------------------------------------------------------------------

/// Whether a task occupies the hour slot `hour` on `day`: it must start
/// on that day, and the slot satisfies `start.hour <= h < end.hour`. A
/// task with no duration (missing or equal end) occupies exactly its
/// start hour.
pub fn occupies_slot(task: &Task, day: NaiveDate, hour: u32) -> bool {
    let Some(start) = task.start_time else {
        return false;
    };
    if start.date_naive() != day {
        return false;
    }
    let start_hour = start.hour();
    let end_hour = task.end_time.map(|e| e.hour()).unwrap_or(start_hour);
    if end_hour <= start_hour {
        hour == start_hour
    } else {
        start_hour <= hour && hour < end_hour
    }
}

/// Tasks in a given day/hour cell, preserving `items` order.
pub fn tasks_in_slot(tasks: &[Task], day: NaiveDate, hour: u32) -> Vec<&Task> {
    tasks.iter().filter(|t| occupies_slot(t, day, hour)).collect()
}

/// Rendered height of a task in whole hour rows: `ceil(duration)` with a
/// one-hour minimum.
pub fn duration_rows(task: &Task) -> u32 {
    let (Some(start), Some(end)) = (task.start_time, task.end_time) else {
        return 1;
    };
    let minutes = (end - start).num_minutes();
    if minutes <= 0 {
        return 1;
    }
    (minutes as u64).div_ceil(60).max(1) as u32
}

/// True for the slot where the task's card is drawn (its start hour).
pub fn is_first_hour(task: &Task, hour: u32) -> bool {
    task.start_time.map(|s| s.hour() == hour).unwrap_or(true)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
