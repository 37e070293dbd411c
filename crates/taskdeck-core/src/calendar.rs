use crate::task::Task;
use chrono::{Datelike, Duration, NaiveDate};

// ---------------------------------------------------------------------------
// Day bucketing
// ---------------------------------------------------------------------------

/// Whether a task is "on" a given day: both ends truncated to midnight,
/// inclusion is `start.date <= d <= end.date`, with a missing end
/// defaulting to the start. A task with no start never appears.
pub fn occurs_on(task: &Task, day: NaiveDate) -> bool {
    let Some(start) = task.start_time else {
        return false;
    };
    let start_day = start.date_naive();
    let end_day = task.end_time.map(|e| e.date_naive()).unwrap_or(start_day);
    start_day <= day && day <= end_day
}

/// Tasks occurring on `day`, preserving `items` order.
pub fn tasks_on(tasks: &[Task], day: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|t| occurs_on(t, day)).collect()
}

// ---------------------------------------------------------------------------
// Month grid
// ---------------------------------------------------------------------------

/// The 42 cells (six Monday-started weeks) the month view renders, padded
/// with the surrounding months' days.
pub fn month_grid(year: i32, month: u32) -> Option<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let lead = first.weekday().num_days_from_monday() as i64;
    let grid_start = first - Duration::days(lead);
    Some((0..42).map(|i| grid_start + Duration::days(i)).collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
