use crate::types::ActivityKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entries kept in the recent-activity feed. The log is client-local and
/// append-only; nothing here ever reaches the server.
pub const ACTIVITY_CAP: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: Uuid,
    pub kind: ActivityKind,
    pub details: String,
    pub task_name: String,
    pub timestamp: DateTime<Utc>,
}

impl ActivityEntry {
    pub fn new(kind: ActivityKind, task_name: impl Into<String>) -> Self {
        let details = match kind {
            ActivityKind::Add => "Task created",
            ActivityKind::Update => "Task updated",
            ActivityKind::Delete => "Task deleted",
        };
        Self {
            id: Uuid::new_v4(),
            kind,
            details: details.to_string(),
            task_name: task_name.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Prepend an entry, newest first, dropping the oldest past the cap.
pub fn record(log: &mut Vec<ActivityEntry>, entry: ActivityEntry) {
    log.insert(0, entry);
    log.truncate(ACTIVITY_CAP);
}
