use crate::error::{Result, TaskdeckError};
use crate::types::{Priority, Status};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

/// The canonical task record as the remote API stores it. Field names on
/// the wire are camelCase (`startTime`, `endTime`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: Status,
    pub priority: Priority,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub note: Option<String>,
    /// Calendar key derived from `start_time`'s day. Recomputed locally
    /// whenever `start_time` changes; never authoritative.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl Task {
    /// Recompute the derived `date` field from `start_time`.
    pub fn sync_date(&mut self) {
        self.date = self.start_time.map(|t| t.date_naive());
    }

    /// Merge a partial response into this record. Fields absent from the
    /// patch keep their current value; `id` is immutable and never taken
    /// from the patch.
    pub fn merge(&mut self, patch: &TaskDraft) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(start) = patch.start_time {
            self.start_time = Some(start);
            self.sync_date();
        }
        if let Some(end) = patch.end_time {
            self.end_time = Some(end);
        }
        if let Some(note) = &patch.note {
            self.note = Some(note.clone());
        }
    }

    /// Full record as a draft, used when a cross-column kanban move
    /// resubmits the whole task with a new status.
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            name: Some(self.name.clone()),
            description: self.description.clone(),
            status: Some(self.status),
            priority: Some(self.priority),
            start_time: self.start_time,
            end_time: self.end_time,
            note: self.note.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// TaskDraft
// ---------------------------------------------------------------------------

/// Partial task shape: the body of create/update requests and of update
/// responses. Omitted fields are left untouched server-side, so every
/// field is optional and skipped when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TaskDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Validation for a create submission: name required and non-empty
    /// after trimming, times strictly ordered when both present.
    pub fn validate_create(&self) -> Result<()> {
        match &self.name {
            Some(name) if !name.trim().is_empty() => {}
            _ => {
                return Err(TaskdeckError::Validation(
                    "task name must not be empty".to_string(),
                ))
            }
        }
        self.validate_times()
    }

    /// Validation for an update submission: a name, if supplied, must be
    /// non-empty; time ordering as for create.
    pub fn validate_update(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(TaskdeckError::Validation(
                    "task name must not be empty".to_string(),
                ));
            }
        }
        self.validate_times()
    }

    fn validate_times(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if start >= end {
                return Err(TaskdeckError::Validation(
                    "startTime must be strictly before endTime".to_string(),
                ));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
