use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Workflow stage of a task. The wire format uses the PascalCase spelling
/// (`"InProgress"`), matching what the task API stores and returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Todo,
    InProgress,
    Review,
    Done,
}

impl Status {
    pub fn all() -> &'static [Status] {
        &[Status::Todo, Status::InProgress, Status::Review, Status::Done]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "Todo",
            Status::InProgress => "InProgress",
            Status::Review => "Review",
            Status::Done => "Done",
        }
    }

    /// Workflow position used by the list view's status sort:
    /// Todo < InProgress < Review < Done.
    pub fn rank(self) -> u8 {
        match self {
            Status::Todo => 0,
            Status::InProgress => 1,
            Status::Review => 2,
            Status::Done => 3,
        }
    }

    /// Fixed dashboard color per status.
    pub fn color(self) -> &'static str {
        match self {
            Status::Done => "#10B981",
            Status::InProgress => "#F59E0B",
            Status::Review => "#3B82F6",
            Status::Todo => "#EC4899",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = crate::error::TaskdeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Todo" | "todo" => Ok(Status::Todo),
            "InProgress" | "in-progress" | "inprogress" => Ok(Status::InProgress),
            "Review" | "review" => Ok(Status::Review),
            "Done" | "done" => Ok(Status::Done),
            _ => Err(crate::error::TaskdeckError::InvalidStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn all() -> &'static [Priority] {
        &[Priority::Low, Priority::Medium, Priority::High]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Sort position for the list view: High < Medium < Low, so that
    /// ascending order puts the most urgent work first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = crate::error::TaskdeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" | "low" => Ok(Priority::Low),
            "Medium" | "medium" => Ok(Priority::Medium),
            "High" | "high" => Ok(Priority::High),
            _ => Err(crate::error::TaskdeckError::InvalidPriority(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ActivityKind
// ---------------------------------------------------------------------------

/// Tag on a client-local activity log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Add,
    Update,
    Delete,
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActivityKind::Add => "add",
            ActivityKind::Update => "update",
            ActivityKind::Delete => "delete",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
