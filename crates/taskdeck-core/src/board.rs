use crate::task::{Task, TaskDraft};
use crate::types::Status;

// ---------------------------------------------------------------------------
// Column grouping
// ---------------------------------------------------------------------------

/// One kanban column: a status and the tasks in it, in `items` order.
#[derive(Debug)]
pub struct BoardColumn<'a> {
    pub status: Status,
    pub tasks: Vec<&'a Task>,
}

/// Partition tasks into the four status columns, preserving input order
/// within each column. Pure; called on every render.
pub fn columns(tasks: &[Task]) -> Vec<BoardColumn<'_>> {
    Status::all()
        .iter()
        .map(|&status| BoardColumn {
            status,
            tasks: tasks.iter().filter(|t| t.status == status).collect(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Drop resolution
// ---------------------------------------------------------------------------

/// Where a dragged card was released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Onto another card.
    Task(String),
    /// Onto a column's empty drop area.
    Column(Status),
}

/// What the drop turns into: a local reorder or a remote status change.
#[derive(Debug, Clone, PartialEq)]
pub enum DropAction {
    /// Same-column drag: the full new id order for the store's `reorder`.
    /// Display-only, never persisted.
    Reorder(Vec<String>),
    /// Cross-column drag: resubmit the whole record with the new status.
    /// No manual reinsertion — regrouping on the next render places it.
    Move { id: String, draft: TaskDraft, status: Status },
}

/// Turn a completed drag into an action, or `None` when the drop has no
/// effect (unknown ids, dropped on itself, or same position).
pub fn resolve_drop(tasks: &[Task], active_id: &str, target: &DropTarget) -> Option<DropAction> {
    let active = tasks.iter().find(|t| t.id == active_id)?;

    let to_status = match target {
        DropTarget::Column(status) => *status,
        DropTarget::Task(over_id) => {
            if over_id == active_id {
                return None;
            }
            tasks.iter().find(|t| &t.id == over_id)?.status
        }
    };

    if active.status == to_status {
        let over_id = match target {
            DropTarget::Task(id) => id,
            // Dropping on the own column's empty area changes nothing.
            DropTarget::Column(_) => return None,
        };
        let from = tasks.iter().position(|t| t.id == active_id)?;
        let to = tasks.iter().position(|t| &t.id == over_id)?;
        if from == to {
            return None;
        }
        let mut order: Vec<String> = tasks.iter().map(|t| t.id.clone()).collect();
        let id = order.remove(from);
        order.insert(to, id);
        Some(DropAction::Reorder(order))
    } else {
        let mut draft = active.to_draft();
        draft.status = Some(to_status);
        Some(DropAction::Move {
            id: active_id.to_string(),
            draft,
            status: to_status,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
