use crate::error::Result;
use crate::store::TaskStore;
use crate::task::TaskDraft;
use crate::types::{Priority, Status};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Structured command produced by the external chat interpreter. The
/// interpreter itself (free text → JSON) is out of scope; this module
/// consumes its output and drives the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    CreateTask {
        data: TaskDraft,
        #[serde(default)]
        message: Option<String>,
    },
    UpdateTask {
        #[serde(rename = "taskId")]
        task_id: String,
        data: TaskDraft,
        #[serde(default)]
        message: Option<String>,
    },
    DeleteTask {
        #[serde(rename = "taskId")]
        task_id: String,
        #[serde(default)]
        message: Option<String>,
    },
    ListTasks {
        #[serde(default)]
        message: Option<String>,
    },
    DeleteAllTasks {
        #[serde(default)]
        message: Option<String>,
    },
    CreateMultipleTasks {
        tasks: Vec<PlannedTask>,
        #[serde(default)]
        message: Option<String>,
    },
}

/// One sub-task of a bulk create, carrying the interpreter's estimated
/// effort used for auto-scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedTask {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub duration_hours: Option<f64>,
    #[serde(default)]
    pub note: Option<String>,
}

// ---------------------------------------------------------------------------
// Auto-scheduling
// ---------------------------------------------------------------------------

/// Effective working hours per simulated day.
const WORK_HOURS_PER_DAY: f64 = 5.5;
/// Each new day's first task starts at 08:00.
const WORK_START_HOUR: u32 = 8;
const MIN_DURATION_HOURS: f64 = 0.5;
const MAX_DURATION_HOURS: f64 = 6.0;

fn default_duration(priority: Option<Priority>) -> f64 {
    match priority {
        Some(Priority::High) => 4.0,
        Some(Priority::Low) => 1.5,
        _ => 2.5,
    }
}

/// Lay the planned tasks out sequentially from `start`: each task begins
/// where the previous one ended, and when a task would exceed the
/// remaining daily budget the clock rolls to the next day's 08:00.
pub fn schedule(tasks: &[PlannedTask], start: DateTime<Utc>) -> Vec<TaskDraft> {
    let mut cursor = start;
    let mut hours_used = 0.0;
    let mut drafts = Vec::with_capacity(tasks.len());

    for planned in tasks {
        let duration = planned
            .duration_hours
            .unwrap_or_else(|| default_duration(planned.priority))
            .clamp(MIN_DURATION_HOURS, MAX_DURATION_HOURS);

        if hours_used + duration > WORK_HOURS_PER_DAY {
            let next_day = cursor.date_naive() + Duration::days(1);
            cursor = Utc
                .from_utc_datetime(
                    &next_day
                        .and_hms_opt(WORK_START_HOUR, 0, 0)
                        .expect("08:00 is a valid time"),
                );
            hours_used = 0.0;
        }

        let end = cursor + Duration::minutes((duration * 60.0).round() as i64);
        drafts.push(TaskDraft {
            name: Some(planned.name.clone()),
            description: planned.description.clone(),
            status: Some(planned.status.unwrap_or(Status::Todo)),
            priority: Some(planned.priority.unwrap_or(Priority::Medium)),
            start_time: Some(cursor),
            end_time: Some(end),
            note: planned.note.clone(),
        });
        cursor = end;
        hours_used += duration;
    }
    drafts
}

// ---------------------------------------------------------------------------
// Applying commands
// ---------------------------------------------------------------------------

/// Run a command against the store and produce the reply shown in the
/// chat transcript. Update/delete check the local cache first: an unknown
/// id yields a "not found" reply without any gateway call.
pub fn apply(command: &Command, store: &mut TaskStore, now: DateTime<Utc>) -> Result<String> {
    match command {
        Command::CreateTask { data, message } => {
            let mut draft = data.clone();
            if draft.name.as_deref().map(str::trim).unwrap_or("").is_empty() {
                draft.name = Some("New Task".to_string());
            }
            if draft.status.is_none() {
                draft.status = Some(Status::Todo);
            }
            if draft.priority.is_none() {
                draft.priority = Some(Priority::Medium);
            }
            if draft.start_time.is_none() {
                draft.start_time = Some(now);
            }
            if draft.end_time.is_none() {
                draft.end_time = Some(draft.start_time.unwrap_or(now) + Duration::hours(1));
            }
            let task = store.create(&draft)?;
            Ok(message
                .clone()
                .unwrap_or_else(|| format!("Created task \"{}\" (id {}).", task.name, task.id)))
        }

        Command::UpdateTask {
            task_id,
            data,
            message,
        } => {
            let id = clean_id(task_id);
            if store.find(&id).is_none() {
                return Ok(not_found_reply(&id));
            }
            store.update(&id, data)?;
            Ok(message
                .clone()
                .unwrap_or_else(|| format!("Updated task #{id}.")))
        }

        Command::DeleteTask { task_id, message } => {
            let id = clean_id(task_id);
            if store.find(&id).is_none() {
                return Ok(not_found_reply(&id));
            }
            store.delete(&id)?;
            Ok(message
                .clone()
                .unwrap_or_else(|| format!("Deleted task #{id}.")))
        }

        Command::ListTasks { .. } => {
            if store.items().is_empty() {
                return Ok("There are no tasks yet.".to_string());
            }
            let lines: Vec<String> = store
                .items()
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    format!(
                        "{}. {} (ID: {})\n   Priority: {} | Status: {}\n   {}",
                        i + 1,
                        t.name,
                        t.id,
                        t.priority,
                        t.status,
                        t.description.as_deref().unwrap_or("No description"),
                    )
                })
                .collect();
            Ok(format!(
                "Task list ({} tasks):\n\n{}",
                store.items().len(),
                lines.join("\n\n")
            ))
        }

        Command::DeleteAllTasks { .. } => {
            if store.items().is_empty() {
                return Ok("There are no tasks to delete.".to_string());
            }
            let deleted = store.delete_all();
            Ok(format!("Deleted all {deleted} tasks."))
        }

        Command::CreateMultipleTasks { tasks, message } => {
            if tasks.is_empty() {
                return Ok("No tasks to create.".to_string());
            }
            let drafts = schedule(tasks, now);
            let mut created = Vec::new();
            for draft in &drafts {
                match store.create(draft) {
                    Ok(task) => created.push(task),
                    // A failure partway through skips that item and
                    // keeps going, matching the source behavior.
                    Err(err) => tracing::warn!(%err, "bulk create item failed, continuing"),
                }
            }
            let listing: Vec<String> = created
                .iter()
                .enumerate()
                .map(|(i, t)| format!("{}. {} (priority {})", i + 1, t.name, t.priority))
                .collect();
            let header = message
                .clone()
                .unwrap_or_else(|| format!("Created {} tasks.", created.len()));
            Ok(format!("{header}\n\n{}", listing.join("\n")))
        }
    }
}

fn clean_id(raw: &str) -> String {
    raw.trim().trim_start_matches('#').to_string()
}

fn not_found_reply(id: &str) -> String {
    format!("No task with ID \"{id}\" was found. Please check the ID.")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaskdeckError;
    use crate::gateway::TaskGateway;
    use crate::task::Task;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Gateway double that counts calls, so tests can assert the local
    /// not-found precheck short-circuits before any request. `list` is
    /// exempt from the count since every test loads the store first.
    struct CountingGateway {
        tasks: RefCell<Vec<Task>>,
        next_id: Cell<u32>,
        calls: Rc<Cell<u32>>,
    }

    impl CountingGateway {
        fn new(tasks: Vec<Task>) -> Self {
            let next = tasks.len() as u32 + 1;
            Self {
                tasks: RefCell::new(tasks),
                next_id: Cell::new(next),
                calls: Rc::new(Cell::new(0)),
            }
        }
    }

    impl TaskGateway for CountingGateway {
        fn list(&self) -> Result<Vec<Task>> {
            Ok(self.tasks.borrow().clone())
        }

        fn get(&self, id: &str) -> Result<Task> {
            self.calls.set(self.calls.get() + 1);
            self.tasks
                .borrow()
                .iter()
                .find(|t| t.id == id)
                .cloned()
                .ok_or_else(|| TaskdeckError::NotFound(id.to_string()))
        }

        fn create(&self, draft: &TaskDraft) -> Result<Task> {
            self.calls.set(self.calls.get() + 1);
            let id = self.next_id.get().to_string();
            self.next_id.set(self.next_id.get() + 1);
            let mut task = Task {
                id,
                name: draft.name.clone().unwrap_or_default(),
                description: draft.description.clone(),
                status: draft.status.unwrap_or(Status::Todo),
                priority: draft.priority.unwrap_or(Priority::Medium),
                start_time: draft.start_time,
                end_time: draft.end_time,
                note: draft.note.clone(),
                date: None,
            };
            task.sync_date();
            self.tasks.borrow_mut().push(task.clone());
            Ok(task)
        }

        fn update(&self, id: &str, draft: &TaskDraft) -> Result<TaskDraft> {
            self.calls.set(self.calls.get() + 1);
            let mut tasks = self.tasks.borrow_mut();
            let task = tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| TaskdeckError::NotFound(id.to_string()))?;
            task.merge(draft);
            Ok(draft.clone())
        }

        fn delete(&self, id: &str) -> Result<()> {
            self.calls.set(self.calls.get() + 1);
            let mut tasks = self.tasks.borrow_mut();
            let pos = tasks
                .iter()
                .position(|t| t.id == id)
                .ok_or_else(|| TaskdeckError::NotFound(id.to_string()))?;
            tasks.remove(pos);
            Ok(())
        }
    }

    fn seed(id: &str, name: &str) -> Task {
        Task {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            status: Status::Todo,
            priority: Priority::Medium,
            start_time: None,
            end_time: None,
            note: None,
            date: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 6, 8, 0, 0).unwrap()
    }

    fn planned(name: &str, hours: f64) -> PlannedTask {
        PlannedTask {
            name: name.to_string(),
            description: None,
            status: None,
            priority: None,
            duration_hours: Some(hours),
            note: None,
        }
    }

    #[test]
    fn commands_deserialize_from_tagged_json() {
        let json = r##"{"action":"update_task","taskId":"#5","data":{"priority":"High"}}"##;
        let cmd: Command = serde_json::from_str(json).unwrap();
        match cmd {
            Command::UpdateTask { task_id, data, .. } => {
                assert_eq!(task_id, "#5");
                assert_eq!(data.priority, Some(Priority::High));
            }
            other => panic!("unexpected command {other:?}"),
        }

        let json = r#"{"action":"create_multiple_tasks","tasks":[{"name":"Read docs","durationHours":1.5}]}"#;
        let cmd: Command = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, Command::CreateMultipleTasks { ref tasks, .. } if tasks.len() == 1));
    }

    #[test]
    fn schedule_packs_a_day_then_rolls_to_next_morning() {
        let tasks = vec![planned("a", 3.0), planned("b", 2.0), planned("c", 2.0)];
        let drafts = schedule(&tasks, now());

        // a: 08:00–11:00, b: 11:00–13:00 (5h used); c would exceed 5.5h,
        // so it rolls to the next day's 08:00.
        assert_eq!(drafts[0].start_time.unwrap(), now());
        assert_eq!(drafts[1].start_time.unwrap(), now() + Duration::hours(3));
        let c_start = drafts[2].start_time.unwrap();
        assert_eq!(c_start, Utc.with_ymd_and_hms(2025, 1, 7, 8, 0, 0).unwrap());
        assert_eq!(drafts[2].end_time.unwrap(), c_start + Duration::hours(2));
    }

    #[test]
    fn schedule_defaults_duration_by_priority_and_clamps() {
        let mut high = planned("h", 0.0);
        high.duration_hours = None;
        high.priority = Some(Priority::High);
        let oversized = planned("big", 40.0);
        let tiny = planned("tiny", 0.1);

        let drafts = schedule(&[high, oversized, tiny], now());
        assert_eq!(
            drafts[0].end_time.unwrap() - drafts[0].start_time.unwrap(),
            Duration::hours(4)
        );
        assert_eq!(
            drafts[1].end_time.unwrap() - drafts[1].start_time.unwrap(),
            Duration::hours(6)
        );
        assert_eq!(
            drafts[2].end_time.unwrap() - drafts[2].start_time.unwrap(),
            Duration::minutes(30)
        );
    }

    #[test]
    fn update_unknown_id_replies_without_gateway_call() {
        let gateway = CountingGateway::new(vec![seed("1", "a")]);
        let calls = Rc::clone(&gateway.calls);
        let mut store = TaskStore::new(Box::new(gateway));
        store.load().unwrap();

        let cmd = Command::UpdateTask {
            task_id: "#99".to_string(),
            data: TaskDraft::default(),
            message: None,
        };
        let reply = apply(&cmd, &mut store, now()).unwrap();
        assert!(reply.contains("99"));
        assert!(reply.contains("found"));
        assert_eq!(calls.get(), 0, "no gateway call expected");
    }

    #[test]
    fn delete_strips_leading_hash() {
        let mut store = TaskStore::new(Box::new(CountingGateway::new(vec![seed("7", "x")])));
        store.load().unwrap();

        let cmd = Command::DeleteTask {
            task_id: "#7".to_string(),
            message: None,
        };
        let reply = apply(&cmd, &mut store, now()).unwrap();
        assert!(reply.contains("Deleted"));
        assert!(store.items().is_empty());
    }

    #[test]
    fn create_fills_defaults() {
        let mut store = TaskStore::new(Box::new(CountingGateway::new(vec![])));
        store.load().unwrap();

        let cmd = Command::CreateTask {
            data: TaskDraft::default(),
            message: None,
        };
        apply(&cmd, &mut store, now()).unwrap();
        let task = &store.items()[0];
        assert_eq!(task.name, "New Task");
        assert_eq!(task.status, Status::Todo);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.start_time, Some(now()));
        assert_eq!(task.end_time, Some(now() + Duration::hours(1)));
    }

    #[test]
    fn bulk_create_is_sequential_and_ordered() {
        let mut store = TaskStore::new(Box::new(CountingGateway::new(vec![])));
        store.load().unwrap();

        let cmd = Command::CreateMultipleTasks {
            tasks: vec![planned("first", 1.0), planned("second", 1.0)],
            message: None,
        };
        let reply = apply(&cmd, &mut store, now()).unwrap();
        assert!(reply.contains("first"));
        assert!(reply.contains("second"));
        assert_eq!(store.items().len(), 2);
        assert!(store.items()[0].start_time.unwrap() < store.items()[1].start_time.unwrap());
    }

    #[test]
    fn list_and_delete_all_replies() {
        let mut store = TaskStore::new(Box::new(CountingGateway::new(vec![
            seed("1", "alpha"),
            seed("2", "beta"),
        ])));
        store.load().unwrap();

        let reply = apply(&Command::ListTasks { message: None }, &mut store, now()).unwrap();
        assert!(reply.contains("alpha"));
        assert!(reply.contains("2 tasks"));

        let reply =
            apply(&Command::DeleteAllTasks { message: None }, &mut store, now()).unwrap();
        assert!(reply.contains("2"));
        assert!(store.items().is_empty());
    }
}
