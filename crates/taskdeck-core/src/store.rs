use crate::activity::{self, ActivityEntry};
use crate::error::{Result, TaskdeckError};
use crate::gateway::TaskGateway;
use crate::task::{Task, TaskDraft};
use crate::types::ActivityKind;

// ---------------------------------------------------------------------------
// TaskStore
// ---------------------------------------------------------------------------

/// Client-side cache of all tasks plus the selected-task slot and the
/// activity log. Every mutation goes through the gateway first; local
/// state only changes after the gateway call succeeds, so a failed call
/// leaves the cache exactly as it was.
///
/// Update responses are merged field-by-field into the cached record
/// (last-write-wins). Concurrent edits of the same task from two fronts
/// are not guarded against: whichever response lands last overwrites the
/// overlapping fields. This matches the source system's behavior and is
/// deliberate, not an oversight.
pub struct TaskStore {
    gateway: Box<dyn TaskGateway>,
    items: Vec<Task>,
    selected: Option<Task>,
    loading: bool,
    loading_detail: bool,
    activities: Vec<ActivityEntry>,
}

impl TaskStore {
    pub fn new(gateway: Box<dyn TaskGateway>) -> Self {
        Self {
            gateway,
            items: Vec::new(),
            selected: None,
            loading: false,
            loading_detail: false,
            activities: Vec::new(),
        }
    }

    pub fn items(&self) -> &[Task] {
        &self.items
    }

    pub fn selected(&self) -> Option<&Task> {
        self.selected.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loading_detail(&self) -> bool {
        self.loading_detail
    }

    pub fn activities(&self) -> &[ActivityEntry] {
        &self.activities
    }

    pub fn find(&self, id: &str) -> Option<&Task> {
        self.items.iter().find(|t| t.id == id)
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Fetch the full list and replace `items` wholesale. The loading
    /// flag clears on success and failure alike.
    pub fn load(&mut self) -> Result<()> {
        self.loading = true;
        let result = self.gateway.list();
        self.loading = false;
        self.items = result?;
        Ok(())
    }

    /// Fetch one task into the selected slot; `items` is untouched.
    pub fn load_one(&mut self, id: &str) -> Result<()> {
        self.loading_detail = true;
        let result = self.gateway.get(id);
        self.loading_detail = false;
        self.selected = Some(result?);
        Ok(())
    }

    pub fn clear_selected(&mut self) {
        self.selected = None;
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Create via the gateway, append the returned record, log an "add"
    /// activity. Returns the server-assigned task.
    pub fn create(&mut self, draft: &TaskDraft) -> Result<Task> {
        draft.validate_create()?;
        let task = self.gateway.create(draft)?;
        self.items.push(task.clone());
        activity::record(
            &mut self.activities,
            ActivityEntry::new(ActivityKind::Add, &task.name),
        );
        Ok(task)
    }

    /// Update via the gateway and defensively merge the response into
    /// the cached record (and the selected slot when ids match).
    pub fn update(&mut self, id: &str, draft: &TaskDraft) -> Result<()> {
        draft.validate_update()?;
        let patch = self.gateway.update(id, draft)?;

        let task = self
            .items
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskdeckError::NotFound(id.to_string()))?;
        task.merge(&patch);
        let name = task.name.clone();

        if let Some(selected) = self.selected.as_mut() {
            if selected.id == id {
                selected.merge(&patch);
            }
        }
        activity::record(
            &mut self.activities,
            ActivityEntry::new(ActivityKind::Update, name),
        );
        Ok(())
    }

    /// Delete via the gateway, drop the cached record, log a "delete"
    /// activity carrying the pre-deletion name.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.gateway.delete(id)?;
        let name = self
            .items
            .iter()
            .position(|t| t.id == id)
            .map(|i| self.items.remove(i).name);
        if let Some(name) = name {
            activity::record(
                &mut self.activities,
                ActivityEntry::new(ActivityKind::Delete, name),
            );
        }
        Ok(())
    }

    /// Delete every cached task, one gateway call at a time. A failed
    /// delete is logged and skipped; the rest continue. Returns the
    /// number actually deleted.
    pub fn delete_all(&mut self) -> usize {
        let ids: Vec<String> = self.items.iter().map(|t| t.id.clone()).collect();
        let mut deleted = 0;
        for id in ids {
            match self.delete(&id) {
                Ok(()) => deleted += 1,
                Err(err) => tracing::warn!(%id, %err, "delete failed, continuing"),
            }
        }
        deleted
    }

    /// Client-only reorder of `items` to match the given id order, used
    /// for same-column kanban drags. Ids not present are ignored; items
    /// not listed keep their relative order after the listed ones. Never
    /// touches the gateway and is lost on the next `load`.
    pub fn reorder(&mut self, ids: &[String]) {
        let mut reordered: Vec<Task> = Vec::with_capacity(self.items.len());
        for id in ids {
            if let Some(pos) = self.items.iter().position(|t| &t.id == id) {
                reordered.push(self.items.remove(pos));
            }
        }
        reordered.append(&mut self.items);
        self.items = reordered;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Priority, Status};
    use std::cell::RefCell;
    use std::collections::HashSet;

    /// In-memory gateway double: serves a fixed set of tasks, assigns
    /// sequential ids, and can be told to fail specific operations.
    struct FakeGateway {
        tasks: RefCell<Vec<Task>>,
        next_id: RefCell<u32>,
        fail_ops: HashSet<&'static str>,
    }

    impl FakeGateway {
        fn new(tasks: Vec<Task>) -> Self {
            let next = tasks.len() as u32 + 1;
            Self {
                tasks: RefCell::new(tasks),
                next_id: RefCell::new(next),
                fail_ops: HashSet::new(),
            }
        }

        fn failing(mut self, op: &'static str) -> Self {
            self.fail_ops.insert(op);
            self
        }

        fn check(&self, op: &'static str) -> Result<()> {
            if self.fail_ops.contains(op) {
                Err(TaskdeckError::Api {
                    status: 500,
                    message: format!("{op} forced to fail"),
                })
            } else {
                Ok(())
            }
        }
    }

    impl TaskGateway for FakeGateway {
        fn list(&self) -> Result<Vec<Task>> {
            self.check("list")?;
            Ok(self.tasks.borrow().clone())
        }

        fn get(&self, id: &str) -> Result<Task> {
            self.check("get")?;
            self.tasks
                .borrow()
                .iter()
                .find(|t| t.id == id)
                .cloned()
                .ok_or_else(|| TaskdeckError::NotFound(id.to_string()))
        }

        fn create(&self, draft: &TaskDraft) -> Result<Task> {
            self.check("create")?;
            let id = {
                let mut next = self.next_id.borrow_mut();
                let id = next.to_string();
                *next += 1;
                id
            };
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
            self.check("update")?;
            let mut tasks = self.tasks.borrow_mut();
            let task = tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| TaskdeckError::NotFound(id.to_string()))?;
            task.merge(draft);
            Ok(draft.clone())
        }

        fn delete(&self, id: &str) -> Result<()> {
            self.check("delete")?;
            let mut tasks = self.tasks.borrow_mut();
            let pos = tasks
                .iter()
                .position(|t| t.id == id)
                .ok_or_else(|| TaskdeckError::NotFound(id.to_string()))?;
            tasks.remove(pos);
            Ok(())
        }
    }

    fn seed(id: &str, name: &str, status: Status) -> Task {
        Task {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            status,
            priority: Priority::Medium,
            start_time: None,
            end_time: None,
            note: None,
            date: None,
        }
    }

    fn store_with(tasks: Vec<Task>) -> TaskStore {
        let mut store = TaskStore::new(Box::new(FakeGateway::new(tasks)));
        store.load().unwrap();
        store
    }

    #[test]
    fn load_replaces_items_wholesale() {
        let store = store_with(vec![
            seed("1", "a", Status::Todo),
            seed("2", "b", Status::Done),
        ]);
        assert_eq!(store.items().len(), 2);
        assert!(!store.is_loading());
    }

    #[test]
    fn load_failure_clears_loading_and_keeps_items() {
        let gw = FakeGateway::new(vec![seed("1", "a", Status::Todo)]).failing("list");
        let mut store = TaskStore::new(Box::new(gw));
        assert!(store.load().is_err());
        assert!(!store.is_loading());
        assert!(store.items().is_empty());
    }

    #[test]
    fn create_appends_and_logs_add_activity() {
        let mut store = store_with(vec![]);
        let mut draft = TaskDraft::named("Write spec");
        draft.status = Some(Status::Todo);
        draft.priority = Some(Priority::High);

        let created = store.create(&draft).unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.activities()[0].kind, ActivityKind::Add);
        assert_eq!(store.activities()[0].task_name, "Write spec");
    }

    #[test]
    fn create_failure_leaves_items_unchanged() {
        let gw = FakeGateway::new(vec![]).failing("create");
        let mut store = TaskStore::new(Box::new(gw));
        store.load().unwrap();
        assert!(store.create(&TaskDraft::named("x")).is_err());
        assert!(store.items().is_empty());
        assert!(store.activities().is_empty());
    }

    #[test]
    fn create_rejects_empty_name_before_any_gateway_call() {
        let mut store = store_with(vec![]);
        let err = store.create(&TaskDraft::named("  ")).unwrap_err();
        assert!(matches!(err, TaskdeckError::Validation(_)));
        assert!(store.items().is_empty());
    }

    #[test]
    fn update_merges_into_items_and_selected() {
        let mut store = store_with(vec![seed("1", "a", Status::Todo)]);
        store.load_one("1").unwrap();

        let draft = TaskDraft {
            status: Some(Status::Done),
            ..TaskDraft::default()
        };
        store.update("1", &draft).unwrap();

        assert_eq!(store.items()[0].status, Status::Done);
        assert_eq!(store.items()[0].name, "a");
        assert_eq!(store.selected().unwrap().status, Status::Done);
        assert_eq!(store.activities()[0].kind, ActivityKind::Update);
    }

    #[test]
    fn update_leaves_other_selected_untouched() {
        let mut store = store_with(vec![
            seed("1", "a", Status::Todo),
            seed("2", "b", Status::Todo),
        ]);
        store.load_one("2").unwrap();
        let draft = TaskDraft {
            status: Some(Status::Review),
            ..TaskDraft::default()
        };
        store.update("1", &draft).unwrap();
        assert_eq!(store.selected().unwrap().status, Status::Todo);
    }

    #[test]
    fn delete_removes_exactly_one_and_logs_prior_name() {
        let mut store = store_with(vec![
            seed("1", "keep", Status::Todo),
            seed("2", "drop", Status::Todo),
        ]);
        store.delete("2").unwrap();
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].id, "1");
        assert_eq!(store.activities().len(), 1);
        assert_eq!(store.activities()[0].kind, ActivityKind::Delete);
        assert_eq!(store.activities()[0].task_name, "drop");
    }

    #[test]
    fn delete_unknown_id_is_not_found_and_changes_nothing() {
        let mut store = store_with(vec![seed("1", "a", Status::Todo)]);
        assert!(matches!(
            store.delete("99"),
            Err(TaskdeckError::NotFound(_))
        ));
        assert_eq!(store.items().len(), 1);
        assert!(store.activities().is_empty());
    }

    #[test]
    fn delete_all_removes_every_task() {
        let mut store = store_with(vec![
            seed("1", "a", Status::Todo),
            seed("2", "b", Status::Todo),
        ]);
        assert_eq!(store.delete_all(), 2);
        assert!(store.items().is_empty());
        assert_eq!(store.activities().len(), 2);
    }

    #[test]
    fn delete_all_skips_failures_and_reports_zero() {
        let gw = FakeGateway::new(vec![seed("1", "a", Status::Todo)]).failing("delete");
        let mut store = TaskStore::new(Box::new(gw));
        store.load().unwrap();
        assert_eq!(store.delete_all(), 0);
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn reorder_is_local_and_stable_for_unlisted_items() {
        let mut store = store_with(vec![
            seed("1", "a", Status::Todo),
            seed("2", "b", Status::Todo),
            seed("3", "c", Status::Todo),
        ]);
        store.reorder(&["3".to_string(), "1".to_string()]);
        let ids: Vec<&str> = store.items().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["3", "1", "2"]);

        // A reload discards the display order.
        store.load().unwrap();
        let ids: Vec<&str> = store.items().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn load_one_sets_selected_without_touching_items() {
        let mut store = store_with(vec![seed("1", "a", Status::Todo)]);
        store.load_one("1").unwrap();
        assert_eq!(store.selected().unwrap().id, "1");
        assert_eq!(store.items().len(), 1);

        store.clear_selected();
        assert!(store.selected().is_none());
    }
}
