//! In-memory task store.
//!
//! `TaskStore` owns the task records of one session and is the only place
//! they are mutated. Every mutating call returns the record as it now stands
//! so callers can re-render from the return value.

use chrono::Utc;
use tracing::debug;

use crate::error::{check_hours, Result, TrackerError};
use crate::fields::Status;
use crate::task::{non_blank, Effort, Task, TaskDraft, TaskPatch};

#[derive(Debug, Default, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    // Highest id ever issued, so ids of deleted tasks are not handed out again.
    last_id: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        TaskStore::default()
    }

    /// Build a store around existing records, e.g. seed data.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let last_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        TaskStore { tasks, last_id }
    }

    /// Generate the next available task ID.
    pub fn next_id(&self) -> u64 {
        self.tasks
            .iter()
            .map(|t| t.id)
            .max()
            .unwrap_or(0)
            .max(self.last_id)
            + 1
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Borrow all tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Owned snapshot of every task; later mutations do not show up in it.
    pub fn get_all(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Get a task by ID.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: u64) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TrackerError::TaskNotFound { id })
    }

    /// Number of tasks filed under `category`.
    pub fn count_in_category(&self, category: &str) -> usize {
        self.tasks.iter().filter(|t| t.category == category).count()
    }

    pub fn create(&mut self, draft: TaskDraft) -> Result<Task> {
        let title = non_blank(&draft.title).ok_or(TrackerError::BlankTitle)?;
        let effort = draft
            .estimated_hours
            .map(|h| check_hours("estimated hours", h))
            .transpose()?
            .map(|estimated_hours| Effort {
                estimated_hours,
                spent_hours: 0.0,
            });

        let now_utc = Utc::now().timestamp();
        let id = self.next_id();
        let task = Task {
            id,
            title,
            category: draft.category,
            priority: draft.priority,
            status: Status::Pending,
            deadline: draft.deadline,
            description: draft.description.as_deref().and_then(non_blank),
            effort,
            created_at_utc: now_utc,
            updated_at_utc: now_utc,
        };
        self.last_id = id;
        self.tasks.push(task.clone());
        debug!(id, title = %task.title, category = %task.category, "created task");
        Ok(task)
    }

    /// Apply a partial edit. Nothing is changed if any field is invalid.
    pub fn update(&mut self, id: u64, patch: TaskPatch) -> Result<Task> {
        let title = match patch.title.as_deref() {
            Some(raw) => Some(non_blank(raw).ok_or(TrackerError::BlankTitle)?),
            None => None,
        };
        let estimated = patch
            .estimated_hours
            .map(|h| check_hours("estimated hours", h))
            .transpose()?;
        let spent = patch
            .spent_hours
            .map(|h| check_hours("spent hours", h))
            .transpose()?;

        let task = self.get_mut(id)?;
        if let Some(title) = title {
            task.title = title;
        }
        if let Some(desc) = patch.description.as_deref() {
            task.description = non_blank(desc);
        }
        if let Some(category) = patch.category {
            task.category = category;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(deadline) = patch.deadline {
            task.deadline = deadline;
        }
        if estimated.is_some() || spent.is_some() {
            let effort = task.effort.get_or_insert_with(Effort::default);
            if let Some(h) = estimated {
                effort.estimated_hours = h;
            }
            if let Some(h) = spent {
                effort.spent_hours = h;
            }
        }
        task.updated_at_utc = Utc::now().timestamp();
        debug!(id, status = %task.status, "updated task");
        Ok(task.clone())
    }

    /// Mark a task completed. Completing a completed task is a no-op.
    pub fn complete(&mut self, id: u64) -> Result<Task> {
        let task = self.get(id).ok_or(TrackerError::TaskNotFound { id })?;
        if task.is_completed() {
            return Ok(task.clone());
        }
        self.update(id, TaskPatch::status(Status::Completed))
    }

    /// Add time spent on a task, starting an effort record if it has none.
    pub fn log_time(&mut self, id: u64, hours: f64) -> Result<Task> {
        let hours = check_hours("spent hours", hours)?;
        let task = self.get_mut(id)?;
        let effort = task.effort.get_or_insert_with(Effort::default);
        effort.spent_hours += hours;
        task.updated_at_utc = Utc::now().timestamp();
        debug!(id, hours, total = effort.spent_hours, "logged time");
        Ok(task.clone())
    }

    pub fn delete(&mut self, id: u64) -> Result<Task> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(TrackerError::TaskNotFound { id })?;
        let removed = self.tasks.remove(idx);
        debug!(id, "deleted task");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::fields::Priority;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(title: &str) -> TaskDraft {
        TaskDraft::new(title, "Matemática", Priority::Medium, date(2026, 10, 20))
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut store = TaskStore::new();
        let a = store.create(draft("Integrais")).unwrap();
        let b = store.create(draft("Derivadas")).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.status, Status::Pending);
        assert_eq!(a.effort, None);
    }

    #[test]
    fn test_create_with_estimate_starts_effort_at_zero() {
        let mut store = TaskStore::new();
        let task = store.create(draft("Relatório").estimate(6.0)).unwrap();
        assert_eq!(
            task.effort,
            Some(Effort { estimated_hours: 6.0, spent_hours: 0.0 })
        );
    }

    #[test]
    fn test_create_rejects_blank_title_without_changing_store() {
        let mut store = TaskStore::new();
        store.create(draft("Integrais")).unwrap();
        let before = store.get_all();
        for title in ["", "   ", "\t\n"] {
            let err = store.create(draft(title)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
        assert_eq!(store.get_all(), before);
        assert_eq!(store.next_id(), 2);
    }

    #[test]
    fn test_create_rejects_negative_estimate() {
        let mut store = TaskStore::new();
        let err = store.create(draft("Integrais").estimate(-1.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_then_delete_round_trip() {
        let mut store = TaskStore::new();
        store.create(draft("Integrais")).unwrap();
        store.create(draft("Derivadas")).unwrap();
        let before = store.get_all();
        let created = store.create(draft("Séries")).unwrap();
        let removed = store.delete(created.id).unwrap();
        assert_eq!(removed, created);
        assert_eq!(store.get_all(), before);
    }

    #[test]
    fn test_ids_never_reused_after_delete() {
        let mut store = TaskStore::new();
        let a = store.create(draft("a")).unwrap();
        let b = store.create(draft("b")).unwrap();
        store.delete(b.id).unwrap();
        let c = store.create(draft("c")).unwrap();
        assert!(c.id > b.id);
        store.delete(a.id).unwrap();
        store.delete(c.id).unwrap();
        let d = store.create(draft("d")).unwrap();
        assert_eq!(d.id, 4);
    }

    #[test]
    fn test_update_partial_fields() {
        let mut store = TaskStore::new();
        let task = store.create(draft("Integrais").description("cap. 5")).unwrap();
        let patch = TaskPatch {
            priority: Some(Priority::High),
            status: Some(Status::InProgress),
            ..TaskPatch::default()
        };
        let updated = store.update(task.id, patch).unwrap();
        assert_eq!(updated.title, "Integrais");
        assert_eq!(updated.description.as_deref(), Some("cap. 5"));
        assert_eq!(updated.priority, Priority::High);
        assert_eq!(updated.status, Status::InProgress);
        assert_eq!(store.get(task.id), Some(&updated));
    }

    #[test]
    fn test_update_blank_title_is_rejected_and_nothing_changes() {
        let mut store = TaskStore::new();
        let task = store.create(draft("Integrais")).unwrap();
        let patch = TaskPatch {
            title: Some("  ".into()),
            status: Some(Status::Completed),
            ..TaskPatch::default()
        };
        let err = store.update(task.id, patch).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(store.get(task.id), Some(&task));
    }

    #[test]
    fn test_update_unknown_id() {
        let mut store = TaskStore::new();
        let err = store.update(9, TaskPatch::status(Status::Pending)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_update_allows_any_status_transition() {
        let mut store = TaskStore::new();
        let task = store.create(draft("Integrais")).unwrap();
        store.complete(task.id).unwrap();
        let reopened = store.update(task.id, TaskPatch::status(Status::Pending)).unwrap();
        assert_eq!(reopened.status, Status::Pending);
    }

    #[test]
    fn test_empty_description_clears_it() {
        let mut store = TaskStore::new();
        let task = store.create(draft("Integrais").description("notes")).unwrap();
        let patch = TaskPatch {
            description: Some(String::new()),
            ..TaskPatch::default()
        };
        assert_eq!(store.update(task.id, patch).unwrap().description, None);
    }

    #[test]
    fn test_complete_is_idempotent() {
        let mut store = TaskStore::new();
        let task = store.create(draft("Integrais")).unwrap();
        let first = store.complete(task.id).unwrap();
        let second = store.complete(task.id).unwrap();
        assert_eq!(first.status, Status::Completed);
        assert_eq!(first, second);
        assert_eq!(store.complete(42).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_log_time_accumulates() {
        let mut store = TaskStore::new();
        let task = store.create(draft("Integrais").estimate(4.0)).unwrap();
        store.log_time(task.id, 1.5).unwrap();
        let task = store.log_time(task.id, 1.0).unwrap();
        assert_eq!(task.spent_hours(), 2.5);
        assert_eq!(task.estimated_hours(), 4.0);

        let bare = store.create(draft("Sem estimativa")).unwrap();
        let bare = store.log_time(bare.id, 2.0).unwrap();
        assert_eq!(bare.effort, Some(Effort { estimated_hours: 0.0, spent_hours: 2.0 }));
        assert!(store.log_time(bare.id, -1.0).is_err());
    }

    #[test]
    fn test_delete_unknown_id() {
        let mut store = TaskStore::new();
        assert_eq!(store.delete(1).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_snapshot_is_not_live() {
        let mut store = TaskStore::new();
        store.create(draft("Integrais")).unwrap();
        let snapshot = store.get_all();
        store.create(draft("Derivadas")).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_from_tasks_continues_after_max_id() {
        let mut seeded = TaskStore::new();
        seeded.create(draft("a")).unwrap();
        seeded.create(draft("b")).unwrap();
        let mut store = TaskStore::from_tasks(seeded.get_all());
        assert_eq!(store.create(draft("c")).unwrap().id, 3);
        assert_eq!(store.count_in_category("Matemática"), 3);
        assert_eq!(store.count_in_category("Outros"), 0);
    }
}
