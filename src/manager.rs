//! Domain operations over tasks, layered on one [`JsonlStore<Task>`].

use crate::id::{child_id, generate_id};
use crate::store::JsonlStore;
use crate::task::{Task, TaskPriority, TaskStatus, TaskType, ValidationError};
use chrono::Utc;
use eyre::{Context, Result};
use std::path::Path;

/// Tasks file relative to the project directory.
const TASKS_FILE: &str = "tasks/tasks.jsonl";

/// Errors that can occur during task operations.
#[derive(Debug)]
pub enum TaskError {
    /// The parent id given at creation does not resolve to a task.
    ParentNotFound(String),
    /// Validation error.
    Validation(ValidationError),
}

impl std::fmt::Display for TaskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskError::ParentNotFound(id) => write!(f, "parent task not found: {}", id),
            TaskError::Validation(e) => write!(f, "validation error: {}", e),
        }
    }
}

impl std::error::Error for TaskError {}

/// Partial update for [`TaskManager::update`]. Fields left as `None` keep
/// their current value.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

/// The task manager.
///
/// Owns id generation, the parent/child hierarchy, dependency edges, and
/// readiness ordering. All persistence goes through the underlying store;
/// the store itself knows nothing about tasks.
pub struct TaskManager {
    store: JsonlStore<Task>,
}

impl TaskManager {
    /// Create a manager rooted at the given project directory.
    ///
    /// Tasks are persisted to `<project_dir>/tasks/tasks.jsonl`; the file
    /// and its directories are created on first write.
    pub fn new(project_dir: &Path) -> Self {
        Self {
            store: JsonlStore::new(project_dir.join(TASKS_FILE)),
        }
    }

    /// Create a new task.
    ///
    /// Top-level tasks get a fresh `pt-` id; with `parent` given, the id is
    /// `<parent_id>.<n>` where `n` is unique among the parent's children.
    pub fn create(
        &self,
        title: &str,
        priority: TaskPriority,
        task_type: TaskType,
        parent: Option<&str>,
    ) -> Result<Task> {
        let now = Utc::now();

        let id = match parent {
            Some(parent_id) => {
                if self.store.get_by_id(parent_id)?.is_none() {
                    return Err(eyre::eyre!(TaskError::ParentNotFound(parent_id.to_string())));
                }
                let children = self
                    .store
                    .filter(|t| t.parent.as_deref() == Some(parent_id))?;
                child_id(parent_id, children.iter().map(|t| t.id.as_str()))
            }
            None => generate_id(title, now),
        };

        let task = Task {
            id,
            title: title.to_string(),
            status: TaskStatus::Pending,
            priority,
            task_type,
            parent: parent.map(String::from),
            blocks: vec![],
            blocked_by: vec![],
            created_at: now,
            updated_at: now,
        };

        // Validate before persisting
        task.validate().map_err(|e| eyre::eyre!(TaskError::Validation(e)))?;

        self.store.append(&task).context("Failed to persist task")?;
        log::info!("Created task {}", task.id);

        Ok(task)
    }

    /// Get a task by ID.
    pub fn get(&self, id: &str) -> Result<Option<Task>> {
        self.store.get_by_id(id)
    }

    /// Apply a partial update to a task.
    ///
    /// Returns `None` when the id does not resolve; a failed write is an
    /// error, so absence and failure stay distinguishable.
    pub fn update(&self, id: &str, patch: TaskPatch) -> Result<Option<Task>> {
        let Some(existing) = self.store.get_by_id(id)? else {
            return Ok(None);
        };

        let updated = Task {
            title: patch.title.unwrap_or(existing.title),
            status: patch.status.unwrap_or(existing.status),
            priority: patch.priority.unwrap_or(existing.priority),
            updated_at: Utc::now(),
            ..existing
        };

        // Validate before persisting
        updated.validate().map_err(|e| eyre::eyre!(TaskError::Validation(e)))?;

        let replaced = self
            .store
            .update(id, updated.clone())
            .context("Failed to persist updated task")?;
        // The task was just fetched, so the rewrite must find it
        debug_assert!(replaced, "task {} vanished between read and write", id);

        Ok(Some(updated))
    }

    /// Delete a task by ID. Returns false when the id does not resolve.
    ///
    /// Subtasks are not deleted recursively, and dependency edges in other
    /// tasks that reference the deleted id are left dangling.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let deleted = self.store.delete(id)?;
        if deleted {
            log::info!("Deleted task {}", id);
        }
        Ok(deleted)
    }

    /// Record that `dependent_id` cannot start until `dependency_id` is done.
    ///
    /// Updates both sides of the edge: the dependency's `blocks` and the
    /// dependent's `blocked_by`. Returns false when either id does not
    /// resolve or the two are equal; adding an existing edge is a no-op
    /// that still returns true. Cycles are not detected.
    pub fn add_dependency(&self, dependent_id: &str, dependency_id: &str) -> Result<bool> {
        if dependent_id == dependency_id {
            return Ok(false);
        }

        let Some(mut dependent) = self.store.get_by_id(dependent_id)? else {
            return Ok(false);
        };
        let Some(mut dependency) = self.store.get_by_id(dependency_id)? else {
            return Ok(false);
        };

        let now = Utc::now();

        if !dependent.blocked_by.iter().any(|id| id == dependency_id) {
            dependent.blocked_by.push(dependency_id.to_string());
            dependent.updated_at = now;
            let replaced = self
                .store
                .update(dependent_id, dependent)
                .context("Failed to persist blocked_by edge")?;
            debug_assert!(replaced, "task {} vanished between read and write", dependent_id);
        }

        if !dependency.blocks.iter().any(|id| id == dependent_id) {
            dependency.blocks.push(dependent_id.to_string());
            dependency.updated_at = now;
            let replaced = self
                .store
                .update(dependency_id, dependency)
                .context("Failed to persist blocks edge")?;
            debug_assert!(replaced, "task {} vanished between read and write", dependency_id);
        }

        log::info!("Added dependency: {} blocked by {}", dependent_id, dependency_id);
        Ok(true)
    }

    /// Tasks with no blocking dependencies, highest priority first.
    ///
    /// Readiness is by presence of blockers, not their status: any entry in
    /// `blocked_by` excludes a task, even if the blocker is done. The sort
    /// is stable, so equal priorities keep store order.
    pub fn get_ready_tasks(&self) -> Result<Vec<Task>> {
        let mut ready = self.store.filter(|t| t.blocked_by.is_empty())?;
        ready.sort_by(|a, b| b.priority.cmp(&a.priority));
        Ok(ready)
    }

    /// All tasks in store order, optionally filtered by exact status.
    pub fn list_tasks(&self, status: Option<TaskStatus>) -> Result<Vec<Task>> {
        match status {
            Some(status) => self.store.filter(|t| t.status == status),
            None => self.store.list_all(),
        }
    }
}
