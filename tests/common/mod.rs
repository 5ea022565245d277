//! Shared test infrastructure for powertools integration tests.
//!
//! Provides TestEnv helper for consistent test setup/teardown.

#![allow(dead_code)]

use powertools::{Task, TaskManager, TaskPatch, TaskPriority, TaskStatus, TaskType};
use tempfile::TempDir;

/// Test environment with automatic cleanup.
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub manager: TaskManager,
}

impl TestEnv {
    /// Create a new test environment with a manager over a fresh directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let manager = TaskManager::new(&temp_dir.path().join(".powertools"));
        Self { temp_dir, manager }
    }

    /// Create a task with default priority and type.
    pub fn create_task(&self, title: &str) -> Task {
        self.manager
            .create(title, TaskPriority::Medium, TaskType::Task, None)
            .expect("Failed to create task")
    }

    /// Create a task with specified priority.
    pub fn create_task_with_priority(&self, title: &str, priority: TaskPriority) -> Task {
        self.manager
            .create(title, priority, TaskType::Task, None)
            .expect("Failed to create task")
    }

    /// Create a subtask under the given parent.
    pub fn create_subtask(&self, title: &str, parent: &Task) -> Task {
        self.manager
            .create(title, TaskPriority::Medium, TaskType::Subtask, Some(&parent.id))
            .expect("Failed to create subtask")
    }

    /// Add a blocking dependency (dependent is blocked by dependency).
    pub fn add_dependency(&self, dependent: &Task, dependency: &Task) {
        assert!(
            self.manager
                .add_dependency(&dependent.id, &dependency.id)
                .expect("Failed to add dependency")
        );
    }

    /// Set a task's status.
    pub fn set_status(&self, task: &Task, status: TaskStatus) -> Task {
        let patch = TaskPatch {
            status: Some(status),
            ..Default::default()
        };
        self.manager
            .update(&task.id, patch)
            .expect("Failed to update task")
            .expect("Task disappeared")
    }

    /// Assert that a task is in the ready list.
    pub fn assert_ready(&self, task: &Task) {
        let ready = self.manager.get_ready_tasks().expect("Failed to get ready tasks");
        assert!(
            ready.iter().any(|t| t.id == task.id),
            "Expected task {} to be ready, but it wasn't. Ready tasks: {:?}",
            task.id,
            ready.iter().map(|t| &t.id).collect::<Vec<_>>()
        );
    }

    /// Assert that a task is NOT in the ready list.
    pub fn assert_not_ready(&self, task: &Task) {
        let ready = self.manager.get_ready_tasks().expect("Failed to get ready tasks");
        assert!(
            !ready.iter().any(|t| t.id == task.id),
            "Expected task {} to NOT be ready, but it was",
            task.id
        );
    }

    /// Get ready task count.
    pub fn ready_count(&self) -> usize {
        self.manager.get_ready_tasks().expect("Failed to get ready tasks").len()
    }

    /// Get all task count.
    pub fn total_count(&self) -> usize {
        self.manager.list_tasks(None).expect("Failed to list tasks").len()
    }

    /// Get tasks by status.
    pub fn count_by_status(&self, status: TaskStatus) -> usize {
        self.manager
            .list_tasks(Some(status))
            .expect("Failed to list tasks")
            .len()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
