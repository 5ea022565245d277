//! Integration tests for task CRUD and hierarchy.

mod common;

use common::TestEnv;
use powertools::{TaskPatch, TaskPriority, TaskStatus, TaskType};

// =============================================================================
// Creation
// =============================================================================

#[test]
fn test_create_task_defaults() {
    let env = TestEnv::new();

    let task = env.create_task("Test task");

    assert!(task.id.starts_with("pt-"));
    assert_eq!(task.title, "Test task");
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.priority, TaskPriority::Medium);
    assert_eq!(task.task_type, TaskType::Task);
}

#[test]
fn test_create_task_with_priority() {
    let env = TestEnv::new();

    let task = env.create_task_with_priority("Critical task", TaskPriority::Critical);
    assert_eq!(task.priority, TaskPriority::Critical);
}

#[test]
fn test_created_ids_are_unique() {
    let env = TestEnv::new();

    let mut ids: Vec<String> = (0..20)
        .map(|i| env.create_task(&format!("Task {}", i)).id)
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}

// =============================================================================
// Retrieval
// =============================================================================

#[test]
fn test_get_task_roundtrip() {
    let env = TestEnv::new();

    let created = env.create_task("Test task");
    let retrieved = env.manager.get(&created.id).unwrap().unwrap();

    assert_eq!(retrieved, created);
}

#[test]
fn test_get_nonexistent_task() {
    let env = TestEnv::new();
    assert!(env.manager.get("pt-nonexistent").unwrap().is_none());
}

// =============================================================================
// Update
// =============================================================================

#[test]
fn test_update_task_status() {
    let env = TestEnv::new();

    let task = env.create_task("Test task");
    let updated = env.set_status(&task, TaskStatus::InProgress);

    assert_eq!(updated.status, TaskStatus::InProgress);
    let reloaded = env.manager.get(&task.id).unwrap().unwrap();
    assert_eq!(reloaded.status, TaskStatus::InProgress);
}

#[test]
fn test_update_task_title_keeps_other_fields() {
    let env = TestEnv::new();

    let task = env.create_task_with_priority("Original title", TaskPriority::High);
    let patch = TaskPatch {
        title: Some("New title".to_string()),
        ..Default::default()
    };
    let updated = env.manager.update(&task.id, patch).unwrap().unwrap();

    assert_eq!(updated.title, "New title");
    assert_eq!(updated.priority, TaskPriority::High);
    assert_eq!(updated.status, TaskStatus::Pending);
}

#[test]
fn test_status_is_unguarded() {
    let env = TestEnv::new();

    // No transition checks: done can go straight back to pending
    let task = env.create_task("Test task");
    env.set_status(&task, TaskStatus::Done);
    let reopened = env.set_status(&task, TaskStatus::Pending);

    assert_eq!(reopened.status, TaskStatus::Pending);
}

#[test]
fn test_update_refreshes_updated_at() {
    let env = TestEnv::new();

    let task = env.create_task("Test task");
    let updated = env.set_status(&task, TaskStatus::Done);

    assert!(updated.updated_at >= task.updated_at);
    assert_eq!(updated.created_at, task.created_at);
}

// =============================================================================
// Delete
// =============================================================================

#[test]
fn test_delete_task() {
    let env = TestEnv::new();

    let task = env.create_task("Task to delete");
    assert!(env.manager.delete(&task.id).unwrap());
    assert!(env.manager.get(&task.id).unwrap().is_none());
    assert_eq!(env.total_count(), 0);
}

#[test]
fn test_delete_nonexistent_task() {
    let env = TestEnv::new();

    env.create_task("Keeper");
    assert!(!env.manager.delete("pt-nonexistent").unwrap());
    assert_eq!(env.total_count(), 1);
}

#[test]
fn test_delete_does_not_cascade_to_subtasks() {
    let env = TestEnv::new();

    let parent = env.create_task("Parent");
    let child = env.create_subtask("Child", &parent);

    assert!(env.manager.delete(&parent.id).unwrap());

    // The subtask survives with a dangling parent reference
    let child = env.manager.get(&child.id).unwrap().unwrap();
    assert_eq!(child.parent, Some(parent.id));
}

// =============================================================================
// Listing
// =============================================================================

#[test]
fn test_list_tasks_filter_by_status() {
    let env = TestEnv::new();

    let task1 = env.create_task("Task 1");
    let task2 = env.create_task("Task 2");
    env.set_status(&task2, TaskStatus::Done);

    let pending = env.manager.list_tasks(Some(TaskStatus::Pending)).unwrap();
    let done = env.manager.list_tasks(Some(TaskStatus::Done)).unwrap();

    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, task1.id);
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].id, task2.id);
}

#[test]
fn test_list_tasks_preserves_store_order() {
    let env = TestEnv::new();

    let a = env.create_task("A");
    let b = env.create_task("B");
    let c = env.create_task("C");

    let ids: Vec<String> = env
        .manager
        .list_tasks(None)
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec![a.id, b.id, c.id]);
}

// =============================================================================
// Hierarchy
// =============================================================================

#[test]
fn test_hierarchical_task_ids() {
    let env = TestEnv::new();

    let parent = env.create_task("Parent");
    let child = env.create_subtask("Child", &parent);

    assert!(child.id.starts_with(&format!("{}.", parent.id)));
    assert_eq!(child.parent, Some(parent.id));
    assert_eq!(child.task_type, TaskType::Subtask);
}

#[test]
fn test_sibling_ids_increment() {
    let env = TestEnv::new();

    let parent = env.create_task("Parent");
    let first = env.create_subtask("First", &parent);
    let second = env.create_subtask("Second", &parent);

    assert_eq!(first.id, format!("{}.1", parent.id));
    assert_eq!(second.id, format!("{}.2", parent.id));
}

#[test]
fn test_nested_subtask_ids() {
    let env = TestEnv::new();

    let parent = env.create_task("Parent");
    let child = env.create_subtask("Child", &parent);
    let grandchild = env.create_subtask("Grandchild", &child);

    assert_eq!(grandchild.id, format!("{}.1", child.id));
    assert!(grandchild.id.starts_with(&format!("{}.", parent.id)));
}
