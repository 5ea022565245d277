//! Powertools: local task tracking over a line-oriented record store.
//!
//! Powertools persists structured records one JSON object per line in a
//! single file, and layers a task manager on top with hierarchical ids,
//! dependency edges, and readiness ordering. It is designed for agentic
//! workflows that need durable, human-inspectable state without a database
//! server.
//!
//! # Example
//!
//! ```no_run
//! use powertools::{TaskManager, TaskPatch, TaskPriority, TaskStatus, TaskType};
//! use std::path::Path;
//!
//! let manager = TaskManager::new(Path::new(".powertools"));
//!
//! // Create tasks
//! let login = manager.create("Implement login", TaskPriority::High, TaskType::Task, None).unwrap();
//! let tests = manager.create("Write tests", TaskPriority::Medium, TaskType::Task, None).unwrap();
//!
//! // Tests can't start until login is done
//! manager.add_dependency(&tests.id, &login.id).unwrap();
//!
//! // Query ready work
//! let ready = manager.get_ready_tasks().unwrap();
//! assert_eq!(ready.len(), 1);
//! assert_eq!(ready[0].id, login.id);
//!
//! // Finish a task
//! let patch = TaskPatch { status: Some(TaskStatus::Done), ..Default::default() };
//! manager.update(&login.id, patch).unwrap();
//! ```

mod id;
mod manager;
mod record;
mod store;
mod task;

// Re-export public API
pub use manager::{TaskError, TaskManager, TaskPatch};
pub use record::Record;
pub use store::{JsonlStore, RecordIter};
pub use task::{Task, TaskPriority, TaskStatus, TaskType, ValidationError};
