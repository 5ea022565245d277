//! CLI argument parsing for powertools.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pt",
    about = "Local task tracking for agentic workflows",
    version,
    after_help = "Logs are written to: ~/.local/share/powertools/logs/pt.log"
)]
pub struct Cli {
    /// Project root holding the .powertools directory (default: current directory)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new task
    Create {
        /// Task title
        title: String,

        /// Priority (low, medium, high, critical)
        #[arg(short, long, default_value = "medium")]
        priority: String,

        /// Task type (task, subtask); defaults to subtask when --parent is given
        #[arg(short = 't', long = "type")]
        task_type: Option<String>,

        /// Parent task id (creates a subtask)
        #[arg(short = 'P', long)]
        parent: Option<String>,
    },

    /// List tasks
    List {
        /// Filter by status (pending, in_progress, done)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Show tasks that are ready to work on
    Ready,

    /// Get a task by ID
    Get {
        /// Task ID
        id: String,
    },

    /// Start working on a task (set status to in_progress)
    Start {
        /// Task ID
        id: String,
    },

    /// Mark a task as done
    Done {
        /// Task ID
        id: String,
    },

    /// Update a task's fields
    Update {
        /// Task ID
        id: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New priority (low, medium, high, critical)
        #[arg(short, long)]
        priority: Option<String>,

        /// New status (pending, in_progress, done)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },

    /// Add a blocking dependency
    Block {
        /// Task that is blocked
        blocked_id: String,

        /// Task that is blocking (must be completed first)
        blocker_id: String,
    },
}
