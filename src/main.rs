//! Powertools CLI - local task tracking for agentic workflows.

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use powertools::{TaskManager, TaskPatch, TaskPriority, TaskStatus, TaskType};
use std::fs;
use std::path::PathBuf;

mod cli;

use cli::{Cli, Command};

/// Directory under the project root holding all persisted state.
const PROJECT_DIR: &str = ".powertools";

fn setup_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("powertools")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("pt.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn get_project_dir(cli: &Cli) -> PathBuf {
    cli.dir
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
        .join(PROJECT_DIR)
}

fn parse_priority(s: &str) -> Result<TaskPriority> {
    match s {
        "low" => Ok(TaskPriority::Low),
        "medium" => Ok(TaskPriority::Medium),
        "high" => Ok(TaskPriority::High),
        "critical" => Ok(TaskPriority::Critical),
        _ => eyre::bail!("unknown priority '{}': expected low, medium, high, or critical", s),
    }
}

fn parse_type(s: &str) -> Result<TaskType> {
    match s {
        "task" => Ok(TaskType::Task),
        "subtask" => Ok(TaskType::Subtask),
        _ => eyre::bail!("unknown type '{}': expected task or subtask", s),
    }
}

fn parse_status(s: &str) -> Result<TaskStatus> {
    match s {
        "pending" => Ok(TaskStatus::Pending),
        "in_progress" => Ok(TaskStatus::InProgress),
        "done" => Ok(TaskStatus::Done),
        _ => eyre::bail!("unknown status '{}': expected pending, in_progress, or done", s),
    }
}

fn format_status(status: &TaskStatus) -> ColoredString {
    match status {
        TaskStatus::Pending => "pending".yellow(),
        TaskStatus::InProgress => "in_progress".blue(),
        TaskStatus::Done => "done".green(),
    }
}

fn format_priority(priority: &TaskPriority) -> ColoredString {
    match priority {
        TaskPriority::Low => "low".dimmed(),
        TaskPriority::Medium => "medium".normal(),
        TaskPriority::High => "high".yellow(),
        TaskPriority::Critical => "critical".red(),
    }
}

fn run(cli: Cli) -> Result<()> {
    let manager = TaskManager::new(&get_project_dir(&cli));

    match cli.command {
        Command::Create { title, priority, task_type, parent } => {
            let priority = parse_priority(&priority)?;
            let task_type = match task_type.as_deref() {
                Some(s) => parse_type(s)?,
                None if parent.is_some() => TaskType::Subtask,
                None => TaskType::Task,
            };

            let task = manager
                .create(&title, priority, task_type, parent.as_deref())
                .context("Failed to create task")?;

            println!("{} Created: {} {}", "✓".green(), task.id.cyan(), task.title);
        }

        Command::List { status } => {
            let status_filter = match status.as_deref() {
                Some(s) => Some(parse_status(s)?),
                None => None,
            };

            let tasks = manager.list_tasks(status_filter).context("Failed to list tasks")?;

            if tasks.is_empty() {
                println!("{}", "No tasks found".dimmed());
            } else {
                for task in tasks {
                    println!(
                        "{} {} {} {}",
                        format_status(&task.status),
                        task.id.cyan(),
                        format_priority(&task.priority),
                        task.title
                    );
                }
            }
        }

        Command::Ready => {
            let tasks = manager.get_ready_tasks().context("Failed to get ready tasks")?;

            if tasks.is_empty() {
                println!("{}", "No ready tasks".dimmed());
            } else {
                println!("{} {} task(s) ready to work on:", "→".blue(), tasks.len());
                for task in tasks {
                    println!(
                        "  {} {} {}",
                        task.id.cyan(),
                        format_priority(&task.priority),
                        task.title
                    );
                }
            }
        }

        Command::Get { id } => {
            let task = manager.get(&id).context("Failed to get task")?;

            match task {
                Some(task) => {
                    println!("{}: {}", "ID".bold(), task.id.cyan());
                    println!("{}: {}", "Title".bold(), task.title);
                    println!("{}: {}", "Status".bold(), format_status(&task.status));
                    println!("{}: {}", "Priority".bold(), format_priority(&task.priority));
                    if let Some(parent) = &task.parent {
                        println!("{}: {}", "Parent".bold(), parent.cyan());
                    }
                    if !task.blocked_by.is_empty() {
                        println!("{}: {}", "Blocked by".bold(), task.blocked_by.join(", "));
                    }
                    if !task.blocks.is_empty() {
                        println!("{}: {}", "Blocks".bold(), task.blocks.join(", "));
                    }
                    println!("{}: {}", "Created".bold(), task.created_at);
                    println!("{}: {}", "Updated".bold(), task.updated_at);
                }
                None => {
                    eprintln!("{} Task not found: {}", "✗".red(), id);
                    std::process::exit(1);
                }
            }
        }

        Command::Start { id } => {
            let patch = TaskPatch {
                status: Some(TaskStatus::InProgress),
                ..Default::default()
            };
            match manager.update(&id, patch).context("Failed to start task")? {
                Some(task) => println!("{} Started: {} {}", "→".blue(), task.id.cyan(), task.title),
                None => {
                    eprintln!("{} Task not found: {}", "✗".red(), id);
                    std::process::exit(1);
                }
            }
        }

        Command::Done { id } => {
            let patch = TaskPatch {
                status: Some(TaskStatus::Done),
                ..Default::default()
            };
            match manager.update(&id, patch).context("Failed to finish task")? {
                Some(task) => println!("{} Done: {} {}", "✓".green(), task.id.cyan(), task.title),
                None => {
                    eprintln!("{} Task not found: {}", "✗".red(), id);
                    std::process::exit(1);
                }
            }
        }

        Command::Update { id, title, priority, status } => {
            let patch = TaskPatch {
                title,
                priority: priority.as_deref().map(parse_priority).transpose()?,
                status: status.as_deref().map(parse_status).transpose()?,
            };
            match manager.update(&id, patch).context("Failed to update task")? {
                Some(task) => println!("{} Updated: {} {}", "✓".green(), task.id.cyan(), task.title),
                None => {
                    eprintln!("{} Task not found: {}", "✗".red(), id);
                    std::process::exit(1);
                }
            }
        }

        Command::Delete { id } => {
            if manager.delete(&id).context("Failed to delete task")? {
                println!("{} Deleted: {}", "✓".green(), id.cyan());
            } else {
                eprintln!("{} Task not found: {}", "✗".red(), id);
                std::process::exit(1);
            }
        }

        Command::Block { blocked_id, blocker_id } => {
            if manager
                .add_dependency(&blocked_id, &blocker_id)
                .context("Failed to add dependency")?
            {
                println!(
                    "{} {} is now blocked by {}",
                    "✓".green(),
                    blocked_id.cyan(),
                    blocker_id.cyan()
                );
            } else {
                eprintln!("{} Task not found or invalid dependency", "✗".red());
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    info!("Command: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
