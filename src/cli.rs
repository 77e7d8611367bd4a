//! CLI argument parsing for tasks.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tasks::Status;

#[derive(Parser)]
#[command(
    name = "tasks",
    about = "CLI task management tool for slaying your to do list",
    version = env!("GIT_DESCRIBE"),
    after_help = "Logs are written to: ~/.local/share/tasks/logs/tasks.log"
)]
pub struct Cli {
    /// Data directory holding tasks.db (default: platform data dir)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a new task with an optional project name
    Add {
        /// Task name
        name: String,

        /// Project for the task
        #[arg(short, long, default_value = "")]
        project: String,
    },

    /// List your tasks
    List {
        /// Only tasks with this status (todo, in progress, done or 0-2)
        #[arg(short, long)]
        status: Option<Status>,

        /// Only tasks whose project contains this text
        #[arg(short, long)]
        project: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show a single task
    Get {
        /// Task ID
        id: u64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Update a task; only the given fields change
    Update {
        /// Task ID
        id: u64,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New project ("" clears it)
        #[arg(short, long)]
        project: Option<String>,

        /// New status (todo, in progress, done or 0-2)
        #[arg(short, long)]
        status: Option<Status>,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: u64,
    },
}
