use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use taskdeck_core::model::{Priority, SortDirection, SortField, TaskStatus};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "taskdeck",
    version,
    about = "A local-first task manager with filtering, sorting, and statistics.",
    after_help = "Examples:\n  taskdeck add \"Write release notes\" --priority high --due 2026-09-01\n  taskdeck list --status pending --sort due-date\n  taskdeck done 01J3Z8...\n  taskdeck stats"
)]
pub struct Cli {
    /// Override the data directory (defaults to platform-specific app dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Add a new task
    Add(AddArgs),
    /// List tasks, optionally filtered and sorted
    List(ListArgs),
    /// Update fields of an existing task
    Update(UpdateArgs),
    /// Mark one or more tasks completed
    Done(IdArgs),
    /// Delete one or more tasks by id
    Delete(IdArgs),
    /// Show aggregate counters for the whole task list
    Stats,
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Task title (3-100 characters)
    #[arg(value_name = "TITLE", required = true)]
    pub title: String,

    /// Optional longer description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Priority (defaults to medium)
    #[arg(long, short = 'p', value_enum)]
    pub priority: Option<Priority>,

    /// Initial status (defaults to pending)
    #[arg(long, value_enum)]
    pub status: Option<TaskStatus>,

    /// Due date (RFC 3339 or YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub due: Option<String>,

    /// Free-form category (e.g. work, personal)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Person the task is assigned to
    #[arg(long = "assigned-to")]
    pub assigned_to: Option<String>,

    /// Tags (comma-separated or repeated flag, at most 5)
    #[arg(long, value_delimiter = ',', action = ArgAction::Append)]
    pub tag: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Keep only tasks with this status
    #[arg(long, value_enum)]
    pub status: Option<TaskStatus>,

    /// Keep only tasks with this priority
    #[arg(long, value_enum)]
    pub priority: Option<Priority>,

    /// Keep only tasks in this category ("all" keeps everything)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Case-insensitive substring match on title, description, and tags
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Keep only tasks due after this date (undated tasks are kept)
    #[arg(long = "due-after", value_name = "DATE")]
    pub due_after: Option<String>,

    /// Sort field (defaults to created-at)
    #[arg(long, value_enum)]
    pub sort: Option<SortField>,

    /// Sort direction (defaults to desc)
    #[arg(long, value_enum)]
    pub direction: Option<SortDirection>,
}

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    /// Id of the task to update
    #[arg(value_name = "ID", required = true)]
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// New priority
    #[arg(long, short = 'p', value_enum)]
    pub priority: Option<Priority>,

    /// New status
    #[arg(long, value_enum)]
    pub status: Option<TaskStatus>,

    /// New due date (RFC 3339 or YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub due: Option<String>,

    /// New category
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// New assignee
    #[arg(long = "assigned-to")]
    pub assigned_to: Option<String>,

    /// Replace the tag list (comma-separated or repeated flag)
    #[arg(long, value_delimiter = ',', action = ArgAction::Append)]
    pub tag: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct IdArgs {
    /// One or more task ids
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,
}
