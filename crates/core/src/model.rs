use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
        }
    }

    /// Ordering used by the sort engine: pending sorts first, cancelled last.
    pub fn rank(&self) -> u8 {
        match self {
            TaskStatus::Pending => 1,
            TaskStatus::InProgress => 2,
            TaskStatus::Completed => 3,
            TaskStatus::Cancelled => 4,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in-progress" | "in_progress" | "inprogress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            "cancelled" | "canceled" => Ok(TaskStatus::Cancelled),
            other => Err(anyhow!(
                "Unknown status '{}': expected pending|in-progress|completed|cancelled",
                other
            )),
        }
    }
}

impl clap::ValueEnum for TaskStatus {
    fn value_variants<'a>() -> &'a [Self] {
        const VARIANTS: [TaskStatus; 4] = [
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::Completed,
            TaskStatus::Cancelled,
        ];
        &VARIANTS
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    /// Ordering used by the sort engine: urgent outranks high outranks medium outranks low.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Urgent => 4,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" | "med" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(anyhow!(
                "Unknown priority '{}': expected low|medium|high|urgent",
                other
            )),
        }
    }
}

impl clap::ValueEnum for Priority {
    fn value_variants<'a>() -> &'a [Self] {
        const VARIANTS: [Priority; 4] = [
            Priority::Low,
            Priority::Medium,
            Priority::High,
            Priority::Urgent,
        ];
        &VARIANTS
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[clap(rename_all = "kebab-case")]
pub enum SortField {
    CreatedAt,
    DueDate,
    Priority,
    Status,
    Title,
}

impl FromStr for SortField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "created" | "created-at" | "created_at" | "createdat" => Ok(SortField::CreatedAt),
            "due" | "due-date" | "due_date" | "duedate" => Ok(SortField::DueDate),
            "priority" => Ok(SortField::Priority),
            "status" => Ok(SortField::Status),
            "title" => Ok(SortField::Title),
            other => Err(anyhow!(
                "Unknown sort field '{}': expected created-at|due-date|priority|status|title",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[clap(rename_all = "kebab-case")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

/// Multi-criterion predicate for the filter engine. Unset fields do not
/// filter; a category of `"all"` is treated the same as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilters {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub due_after: Option<DateTime<Utc>>,
}

/// The sole domain entity. Serialized with camelCase keys so the `tasks`
/// storage slot matches the wire shape of the REST backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Build a task from a draft: defaults overlaid with caller fields, a
    /// fresh id, and both timestamps set to now.
    pub fn create(draft: TaskDraft) -> Task {
        let now = Utc::now();
        Task {
            id: generate_id(),
            title: draft.title,
            description: draft.description,
            status: draft.status,
            priority: draft.priority,
            due_date: draft.due_date,
            category: draft.category,
            assigned_to: draft.assigned_to,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Shallow-merge a patch over this task, bumping `updated_at`. Returns a
    /// new value; `id` and `created_at` are never touched.
    pub fn apply(&self, patch: &TaskPatch) -> Task {
        let mut updated = self.clone();
        if let Some(title) = &patch.title {
            updated.title = title.clone();
        }
        if let Some(description) = &patch.description {
            updated.description = description.clone();
        }
        if let Some(status) = patch.status {
            updated.status = status;
        }
        if let Some(priority) = patch.priority {
            updated.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            updated.due_date = Some(due_date);
        }
        if let Some(category) = &patch.category {
            updated.category = category.clone();
        }
        if let Some(assigned_to) = &patch.assigned_to {
            updated.assigned_to = assigned_to.clone();
        }
        if let Some(tags) = &patch.tags {
            updated.tags = tags.clone();
        }
        updated.updated_at = Utc::now();
        updated
    }
}

/// Caller-supplied creation fields over the default task template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub category: String,
    pub assigned_to: String,
    pub tags: Vec<String>,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: TaskStatus::Pending,
            priority: Priority::Medium,
            due_date: None,
            category: String::new(),
            assigned_to: String::new(),
            tags: Vec::new(),
        }
    }
}

/// Per-field patch applied through [`Task::apply`]. A set due date replaces
/// the existing one; patches cannot clear a due date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub assigned_to: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Aggregate counters recomputed after every mutation, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub overdue: usize,
    pub due_soon: usize,
    pub high_priority: usize,
}

/// Short, URL-safe, time-ordered identifier. Collisions are accepted as
/// negligible for a local-first store.
pub fn generate_id() -> String {
    Ulid::new().to_string()
}
