//! Pure field validation for task drafts. Violations are reported per field
//! and never reach the store's error state; forms render them inline.

use chrono::{DateTime, Utc};

use crate::model::TaskDraft;

pub const TITLE_MIN_LEN: usize = 3;
pub const TITLE_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 500;
pub const MAX_TAGS: usize = 5;
pub const TAG_MAX_LEN: usize = 20;

/// One optional message per checked field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub tags: Option<String>,
}

impl ValidationErrors {
    pub fn is_valid(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.tags.is_none()
    }

    /// All messages, for callers that want a flat summary (e.g. the CLI).
    pub fn messages(&self) -> Vec<&str> {
        [&self.title, &self.description, &self.due_date, &self.tags]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .collect()
    }
}

pub fn validate(draft: &TaskDraft) -> ValidationErrors {
    validate_at(draft, Utc::now())
}

/// Validation with an injected clock so the past-due-date rule is testable.
pub fn validate_at(draft: &TaskDraft, now: DateTime<Utc>) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    let title_len = draft.title.trim().chars().count();
    if title_len < TITLE_MIN_LEN {
        errors.title = Some(format!(
            "Title must be at least {TITLE_MIN_LEN} characters long"
        ));
    } else if draft.title.chars().count() > TITLE_MAX_LEN {
        errors.title = Some(format!("Title must be less than {TITLE_MAX_LEN} characters"));
    }

    if draft.description.chars().count() > DESCRIPTION_MAX_LEN {
        errors.description = Some(format!(
            "Description must be less than {DESCRIPTION_MAX_LEN} characters"
        ));
    }

    if let Some(due_date) = draft.due_date {
        if due_date < now {
            errors.due_date = Some("Due date cannot be in the past".to_string());
        }
    }

    if draft.tags.len() > MAX_TAGS {
        errors.tags = Some(format!("Maximum {MAX_TAGS} tags allowed"));
    } else if draft
        .tags
        .iter()
        .any(|tag| tag.chars().count() > TAG_MAX_LEN)
    {
        errors.tags = Some(format!("Tags must be at most {TAG_MAX_LEN} characters"));
    }

    errors
}
