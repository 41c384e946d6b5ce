//! Pure ordering of task lists. Returns a new vector and relies on the
//! stability of `slice::sort_by`, so ties keep their relative order.

use std::cmp::Ordering;

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;

use crate::model::{SortConfig, SortDirection, SortField, Task};

/// Tasks without a due date compare as if dated 9999-12-31, so they always
/// land last in ascending order.
static NO_DUE_DATE: Lazy<DateTime<Utc>> = Lazy::new(|| {
    Utc.with_ymd_and_hms(9999, 12, 31, 0, 0, 0)
        .single()
        .expect("sentinel timestamp is valid")
});

pub fn sort_tasks(tasks: &[Task], field: SortField, direction: SortDirection) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare(a, b, field);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    sorted
}

pub fn sort_tasks_with(tasks: &[Task], config: SortConfig) -> Vec<Task> {
    sort_tasks(tasks, config.field, config.direction)
}

fn compare(a: &Task, b: &Task, field: SortField) -> Ordering {
    match field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::DueDate => a
            .due_date
            .unwrap_or(*NO_DUE_DATE)
            .cmp(&b.due_date.unwrap_or(*NO_DUE_DATE)),
        SortField::Priority => a.priority.rank().cmp(&b.priority.rank()),
        SortField::Status => a.status.rank().cmp(&b.status.rank()),
        SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
    }
}
