//! Pure multi-criterion filter over a task list. All active predicates are
//! ANDed; a task must satisfy every specified criterion.

use crate::model::{Task, TaskFilters};

pub fn filter_tasks(tasks: &[Task], filters: &TaskFilters) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| matches_filters(task, filters))
        .cloned()
        .collect()
}

fn matches_filters(task: &Task, filters: &TaskFilters) -> bool {
    if let Some(status) = filters.status {
        if task.status != status {
            return false;
        }
    }

    if let Some(priority) = filters.priority {
        if task.priority != priority {
            return false;
        }
    }

    if let Some(category) = filters.category.as_deref() {
        if category != "all" && task.category != category {
            return false;
        }
    }

    if let Some(search) = filters.search.as_deref() {
        if !search.is_empty() && !matches_search(task, search) {
            return false;
        }
    }

    // Tasks without a due date are not excluded by a bound on existing dates.
    if let Some(due_after) = filters.due_after {
        if let Some(due_date) = task.due_date {
            if due_date < due_after {
                return false;
            }
        }
    }

    true
}

fn matches_search(task: &Task, search: &str) -> bool {
    let needle = search.to_lowercase();
    task.title.to_lowercase().contains(&needle)
        || task.description.to_lowercase().contains(&needle)
        || task
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}
