//! Single-pass aggregation of a task list into status, priority, and
//! due-date-proximity counters.

use chrono::{DateTime, Duration, Utc};

use crate::model::{Priority, Task, TaskStats, TaskStatus};

pub const DUE_SOON_WINDOW_DAYS: i64 = 3;

pub fn is_overdue(due_date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match due_date {
        Some(due) => due < now,
        None => false,
    }
}

pub fn is_due_soon(due_date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match due_date {
        Some(due) => due > now && due < now + Duration::days(DUE_SOON_WINDOW_DAYS),
        None => false,
    }
}

pub fn task_stats(tasks: &[Task]) -> TaskStats {
    task_stats_at(tasks, Utc::now())
}

/// Aggregation with an injected clock so the temporal buckets are testable.
pub fn task_stats_at(tasks: &[Task], now: DateTime<Utc>) -> TaskStats {
    let mut stats = TaskStats {
        total: tasks.len(),
        ..TaskStats::default()
    };

    for task in tasks {
        match task.status {
            TaskStatus::Pending => stats.pending += 1,
            TaskStatus::InProgress => stats.in_progress += 1,
            TaskStatus::Completed => stats.completed += 1,
            TaskStatus::Cancelled => stats.cancelled += 1,
        }

        if matches!(task.priority, Priority::High | Priority::Urgent) {
            stats.high_priority += 1;
        }

        // Overdue takes precedence; a task lands in at most one bucket.
        if is_overdue(task.due_date, now) {
            stats.overdue += 1;
        } else if is_due_soon(task.due_date, now) {
            stats.due_soon += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskDraft;
    use pretty_assertions::assert_eq;

    fn task_due(now: DateTime<Utc>, offset_days: i64) -> Task {
        Task::create(TaskDraft {
            title: format!("due in {offset_days}"),
            due_date: Some(now + Duration::days(offset_days)),
            ..TaskDraft::default()
        })
    }

    #[test]
    fn overdue_and_due_soon_split() {
        let now = Utc::now();
        let stats = task_stats_at(&[task_due(now, 2), task_due(now, -10)], now);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.due_soon, 1);
        assert_eq!(stats.total, 2);
    }

    #[test]
    fn a_task_never_lands_in_both_buckets() {
        let now = Utc::now();
        let tasks = vec![task_due(now, -1), task_due(now, 1), task_due(now, 10)];
        let stats = task_stats_at(&tasks, now);
        assert_eq!(stats.overdue + stats.due_soon, 2); // the 10-day task is in neither
    }

    #[test]
    fn undated_tasks_skip_temporal_buckets() {
        let now = Utc::now();
        let undated = Task::create(TaskDraft {
            title: "no date".into(),
            ..TaskDraft::default()
        });
        let stats = task_stats_at(&[undated], now);
        assert_eq!(stats.overdue, 0);
        assert_eq!(stats.due_soon, 0);
        assert_eq!(stats.total, 1);
    }

    #[test]
    fn status_counts_conserve_total() {
        let now = Utc::now();
        let mut tasks = Vec::new();
        for status in [
            TaskStatus::Pending,
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::Completed,
            TaskStatus::Cancelled,
        ] {
            let mut t = Task::create(TaskDraft {
                title: status.to_string(),
                ..TaskDraft::default()
            });
            t.status = status;
            tasks.push(t);
        }

        let stats = task_stats_at(&tasks, now);
        assert_eq!(stats.total, tasks.len());
        assert_eq!(
            stats.pending + stats.in_progress + stats.completed + stats.cancelled,
            stats.total
        );
        assert_eq!(stats.pending, 2);
    }

    #[test]
    fn high_priority_counts_urgent_too() {
        let mut high = Task::create(TaskDraft {
            title: "high".into(),
            ..TaskDraft::default()
        });
        high.priority = Priority::High;
        let mut urgent = Task::create(TaskDraft {
            title: "urgent".into(),
            ..TaskDraft::default()
        });
        urgent.priority = Priority::Urgent;
        let medium = Task::create(TaskDraft {
            title: "medium".into(),
            ..TaskDraft::default()
        });

        let stats = task_stats(&[high, urgent, medium]);
        assert_eq!(stats.high_priority, 2);
    }

    #[test]
    fn due_soon_window_is_exclusive_at_both_ends() {
        let now = Utc::now();
        assert!(!is_due_soon(Some(now), now));
        assert!(!is_due_soon(Some(now + Duration::days(DUE_SOON_WINDOW_DAYS)), now));
        assert!(is_due_soon(Some(now + Duration::days(1)), now));
        assert!(is_overdue(Some(now - Duration::seconds(1)), now));
        assert!(!is_overdue(None, now));
    }
}
