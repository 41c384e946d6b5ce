//! Starter task bundle used to seed an empty store so a first run has
//! something to show. Due dates are offsets from the time of seeding.

use chrono::{Duration, Utc};

use crate::model::{Priority, Task, TaskDraft, TaskStatus};

struct Seed {
    title: &'static str,
    description: &'static str,
    priority: Priority,
    status: TaskStatus,
    due_in_hours: i64,
    category: &'static str,
    tags: &'static [&'static str],
}

const SEEDS: &[Seed] = &[
    Seed {
        title: "Complete Project Proposal",
        description: "Finish the project proposal document for the new client. Include budget estimates, timeline, and deliverables.",
        priority: Priority::High,
        status: TaskStatus::InProgress,
        due_in_hours: 2 * 24,
        category: "work",
        tags: &["proposal", "client", "documentation"],
    },
    Seed {
        title: "Review Code Changes",
        description: "Review the pull request for the new authentication feature. Check for security issues and code quality.",
        priority: Priority::High,
        status: TaskStatus::Pending,
        due_in_hours: 24,
        category: "work",
        tags: &["code-review", "security", "authentication"],
    },
    Seed {
        title: "Buy Groceries",
        description: "Purchase groceries for the week. Don't forget milk, bread, vegetables, and protein.",
        priority: Priority::Medium,
        status: TaskStatus::Pending,
        due_in_hours: 3 * 24,
        category: "personal",
        tags: &["shopping", "groceries", "weekly"],
    },
    Seed {
        title: "Schedule Dentist Appointment",
        description: "Call the dentist office to schedule a routine checkup and cleaning.",
        priority: Priority::Low,
        status: TaskStatus::Pending,
        due_in_hours: 7 * 24,
        category: "health",
        tags: &["health", "appointment", "dental"],
    },
    Seed {
        title: "Update Portfolio Website",
        description: "Add recent projects to portfolio website and update the design to match current trends.",
        priority: Priority::Medium,
        status: TaskStatus::Completed,
        due_in_hours: -24,
        category: "work",
        tags: &["portfolio", "website", "design"],
    },
    Seed {
        title: "Finish Online Course",
        description: "Work through the remaining modules of the systems programming course and do the practice exercises.",
        priority: Priority::Medium,
        status: TaskStatus::InProgress,
        due_in_hours: 5 * 24,
        category: "education",
        tags: &["course", "learning", "programming"],
    },
    Seed {
        title: "Plan Weekend Trip",
        description: "Research and plan a weekend trip to the nearby mountains. Book accommodation and plan activities.",
        priority: Priority::Low,
        status: TaskStatus::Pending,
        due_in_hours: 10 * 24,
        category: "personal",
        tags: &["travel", "weekend", "planning"],
    },
    Seed {
        title: "Fix Bug in Login System",
        description: "Investigate and fix the authentication bug that's causing users to be logged out unexpectedly.",
        priority: Priority::High,
        status: TaskStatus::InProgress,
        due_in_hours: 24,
        category: "work",
        tags: &["bug-fix", "authentication", "urgent"],
    },
    Seed {
        title: "Read Programming Book",
        description: "Continue reading \"Clean Code\" by Robert C. Martin. Focus on chapters about function design and error handling.",
        priority: Priority::Low,
        status: TaskStatus::Pending,
        due_in_hours: 14 * 24,
        category: "education",
        tags: &["reading", "programming", "clean-code"],
    },
    Seed {
        title: "Organize Desk",
        description: "Clean and organize the workspace. Sort through papers, organize cables, and declutter the desk area.",
        priority: Priority::Low,
        status: TaskStatus::Completed,
        due_in_hours: -2 * 24,
        category: "personal",
        tags: &["organization", "cleaning", "workspace"],
    },
    Seed {
        title: "Prepare Team Meeting",
        description: "Prepare agenda and materials for the weekly team meeting. Include project updates and discussion topics.",
        priority: Priority::Medium,
        status: TaskStatus::Pending,
        due_in_hours: 24,
        category: "work",
        tags: &["meeting", "team", "agenda"],
    },
    Seed {
        title: "Exercise Routine",
        description: "Complete the daily exercise routine including cardio, strength training, and stretching exercises.",
        priority: Priority::Medium,
        status: TaskStatus::Pending,
        due_in_hours: 12,
        category: "health",
        tags: &["exercise", "health", "daily"],
    },
    Seed {
        title: "Backup Important Files",
        description: "Create backup copies of important project files and documents to external storage.",
        priority: Priority::High,
        status: TaskStatus::Pending,
        due_in_hours: 2 * 24,
        category: "work",
        tags: &["backup", "files", "security"],
    },
    Seed {
        title: "Call Mom",
        description: "Call mom to catch up and see how she's doing. Don't forget to ask about her recent trip.",
        priority: Priority::Medium,
        status: TaskStatus::Pending,
        due_in_hours: 3 * 24,
        category: "personal",
        tags: &["family", "call", "personal"],
    },
    Seed {
        title: "Update Resume",
        description: "Update resume with recent projects and achievements. Add new skills and certifications.",
        priority: Priority::Low,
        status: TaskStatus::Pending,
        due_in_hours: 7 * 24,
        category: "work",
        tags: &["resume", "career", "update"],
    },
];

pub fn sample_tasks() -> Vec<Task> {
    let now = Utc::now();
    SEEDS
        .iter()
        .map(|seed| {
            Task::create(TaskDraft {
                title: seed.title.to_string(),
                description: seed.description.to_string(),
                status: seed.status,
                priority: seed.priority,
                due_date: Some(now + Duration::hours(seed.due_in_hours)),
                category: seed.category.to_string(),
                assigned_to: "John Doe".to_string(),
                tags: seed.tags.iter().map(|tag| tag.to_string()).collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::task_stats;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn bundle_has_distinct_ids() {
        let tasks = sample_tasks();
        let ids: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), tasks.len());
        assert_eq!(tasks.len(), 15);
    }

    #[test]
    fn bundle_covers_every_active_status() {
        let tasks = sample_tasks();
        let stats = task_stats(&tasks);
        assert!(stats.pending > 0);
        assert!(stats.in_progress > 0);
        assert!(stats.completed > 0);
        assert!(stats.overdue > 0);
        assert!(stats.due_soon > 0);
    }

    #[test]
    fn every_seed_is_dated_and_assigned() {
        for task in sample_tasks() {
            assert!(task.due_date.is_some(), "{} has no due date", task.title);
            assert_eq!(task.assigned_to, "John Doe");
            assert!(!task.tags.is_empty());
        }
    }
}
