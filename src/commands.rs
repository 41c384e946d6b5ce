use std::io::Write;

use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, Utc};

use taskdeck_core::config::AppConfig;
use taskdeck_core::model::{
    Priority, SortConfig, Task, TaskDraft, TaskFilters, TaskPatch, TaskStats, TaskStatus,
};
use taskdeck_core::store::TaskStore;
use taskdeck_core::validate::validate;

use crate::cli::{AddArgs, CliCommand, IdArgs, ListArgs, UpdateArgs};

pub fn execute<W: Write>(config: &AppConfig, command: CliCommand, mut writer: W) -> Result<()> {
    let mut store = TaskStore::open(config)?;
    store.bootstrap()?;

    match command {
        CliCommand::Add(args) => handle_add(&mut store, &args, &mut writer),
        CliCommand::List(args) => handle_list(&mut store, &args, &mut writer),
        CliCommand::Update(args) => handle_update(&mut store, &args, &mut writer),
        CliCommand::Done(args) => handle_done(&mut store, &args, &mut writer),
        CliCommand::Delete(args) => handle_delete(&mut store, &args, &mut writer),
        CliCommand::Stats => handle_stats(store.state().stats.clone(), &mut writer),
    }
}

fn handle_add<W: Write>(store: &mut TaskStore, args: &AddArgs, mut writer: W) -> Result<()> {
    let draft = TaskDraft {
        title: args.title.clone(),
        description: args.description.clone().unwrap_or_default(),
        status: args.status.unwrap_or(TaskStatus::Pending),
        priority: args.priority.unwrap_or(Priority::Medium),
        due_date: args.due.as_deref().map(parse_date).transpose()?,
        category: args.category.clone().unwrap_or_default(),
        assigned_to: args.assigned_to.clone().unwrap_or_default(),
        tags: args.tag.clone(),
    };

    let errors = validate(&draft);
    if !errors.is_valid() {
        return Err(anyhow!("Invalid task: {}", errors.messages().join("; ")));
    }

    let task = store.create_task(draft)?;
    writeln!(writer, "Added task {}: {}", task.id, task.title)?;
    Ok(())
}

fn handle_list<W: Write>(store: &mut TaskStore, args: &ListArgs, mut writer: W) -> Result<()> {
    store.set_filters(TaskFilters {
        status: args.status,
        priority: args.priority,
        category: args.category.clone(),
        search: args.search.clone(),
        due_after: args.due_after.as_deref().map(parse_date).transpose()?,
    });

    let mut sort = SortConfig::default();
    if let Some(field) = args.sort {
        sort.field = field;
    }
    if let Some(direction) = args.direction {
        sort.direction = direction;
    }
    store.set_sort(sort);

    let tasks = &store.state().filtered_tasks;
    if tasks.is_empty() {
        writeln!(writer, "No tasks match")?;
        return Ok(());
    }
    for task in tasks {
        writeln!(writer, "{}", TaskLine(task))?;
    }
    writeln!(
        writer,
        "{} of {} task{}",
        tasks.len(),
        store.state().tasks.len(),
        if store.state().tasks.len() == 1 { "" } else { "s" }
    )?;
    Ok(())
}

fn handle_update<W: Write>(store: &mut TaskStore, args: &UpdateArgs, mut writer: W) -> Result<()> {
    let patch = TaskPatch {
        title: args.title.clone(),
        description: args.description.clone(),
        status: args.status,
        priority: args.priority,
        due_date: args.due.as_deref().map(parse_date).transpose()?,
        category: args.category.clone(),
        assigned_to: args.assigned_to.clone(),
        tags: if args.tag.is_empty() {
            None
        } else {
            Some(args.tag.clone())
        },
    };

    let updated = store.update_task(&args.id, patch)?;
    writeln!(writer, "Updated task {}: {}", updated.id, updated.title)?;
    Ok(())
}

fn handle_done<W: Write>(store: &mut TaskStore, args: &IdArgs, mut writer: W) -> Result<()> {
    let completed = store.complete_tasks(args.ids.clone())?;
    writeln!(
        writer,
        "Completed {} task{}",
        completed.len(),
        if completed.len() == 1 { "" } else { "s" }
    )?;
    report_missing(&args.ids, |id| completed.iter().any(|t| t.id == *id), writer)
}

fn handle_delete<W: Write>(store: &mut TaskStore, args: &IdArgs, mut writer: W) -> Result<()> {
    let known: Vec<String> = store
        .state()
        .tasks
        .iter()
        .filter(|task| args.ids.contains(&task.id))
        .map(|task| task.id.clone())
        .collect();

    store.bulk_delete(args.ids.clone())?;
    if known.is_empty() {
        writeln!(writer, "No tasks deleted")?;
    } else {
        writeln!(
            writer,
            "Deleted {} task{}",
            known.len(),
            if known.len() == 1 { "" } else { "s" }
        )?;
    }
    report_missing(&args.ids, |id| known.contains(id), writer)
}

fn handle_stats<W: Write>(stats: TaskStats, mut writer: W) -> Result<()> {
    writeln!(writer, "Total:         {}", stats.total)?;
    writeln!(writer, "Pending:       {}", stats.pending)?;
    writeln!(writer, "In progress:   {}", stats.in_progress)?;
    writeln!(writer, "Completed:     {}", stats.completed)?;
    writeln!(writer, "Cancelled:     {}", stats.cancelled)?;
    writeln!(writer, "Overdue:       {}", stats.overdue)?;
    writeln!(writer, "Due soon:      {}", stats.due_soon)?;
    writeln!(writer, "High priority: {}", stats.high_priority)?;
    Ok(())
}

fn report_missing<W: Write>(
    ids: &[String],
    matched: impl Fn(&String) -> bool,
    mut writer: W,
) -> Result<()> {
    let missing: Vec<&str> = ids
        .iter()
        .filter(|id| !matched(id))
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        writeln!(writer, "Not found: {}", missing.join(", "))?;
    }
    Ok(())
}

struct TaskLine<'a>(&'a Task);

impl std::fmt::Display for TaskLine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let task = self.0;
        write!(
            f,
            "{}  {:<11} {:<6} {}",
            task.id, task.status, task.priority, task.title
        )?;
        if let Some(due) = task.due_date {
            write!(f, "  (due {})", due.format("%Y-%m-%d"))?;
        }
        Ok(())
    }
}

/// Accepts an RFC 3339 timestamp or a bare date (midnight UTC).
fn parse_date(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid date '{}': expected RFC 3339 or YYYY-MM-DD", input))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("Invalid date '{}'", input))?;
    Ok(DateTime::from_naive_utc_and_offset(midnight, Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn temp_config() -> (AppConfig, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");
        (config, dir)
    }

    /// Put one known task in the store so the later bootstrap does not seed
    /// the sample bundle.
    fn seed_task(config: &AppConfig, title: &str) -> String {
        let mut store = TaskStore::open(config).expect("open store");
        store
            .create_task(TaskDraft {
                title: title.into(),
                ..TaskDraft::default()
            })
            .expect("create task")
            .id
    }

    fn run(config: &AppConfig, command: CliCommand) -> String {
        let mut output = Vec::new();
        execute(config, command, &mut output).expect("execute command");
        String::from_utf8(output).expect("utf8")
    }

    #[test]
    fn add_command_reports_new_task() {
        let (config, _dir) = temp_config();
        seed_task(&config, "Already here");

        let output = run(
            &config,
            CliCommand::Add(AddArgs {
                title: "Water the plants".into(),
                description: None,
                priority: None,
                status: None,
                due: None,
                category: Some("personal".into()),
                assigned_to: None,
                tag: vec!["chores".into()],
            }),
        );
        assert!(output.contains("Added task"));
        assert!(output.contains("Water the plants"));
    }

    #[test]
    fn add_command_rejects_invalid_draft() {
        let (config, _dir) = temp_config();
        seed_task(&config, "Already here");

        let mut output = Vec::new();
        let err = execute(
            &config,
            CliCommand::Add(AddArgs {
                title: "ab".into(),
                description: None,
                priority: None,
                status: None,
                due: None,
                category: None,
                assigned_to: None,
                tag: vec![],
            }),
            &mut output,
        )
        .unwrap_err();
        assert!(err.to_string().contains("at least 3 characters"));
    }

    #[test]
    fn list_command_applies_search_filter() {
        let (config, _dir) = temp_config();
        seed_task(&config, "Alpha report");
        seed_task(&config, "Beta memo");

        let output = run(
            &config,
            CliCommand::List(ListArgs {
                status: None,
                priority: None,
                category: None,
                search: Some("alpha".into()),
                due_after: None,
                sort: None,
                direction: None,
            }),
        );
        assert!(output.contains("Alpha report"));
        assert!(!output.contains("Beta memo"));
        assert!(output.contains("1 of 2 tasks"));
    }

    #[test]
    fn done_command_reports_completed_and_missing() {
        let (config, _dir) = temp_config();
        let id = seed_task(&config, "Finish me");

        let output = run(
            &config,
            CliCommand::Done(IdArgs {
                ids: vec![id, "missing".into()],
            }),
        );
        assert!(output.contains("Completed 1 task"));
        assert!(output.contains("Not found: missing"));
    }

    #[test]
    fn delete_command_reports_deleted_and_missing() {
        let (config, _dir) = temp_config();
        let id = seed_task(&config, "Doomed task");

        let output = run(
            &config,
            CliCommand::Delete(IdArgs {
                ids: vec![id, "missing".into()],
            }),
        );
        assert!(output.contains("Deleted 1 task"));
        assert!(output.contains("Not found: missing"));

        let output = run(
            &config,
            CliCommand::Delete(IdArgs {
                ids: vec!["missing".into()],
            }),
        );
        assert!(output.contains("No tasks deleted"));
    }

    #[test]
    fn stats_command_prints_every_counter() {
        let (config, _dir) = temp_config();
        seed_task(&config, "Only task");

        let output = run(&config, CliCommand::Stats);
        assert_eq!(
            output,
            "Total:         1\n\
             Pending:       1\n\
             In progress:   0\n\
             Completed:     0\n\
             Cancelled:     0\n\
             Overdue:       0\n\
             Due soon:      0\n\
             High priority: 0\n"
        );
    }

    #[test]
    fn first_run_is_seeded_with_samples() {
        let (config, _dir) = temp_config();
        let output = run(
            &config,
            CliCommand::List(ListArgs {
                status: None,
                priority: None,
                category: None,
                search: None,
                due_after: None,
                sort: None,
                direction: None,
            }),
        );
        assert!(output.contains("of 15 tasks"));
    }

    #[test]
    fn bare_dates_parse_to_midnight_utc() {
        let parsed = parse_date("2026-09-01").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-09-01T00:00:00+00:00");
        assert!(parse_date("not-a-date").is_err());
    }
}
