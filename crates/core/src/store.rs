//! Central in-memory store: the task list, its derived filtered+sorted view
//! and statistics, selection, and the loading/error cycle. All mutation is
//! funneled through the synchronous reducer; action creators wrap the
//! backend adapter and mirror the full list to the `tasks` slot afterwards.

use anyhow::Result;
use tracing::{debug, warn};

use crate::api::TaskApi;
use crate::config::{slots, AppConfig};
use crate::filter::filter_tasks;
use crate::model::{
    SortConfig, Task, TaskDraft, TaskFilters, TaskPatch, TaskStats, TaskStatus,
};
use crate::sample::sample_tasks;
use crate::sort::sort_tasks_with;
use crate::stats::task_stats;
use crate::storage::Storage;

#[derive(Debug, Clone, Default)]
pub struct TaskState {
    pub tasks: Vec<Task>,
    pub filtered_tasks: Vec<Task>,
    pub filters: TaskFilters,
    pub sort: SortConfig,
    pub selected: Vec<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub stats: TaskStats,
}

#[derive(Debug, Clone)]
pub enum Action {
    SetLoading(bool),
    SetError(Option<String>),
    SetTasks(Vec<Task>),
    AddTask(Task),
    UpdateTask(Task),
    DeleteTask(String),
    BulkUpdate { ids: Vec<String>, patch: TaskPatch },
    BulkDelete(Vec<String>),
    SetFilters(TaskFilters),
    SetSort(SortConfig),
    ToggleSelection(String),
    SetSelected(Vec<String>),
    ClearSelected,
}

impl TaskState {
    /// Synchronous state transition. Every action that touches the task
    /// list re-derives the filtered view (filter then sort, always from the
    /// full list) and the statistics before returning.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SetLoading(loading) => {
                self.loading = loading;
            }
            Action::SetError(error) => {
                self.error = error;
                self.loading = false;
            }
            Action::SetTasks(tasks) => {
                self.tasks = tasks;
                self.loading = false;
                self.error = None;
                self.refresh_derived();
            }
            Action::AddTask(task) => {
                self.tasks.push(task);
                self.settle();
            }
            Action::UpdateTask(task) => {
                if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
                    *slot = task;
                }
                self.settle();
            }
            Action::DeleteTask(id) => {
                self.tasks.retain(|task| task.id != id);
                self.settle();
            }
            Action::BulkUpdate { ids, patch } => {
                for task in self.tasks.iter_mut() {
                    if ids.contains(&task.id) {
                        *task = task.apply(&patch);
                    }
                }
                self.settle();
            }
            Action::BulkDelete(ids) => {
                self.tasks.retain(|task| !ids.contains(&task.id));
                self.selected.clear();
                self.settle();
            }
            Action::SetFilters(filters) => {
                self.filters = filters;
                self.refresh_derived();
            }
            Action::SetSort(sort) => {
                self.sort = sort;
                self.refresh_derived();
            }
            Action::ToggleSelection(id) => {
                if let Some(pos) = self.selected.iter().position(|s| *s == id) {
                    self.selected.remove(pos);
                } else {
                    self.selected.push(id);
                }
            }
            Action::SetSelected(ids) => {
                self.selected = ids;
            }
            Action::ClearSelected => {
                self.selected.clear();
            }
        }
    }

    /// A completed mutation closes the loading/error cycle.
    fn settle(&mut self) {
        self.loading = false;
        self.error = None;
        self.refresh_derived();
    }

    fn refresh_derived(&mut self) {
        let filtered = filter_tasks(&self.tasks, &self.filters);
        self.filtered_tasks = sort_tasks_with(&filtered, self.sort);
        self.stats = task_stats(&self.tasks);
    }
}

/// Owner of the task collection. Action creators surface failures in
/// `state.error` and propagate them, unlike the persistence adapter, which
/// swallows.
pub struct TaskStore {
    state: TaskState,
    api: TaskApi,
    storage: Storage,
}

impl TaskStore {
    pub fn new(api: TaskApi, storage: Storage) -> Self {
        Self {
            state: TaskState::default(),
            api,
            storage,
        }
    }

    /// File-backed store with no remote backend configured.
    pub fn open(config: &AppConfig) -> Result<Self> {
        let storage = Storage::file(config)?;
        Ok(Self::new(TaskApi::local(storage.clone()), storage))
    }

    pub fn state(&self) -> &TaskState {
        &self.state
    }

    /// Initial load. An empty result seeds the sample bundle so a first run
    /// is never empty; a failed fetch falls back to the samples as well.
    pub fn bootstrap(&mut self) -> Result<()> {
        self.state.apply(Action::SetLoading(true));
        let tasks = match self.api.fetch_tasks() {
            Ok(tasks) if tasks.is_empty() => {
                debug!("no stored tasks, seeding sample bundle");
                sample_tasks()
            }
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(%err, "initial fetch failed, seeding sample bundle");
                sample_tasks()
            }
        };
        self.state.apply(Action::SetTasks(tasks));
        self.mirror();
        Ok(())
    }

    pub fn create_task(&mut self, draft: TaskDraft) -> Result<Task> {
        self.state.apply(Action::SetLoading(true));
        match self.api.create_task(Task::create(draft)) {
            Ok(created) => {
                self.state.apply(Action::AddTask(created.clone()));
                self.mirror();
                Ok(created)
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> Result<Task> {
        self.state.apply(Action::SetLoading(true));
        match self.api.update_task(id, &patch) {
            Ok(updated) => {
                self.state.apply(Action::UpdateTask(updated.clone()));
                self.mirror();
                Ok(updated)
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn delete_task(&mut self, id: &str) -> Result<()> {
        self.state.apply(Action::SetLoading(true));
        match self.api.delete_task(id) {
            Ok(()) => {
                self.state.apply(Action::DeleteTask(id.to_string()));
                self.mirror();
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn bulk_update(&mut self, ids: Vec<String>, patch: TaskPatch) -> Result<Vec<Task>> {
        self.state.apply(Action::SetLoading(true));
        match self.api.bulk_update(&ids, &patch) {
            Ok(updated) => {
                self.state.apply(Action::BulkUpdate { ids, patch });
                self.mirror();
                Ok(updated)
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn bulk_delete(&mut self, ids: Vec<String>) -> Result<()> {
        self.state.apply(Action::SetLoading(true));
        match self.api.bulk_delete(&ids) {
            Ok(()) => {
                self.state.apply(Action::BulkDelete(ids));
                self.mirror();
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn refresh_tasks(&mut self) -> Result<()> {
        self.state.apply(Action::SetLoading(true));
        match self.api.fetch_tasks() {
            Ok(tasks) => {
                self.state.apply(Action::SetTasks(tasks));
                self.mirror();
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    /// Convenience creator: mark every id completed.
    pub fn complete_tasks(&mut self, ids: Vec<String>) -> Result<Vec<Task>> {
        self.bulk_update(ids, TaskPatch::status(TaskStatus::Completed))
    }

    pub fn set_filters(&mut self, filters: TaskFilters) {
        self.state.apply(Action::SetFilters(filters));
    }

    pub fn set_sort(&mut self, sort: SortConfig) {
        self.state.apply(Action::SetSort(sort));
    }

    pub fn toggle_selection(&mut self, id: &str) {
        self.state.apply(Action::ToggleSelection(id.to_string()));
    }

    pub fn set_selected(&mut self, ids: Vec<String>) {
        self.state.apply(Action::SetSelected(ids));
    }

    pub fn clear_selected(&mut self) {
        self.state.apply(Action::ClearSelected);
    }

    pub fn clear_error(&mut self) {
        self.state.apply(Action::SetError(None));
    }

    /// Best-effort mirror of the full list after every change.
    fn mirror(&self) {
        self.storage.save(slots::TASKS, &self.state.tasks);
    }

    fn fail<T>(&mut self, err: crate::api::BackendError) -> Result<T> {
        self.state.apply(Action::SetError(Some(err.to_string())));
        Err(err.into())
    }
}
