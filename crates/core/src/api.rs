//! Backend adapter with local fallback. The REST transport is a boundary
//! collaborator behind [`TaskBackend`]; [`TaskApi`] guarantees the store a
//! uniform contract whether or not a remote backend is reachable by
//! mirroring every mutation into the `tasks` storage slot.

use thiserror::Error;
use tracing::warn;

use crate::config::slots;
use crate::model::{Task, TaskPatch};
use crate::storage::Storage;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("task {0} not found")]
    NotFound(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// CRUD surface shared by the remote transport and the local mirror.
pub trait TaskBackend: Send + Sync {
    fn fetch_tasks(&self) -> Result<Vec<Task>, BackendError>;
    fn create_task(&self, task: Task) -> Result<Task, BackendError>;
    fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Task, BackendError>;
    fn delete_task(&self, id: &str) -> Result<(), BackendError>;
    fn bulk_update(&self, ids: &[String], patch: &TaskPatch) -> Result<Vec<Task>, BackendError>;
    fn bulk_delete(&self, ids: &[String]) -> Result<(), BackendError>;
}

/// Mutations applied directly against the `tasks` storage slot.
#[derive(Clone)]
pub struct LocalBackend {
    storage: Storage,
}

impl LocalBackend {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    fn load(&self) -> Vec<Task> {
        self.storage.load(slots::TASKS, Vec::new())
    }

    fn save(&self, tasks: &[Task]) {
        self.storage.save(slots::TASKS, &tasks);
    }
}

impl TaskBackend for LocalBackend {
    fn fetch_tasks(&self) -> Result<Vec<Task>, BackendError> {
        Ok(self.load())
    }

    fn create_task(&self, task: Task) -> Result<Task, BackendError> {
        let mut tasks = self.load();
        tasks.push(task.clone());
        self.save(&tasks);
        Ok(task)
    }

    fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Task, BackendError> {
        let mut tasks = self.load();
        let slot = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| BackendError::NotFound(id.to_string()))?;
        let updated = slot.apply(patch);
        *slot = updated.clone();
        self.save(&tasks);
        Ok(updated)
    }

    fn delete_task(&self, id: &str) -> Result<(), BackendError> {
        let mut tasks = self.load();
        tasks.retain(|task| task.id != id);
        self.save(&tasks);
        Ok(())
    }

    fn bulk_update(&self, ids: &[String], patch: &TaskPatch) -> Result<Vec<Task>, BackendError> {
        let mut tasks = self.load();
        let mut updated = Vec::new();
        for task in tasks.iter_mut() {
            if ids.contains(&task.id) {
                *task = task.apply(patch);
                updated.push(task.clone());
            }
        }
        self.save(&tasks);
        Ok(updated)
    }

    fn bulk_delete(&self, ids: &[String]) -> Result<(), BackendError> {
        let mut tasks = self.load();
        tasks.retain(|task| !ids.contains(&task.id));
        self.save(&tasks);
        Ok(())
    }
}

/// Tries the remote backend first and falls back to the local mirror on any
/// failure, returning a success-shaped result either way. With no remote
/// configured, operations go straight to the mirror.
pub struct TaskApi {
    remote: Option<Box<dyn TaskBackend>>,
    local: LocalBackend,
}

impl TaskApi {
    pub fn local(storage: Storage) -> Self {
        Self {
            remote: None,
            local: LocalBackend::new(storage),
        }
    }

    pub fn with_remote(remote: Box<dyn TaskBackend>, storage: Storage) -> Self {
        Self {
            remote: Some(remote),
            local: LocalBackend::new(storage),
        }
    }

    pub fn fetch_tasks(&self) -> Result<Vec<Task>, BackendError> {
        if let Some(remote) = &self.remote {
            match remote.fetch_tasks() {
                Ok(tasks) => return Ok(tasks),
                Err(err) => warn!(%err, "remote fetch failed, falling back to local slot"),
            }
        }
        self.local.fetch_tasks()
    }

    pub fn create_task(&self, task: Task) -> Result<Task, BackendError> {
        if let Some(remote) = &self.remote {
            match remote.create_task(task.clone()) {
                Ok(created) => return Ok(created),
                Err(err) => warn!(%err, "remote create failed, falling back to local slot"),
            }
        }
        self.local.create_task(task)
    }

    /// The one fallback that can still fail: patching an id the mirror has
    /// never seen surfaces [`BackendError::NotFound`].
    pub fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Task, BackendError> {
        if let Some(remote) = &self.remote {
            match remote.update_task(id, patch) {
                Ok(updated) => return Ok(updated),
                Err(err) => warn!(%err, id, "remote update failed, falling back to local slot"),
            }
        }
        self.local.update_task(id, patch)
    }

    pub fn delete_task(&self, id: &str) -> Result<(), BackendError> {
        if let Some(remote) = &self.remote {
            match remote.delete_task(id) {
                Ok(()) => return Ok(()),
                Err(err) => warn!(%err, id, "remote delete failed, falling back to local slot"),
            }
        }
        self.local.delete_task(id)
    }

    pub fn bulk_update(&self, ids: &[String], patch: &TaskPatch) -> Result<Vec<Task>, BackendError> {
        if let Some(remote) = &self.remote {
            match remote.bulk_update(ids, patch) {
                Ok(updated) => return Ok(updated),
                Err(err) => warn!(%err, "remote bulk update failed, falling back to local slot"),
            }
        }
        self.local.bulk_update(ids, patch)
    }

    pub fn bulk_delete(&self, ids: &[String]) -> Result<(), BackendError> {
        if let Some(remote) = &self.remote {
            match remote.bulk_delete(ids) {
                Ok(()) => return Ok(()),
                Err(err) => warn!(%err, "remote bulk delete failed, falling back to local slot"),
            }
        }
        self.local.bulk_delete(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TaskDraft, TaskStatus};
    use pretty_assertions::assert_eq;

    /// Remote double that rejects every call, as an unreachable server would.
    struct DownBackend;

    impl TaskBackend for DownBackend {
        fn fetch_tasks(&self) -> Result<Vec<Task>, BackendError> {
            Err(BackendError::Unavailable("connection refused".into()))
        }
        fn create_task(&self, _task: Task) -> Result<Task, BackendError> {
            Err(BackendError::Unavailable("connection refused".into()))
        }
        fn update_task(&self, _id: &str, _patch: &TaskPatch) -> Result<Task, BackendError> {
            Err(BackendError::Unavailable("connection refused".into()))
        }
        fn delete_task(&self, _id: &str) -> Result<(), BackendError> {
            Err(BackendError::Unavailable("connection refused".into()))
        }
        fn bulk_update(&self, _ids: &[String], _patch: &TaskPatch) -> Result<Vec<Task>, BackendError> {
            Err(BackendError::Unavailable("connection refused".into()))
        }
        fn bulk_delete(&self, _ids: &[String]) -> Result<(), BackendError> {
            Err(BackendError::Unavailable("connection refused".into()))
        }
    }

    fn new_task(title: &str) -> Task {
        Task::create(TaskDraft {
            title: title.into(),
            ..TaskDraft::default()
        })
    }

    #[test]
    fn local_crud_round_trip() {
        let api = TaskApi::local(Storage::in_memory());

        let task = api.create_task(new_task("Write report")).unwrap();
        assert_eq!(api.fetch_tasks().unwrap().len(), 1);

        let patch = TaskPatch::status(TaskStatus::Completed);
        let updated = api.update_task(&task.id, &patch).unwrap();
        assert_eq!(updated.status, TaskStatus::Completed);

        api.delete_task(&task.id).unwrap();
        assert!(api.fetch_tasks().unwrap().is_empty());
    }

    #[test]
    fn down_remote_falls_back_to_local() {
        let storage = Storage::in_memory();
        let api = TaskApi::with_remote(Box::new(DownBackend), storage.clone());

        let task = api.create_task(new_task("Offline work")).unwrap();
        // the mutation landed in the local slot despite the dead remote
        let mirrored: Vec<Task> = storage.load(slots::TASKS, Vec::new());
        assert_eq!(mirrored.len(), 1);
        assert_eq!(mirrored[0].id, task.id);

        let fetched = api.fetch_tasks().unwrap();
        assert_eq!(fetched.len(), 1);
    }

    #[test]
    fn update_of_unknown_id_surfaces_not_found() {
        let api = TaskApi::local(Storage::in_memory());
        let err = api
            .update_task("missing", &TaskPatch::default())
            .unwrap_err();
        assert!(matches!(err, BackendError::NotFound(_)));
    }

    #[test]
    fn bulk_update_patches_only_listed_ids() {
        let api = TaskApi::local(Storage::in_memory());
        let keep = api.create_task(new_task("Keep")).unwrap();
        let change = api.create_task(new_task("Change")).unwrap();

        let patch = TaskPatch::status(TaskStatus::Cancelled);
        let updated = api.bulk_update(&[change.id.clone()], &patch).unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].status, TaskStatus::Cancelled);

        let tasks = api.fetch_tasks().unwrap();
        let kept = tasks.iter().find(|t| t.id == keep.id).unwrap();
        assert_eq!(kept.status, TaskStatus::Pending);
    }

    #[test]
    fn bulk_delete_removes_every_listed_id() {
        let api = TaskApi::local(Storage::in_memory());
        let a = api.create_task(new_task("a")).unwrap();
        let _b = api.create_task(new_task("b")).unwrap();
        let c = api.create_task(new_task("c")).unwrap();

        api.bulk_delete(&[a.id, c.id]).unwrap();
        let remaining = api.fetch_tasks().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "b");
    }
}
