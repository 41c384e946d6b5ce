pub mod api;
pub mod config;
pub mod filter;
pub mod model;
pub mod sample;
pub mod sort;
pub mod stats;
pub mod storage;
pub mod store;
pub mod validate;

pub use api::{BackendError, LocalBackend, TaskApi, TaskBackend};
pub use config::AppConfig;
pub use filter::filter_tasks;
pub use model::*;
pub use sort::{sort_tasks, sort_tasks_with};
pub use stats::task_stats;
pub use storage::Storage;
pub use store::{Action, TaskState, TaskStore};
pub use validate::{validate, ValidationErrors};
