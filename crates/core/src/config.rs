use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use once_cell::sync::Lazy;

static ENV_DATA_DIR: &str = "TASKDECK_DATA_DIR";

static PROJECT_DIRS: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("dev", "taskdeck", "taskdeck"));

/// Storage slot names. Each slot holds one JSON document under the data dir.
pub mod slots {
    pub const TASKS: &str = "tasks";
    pub const PREFERENCES: &str = "preferences";
    pub const THEME: &str = "theme";
    pub const SETTINGS: &str = "settings";
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    data_dir: PathBuf,
}

impl AppConfig {
    /// Construct [`AppConfig`] by resolving the data directory using the provided override,
    /// environment variables, and platform defaults.
    pub fn discover(data_dir_override: Option<PathBuf>) -> Result<Self> {
        let data_dir = resolve_data_dir(data_dir_override)?;
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).with_context(|| {
                format!("Failed to create data directory at {}", data_dir.display())
            })?;
        }
        Self::from_data_dir(data_dir)
    }

    /// Construct [`AppConfig`] directly from a resolved data directory.
    pub fn from_data_dir(data_dir: PathBuf) -> Result<Self> {
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the JSON document backing a storage slot.
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }
}

fn resolve_data_dir(data_dir_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = data_dir_override {
        return Ok(dir);
    }

    if let Ok(env_dir) = env::var(ENV_DATA_DIR) {
        return Ok(PathBuf::from(env_dir));
    }

    if cfg!(debug_assertions) {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let dev_dir = manifest_dir
            .join("..")
            .join("..")
            .join("tmp")
            .join("dev-taskdeck");
        return Ok(dev_dir);
    }

    if let Some(project) = &*PROJECT_DIRS {
        return Ok(project.data_dir().to_path_buf());
    }

    if let Some(base) = BaseDirs::new() {
        return Ok(base.home_dir().join(".taskdeck"));
    }

    Ok(env::current_dir()?.join(".taskdeck"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_path_appends_json_extension() {
        let config = AppConfig::from_data_dir(PathBuf::from("/tmp/deck")).unwrap();
        assert_eq!(
            config.slot_path(slots::TASKS),
            PathBuf::from("/tmp/deck/tasks.json")
        );
    }

    #[test]
    fn explicit_override_wins() {
        let dir = PathBuf::from("/tmp/deck-override");
        assert_eq!(resolve_data_dir(Some(dir.clone())).unwrap(), dir);
    }
}
