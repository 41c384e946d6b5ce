pub mod cli;
pub mod commands;

pub use taskdeck_core as core;
pub use taskdeck_core::config;
pub use taskdeck_core::model;
pub use taskdeck_core::store;
pub use taskdeck_core::AppConfig;
