//! MockupKit Settings Crate
//!
//! Handles editor configuration and its persistence.

pub mod config;
pub mod error;
pub mod manager;

pub use config::{Config, EditorSettings, IdentitySettings, ProjectionSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
pub use manager::SettingsManager;
