//! Settings location and lifecycle.

use crate::config::Config;
use crate::error::{SettingsError, SettingsResult};
use std::path::{Path, PathBuf};

/// Owns the active configuration and where it is stored.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    config: Config,
    path: PathBuf,
}

impl SettingsManager {
    /// Default config file: `<config dir>/mockupkit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("mockupkit").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load from the default location
    pub fn load_default() -> SettingsResult<Self> {
        Self::load_or_default(&Self::default_path()?)
    }

    /// Load `path`, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        let config = if path.exists() {
            Config::load_from_file(path)
                .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Config::default()
        };
        Ok(Self {
            config,
            path: path.to_path_buf(),
        })
    }

    /// Write the configuration back to its file
    pub fn save(&self) -> SettingsResult<()> {
        self.config
            .save_to_file(&self.path)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", self.path.display(), e)))
    }

    /// Current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable configuration
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Discard customisations
    pub fn restore_defaults(&mut self) {
        self.config = Config::default();
    }
}
