//! Configuration and settings management for MockupKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Editor behaviour (history depth, debounce, fonts, insert defaults)
//! - Projection constants (fill ratios, reference canvas sizes, export)
//! - Identity heuristics for legacy data (imposter width ratios)

use crate::error::{ConfigError, SettingsResult};
use mockupkit_core::constants;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Maximum number of remembered design files
pub const MAX_RECENT_DESIGNS: usize = 10;

/// Editor behaviour settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Retained undo snapshots
    pub history_depth: usize,
    /// Quiet window before edits are reported, in milliseconds
    pub change_debounce_ms: u64,
    /// Upper bound on waiting for a font, in milliseconds
    pub font_load_timeout_ms: u64,
    /// Family substituted when a font is not ready in time
    pub fallback_font: String,
    /// Offset applied to duplicated objects
    pub duplicate_offset: f64,
    /// Content of newly inserted text
    pub default_text: String,
    /// Font family of newly inserted text
    pub default_font_family: String,
    /// Font size of newly inserted text
    pub default_font_size: f64,
    /// Fill color of newly inserted text
    pub default_text_fill: String,
    /// Uploads larger than this on either axis are scaled down
    pub upload_max_dimension: f64,
    /// Edge length scaled-down uploads are fitted to
    pub upload_target_dimension: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            history_depth: constants::HISTORY_DEPTH,
            change_debounce_ms: constants::CHANGE_DEBOUNCE.as_millis() as u64,
            font_load_timeout_ms: constants::FONT_LOAD_TIMEOUT.as_millis() as u64,
            fallback_font: constants::FALLBACK_FONT.to_string(),
            duplicate_offset: constants::DUPLICATE_OFFSET,
            default_text: constants::DEFAULT_TEXT_CONTENT.to_string(),
            default_font_family: constants::DEFAULT_FONT_FAMILY.to_string(),
            default_font_size: constants::DEFAULT_FONT_SIZE,
            default_text_fill: constants::DEFAULT_TEXT_FILL.to_string(),
            upload_max_dimension: constants::UPLOAD_MAX_DIMENSION,
            upload_target_dimension: constants::UPLOAD_TARGET_DIMENSION,
        }
    }
}

/// Preview projection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSettings {
    /// Share of the editor canvas height covered by the mockup
    pub editor_fill_ratio: f64,
    /// Share of a preview canvas covered by the mockup
    pub preview_fill_ratio: f64,
    /// Canvas size preview print areas are authored against
    pub reference_size: f64,
    /// Canvas size assumed for legacy snapshots
    pub legacy_reference_size: f64,
    /// Large preview edge length
    pub large_preview_size: u32,
    /// Thumbnail edge length
    pub thumbnail_size: u32,
    /// Raster multiplier for PNG export
    pub export_multiplier: u32,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            editor_fill_ratio: constants::EDITOR_FILL_RATIO,
            preview_fill_ratio: constants::PREVIEW_FILL_RATIO,
            reference_size: constants::REFERENCE_PREVIEW_SIZE,
            legacy_reference_size: constants::LEGACY_REFERENCE_SIZE,
            large_preview_size: constants::LARGE_PREVIEW_SIZE,
            thumbnail_size: constants::THUMBNAIL_PREVIEW_SIZE,
            export_multiplier: constants::EXPORT_MULTIPLIER,
        }
    }
}

/// Thresholds for recognising leaked background images
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentitySettings {
    /// Width share above which an unnamed interactive image is an imposter
    pub editable_imposter_ratio: f64,
    /// Width share above which an unnamed locked image is an imposter
    pub locked_imposter_ratio: f64,
}

impl Default for IdentitySettings {
    fn default() -> Self {
        Self {
            editable_imposter_ratio: constants::EDITABLE_IMPOSTER_RATIO,
            locked_imposter_ratio: constants::LOCKED_IMPOSTER_RATIO,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Recently opened design documents
    pub recent_designs: Vec<PathBuf>,
    /// Editor behaviour
    pub editor: EditorSettings,
    /// Preview projection
    pub projection: ProjectionSettings,
    /// Legacy identity heuristics
    pub identity: IdentitySettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Result<Format, ConfigError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let editor = &self.editor;
        if editor.history_depth == 0 {
            return Err(ConfigError::out_of_range(
                "editor.history_depth",
                editor.history_depth,
            ));
        }
        if editor.font_load_timeout_ms == 0 {
            return Err(ConfigError::out_of_range(
                "editor.font_load_timeout_ms",
                editor.font_load_timeout_ms,
            ));
        }
        if editor.default_font_size <= 0.0 {
            return Err(ConfigError::out_of_range(
                "editor.default_font_size",
                editor.default_font_size,
            ));
        }
        if editor.upload_max_dimension <= 0.0 || editor.upload_target_dimension <= 0.0 {
            return Err(ConfigError::out_of_range(
                "editor.upload_target_dimension",
                editor.upload_target_dimension,
            ));
        }

        let ratios = [
            ("projection.editor_fill_ratio", self.projection.editor_fill_ratio),
            ("projection.preview_fill_ratio", self.projection.preview_fill_ratio),
            (
                "identity.editable_imposter_ratio",
                self.identity.editable_imposter_ratio,
            ),
            (
                "identity.locked_imposter_ratio",
                self.identity.locked_imposter_ratio,
            ),
        ];
        for (key, value) in ratios {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::out_of_range(key, value));
            }
        }

        let projection = &self.projection;
        if !(projection.reference_size > 0.0) {
            return Err(ConfigError::out_of_range(
                "projection.reference_size",
                projection.reference_size,
            ));
        }
        if !(projection.legacy_reference_size > 0.0) {
            return Err(ConfigError::out_of_range(
                "projection.legacy_reference_size",
                projection.legacy_reference_size,
            ));
        }
        if projection.large_preview_size == 0
            || projection.thumbnail_size == 0
            || projection.export_multiplier == 0
        {
            return Err(ConfigError::out_of_range(
                "projection.sizes",
                format!(
                    "{}/{}/{}",
                    projection.large_preview_size,
                    projection.thumbnail_size,
                    projection.export_multiplier
                ),
            ));
        }

        Ok(())
    }

    /// Add a design document to the recent list
    pub fn add_recent_design(&mut self, path: PathBuf) {
        self.recent_designs.retain(|f| f != &path);
        self.recent_designs.insert(0, path);
        self.recent_designs.truncate(MAX_RECENT_DESIGNS);
    }

    /// Merge another config into this one
    ///
    /// Sections of `other` that still hold their defaults do not override
    /// customised sections here. Recent designs from `other` go first.
    pub fn merge(&mut self, other: &Config) {
        if other.editor != EditorSettings::default() {
            self.editor = other.editor.clone();
        }
        if other.projection != ProjectionSettings::default() {
            self.projection = other.projection.clone();
        }
        if other.identity != IdentitySettings::default() {
            self.identity = other.identity.clone();
        }
        for path in other.recent_designs.iter().rev() {
            self.add_recent_design(path.clone());
        }
    }
}
