//! Tuning constants shared across the editor.
//!
//! These are defaults; `mockupkit-settings` can override every one of them.

use std::time::Duration;

/// Fraction of the editor canvas height the mockup image occupies.
pub const EDITOR_FILL_RATIO: f64 = 0.8;

/// Fraction of a preview canvas the mockup image occupies.
pub const PREVIEW_FILL_RATIO: f64 = 0.95;

/// Canvas size the preview print-area offsets are authored against.
pub const REFERENCE_PREVIEW_SIZE: f64 = 600.0;

/// Canvas size assumed for snapshots that carry no source geometry.
pub const LEGACY_REFERENCE_SIZE: f64 = 800.0;

/// Edge length of the large preview canvas.
pub const LARGE_PREVIEW_SIZE: u32 = 600;

/// Edge length of a preview thumbnail.
pub const THUMBNAIL_PREVIEW_SIZE: u32 = 140;

/// Raster multiplier used by the "download mockup" export.
pub const EXPORT_MULTIPLIER: u32 = 2;

/// Maximum number of retained history snapshots.
pub const HISTORY_DEPTH: usize = 20;

/// Quiet window before a burst of edits is reported downstream.
pub const CHANGE_DEBOUNCE: Duration = Duration::from_millis(50);

/// Upper bound on waiting for a font to become ready.
pub const FONT_LOAD_TIMEOUT: Duration = Duration::from_millis(5000);

/// Family substituted when a font fails to load in time.
pub const FALLBACK_FONT: &str = "sans-serif";

/// Offset applied to both axes of a duplicated object.
pub const DUPLICATE_OFFSET: f64 = 10.0;

/// Uploads larger than this on either axis are scaled down on insert.
pub const UPLOAD_MAX_DIMENSION: f64 = 400.0;

/// Target edge length for scaled-down uploads.
pub const UPLOAD_TARGET_DIMENSION: f64 = 250.0;

/// An unnamed, interactive image wider than this share of the canvas is an imposter.
pub const EDITABLE_IMPOSTER_RATIO: f64 = 0.9;

/// An unnamed, locked image wider than this share of the canvas is an imposter.
pub const LOCKED_IMPOSTER_RATIO: f64 = 0.5;

/// Default text style for newly inserted text.
pub const DEFAULT_TEXT_CONTENT: &str = "New Text";
/// Default font family for newly inserted text.
pub const DEFAULT_FONT_FAMILY: &str = "Arial";
/// Default font size for newly inserted text.
pub const DEFAULT_FONT_SIZE: f64 = 28.0;
/// Default fill for newly inserted text.
pub const DEFAULT_TEXT_FILL: &str = "#2f2e0c";

/// Font sizes offered by the text toolbar.
pub const FONT_SIZES: [f64; 24] = [
    8.0, 9.0, 10.0, 11.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 24.0, 26.0, 28.0, 32.0, 36.0, 40.0,
    48.0, 56.0, 64.0, 72.0, 80.0, 96.0, 120.0, 144.0,
];

/// Zoom presets offered by the status bar, in percent.
pub const ZOOM_PRESETS: [u32; 7] = [145, 125, 100, 50, 25, 7, 3];

/// Minimum editor zoom factor.
pub const MIN_ZOOM: f64 = 0.05;
/// Maximum editor zoom factor.
pub const MAX_ZOOM: f64 = 20.0;

/// Persisted names that mark system objects.
pub const MOCKUP_BACKGROUND_NAME: &str = "mockupBackground";
/// Legacy persisted name of the mockup background.
pub const LEGACY_MOCKUP_NAME: &str = "mockup";
/// Persisted name of the print guide.
pub const PRINT_GUIDE_NAME: &str = "printGuide";
/// Legacy persisted name of the print guide.
pub const LEGACY_GUIDE_NAME: &str = "guideline";

/// Names given to user content on insert.
pub const USER_TEXT_NAME: &str = "user-text";
/// Name given to uploaded images on insert.
pub const USER_IMAGE_NAME: &str = "user-image";
/// Name given to vector graphics on insert.
pub const USER_GRAPHIC_NAME: &str = "user-graphic";

/// Stroke color of the print guide outline.
pub const PRINT_GUIDE_STROKE: &str = "#9a9a9a";
/// Dash pattern of the print guide outline.
pub const PRINT_GUIDE_DASH: [f64; 2] = [5.0, 5.0];
