//! # MockupKit
//!
//! Editor core for product customization: place text, images and vector
//! graphics inside the print areas of apparel and mug mockups, side by
//! side, and render scaled previews onto product photos.
//!
//! ## Architecture
//!
//! MockupKit is organized as a workspace with multiple crates:
//!
//! 1. **mockupkit-core** - Errors, ids, constants, product catalog, events, scheduling
//! 2. **mockupkit-designer** - Scene model, clipping, snapshots, history, projection, session
//! 3. **mockupkit-settings** - Editor configuration and its persistence
//! 4. **mockupkit** - Command line tool that integrates all crates
//!
//! ## Features
//!
//! - **Per-side editing**: each product side keeps its own snapshot
//! - **Print-area clipping**: user content is always masked to the printable rectangle
//! - **Undo/redo**: bounded snapshot history per side
//! - **Previews**: side content remapped onto lifestyle and thumbnail mockups
//! - **Legacy designs**: older snapshots load with best-effort placement

pub mod options;

pub use mockupkit_core as core;
pub use mockupkit_designer as designer;
pub use mockupkit_settings as settings;

pub use mockupkit_core::{
    AppEvent, AssetError, CatalogError, Error, EventBus, HistoryError, ObjectId, ObjectKind,
    Product, ProductCatalog, Result, SnapshotError,
};

pub use mockupkit_designer::{
    DesignDocument, EditorOptions, EditorSession, FsAssetLoader, ImageStore, PreviewRequest,
    PreviewScene, ProjectionParams, SceneSnapshot, Size, SystemFontProvider,
};

pub use mockupkit_settings::{Config, SettingsManager};

pub use options::{editor_options, identity_params, projection_params};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, so command output on stdout stays parseable
/// - RUST_LOG environment variable support
/// - `verbose` lowers the default level from INFO to DEBUG
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(verbose);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
