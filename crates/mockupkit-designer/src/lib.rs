//! # MockupKit Designer
//!
//! Editor core for product customization: users place text, images and
//! vector graphics inside the print areas of product mockups, across the
//! named sides of a product, and get scaled previews composited onto
//! product photos.
//!
//! ## Core Components
//!
//! ### Scene
//! - **Model**: Text, image and vector content plus the two system objects
//!   (mockup background, print guide)
//! - **Scene**: Paint-ordered object store with the system layer at the bottom
//! - **Clip**: Print-area masks in absolute canvas coordinates
//! - **Identity**: Tells user content from system objects and imposters
//!
//! ### Pipeline
//! - **Serialization**: Portable per-side snapshots and design documents
//! - **Projection**: Remaps a snapshot onto a preview canvas and print area
//! - **Preview**: Picks the side for a preview and composes the scene
//! - **Raster**: Paints a preview to a bitmap and exports PNG
//!
//! ### Editing
//! - **Session**: Owns the live scene, the side map, history and loads
//! - **History**: Bounded undo/redo over snapshots
//! - **Viewport**: Zoom and pan of the editor canvas
//!
//! ## Architecture
//!
//! ```text
//! EditorSession
//!   ├── Scene (live objects of the active side)
//!   │     └── Clip authority (print mask)
//!   ├── Side map (sideKey -> SceneSnapshot)
//!   ├── History (SceneSnapshot entries)
//!   └── Viewport
//!
//! SceneSnapshot ── Projection ── PreviewScene ── Raster (PNG)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mockupkit_core::{EventBus, ProductCatalog};
//! use mockupkit_designer::{EditorOptions, EditorSession, Size};
//!
//! let catalog = ProductCatalog::builtin();
//! let product = catalog.get("hoodie-heavy-blend")?.clone();
//! let mut session = EditorSession::new(
//!     product,
//!     "front",
//!     Size::new(800.0, 600.0),
//!     EditorOptions::default(),
//!     Arc::new(EventBus::new()),
//! )?;
//!
//! session.add_text(Some("Hello"));
//! let preview = session.render_preview("front", 140.0)?;
//! ```

pub mod assets;
pub mod clip;
pub mod fonts;
pub mod history;
pub mod identity;
pub mod model;
pub mod preview;
pub mod projection;
pub mod raster;
pub mod scene;
pub mod serialization;
pub mod session;
pub mod viewport;

// Re-export all public types from submodules
pub use assets::{decode_image, FsAssetLoader, ImageStore};
pub use clip::{compute_clip_rect, reapply_clips};
pub use fonts::SystemFontProvider;
pub use history::HistoryManager;
pub use identity::{
    classify, classify_object, is_guide_shaped, is_marked_system, is_system_object, is_user_editable,
    purge_imposters, IdentityParams, ObjectRole,
};
pub use model::{
    BackgroundContent, ClipRect, FontStyle, GuideContent, GraphicSource, ImageContent, ObjectContent, Point, SceneContent,
    SceneObject, Size, TextAlign, TextContent, Transform2D, VectorContent,
};
pub use preview::{BackgroundPlacement, PreviewRequest, PreviewScene};
pub use projection::{project, ProjectionParams, RenderInstruction};
pub use raster::{export_png, parse_color, render};
pub use scene::Scene;
pub use serialization::{
    restore_snapshot, serialize_scene, DesignDocument, DesignMetadata, ObjectData,
    SceneSnapshot, FORMAT_VERSION,
};
pub use session::{Alignment, EditorOptions, EditorSession, LayerInfo};
pub use viewport::Viewport;
