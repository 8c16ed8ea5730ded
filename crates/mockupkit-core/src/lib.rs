//! # MockupKit Core
//!
//! Core types, traits, and utilities for MockupKit.
//! Provides the error taxonomy, shared identifiers, tuning constants, the
//! product catalog, the event bus and the scheduling primitives used by
//! the editor session.

pub mod assets;
pub mod constants;
pub mod data;
pub mod error;
pub mod event_bus;
pub mod scheduler;
pub mod types;

pub use assets::{AssetLoader, FontProvider, LoadedImage};

pub use data::{
    PreviewDefinition, PreviewPrintArea, PrintDimensions, Product, ProductCatalog, Side,
};

pub use error::{AssetError, CatalogError, Error, HistoryError, Result, SnapshotError};

// Re-export event bus for convenience
pub use event_bus::{
    AppEvent, AssetEvent, EventBus, EventCategory, EventFilter, HistoryEvent, PreviewEvent,
    SceneEvent, SideEvent, SubscriptionId,
};

pub use scheduler::{Debouncer, Generation, LoadTicket};

pub use types::{ObjectId, ObjectKind, VisualType};
