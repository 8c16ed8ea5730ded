//! Event type definitions for the event bus.
//!
//! Events are grouped by category and are cloneable and serializable so
//! they can be logged or forwarded to a host application.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::{ObjectId, ObjectKind};

/// Root event enum for all editor events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppEvent {
    /// Live scene mutations
    Scene(SceneEvent),
    /// Active side changes
    Side(SideEvent),
    /// Undo/redo availability
    History(HistoryEvent),
    /// Asset and font loading
    Asset(AssetEvent),
    /// Preview rendering and export
    Preview(PreviewEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Scene(_) => EventCategory::Scene,
            AppEvent::Side(_) => EventCategory::Side,
            AppEvent::History(_) => EventCategory::History,
            AppEvent::Asset(_) => EventCategory::Asset,
            AppEvent::Preview(_) => EventCategory::Preview,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Scene(e) => e.description(),
            AppEvent::Side(e) => e.description(),
            AppEvent::History(e) => e.description(),
            AppEvent::Asset(e) => e.description(),
            AppEvent::Preview(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Live scene mutation events.
    Scene,
    /// Side switch events.
    Side,
    /// History state events.
    History,
    /// Asset loading events.
    Asset,
    /// Preview events.
    Preview,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Scene => write!(f, "Scene"),
            EventCategory::Side => write!(f, "Side"),
            EventCategory::History => write!(f, "History"),
            EventCategory::Asset => write!(f, "Asset"),
            EventCategory::Preview => write!(f, "Preview"),
        }
    }
}

/// Scene events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// A burst of edits settled; downstream state should re-read the side.
    CanvasChanged {
        /// Side whose scene changed.
        side: String,
    },
    /// An object was inserted.
    ObjectAdded {
        /// New object id.
        id: ObjectId,
        /// Kind of the new object.
        kind: ObjectKind,
    },
    /// An object was removed.
    ObjectRemoved {
        /// Removed object id.
        id: ObjectId,
    },
    /// An object's transform or style changed.
    ObjectModified {
        /// Modified object id.
        id: ObjectId,
    },
    /// The user layer list changed.
    LayersChanged {
        /// Number of user layers.
        count: usize,
    },
    /// The selection changed.
    SelectionChanged {
        /// Selected object, if any.
        id: Option<ObjectId>,
    },
}

impl SceneEvent {
    /// Get a short description of this event
    pub fn description(&self) -> String {
        match self {
            SceneEvent::CanvasChanged { side } => format!("Canvas changed on {}", side),
            SceneEvent::ObjectAdded { id, kind } => format!("Added {} {}", kind, id),
            SceneEvent::ObjectRemoved { id } => format!("Removed {}", id),
            SceneEvent::ObjectModified { id } => format!("Modified {}", id),
            SceneEvent::LayersChanged { count } => format!("{} layers", count),
            SceneEvent::SelectionChanged { id: Some(id) } => format!("Selected {}", id),
            SceneEvent::SelectionChanged { id: None } => "Selection cleared".to_string(),
        }
    }
}

/// Side events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SideEvent {
    /// The active side changed.
    Switched {
        /// Outgoing side key.
        from: String,
        /// Incoming side key.
        to: String,
    },
}

impl SideEvent {
    /// Get a short description of this event
    pub fn description(&self) -> String {
        match self {
            SideEvent::Switched { from, to } => format!("Side {} -> {}", from, to),
        }
    }
}

/// History events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HistoryEvent {
    /// Undo/redo availability changed.
    StateChanged {
        /// Whether undo is possible.
        can_undo: bool,
        /// Whether redo is possible.
        can_redo: bool,
    },
}

impl HistoryEvent {
    /// Get a short description of this event
    pub fn description(&self) -> String {
        match self {
            HistoryEvent::StateChanged { can_undo, can_redo } => {
                format!("History undo={} redo={}", can_undo, can_redo)
            }
        }
    }
}

/// Asset events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AssetEvent {
    /// A mockup background was placed.
    MockupLoaded {
        /// Side the mockup belongs to.
        side: String,
        /// Image reference.
        source: String,
    },
    /// An asset failed to load; the scene is unchanged.
    LoadFailed {
        /// Image or font reference.
        source: String,
        /// Failure description.
        reason: String,
    },
    /// A load finished after its side or session went away.
    StaleLoadDiscarded {
        /// Side the load was started for.
        side: String,
        /// Generation the load was started in.
        generation: u64,
    },
    /// A font was replaced by the fallback family.
    FontFallback {
        /// Requested family.
        requested: String,
        /// Substituted family.
        fallback: String,
    },
}

impl AssetEvent {
    /// Get a short description of this event
    pub fn description(&self) -> String {
        match self {
            AssetEvent::MockupLoaded { side, source } => {
                format!("Mockup {} loaded for {}", source, side)
            }
            AssetEvent::LoadFailed { source, reason } => {
                format!("Failed to load {}: {}", source, reason)
            }
            AssetEvent::StaleLoadDiscarded { side, generation } => {
                format!("Discarded stale load for {} (gen {})", side, generation)
            }
            AssetEvent::FontFallback {
                requested,
                fallback,
            } => format!("Font {} replaced by {}", requested, fallback),
        }
    }
}

/// Preview events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PreviewEvent {
    /// A preview scene was composed.
    Rendered {
        /// Preview key.
        preview_key: String,
        /// Target canvas edge length.
        size: u32,
    },
    /// A preview was written to disk.
    Exported {
        /// Output file.
        path: PathBuf,
    },
}

impl PreviewEvent {
    /// Get a short description of this event
    pub fn description(&self) -> String {
        match self {
            PreviewEvent::Rendered { preview_key, size } => {
                format!("Preview {} at {}px", preview_key, size)
            }
            PreviewEvent::Exported { path } => format!("Exported {}", path.display()),
        }
    }
}
