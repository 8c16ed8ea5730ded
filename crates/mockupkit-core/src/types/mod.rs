//! Identifiers and tags shared by the scene model, events and snapshots.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable identifier of a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "obj-{}", self.0)
    }
}

/// Tag of a scene object.
///
/// Stored in both the live object and its serialized form, so system
/// objects can be recognised without looking at names or styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectKind {
    /// Editable text.
    Text,
    /// Raster image placed by the user.
    Image,
    /// Vector graphic placed by the user.
    VectorGraphic,
    /// Product photo locked below all content.
    MockupBackground,
    /// Dashed print-area outline.
    PrintGuide,
}

impl ObjectKind {
    /// System kinds are never serialized and never user-editable.
    pub fn is_system(self) -> bool {
        matches!(self, ObjectKind::MockupBackground | ObjectKind::PrintGuide)
    }

    /// Stable tag used in logs, events and snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Text => "text",
            ObjectKind::Image => "image",
            ObjectKind::VectorGraphic => "vectorGraphic",
            ObjectKind::MockupBackground => "mockupBackground",
            ObjectKind::PrintGuide => "printGuide",
        }
    }

    /// Inverse of [`ObjectKind::as_str`]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "text" => Some(ObjectKind::Text),
            "image" => Some(ObjectKind::Image),
            "vectorGraphic" => Some(ObjectKind::VectorGraphic),
            "mockupBackground" => Some(ObjectKind::MockupBackground),
            "printGuide" => Some(ObjectKind::PrintGuide),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primitive the rendering engine draws an object with.
///
/// Legacy data only carries this, so the identity heuristics use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VisualType {
    /// Text run.
    Text,
    /// Bitmap.
    Image,
    /// Plain rectangle.
    Rect,
    /// Path or path group.
    Path,
}

impl VisualType {
    /// Type name written into snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            VisualType::Text => "text",
            VisualType::Image => "image",
            VisualType::Rect => "rect",
            VisualType::Path => "path",
        }
    }

    /// Accepts the type names older editors wrote as well.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "text" | "i-text" | "itext" | "textbox" => Some(VisualType::Text),
            "image" => Some(VisualType::Image),
            "rect" => Some(VisualType::Rect),
            "path" | "group" | "svg" | "path-group" => Some(VisualType::Path),
            _ => None,
        }
    }
}
