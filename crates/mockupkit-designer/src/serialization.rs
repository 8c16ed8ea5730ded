//! Scene snapshots and design documents.
//!
//! A [`SceneSnapshot`] is the portable form of one side's user content plus
//! the canvas size it was authored on. Decoding is lenient: unknown fields
//! are ignored, missing fields take defaults and an object that cannot be
//! decoded at all is dropped with a warning instead of failing the whole
//! snapshot. Older editors wrote `left`/`top`, `angle` and `selectable`
//! together with fabric-style type names; those are accepted too.
//!
//! A [`DesignDocument`] bundles the snapshots of every side of a product
//! and is what the editor saves to disk.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use mockupkit_core::{ObjectId, ObjectKind, SnapshotError, VisualType};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::identity::{classify, IdentityParams, ObjectRole};
use crate::model::{
    BackgroundContent, FontStyle, GraphicSource, GuideContent, ImageContent, ObjectContent,
    SceneObject, Size, TextAlign, TextContent, Transform2D, VectorContent,
};
use crate::scene::Scene;

/// Snapshot and document format version
pub const FORMAT_VERSION: &str = "1.0";

/// One object in serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub visual_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(alias = "left")]
    pub x: f64,
    #[serde(alias = "top")]
    pub y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    #[serde(alias = "angle")]
    pub rotation: f64,
    /// Intrinsic unscaled width.
    pub width: f64,
    /// Intrinsic unscaled height.
    pub height: f64,
    #[serde(alias = "selectable")]
    pub editable: bool,
    pub visible: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(
        deserialize_with = "lenient_weight",
        skip_serializing_if = "Option::is_none"
    )]
    pub font_weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_dash_array: Option<Vec<f64>>,

    #[serde(alias = "sourceRef", skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(alias = "d", skip_serializing_if = "Option::is_none")]
    pub path_data: Option<String>,
}

impl Default for ObjectData {
    fn default() -> Self {
        Self {
            kind: None,
            visual_type: None,
            name: None,
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            width: 0.0,
            height: 0.0,
            editable: true,
            visible: true,
            text: None,
            font_family: None,
            font_size: None,
            font_weight: None,
            font_style: None,
            text_align: None,
            fill: None,
            stroke: None,
            stroke_dash_array: None,
            src: None,
            path_data: None,
        }
    }
}

/// Accepts numeric weights as well as "bold"/"normal".
fn lenient_weight<'de, D>(deserializer: D) -> std::result::Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().map(|w| w.clamp(1.0, 1000.0).round() as u16),
        serde_json::Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "bold" | "bolder" => Some(700),
            "normal" | "lighter" => Some(400),
            other => other.parse::<u16>().ok(),
        },
        _ => None,
    })
}

impl ObjectData {
    /// Export every field of a live object.
    pub fn from_object(object: &SceneObject) -> Self {
        use crate::model::SceneContent;

        let size = object.bounds();
        let mut data = ObjectData {
            kind: Some(object.kind().as_str().to_string()),
            visual_type: Some(object.content.visual_type().as_str().to_string()),
            name: object.name.clone(),
            x: object.transform.x,
            y: object.transform.y,
            scale_x: object.transform.scale_x,
            scale_y: object.transform.scale_y,
            rotation: object.transform.rotation,
            width: size.width,
            height: size.height,
            editable: object.editable,
            visible: object.visible,
            ..Default::default()
        };

        match &object.content {
            ObjectContent::Text(t) => {
                data.text = Some(t.content.clone());
                data.font_family = Some(t.font_family.clone());
                data.font_size = Some(t.font_size);
                data.font_weight = Some(t.font_weight);
                data.font_style = Some(
                    match t.font_style {
                        FontStyle::Normal => "normal",
                        FontStyle::Italic => "italic",
                    }
                    .to_string(),
                );
                data.text_align = Some(t.text_align.as_str().to_string());
                data.fill = Some(t.fill_color.clone());
            }
            ObjectContent::Image(i) => {
                data.src = Some(i.source_ref.clone());
            }
            ObjectContent::VectorGraphic(v) => {
                match &v.source {
                    GraphicSource::PathData(d) => data.path_data = Some(d.clone()),
                    GraphicSource::Source(s) => data.src = Some(s.clone()),
                }
                data.fill = v.fill_color.clone();
                data.stroke = v.stroke_color.clone();
            }
            ObjectContent::MockupBackground(b) => {
                data.src = Some(b.source_ref.clone());
            }
            ObjectContent::PrintGuide(g) => {
                data.stroke = Some(g.stroke_color.clone());
                data.stroke_dash_array = Some(g.dash.clone());
            }
        }
        data
    }

    /// Kind tag, falling back to the legacy type name.
    pub fn resolved_kind(&self) -> Option<ObjectKind> {
        if let Some(kind) = self.kind.as_deref().and_then(ObjectKind::parse) {
            return Some(kind);
        }
        match self.visual()? {
            VisualType::Text => Some(ObjectKind::Text),
            VisualType::Image => Some(ObjectKind::Image),
            VisualType::Rect | VisualType::Path => Some(ObjectKind::VectorGraphic),
        }
    }

    /// Drawing primitive, falling back to the kind tag.
    pub fn visual(&self) -> Option<VisualType> {
        if let Some(visual) = self.visual_type.as_deref().and_then(VisualType::from_type_name) {
            return Some(visual);
        }
        match self.kind.as_deref().and_then(ObjectKind::parse)? {
            ObjectKind::Text => Some(VisualType::Text),
            ObjectKind::Image | ObjectKind::MockupBackground => Some(VisualType::Image),
            ObjectKind::VectorGraphic => Some(VisualType::Path),
            ObjectKind::PrintGuide => Some(VisualType::Rect),
        }
    }

    pub fn transform(&self) -> Transform2D {
        Transform2D {
            x: self.x,
            y: self.y,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            rotation: self.rotation,
        }
    }

    pub fn is_finite(&self) -> bool {
        [
            self.x,
            self.y,
            self.scale_x,
            self.scale_y,
            self.rotation,
            self.width,
            self.height,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// Variant payload with best-effort defaults for missing fields.
    ///
    /// `None` only when the object's kind cannot be determined.
    pub fn to_content(&self) -> Option<ObjectContent> {
        let content = match self.resolved_kind()? {
            ObjectKind::Text => {
                let defaults = TextContent::default();
                ObjectContent::Text(TextContent {
                    content: self.text.clone().unwrap_or_default(),
                    font_family: self.font_family.clone().unwrap_or(defaults.font_family),
                    font_size: self
                        .font_size
                        .filter(|s| s.is_finite() && *s > 0.0)
                        .unwrap_or(defaults.font_size),
                    font_weight: self.font_weight.unwrap_or(defaults.font_weight),
                    font_style: match self.font_style.as_deref() {
                        Some("italic") | Some("oblique") => FontStyle::Italic,
                        _ => FontStyle::Normal,
                    },
                    fill_color: self.fill.clone().unwrap_or(defaults.fill_color),
                    text_align: self
                        .text_align
                        .as_deref()
                        .and_then(TextAlign::parse)
                        .unwrap_or_default(),
                })
            }
            ObjectKind::Image => ObjectContent::Image(ImageContent::new(
                self.src.clone().unwrap_or_default(),
                self.width,
                self.height,
            )),
            ObjectKind::VectorGraphic => ObjectContent::VectorGraphic(self.vector_content()),
            ObjectKind::MockupBackground => ObjectContent::MockupBackground(BackgroundContent {
                source_ref: self.src.clone().unwrap_or_default(),
                natural_width: self.width,
                natural_height: self.height,
            }),
            ObjectKind::PrintGuide => {
                let mut guide = GuideContent::new(self.width, self.height);
                if let Some(stroke) = &self.stroke {
                    guide.stroke_color = stroke.clone();
                }
                if let Some(dash) = &self.stroke_dash_array {
                    guide.dash = dash.clone();
                }
                ObjectContent::PrintGuide(guide)
            }
        };
        Some(content)
    }

    fn vector_content(&self) -> VectorContent {
        let source = match (&self.path_data, &self.src) {
            (Some(d), _) => GraphicSource::PathData(d.clone()),
            (None, Some(s)) => GraphicSource::Source(s.clone()),
            // plain rectangles from older editors
            (None, None) if self.visual() == Some(VisualType::Rect) => GraphicSource::PathData(
                format!("M0 0 H{w} V{h} H0 Z", w = self.width, h = self.height),
            ),
            (None, None) => GraphicSource::PathData(String::new()),
        };
        VectorContent {
            source,
            natural_width: self.width,
            natural_height: self.height,
            fill_color: self.fill.clone(),
            stroke_color: self.stroke.clone(),
        }
    }

    /// Live object with the given id.
    pub fn to_scene_object(&self, id: ObjectId) -> Option<SceneObject> {
        let content = self.to_content()?;
        let mut object = SceneObject::new(id, content, self.transform());
        object.name = self.name.clone().filter(|n| !n.is_empty());
        object.editable = self.editable;
        object.visible = self.visible;
        Some(object)
    }
}

/// Portable form of one side's user content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawSnapshot")]
pub struct SceneSnapshot {
    pub version: String,
    pub objects: Vec<ObjectData>,
    /// Editor canvas width at export time; absent in legacy snapshots.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_width: Option<f64>,
    /// Editor canvas height at export time; absent in legacy snapshots.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_height: Option<f64>,
}

/// Snapshot as found on disk, before per-object decoding.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    #[serde(default)]
    version: Option<serde_json::Value>,
    #[serde(default)]
    objects: Vec<serde_json::Value>,
    #[serde(default, alias = "sourceCanvasWidth")]
    source_width: Option<f64>,
    #[serde(default, alias = "sourceCanvasHeight")]
    source_height: Option<f64>,
}

impl From<RawSnapshot> for SceneSnapshot {
    fn from(raw: RawSnapshot) -> Self {
        let total = raw.objects.len();
        let objects: Vec<ObjectData> = raw
            .objects
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(data) => Some(data),
                Err(e) => {
                    tracing::warn!("Dropping undecodable snapshot object {}: {}", index, e);
                    None
                }
            })
            .collect();
        if objects.len() < total {
            tracing::debug!("Decoded {} of {} snapshot objects", objects.len(), total);
        }

        let version = match raw.version {
            Some(serde_json::Value::String(s)) => s,
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };

        Self {
            version,
            objects,
            source_width: raw.source_width,
            source_height: raw.source_height,
        }
    }
}

impl Default for SceneSnapshot {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            objects: Vec::new(),
            source_width: None,
            source_height: None,
        }
    }
}

impl SceneSnapshot {
    pub fn new(objects: Vec<ObjectData>, source_width: f64, source_height: f64) -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            objects,
            source_width: Some(source_width),
            source_height: Some(source_height),
        }
    }

    /// Snapshot without source geometry.
    pub fn legacy(objects: Vec<ObjectData>) -> Self {
        Self {
            objects,
            ..Default::default()
        }
    }

    /// Whether the authoring canvas size is unknown or unusable.
    pub fn is_legacy(&self) -> bool {
        self.source_size().is_none()
    }

    pub fn source_size(&self) -> Option<Size> {
        match (self.source_width, self.source_height) {
            (Some(w), Some(h)) if w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0 => {
                Some(Size::new(w, h))
            }
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::Malformed {
            reason: e.to_string(),
        })
    }

    pub fn to_json(&self) -> std::result::Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::Malformed {
            reason: e.to_string(),
        })
    }
}

/// Export the user content of `scene`.
///
/// System objects and imposters are dropped. Objects that survive are
/// written as editable, and the current canvas size is recorded as the
/// source geometry.
pub fn serialize_scene(scene: &Scene, identity: &IdentityParams) -> SceneSnapshot {
    let mut dropped = 0usize;
    let objects: Vec<ObjectData> = scene
        .objects()
        .iter()
        .map(ObjectData::from_object)
        .filter(|data| {
            let keep = classify(data, scene.width(), identity) == ObjectRole::User;
            if !keep {
                dropped += 1;
            }
            keep
        })
        .map(|mut data| {
            data.editable = true;
            data
        })
        .collect();

    tracing::trace!("Serialized {} objects, dropped {}", objects.len(), dropped);
    SceneSnapshot::new(objects, scene.width(), scene.height())
}

/// Replace the user content of `scene` with the snapshot's objects.
///
/// System objects in the scene are kept; system objects and imposters in
/// the snapshot are skipped. Nothing is changed when any object carries a
/// non-finite value. Clips are not applied here.
pub fn restore_snapshot(
    scene: &mut Scene,
    snapshot: &SceneSnapshot,
    identity: &IdentityParams,
) -> std::result::Result<usize, SnapshotError> {
    if let Some(index) = snapshot.objects.iter().position(|o| !o.is_finite()) {
        return Err(SnapshotError::Malformed {
            reason: format!("object {} has non-finite geometry", index),
        });
    }

    let reference_width = snapshot
        .source_size()
        .map_or(scene.width(), |size| size.width);
    let accepted: Vec<&ObjectData> = snapshot
        .objects
        .iter()
        .filter(|data| match classify(data, reference_width, identity) {
            ObjectRole::User => true,
            role => {
                tracing::debug!(
                    "Skipping {:?} object {:?} on restore",
                    role,
                    data.name.as_deref().unwrap_or("")
                );
                false
            }
        })
        .collect();

    scene.clear_user_objects();
    let mut restored = 0;
    for data in accepted {
        let id = scene.generate_id();
        match data.to_scene_object(id) {
            Some(mut object) => {
                object.editable = true;
                scene.push(object);
                restored += 1;
            }
            None => tracing::warn!(
                "Skipping object of unknown kind {:?}/{:?}",
                data.kind,
                data.visual_type
            ),
        }
    }
    Ok(restored)
}

/// Design metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignMetadata {
    pub name: String,
    pub product_id: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

/// All sides of one product customization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignDocument {
    pub version: String,
    pub metadata: DesignMetadata,
    pub active_side: String,
    #[serde(default)]
    pub sides: BTreeMap<String, Option<SceneSnapshot>>,
}

impl DesignDocument {
    pub fn new(
        name: impl Into<String>,
        product_id: impl Into<String>,
        active_side: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            version: FORMAT_VERSION.to_string(),
            metadata: DesignMetadata {
                name: name.into(),
                product_id: product_id.into(),
                created: now,
                modified: now,
                description: String::new(),
            },
            active_side: active_side.into(),
            sides: BTreeMap::new(),
        }
    }

    pub fn with_sides(mut self, sides: BTreeMap<String, Option<SceneSnapshot>>) -> Self {
        self.sides = sides;
        self
    }

    /// Stored snapshot of a side, if it has one.
    pub fn side(&self, key: &str) -> Option<&SceneSnapshot> {
        self.sides.get(key).and_then(Option::as_ref)
    }

    /// Reject documents written by a newer major format version.
    pub fn check_version(&self) -> std::result::Result<(), SnapshotError> {
        let major = |v: &str| v.split('.').next().and_then(|m| m.trim().parse::<u32>().ok());
        match (major(&self.version), major(FORMAT_VERSION)) {
            (Some(found), Some(supported)) if found > supported => {
                Err(SnapshotError::UnsupportedVersion {
                    found: self.version.clone(),
                    supported: FORMAT_VERSION.to_string(),
                })
            }
            (None, _) if !self.version.is_empty() => Err(SnapshotError::UnsupportedVersion {
                found: self.version.clone(),
                supported: FORMAT_VERSION.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Save design to file
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.metadata.modified = Utc::now();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize design")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write design file {}", path.display()))?;
        tracing::info!("Saved design {:?} to {}", self.metadata.name, path.display());
        Ok(())
    }

    /// Load design from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read design file {}", path.display()))?;
        let design: DesignDocument =
            serde_json::from_str(&content).context("Failed to parse design file")?;
        design.check_version()?;
        tracing::info!(
            "Loaded design {:?} ({} sides) from {}",
            design.metadata.name,
            design.sides.len(),
            path.display()
        );
        Ok(design)
    }
}
