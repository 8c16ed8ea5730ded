//! System-object identity.
//!
//! The `kind` tag is the primary discriminant. Names and styling are only
//! consulted for data that lost its tag, and all of those heuristics live
//! in [`classify`].

use mockupkit_core::{constants, ObjectKind, VisualType};

use crate::model::SceneObject;
use crate::scene::Scene;
use crate::serialization::ObjectData;

/// Thresholds for the legacy heuristics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdentityParams {
    /// Share of the canvas width above which an unnamed interactive image
    /// is treated as a leaked background.
    pub editable_imposter_ratio: f64,
    /// Same threshold for non-interactive images.
    pub locked_imposter_ratio: f64,
}

impl Default for IdentityParams {
    fn default() -> Self {
        Self {
            editable_imposter_ratio: constants::EDITABLE_IMPOSTER_RATIO,
            locked_imposter_ratio: constants::LOCKED_IMPOSTER_RATIO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectRole {
    /// Savable user content.
    User,
    /// Mockup background or print guide.
    System,
    /// A background image that leaked into the user layer.
    Imposter,
}

/// Whether a persisted name marks a system object.
pub fn is_system_name(name: &str) -> bool {
    matches!(
        name,
        constants::MOCKUP_BACKGROUND_NAME
            | constants::LEGACY_MOCKUP_NAME
            | constants::PRINT_GUIDE_NAME
            | constants::LEGACY_GUIDE_NAME
    )
}

fn is_transparent(fill: Option<&str>) -> bool {
    let Some(fill) = fill else {
        return true;
    };
    let fill: String = fill
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    if fill.is_empty() || fill == "transparent" || fill == "none" {
        return true;
    }
    // rgba(r,g,b,0)
    fill.strip_prefix("rgba(")
        .and_then(|rest| rest.strip_suffix(')'))
        .and_then(|rest| rest.rsplit(',').next())
        .and_then(|alpha| alpha.parse::<f64>().ok())
        .is_some_and(|alpha| alpha == 0.0)
}

/// Rectangle with a dashed stroke and no visible fill.
pub fn is_guide_shaped(data: &ObjectData) -> bool {
    let is_rect = data.visual() == Some(VisualType::Rect)
        || data.resolved_kind() == Some(ObjectKind::PrintGuide);
    let dashed = data
        .stroke_dash_array
        .as_ref()
        .is_some_and(|dash| dash.iter().any(|d| *d > 0.0));
    is_rect && dashed && is_transparent(data.fill.as_deref())
}

/// Rules 1 to 3 of [`classify`]: a system tag, a system name or a guide
/// shape. They need no canvas geometry.
pub fn is_marked_system(data: &ObjectData) -> bool {
    data.kind
        .as_deref()
        .and_then(ObjectKind::parse)
        .is_some_and(ObjectKind::is_system)
        || data.name.as_deref().is_some_and(is_system_name)
        || is_guide_shaped(data)
}

/// Decide whether serialized `data` is user content.
///
/// Rules, first match wins:
/// 1. a system kind tag
/// 2. a system name
/// 3. a guide-shaped rectangle
/// 4. an unnamed image whose unscaled width exceeds the imposter
///    threshold of `canvas_width`
/// 5. a non-interactive image or rectangle
///
/// Everything else is user content, including non-interactive text and
/// paths, which the serializer turns back into editable objects.
pub fn classify(data: &ObjectData, canvas_width: f64, params: &IdentityParams) -> ObjectRole {
    if is_marked_system(data) {
        return ObjectRole::System;
    }

    let visual = data.visual();
    let unnamed = data.name.as_deref().map_or(true, |n| n.trim().is_empty());
    if unnamed && visual == Some(VisualType::Image) && canvas_width > 0.0 {
        let ratio = if data.editable {
            params.editable_imposter_ratio
        } else {
            params.locked_imposter_ratio
        };
        // Intrinsic width: a leaked photo sits scaled down to the editor fill.
        if data.width > canvas_width * ratio {
            return ObjectRole::Imposter;
        }
    }

    if !data.editable && matches!(visual, Some(VisualType::Image) | Some(VisualType::Rect)) {
        return ObjectRole::System;
    }

    ObjectRole::User
}

/// Role of a live object.
pub fn classify_object(object: &SceneObject, canvas_width: f64, params: &IdentityParams) -> ObjectRole {
    classify(&ObjectData::from_object(object), canvas_width, params)
}

pub fn is_system_object(object: &SceneObject, canvas_width: f64, params: &IdentityParams) -> bool {
    classify_object(object, canvas_width, params) != ObjectRole::User
}

/// Whether the object may be saved and edited by the user.
pub fn is_user_editable(object: &SceneObject, canvas_width: f64, params: &IdentityParams) -> bool {
    object.editable && classify_object(object, canvas_width, params) == ObjectRole::User
}

/// Remove imposters from the live user layer.
///
/// Returns the number of objects removed.
pub fn purge_imposters(scene: &mut Scene, params: &IdentityParams) -> usize {
    let width = scene.width();
    let imposters: Vec<_> = scene
        .user_objects()
        .filter(|o| classify_object(o, width, params) == ObjectRole::Imposter)
        .map(|o| o.id)
        .collect();
    for id in &imposters {
        tracing::warn!("Purging imposter background {}", id);
        scene.remove(*id);
    }
    imposters.len()
}
