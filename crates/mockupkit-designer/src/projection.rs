//! Preview projection.
//!
//! Remaps a snapshot authored on the editor canvas onto a preview canvas
//! of a different size, optionally offset, resized and rotated by the
//! preview's print area.
//!
//! Current-format snapshots are mapped exactly: offsets from the source
//! center are scaled, rotated by the print-area angle and moved to the
//! target center, while object rotation adds up and object scale
//! multiplies. Legacy snapshots have no source geometry, so their group
//! center is aligned with the target center and everything is scaled by
//! `target / legacy_reference_size`. That path is lossy but always yields
//! finite, on-canvas placements.

use mockupkit_core::{constants, ObjectKind, PreviewPrintArea};
use serde::Serialize;

use crate::identity::is_marked_system;
use crate::model::{ObjectContent, Point, SceneContent, Size, Transform2D};
use crate::serialization::{ObjectData, SceneSnapshot};

/// Tunable constants of the projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    /// Share of the editor canvas height the mockup covers.
    pub editor_fill_ratio: f64,
    /// Share of the preview canvas the mockup covers.
    pub preview_fill_ratio: f64,
    /// Canvas size preview print areas are authored against.
    pub reference_size: f64,
    /// Canvas size assumed for legacy snapshots.
    pub legacy_reference_size: f64,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            editor_fill_ratio: constants::EDITOR_FILL_RATIO,
            preview_fill_ratio: constants::PREVIEW_FILL_RATIO,
            reference_size: constants::REFERENCE_PREVIEW_SIZE,
            legacy_reference_size: constants::LEGACY_REFERENCE_SIZE,
        }
    }
}

impl ProjectionParams {
    /// Factor mapping reference-canvas print-area units to `target_size`.
    pub fn guide_scale(&self, target_size: f64) -> f64 {
        if target_size == self.reference_size || self.reference_size <= 0.0 {
            1.0
        } else {
            target_size / self.reference_size
        }
    }
}

/// One object placed on the preview canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderInstruction {
    pub kind: ObjectKind,
    pub transform: Transform2D,
    pub visible: bool,
    pub content: ObjectContent,
}

/// Project `snapshot` onto a square canvas of `target_size` pixels.
pub fn project(
    snapshot: &SceneSnapshot,
    target_size: f64,
    print_area: &PreviewPrintArea,
    params: &ProjectionParams,
) -> Vec<RenderInstruction> {
    let objects: Vec<&ObjectData> = snapshot
        .objects
        .iter()
        .filter(|data| {
            if is_marked_system(data) {
                tracing::debug!("Projector dropped a system object {:?}", data.name);
                false
            } else {
                true
            }
        })
        .collect();

    let placed = match snapshot.source_size() {
        Some(source) => project_current(&objects, source, target_size, print_area, params),
        None => {
            tracing::debug!("Projecting legacy snapshot with {} objects", objects.len());
            project_legacy(&objects, target_size, params)
        }
    };

    objects
        .into_iter()
        .zip(placed)
        .filter_map(|(data, transform)| {
            let Some(content) = data.to_content() else {
                tracing::warn!("Skipping object of unknown kind {:?}", data.visual_type);
                return None;
            };
            Some(RenderInstruction {
                kind: content.kind(),
                transform,
                visible: data.visible,
                content,
            })
        })
        .collect()
}

/// Scale applied to every object of a current-format snapshot.
pub fn scale_factor(
    source: Size,
    target_size: f64,
    print_area: &PreviewPrintArea,
    params: &ProjectionParams,
) -> f64 {
    match print_area.width.filter(|w| w.is_finite() && *w > 0.0) {
        Some(width) => width * params.guide_scale(target_size) / source.width,
        None => {
            target_size * params.preview_fill_ratio / (source.height * params.editor_fill_ratio)
        }
    }
}

/// Where the print-area center lands on the target canvas.
pub fn target_center(target_size: f64, print_area: &PreviewPrintArea, params: &ProjectionParams) -> Point {
    let guide_scale = params.guide_scale(target_size);
    Point::new(
        target_size / 2.0 + print_area.left_offset * guide_scale,
        target_size / 2.0 + print_area.top_offset * guide_scale,
    )
}

fn project_current(
    objects: &[&ObjectData],
    source: Size,
    target_size: f64,
    print_area: &PreviewPrintArea,
    params: &ProjectionParams,
) -> Vec<Transform2D> {
    let scale = scale_factor(source, target_size, print_area, params);
    let center = target_center(target_size, print_area, params);
    let (sin, cos) = print_area.rotation.to_radians().sin_cos();

    objects
        .iter()
        .map(|data| {
            let rel_x = (data.x - source.width / 2.0) * scale;
            let rel_y = (data.y - source.height / 2.0) * scale;
            let (dx, dy) = if print_area.rotation != 0.0 {
                (rel_x * cos - rel_y * sin, rel_x * sin + rel_y * cos)
            } else {
                (rel_x, rel_y)
            };
            Transform2D {
                x: center.x + dx,
                y: center.y + dy,
                scale_x: data.scale_x * scale,
                scale_y: data.scale_y * scale,
                rotation: data.rotation + print_area.rotation,
            }
        })
        .collect()
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

fn project_legacy(objects: &[&ObjectData], target_size: f64, params: &ProjectionParams) -> Vec<Transform2D> {
    let limit = finite_or(target_size, 0.0).max(0.0);
    let scale = if params.legacy_reference_size > 0.0 {
        limit / params.legacy_reference_size
    } else {
        1.0
    };

    // group bounding box over the objects with usable geometry
    let mut min = Point::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for data in objects.iter().filter(|d| d.is_finite()) {
        let extent = data.transform().extent(Size::new(data.width, data.height));
        min.x = min.x.min(data.x - extent.width / 2.0);
        min.y = min.y.min(data.y - extent.height / 2.0);
        max.x = max.x.max(data.x + extent.width / 2.0);
        max.y = max.y.max(data.y + extent.height / 2.0);
    }
    let group_center = if min.x.is_finite() && max.x.is_finite() {
        Point::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0)
    } else {
        Point::new(0.0, 0.0)
    };
    let half = limit / 2.0;

    objects
        .iter()
        .map(|data| {
            let x = half + (finite_or(data.x, group_center.x) - group_center.x) * scale;
            let y = half + (finite_or(data.y, group_center.y) - group_center.y) * scale;
            Transform2D {
                x: finite_or(x, half).clamp(0.0, limit),
                y: finite_or(y, half).clamp(0.0, limit),
                scale_x: finite_or(data.scale_x * scale, scale),
                scale_y: finite_or(data.scale_y * scale, scale),
                rotation: finite_or(data.rotation, 0.0),
            }
        })
        .collect()
}
