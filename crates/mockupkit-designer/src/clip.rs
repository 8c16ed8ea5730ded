//! Print-area clip authority.
//!
//! Every user object is masked by the print area of the active side. The
//! mask lives in absolute canvas coordinates, so it stays valid no matter
//! how the object itself is moved, scaled or rotated.

use mockupkit_core::PrintDimensions;

use crate::model::{ClipRect, SceneObject, Size};

/// Print rectangle of a side on a canvas of `canvas` size.
pub fn compute_clip_rect(canvas: Size, dims: &PrintDimensions) -> ClipRect {
    ClipRect {
        center_x: canvas.width / 2.0 + dims.left_offset,
        center_y: canvas.height / 2.0 + dims.top_offset,
        width: dims.width,
        height: dims.height,
    }
}

/// Replaces the clip of every user object with a freshly computed one.
///
/// System objects are left untouched. Returns the number of objects that
/// were clipped.
pub fn reapply_clips(objects: &mut [SceneObject], canvas: Size, dims: &PrintDimensions) -> usize {
    let rect = compute_clip_rect(canvas, dims);
    let mut clipped = 0;
    for object in objects.iter_mut().filter(|o| !o.is_system()) {
        object.clip = Some(rect);
        clipped += 1;
    }
    tracing::trace!(
        "Clipped {} objects to {}x{} at ({}, {})",
        clipped,
        rect.width,
        rect.height,
        rect.center_x,
        rect.center_y
    );
    clipped
}
