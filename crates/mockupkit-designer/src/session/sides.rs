//! Side switching, the snapshot map and canvas geometry.

use std::collections::BTreeMap;

use mockupkit_core::{AppEvent, CatalogError, SceneEvent, SideEvent};

use super::{change_notifier, EditorSession};
use crate::identity::purge_imposters;
use crate::model::Transform2D;
use crate::serialization::{restore_snapshot, SceneSnapshot};

impl EditorSession {
    /// Makes `key` the active side.
    ///
    /// The outgoing side is serialized into the snapshot map, the incoming
    /// side's snapshot (if any) is restored, and the guide and clips are
    /// rebuilt for the new print area. Returns `Ok(false)` when `key` is
    /// already active.
    pub fn switch_side(&mut self, key: &str) -> Result<bool, CatalogError> {
        if key == self.active_side || self.is_disposed() {
            return Ok(false);
        }
        let print_dims = self.product.side(key)?.print_dimensions;

        // the outgoing side gets its notification before the context changes
        self.debouncer.flush();
        self.interacting = false;
        purge_imposters(&mut self.scene, &self.options.identity);
        let outgoing = self.serialize();
        self.snapshots.insert(self.active_side.clone(), Some(outgoing));

        let generation = self.generation.invalidate();
        let from = std::mem::replace(&mut self.active_side, key.to_string());
        self.print_dims = print_dims;
        self.selection = None;
        self.debouncer = change_notifier(&self.bus, key, self.options.change_debounce);

        self.scene.remove_background();
        self.load_active_side();
        self.reset_history();

        tracing::info!("Switched side {} -> {} (generation {})", from, key, generation);
        self.emit(AppEvent::Side(SideEvent::Switched {
            from,
            to: key.to_string(),
        }));
        self.emit(AppEvent::Scene(SceneEvent::LayersChanged {
            count: self.scene.user_count(),
        }));
        Ok(true)
    }

    /// Rebuilds the live scene from the active side's stored snapshot.
    pub(super) fn load_active_side(&mut self) {
        self.scene.clear_user_objects();
        let stored = self.snapshots.get(&self.active_side).cloned().flatten();
        if let Some(snapshot) = stored {
            match restore_snapshot(&mut self.scene, &snapshot, &self.options.identity) {
                Ok(count) => tracing::debug!("Restored {} objects on {}", count, self.active_side),
                Err(e) => tracing::warn!(
                    "Stored snapshot for {} is unusable, starting empty: {}",
                    self.active_side,
                    e
                ),
            }
        }
        purge_imposters(&mut self.scene, &self.options.identity);
        self.scene.ensure_print_guide(&self.print_dims);
        self.scene.enforce_system_order();
        self.reapply_clips();
    }

    /// Every side's snapshot, with a fresh one for the active side.
    pub fn snapshots(&self) -> BTreeMap<String, Option<SceneSnapshot>> {
        let mut all = self.snapshots.clone();
        all.insert(self.active_side.clone(), Some(self.serialize()));
        all
    }

    /// Snapshot of one side; the active side is serialized on the spot.
    pub fn snapshot_for(&self, key: &str) -> Option<SceneSnapshot> {
        if key == self.active_side {
            Some(self.serialize())
        } else {
            self.snapshots.get(key).cloned().flatten()
        }
    }

    /// Whether a side has content to show in previews.
    pub fn has_snapshot(&self, key: &str) -> bool {
        key == self.active_side || self.snapshots.get(key).is_some_and(Option::is_some)
    }

    /// Resizes the editor canvas.
    ///
    /// The mockup is recentered and rescaled, the guide follows the print
    /// area and every clip is recomputed. User objects keep their canvas
    /// positions.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if self.is_disposed() || !valid(width) || !valid(height) {
            return false;
        }
        self.scene.resize(width, height);
        self.viewport.set_canvas_size(width, height);

        if let Some(content) = self.background_content() {
            let transform = self.background_transform(content.natural_height);
            self.scene.set_background(content, transform);
        }
        self.scene.ensure_print_guide(&self.print_dims);
        self.scene.enforce_system_order();
        let clipped = self.reapply_clips();
        tracing::debug!("Canvas resized to {}x{}, {} clips updated", width, height, clipped);
        true
    }

    /// Centered placement of a mockup of `natural_height` on the canvas.
    pub(super) fn background_transform(&self, natural_height: f64) -> Transform2D {
        let scale = if natural_height > 0.0 {
            self.scene.height() * self.options.projection.editor_fill_ratio / natural_height
        } else {
            1.0
        };
        Transform2D::at(self.scene.width() / 2.0, self.scene.height() / 2.0).with_scale(scale, scale)
    }
}
