//! Inserting, deleting, transforming and stacking user content.

use mockupkit_core::{constants, AppEvent, ObjectId, SceneEvent};

use super::{Alignment, EditorSession, LayerInfo};
use crate::model::{
    ImageContent, ObjectContent, SceneContent, SceneObject, Transform2D, VectorContent,
};

impl EditorSession {
    /// Inserts text at the print-area center.
    ///
    /// Styling comes from the session's default text; `content` overrides
    /// the placeholder string.
    pub fn add_text(&mut self, content: Option<&str>) -> Option<ObjectId> {
        let mut text = self.options.default_text.clone();
        if let Some(content) = content {
            text.content = content.to_string();
        }
        self.place_new(ObjectContent::Text(text), constants::USER_TEXT_NAME, 1.0)
    }

    /// Inserts a bitmap at the print-area center, scaled down when large.
    pub fn add_image(
        &mut self,
        source_ref: &str,
        natural_width: f64,
        natural_height: f64,
    ) -> Option<ObjectId> {
        let scale = self.upload_scale(natural_width, natural_height);
        let content = ImageContent::new(source_ref, natural_width, natural_height);
        self.place_new(ObjectContent::Image(content), constants::USER_IMAGE_NAME, scale)
    }

    /// Inserts a vector graphic with the same placement rules as uploads.
    pub fn add_graphic(&mut self, content: VectorContent) -> Option<ObjectId> {
        let scale = self.upload_scale(content.natural_width, content.natural_height);
        self.place_new(
            ObjectContent::VectorGraphic(content),
            constants::USER_GRAPHIC_NAME,
            scale,
        )
    }

    /// Uniform scale that fits an upload into the target dimension.
    fn upload_scale(&self, width: f64, height: f64) -> f64 {
        let max = self.options.upload_max_dimension;
        let target = self.options.upload_target_dimension;
        if width > max {
            target / width
        } else if height > max {
            target / height
        } else {
            1.0
        }
    }

    fn place_new(&mut self, content: ObjectContent, name: &str, scale: f64) -> Option<ObjectId> {
        if !self.can_mutate("insert") {
            return None;
        }
        let rect = self.print_rect();
        let kind = content.kind();
        let id = self.scene.generate_id();
        let transform = Transform2D::at(rect.center_x, rect.center_y).with_scale(scale, scale);
        self.scene
            .push(SceneObject::new(id, content, transform).with_name(name));

        tracing::debug!("Added {} {} on {}", kind, id, self.active_side);
        self.emit(AppEvent::Scene(SceneEvent::ObjectAdded { id, kind }));
        self.select(id);
        self.emit_layers_changed();
        self.commit();
        Some(id)
    }

    /// Removes a user object. System objects cannot be deleted.
    pub fn delete(&mut self, id: ObjectId) -> bool {
        if !self.can_mutate("delete") || !self.is_user_object(id) {
            return false;
        }
        if self.scene.remove(id).is_none() {
            return false;
        }
        if self.selection == Some(id) {
            self.selection = None;
            self.emit(AppEvent::Scene(SceneEvent::SelectionChanged { id: None }));
        }
        self.emit(AppEvent::Scene(SceneEvent::ObjectRemoved { id }));
        self.emit_layers_changed();
        self.commit();
        true
    }

    pub fn delete_selected(&mut self) -> bool {
        match self.selection {
            Some(id) => self.delete(id),
            None => false,
        }
    }

    /// Clones a user object directly above itself, offset on both axes.
    pub fn duplicate(&mut self, id: ObjectId) -> Option<ObjectId> {
        if !self.can_mutate("duplicate") || !self.is_user_object(id) {
            return None;
        }
        let index = self.scene.index_of(id)?;
        let mut copy = self.scene.get(id)?.clone();
        copy.id = self.scene.generate_id();
        copy.transform.x += self.options.duplicate_offset;
        copy.transform.y += self.options.duplicate_offset;
        let (new_id, kind) = (copy.id, copy.kind());
        self.scene.insert_at(index + 1, copy);

        tracing::debug!("Duplicated {} as {}", id, new_id);
        self.emit(AppEvent::Scene(SceneEvent::ObjectAdded { id: new_id, kind }));
        self.select(new_id);
        self.emit_layers_changed();
        self.commit();
        Some(new_id)
    }

    pub fn duplicate_selected(&mut self) -> Option<ObjectId> {
        self.duplicate(self.selection?)
    }

    /// Selects a user object. Selection is not a scene edit.
    pub fn select(&mut self, id: ObjectId) -> bool {
        if self.is_disposed() || !self.is_user_object(id) {
            return false;
        }
        if self.selection != Some(id) {
            self.selection = Some(id);
            self.emit(AppEvent::Scene(SceneEvent::SelectionChanged { id: Some(id) }));
        }
        true
    }

    pub fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.emit(AppEvent::Scene(SceneEvent::SelectionChanged { id: None }));
        }
    }

    pub fn selected_object(&self) -> Option<&SceneObject> {
        self.scene.get(self.selection?)
    }

    pub fn set_visible(&mut self, id: ObjectId, visible: bool) -> bool {
        self.modify(id, "set_visible", |o| o.visible = visible)
    }

    pub fn toggle_visibility(&mut self, id: ObjectId) -> bool {
        self.modify(id, "toggle_visibility", |o| o.visible = !o.visible)
    }

    pub fn set_position(&mut self, id: ObjectId, x: f64, y: f64) -> bool {
        if !(x.is_finite() && y.is_finite()) {
            return false;
        }
        self.modify(id, "set_position", |o| {
            o.transform.x = x;
            o.transform.y = y;
        })
    }

    /// Sets the rotation in degrees.
    pub fn set_rotation(&mut self, id: ObjectId, degrees: f64) -> bool {
        if !degrees.is_finite() {
            return false;
        }
        self.modify(id, "set_rotation", |o| o.transform.rotation = degrees)
    }

    pub fn set_scale(&mut self, id: ObjectId, scale_x: f64, scale_y: f64) -> bool {
        if !(scale_x.is_finite() && scale_y.is_finite()) || scale_x == 0.0 || scale_y == 0.0 {
            return false;
        }
        self.modify(id, "set_scale", |o| {
            o.transform.scale_x = scale_x;
            o.transform.scale_y = scale_y;
        })
    }

    /// Starts a drag or resize burst. Edits until [`Self::end_interaction`]
    /// share one history entry.
    pub fn begin_interaction(&mut self) -> bool {
        if !self.can_mutate("begin_interaction") {
            return false;
        }
        self.interacting = true;
        true
    }

    /// Ends a burst and records it as a single history entry.
    pub fn end_interaction(&mut self) -> bool {
        if !std::mem::take(&mut self.interacting) || self.is_disposed() {
            return false;
        }
        self.record_history();
        true
    }

    pub fn is_interacting(&self) -> bool {
        self.interacting
    }

    /// Snaps an object's rotated, scaled box to an edge or the center of
    /// the print area.
    pub fn align_to_print_guide(&mut self, id: ObjectId, alignment: Alignment) -> bool {
        let Some(object) = self.scene.get(id) else {
            return false;
        };
        let extent = object.extent();
        let rect = self.print_rect();
        let (mut x, mut y) = (object.transform.x, object.transform.y);
        match alignment {
            Alignment::Left => x = rect.left() + extent.width / 2.0,
            Alignment::CenterX => x = rect.center_x,
            Alignment::Right => x = rect.right() - extent.width / 2.0,
            Alignment::Top => y = rect.top() + extent.height / 2.0,
            Alignment::CenterY => y = rect.center_y,
            Alignment::Bottom => y = rect.bottom() - extent.height / 2.0,
        }
        self.set_position(id, x, y)
    }

    /// Moves an object one step up the paint order.
    pub fn bring_forward(&mut self, id: ObjectId) -> bool {
        self.restack(id, true)
    }

    /// Moves an object one step down, never below the system layer.
    pub fn send_backward(&mut self, id: ObjectId) -> bool {
        self.restack(id, false)
    }

    fn restack(&mut self, id: ObjectId, up: bool) -> bool {
        if !self.can_mutate("restack") || !self.scene.restack(id, up) {
            return false;
        }
        self.emit_layers_changed();
        self.commit();
        true
    }

    /// User layers, topmost first.
    pub fn layers(&self) -> Vec<LayerInfo> {
        self.scene
            .user_objects()
            .rev()
            .map(|o| LayerInfo {
                id: o.id,
                kind: o.kind(),
                label: o.content.label(),
                visible: o.visible,
                selected: self.selection == Some(o.id),
            })
            .collect()
    }

    /// Applies `f` to a user object and commits the edit.
    pub(super) fn modify<F>(&mut self, id: ObjectId, operation: &str, f: F) -> bool
    where
        F: FnOnce(&mut SceneObject),
    {
        if !self.can_mutate(operation) || !self.is_user_object(id) {
            return false;
        }
        let Some(object) = self.scene.get_mut(id) else {
            return false;
        };
        f(object);
        self.emit(AppEvent::Scene(SceneEvent::ObjectModified { id }));
        self.commit();
        true
    }

    fn is_user_object(&self, id: ObjectId) -> bool {
        self.scene.get(id).is_some_and(|o| !o.is_system())
    }

    fn emit_layers_changed(&self) {
        self.emit(AppEvent::Scene(SceneEvent::LayersChanged {
            count: self.scene.user_count(),
        }));
    }
}
