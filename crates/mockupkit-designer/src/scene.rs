//! Live scene store.
//!
//! Objects are kept in paint order, bottom first. The mockup background
//! always sits at index 0 and the print guide directly above it; user
//! content follows.

use mockupkit_core::{constants, ObjectId, ObjectKind, PrintDimensions};

use crate::clip::compute_clip_rect;
use crate::model::{
    BackgroundContent, GuideContent, ObjectContent, SceneObject, Size, Transform2D,
};

#[derive(Debug, Clone)]
pub struct Scene {
    width: f64,
    height: f64,
    objects: Vec<SceneObject>,
    next_id: u64,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            objects: Vec::new(),
            next_id: 1,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Updates the canvas size. Callers reposition system objects and
    /// reapply clips afterwards.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn generate_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All objects in paint order.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [SceneObject] {
        &mut self.objects
    }

    /// Objects that are not of a system kind, in paint order.
    pub fn user_objects(&self) -> impl DoubleEndedIterator<Item = &SceneObject> {
        self.objects.iter().filter(|o| !o.is_system())
    }

    pub fn user_count(&self) -> usize {
        self.user_objects().count()
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id == id)
    }

    /// Creates an object with a fresh id on top of the paint order.
    pub fn add(&mut self, content: ObjectContent, transform: Transform2D) -> ObjectId {
        let id = self.generate_id();
        self.objects.push(SceneObject::new(id, content, transform));
        id
    }

    /// Places an existing object on top. The id must be unique.
    pub fn push(&mut self, object: SceneObject) {
        self.next_id = self.next_id.max(object.id.0 + 1);
        self.objects.push(object);
    }

    /// Places an object at `index`, never below the system layer.
    pub fn insert_at(&mut self, index: usize, object: SceneObject) {
        self.next_id = self.next_id.max(object.id.0 + 1);
        let floor = if object.is_system() { 0 } else { self.system_count() };
        let index = index.clamp(floor, self.objects.len());
        self.objects.insert(index, object);
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let index = self.index_of(id)?;
        Some(self.objects.remove(index))
    }

    /// Drops all user content and keeps the system layer.
    pub fn clear_user_objects(&mut self) -> usize {
        let before = self.objects.len();
        self.objects.retain(|o| o.is_system());
        before - self.objects.len()
    }

    fn system_count(&self) -> usize {
        self.objects.iter().filter(|o| o.is_system()).count()
    }

    pub fn background(&self) -> Option<&SceneObject> {
        self.objects
            .iter()
            .find(|o| o.kind() == ObjectKind::MockupBackground)
    }

    pub fn print_guide(&self) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.kind() == ObjectKind::PrintGuide)
    }

    /// Installs the mockup photo at the bottom of the paint order.
    ///
    /// An existing background is replaced in place and keeps its id, so
    /// repeated or out-of-order loads never produce duplicates.
    pub fn set_background(&mut self, content: BackgroundContent, transform: Transform2D) -> ObjectId {
        let existing = self.remove_all_of_kind(ObjectKind::MockupBackground);
        let id = existing.map_or_else(|| self.generate_id(), |o| o.id);
        let object = SceneObject::new(id, ObjectContent::MockupBackground(content), transform)
            .with_name(constants::MOCKUP_BACKGROUND_NAME);
        self.objects.insert(0, object);
        id
    }

    pub fn remove_background(&mut self) -> bool {
        self.remove_all_of_kind(ObjectKind::MockupBackground).is_some()
    }

    /// Makes sure exactly one guide outlines the print area.
    ///
    /// The guide is resized and recentered for the current canvas, and
    /// surplus guides are dropped.
    pub fn ensure_print_guide(&mut self, dims: &PrintDimensions) -> ObjectId {
        let rect = compute_clip_rect(self.size(), dims);
        let transform = Transform2D::at(rect.center_x, rect.center_y);

        match self.remove_all_of_kind(ObjectKind::PrintGuide) {
            Some(mut guide) => {
                guide.transform = transform;
                guide.clip = None;
                if let ObjectContent::PrintGuide(content) = &mut guide.content {
                    content.width = dims.width;
                    content.height = dims.height;
                }
                let id = guide.id;
                self.place_guide(guide);
                id
            }
            None => {
                let id = self.generate_id();
                let guide = SceneObject::new(
                    id,
                    ObjectContent::PrintGuide(GuideContent::new(dims.width, dims.height)),
                    transform,
                )
                .with_name(constants::PRINT_GUIDE_NAME);
                self.place_guide(guide);
                id
            }
        }
    }

    fn place_guide(&mut self, guide: SceneObject) {
        let index = usize::from(self.background().is_some());
        self.objects.insert(index, guide);
    }

    /// Removes every object of `kind` and returns the first one.
    fn remove_all_of_kind(&mut self, kind: ObjectKind) -> Option<SceneObject> {
        let mut first = None;
        let mut i = 0;
        while i < self.objects.len() {
            if self.objects[i].kind() == kind {
                let removed = self.objects.remove(i);
                if first.is_none() {
                    first = Some(removed);
                } else {
                    tracing::debug!("Dropped duplicate {} {}", kind.as_str(), removed.id);
                }
            } else {
                i += 1;
            }
        }
        first
    }

    /// Restores the background, guide, content stacking.
    pub fn enforce_system_order(&mut self) {
        let rank = |o: &SceneObject| match o.kind() {
            ObjectKind::MockupBackground => 0,
            ObjectKind::PrintGuide => 1,
            _ => 2,
        };
        // stable sort keeps the relative order of user content
        self.objects.sort_by_key(rank);
    }

    /// Moves a user object one step up (`up`) or down in the paint order,
    /// staying above the system layer.
    pub fn restack(&mut self, id: ObjectId, up: bool) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if self.objects[index].is_system() {
            return false;
        }
        let floor = self.system_count();
        let target = if up {
            index + 1
        } else {
            match index.checked_sub(1) {
                Some(t) => t,
                None => return false,
            }
        };
        if target < floor || target >= self.objects.len() {
            return false;
        }
        self.objects.swap(index, target);
        true
    }
}
