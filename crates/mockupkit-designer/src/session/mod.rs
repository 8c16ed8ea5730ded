//! Editor session: owner of the live scene and the per-side snapshots.
//!
//! A session edits one side of one product at a time. Every operation
//! works on the session's own scene handle; nothing is reached through
//! globals. The session is split into submodules:
//! - `sides`: side switching, snapshot map, canvas resize
//! - `objects`: inserting, deleting, transforming and stacking content
//! - `text`: text styling and font changes
//! - `assets`: mockup and upload loading with stale-load protection
//! - `file_io`: design documents

mod assets;
mod file_io;
mod objects;
mod sides;
mod text;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use mockupkit_core::{
    constants, AppEvent, CatalogError, Debouncer, EventBus, Generation, HistoryError,
    HistoryEvent, ObjectId, ObjectKind, PrintDimensions, Product, SceneEvent,
};
use serde::Serialize;

use crate::clip::{compute_clip_rect, reapply_clips};
use crate::history::HistoryManager;
use crate::identity::IdentityParams;
use crate::model::{ClipRect, Point, Size, TextContent};
use crate::projection::ProjectionParams;
use crate::scene::Scene;
use crate::serialization::{restore_snapshot, serialize_scene, SceneSnapshot};
use crate::viewport::Viewport;

/// Tunables of an editing session.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorOptions {
    pub history_depth: usize,
    pub change_debounce: Duration,
    pub font_load_timeout: Duration,
    pub fallback_font: String,
    pub duplicate_offset: f64,
    /// Template for newly inserted text.
    pub default_text: TextContent,
    pub upload_max_dimension: f64,
    pub upload_target_dimension: f64,
    pub projection: ProjectionParams,
    pub identity: IdentityParams,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            history_depth: constants::HISTORY_DEPTH,
            change_debounce: constants::CHANGE_DEBOUNCE,
            font_load_timeout: constants::FONT_LOAD_TIMEOUT,
            fallback_font: constants::FALLBACK_FONT.to_string(),
            duplicate_offset: constants::DUPLICATE_OFFSET,
            default_text: TextContent::default(),
            upload_max_dimension: constants::UPLOAD_MAX_DIMENSION,
            upload_target_dimension: constants::UPLOAD_TARGET_DIMENSION,
            projection: ProjectionParams::default(),
            identity: IdentityParams::default(),
        }
    }
}

/// Edge or center of the print area to snap an object to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    CenterX,
    Right,
    Top,
    CenterY,
    Bottom,
}

/// One row of the layer panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerInfo {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub label: String,
    pub visible: bool,
    pub selected: bool,
}

/// Editing state of one product customization.
pub struct EditorSession {
    product: Product,
    active_side: String,
    print_dims: PrintDimensions,
    scene: Scene,
    snapshots: BTreeMap<String, Option<SceneSnapshot>>,
    history: HistoryManager<SceneSnapshot>,
    viewport: Viewport,
    selection: Option<ObjectId>,
    pan_mode: bool,
    interacting: bool,
    options: EditorOptions,
    generation: Generation,
    debouncer: Debouncer,
    bus: Arc<EventBus>,
    design_name: String,
    current_file_path: Option<PathBuf>,
    is_modified: bool,
}

impl EditorSession {
    /// Opens `product` on `side_key` with an empty scene of `canvas` size.
    pub fn new(
        product: Product,
        side_key: &str,
        canvas: Size,
        options: EditorOptions,
        bus: Arc<EventBus>,
    ) -> Result<Self, CatalogError> {
        let print_dims = product.side(side_key)?.print_dimensions;
        let snapshots = product
            .sides
            .iter()
            .map(|side| (side.key.clone(), None))
            .collect();

        let mut scene = Scene::new(canvas.width, canvas.height);
        scene.ensure_print_guide(&print_dims);

        let debouncer = change_notifier(&bus, side_key, options.change_debounce);
        let history = HistoryManager::with_depth(SceneSnapshot::default(), options.history_depth);

        let mut session = Self {
            design_name: product.name.clone(),
            product,
            active_side: side_key.to_string(),
            print_dims,
            scene,
            snapshots,
            history,
            viewport: Viewport::new(canvas.width, canvas.height),
            selection: None,
            pan_mode: false,
            interacting: false,
            options,
            generation: Generation::new(),
            debouncer,
            bus,
            current_file_path: None,
            is_modified: false,
        };
        session.reset_history();
        tracing::info!(
            "Editor session opened for {} on {}",
            session.product.id,
            session.active_side
        );
        Ok(session)
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn active_side(&self) -> &str {
        &self.active_side
    }

    pub fn print_dimensions(&self) -> PrintDimensions {
        self.print_dims
    }

    /// Current print rectangle of the active side.
    pub fn print_rect(&self) -> ClipRect {
        compute_clip_rect(self.scene.size(), &self.print_dims)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn selection(&self) -> Option<ObjectId> {
        self.selection
    }

    pub fn history(&self) -> &HistoryManager<SceneSnapshot> {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Whether a change notification is waiting for its quiet window.
    pub fn has_pending_change(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Emits a pending change notification right away.
    pub fn flush_changes(&self) -> bool {
        self.debouncer.flush()
    }

    pub fn is_disposed(&self) -> bool {
        !self.generation.is_alive()
    }

    pub fn is_pan_mode(&self) -> bool {
        self.pan_mode
    }

    /// Locks content edits while the user pans the canvas.
    ///
    /// Only the session lock changes; object flags stay as they are.
    pub fn set_pan_mode(&mut self, enabled: bool) {
        if self.pan_mode != enabled {
            tracing::debug!("Pan mode {}", if enabled { "on" } else { "off" });
        }
        self.pan_mode = enabled;
        if enabled {
            // close an open drag burst as its own entry
            self.end_interaction();
        }
    }

    /// Tears the session down.
    ///
    /// Outstanding load tickets go stale, the pending change notification
    /// is dropped and every later mutation is a no-op.
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.generation.shutdown();
        self.debouncer.cancel();
        self.selection = None;
        self.interacting = false;
        tracing::info!("Editor session for {} disposed", self.product.id);
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn zoom_in(&mut self) -> bool {
        self.viewport.zoom_in()
    }

    pub fn zoom_out(&mut self) -> bool {
        self.viewport.zoom_out()
    }

    pub fn set_zoom_percent(&mut self, percent: u32) {
        self.viewport.set_zoom_percent(percent);
    }

    pub fn zoom_by_wheel(&mut self, delta: f64, cursor: Point) {
        self.viewport.zoom_by_wheel(delta, cursor);
    }

    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        self.viewport.screen_to_canvas(screen)
    }

    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        self.viewport.canvas_to_screen(canvas)
    }

    /// Step back to the previous history entry.
    ///
    /// Returns `Ok(false)` when there is nothing to undo. A failed restore
    /// leaves both the scene and the history untouched.
    pub fn undo(&mut self) -> Result<bool, HistoryError> {
        if self.is_disposed() {
            return Ok(false);
        }
        let scene = &mut self.scene;
        let identity = &self.options.identity;
        let restored = self
            .history
            .undo(|snapshot| restore_snapshot(scene, snapshot, identity).map(|_| ()))
            .inspect_err(|e| tracing::warn!("Undo failed: {}", e))?;
        if restored {
            self.after_restore();
        }
        Ok(restored)
    }

    /// Re-apply the next history entry.
    pub fn redo(&mut self) -> Result<bool, HistoryError> {
        if self.is_disposed() {
            return Ok(false);
        }
        let scene = &mut self.scene;
        let identity = &self.options.identity;
        let restored = self
            .history
            .redo(|snapshot| restore_snapshot(scene, snapshot, identity).map(|_| ()))
            .inspect_err(|e| tracing::warn!("Redo failed: {}", e))?;
        if restored {
            self.after_restore();
        }
        Ok(restored)
    }

    fn after_restore(&mut self) {
        self.reapply_clips();
        // restored objects get fresh ids
        self.selection = None;
        self.is_modified = true;
        self.debouncer.trigger();
        self.emit_history_state();
        self.emit(AppEvent::Scene(SceneEvent::LayersChanged {
            count: self.scene.user_count(),
        }));
    }

    /// Portable form of the live scene.
    pub fn serialize(&self) -> SceneSnapshot {
        serialize_scene(&self.scene, &self.options.identity)
    }

    /// Refuses mutations after teardown and while panning.
    fn can_mutate(&self, operation: &str) -> bool {
        if self.is_disposed() {
            tracing::debug!("Ignoring {} on a disposed session", operation);
            return false;
        }
        if self.pan_mode {
            tracing::debug!("Ignoring {} in pan mode", operation);
            return false;
        }
        true
    }

    fn reapply_clips(&mut self) -> usize {
        let size = self.scene.size();
        reapply_clips(self.scene.objects_mut(), size, &self.print_dims)
    }

    /// Bookkeeping after a discrete edit.
    ///
    /// During a drag burst only the notification is scheduled; the history
    /// entry is written once the interaction ends.
    fn commit(&mut self) {
        self.reapply_clips();
        self.is_modified = true;
        self.debouncer.trigger();
        if !self.interacting {
            self.record_history();
        }
    }

    fn record_history(&mut self) {
        let snapshot = self.serialize();
        if self.history.record(snapshot) {
            self.emit_history_state();
        }
    }

    /// Starts a fresh history whose first undo target is the current scene.
    fn reset_history(&mut self) {
        self.history.reset(SceneSnapshot::default());
        let initial = self.serialize();
        self.history.record(initial);
        self.emit_history_state();
    }

    fn emit(&self, event: AppEvent) {
        self.bus.notify(event);
    }

    fn emit_history_state(&self) {
        self.emit(AppEvent::History(HistoryEvent::StateChanged {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        }));
    }
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("product", &self.product.id)
            .field("active_side", &self.active_side)
            .field("objects", &self.scene.len())
            .field("history", &self.history.len())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Debounced `CanvasChanged` publisher for one side.
fn change_notifier(bus: &Arc<EventBus>, side: &str, delay: Duration) -> Debouncer {
    let bus = Arc::clone(bus);
    let side = side.to_string();
    Debouncer::new(delay, move || {
        bus.notify(AppEvent::Scene(SceneEvent::CanvasChanged { side: side.clone() }));
    })
}
