//! Design documents: save, load, new.

use std::path::{Path, PathBuf};

use anyhow::bail;
use mockupkit_core::{AppEvent, SceneEvent, SideEvent};

use super::EditorSession;
use crate::serialization::DesignDocument;

impl EditorSession {
    /// Bundles every side into a design document.
    pub fn to_document(&self) -> DesignDocument {
        DesignDocument::new(&self.design_name, &self.product.id, &self.active_side)
            .with_sides(self.snapshots())
    }

    /// Replaces all sides with the document's content.
    ///
    /// Sides the product does not know are skipped. The document's active
    /// side is opened when it exists, otherwise the product's first side.
    pub fn apply_document(&mut self, document: &DesignDocument) -> anyhow::Result<()> {
        if self.is_disposed() {
            bail!("Session is disposed");
        }
        document.check_version()?;
        if document.metadata.product_id != self.product.id {
            bail!(
                "Design is for product {}, session edits {}",
                document.metadata.product_id,
                self.product.id
            );
        }

        for key in self.snapshots.keys().cloned().collect::<Vec<_>>() {
            let stored = document.sides.get(&key).cloned().flatten();
            self.snapshots.insert(key, stored);
        }
        for key in document.sides.keys().filter(|k| !self.snapshots.contains_key(*k)) {
            tracing::warn!("Ignoring unknown side {} in design", key);
        }

        let target = match self.product.side(&document.active_side) {
            Ok(side) => side.key.clone(),
            Err(_) => self.product.first_side()?.key.clone(),
        };
        let generation = self.generation.invalidate();
        self.debouncer.cancel();
        self.interacting = false;
        self.selection = None;
        if target != self.active_side {
            let from = std::mem::replace(&mut self.active_side, target.clone());
            self.print_dims = self.product.side(&target)?.print_dimensions;
            self.debouncer =
                super::change_notifier(&self.bus, &target, self.options.change_debounce);
            self.scene.remove_background();
            self.emit(AppEvent::Side(SideEvent::Switched { from, to: target }));
        }
        self.load_active_side();
        self.reset_history();
        self.design_name = document.metadata.name.clone();
        self.is_modified = false;

        tracing::debug!("Applied design {:?} (generation {})", self.design_name, generation);
        self.emit(AppEvent::Scene(SceneEvent::LayersChanged {
            count: self.scene.user_count(),
        }));
        Ok(())
    }

    /// Save design to file.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let mut document = self.to_document();
        document.save_to_file(&path)?;
        self.current_file_path = Some(path.as_ref().to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    /// Load design from file.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let document = DesignDocument::load_from_file(&path)?;
        self.apply_document(&document)?;
        self.current_file_path = Some(path.as_ref().to_path_buf());
        Ok(())
    }

    /// Clears every side and starts an untitled design.
    pub fn new_design(&mut self) {
        if self.is_disposed() {
            return;
        }
        for stored in self.snapshots.values_mut() {
            *stored = None;
        }
        self.selection = None;
        self.interacting = false;
        self.load_active_side();
        self.reset_history();
        self.design_name = self.product.name.clone();
        self.current_file_path = None;
        self.is_modified = false;
        self.emit(AppEvent::Scene(SceneEvent::LayersChanged { count: 0 }));
    }

    pub fn design_name(&self) -> &str {
        &self.design_name
    }

    pub fn set_design_name(&mut self, name: impl Into<String>) {
        self.design_name = name.into();
        self.is_modified = true;
    }

    pub fn current_file_path(&self) -> Option<&PathBuf> {
        self.current_file_path.as_ref()
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    /// Title with the file name and a modified marker.
    pub fn display_name(&self) -> String {
        let name = self
            .current_file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or(&self.design_name);
        if self.is_modified {
            format!("{}*", name)
        } else {
            name.to_string()
        }
    }
}
