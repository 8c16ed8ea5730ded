//! Mockup and upload loading.
//!
//! Loads run in two steps: a [`LoadTicket`] is taken before the await and
//! checked afterwards, so a result that arrives after a side switch or
//! teardown is dropped instead of touching the scene.

use mockupkit_core::{
    AppEvent, AssetError, AssetEvent, AssetLoader, Error, LoadTicket, LoadedImage, ObjectId,
};

use super::EditorSession;
use crate::model::{BackgroundContent, ObjectContent};

impl EditorSession {
    /// Ticket for a mockup load on the active side.
    pub fn begin_mockup_load(&self) -> LoadTicket {
        self.generation.begin(self.active_side.clone())
    }

    /// Mockup photo configured for the active side.
    pub fn mockup_ref(&self) -> Option<&str> {
        self.product.mockup_for(&self.active_side)
    }

    /// Installs the mockup photo once its size is known.
    ///
    /// Applied only while `ticket` is current. An existing background is
    /// replaced in place, never duplicated.
    pub fn complete_mockup_load(
        &mut self,
        ticket: &LoadTicket,
        image_ref: &str,
        natural_width: f64,
        natural_height: f64,
    ) -> Result<ObjectId, AssetError> {
        self.check_ticket(ticket)?;
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(natural_width) || !valid(natural_height) {
            return Err(AssetError::DecodeFailed {
                source_ref: image_ref.to_string(),
                reason: format!("invalid size {}x{}", natural_width, natural_height),
            });
        }

        let transform = self.background_transform(natural_height);
        let id = self.scene.set_background(
            BackgroundContent {
                source_ref: image_ref.to_string(),
                natural_width,
                natural_height,
            },
            transform,
        );
        self.scene.ensure_print_guide(&self.print_dims);
        self.scene.enforce_system_order();

        tracing::debug!("Mockup {} placed on {} as {}", image_ref, self.active_side, id);
        self.emit(AppEvent::Asset(AssetEvent::MockupLoaded {
            side: self.active_side.clone(),
            source: image_ref.to_string(),
        }));
        Ok(id)
    }

    /// Loads and installs the active side's mockup.
    ///
    /// Returns `Ok(None)` when the side has no mockup configured or the
    /// load went stale while fetching.
    pub async fn load_mockup(&mut self, loader: &dyn AssetLoader) -> Result<Option<ObjectId>, Error> {
        let Some(image_ref) = self.mockup_ref().map(str::to_string) else {
            tracing::debug!("No mockup configured for {}", self.active_side);
            return Ok(None);
        };
        let ticket = self.begin_mockup_load();
        let image = self.fetch(loader, &image_ref).await?;
        match self.complete_mockup_load(
            &ticket,
            &image_ref,
            f64::from(image.width),
            f64::from(image.height),
        ) {
            Ok(id) => Ok(Some(id)),
            Err(AssetError::Stale { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Loads an uploaded image and inserts it at the print-area center.
    ///
    /// Returns `Ok(None)` if the load went stale or the session refused
    /// the insert.
    pub async fn load_image_from(
        &mut self,
        loader: &dyn AssetLoader,
        source_ref: &str,
    ) -> Result<Option<ObjectId>, Error> {
        let ticket = self.generation.begin(self.active_side.clone());
        let image = self.fetch(loader, source_ref).await?;
        if self.check_ticket(&ticket).is_err() {
            return Ok(None);
        }
        Ok(self.add_image(source_ref, f64::from(image.width), f64::from(image.height)))
    }

    /// Reference of the current mockup background, if one is placed.
    pub fn background_ref(&self) -> Option<&str> {
        match &self.scene.background()?.content {
            ObjectContent::MockupBackground(bg) => Some(bg.source_ref.as_str()),
            _ => None,
        }
    }

    pub(super) fn background_content(&self) -> Option<BackgroundContent> {
        match &self.scene.background()?.content {
            ObjectContent::MockupBackground(bg) => Some(bg.clone()),
            _ => None,
        }
    }

    async fn fetch(
        &self,
        loader: &dyn AssetLoader,
        source_ref: &str,
    ) -> Result<LoadedImage, AssetError> {
        loader.load_image(source_ref).await.inspect_err(|e| {
            tracing::warn!("Asset load failed: {}", e);
            self.emit(AppEvent::Asset(AssetEvent::LoadFailed {
                source: source_ref.to_string(),
                reason: e.to_string(),
            }));
        })
    }

    /// Rejects a continuation whose scene context is gone.
    pub(super) fn check_ticket(&self, ticket: &LoadTicket) -> Result<(), AssetError> {
        if self.generation.is_current(ticket, &self.active_side) {
            return Ok(());
        }
        tracing::debug!(
            "Discarding stale load for {} (generation {})",
            ticket.side_key(),
            ticket.generation()
        );
        if !self.is_disposed() {
            self.emit(AppEvent::Asset(AssetEvent::StaleLoadDiscarded {
                side: ticket.side_key().to_string(),
                generation: ticket.generation(),
            }));
        }
        Err(AssetError::Stale {
            side_key: ticket.side_key().to_string(),
            generation: ticket.generation(),
        })
    }
}
