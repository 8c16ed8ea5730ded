#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use mockupkit_core::{
    AppEvent, AssetError, AssetLoader, EventBus, EventFilter, FontProvider, LoadedImage,
    ProductCatalog, SceneEvent,
};
use mockupkit_designer::{EditorOptions, EditorSession, Size};

pub const CANVAS: Size = Size {
    width: 800.0,
    height: 600.0,
};

pub fn hoodie_session() -> EditorSession {
    session_with(EditorOptions::default())
}

pub fn session_with(options: EditorOptions) -> EditorSession {
    let product = ProductCatalog::builtin()
        .get("hoodie-heavy-blend")
        .unwrap()
        .clone();
    EditorSession::new(product, "front", CANVAS, options, Arc::new(EventBus::new())).unwrap()
}

/// Counts `CanvasChanged` notifications on the session's bus.
pub fn count_canvas_changes(session: &EditorSession) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&count);
    session.bus().subscribe(EventFilter::All, move |event| {
        if let AppEvent::Scene(SceneEvent::CanvasChanged { .. }) = event {
            seen.fetch_add(1, Ordering::SeqCst);
        }
    });
    count
}

/// Collects every event published on the session's bus.
pub fn record_events(session: &EditorSession) -> Arc<Mutex<Vec<AppEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    session
        .bus()
        .subscribe(EventFilter::All, move |event| sink.lock().unwrap().push(event));
    events
}

/// Serves fixed image sizes, optionally after a delay.
#[derive(Default)]
pub struct FakeLoader {
    pub sizes: HashMap<String, (u32, u32)>,
    pub delay: Duration,
}

impl FakeLoader {
    pub fn with(mut self, source_ref: &str, width: u32, height: u32) -> Self {
        self.sizes.insert(source_ref.to_string(), (width, height));
        self
    }
}

#[async_trait]
impl AssetLoader for FakeLoader {
    async fn load_image(&self, source_ref: &str) -> Result<LoadedImage, AssetError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.sizes.get(source_ref) {
            Some((w, h)) => Ok(LoadedImage::dimensions_only(source_ref, *w, *h)),
            None => Err(AssetError::FetchFailed {
                source_ref: source_ref.to_string(),
                reason: "not found".to_string(),
            }),
        }
    }
}

/// Reports fonts ready after a fixed delay.
pub struct SlowFonts(pub Duration);

#[async_trait]
impl FontProvider for SlowFonts {
    async fn ensure_ready(&self, _family: &str, _weight: u16, _italic: bool) -> Result<(), AssetError> {
        tokio::time::sleep(self.0).await;
        Ok(())
    }
}

/// Knows no font at all.
pub struct NoFonts;

#[async_trait]
impl FontProvider for NoFonts {
    async fn ensure_ready(&self, family: &str, _weight: u16, _italic: bool) -> Result<(), AssetError> {
        Err(AssetError::FontUnavailable {
            family: family.to_string(),
        })
    }
}
