//! Preview composition.
//!
//! A preview shows one side's content on a product photo at thumbnail or
//! large size. Composition picks the side through the product's preview
//! rules, places the photo and projects the side's snapshot onto the
//! preview's print area.

use std::collections::BTreeMap;

use mockupkit_core::{
    constants, AppEvent, CatalogError, PreviewEvent, PreviewPrintArea, Product,
};
use serde::Serialize;

use crate::model::{GraphicSource, ObjectContent, Size, Transform2D, VectorContent};
use crate::projection::{project, ProjectionParams, RenderInstruction};
use crate::serialization::SceneSnapshot;
use crate::session::EditorSession;

/// Product photo of a preview, centered on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundPlacement {
    pub source_ref: String,
    pub transform: Transform2D,
    /// Known only once the photo was decoded; the rasterizer fits the
    /// photo itself otherwise.
    pub natural_size: Option<Size>,
    /// Share of the canvas the photo's longer edge covers.
    pub fill_ratio: f64,
}

impl BackgroundPlacement {
    /// Centers a photo on a square canvas and fits its longer edge.
    pub fn fit(source_ref: &str, canvas_size: f64, natural: Option<Size>, fill_ratio: f64) -> Self {
        let scale = natural
            .map(|n| n.width.max(n.height))
            .filter(|edge| edge.is_finite() && *edge > 0.0)
            .map_or(1.0, |edge| canvas_size * fill_ratio / edge);
        Self {
            source_ref: source_ref.to_string(),
            transform: Transform2D::at(canvas_size / 2.0, canvas_size / 2.0)
                .with_scale(scale, scale),
            natural_size: natural,
            fill_ratio,
        }
    }
}

/// Everything needed to paint one preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewScene {
    pub preview_key: String,
    pub size: f64,
    /// Side whose content was projected, if any side had content.
    pub side_key: Option<String>,
    pub background: Option<BackgroundPlacement>,
    pub print_area: Option<PreviewPrintArea>,
    pub objects: Vec<RenderInstruction>,
}

impl PreviewScene {
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Image references the rasterizer will look up, photo first.
    pub fn asset_refs(&self) -> Vec<&str> {
        let objects = self.objects.iter().filter_map(|i| match &i.content {
            ObjectContent::Image(image) => Some(image.source_ref.as_str()),
            ObjectContent::VectorGraphic(VectorContent {
                source: GraphicSource::Source(source),
                ..
            }) => Some(source.as_str()),
            _ => None,
        });
        let mut refs: Vec<&str> = self
            .background
            .iter()
            .map(|b| b.source_ref.as_str())
            .chain(objects)
            .collect();
        refs.dedup();
        refs
    }
}

/// Which preview to build and at what size.
#[derive(Debug, Clone)]
pub struct PreviewRequest<'a> {
    pub product: &'a Product,
    pub preview_key: String,
    pub size: f64,
    /// Natural size of the preview photo, when already known.
    pub background_size: Option<Size>,
}

impl<'a> PreviewRequest<'a> {
    pub fn new(product: &'a Product, preview_key: impl Into<String>) -> Self {
        Self {
            product,
            preview_key: preview_key.into(),
            size: f64::from(constants::LARGE_PREVIEW_SIZE),
            background_size: None,
        }
    }

    pub fn thumbnail(product: &'a Product, preview_key: impl Into<String>) -> Self {
        Self::new(product, preview_key).with_size(f64::from(constants::THUMBNAIL_PREVIEW_SIZE))
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_background_size(mut self, natural: Size) -> Self {
        self.background_size = Some(natural);
        self
    }

    /// Builds the preview from the per-side snapshot map.
    pub fn compose(
        &self,
        snapshots: &BTreeMap<String, Option<SceneSnapshot>>,
        params: &ProjectionParams,
    ) -> Result<PreviewScene, CatalogError> {
        let definition = self.product.preview(&self.preview_key)?;
        let stored = |key: &str| snapshots.get(key).is_some_and(Option::is_some);
        let side_key = self
            .product
            .side_for_preview(&self.preview_key, stored)
            .map(str::to_string);

        let print_area = definition.print_area.unwrap_or_default();
        let objects = side_key
            .as_deref()
            .and_then(|key| snapshots.get(key))
            .and_then(Option::as_ref)
            .map(|snapshot| project(snapshot, self.size, &print_area, params))
            .unwrap_or_default();

        let background = (!definition.mockup_image_ref.is_empty()).then(|| {
            BackgroundPlacement::fit(
                &definition.mockup_image_ref,
                self.size,
                self.background_size,
                params.preview_fill_ratio,
            )
        });

        tracing::debug!(
            "Composed preview {} from {:?} with {} objects",
            self.preview_key,
            side_key,
            objects.len()
        );
        Ok(PreviewScene {
            preview_key: self.preview_key.clone(),
            size: self.size,
            side_key,
            background,
            print_area: definition.print_area,
            objects,
        })
    }
}

impl EditorSession {
    /// Composes a preview from the session's current content.
    pub fn render_preview(&self, preview_key: &str, size: f64) -> Result<PreviewScene, CatalogError> {
        let scene = PreviewRequest::new(self.product(), preview_key)
            .with_size(size)
            .compose(&self.snapshots(), &self.options().projection)?;
        self.bus().notify(AppEvent::Preview(PreviewEvent::Rendered {
            preview_key: preview_key.to_string(),
            size: size.max(0.0).round() as u32,
        }));
        Ok(scene)
    }
}
