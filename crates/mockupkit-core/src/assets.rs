//! Asset collaborator traits.
//!
//! The editor core never fetches or decodes anything itself. Hosts plug in
//! an [`AssetLoader`] for bitmaps and vector sources, and a [`FontProvider`]
//! that reports when a font family is ready to use.

use crate::error::AssetError;
use async_trait::async_trait;

/// Decoded bitmap handed to the editor
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    /// Reference the image was loaded from.
    pub source_ref: String,
    /// Intrinsic pixel width.
    pub width: u32,
    /// Intrinsic pixel height.
    pub height: u32,
    /// Straight RGBA8 pixels, row-major. May be empty when only the
    /// geometry is needed.
    pub rgba: Vec<u8>,
}

impl LoadedImage {
    /// Geometry-only image
    pub fn dimensions_only(source_ref: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            source_ref: source_ref.into(),
            width,
            height,
            rgba: Vec::new(),
        }
    }

    /// Whether pixel data is attached
    pub fn has_pixels(&self) -> bool {
        self.rgba.len() == (self.width as usize) * (self.height as usize) * 4
            && !self.rgba.is_empty()
    }
}

/// Fetches and decodes image assets
#[async_trait]
pub trait AssetLoader: Send + Sync {
    /// Load the image behind `source_ref`
    async fn load_image(&self, source_ref: &str) -> Result<LoadedImage, AssetError>;
}

/// Reports font readiness
#[async_trait]
pub trait FontProvider: Send + Sync {
    /// Resolve once `family` can be used for layout
    async fn ensure_ready(&self, family: &str, weight: u16, italic: bool)
        -> Result<(), AssetError>;
}
