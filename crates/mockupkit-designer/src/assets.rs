//! File-system asset loading and the decoded image cache.

use async_trait::async_trait;
use mockupkit_core::{AssetError, AssetLoader, LoadedImage};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Loads images relative to a root directory.
///
/// References may be plain relative paths or URL-like paths with a
/// leading slash; both resolve under `root`.
#[derive(Debug, Clone)]
pub struct FsAssetLoader {
    root: PathBuf,
}

impl FsAssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, source_ref: &str) -> PathBuf {
        let trimmed = source_ref
            .split(['?', '#'])
            .next()
            .unwrap_or(source_ref)
            .trim_start_matches('/');
        self.root.join(trimmed)
    }
}

/// Decode encoded image bytes into RGBA8.
pub fn decode_image(source_ref: &str, bytes: &[u8]) -> Result<LoadedImage, AssetError> {
    let decoded = image::load_from_memory(bytes).map_err(|e| AssetError::DecodeFailed {
        source_ref: source_ref.to_string(),
        reason: e.to_string(),
    })?;
    let rgba = decoded.to_rgba8();
    Ok(LoadedImage {
        source_ref: source_ref.to_string(),
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

#[async_trait]
impl AssetLoader for FsAssetLoader {
    async fn load_image(&self, source_ref: &str) -> Result<LoadedImage, AssetError> {
        let path = self.resolve(source_ref);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| AssetError::FetchFailed {
                source_ref: source_ref.to_string(),
                reason: format!("{}: {}", path.display(), e),
            })?;
        let owned_ref = source_ref.to_string();
        tokio::task::spawn_blocking(move || decode_image(&owned_ref, &bytes))
            .await
            .map_err(|e| AssetError::DecodeFailed {
                source_ref: source_ref.to_string(),
                reason: e.to_string(),
            })?
    }
}

/// Decoded images keyed by source reference.
#[derive(Debug, Default, Clone)]
pub struct ImageStore {
    images: HashMap<String, LoadedImage>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, image: LoadedImage) {
        self.images.insert(image.source_ref.clone(), image);
    }

    pub fn get(&self, source_ref: &str) -> Option<&LoadedImage> {
        self.images.get(source_ref)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Load every reference not cached yet. Failures are logged and skipped.
    pub async fn preload<'a, I>(&mut self, loader: &dyn AssetLoader, refs: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut loaded = 0;
        for source_ref in refs {
            if source_ref.is_empty() || self.images.contains_key(source_ref) {
                continue;
            }
            match loader.load_image(source_ref).await {
                Ok(image) => {
                    self.insert(image);
                    loaded += 1;
                }
                Err(e) => tracing::warn!("Skipping asset: {}", e),
            }
        }
        loaded
    }
}
