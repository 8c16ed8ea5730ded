//! Product catalog data
//!
//! This module provides:
//! - Print geometry per product side
//! - Mockup image references per side
//! - Preview definitions (lifestyle/thumbnail placements)
//! - The built-in product library
//!
//! The catalog is read-only configuration for the editor.

pub mod products;

use crate::error::{CatalogError, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Printable rectangle of a side, relative to the canvas center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintDimensions {
    /// Print area width in canvas pixels.
    pub width: f64,
    /// Print area height in canvas pixels.
    pub height: f64,
    /// Horizontal shift of the print area center from the canvas center.
    #[serde(default)]
    pub left_offset: f64,
    /// Vertical shift of the print area center from the canvas center.
    #[serde(default)]
    pub top_offset: f64,
}

impl PrintDimensions {
    /// Create centered print dimensions
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            left_offset: 0.0,
            top_offset: 0.0,
        }
    }

    /// Set the offsets
    pub fn with_offset(mut self, left_offset: f64, top_offset: f64) -> Self {
        self.left_offset = left_offset;
        self.top_offset = top_offset;
        self
    }
}

/// A named placement zone of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Side {
    /// Stable key (`front`, `back`, `sleeveLeft`, ...).
    pub key: String,
    /// Human readable label.
    #[serde(default)]
    pub label: String,
    /// Print geometry in editor canvas space.
    pub print_dimensions: PrintDimensions,
}

/// Placement of side content on a preview mockup.
///
/// Offsets are authored against a 600px preview canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PreviewPrintArea {
    /// Horizontal offset of the content center.
    #[serde(default)]
    pub left_offset: f64,
    /// Vertical offset of the content center.
    #[serde(default)]
    pub top_offset: f64,
    /// Rotation applied to the whole content, in degrees.
    #[serde(default, alias = "rotationDegrees")]
    pub rotation: f64,
    /// Explicit content width; overrides the default scale law.
    #[serde(default)]
    pub width: Option<f64>,
}

/// Maps a preview to the side supplying its content and its geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PreviewEntry")]
pub struct PreviewDefinition {
    /// Human readable label.
    pub label: String,
    /// Photo the content is composited onto.
    pub mockup_image_ref: String,
    /// Side whose snapshot supplies content, when not derivable from the key.
    pub uses_side_key: Option<String>,
    /// Placement geometry, when different from the plain centered default.
    pub print_area: Option<PreviewPrintArea>,
}

impl PreviewDefinition {
    /// Create a preview definition that only names its photo
    pub fn new(label: impl Into<String>, mockup_image_ref: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            mockup_image_ref: mockup_image_ref.into(),
            uses_side_key: None,
            print_area: None,
        }
    }

    /// Set the side that supplies content
    pub fn with_side(mut self, side_key: impl Into<String>) -> Self {
        self.uses_side_key = Some(side_key.into());
        self
    }

    /// Set the placement geometry
    pub fn with_print_area(mut self, print_area: PreviewPrintArea) -> Self {
        self.print_area = Some(print_area);
        self
    }
}

/// Catalog files may list a preview as a bare image reference.
#[derive(Deserialize)]
#[serde(untagged)]
enum PreviewEntry {
    Ref(String),
    #[serde(rename_all = "camelCase")]
    Full {
        #[serde(default)]
        label: String,
        #[serde(alias = "image", alias = "url")]
        mockup_image_ref: String,
        #[serde(default)]
        uses_side_key: Option<String>,
        #[serde(default)]
        print_area: Option<PreviewPrintArea>,
    },
}

impl From<PreviewEntry> for PreviewDefinition {
    fn from(entry: PreviewEntry) -> Self {
        match entry {
            PreviewEntry::Ref(mockup_image_ref) => Self::new(String::new(), mockup_image_ref),
            PreviewEntry::Full {
                label,
                mockup_image_ref,
                uses_side_key,
                print_area,
            } => Self {
                label,
                mockup_image_ref,
                uses_side_key,
                print_area,
            },
        }
    }
}

/// A customizable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog id.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Placement zones in tab order.
    pub sides: Vec<Side>,
    /// Editor mockup photo per side key.
    #[serde(default)]
    pub mockups: BTreeMap<String, String>,
    /// Preview definitions per preview key.
    #[serde(default)]
    pub preview_mockups: BTreeMap<String, PreviewDefinition>,
}

impl Product {
    /// Look up a side by key
    pub fn side(&self, key: &str) -> std::result::Result<&Side, CatalogError> {
        self.sides
            .iter()
            .find(|s| s.key == key)
            .ok_or_else(|| CatalogError::UnknownSide {
                product: self.id.clone(),
                side: key.to_string(),
            })
    }

    /// The side the editor opens on
    pub fn first_side(&self) -> std::result::Result<&Side, CatalogError> {
        self.sides.first().ok_or_else(|| CatalogError::NoSides {
            product: self.id.clone(),
        })
    }

    /// Editor mockup photo of a side
    pub fn mockup_for(&self, side_key: &str) -> Option<&str> {
        self.mockups.get(side_key).map(String::as_str)
    }

    /// Look up a preview by key
    pub fn preview(&self, key: &str) -> std::result::Result<&PreviewDefinition, CatalogError> {
        self.preview_mockups
            .get(key)
            .ok_or_else(|| CatalogError::UnknownPreview {
                product: self.id.clone(),
                preview: key.to_string(),
            })
    }

    /// Decide which side supplies the content of a preview
    ///
    /// `has_content` reports whether a side currently has a stored snapshot.
    /// Resolution order: explicit `uses_side_key`, the exact key, then
    /// name-based fallbacks (back, sleeves), then front or mug, then any
    /// side with content.
    pub fn side_for_preview<F>(&self, preview_key: &str, has_content: F) -> Option<&str>
    where
        F: Fn(&str) -> bool,
    {
        let known = |key: &str| self.sides.iter().find(|s| s.key == key).map(|s| s.key.as_str());
        let stored = |key: &str| known(key).filter(|k| has_content(k));

        if let Some(side) = self
            .preview_mockups
            .get(preview_key)
            .and_then(|p| p.uses_side_key.as_deref())
            .and_then(known)
        {
            return Some(side);
        }

        if let Some(side) = stored(preview_key) {
            return Some(side);
        }

        let lower = preview_key.to_lowercase();
        if lower.contains("back") {
            return stored("back").or_else(|| stored("front"));
        }
        if lower.contains("sleeve") {
            return if lower.contains("left") {
                stored("sleeveLeft")
            } else {
                stored("sleeveRight")
            };
        }

        stored("front")
            .or_else(|| stored("mug"))
            .or_else(|| self.sides.iter().map(|s| s.key.as_str()).find(|k| has_content(k)))
    }
}

/// Product library
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCatalog {
    /// Products in display order
    products: Vec<Product>,
}

impl ProductCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the built-in products
    pub fn builtin() -> Self {
        Self {
            products: products::builtin_products(),
        }
    }

    /// Load a catalog from a JSON file
    ///
    /// Accepts either `{"products": [...]}` or a bare product array.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a catalog from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum CatalogFile {
            Wrapped { products: Vec<Product> },
            Bare(Vec<Product>),
        }

        let products = match serde_json::from_str::<CatalogFile>(content)? {
            CatalogFile::Wrapped { products } | CatalogFile::Bare(products) => products,
        };
        if let Some(empty) = products.iter().find(|p| p.sides.is_empty()) {
            return Err(Error::from(CatalogError::NoSides {
                product: empty.id.clone(),
            }));
        }
        tracing::debug!("Loaded catalog with {} products", products.len());
        Ok(Self { products })
    }

    /// Add or replace a product
    pub fn add_product(&mut self, product: Product) {
        self.products.retain(|p| p.id != product.id);
        self.products.push(product);
    }

    /// Get a product by id
    pub fn get(&self, id: &str) -> std::result::Result<&Product, CatalogError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::UnknownProduct { id: id.to_string() })
    }

    /// All products in display order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
