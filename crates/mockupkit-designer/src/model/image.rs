use mockupkit_core::{ObjectKind, VisualType};
use serde::{Deserialize, Serialize};

use super::{SceneContent, Size};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageContent {
    pub source_ref: String,
    pub natural_width: f64,
    pub natural_height: f64,
}

impl ImageContent {
    pub fn new(source_ref: impl Into<String>, natural_width: f64, natural_height: f64) -> Self {
        Self {
            source_ref: source_ref.into(),
            natural_width,
            natural_height,
        }
    }
}

impl SceneContent for ImageContent {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Image
    }

    fn visual_type(&self) -> VisualType {
        VisualType::Image
    }

    fn intrinsic_size(&self) -> Size {
        Size::new(self.natural_width, self.natural_height)
    }

    fn label(&self) -> String {
        "Image".to_string()
    }
}
