//! Content of the two system objects: the mockup photo and the print guide.

use mockupkit_core::{constants, ObjectKind, VisualType};
use serde::{Deserialize, Serialize};

use super::{SceneContent, Size};

/// Product photo placed below all user content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundContent {
    pub source_ref: String,
    pub natural_width: f64,
    pub natural_height: f64,
}

impl SceneContent for BackgroundContent {
    fn kind(&self) -> ObjectKind {
        ObjectKind::MockupBackground
    }

    fn visual_type(&self) -> VisualType {
        VisualType::Image
    }

    fn intrinsic_size(&self) -> Size {
        Size::new(self.natural_width, self.natural_height)
    }

    fn label(&self) -> String {
        "Mockup".to_string()
    }
}

/// Dashed outline of the print area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideContent {
    pub width: f64,
    pub height: f64,
    pub stroke_color: String,
    pub dash: Vec<f64>,
}

impl GuideContent {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            stroke_color: constants::PRINT_GUIDE_STROKE.to_string(),
            dash: constants::PRINT_GUIDE_DASH.to_vec(),
        }
    }
}

impl SceneContent for GuideContent {
    fn kind(&self) -> ObjectKind {
        ObjectKind::PrintGuide
    }

    fn visual_type(&self) -> VisualType {
        VisualType::Rect
    }

    fn intrinsic_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn label(&self) -> String {
        "Print area".to_string()
    }
}
