use mockupkit_core::{constants, ObjectKind, VisualType};
use serde::{Deserialize, Serialize};

use super::{SceneContent, Size};

/// Line height as a multiple of the font size.
const LINE_HEIGHT: f64 = 1.16;
/// Average advance of a glyph as a multiple of the font size.
const AVERAGE_ADVANCE: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Some(TextAlign::Left),
            "center" => Some(TextAlign::Center),
            "right" => Some(TextAlign::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
    pub font_family: String,
    pub font_size: f64,
    /// CSS weight, 400 regular and 700 bold.
    pub font_weight: u16,
    pub font_style: FontStyle,
    pub fill_color: String,
    pub text_align: TextAlign,
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            content: constants::DEFAULT_TEXT_CONTENT.to_string(),
            font_family: constants::DEFAULT_FONT_FAMILY.to_string(),
            font_size: constants::DEFAULT_FONT_SIZE,
            font_weight: 400,
            font_style: FontStyle::Normal,
            fill_color: constants::DEFAULT_TEXT_FILL.to_string(),
            text_align: TextAlign::Center,
        }
    }
}

impl TextContent {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn is_bold(&self) -> bool {
        self.font_weight >= 600
    }

    pub fn is_italic(&self) -> bool {
        self.font_style == FontStyle::Italic
    }
}

impl SceneContent for TextContent {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Text
    }

    fn visual_type(&self) -> VisualType {
        VisualType::Text
    }

    /// Estimated from the font size; exact metrics belong to the renderer.
    fn intrinsic_size(&self) -> Size {
        let lines: Vec<&str> = self.content.split('\n').collect();
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        Size::new(
            longest as f64 * self.font_size * AVERAGE_ADVANCE,
            lines.len() as f64 * self.font_size * LINE_HEIGHT,
        )
    }

    fn label(&self) -> String {
        if self.content.trim().is_empty() {
            "Text".to_string()
        } else {
            self.content.clone()
        }
    }
}
