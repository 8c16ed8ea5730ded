//! Text styling.

use mockupkit_core::{AppEvent, AssetError, AssetEvent, FontProvider, ObjectId};

use super::EditorSession;
use crate::model::{FontStyle, ObjectContent, TextAlign, TextContent};

const REGULAR: u16 = 400;
const BOLD: u16 = 700;

impl EditorSession {
    fn modify_text<F>(&mut self, id: ObjectId, operation: &str, f: F) -> bool
    where
        F: FnOnce(&mut TextContent),
    {
        if self.scene.get(id).and_then(|o| o.text()).is_none() {
            return false;
        }
        self.modify(id, operation, |o| {
            if let Some(text) = o.text_mut() {
                f(text);
            }
        })
    }

    /// Switches between regular (400) and bold (700).
    pub fn toggle_bold(&mut self, id: ObjectId) -> bool {
        self.modify_text(id, "toggle_bold", |t| {
            t.font_weight = if t.is_bold() { REGULAR } else { BOLD };
        })
    }

    pub fn toggle_italic(&mut self, id: ObjectId) -> bool {
        self.modify_text(id, "toggle_italic", |t| {
            t.font_style = if t.is_italic() {
                FontStyle::Normal
            } else {
                FontStyle::Italic
            };
        })
    }

    pub fn set_text_align(&mut self, id: ObjectId, align: TextAlign) -> bool {
        self.modify_text(id, "set_text_align", |t| t.text_align = align)
    }

    pub fn set_font_size(&mut self, id: ObjectId, size: f64) -> bool {
        if !size.is_finite() || size <= 0.0 {
            return false;
        }
        self.modify_text(id, "set_font_size", |t| t.font_size = size)
    }

    pub fn set_text_content(&mut self, id: ObjectId, content: &str) -> bool {
        self.modify_text(id, "set_text_content", |t| t.content = content.to_string())
    }

    /// Sets the fill of a text or vector graphic.
    pub fn set_fill_color(&mut self, id: ObjectId, color: &str) -> bool {
        let fillable = self.scene.get(id).is_some_and(|o| {
            matches!(o.content, ObjectContent::Text(_) | ObjectContent::VectorGraphic(_))
        });
        if !fillable {
            return false;
        }
        self.modify(id, "set_fill_color", |o| match &mut o.content {
            ObjectContent::Text(t) => t.fill_color = color.to_string(),
            ObjectContent::VectorGraphic(g) => g.fill_color = Some(color.to_string()),
            _ => {}
        })
    }

    /// Changes the font family once `fonts` reports it ready.
    ///
    /// The wait is bounded by the configured font timeout. On timeout or
    /// failure the fallback family is applied instead. Nothing is applied
    /// if the side or session went away while waiting.
    pub async fn set_font_family(
        &mut self,
        id: ObjectId,
        family: &str,
        fonts: &dyn FontProvider,
    ) -> bool {
        if !self.can_mutate("set_font_family") {
            return false;
        }
        let Some((weight, italic)) = self
            .scene
            .get(id)
            .and_then(|o| o.text())
            .map(|t| (t.font_weight, t.is_italic()))
        else {
            return false;
        };

        let ticket = self.generation.begin(self.active_side.clone());
        let timeout = self.options.font_load_timeout;
        let outcome = match tokio::time::timeout(timeout, fonts.ensure_ready(family, weight, italic)).await {
            Ok(result) => result,
            Err(_) => Err(AssetError::FontTimeout {
                family: family.to_string(),
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        };

        if self.check_ticket(&ticket).is_err() {
            return false;
        }

        let applied = match outcome {
            Ok(()) => family.to_string(),
            Err(e) => {
                let fallback = self.options.fallback_font.clone();
                tracing::warn!("{}; using {}", e, fallback);
                self.emit(AppEvent::Asset(AssetEvent::FontFallback {
                    requested: family.to_string(),
                    fallback: fallback.clone(),
                }));
                fallback
            }
        };
        self.modify_text(id, "set_font_family", |t| t.font_family = applied)
    }
}
