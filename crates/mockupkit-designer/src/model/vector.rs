use lyon::math::point;
use lyon::path::Path;
use mockupkit_core::{ObjectKind, VisualType};
use serde::{Deserialize, Serialize};

use super::{SceneContent, Size};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GraphicSource {
    /// Inline SVG path data.
    PathData(String),
    /// Reference to an external vector asset.
    Source(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorContent {
    pub source: GraphicSource,
    pub natural_width: f64,
    pub natural_height: f64,
    pub fill_color: Option<String>,
    pub stroke_color: Option<String>,
}

impl VectorContent {
    /// Graphic from path data, sized by the path's bounding box.
    pub fn from_path_data(data: impl Into<String>) -> Self {
        let data = data.into();
        let size = parse_path_data(&data)
            .map(|path| {
                let b = lyon::algorithms::aabb::bounding_box(path.iter());
                Size::new(b.width() as f64, b.height() as f64)
            })
            .unwrap_or_default();
        Self {
            source: GraphicSource::PathData(data),
            natural_width: size.width,
            natural_height: size.height,
            fill_color: Some("#000000".to_string()),
            stroke_color: None,
        }
    }

    pub fn from_source(source_ref: impl Into<String>, natural_width: f64, natural_height: f64) -> Self {
        Self {
            source: GraphicSource::Source(source_ref.into()),
            natural_width,
            natural_height,
            fill_color: None,
            stroke_color: None,
        }
    }

    pub fn path_data(&self) -> Option<&str> {
        match &self.source {
            GraphicSource::PathData(d) => Some(d),
            GraphicSource::Source(_) => None,
        }
    }
}

impl SceneContent for VectorContent {
    fn kind(&self) -> ObjectKind {
        ObjectKind::VectorGraphic
    }

    fn visual_type(&self) -> VisualType {
        VisualType::Path
    }

    fn intrinsic_size(&self) -> Size {
        Size::new(self.natural_width, self.natural_height)
    }

    fn label(&self) -> String {
        "Graphic".to_string()
    }
}

/// Builds a lyon path from SVG path data.
///
/// Supports `M L H V C S Q T Z` in both absolute and relative form. Arcs
/// degrade to a straight line to their end point. Returns `None` on
/// malformed numbers or when nothing was drawn.
pub fn parse_path_data(data: &str) -> Option<Path> {
    let tokens = tokenize(data);
    let mut builder = Path::builder();
    let mut cur = (0.0f32, 0.0f32);
    let mut start = cur;
    let mut open = false;
    let mut drawn = false;
    let mut last_ctrl: Option<(char, (f32, f32))> = None;
    let mut cmd = ' ';
    let mut i = 0usize;

    let num = |i: usize| -> Option<f32> { tokens.get(i)?.parse::<f32>().ok() };

    while i < tokens.len() {
        if let Some(c) = single_command(&tokens[i]) {
            cmd = c;
            i += 1;
            if matches!(cmd, 'Z' | 'z') {
                if open {
                    builder.end(true);
                    open = false;
                }
                cur = start;
                last_ctrl = None;
                continue;
            }
        }
        let rel = cmd.is_ascii_lowercase();
        let base = if rel { cur } else { (0.0, 0.0) };
        let abs = |x: f32, y: f32| (base.0 + x, base.1 + y);

        macro_rules! ensure_open {
            () => {
                if !open {
                    builder.begin(point(cur.0, cur.1));
                    start = cur;
                    open = true;
                }
            };
        }

        match cmd.to_ascii_uppercase() {
            'M' => {
                let p = abs(num(i)?, num(i + 1)?);
                i += 2;
                if open {
                    builder.end(false);
                }
                builder.begin(point(p.0, p.1));
                open = true;
                start = p;
                cur = p;
                // implicit lineto for following pairs
                cmd = if rel { 'l' } else { 'L' };
                last_ctrl = None;
            }
            'L' => {
                let p = abs(num(i)?, num(i + 1)?);
                i += 2;
                ensure_open!();
                builder.line_to(point(p.0, p.1));
                cur = p;
                drawn = true;
                last_ctrl = None;
            }
            'H' => {
                let x = num(i)? + if rel { cur.0 } else { 0.0 };
                i += 1;
                ensure_open!();
                builder.line_to(point(x, cur.1));
                cur = (x, cur.1);
                drawn = true;
                last_ctrl = None;
            }
            'V' => {
                let y = num(i)? + if rel { cur.1 } else { 0.0 };
                i += 1;
                ensure_open!();
                builder.line_to(point(cur.0, y));
                cur = (cur.0, y);
                drawn = true;
                last_ctrl = None;
            }
            'C' | 'S' => {
                let smooth = cmd.eq_ignore_ascii_case(&'S');
                let c1 = if smooth {
                    match last_ctrl {
                        Some(('C', c)) => (2.0 * cur.0 - c.0, 2.0 * cur.1 - c.1),
                        _ => cur,
                    }
                } else {
                    let c = abs(num(i)?, num(i + 1)?);
                    i += 2;
                    c
                };
                let c2 = abs(num(i)?, num(i + 1)?);
                let p = abs(num(i + 2)?, num(i + 3)?);
                i += 4;
                ensure_open!();
                builder.cubic_bezier_to(point(c1.0, c1.1), point(c2.0, c2.1), point(p.0, p.1));
                cur = p;
                drawn = true;
                last_ctrl = Some(('C', c2));
            }
            'Q' | 'T' => {
                let c = if cmd.eq_ignore_ascii_case(&'T') {
                    match last_ctrl {
                        Some(('Q', c)) => (2.0 * cur.0 - c.0, 2.0 * cur.1 - c.1),
                        _ => cur,
                    }
                } else {
                    let c = abs(num(i)?, num(i + 1)?);
                    i += 2;
                    c
                };
                let p = abs(num(i)?, num(i + 1)?);
                i += 2;
                ensure_open!();
                builder.quadratic_bezier_to(point(c.0, c.1), point(p.0, p.1));
                cur = p;
                drawn = true;
                last_ctrl = Some(('Q', c));
            }
            'A' => {
                let p = abs(num(i + 5)?, num(i + 6)?);
                i += 7;
                ensure_open!();
                builder.line_to(point(p.0, p.1));
                cur = p;
                drawn = true;
                last_ctrl = None;
            }
            _ => return None,
        }
    }

    if open {
        builder.end(false);
    }
    drawn.then(|| builder.build())
}

fn single_command(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() && c != 'e' && c != 'E' => Some(c),
        _ => None,
    }
}

/// Splits path data into command letters and numbers; a sign starts a new
/// number unless it follows an exponent.
fn tokenize(data: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in data.chars() {
        match ch {
            c if c.is_ascii_alphabetic() && c != 'e' && c != 'E' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(c.to_string());
            }
            ' ' | ',' | '\n' | '\r' | '\t' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            '-' | '+' => {
                if !current.is_empty() && !matches!(current.chars().last(), Some('e' | 'E')) {
                    tokens.push(std::mem::take(&mut current));
                }
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}
