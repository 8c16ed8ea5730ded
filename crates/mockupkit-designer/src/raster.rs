//! Rasterizes a composed preview with tiny-skia.
//!
//! Bitmaps come from an [`ImageStore`], vector graphics are built from
//! their path data through lyon and text outlines come from rusttype faces
//! resolved by [`crate::fonts`]. Anything that cannot be resolved is
//! skipped with a warning; a preview always renders.

use std::path::Path;

use anyhow::Context;
use image::{ImageFormat, RgbaImage};
use mockupkit_core::{constants, AppEvent, LoadedImage, PreviewEvent};
use rusttype::{point as rt_point, Font, OutlineBuilder, Scale};
use tiny_skia::{
    Color, ColorU8, FillRule, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke,
    Transform,
};

use crate::assets::ImageStore;
use crate::fonts;
use crate::model::{
    parse_path_data, GraphicSource, ImageContent, ObjectContent, Size, TextAlign, TextContent, Transform2D,
    VectorContent,
};
use crate::preview::{BackgroundPlacement, PreviewScene};
use crate::session::EditorSession;

/// Line height as a multiple of the font size.
const LINE_HEIGHT: f32 = 1.16;

fn bg_color() -> Color {
    Color::WHITE
}

/// Renders `scene` at `multiplier` times its nominal size.
pub fn render(scene: &PreviewScene, images: &ImageStore, multiplier: f64) -> RgbaImage {
    let multiplier = if multiplier.is_finite() && multiplier > 0.0 {
        multiplier
    } else {
        1.0
    };
    let edge = (scene.size * multiplier).ceil().clamp(1.0, f64::from(u16::MAX)) as u32;
    let Some(mut pixmap) = Pixmap::new(edge, edge) else {
        return RgbaImage::new(edge, edge);
    };
    pixmap.fill(bg_color());

    let base = Transform::from_scale(multiplier as f32, multiplier as f32);

    if let Some(background) = &scene.background {
        draw_background(&mut pixmap, background, scene.size, images, base);
    }

    for instruction in scene.objects.iter().filter(|i| i.visible) {
        let t = &instruction.transform;
        match &instruction.content {
            ObjectContent::Image(content) => draw_image(&mut pixmap, content, t, images, base),
            ObjectContent::VectorGraphic(content) => {
                draw_vector(&mut pixmap, content, t, images, base)
            }
            ObjectContent::Text(content) => draw_text(&mut pixmap, content, t, base),
            ObjectContent::MockupBackground(_) | ObjectContent::PrintGuide(_) => {
                tracing::debug!("Skipping system object in preview")
            }
        }
    }

    to_image(&pixmap)
}

/// Renders `scene` and writes it as PNG.
pub fn export_png(
    scene: &PreviewScene,
    images: &ImageStore,
    multiplier: f64,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let image = render(scene, images, multiplier);
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Failed to write preview {}", path.display()))?;
    tracing::info!(
        "Exported preview {} ({}x{}) to {}",
        scene.preview_key,
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}

impl EditorSession {
    /// Composes a preview at `size` and writes it as PNG, `multiplier`
    /// times larger.
    pub fn export_preview(
        &self,
        preview_key: &str,
        size: f64,
        images: &ImageStore,
        multiplier: f64,
        path: impl AsRef<Path>,
    ) -> anyhow::Result<()> {
        let scene = self.render_preview(preview_key, size)?;
        export_png(&scene, images, multiplier, &path)?;
        self.bus().notify(AppEvent::Preview(PreviewEvent::Exported {
            path: path.as_ref().to_path_buf(),
        }));
        Ok(())
    }
}

/// Maps an object's local box (origin top-left, `size` large) to the canvas.
fn object_transform(t: &Transform2D, size: Size, base: Transform) -> Transform {
    base.pre_translate(t.x as f32, t.y as f32)
        .pre_concat(Transform::from_rotate(t.rotation as f32))
        .pre_scale(t.scale_x as f32, t.scale_y as f32)
        .pre_translate(-(size.width / 2.0) as f32, -(size.height / 2.0) as f32)
}

fn draw_background(
    pixmap: &mut Pixmap,
    background: &BackgroundPlacement,
    canvas_size: f64,
    images: &ImageStore,
    base: Transform,
) {
    let Some(image) = images.get(&background.source_ref) else {
        tracing::warn!("Mockup {} not loaded, skipping", background.source_ref);
        return;
    };
    let natural = Size::new(f64::from(image.width), f64::from(image.height));
    let placement = match background.natural_size {
        Some(_) => background.clone(),
        None => BackgroundPlacement::fit(
            &background.source_ref,
            canvas_size,
            Some(natural),
            background.fill_ratio,
        ),
    };
    draw_bitmap(pixmap, image, &placement.transform, base);
}

fn draw_image(
    pixmap: &mut Pixmap,
    content: &ImageContent,
    t: &Transform2D,
    images: &ImageStore,
    base: Transform,
) {
    match images.get(&content.source_ref) {
        Some(image) => draw_bitmap(pixmap, image, t, base),
        None => tracing::warn!("Image {} not loaded, skipping", content.source_ref),
    }
}

fn draw_bitmap(pixmap: &mut Pixmap, image: &LoadedImage, t: &Transform2D, base: Transform) {
    let Some(source) = to_pixmap(image) else {
        tracing::warn!("Image {} has no pixel data, skipping", image.source_ref);
        return;
    };
    let size = Size::new(f64::from(image.width), f64::from(image.height));
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..Default::default()
    };
    pixmap.draw_pixmap(0, 0, source.as_ref(), &paint, object_transform(t, size, base), None);
}

fn draw_vector(
    pixmap: &mut Pixmap,
    content: &VectorContent,
    t: &Transform2D,
    images: &ImageStore,
    base: Transform,
) {
    let Some(data) = content.path_data() else {
        // external vector assets are expected pre-rendered in the store
        if let GraphicSource::Source(source_ref) = &content.source {
            match images.get(source_ref) {
                Some(image) => draw_bitmap(pixmap, image, t, base),
                None => tracing::warn!("Graphic {} not loaded, skipping", source_ref),
            }
        }
        return;
    };
    let Some(path) = parse_path_data(data) else {
        tracing::warn!("Unparseable path data, skipping graphic");
        return;
    };

    let bounds = lyon::algorithms::aabb::bounding_box(path.iter());
    let mut pb = PathBuilder::new();
    for event in path.iter() {
        match event {
            lyon::path::Event::Begin { at } => pb.move_to(at.x, at.y),
            lyon::path::Event::Line { to, .. } => pb.line_to(to.x, to.y),
            lyon::path::Event::Quadratic { ctrl, to, .. } => pb.quad_to(ctrl.x, ctrl.y, to.x, to.y),
            lyon::path::Event::Cubic {
                ctrl1, ctrl2, to, ..
            } => pb.cubic_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y),
            lyon::path::Event::End { close, .. } => {
                if close {
                    pb.close();
                }
            }
        }
    }
    let Some(shape) = pb.finish() else {
        return;
    };

    // path coordinates are absolute; shift the box origin to the path's own
    let size = Size::new(f64::from(bounds.width()), f64::from(bounds.height()));
    let transform =
        object_transform(t, size, base).pre_translate(-bounds.min.x, -bounds.min.y);

    if let Some(color) = content.fill_color.as_deref().and_then(parse_color) {
        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;
        pixmap.fill_path(&shape, &paint, FillRule::Winding, transform, None);
    }
    if let Some(color) = content.stroke_color.as_deref().and_then(parse_color) {
        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;
        pixmap.stroke_path(&shape, &paint, &Stroke::default(), transform, None);
    }
}

/// Feeds rusttype glyph outlines into a tiny-skia path.
struct GlyphPath<'a>(&'a mut PathBuilder);

impl OutlineBuilder for GlyphPath<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.0.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.0.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.0.close();
    }
}

fn resolve_font(text: &TextContent) -> Option<&'static Font<'static>> {
    fonts::font_for(&text.font_family, text.font_weight, text.is_italic())
        .or_else(|| fonts::font_for(constants::FALLBACK_FONT, text.font_weight, text.is_italic()))
}

fn line_width(font: &Font<'_>, line: &str, scale: Scale) -> f32 {
    font.layout(line, scale, rt_point(0.0, 0.0))
        .last()
        .map_or(0.0, |g| {
            g.position().x + g.unpositioned().h_metrics().advance_width
        })
}

fn draw_text(pixmap: &mut Pixmap, text: &TextContent, t: &Transform2D, base: Transform) {
    let Some(font) = resolve_font(text) else {
        tracing::warn!("No face for {:?}, skipping text", text.font_family);
        return;
    };
    let Some(color) = parse_color(&text.fill_color).or_else(|| parse_color("#000000")) else {
        return;
    };

    let scale = Scale::uniform(text.font_size as f32);
    let ascent = font.v_metrics(scale).ascent;
    let line_height = text.font_size as f32 * LINE_HEIGHT;
    let lines: Vec<&str> = text.content.split('\n').collect();
    let widths: Vec<f32> = lines.iter().map(|l| line_width(font, l, scale)).collect();
    let block_width = widths.iter().copied().fold(0.0f32, f32::max);
    let block_height = line_height * lines.len() as f32;

    let mut pb = PathBuilder::new();
    for (i, (line, width)) in lines.iter().zip(&widths).enumerate() {
        let x = match text.text_align {
            TextAlign::Left => 0.0,
            TextAlign::Center => (block_width - width) / 2.0,
            TextAlign::Right => block_width - width,
        };
        let baseline = ascent + line_height * i as f32;
        for glyph in font.layout(line, scale, rt_point(x, baseline)) {
            glyph.build_outline(&mut GlyphPath(&mut pb));
        }
    }
    let Some(shape) = pb.finish() else {
        return;
    };

    let size = Size::new(f64::from(block_width), f64::from(block_height));
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    pixmap.fill_path(&shape, &paint, FillRule::Winding, object_transform(t, size, base), None);
}

/// Parses `#rgb`, `#rrggbb` and `#rrggbbaa`.
pub fn parse_color(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    let (r, g, b, a) = match hex.len() {
        3 => (digit(0)? * 17, digit(1)? * 17, digit(2)? * 17, 255),
        6 => (byte(0)?, byte(2)?, byte(4)?, 255),
        8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
        _ => return None,
    };
    Some(Color::from_rgba8(r, g, b, a))
}

fn to_pixmap(image: &LoadedImage) -> Option<Pixmap> {
    if !image.has_pixels() {
        return None;
    }
    let mut pixmap = Pixmap::new(image.width, image.height)?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.rgba.chunks_exact(4)) {
        *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
    }
    Some(pixmap)
}

fn to_image(pixmap: &Pixmap) -> RgbaImage {
    let (width, height) = (pixmap.width(), pixmap.height());
    let data: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    RgbaImage::from_raw(width, height, data).unwrap_or_else(|| RgbaImage::new(width, height))
}
