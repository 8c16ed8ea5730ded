use mockupkit_core::{ObjectId, ObjectKind, VisualType};
use serde::{Deserialize, Serialize};

mod image;
mod system;
mod text;
mod vector;

pub use image::ImageContent;
pub use system::{BackgroundContent, GuideContent};
pub use text::{FontStyle, TextAlign, TextContent};
pub use vector::{parse_path_data, GraphicSource, VectorContent};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Placement of an object: center-origin position, scale and rotation.
///
/// Rotation is stored in degrees and converted to radians only for
/// trigonometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform2D {
    pub x: f64,
    pub y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotation: f64,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
        }
    }
}

impl Transform2D {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    pub fn with_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Axis-aligned extent of an object of intrinsic `size` under this transform.
    pub fn extent(&self, size: Size) -> Size {
        let w = size.width * self.scale_x.abs();
        let h = size.height * self.scale_y.abs();
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        Size::new(
            w * cos.abs() + h * sin.abs(),
            w * sin.abs() + h * cos.abs(),
        )
    }
}

/// Print mask in absolute canvas coordinates.
///
/// Absolute positioning lets the same rectangle be assigned to any object
/// regardless of that object's own transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipRect {
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ClipRect {
    pub fn left(&self) -> f64 {
        self.center_x - self.width / 2.0
    }

    pub fn top(&self) -> f64 {
        self.center_y - self.height / 2.0
    }

    pub fn right(&self) -> f64 {
        self.center_x + self.width / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.center_y + self.height / 2.0
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }
}

/// Variant payload of a scene object.
pub trait SceneContent {
    fn kind(&self) -> ObjectKind;
    fn visual_type(&self) -> VisualType;
    /// Unscaled width and height.
    fn intrinsic_size(&self) -> Size;
    /// Short label for the layer list.
    fn label(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectContent {
    Text(TextContent),
    Image(ImageContent),
    VectorGraphic(VectorContent),
    MockupBackground(BackgroundContent),
    PrintGuide(GuideContent),
}

impl SceneContent for ObjectContent {
    fn kind(&self) -> ObjectKind {
        match self {
            ObjectContent::Text(c) => c.kind(),
            ObjectContent::Image(c) => c.kind(),
            ObjectContent::VectorGraphic(c) => c.kind(),
            ObjectContent::MockupBackground(c) => c.kind(),
            ObjectContent::PrintGuide(c) => c.kind(),
        }
    }

    fn visual_type(&self) -> VisualType {
        match self {
            ObjectContent::Text(c) => c.visual_type(),
            ObjectContent::Image(c) => c.visual_type(),
            ObjectContent::VectorGraphic(c) => c.visual_type(),
            ObjectContent::MockupBackground(c) => c.visual_type(),
            ObjectContent::PrintGuide(c) => c.visual_type(),
        }
    }

    fn intrinsic_size(&self) -> Size {
        match self {
            ObjectContent::Text(c) => c.intrinsic_size(),
            ObjectContent::Image(c) => c.intrinsic_size(),
            ObjectContent::VectorGraphic(c) => c.intrinsic_size(),
            ObjectContent::MockupBackground(c) => c.intrinsic_size(),
            ObjectContent::PrintGuide(c) => c.intrinsic_size(),
        }
    }

    fn label(&self) -> String {
        match self {
            ObjectContent::Text(c) => c.label(),
            ObjectContent::Image(c) => c.label(),
            ObjectContent::VectorGraphic(c) => c.label(),
            ObjectContent::MockupBackground(c) => c.label(),
            ObjectContent::PrintGuide(c) => c.label(),
        }
    }
}

/// A placeable item of the live scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    /// Persisted name; a secondary identity marker next to `kind`.
    pub name: Option<String>,
    pub transform: Transform2D,
    /// Interactive flag. True for user content, false for system objects.
    pub editable: bool,
    pub visible: bool,
    pub clip: Option<ClipRect>,
    pub content: ObjectContent,
}

impl SceneObject {
    pub fn new(id: ObjectId, content: ObjectContent, transform: Transform2D) -> Self {
        let editable = !content.kind().is_system();
        Self {
            id,
            name: None,
            transform,
            editable,
            visible: true,
            clip: None,
            content,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn kind(&self) -> ObjectKind {
        self.content.kind()
    }

    pub fn is_system(&self) -> bool {
        self.kind().is_system()
    }

    /// Intrinsic unscaled bounds.
    pub fn bounds(&self) -> Size {
        self.content.intrinsic_size()
    }

    /// Axis-aligned size on the canvas after scale and rotation.
    pub fn extent(&self) -> Size {
        self.transform.extent(self.bounds())
    }

    pub fn text(&self) -> Option<&TextContent> {
        match &self.content {
            ObjectContent::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut TextContent> {
        match &mut self.content {
            ObjectContent::Text(t) => Some(t),
            _ => None,
        }
    }
}
