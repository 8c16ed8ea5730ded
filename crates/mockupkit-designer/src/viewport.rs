//! Viewport and coordinate transformation for the editor canvas.
//!
//! Handles conversion between screen pixels and canvas coordinates. Both
//! use a Y-down convention, so the mapping is a plain scale and offset:
//!
//! ```text
//! screen = canvas * zoom + pan
//! ```

use std::fmt;

use mockupkit_core::constants::{MAX_ZOOM, MIN_ZOOM, ZOOM_PRESETS};

use crate::model::Point;

/// Wheel zoom base; each wheel unit scales by this factor.
const WHEEL_BASE: f64 = 0.999;

/// Zoom and pan state of the editor canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl Viewport {
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Current zoom factor (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Zoom rounded to whole percent, as shown in the status bar.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Zooms around the canvas center. Non-finite or non-positive values
    /// are ignored; everything else is clamped to the supported range.
    pub fn set_zoom(&mut self, zoom: f64) {
        let center = Point::new(self.canvas_width / 2.0, self.canvas_height / 2.0);
        self.zoom_to_point(center, zoom);
    }

    pub fn set_zoom_percent(&mut self, percent: u32) {
        self.set_zoom(f64::from(percent) / 100.0);
    }

    /// Next larger preset.
    pub fn zoom_in(&mut self) -> bool {
        let current = self.zoom_percent();
        match ZOOM_PRESETS.iter().rev().find(|p| **p > current) {
            Some(p) => {
                self.set_zoom_percent(*p);
                true
            }
            None => false,
        }
    }

    /// Next smaller preset.
    pub fn zoom_out(&mut self) -> bool {
        let current = self.zoom_percent();
        match ZOOM_PRESETS.iter().find(|p| **p < current) {
            Some(p) => {
                self.set_zoom_percent(*p);
                true
            }
            None => false,
        }
    }

    /// Mouse-wheel zoom, keeping the screen point under the cursor fixed.
    pub fn zoom_by_wheel(&mut self, delta: f64, screen: Point) {
        self.zoom_to_point(screen, self.zoom * WHEEL_BASE.powf(delta));
    }

    /// Sets the zoom while keeping `screen` over the same canvas point.
    pub fn zoom_to_point(&mut self, screen: Point, zoom: f64) {
        if !zoom.is_finite() || zoom <= 0.0 {
            return;
        }
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        let anchor = self.screen_to_canvas(screen);
        self.zoom = zoom;
        self.pan_x = screen.x - anchor.x * zoom;
        self.pan_y = screen.y - anchor.y * zoom;
    }

    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan_x) / self.zoom,
            (screen.y - self.pan_y) / self.zoom,
        )
    }

    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point::new(
            canvas.x * self.zoom + self.pan_x,
            canvas.y * self.zoom + self.pan_y,
        )
    }

    /// Back to 100% without panning.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {}% | Pan: ({:.1}, {:.1})",
            self.zoom_percent(),
            self.pan_x,
            self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}
