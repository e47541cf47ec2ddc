//! Viewport pan/zoom and the screen-to-world mapping used by the brush.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Maps pointer positions from screen space into canvas (world) space.
pub trait CoordinateTransform {
    /// Convert a screen point to world coordinates.
    fn to_world(&self, screen_point: Point) -> Point;
}

/// Camera for the label canvas.
///
/// Handles panning (translation) and zooming (scaling), converting between
/// screen coordinates and canvas pixel coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan)
    pub offset: Vec2,
    /// Current zoom level (1.0 = one canvas pixel per screen pixel)
    pub zoom: f64,
    /// Minimum allowed zoom level
    pub min_zoom: f64,
    /// Maximum allowed zoom level
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 40.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// World-to-screen transform for rendering.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Screen-to-world transform for input handling.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Pan by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let world_point = self.screen_to_world(screen_point);
        self.zoom = new_zoom;

        // Shift so world_point lands back under screen_point
        let new_screen = self.world_to_screen(world_point);
        self.offset += screen_point - new_screen;
    }

    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0;
    }

    /// Fit a canvas of the given pixel size into the viewport, centered.
    pub fn fit_canvas(&mut self, canvas: Size, viewport: Size, padding: f64) {
        if canvas.is_zero_area() {
            self.reset();
            return;
        }

        let available = Size::new(
            (viewport.width - padding * 2.0).max(1.0),
            (viewport.height - padding * 2.0).max(1.0),
        );
        let scale_x = available.width / canvas.width;
        let scale_y = available.height / canvas.height;
        self.zoom = scale_x.min(scale_y).clamp(self.min_zoom, self.max_zoom);

        self.offset = Vec2::new(
            (viewport.width - canvas.width * self.zoom) / 2.0,
            (viewport.height - canvas.height * self.zoom) / 2.0,
        );
    }
}

impl CoordinateTransform for Camera {
    fn to_world(&self, screen_point: Point) -> Point {
        self.screen_to_world(screen_point)
    }
}
