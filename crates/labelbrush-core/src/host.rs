//! Interfaces the brush session consumes from its surroundings.

use crate::camera::CoordinateTransform;
use kurbo::Rect;

/// Viewport gestures that can be suspended while a stroke is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// Click-and-drag panning.
    Drag,
}

/// Collaborators of a [`BrushSession`](crate::BrushSession), passed into every call.
///
/// Only [`set_label`](BrushHost::set_label) is required; a host without a
/// viewport keeps the identity transform and no-op gesture hooks.
pub trait BrushHost {
    /// Screen-to-world mapping, if there is a viewport.
    fn transform(&self) -> Option<&dyn CoordinateTransform> {
        None
    }

    /// Stop the viewport from handling `gesture` until resumed.
    fn pause_gesture(&mut self, _gesture: Gesture) {}

    /// Hand `gesture` back to the viewport.
    fn resume_gesture(&mut self, _gesture: Gesture) {}

    /// Called once per processed pointer-down/move with the canvas region
    /// that changed, `None` if the event touched no pixels.
    fn raster_updated(&mut self, _dirty: Option<Rect>) {}

    /// Receive the finished label image as a PNG data URL.
    fn set_label(&mut self, data_url: String);
}
