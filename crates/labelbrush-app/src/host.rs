//! Host that stands in for the viewport, label store and renderer.

use kurbo::Rect;
use labelbrush_core::{BrushHost, Camera, CoordinateTransform, Gesture};

/// Records everything the brush session asks of its surroundings.
#[derive(Debug, Default)]
pub struct ReplayHost {
    pub camera: Camera,
    /// Number of times drag handling was suspended.
    pub paused: usize,
    /// Number of times drag handling was handed back.
    pub resumed: usize,
    pub raster_updates: usize,
    /// Union of every dirty region reported.
    pub dirty: Option<Rect>,
    /// Exported label images, oldest first.
    pub labels: Vec<String>,
}

impl ReplayHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_suspended(&self) -> bool {
        self.paused > self.resumed
    }

    pub fn last_label(&self) -> Option<&str> {
        self.labels.last().map(String::as_str)
    }
}

impl BrushHost for ReplayHost {
    fn transform(&self) -> Option<&dyn CoordinateTransform> {
        Some(&self.camera)
    }

    fn pause_gesture(&mut self, gesture: Gesture) {
        log::debug!("Pausing {:?}", gesture);
        self.paused += 1;
    }

    fn resume_gesture(&mut self, gesture: Gesture) {
        log::debug!("Resuming {:?}", gesture);
        self.resumed += 1;
    }

    fn raster_updated(&mut self, dirty: Option<Rect>) {
        self.raster_updates += 1;
        if let Some(rect) = dirty {
            self.dirty = Some(self.dirty.map_or(rect, |d| d.union(rect)));
        }
    }

    fn set_label(&mut self, data_url: String) {
        self.labels.push(data_url);
    }
}
