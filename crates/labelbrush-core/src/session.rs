//! Brush session state machine.
//!
//! Pointer-down starts a stroke, pointer-move extends it, pointer-up ends it
//! and exports the label image. Brush settings are passed with each event so
//! a mode, size or color change applies from the next processed cell on.

use crate::error::BrushResult;
use crate::geometry::GridCell;
use crate::host::{BrushHost, Gesture};
use crate::layer::LabelLayer;
use crate::palette::{PaintColor, classify_color};
use crate::raster::PixelRect;
use crate::stroke::{interpolate_within, stamp_cell};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// What the brush does to the cells it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushMode {
    #[default]
    Pen,
    Eraser,
}

impl BrushMode {
    /// Brush size applied when the user switches to this mode.
    pub fn default_size(self) -> u32 {
        match self {
            BrushMode::Pen => 1,
            BrushMode::Eraser => 10,
        }
    }
}

/// Active paint settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushSettings {
    pub mode: BrushMode,
    /// Side of the square brush footprint in pixels.
    pub size: u32,
    pub color: PaintColor,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            mode: BrushMode::Pen,
            size: BrushMode::Pen.default_size(),
            color: PaintColor::default(),
        }
    }
}

impl BrushSettings {
    /// Switch tool, resetting the size to that tool's default.
    pub fn select_mode(&mut self, mode: BrushMode) {
        self.mode = mode;
        self.size = mode.default_size();
    }

    /// Footprint size, never below one pixel.
    pub fn footprint(&self) -> u32 {
        self.size.max(1)
    }
}

/// Input device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

/// Button associated with a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Auxiliary,
}

/// A pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    pub kind: PointerKind,
    pub button: PointerButton,
}

impl PointerEvent {
    pub fn new(position: Point, kind: PointerKind, button: PointerButton) -> Self {
        Self { position, kind, button }
    }

    /// Primary mouse button event.
    pub fn mouse(position: Point) -> Self {
        Self::new(position, PointerKind::Mouse, PointerButton::Primary)
    }

    pub fn touch(position: Point) -> Self {
        Self::new(position, PointerKind::Touch, PointerButton::Primary)
    }
}

/// Stroke state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Painting,
}

/// Drives the label layer from pointer events.
#[derive(Debug, Clone)]
pub struct BrushSession {
    layer: LabelLayer,
    state: SessionState,
    previous_world_point: Option<Point>,
    current_world_point: Option<Point>,
    /// Gesture this session suspended and must hand back on pointer-up.
    paused_gesture: Option<Gesture>,
}

impl BrushSession {
    /// Session over an empty label layer of the given canvas size.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_layer(LabelLayer::new(width, height))
    }

    pub fn with_layer(layer: LabelLayer) -> Self {
        Self {
            layer,
            state: SessionState::Idle,
            previous_world_point: None,
            current_world_point: None,
            paused_gesture: None,
        }
    }

    pub fn layer(&self) -> &LabelLayer {
        &self.layer
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_painting(&self) -> bool {
        self.state == SessionState::Painting
    }

    pub fn previous_world_point(&self) -> Option<Point> {
        self.previous_world_point
    }

    pub fn current_world_point(&self) -> Option<Point> {
        self.current_world_point
    }

    /// Load a previously exported label image into the layer.
    pub fn restore_label(&mut self, data_url: &str) -> BrushResult<()> {
        if self.is_painting() {
            log::warn!("Restoring label while a stroke is in progress");
        }
        self.layer.restore(data_url)
    }

    /// Start a stroke and stamp the brush once at the pointer.
    pub fn pointer_down<H: BrushHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        settings: &BrushSettings,
        host: &mut H,
    ) -> BrushResult<()> {
        if self.is_painting() {
            log::debug!("Ignoring pointer-down during an active stroke");
            return Ok(());
        }
        if event.kind == PointerKind::Mouse && event.button != PointerButton::Primary {
            log::trace!("Ignoring {:?} mouse button", event.button);
            return Ok(());
        }
        if settings.mode == BrushMode::Pen {
            // Reject a bad color before any state changes.
            classify_color(settings.color)?;
        }

        let world = map_to_world(host, event.position);
        if !world.is_finite() {
            log::warn!("Ignoring pointer-down at non-finite position {:?}", world);
            return Ok(());
        }
        if event.kind == PointerKind::Touch {
            host.pause_gesture(Gesture::Drag);
            self.paused_gesture = Some(Gesture::Drag);
        }
        self.state = SessionState::Painting;
        self.previous_world_point = Some(world);
        log::debug!(
            "Stroke started at {:?} ({:?}, size {})",
            world,
            settings.mode,
            settings.footprint()
        );

        let dirty = self.apply(stamp_cell(world, settings.footprint()), settings)?;
        host.raster_updated(dirty.map(PixelRect::to_rect));
        Ok(())
    }

    /// Extend the stroke to the pointer, filling the gap since the last sample.
    pub fn pointer_move<H: BrushHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        settings: &BrushSettings,
        host: &mut H,
    ) -> BrushResult<()> {
        let world = map_to_world(host, event.position);
        if !world.is_finite() {
            log::warn!("Ignoring pointer-move at non-finite position {:?}", world);
            return Ok(());
        }
        self.current_world_point = Some(world);
        if !self.is_painting() {
            return Ok(());
        }
        let Some(previous) = self.previous_world_point else {
            return Ok(());
        };

        // Only the steps whose stamps can reach the canvas are walked.
        let cells = interpolate_within(previous, world, settings.footprint(), self.canvas_rect());
        let mut dirty: Option<Rect> = None;
        let mut count = 0usize;
        for cell in cells {
            count += 1;
            if let Some(rect) = self.apply(cell, settings)? {
                let rect = rect.to_rect();
                dirty = Some(dirty.map_or(rect, |d| d.union(rect)));
            }
        }
        log::trace!("Stroke segment {:?} -> {:?}: {} cells", previous, world, count);

        host.raster_updated(dirty);
        self.previous_world_point = Some(world);
        Ok(())
    }

    /// End the stroke and export the label image.
    ///
    /// Suspended gestures are resumed before any export error is returned.
    pub fn pointer_up<H: BrushHost + ?Sized>(&mut self, host: &mut H) -> BrushResult<()> {
        if !self.is_painting() {
            return Ok(());
        }
        if let Some(gesture) = self.paused_gesture.take() {
            host.resume_gesture(gesture);
        }
        self.state = SessionState::Idle;
        self.previous_world_point = None;
        self.current_world_point = None;

        if self.canvas_rect().area() == 0.0 {
            log::warn!("Stroke finished on an empty canvas, no label to export");
            return Ok(());
        }
        let label = self.layer.export()?;
        log::debug!(
            "Stroke finished, {} annotations on the layer",
            self.layer.annotations().len()
        );
        host.set_label(label);
        Ok(())
    }

    fn canvas_rect(&self) -> Rect {
        let raster = self.layer.raster();
        Rect::new(0.0, 0.0, f64::from(raster.width()), f64::from(raster.height()))
    }

    fn apply(
        &mut self,
        cell: GridCell,
        settings: &BrushSettings,
    ) -> BrushResult<Option<PixelRect>> {
        match settings.mode {
            BrushMode::Pen => self.layer.paint(cell, settings.footprint(), settings.color),
            BrushMode::Eraser => Ok(self.layer.erase(cell, settings.footprint())),
        }
    }
}

fn map_to_world<H: BrushHost + ?Sized>(host: &H, screen_point: Point) -> Point {
    host.transform()
        .map_or(screen_point, |transform| transform.to_world(screen_point))
}
