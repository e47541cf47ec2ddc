//! LabelBrush Core Library
//!
//! Brush-stroke rasterization engine for pixel labeling. Sparse pointer
//! samples are turned into a continuous raster stroke and, in lockstep, into
//! a grid-aligned set of annotation records.

pub mod annotation;
pub mod camera;
pub mod error;
pub mod geometry;
pub mod host;
pub mod layer;
pub mod palette;
pub mod raster;
pub mod session;
pub mod stroke;

pub use annotation::{Annotation, AnnotationSet, AnnotationStore, UNSET_DISTANCE};
pub use camera::{Camera, CoordinateTransform};
pub use error::{BrushError, BrushResult};
pub use geometry::{GridCell, angle_between, distance_between};
pub use host::{BrushHost, Gesture};
pub use layer::LabelLayer;
pub use palette::{AnnotationKind, PALETTE, PaintColor, classify_color};
pub use raster::RasterSurface;
pub use session::{
    BrushMode, BrushSession, BrushSettings, PointerButton, PointerEvent, PointerKind, SessionState,
};
pub use stroke::{interpolate, stamp_cell};
