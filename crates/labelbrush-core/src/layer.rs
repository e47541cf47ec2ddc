//! The label layer: raster surface and annotation set behind one interface.
//!
//! Paint and erase always mutate the raster first and then the annotations,
//! over the same clipped footprint, so a pixel is painted exactly when an
//! annotation exists for it.

use crate::annotation::{Annotation, AnnotationSet, AnnotationStore};
use crate::error::BrushResult;
use crate::geometry::GridCell;
use crate::palette::{PaintColor, classify_color};
use crate::raster::{PixelRect, RasterSurface};

/// Raster and annotation records for one label image.
#[derive(Debug, Clone)]
pub struct LabelLayer {
    raster: RasterSurface,
    annotations: AnnotationSet,
}

impl LabelLayer {
    /// Create an empty layer for a canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            raster: RasterSurface::new(width, height),
            annotations: AnnotationSet::new(),
        }
    }

    pub fn raster(&self) -> &RasterSurface {
        &self.raster
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    /// Stamp a `size`-sided square of `color` at `origin`.
    ///
    /// Fails without touching anything if `color` is off-palette. Returns the
    /// clipped region painted, `None` when the stamp is entirely off-canvas.
    pub fn paint(
        &mut self,
        origin: GridCell,
        size: u32,
        color: PaintColor,
    ) -> BrushResult<Option<PixelRect>> {
        let kind = classify_color(color)?;
        let Some(rect) = self.raster.fill_rect(origin, size, color) else {
            return Ok(None);
        };
        for cell in rect.cells() {
            self.annotations.add_annotation(Annotation::new(cell, kind));
        }
        Ok(Some(rect))
    }

    /// Clear a `size`-sided square at `origin` and drop its annotations.
    pub fn erase(&mut self, origin: GridCell, size: u32) -> Option<PixelRect> {
        let rect = self.raster.clear_rect(origin, size)?;
        for cell in rect.cells() {
            self.annotations.remove_annotation(cell);
        }
        Some(rect)
    }

    /// Wipe the raster and every annotation.
    pub fn clear(&mut self) {
        self.raster.clear();
        self.annotations.clear();
    }

    /// Export the raster as a PNG data URL.
    pub fn export(&self) -> BrushResult<String> {
        self.raster.to_data_url()
    }

    /// Replace the layer with a previously exported label image.
    ///
    /// The image is placed at the canvas origin and clipped to the canvas.
    /// One annotation is rebuilt per painted pixel from its color. On error
    /// the layer is left as it was.
    pub fn restore(&mut self, data_url: &str) -> BrushResult<()> {
        let image = RasterSurface::from_data_url(data_url)?;
        let mut raster = RasterSurface::new(self.raster.width(), self.raster.height());
        raster.blit(&image);

        let mut annotations = AnnotationSet::new();
        for y in 0..raster.height() as i32 {
            for x in 0..raster.width() as i32 {
                let Some([r, g, b, a]) = raster.pixel(x, y) else {
                    continue;
                };
                if a == 0 {
                    continue;
                }
                let kind = classify_color(PaintColor::new(r, g, b))?;
                annotations.add_annotation(Annotation::new(GridCell::new(x, y), kind));
            }
        }

        log::debug!(
            "Restored label layer: {} annotations from {}x{} image",
            annotations.len(),
            image.width(),
            image.height()
        );
        self.raster = raster;
        self.annotations = annotations;
        Ok(())
    }

    /// Check that raster and annotations agree on every pixel.
    pub fn is_consistent(&self) -> bool {
        let painted = self.raster.painted_count();
        painted == self.annotations.len()
            && self
                .annotations
                .iter()
                .all(|a| self.raster.is_painted(a.x, a.y))
    }
}
