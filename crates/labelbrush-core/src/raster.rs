//! Off-screen RGBA8 pixel buffer holding the label image.

use crate::error::{BrushError, BrushResult};
use crate::geometry::GridCell;
use crate::palette::PaintColor;
use base64::{Engine, engine::general_purpose::STANDARD};
use kurbo::Rect;

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Half-open pixel rectangle, already clipped to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelRect {
    /// Every pixel in the rectangle, row by row.
    pub fn cells(self) -> impl Iterator<Item = GridCell> {
        (self.y0..self.y1)
            .flat_map(move |y| (self.x0..self.x1).map(move |x| GridCell::new(x as i32, y as i32)))
    }

    pub fn area(self) -> u64 {
        u64::from(self.x1 - self.x0) * u64::from(self.y1 - self.y0)
    }

    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.x0),
            f64::from(self.y0),
            f64::from(self.x1),
            f64::from(self.y1),
        )
    }
}

/// RGBA8 raster the brush paints into.
///
/// All mutation goes through square fill/clear operations that silently clip
/// to the surface bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterSurface {
    /// Create a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Wrap existing RGBA8 pixel data.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> BrushResult<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(BrushError::Decode(format!(
                "expected {} bytes for {}x{} RGBA, got {}",
                expected,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Clip a `size`-sided square with top-left `origin` to the surface.
    pub fn clip_square(&self, origin: GridCell, size: u32) -> Option<PixelRect> {
        let clamp = |v: i64, max: u32| v.clamp(0, i64::from(max)) as u32;
        let x0 = i64::from(origin.x);
        let y0 = i64::from(origin.y);
        let rect = PixelRect {
            x0: clamp(x0, self.width),
            y0: clamp(y0, self.height),
            x1: clamp(x0 + i64::from(size), self.width),
            y1: clamp(y0 + i64::from(size), self.height),
        };
        (rect.x0 < rect.x1 && rect.y0 < rect.y1).then_some(rect)
    }

    /// Fill a square with an opaque color. Returns the clipped region touched.
    pub fn fill_rect(
        &mut self,
        origin: GridCell,
        size: u32,
        color: PaintColor,
    ) -> Option<PixelRect> {
        let rect = self.clip_square(origin, size)?;
        self.write_rect(rect, color.to_rgba8());
        Some(rect)
    }

    /// Clear a square to transparent. Returns the clipped region touched.
    pub fn clear_rect(&mut self, origin: GridCell, size: u32) -> Option<PixelRect> {
        let rect = self.clip_square(origin, size)?;
        self.write_rect(rect, [0; 4]);
        Some(rect)
    }

    /// Clear the whole surface.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn write_rect(&mut self, rect: PixelRect, rgba: [u8; 4]) {
        let stride = self.width as usize * 4;
        for y in rect.y0..rect.y1 {
            let row = y as usize * stride;
            let start = row + rect.x0 as usize * 4;
            let end = row + rect.x1 as usize * 4;
            for px in self.pixels[start..end].chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = u32::try_from(y).ok().filter(|&y| y < self.height)?;
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    /// RGBA of a pixel, or `None` off-canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        let i = self.index(x, y)?;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[i..i + 4]);
        Some(rgba)
    }

    /// Whether a pixel carries paint. Off-canvas pixels never do.
    pub fn is_painted(&self, x: i32, y: i32) -> bool {
        self.pixel(x, y).is_some_and(|px| px[3] != 0)
    }

    /// Number of painted pixels.
    pub fn painted_count(&self) -> usize {
        self.pixels.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    /// Copy `other` onto this surface at the origin, clipping what does not fit.
    pub fn blit(&mut self, other: &RasterSurface) {
        let w = self.width.min(other.width) as usize * 4;
        let dst_stride = self.width as usize * 4;
        let src_stride = other.width as usize * 4;
        for y in 0..self.height.min(other.height) as usize {
            let dst = y * dst_stride;
            let src = y * src_stride;
            self.pixels[dst..dst + w].copy_from_slice(&other.pixels[src..src + w]);
        }
    }

    /// Encode the surface as an RGBA8 PNG.
    pub fn encode_png(&self) -> BrushResult<Vec<u8>> {
        let mut png_data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut png_data, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder
                .write_header()
                .map_err(|e| BrushError::Encode(e.to_string()))?;
            writer
                .write_image_data(&self.pixels)
                .map_err(|e| BrushError::Encode(e.to_string()))?;
        }
        Ok(png_data)
    }

    /// Decode a PNG into a surface of the image's own size.
    pub fn decode_png(data: &[u8]) -> BrushResult<Self> {
        let mut decoder = png::Decoder::new(data);
        decoder.set_transformations(png::Transformations::normalize_to_color8());
        let mut reader = decoder
            .read_info()
            .map_err(|e| BrushError::Decode(e.to_string()))?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader
            .next_frame(&mut buf)
            .map_err(|e| BrushError::Decode(e.to_string()))?;
        let bytes = &buf[..info.buffer_size()];

        let pixels: Vec<u8> = match info.color_type {
            png::ColorType::Rgba => bytes.to_vec(),
            png::ColorType::Rgb => bytes
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], 255])
                .collect(),
            png::ColorType::GrayscaleAlpha => bytes
                .chunks_exact(2)
                .flat_map(|p| [p[0], p[0], p[0], p[1]])
                .collect(),
            png::ColorType::Grayscale => bytes.iter().flat_map(|&v| [v, v, v, 255]).collect(),
            png::ColorType::Indexed => {
                return Err(BrushError::Decode("indexed PNG was not expanded".to_string()));
            }
        };
        Self::from_rgba(info.width, info.height, pixels)
    }

    /// Encode as a `data:image/png;base64,` URL.
    pub fn to_data_url(&self) -> BrushResult<String> {
        let png_data = self.encode_png()?;
        Ok(format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(png_data)))
    }

    /// Decode a PNG data URL.
    pub fn from_data_url(url: &str) -> BrushResult<Self> {
        let payload = url
            .trim()
            .strip_prefix(DATA_URL_PREFIX)
            .ok_or_else(|| {
                BrushError::InvalidDataUrl("expected a base64 PNG data URL".to_string())
            })?;
        let png_data = STANDARD
            .decode(payload)
            .map_err(|e| BrushError::InvalidDataUrl(e.to_string()))?;
        Self::decode_png(&png_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PALETTE;

    #[test]
    fn test_new_surface_is_clear() {
        let surface = RasterSurface::new(8, 4);
        assert_eq!(surface.as_bytes().len(), 8 * 4 * 4);
        assert_eq!(surface.painted_count(), 0);
    }

    #[test]
    fn test_fill_and_clear() {
        let mut surface = RasterSurface::new(10, 10);
        let touched = surface.fill_rect(GridCell::new(2, 3), 3, PALETTE[0]).unwrap();
        assert_eq!(touched, PixelRect { x0: 2, y0: 3, x1: 5, y1: 6 });
        assert_eq!(surface.painted_count(), 9);
        assert_eq!(surface.pixel(4, 5), Some([0xf4, 0x43, 0x36, 255]));
        assert!(!surface.is_painted(5, 5));

        surface.clear_rect(GridCell::new(3, 3), 3);
        assert_eq!(surface.painted_count(), 3);
        assert!(surface.is_painted(2, 4));
        assert!(!surface.is_painted(3, 4));
    }

    #[test]
    fn test_fill_clips_to_bounds() {
        let mut surface = RasterSurface::new(4, 4);
        let touched = surface.fill_rect(GridCell::new(-2, 3), 4, PALETTE[1]).unwrap();
        assert_eq!(touched, PixelRect { x0: 0, y0: 3, x1: 2, y1: 4 });
        assert_eq!(surface.painted_count(), 2);
    }

    #[test]
    fn test_fully_off_canvas_is_noop() {
        let mut surface = RasterSurface::new(4, 4);
        assert!(surface.fill_rect(GridCell::new(10, 10), 3, PALETTE[0]).is_none());
        assert!(surface.fill_rect(GridCell::new(-5, 0), 3, PALETTE[0]).is_none());
        assert!(surface.clear_rect(GridCell::new(i32::MAX, i32::MIN), 10).is_none());
        assert_eq!(surface.painted_count(), 0);
    }

    #[test]
    fn test_pixel_off_canvas() {
        let surface = RasterSurface::new(2, 2);
        assert!(surface.pixel(-1, 0).is_none());
        assert!(surface.pixel(0, 2).is_none());
        assert!(!surface.is_painted(5, 5));
    }

    #[test]
    fn test_pixel_rect_cells() {
        let rect = PixelRect { x0: 1, y0: 1, x1: 3, y1: 2 };
        let cells: Vec<_> = rect.cells().collect();
        assert_eq!(cells, vec![GridCell::new(1, 1), GridCell::new(2, 1)]);
        assert_eq!(rect.area(), 2);
        assert_eq!(rect.to_rect(), Rect::new(1.0, 1.0, 3.0, 2.0));
    }

    #[test]
    fn test_data_url_roundtrip() {
        let mut surface = RasterSurface::new(6, 5);
        surface.fill_rect(GridCell::new(1, 1), 2, PALETTE[3]);
        surface.fill_rect(GridCell::new(4, 3), 2, PALETTE[9]);

        let url = surface.to_data_url().unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        let decoded = RasterSurface::from_data_url(&url).unwrap();
        assert_eq!(decoded, surface);
    }

    #[test]
    fn test_invalid_data_url() {
        assert!(matches!(
            RasterSurface::from_data_url("data:image/jpeg;base64,AAAA"),
            Err(BrushError::InvalidDataUrl(_))
        ));
        assert!(matches!(
            RasterSurface::from_data_url("data:image/png;base64,!!!"),
            Err(BrushError::InvalidDataUrl(_))
        ));
        assert!(matches!(
            RasterSurface::from_data_url("data:image/png;base64,AAAA"),
            Err(BrushError::Decode(_))
        ));
    }

    #[test]
    fn test_blit_clips() {
        let mut big = RasterSurface::new(4, 4);
        big.fill_rect(GridCell::new(0, 0), 4, PALETTE[2]);
        let mut small = RasterSurface::new(2, 3);
        small.blit(&big);
        assert_eq!(small.painted_count(), 6);

        let mut target = RasterSurface::new(4, 4);
        target.blit(&small);
        assert_eq!(target.painted_count(), 6);
        assert!(!target.is_painted(2, 0));
    }

    #[test]
    fn test_from_rgba_checks_length() {
        assert!(RasterSurface::from_rgba(2, 2, vec![0; 15]).is_err());
        assert!(RasterSurface::from_rgba(2, 2, vec![0; 16]).is_ok());
    }
}
