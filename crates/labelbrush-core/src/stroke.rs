//! Stroke interpolation.
//!
//! Pointer-move events arrive far apart when the pointer moves quickly. To
//! keep the stroke continuous, the segment between two samples is walked one
//! unit of distance at a time and a brush stamp is placed at every step.

use crate::geometry::{GridCell, angle_between, distance_between, to_grid};
use kurbo::{Point, Rect};

/// Top-left cell of a `size`-sided brush stamp centered on `point`.
pub fn stamp_cell(point: Point, size: u32) -> GridCell {
    let half = f64::from(size) / 2.0;
    GridCell::new(to_grid(point.x - half), to_grid(point.y - half))
}

/// Cells a brush of `size` stamps while moving from `previous` to `current`.
///
/// Returns `floor(distance) + 1` cells, in order, starting at `previous`.
/// Consecutive cells may overlap or repeat; painting and erasing are
/// idempotent per cell so no deduplication is done. Non-finite input yields
/// no cells.
///
/// The result grows with the distance; use [`interpolate_within`] for
/// segments whose endpoints are not bounded.
pub fn interpolate(previous: Point, current: Point, size: u32) -> Vec<GridCell> {
    match Segment::new(previous, current, size) {
        Some(segment) => (0..=segment.last_step()).map(|i| segment.cell(i)).collect(),
        None => Vec::new(),
    }
}

/// The steps of [`interpolate`] whose stamps can touch `bounds`.
///
/// `bounds` is the canvas rectangle; stamps are kept when their center lies
/// within it widened by `size` on every side. Cells are produced lazily, so a
/// far off-canvas segment costs only the steps that cross the canvas.
pub fn interpolate_within(
    previous: Point,
    current: Point,
    size: u32,
    bounds: Rect,
) -> impl Iterator<Item = GridCell> {
    let segment = Segment::new(previous, current, size);
    let range = segment
        .as_ref()
        .and_then(|s| s.clip(bounds.inflate(f64::from(size), f64::from(size))))
        .unwrap_or((1, 0));
    (range.0..=range.1).filter_map(move |i| segment.as_ref().map(|s| s.cell(i)))
}

/// A stroke segment walked one unit of distance per step.
struct Segment {
    start: Point,
    dist: f64,
    step_x: f64,
    step_y: f64,
    half: f64,
}

impl Segment {
    fn new(previous: Point, current: Point, size: u32) -> Option<Self> {
        let dist = distance_between(previous, current);
        if !dist.is_finite() || !previous.is_finite() {
            log::warn!(
                "Dropping stroke segment with non-finite geometry: {:?} -> {:?}",
                previous,
                current
            );
            return None;
        }
        let (step_x, step_y) = angle_between(previous, current).sin_cos();
        Some(Self {
            start: previous,
            dist,
            step_x,
            step_y,
            half: f64::from(size) / 2.0,
        })
    }

    fn last_step(&self) -> u64 {
        self.dist.floor() as u64
    }

    fn cell(&self, i: u64) -> GridCell {
        let i = i as f64;
        GridCell::new(
            to_grid(self.start.x + self.step_x * i - self.half),
            to_grid(self.start.y + self.step_y * i - self.half),
        )
    }

    /// Inclusive step range whose positions fall inside `rect`.
    fn clip(&self, rect: Rect) -> Option<(u64, u64)> {
        let mut t0 = 0.0_f64;
        let mut t1 = self.dist.floor();
        let axes = [
            (self.start.x, self.step_x, rect.x0, rect.x1),
            (self.start.y, self.step_y, rect.y0, rect.y1),
        ];
        for (origin, step, lo, hi) in axes {
            if step.abs() < 1e-12 {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }
            let (a, b) = ((lo - origin) / step, (hi - origin) / step);
            t0 = t0.max(a.min(b));
            t1 = t1.min(a.max(b));
        }
        let (first, last) = (t0.ceil(), t1.floor());
        (first <= last).then(|| (first as u64, last as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance_single_cell() {
        let p = Point::new(10.0, 10.0);
        let cells = interpolate(p, p, 1);
        assert_eq!(cells, vec![GridCell::new(10, 10)]);
        assert_eq!(cells[0], stamp_cell(p, 1));
    }

    #[test]
    fn test_horizontal_segment() {
        let cells = interpolate(Point::new(0.0, 0.0), Point::new(3.0, 0.0), 1);
        assert_eq!(
            cells,
            vec![
                GridCell::new(0, 0),
                GridCell::new(1, 0),
                GridCell::new(2, 0),
                GridCell::new(3, 0),
            ]
        );
    }

    #[test]
    fn test_vertical_segment_upwards() {
        let cells = interpolate(Point::new(5.0, 5.0), Point::new(5.0, 2.0), 1);
        let ys: Vec<i32> = cells.iter().map(|c| c.y).collect();
        assert_eq!(ys, vec![5, 4, 3, 2]);
        assert!(cells.iter().all(|c| c.x == 5));
    }

    #[test]
    fn test_brush_size_offsets_top_left() {
        let cells = interpolate(Point::new(20.0, 20.0), Point::new(22.0, 20.0), 10);
        assert_eq!(cells.first(), Some(&GridCell::new(15, 15)));
        assert_eq!(cells.last(), Some(&GridCell::new(17, 15)));
    }

    #[test]
    fn test_cell_count_matches_distance() {
        let cases = [
            (Point::new(0.0, 0.0), Point::new(0.4, 0.3)),
            (Point::new(1.0, 1.0), Point::new(4.0, 5.0)),
            (Point::new(-3.5, 2.0), Point::new(10.25, -7.75)),
            (Point::new(100.0, 0.0), Point::new(0.0, 100.0)),
            (Point::new(0.0, 0.0), Point::new(0.0, 0.999)),
        ];
        for (a, b) in cases {
            let expected = distance_between(a, b).floor() as usize + 1;
            assert_eq!(interpolate(a, b, 3).len(), expected, "{:?} -> {:?}", a, b);
        }
    }

    #[test]
    fn test_diagonal_has_no_gaps() {
        let cells = interpolate(Point::new(0.0, 0.0), Point::new(30.0, 40.0), 1);
        for pair in cells.windows(2) {
            assert!((pair[1].x - pair[0].x).abs() <= 1);
            assert!((pair[1].y - pair[0].y).abs() <= 1);
        }
        let last = cells.last().unwrap();
        assert!((last.x - 30).abs() <= 1);
        assert!((last.y - 40).abs() <= 1);
    }

    #[test]
    fn test_reproducible() {
        let a = Point::new(3.3, 9.1);
        let b = Point::new(-12.7, 4.4);
        assert_eq!(interpolate(a, b, 4), interpolate(a, b, 4));
    }

    #[test]
    fn test_within_matches_interpolate_on_canvas() {
        let bounds = Rect::new(0.0, 0.0, 64.0, 64.0);
        let a = Point::new(3.3, 9.1);
        let b = Point::new(50.7, 40.4);
        let clipped: Vec<_> = interpolate_within(a, b, 4, bounds).collect();
        assert_eq!(clipped, interpolate(a, b, 4));
    }

    #[test]
    fn test_within_skips_off_canvas_steps() {
        let bounds = Rect::new(0.0, 0.0, 32.0, 32.0);
        let cells: Vec<_> =
            interpolate_within(Point::new(1.0, 1.0), Point::new(1e19, 1.0), 1, bounds).collect();
        assert!(!cells.is_empty());
        assert!(cells.len() <= 34);
        assert_eq!(cells[0], GridCell::new(1, 1));
        assert!(cells.iter().all(|c| c.y == 1 && c.x <= 33));
    }

    #[test]
    fn test_within_enters_from_far_away() {
        let bounds = Rect::new(0.0, 0.0, 16.0, 16.0);
        let a = Point::new(-1e10, 8.0);
        let b = Point::new(1e10, 8.0);
        let cells: Vec<_> = interpolate_within(a, b, 2, bounds).collect();
        assert!(!cells.is_empty());
        assert!(cells.len() <= 21);
        assert!(cells.iter().any(|c| c.x == 0));
        assert!(cells.iter().any(|c| c.x == 15));
    }

    #[test]
    fn test_within_misses_canvas_entirely() {
        let bounds = Rect::new(0.0, 0.0, 16.0, 16.0);
        let a = Point::new(-100.0, -100.0);
        let b = Point::new(-100.0, 1e12);
        assert_eq!(interpolate_within(a, b, 3, bounds).count(), 0);
        assert_eq!(interpolate_within(a, a, 3, bounds).count(), 0);
    }

    #[test]
    fn test_non_finite_is_dropped() {
        assert!(interpolate(Point::new(f64::NAN, 0.0), Point::new(1.0, 1.0), 1).is_empty());
        assert!(interpolate(Point::ZERO, Point::new(f64::INFINITY, 0.0), 1).is_empty());
        let bounds = Rect::new(0.0, 0.0, 8.0, 8.0);
        let far = Point::new(f64::INFINITY, 0.0);
        assert_eq!(interpolate_within(Point::ZERO, far, 1, bounds).count(), 0);
    }
}
