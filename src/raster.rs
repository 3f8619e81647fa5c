// Stroke rasterizer: paints round-capped segments into a CoverageBuffer.
//
// A stroke of width `w` from A to B covers the "capsule" of points within
// w/2 of segment AB. A pixel is painted when its centre (x+0.5, y+0.5) lies
// inside the capsule. The capsule is convex, so each pixel row crosses it in
// one interval; we solve that interval per row instead of testing every
// pixel in the bounding box. Cost is O(rows touched), not O(bbox area).

use log::trace;

use crate::coverage::CoverageBuffer;
use crate::types::{Point, Stroke};

/// Strokes thinner than this are drawn as one-pixel hairlines.
const HAIRLINE_WIDTH: f64 = 1.0;

/// Paint a round-capped segment from `start` to `end`.
///
/// Never fails: parts outside the buffer are clipped, `start == end` paints a
/// dot, and `width` below one pixel (including zero or negative) falls back to
/// a hairline. Non-finite coordinates paint nothing.
pub fn draw_segment(buffer: &CoverageBuffer, start: Point, end: Point, width: f32) {
    if !start.is_finite() || !end.is_finite() {
        trace!("skipping segment with non-finite endpoint {start:?} -> {end:?}");
        return;
    }

    let width = if width.is_finite() { f64::from(width) } else { 0.0 };
    let radius = width.max(HAIRLINE_WIDTH) / 2.0;
    let a = (f64::from(start.x), f64::from(start.y));
    let b = (f64::from(end.x), f64::from(end.y));

    trace!("segment {a:?} -> {b:?} r={radius}");
    fill_capsule(buffer, a, b, radius);

    // A thin dot sitting on a pixel corner has no pixel centre within reach;
    // the pixels holding the endpoints are always touched.
    reveal_containing(buffer, a);
    reveal_containing(buffer, b);
}

/// [`draw_segment`] for a prepared [`Stroke`].
pub fn draw_stroke(buffer: &CoverageBuffer, stroke: &Stroke) {
    draw_segment(buffer, stroke.start, stroke.end, stroke.width);
}

fn fill_capsule(buffer: &CoverageBuffer, a: (f64, f64), b: (f64, f64), r: f64) {
    let w = i64::from(buffer.width());
    let h = i64::from(buffer.height());

    // Rows whose centre can be within r of the segment, clipped to the grid.
    let y_lo = a.1.min(b.1) - r;
    let y_hi = a.1.max(b.1) + r;
    let row0 = ((y_lo - 0.5).ceil() as i64).max(0);
    let row1 = ((y_hi - 0.5).floor() as i64).min(h - 1);

    for row in row0..=row1 {
        let yc = row as f64 + 0.5;
        let Some((lo, hi)) = capsule_span(a, b, r, yc) else { continue };

        let col0 = ((lo - 0.5).ceil() as i64).max(0);
        let col1 = ((hi - 0.5).floor() as i64).min(w - 1);
        if col0 > col1 {
            continue;
        }
        buffer.reveal_run(row as u32, col0 as u32..col1 as u32 + 1);
    }
}

/// X-interval where the horizontal line `y = yc` lies inside the capsule.
///
/// The capsule is the union of the two end discs and the rectangle swept
/// along AB; its convexity makes the union of the three intervals contiguous.
fn capsule_span(a: (f64, f64), b: (f64, f64), r: f64, yc: f64) -> Option<(f64, f64)> {
    let mut span = disc_span(a, r, yc);
    span = union(span, disc_span(b, r, yc));

    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len2 = dx * dx + dy * dy;
    if len2 > 0.0 {
        // With u = x - ax and v = yc - ay:
        //   along  = dx*u + dy*v     must lie in [0, len2]
        //   across = -dy*u + dx*v    must lie in [-r*len, r*len]
        let v = yc - a.1;
        let len = len2.sqrt();
        let band = intersect(
            linear_range(dx, dy * v, 0.0, len2),
            linear_range(-dy, dx * v, -r * len, r * len),
        )
        .map(|(lo, hi)| (lo + a.0, hi + a.0));
        span = union(span, band);
    }
    span
}

fn disc_span(c: (f64, f64), r: f64, yc: f64) -> Option<(f64, f64)> {
    let dy = yc - c.1;
    let rem = r * r - dy * dy;
    if rem < 0.0 {
        return None;
    }
    let half = rem.sqrt();
    Some((c.0 - half, c.0 + half))
}

/// Values of `u` with `k*u + c` in `[lo, hi]`.
fn linear_range(k: f64, c: f64, lo: f64, hi: f64) -> Option<(f64, f64)> {
    if k == 0.0 {
        return (lo..=hi).contains(&c).then_some((f64::NEG_INFINITY, f64::INFINITY));
    }
    let u0 = (lo - c) / k;
    let u1 = (hi - c) / k;
    Some((u0.min(u1), u0.max(u1)))
}

fn intersect(p: Option<(f64, f64)>, q: Option<(f64, f64)>) -> Option<(f64, f64)> {
    let (p, q) = (p?, q?);
    let lo = p.0.max(q.0);
    let hi = p.1.min(q.1);
    (lo <= hi).then_some((lo, hi))
}

fn union(p: Option<(f64, f64)>, q: Option<(f64, f64)>) -> Option<(f64, f64)> {
    match (p, q) {
        (Some(p), Some(q)) => Some((p.0.min(q.0), p.1.max(q.1))),
        (p, None) => p,
        (None, q) => q,
    }
}

fn reveal_containing(buffer: &CoverageBuffer, p: (f64, f64)) {
    let (x, y) = (p.0.floor(), p.1.floor());
    if x < 0.0 || y < 0.0 || x >= f64::from(buffer.width()) || y >= f64::from(buffer.height()) {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    buffer.reveal_run(y, x..x + 1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::REVEALED;

    fn buffer(w: u32, h: u32) -> CoverageBuffer {
        CoverageBuffer::new(w, h).unwrap()
    }

    #[test]
    fn horizontal_segment_paints_a_band() {
        let b = buffer(100, 100);
        draw_segment(&b, Point::new(0.0, 50.0), Point::new(99.0, 50.0), 10.0);
        // Rows 45..=54 have centres within 5 of y = 50.
        assert_eq!(b.revealed_count(), 1000);
        assert_eq!(b.pixel_at(0, 45), Ok(REVEALED));
        assert_eq!(b.pixel_at(99, 54), Ok(REVEALED));
        assert_eq!(b.pixel_at(50, 44), Ok(0));
        assert_eq!(b.pixel_at(50, 55), Ok(0));
    }

    #[test]
    fn vertical_segment_matches_horizontal_by_symmetry() {
        let b = buffer(100, 100);
        draw_segment(&b, Point::new(50.0, 0.0), Point::new(50.0, 99.0), 10.0);
        assert_eq!(b.revealed_count(), 1000);
    }

    #[test]
    fn dot_on_pixel_corner() {
        let b = buffer(100, 100);
        draw_segment(&b, Point::new(5.0, 5.0), Point::new(5.0, 5.0), 4.0);
        // Centres at offsets (+-0.5, +-0.5) and (+-0.5, +-1.5) / (+-1.5, +-0.5).
        assert_eq!(b.revealed_count(), 12);
        assert_eq!(b.pixel_at(6, 5), Ok(REVEALED));
        assert_eq!(b.pixel_at(4, 3), Ok(REVEALED));
        assert_eq!(b.pixel_at(6, 6), Ok(0));
        assert_eq!(b.pixel_at(3, 3), Ok(0));
    }

    #[test]
    fn large_dot_area_is_close_to_disc_area() {
        let b = buffer(100, 100);
        let w = 20.0_f32;
        draw_segment(&b, Point::new(50.3, 50.7), Point::new(50.3, 50.7), w);
        let expected = std::f64::consts::PI * f64::from(w / 2.0).powi(2);
        let got = b.revealed_count() as f64;
        assert!((got - expected).abs() / expected < 0.05, "got {got}, expected ~{expected}");
    }

    #[test]
    fn zero_width_draws_a_connected_hairline() {
        let b = buffer(20, 20);
        draw_segment(&b, Point::new(0.2, 0.2), Point::new(19.7, 13.4), 0.0);
        // Every column between the endpoints has at least one painted pixel.
        for x in 0..20 {
            assert!((0..20).any(|y| b.pixel_at(x, y) == Ok(REVEALED)), "gap at column {x}");
        }
        assert_eq!(b.pixel_at(0, 0), Ok(REVEALED));
        assert_eq!(b.pixel_at(19, 13), Ok(REVEALED));
        // Thin: nowhere near the area of a 1px-wide band doubled.
        assert!(b.revealed_count() < 60);
    }

    #[test]
    fn hairline_dot_on_pixel_corner_paints_the_containing_pixel() {
        let b = buffer(10, 10);
        // No pixel centre lies within 0.5 of (5, 5); only the endpoint rule paints.
        draw_segment(&b, Point::new(5.0, 5.0), Point::new(5.0, 5.0), 0.0);
        assert_eq!(b.revealed_count(), 1);
        assert_eq!(b.pixel_at(5, 5), Ok(REVEALED));

        // The far corner belongs to a pixel outside the buffer.
        let edge = buffer(10, 10);
        draw_segment(&edge, Point::new(10.0, 10.0), Point::new(10.0, 10.0), 0.0);
        assert_eq!(edge.revealed_count(), 0);
    }

    #[test]
    fn negative_and_nan_widths_use_hairline() {
        let b = buffer(10, 10);
        draw_segment(&b, Point::new(2.5, 2.5), Point::new(2.5, 2.5), -3.0);
        assert_eq!(b.revealed_count(), 1);
        draw_segment(&b, Point::new(7.5, 7.5), Point::new(7.5, 7.5), f32::NAN);
        assert_eq!(b.revealed_count(), 2);
    }

    #[test]
    fn wide_diagonal_covers_everything() {
        let b = buffer(37, 23);
        let diag = (37.0_f32 * 37.0 + 23.0 * 23.0).sqrt();
        draw_segment(&b, Point::new(0.0, 0.0), Point::new(37.0, 23.0), diag);
        assert_eq!(b.revealed_count(), b.len());
    }

    #[test]
    fn far_out_of_bounds_is_clipped() {
        let b = buffer(16, 16);
        draw_segment(&b, Point::new(-1.0e9, 8.0), Point::new(1.0e9, 8.0), 2.0);
        // Rows 7 and 8 fully painted, nothing else.
        assert_eq!(b.revealed_count(), 32);

        let c = buffer(16, 16);
        draw_segment(&c, Point::new(-50.0, -50.0), Point::new(-40.0, -45.0), 6.0);
        assert_eq!(c.revealed_count(), 0);
    }

    #[test]
    fn segment_crossing_into_bounds_paints_the_inside_part() {
        let b = buffer(10, 10);
        draw_segment(&b, Point::new(-20.0, 5.0), Point::new(4.5, 5.0), 2.0);
        // Rows 4 and 5 sit 0.5 from the centre line; the cap stops before column 5.
        assert_eq!(b.revealed_count(), 10);
        for x in 0..5 {
            assert_eq!(b.pixel_at(x, 4), Ok(REVEALED));
            assert_eq!(b.pixel_at(x, 5), Ok(REVEALED));
        }
        assert_eq!(b.pixel_at(6, 5), Ok(0));
    }

    #[test]
    fn non_finite_endpoints_paint_nothing() {
        let b = buffer(10, 10);
        draw_segment(&b, Point::new(f32::NAN, 1.0), Point::new(3.0, 3.0), 4.0);
        draw_segment(&b, Point::new(1.0, 1.0), Point::new(f32::INFINITY, 3.0), 4.0);
        assert_eq!(b.revealed_count(), 0);
    }

    #[test]
    fn draw_stroke_forwards_to_segment() {
        let b = buffer(100, 100);
        draw_stroke(&b, &Stroke::dot(Point::new(5.0, 5.0), 4.0));
        assert_eq!(b.revealed_count(), 12);
    }
}
