//! Drawing primitives
//!
//! Lines and boxes rendered through any [`PixelBuffer`]. Every pixel goes
//! through [`PixelBuffer::pixel`], so the [`PixelStyle`] decides how each one
//! is written. Walks are clipped to the buffer up front, so endpoints may sit
//! anywhere in the `i32` range without cost or overflow.

use crate::pixel::{PixelBuffer, PixelStyle, Point};

/// Range of steps `k` in `0..=len` for which `start + dir * k` falls inside
/// `[0, limit)`, or `None` if the walk never enters the buffer
fn visible_steps(start: i64, dir: i64, len: i64, limit: i64) -> Option<(i64, i64)> {
    let (lo, hi) = if dir > 0 {
        (-start, limit - 1 - start)
    } else {
        (start - (limit - 1), start)
    };
    let (lo, hi) = (lo.max(0), hi.min(len));
    (lo <= hi).then_some((lo, hi))
}

/// Visit every coordinate from `from` to `to` inclusive that lies in
/// `[0, limit)`, in walking order
fn walk_span(from: i32, to: i32, limit: i32, mut visit: impl FnMut(i32)) {
    let (from, to) = (i64::from(from), i64::from(to));
    let dir = if from <= to { 1 } else { -1 };
    if let Some((first, last)) = visible_steps(from, dir, (to - from).abs(), i64::from(limit)) {
        for k in first..=last {
            visit((from + dir * k) as i32);
        }
    }
}

/// Draw row `y` from `x1` to `x2`, both ends inclusive
pub fn horizontal_line<P: PixelBuffer + ?Sized>(
    pixels: &mut P,
    x1: i32,
    x2: i32,
    y: i32,
    style: PixelStyle,
) {
    let width = pixels.width();
    walk_span(x1, x2, width, |x| pixels.pixel(Point::new(x, y), style));
}

/// Draw column `x` from `y1` to `y2`, both ends inclusive
pub fn vertical_line<P: PixelBuffer + ?Sized>(
    pixels: &mut P,
    x: i32,
    y1: i32,
    y2: i32,
    style: PixelStyle,
) {
    let height = pixels.height();
    walk_span(y1, y2, height, |y| pixels.pixel(Point::new(x, y), style));
}

/// Draw a straight line from `p1` to `p2`, both ends inclusive
///
/// Axis-aligned lines use the row/column fast paths. Anything else walks the
/// major axis one pixel at a time with an integer Bresenham decision value;
/// the minor axis advances whenever that value is non-negative.
///
/// Steps whose major coordinate falls outside the buffer are skipped: the
/// walk starts at the first visible step with the decision value it would
/// have reached there, so the pixels drawn match a full walk.
pub fn line<P: PixelBuffer + ?Sized>(pixels: &mut P, p1: Point, p2: Point, style: PixelStyle) {
    if p1.y == p2.y {
        horizontal_line(pixels, p1.x, p2.x, p1.y, style);
        return;
    }
    if p1.x == p2.x {
        vertical_line(pixels, p1.x, p1.y, p2.y, style);
        return;
    }

    let (x1, y1) = (i64::from(p1.x), i64::from(p1.y));
    let (x2, y2) = (i64::from(p2.x), i64::from(p2.y));
    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();
    let sx = if x1 <= x2 { 1 } else { -1 };
    let sy = if y1 <= y2 { 1 } else { -1 };

    // Walk the longer axis; `major` and `minor` are its deltas
    let x_major = dx >= dy;
    let (major, minor) = if x_major { (dx, dy) } else { (dy, dx) };
    let (major_start, major_dir, minor_start, minor_dir, limit) = if x_major {
        (x1, sx, y1, sy, pixels.width())
    } else {
        (y1, sy, x1, sx, pixels.height())
    };

    let (first, last) = match visible_steps(major_start, major_dir, major, i64::from(limit)) {
        Some(steps) => steps,
        None => return,
    };

    let incr_straight = 2 * minor;
    let incr_diagonal = 2 * (minor - major);

    // Minor-axis advances taken before step `first`; the decision value stays
    // in [2*minor - 2*major, 2*minor), which pins down the count
    let (major_w, minor_w, first_w) = (i128::from(major), i128::from(minor), i128::from(first));
    let advances = (major_w + 2 * minor_w * first_w) / (2 * major_w);
    let mut d = (2 * minor_w - major_w + 2 * minor_w * first_w - 2 * major_w * advances) as i64;

    let mut major_pos = major_start + major_dir * first;
    let mut minor_pos = minor_start + minor_dir * advances as i64;
    let point = |major_pos: i64, minor_pos: i64| {
        if x_major {
            Point::new(major_pos as i32, minor_pos as i32)
        } else {
            Point::new(minor_pos as i32, major_pos as i32)
        }
    };

    pixels.pixel(point(major_pos, minor_pos), style);
    for _ in first..last {
        if d >= 0 {
            d += incr_diagonal;
            minor_pos += minor_dir;
        } else {
            d += incr_straight;
        }
        major_pos += major_dir;
        pixels.pixel(point(major_pos, minor_pos), style);
    }
}

/// Draw the outline of the rectangle with corners `p1` and `p2`
pub fn box_outline<P: PixelBuffer + ?Sized>(
    pixels: &mut P,
    p1: Point,
    p2: Point,
    style: PixelStyle,
) {
    vertical_line(pixels, p1.x, p1.y, p2.y, style);
    horizontal_line(pixels, p1.x, p2.x, p1.y, style);
    vertical_line(pixels, p2.x, p1.y, p2.y, style);
    horizontal_line(pixels, p1.x, p2.x, p2.y, style);
}

/// Fill the rectangle with corners `p1` and `p2`
pub fn box_filled<P: PixelBuffer + ?Sized>(
    pixels: &mut P,
    p1: Point,
    p2: Point,
    style: PixelStyle,
) {
    let height = pixels.height();
    walk_span(p1.y, p2.y, height, |y| {
        horizontal_line(&mut *pixels, p1.x, p2.x, y, style)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Bitmap;
    use std::collections::BTreeSet;

    fn set_points(bitmap: &Bitmap) -> BTreeSet<(i32, i32)> {
        let mut points = BTreeSet::new();
        for y in 0..bitmap.height() {
            for x in 0..bitmap.width() {
                if bitmap.is_set(Point::new(x, y)) {
                    points.insert((x, y));
                }
            }
        }
        points
    }

    fn expect(points: &[(i32, i32)]) -> BTreeSet<(i32, i32)> {
        points.iter().copied().collect()
    }

    #[test]
    fn test_shallow_line_pixels() {
        let mut bitmap = Bitmap::new(8, 8);
        line(&mut bitmap, Point::new(0, 0), Point::new(4, 2), PixelStyle::Set);
        assert_eq!(
            set_points(&bitmap),
            expect(&[(0, 0), (1, 1), (2, 1), (3, 2), (4, 2)])
        );
    }

    #[test]
    fn test_steep_line_mirrors_shallow() {
        let mut bitmap = Bitmap::new(8, 8);
        line(&mut bitmap, Point::new(0, 0), Point::new(2, 4), PixelStyle::Set);
        assert_eq!(
            set_points(&bitmap),
            expect(&[(0, 0), (1, 1), (1, 2), (2, 3), (2, 4)])
        );
    }

    #[test]
    fn test_line_draws_both_endpoints_any_direction() {
        let ends = [
            (Point::new(1, 1), Point::new(6, 3)),
            (Point::new(6, 3), Point::new(1, 1)),
            (Point::new(1, 6), Point::new(3, 1)),
            (Point::new(7, 0), Point::new(0, 7)),
        ];
        for (p1, p2) in ends {
            let mut bitmap = Bitmap::new(8, 8);
            line(&mut bitmap, p1, p2, PixelStyle::Set);
            assert!(bitmap.is_set(p1), "{:?} -> {:?}", p1, p2);
            assert!(bitmap.is_set(p2), "{:?} -> {:?}", p1, p2);

            // One pixel per step of the longer axis
            let major = (p2.x - p1.x).abs().max((p2.y - p1.y).abs());
            assert_eq!(set_points(&bitmap).len(), major as usize + 1);
        }
    }

    #[test]
    fn test_diagonal_line() {
        let mut bitmap = Bitmap::new(4, 4);
        line(&mut bitmap, Point::new(3, 3), Point::new(0, 0), PixelStyle::Set);
        assert_eq!(set_points(&bitmap), expect(&[(0, 0), (1, 1), (2, 2), (3, 3)]));
    }

    #[test]
    fn test_degenerate_lines_draw_one_pixel() {
        let mut bitmap = Bitmap::new(4, 4);
        horizontal_line(&mut bitmap, 2, 2, 1, PixelStyle::Set);
        assert_eq!(set_points(&bitmap), expect(&[(2, 1)]));

        let mut bitmap = Bitmap::new(4, 4);
        vertical_line(&mut bitmap, 3, 0, 0, PixelStyle::Set);
        assert_eq!(set_points(&bitmap), expect(&[(3, 0)]));

        let mut bitmap = Bitmap::new(4, 4);
        line(&mut bitmap, Point::new(1, 2), Point::new(1, 2), PixelStyle::Set);
        assert_eq!(set_points(&bitmap), expect(&[(1, 2)]));
    }

    #[test]
    fn test_reversed_axis_lines() {
        let mut bitmap = Bitmap::new(6, 6);
        horizontal_line(&mut bitmap, 4, 1, 0, PixelStyle::Set);
        vertical_line(&mut bitmap, 5, 5, 3, PixelStyle::Set);
        assert_eq!(
            set_points(&bitmap),
            expect(&[(1, 0), (2, 0), (3, 0), (4, 0), (5, 3), (5, 4), (5, 5)])
        );
    }

    #[test]
    fn test_line_clips_off_buffer() {
        let mut bitmap = Bitmap::new(4, 4);
        line(&mut bitmap, Point::new(-2, 1), Point::new(6, 1), PixelStyle::Set);
        assert_eq!(set_points(&bitmap), expect(&[(0, 1), (1, 1), (2, 1), (3, 1)]));
    }

    #[test]
    fn test_xor_style_toggles() {
        let mut bitmap = Bitmap::new(4, 4);
        bitmap.fill();
        horizontal_line(&mut bitmap, 0, 3, 2, PixelStyle::Xor);
        assert_eq!(set_points(&bitmap).len(), 12);
        assert!(!bitmap.is_set(Point::new(1, 2)));

        horizontal_line(&mut bitmap, 0, 3, 2, PixelStyle::None);
        assert_eq!(set_points(&bitmap).len(), 12);
    }

    #[test]
    fn test_box_outline() {
        let mut bitmap = Bitmap::new(5, 5);
        box_outline(&mut bitmap, Point::new(3, 3), Point::new(1, 1), PixelStyle::Set);
        assert_eq!(
            set_points(&bitmap),
            expect(&[
                (1, 1), (2, 1), (3, 1),
                (1, 2), (3, 2),
                (1, 3), (2, 3), (3, 3),
            ])
        );
    }

    #[test]
    fn test_box_filled_covers_rectangle() {
        let mut bitmap = Bitmap::new(5, 5);
        box_filled(&mut bitmap, Point::new(1, 1), Point::new(3, 3), PixelStyle::Set);

        let points = set_points(&bitmap);
        assert_eq!(points.len(), 9);
        for y in 1..=3 {
            for x in 1..=3 {
                assert!(points.contains(&(x, y)));
            }
        }
    }

    #[test]
    fn test_box_filled_unset_cuts_hole() {
        let mut bitmap = Bitmap::new(5, 5);
        bitmap.fill();
        box_filled(&mut bitmap, Point::new(3, 2), Point::new(2, 3), PixelStyle::Unset);
        assert_eq!(set_points(&bitmap).len(), 25 - 4);
        assert!(!bitmap.is_set(Point::new(2, 2)));
        assert!(!bitmap.is_set(Point::new(3, 3)));
    }

    #[test]
    fn test_far_off_screen_endpoints() {
        let mut bitmap = Bitmap::new(8, 8);
        line(&mut bitmap, Point::new(i32::MIN, 0), Point::new(i32::MAX, 1), PixelStyle::Set);
        // Shallow line: exactly one pixel per visible column
        assert_eq!(set_points(&bitmap).len(), 8);
        for x in 0..8 {
            assert!(bitmap.is_set(Point::new(x, 0)) || bitmap.is_set(Point::new(x, 1)));
        }

        let mut bitmap = Bitmap::new(8, 8);
        line(&mut bitmap, Point::new(3, i32::MAX), Point::new(4, i32::MIN), PixelStyle::Set);
        assert_eq!(set_points(&bitmap).len(), 8);

        let mut bitmap = Bitmap::new(8, 8);
        line(&mut bitmap, Point::new(i32::MIN, i32::MIN), Point::new(i32::MAX, i32::MAX), PixelStyle::Set);
        line(&mut bitmap, Point::new(i32::MAX, i32::MIN), Point::new(-100, -3), PixelStyle::Set);
        line(&mut bitmap, Point::new(20, 20), Point::new(i32::MAX, i32::MIN + 1), PixelStyle::Set);
    }

    #[test]
    fn test_far_off_screen_spans_and_boxes() {
        let mut bitmap = Bitmap::new(8, 8);
        horizontal_line(&mut bitmap, i32::MAX, i32::MIN, 3, PixelStyle::Set);
        vertical_line(&mut bitmap, 5, i32::MIN, i32::MAX, PixelStyle::Set);
        assert_eq!(set_points(&bitmap).len(), 8 + 8 - 1);

        let mut bitmap = Bitmap::new(8, 8);
        box_filled(&mut bitmap, Point::new(i32::MIN, i32::MAX), Point::new(i32::MAX, i32::MIN), PixelStyle::Set);
        assert_eq!(set_points(&bitmap).len(), 64);

        let mut bitmap = Bitmap::new(8, 8);
        box_outline(&mut bitmap, Point::new(-1_000_000, -1_000_000), Point::new(1_000_000, 1_000_000), PixelStyle::Set);
        assert!(set_points(&bitmap).is_empty());
    }

    #[test]
    fn test_clipped_line_matches_unclipped() {
        // Same lines drawn fully inside a large canvas and partly outside a
        // small one must agree wherever they overlap
        let shift = Point::new(128, 64);
        let lines = [
            (Point::new(-50, -20), Point::new(70, 30)),
            (Point::new(70, 30), Point::new(-50, -20)),
            (Point::new(-7, 40), Point::new(12, -55)),
            (Point::new(15, -3), Point::new(-90, 9)),
            (Point::new(-1, -1), Point::new(16, 17)),
        ];
        for (p1, p2) in lines {
            let mut small = Bitmap::new(16, 16);
            let mut large = Bitmap::new(256, 128);
            line(&mut small, p1, p2, PixelStyle::Set);
            line(&mut large, p1 + shift, p2 + shift, PixelStyle::Set);

            for y in 0..16 {
                for x in 0..16 {
                    let p = Point::new(x, y);
                    assert_eq!(small.is_set(p), large.is_set(p + shift), "{:?} -> {:?} at {:?}", p1, p2, p);
                }
            }
        }
    }

    #[test]
    fn test_draw_through_trait_object() {
        let mut bitmap = Bitmap::new(8, 8);
        {
            let pixels: &mut dyn PixelBuffer = &mut bitmap;
            line(pixels, Point::new(0, 7), Point::new(7, 0), PixelStyle::Set);
        }
        assert!(bitmap.is_set(Point::new(0, 7)));
        assert!(bitmap.is_set(Point::new(7, 0)));
        assert_eq!(set_points(&bitmap).len(), 8);
    }
}
