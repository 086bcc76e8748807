//! # Pixel Buffer Capability
//!
//! Points, pixel styles and the [`PixelBuffer`] trait shared by the
//! in-memory [`Bitmap`](crate::Bitmap) and the hardware
//! [`Ssd1306`](crate::Ssd1306) framebuffer.
//!
//! ## Bounds
//! Every coordinate-taking operation is bounds-checked by the implementation:
//! - mutation outside `[0, width) × [0, height)` is silently ignored
//! - queries outside the buffer report the pixel as unset

/// 2D point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const ORIGIN: Point = Point::new(0, 0);
}

impl core::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl core::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// How a drawing operation combines with the existing pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelStyle {
    /// Turn the pixel on
    Set,
    /// Turn the pixel off
    Unset,
    /// Toggle the pixel
    Xor,
    /// Leave the pixel alone
    None,
}

impl PixelStyle {
    /// The style that undoes this one
    ///
    /// Set and Unset swap, Xor undoes itself and None stays a no-op.
    pub const fn opposite(self) -> Self {
        match self {
            PixelStyle::Set => PixelStyle::Unset,
            PixelStyle::Unset => PixelStyle::Set,
            PixelStyle::Xor => PixelStyle::Xor,
            PixelStyle::None => PixelStyle::None,
        }
    }
}

/// Monochrome pixel buffer
///
/// Implementors supply the per-pixel primitives; compositing and style
/// dispatch come for free.
pub trait PixelBuffer {
    /// Width in pixels
    fn width(&self) -> i32;

    /// Height in pixels
    fn height(&self) -> i32;

    /// Is the pixel at `p` on? False outside the buffer.
    fn is_set(&self, p: Point) -> bool;

    /// Turn the pixel at `p` on
    fn set(&mut self, p: Point);

    /// Turn the pixel at `p` off
    fn unset(&mut self, p: Point);

    /// Toggle the pixel at `p`
    fn xor(&mut self, p: Point);

    /// Turn every pixel off
    fn clear(&mut self);

    /// Turn every pixel on
    fn fill(&mut self);

    /// Is `p` inside `[0, width) × [0, height)`?
    fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width() && p.y >= 0 && p.y < self.height()
    }

    /// Apply `style` to the pixel at `p`
    fn pixel(&mut self, p: Point, style: PixelStyle) {
        match style {
            PixelStyle::Set => self.set(p),
            PixelStyle::Unset => self.unset(p),
            PixelStyle::Xor => self.xor(p),
            PixelStyle::None => {}
        }
    }

    /// Overwrite the region covered by `source` placed at `offset`
    ///
    /// Only the intersection with this buffer is touched. Inside it every
    /// destination pixel is set or unset to match the source; this is a
    /// replacement, not a blend.
    fn copy_from(&mut self, source: &dyn PixelBuffer, offset: Point) {
        let x_start = offset.x.max(0);
        let x_end = self.width().min(source.width().saturating_add(offset.x));
        let y_start = offset.y.max(0);
        let y_end = self.height().min(source.height().saturating_add(offset.y));

        // Inside the overlap `output - offset` lies within the source, so it
        // cannot overflow

        for y in y_start..y_end {
            for x in x_start..x_end {
                let output = Point::new(x, y);
                if source.is_set(output - offset) {
                    self.set(output);
                } else {
                    self.unset(output);
                }
            }
        }
    }
}
