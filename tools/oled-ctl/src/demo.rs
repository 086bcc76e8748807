//! Demo scenes
//!
//! Everything here draws through [`PixelBuffer`], so a scene can be rendered
//! into an off-screen [`Bitmap`] for a terminal preview or straight into the
//! panel framebuffer.

use ssd1306_i2c::graphics::{box_filled, box_outline, horizontal_line, line, vertical_line};
use ssd1306_i2c::{Bitmap, PixelBuffer, PixelStyle, Point};

/// Sprite edge length in pixels
pub const SPRITE_SIZE: i32 = 16;

/// 16×16 sprite, two bytes per row, MSB leftmost
const SPRITE: [u8; 32] = [
    0b0000_1010, 0b1010_0000,
    0b0000_1111, 0b1100_0000,
    0b0011_1111, 0b1110_1000,
    0b0011_1111, 0b0101_0000,
    0b0111_1111, 0b1110_1010,
    0b0111_1111, 0b1101_0100,
    0b1111_1111, 0b1010_1010,
    0b0111_0111, 0b0101_0000,
    0b1111_1111, 0b1110_1010,
    0b0101_0101, 0b0100_0000,
    0b0011_1010, 0b1010_0010,
    0b0001_0101, 0b0000_0000,
    0b0010_1010, 0b1010_1000,
    0b0000_0100, 0b0000_0000,
    0b0000_0010, 0b0010_0000,
    0b0000_0000, 0b0000_0000,
];

pub fn sprite() -> Bitmap {
    Bitmap::from_bytes(SPRITE_SIZE, SPRITE_SIZE, &SPRITE)
}

/// Border, nested boxes and crossing diagonals
pub fn draw_shapes<P: PixelBuffer + ?Sized>(pixels: &mut P) {
    let right = pixels.width() - 1;
    let bottom = pixels.height() - 1;

    pixels.clear();
    box_outline(pixels, Point::ORIGIN, Point::new(right, bottom), PixelStyle::Set);
    box_outline(pixels, Point::new(4, 4), Point::new(right - 4, bottom - 4), PixelStyle::Set);
    box_filled(pixels, Point::new(8, 8), Point::new(23, 23), PixelStyle::Set);

    // Diagonals toggle where they cross the filled box
    line(pixels, Point::new(4, 4), Point::new(right - 4, bottom - 4), PixelStyle::Xor);
    line(pixels, Point::new(4, bottom - 4), Point::new(right - 4, 4), PixelStyle::Xor);

    horizontal_line(pixels, 8, right - 8, bottom / 2, PixelStyle::Set);
    vertical_line(pixels, right / 2, 8, bottom - 8, PixelStyle::Set);
}

/// Cover the buffer with copies of `sprite`, starting half a sprite off the
/// top-left corner so partial copies are clipped on every edge
pub fn draw_tiles<P: PixelBuffer + ?Sized>(pixels: &mut P, sprite: &Bitmap) {
    let (w, h) = (sprite.width(), sprite.height());

    let mut y = -(h / 2);
    while y < pixels.height() + h / 2 {
        let mut x = -(w / 2);
        while x < pixels.width() + w / 2 {
            pixels.copy_from(sprite, Point::new(x, y));
            x += w;
        }
        y += h;
    }
}

/// One text line per row, `set` for lit pixels and `unset` for dark ones
pub fn render_rows(pixels: &dyn PixelBuffer, set: char, unset: char) -> Vec<String> {
    (0..pixels.height())
        .map(|y| {
            (0..pixels.width())
                .map(|x| if pixels.is_set(Point::new(x, y)) { set } else { unset })
                .collect()
        })
        .collect()
}
