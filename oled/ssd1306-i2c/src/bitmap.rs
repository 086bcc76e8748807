//! Bit-packed in-memory bitmap
//!
//! Off-screen pixel buffer used for sprites and composition. Rows are stored
//! back to back, `ceil(width / 8)` bytes each, most significant bit first:
//! pixel (x, y) is bit `7 - x % 8` of byte `x / 8` in row `y`.

use crate::pixel::{PixelBuffer, Point};

/// Fixed-size monochrome bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: i32,
    height: i32,
    bytes_per_row: usize,
    bytes: Vec<u8>,
}

/// Byte index and bit mask for one pixel
#[derive(Debug, Clone, Copy)]
struct PixelOffset {
    index: usize,
    mask: u8,
}

impl Bitmap {
    /// Create a bitmap with every pixel unset
    ///
    /// # Panics
    /// If either dimension is not positive.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0, "width must be greater than zero");
        assert!(height > 0, "height must be greater than zero");

        let bytes_per_row = (width as usize + 7) / 8;
        Self {
            width,
            height,
            bytes_per_row,
            bytes: vec![0; bytes_per_row * height as usize],
        }
    }

    /// Create a bitmap from packed row-major bytes
    ///
    /// Each row takes `ceil(width / 8)` bytes, MSB is the leftmost pixel.
    /// Missing bytes leave pixels unset; bytes past the last row are ignored.
    ///
    /// # Panics
    /// If either dimension is not positive.
    pub fn from_bytes(width: i32, height: i32, packed: &[u8]) -> Self {
        let mut bitmap = Self::new(width, height);
        let len = packed.len().min(bitmap.bytes.len());
        bitmap.bytes[..len].copy_from_slice(&packed[..len]);
        bitmap.mask_padding();
        bitmap
    }

    /// Bytes per packed row
    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    /// Packed storage, row-major
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// One packed row, `None` past the last row
    pub fn row(&self, y: i32) -> Option<&[u8]> {
        if y < 0 || y >= self.height {
            return None;
        }
        let start = y as usize * self.bytes_per_row;
        Some(&self.bytes[start..start + self.bytes_per_row])
    }

    fn offset(&self, p: Point) -> Option<PixelOffset> {
        if !self.contains(p) {
            return None;
        }
        let (x, y) = (p.x as usize, p.y as usize);
        Some(PixelOffset {
            index: y * self.bytes_per_row + x / 8,
            mask: 1 << (7 - (x % 8)),
        })
    }

    /// Mask selecting the bits of the last byte in a row that map to pixels
    fn last_byte_mask(&self) -> u8 {
        match self.width % 8 {
            0 => 0xFF,
            used => 0xFFu8 << (8 - used),
        }
    }

    fn mask_padding(&mut self) {
        let mask = self.last_byte_mask();
        if mask == 0xFF {
            return;
        }
        for row in self.bytes.chunks_exact_mut(self.bytes_per_row) {
            if let Some(last) = row.last_mut() {
                *last &= mask;
            }
        }
    }

    fn fill_with(&mut self, value: u8) {
        self.bytes.fill(value);
        self.mask_padding();
    }
}

impl PixelBuffer for Bitmap {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn is_set(&self, p: Point) -> bool {
        match self.offset(p) {
            Some(offset) => self.bytes[offset.index] & offset.mask != 0,
            None => false,
        }
    }

    fn set(&mut self, p: Point) {
        if let Some(offset) = self.offset(p) {
            self.bytes[offset.index] |= offset.mask;
        }
    }

    fn unset(&mut self, p: Point) {
        if let Some(offset) = self.offset(p) {
            self.bytes[offset.index] &= !offset.mask;
        }
    }

    fn xor(&mut self, p: Point) {
        if let Some(offset) = self.offset(p) {
            self.bytes[offset.index] ^= offset.mask;
        }
    }

    fn clear(&mut self) {
        self.fill_with(0x00);
    }

    fn fill(&mut self) {
        self.fill_with(0xFF);
    }
}
