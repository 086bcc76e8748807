//! SSD1306 128×64 framebuffer
//!
//! Display RAM is mirrored locally as 32 blocks, each covering 32 columns of
//! one 8-row page. Every block carries the data control byte in front of its
//! pixels so a dirty block goes out as a single bus transaction.
//!
//! ```text
//!          column 0    32    64    96   127
//! page 0   │ blk 0 │ blk 1 │ blk 2 │ blk 3 │   rows 0..7
//! page 1   │ blk 4 │ blk 5 │ blk 6 │ blk 7 │   rows 8..15
//!   ...
//! page 7   │ blk 28│ blk 29│ blk 30│ blk 31│   rows 56..63
//! ```
//!
//! Within a block, byte `1 + x % 32` holds column `x`, and bit `y % 8`
//! (LSB at the top) holds row `y`.

use std::time::Duration;

use log::{debug, info, trace, warn};

use super::commands;
use super::DisplayControl;
use crate::bitmap::Bitmap;
use crate::error::{DeviceError, Operation, Result};
use crate::hal::Bus;
use crate::pixel::{PixelBuffer, Point};

/// Display width in pixels
pub const WIDTH: i32 = 128;
/// Display height in pixels
pub const HEIGHT: i32 = 64;

const ROWS_PER_PAGE: i32 = 8;
const COLUMNS_PER_BLOCK: i32 = 32;
const BLOCKS_PER_PAGE: usize = (WIDTH / COLUMNS_PER_BLOCK) as usize;
/// Control byte plus one block of column data
const BUFFER_SIZE: usize = 1 + COLUMNS_PER_BLOCK as usize;
const BLOCKS: usize = BLOCKS_PER_PAGE * (HEIGHT / ROWS_PER_PAGE) as usize;

/// Minimum wait after the init sequence before the panel accepts data
pub const POWER_ON_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
struct PixelBlock {
    bytes: [u8; BUFFER_SIZE],
    dirty: bool,
}

impl PixelBlock {
    fn new() -> Self {
        let mut bytes = [0u8; BUFFER_SIZE];
        bytes[0] = commands::CONTROL_DATA;
        // Display RAM content is unknown at power-up
        Self { bytes, dirty: true }
    }

    fn data_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[1..]
    }
}

/// Location of one pixel inside the block array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PixelOffset {
    block: usize,
    byte: usize,
    mask: u8,
}

impl PixelOffset {
    fn of(p: Point) -> Option<Self> {
        if p.x < 0 || p.x >= WIDTH || p.y < 0 || p.y >= HEIGHT {
            return None;
        }
        Some(Self {
            block: (p.x / COLUMNS_PER_BLOCK) as usize
                + BLOCKS_PER_PAGE * (p.y / ROWS_PER_PAGE) as usize,
            byte: 1 + (p.x % COLUMNS_PER_BLOCK) as usize,
            mask: 1 << (p.y % ROWS_PER_PAGE),
        })
    }
}

/// SSD1306 framebuffer driving a [`Bus`]
///
/// Drawing only touches local memory. Nothing reaches the panel until
/// [`display_update`](DisplayControl::display_update), which sends the
/// blocks changed since the last successful update.
pub struct Ssd1306<B: Bus> {
    bus: B,
    blocks: [PixelBlock; BLOCKS],
}

#[cfg(unix)]
impl Ssd1306<crate::hal::I2cDevice> {
    /// Open an `i2c-dev` node, select `address` and initialize the panel
    pub fn open<P: AsRef<std::path::Path>>(path: P, address: u8) -> Result<Self> {
        let bus = crate::hal::I2cDevice::open(path, address)?;
        Self::new(bus)
    }
}

impl<B: Bus> Ssd1306<B> {
    /// Initialize the controller on `bus`
    ///
    /// Runs the power-up command sequence, then waits [`POWER_ON_DELAY`].
    /// All blocks start dirty, so the first update clears the panel RAM.
    pub fn new(bus: B) -> Result<Self> {
        let mut oled = Self {
            bus,
            blocks: core::array::from_fn(|_| PixelBlock::new()),
        };
        oled.init()?;
        Ok(oled)
    }

    fn init(&mut self) -> Result<()> {
        debug!("sending {} init commands", commands::INIT_SEQUENCE.len());
        for command in commands::INIT_SEQUENCE {
            self.send_command(command)?;
        }
        self.bus.settle(POWER_ON_DELAY);
        info!("SSD1306 {}x{} initialized", WIDTH, HEIGHT);
        Ok(())
    }

    fn send_command(&mut self, command: &[u8]) -> Result<()> {
        send_command(&mut self.bus, command)
    }

    /// Number of blocks waiting for the next update
    pub fn dirty_blocks(&self) -> usize {
        self.blocks.iter().filter(|b| b.dirty).count()
    }

    /// Snapshot of the framebuffer as an off-screen bitmap
    pub fn to_bitmap(&self) -> Bitmap {
        let mut bitmap = Bitmap::new(WIDTH, HEIGHT);
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let p = Point::new(x, y);
                if self.is_set(p) {
                    bitmap.set(p);
                }
            }
        }
        bitmap
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Release the bus without sending anything further
    pub fn into_bus(self) -> B {
        self.bus
    }

    fn fill_with(&mut self, value: u8) {
        for block in self.blocks.iter_mut() {
            let mut changed = false;
            for byte in block.data_mut() {
                if *byte != value {
                    *byte = value;
                    changed = true;
                }
            }
            block.dirty |= changed;
        }
    }
}

/// One command transaction: control byte, opcode, operands
fn send_command<B: Bus + ?Sized>(bus: &mut B, command: &[u8]) -> Result<()> {
    let mut frame = Vec::with_capacity(command.len() + 1);
    frame.push(commands::CONTROL_COMMAND);
    frame.extend_from_slice(command);

    bus.write(&frame).map_err(|e| {
        let opcode = command.first().copied().unwrap_or_default();
        warn!("command 0x{:02X} failed: {}", opcode, e);
        DeviceError::new(Operation::Command(opcode), e)
    })
}

impl<B: Bus> PixelBuffer for Ssd1306<B> {
    fn width(&self) -> i32 {
        WIDTH
    }

    fn height(&self) -> i32 {
        HEIGHT
    }

    fn is_set(&self, p: Point) -> bool {
        PixelOffset::of(p)
            .map(|po| self.blocks[po.block].bytes[po.byte] & po.mask != 0)
            .unwrap_or(false)
    }

    fn set(&mut self, p: Point) {
        if let Some(po) = PixelOffset::of(p) {
            let block = &mut self.blocks[po.block];
            let old = block.bytes[po.byte];
            block.bytes[po.byte] |= po.mask;
            block.dirty |= block.bytes[po.byte] != old;
        }
    }

    fn unset(&mut self, p: Point) {
        if let Some(po) = PixelOffset::of(p) {
            let block = &mut self.blocks[po.block];
            let old = block.bytes[po.byte];
            block.bytes[po.byte] &= !po.mask;
            block.dirty |= block.bytes[po.byte] != old;
        }
    }

    fn xor(&mut self, p: Point) {
        if let Some(po) = PixelOffset::of(p) {
            let block = &mut self.blocks[po.block];
            block.bytes[po.byte] ^= po.mask;
            block.dirty = true;
        }
    }

    fn clear(&mut self) {
        self.fill_with(0x00);
    }

    fn fill(&mut self) {
        self.fill_with(0xFF);
    }
}

impl<B: Bus> DisplayControl for Ssd1306<B> {
    fn display_inverse(&mut self) -> Result<()> {
        self.send_command(&[commands::SET_INVERSE_DISPLAY])
    }

    fn display_normal(&mut self) -> Result<()> {
        self.send_command(&[commands::SET_NORMAL_DISPLAY])
    }

    fn display_off(&mut self) -> Result<()> {
        self.send_command(&[commands::SET_DISPLAY_OFF])
    }

    fn display_on(&mut self) -> Result<()> {
        self.send_command(&[commands::SET_DISPLAY_ON])
    }

    fn display_set_contrast(&mut self, contrast: u8) -> Result<()> {
        self.send_command(&[commands::SET_CONTRAST])?;
        self.send_command(&[contrast])
    }

    fn display_update(&mut self) -> Result<()> {
        let mut page: u8 = 0;
        let mut column: u8 = 0;
        let mut written = 0usize;

        for (index, block) in self.blocks.iter_mut().enumerate() {
            if block.dirty {
                trace!("block {} -> page {} column {}", index, page, column);
                for command in commands::page_column(page, column) {
                    send_command(&mut self.bus, &[command])?;
                }
                self.bus.write(&block.bytes).map_err(|e| {
                    warn!("data write page {} column {} failed: {}", page, column, e);
                    DeviceError::new(Operation::Data { page, column }, e)
                })?;
                block.dirty = false;
                written += 1;
            }

            column += COLUMNS_PER_BLOCK as u8;
            if column as i32 >= WIDTH {
                column = 0;
                page += 1;
            }
        }

        debug!("display update wrote {} of {} blocks", written, BLOCKS);
        Ok(())
    }
}
