//! Display drivers
//!
//! The SSD1306 framebuffer and the runtime control interface it exposes.

pub mod commands;
pub mod ssd1306;

pub use ssd1306::Ssd1306;

use crate::error::Result;

/// Runtime display controls
///
/// None of these touch the framebuffer contents except
/// [`display_update`](DisplayControl::display_update), which pushes them.
pub trait DisplayControl {
    /// Invert every pixel on the panel
    fn display_inverse(&mut self) -> Result<()>;

    /// Undo [`display_inverse`](DisplayControl::display_inverse)
    fn display_normal(&mut self) -> Result<()>;

    /// Put the panel to sleep
    fn display_off(&mut self) -> Result<()>;

    /// Wake the panel
    fn display_on(&mut self) -> Result<()>;

    /// Set the contrast, 0x00 (dim) to 0xFF (bright)
    fn display_set_contrast(&mut self, contrast: u8) -> Result<()>;

    /// Transmit changed regions of the framebuffer
    fn display_update(&mut self) -> Result<()>;
}
