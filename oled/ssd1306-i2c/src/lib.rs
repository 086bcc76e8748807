//! SSD1306 I2C OLED Framebuffer Driver
//!
//! Monochrome framebuffer driver for 128×64 SSD1306 OLED panels attached to a
//! Linux `i2c-dev` bus. Drawing code works against the [`PixelBuffer`] trait,
//! so the same primitives render into an off-screen [`Bitmap`] or straight
//! into the hardware framebuffer.
//!
//! # Architecture
//!
//! ```text
//! Application
//!     │
//!     ▼
//! ┌─────────────┐    ┌─────────────┐
//! │  graphics   │───▶│ PixelBuffer │
//! └─────────────┘    └──────┬──────┘
//!                   ┌───────┴───────┐
//!                   ▼               ▼
//!            ┌─────────────┐ ┌─────────────┐
//!            │   Bitmap    │ │   Ssd1306   │
//!            │ (in memory) │ │ dirty blocks│
//!            └─────────────┘ └──────┬──────┘
//!                                   ▼
//!                            ┌─────────────┐
//!                            │  Bus (I2C)  │
//!                            └──────┬──────┘
//!                                   ▼
//!                            /dev/i2c-N
//! ```
//!
//! # Example
//!
//! ```no_run
//! use ssd1306_i2c::{graphics, DisplayControl, PixelStyle, Point, Ssd1306};
//!
//! let mut oled = Ssd1306::open("/dev/i2c-1", 0x3C)?;
//! graphics::box_outline(&mut oled, Point::new(0, 0), Point::new(127, 63), PixelStyle::Set);
//! oled.display_update()?;
//! # Ok::<(), ssd1306_i2c::DeviceError>(())
//! ```

pub mod bitmap;
pub mod display;
pub mod error;
pub mod graphics;
pub mod hal;
pub mod pixel;

// Re-export main types
pub use bitmap::Bitmap;
pub use display::{DisplayControl, Ssd1306};
pub use error::{DeviceError, Operation, Result};
pub use hal::Bus;
#[cfg(unix)]
pub use hal::{FileDescriptor, I2cDevice};
pub use pixel::{PixelBuffer, PixelStyle, Point};
