//! Hardware Abstraction Layer for the I2C bus
//!
//! Provides:
//! - the [`Bus`] trait the framebuffer drives
//! - a scoped file descriptor with a custom close predicate
//! - the Linux `i2c-dev` bus implementation

use std::io;
use std::time::Duration;

#[cfg(unix)]
pub mod fd;
#[cfg(unix)]
pub mod i2c;

#[cfg(unix)]
pub use fd::FileDescriptor;
#[cfg(unix)]
pub use i2c::I2cDevice;

/// Byte-oriented bus with the slave address already selected
///
/// Each call to [`write`](Bus::write) is one complete bus transaction.
pub trait Bus {
    /// Write one transaction
    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Block while the controller settles
    fn settle(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<B: Bus + ?Sized> Bus for &mut B {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write(bytes)
    }

    fn settle(&mut self, duration: Duration) {
        (**self).settle(duration)
    }
}
