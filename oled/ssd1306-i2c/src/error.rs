//! Device I/O errors
//!
//! Every bus failure (opening the device node, binding the slave address,
//! writing a command or a data block) is reported as a single
//! [`DeviceError`] that records which operation failed and the OS error
//! underneath it. Nothing is retried internally.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for device operations
pub type Result<T> = core::result::Result<T, DeviceError>;

/// The bus operation that failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Opening the device node
    Open(PathBuf),
    /// Binding the 7-bit slave address (`ioctl(I2C_SLAVE)`)
    SelectAddress(u8),
    /// Writing a controller command
    Command(u8),
    /// Writing one framebuffer block
    Data { page: u8, column: u8 },
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Open(path) => write!(f, "open {}", path.display()),
            Operation::SelectAddress(address) => {
                write!(f, "ioctl I2C_SLAVE 0x{:02X}", address)
            }
            Operation::Command(command) => write!(f, "write command 0x{:02X}", command),
            Operation::Data { page, column } => {
                write!(f, "write data page {} column {}", page, column)
            }
        }
    }
}

/// A bus operation did not complete
#[derive(Debug, Error)]
#[error("{operation}: {source}")]
pub struct DeviceError {
    operation: Operation,
    #[source]
    source: io::Error,
}

impl DeviceError {
    pub fn new(operation: Operation, source: io::Error) -> Self {
        Self { operation, source }
    }

    /// Which operation failed
    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    /// Underlying OS error code, if the failure came from a syscall
    pub fn code(&self) -> Option<i32> {
        self.source.raw_os_error()
    }

    pub fn io_error(&self) -> &io::Error {
        &self.source
    }
}
