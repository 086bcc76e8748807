//! Linux `i2c-dev` bus
//!
//! Opens a `/dev/i2c-N` node, binds the slave address with
//! `ioctl(I2C_SLAVE)` and writes whole transactions with `write(2)`.

use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::Path;

use log::{debug, info};

use super::fd::FileDescriptor;
use super::Bus;
use crate::error::{DeviceError, Operation, Result};

/// `ioctl` request binding the slave address (`linux/i2c-dev.h`)
pub const I2C_SLAVE: u16 = 0x0703;

/// An open I2C bus with one slave address selected
#[derive(Debug)]
pub struct I2cDevice {
    fd: FileDescriptor,
}

impl I2cDevice {
    /// Open `path` read/write and select the 7-bit `address`
    ///
    /// The descriptor is released again if address selection fails.
    pub fn open<P: AsRef<Path>>(path: P, address: u8) -> Result<Self> {
        let path = path.as_ref();
        let open_error = |source| DeviceError::new(Operation::Open(path.to_path_buf()), source);

        let c_path = CString::new(path.as_os_str().as_bytes())
            .map_err(|e| open_error(io::Error::new(io::ErrorKind::InvalidInput, e)))?;

        // SAFETY: c_path is a valid NUL-terminated string
        let raw = unsafe { libc::open(c_path.as_ptr(), libc::O_RDWR | libc::O_CLOEXEC) };
        if raw == -1 {
            return Err(open_error(io::Error::last_os_error()));
        }
        let fd = FileDescriptor::new(raw);
        debug!("opened {} as fd {}", path.display(), raw);

        // SAFETY: fd is open; I2C_SLAVE takes the address as its argument
        let rc = unsafe { libc::ioctl(fd.fd(), I2C_SLAVE as _, address as libc::c_ulong) };
        if rc == -1 {
            return Err(DeviceError::new(
                Operation::SelectAddress(address),
                io::Error::last_os_error(),
            ));
        }

        info!("i2c bus {} bound to address 0x{:02X}", path.display(), address);
        Ok(Self { fd })
    }
}

impl AsRawFd for I2cDevice {
    fn as_raw_fd(&self) -> RawFd {
        self.fd.fd()
    }
}

impl Bus for I2cDevice {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        // SAFETY: bytes is a valid buffer of bytes.len() bytes
        let written = unsafe {
            libc::write(self.fd.fd(), bytes.as_ptr() as *const libc::c_void, bytes.len())
        };
        if written < 0 {
            return Err(io::Error::last_os_error());
        }
        if written as usize != bytes.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short write: {} of {} bytes", written, bytes.len()),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_device() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("i2c-404");

        let err = I2cDevice::open(&missing, 0x3C).unwrap_err();
        assert_eq!(err.operation(), &Operation::Open(missing));
        assert_eq!(err.code(), Some(libc::ENOENT));
    }

    #[test]
    fn test_select_address_on_regular_file_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let err = I2cDevice::open(file.path(), 0x3C).unwrap_err();
        assert_eq!(err.operation(), &Operation::SelectAddress(0x3C));
        assert_eq!(err.code(), Some(libc::ENOTTY));
    }

    /// Descriptors in this process currently open on `path`
    fn open_handles(path: &Path) -> usize {
        let target = std::fs::canonicalize(path).unwrap();
        std::fs::read_dir("/proc/self/fd")
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| std::fs::read_link(entry.path()).ok())
            .filter(|link| *link == target)
            .count()
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_failed_address_select_releases_descriptor() {
        // A path with no descriptor held on it, unlike NamedTempFile itself
        let path = tempfile::NamedTempFile::new().unwrap().into_temp_path();
        assert_eq!(open_handles(&path), 0);

        // The check sees a descriptor that is still held
        let held = std::fs::File::open(&path).unwrap();
        assert_eq!(open_handles(&path), 1);
        drop(held);

        let err = I2cDevice::open(&path, 0x3C).unwrap_err();
        assert_eq!(err.operation(), &Operation::SelectAddress(0x3C));
        assert_eq!(open_handles(&path), 0);
    }

    #[test]
    fn test_path_with_nul_is_open_error() {
        let err = I2cDevice::open("/dev/i2c\0-1", 0x3C).unwrap_err();
        assert!(matches!(err.operation(), Operation::Open(_)));
        assert_eq!(err.io_error().kind(), io::ErrorKind::InvalidInput);
    }
}
