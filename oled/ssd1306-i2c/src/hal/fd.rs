//! Scoped file descriptor
//!
//! Owns a raw descriptor and closes it on drop when the close predicate
//! captured at construction agrees. The handle is move-only, so exactly one
//! owner is ever responsible for the descriptor.

use std::fmt;
use std::os::unix::io::{AsRawFd, RawFd};

/// Decides at drop time whether the descriptor is closed
pub type CloseIf = Box<dyn Fn(RawFd) -> bool + Send>;

fn is_valid(fd: RawFd) -> bool {
    fd != -1
}

/// Owned file descriptor with a custom close predicate
pub struct FileDescriptor {
    fd: RawFd,
    close_if: CloseIf,
}

impl FileDescriptor {
    /// Take ownership of `fd`, closing it on drop unless it is `-1`
    pub fn new(fd: RawFd) -> Self {
        Self::with_close_if(fd, is_valid)
    }

    /// Take ownership of `fd` with a caller-supplied close predicate
    pub fn with_close_if<F>(fd: RawFd, close_if: F) -> Self
    where
        F: Fn(RawFd) -> bool + Send + 'static,
    {
        Self {
            fd,
            close_if: Box::new(close_if),
        }
    }

    /// Wrap `fd` without ever closing it (e.g. standard input)
    pub fn never_close(fd: RawFd) -> Self {
        Self::with_close_if(fd, |_| false)
    }

    pub fn fd(&self) -> RawFd {
        self.fd
    }
}

impl AsRawFd for FileDescriptor {
    fn as_raw_fd(&self) -> RawFd {
        self.fd
    }
}

impl Drop for FileDescriptor {
    fn drop(&mut self) {
        if (self.close_if)(self.fd) {
            // SAFETY: this handle is the sole owner of the descriptor
            unsafe {
                libc::close(self.fd);
            }
        }
    }
}

impl fmt::Debug for FileDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileDescriptor").field("fd", &self.fd).finish()
    }
}
