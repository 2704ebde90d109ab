//! Pseudo-terminal fixtures for exercising the serial layer without hardware.

use std::ffi::CStr;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::os::fd::{AsRawFd, FromRawFd};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// A pseudo terminal pair. The slave side stands in for a serial device.
pub struct Pty {
    master: File,
    slave_path: PathBuf,
}

impl Pty {
    /// Allocate a new pseudo terminal.
    ///
    /// Panics if the system has no free pseudo terminals.
    pub fn open() -> Self {
        // SAFETY: plain libc calls; every return value is checked and the
        // descriptor is handed to `File` exactly once.
        unsafe {
            let fd = libc::posix_openpt(libc::O_RDWR | libc::O_NOCTTY);
            assert!(fd >= 0, "posix_openpt failed");
            let master = File::from_raw_fd(fd);
            assert_eq!(libc::grantpt(fd), 0, "grantpt failed");
            assert_eq!(libc::unlockpt(fd), 0, "unlockpt failed");

            let mut name = [0 as libc::c_char; 128];
            assert_eq!(
                libc::ptsname_r(fd, name.as_mut_ptr(), name.len()),
                0,
                "ptsname_r failed"
            );
            let slave_path = PathBuf::from(
                CStr::from_ptr(name.as_ptr())
                    .to_string_lossy()
                    .into_owned(),
            );

            let flags = libc::fcntl(fd, libc::F_GETFL);
            libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK);

            Self { master, slave_path }
        }
    }

    /// Path of the slave device node.
    pub fn slave_path(&self) -> &Path {
        &self.slave_path
    }

    /// Open an extra descriptor on the slave side.
    ///
    /// Holding it keeps the slave's line settings alive across closes of the
    /// port under test, and lets the test read those settings back.
    pub fn open_observer(&self) -> Observer {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_NOCTTY | libc::O_NONBLOCK)
            .open(&self.slave_path)
            .expect("slave side should open");
        Observer { file }
    }

    /// Write bytes as if the device had sent them.
    pub fn write_master(&self, data: &[u8]) {
        (&self.master)
            .write_all(data)
            .expect("master write should succeed");
    }

    /// Read exactly `len` bytes sent towards the device, or fewer on timeout.
    pub fn read_master(&self, len: usize, timeout: Duration) -> Vec<u8> {
        let deadline = Instant::now() + timeout;
        let mut out = Vec::with_capacity(len);
        let mut buf = [0u8; 256];
        while out.len() < len && Instant::now() < deadline {
            match (&self.master).read(&mut buf) {
                Ok(n) => out.extend_from_slice(&buf[..n]),
                Err(err) if err.kind() == ErrorKind::WouldBlock => {
                    std::thread::sleep(Duration::from_millis(1));
                }
                Err(err) => panic!("master read failed: {err}"),
            }
        }
        out
    }
}

/// Extra descriptor on the slave side of a [`Pty`].
pub struct Observer {
    file: File,
}

impl Observer {
    /// Current line settings of the slave device.
    pub fn termios(&self) -> libc::termios {
        // SAFETY: all-zero is a valid termios; tcgetattr fills it in.
        let mut tio: libc::termios = unsafe { std::mem::zeroed() };
        // SAFETY: the descriptor is open and `tio` is writable.
        let rc = unsafe { libc::tcgetattr(self.file.as_raw_fd(), &mut tio) };
        assert_eq!(rc, 0, "tcgetattr failed");
        tio
    }
}
