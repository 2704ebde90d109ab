use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serialport::{DataBits, FlowControl, StopBits};
use tracing::{debug, info, warn};

use crate::config::{Parity, SerialConfig};
use crate::error::{Result, SerialError};

/// One open serial port.
///
/// On Unix, opening saves the port's line settings; [`SerialPort::close`]
/// (or dropping the port) puts them back before the descriptor is released.
/// Reads and writes never block.
pub struct SerialPort {
    port: Box<dyn serialport::SerialPort>,
    path: PathBuf,
    config: SerialConfig,
    #[cfg(unix)]
    saved: Option<termios::Saved>,
}

impl SerialPort {
    /// Open `path` and apply `config`.
    ///
    /// The configuration is validated before the device node is touched.
    pub fn open(path: impl AsRef<Path>, config: &SerialConfig) -> Result<Self> {
        let config = config.validate()?;
        let path = path.as_ref().to_path_buf();
        let builder = builder(&path, &config);

        #[cfg(unix)]
        let (port, saved) = {
            use std::os::fd::AsRawFd;

            // Held open across the driver open so the tty keeps its settings.
            let guard = termios::open_node(&path)?;
            let original = termios::get(&guard).map_err(|source| SerialError::Configure {
                path: path.clone(),
                source,
            })?;

            let mut native = builder.open_native().map_err(|err| open_error(&path, err))?;
            // Concurrent opens are refused by SerialHub, not by TIOCEXCL.
            native
                .set_exclusive(false)
                .map_err(|err| open_error(&path, err))?;
            let saved = termios::Saved {
                fd: native.as_raw_fd(),
                termios: original,
            };
            drop(guard);
            (Box::new(native) as Box<dyn serialport::SerialPort>, saved)
        };

        #[cfg(not(unix))]
        let port = builder.open().map_err(|err| open_error(&path, err))?;

        port.clear(serialport::ClearBuffer::All)
            .map_err(|err| SerialError::Configure {
                path: path.clone(),
                source: err.into(),
            })?;

        info!(path = ?path, config = %config, "opened serial port");
        Ok(Self {
            port,
            path,
            config,
            #[cfg(unix)]
            saved: Some(saved),
        })
    }

    /// Read whatever is available without blocking.
    ///
    /// Returns `Ok(0)` when no bytes are waiting.
    pub fn poll(&mut self, buf: &mut [u8]) -> Result<usize> {
        match self.port.read(buf) {
            Ok(n) => Ok(n),
            Err(err) if is_idle(err.kind()) => Ok(0),
            Err(err) => Err(SerialError::Io(err)),
        }
    }

    /// Write as much of `data` as the driver accepts without blocking.
    pub fn send(&mut self, data: &[u8]) -> Result<usize> {
        match self.port.write(data) {
            Ok(n) => Ok(n),
            Err(err) if is_idle(err.kind()) => Ok(0),
            Err(err) => Err(SerialError::Io(err)),
        }
    }

    /// Baud rate reported by the driver.
    pub fn baud_rate(&self) -> Result<u32> {
        self.port
            .baud_rate()
            .map_err(|err| SerialError::Io(err.into()))
    }

    /// Restore the saved line settings and release the port.
    pub fn close(mut self) -> Result<()> {
        let result = self.restore();
        info!(path = ?self.path, "closed serial port");
        result
    }

    #[cfg(unix)]
    fn restore(&mut self) -> Result<()> {
        match self.saved.take() {
            Some(saved) => saved.apply().map_err(|source| SerialError::Configure {
                path: self.path.clone(),
                source,
            }),
            None => Ok(()),
        }
    }

    #[cfg(not(unix))]
    fn restore(&mut self) -> Result<()> {
        Ok(())
    }

    /// Device path of this port.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The validated settings in effect.
    pub fn config(&self) -> &SerialConfig {
        &self.config
    }
}

impl Drop for SerialPort {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!(path = ?self.path, %err, "failed to restore line settings");
        } else {
            debug!(path = ?self.path, "released serial port");
        }
    }
}

impl std::fmt::Debug for SerialPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialPort")
            .field("path", &self.path)
            .field("config", &self.config)
            .finish()
    }
}

fn builder(path: &Path, config: &SerialConfig) -> serialport::SerialPortBuilder {
    let data_bits = match config.data_bits {
        5 => DataBits::Five,
        6 => DataBits::Six,
        7 => DataBits::Seven,
        _ => DataBits::Eight,
    };
    let parity = match config.parity {
        Parity::None => serialport::Parity::None,
        Parity::Odd => serialport::Parity::Odd,
        Parity::Even => serialport::Parity::Even,
    };
    let stop_bits = match config.stop_bits {
        2 => StopBits::Two,
        _ => StopBits::One,
    };

    serialport::new(path.to_string_lossy(), config.baud)
        .data_bits(data_bits)
        .parity(parity)
        .stop_bits(stop_bits)
        .flow_control(FlowControl::None)
        .timeout(Duration::ZERO)
}

fn open_error(path: &Path, err: serialport::Error) -> SerialError {
    match err.kind() {
        serialport::ErrorKind::InvalidInput => SerialError::InvalidConfig(err.description),
        _ => SerialError::Open {
            path: path.to_path_buf(),
            source: err.into(),
        },
    }
}

/// A zero read timeout surfaces an idle line as `TimedOut`.
fn is_idle(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted
    )
}

#[cfg(unix)]
mod termios {
    use std::fs::{File, OpenOptions};
    use std::os::fd::{AsRawFd, RawFd};
    use std::os::unix::fs::OpenOptionsExt;
    use std::path::Path;

    use crate::error::{Result, SerialError};

    /// Line settings captured before the port was configured.
    pub(super) struct Saved {
        pub(super) fd: RawFd,
        pub(super) termios: libc::termios,
    }

    impl Saved {
        /// Put the captured settings back. The descriptor must still be open.
        pub(super) fn apply(&self) -> std::io::Result<()> {
            // SAFETY: `fd` belongs to the port, which outlives this call, and
            // `termios` is an initialized value returned by tcgetattr.
            let rc = unsafe { libc::tcsetattr(self.fd, libc::TCSANOW, &self.termios) };
            if rc == 0 {
                Ok(())
            } else {
                Err(std::io::Error::last_os_error())
            }
        }
    }

    pub(super) fn open_node(path: &Path) -> Result<File> {
        OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_NOCTTY | libc::O_NONBLOCK)
            .open(path)
            .map_err(|source| SerialError::Open {
                path: path.to_path_buf(),
                source,
            })
    }

    pub(super) fn get(file: &File) -> std::io::Result<libc::termios> {
        // SAFETY: termios is a plain C struct; all-zero is a valid bit pattern and
        // is fully overwritten by tcgetattr on success.
        let mut tio: libc::termios = unsafe { std::mem::zeroed() };
        // SAFETY: the descriptor is open and `tio` is a valid writable termios.
        let rc = unsafe { libc::tcgetattr(file.as_raw_fd(), &mut tio) };
        if rc == 0 {
            Ok(tio)
        } else {
            Err(std::io::Error::last_os_error())
        }
    }
}

#[cfg(all(test, target_os = "linux"))]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::testing::Pty;

    #[test]
    fn open_applies_line_settings_and_close_restores_them() {
        let pty = Pty::open();
        let observer = pty.open_observer();
        let before = observer.termios();

        let cfg = SerialConfig {
            baud: 9_600,
            data_bits: 7,
            parity: Parity::Even,
            stop_bits: 2,
        };
        let port = SerialPort::open(pty.slave_path(), &cfg).unwrap();
        assert_eq!(port.baud_rate().unwrap(), 9_600);

        let during = observer.termios();
        assert_eq!(during.c_cflag & libc::CSIZE, libc::CS7);
        assert_ne!(during.c_cflag & libc::PARENB, 0);
        assert_eq!(during.c_cflag & libc::PARODD, 0);
        assert_ne!(during.c_cflag & libc::CSTOPB, 0);
        assert_eq!(during.c_lflag & libc::ICANON, 0);

        port.close().unwrap();

        let after = observer.termios();
        assert_eq!(after.c_cflag, before.c_cflag);
        assert_eq!(after.c_lflag, before.c_lflag);
        assert_eq!(after.c_iflag, before.c_iflag);
    }

    #[test]
    fn drop_restores_line_settings() {
        let pty = Pty::open();
        let observer = pty.open_observer();
        let before = observer.termios();

        {
            let _port = SerialPort::open(pty.slave_path(), &SerialConfig::default()).unwrap();
            assert_ne!(observer.termios().c_lflag, before.c_lflag);
        }

        assert_eq!(observer.termios().c_lflag, before.c_lflag);
    }

    #[test]
    fn port_can_be_reopened_after_close() {
        let pty = Pty::open();
        let _observer = pty.open_observer();

        let first = SerialPort::open(pty.slave_path(), &SerialConfig::default()).unwrap();
        first.close().unwrap();
        let second = SerialPort::open(pty.slave_path(), &SerialConfig::default()).unwrap();
        second.close().unwrap();
    }

    #[test]
    fn invalid_config_never_touches_device() {
        let pty = Pty::open();
        let observer = pty.open_observer();
        let before = observer.termios();

        let cfg = SerialConfig {
            data_bits: 9,
            ..SerialConfig::default()
        };
        let err = SerialPort::open(pty.slave_path(), &cfg).unwrap_err();
        assert!(matches!(err, SerialError::InvalidConfig(_)));
        assert_eq!(observer.termios().c_lflag, before.c_lflag);
    }

    #[test]
    fn missing_device_reports_open_error() {
        let err = SerialPort::open("/dev/provctl-does-not-exist", &SerialConfig::default())
            .unwrap_err();
        match err {
            SerialError::Open { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound)
            }
            other => panic!("expected open error, got {other:?}"),
        }
    }

    #[test]
    fn poll_returns_zero_when_idle_and_bytes_when_ready() {
        let pty = Pty::open();
        let mut port = SerialPort::open(pty.slave_path(), &SerialConfig::default()).unwrap();

        let mut buf = [0u8; 32];
        assert_eq!(port.poll(&mut buf).unwrap(), 0);

        pty.write_master(b"OK\n");
        let deadline = Instant::now() + Duration::from_secs(2);
        let mut got = Vec::new();
        while got.len() < 3 && Instant::now() < deadline {
            let n = port.poll(&mut buf).unwrap();
            got.extend_from_slice(&buf[..n]);
        }
        assert_eq!(got, b"OK\n");
    }

    #[test]
    fn send_reaches_the_other_side() {
        let pty = Pty::open();
        let mut port = SerialPort::open(pty.slave_path(), &SerialConfig::default()).unwrap();

        assert_eq!(port.send(b"cam_gain\n").unwrap(), 9);
        let echoed = pty.read_master(9, Duration::from_secs(2));
        assert_eq!(echoed, b"cam_gain\n");
    }

    #[test]
    fn idle_kinds_read_as_no_data() {
        assert!(is_idle(ErrorKind::TimedOut));
        assert!(is_idle(ErrorKind::WouldBlock));
        assert!(!is_idle(ErrorKind::BrokenPipe));
    }
}
