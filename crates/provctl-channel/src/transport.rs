use provctl_serial::SerialConfig;

use crate::error::{ChannelError, Result};

/// Parameters handed to [`Transport::open`].
///
/// Transports without line settings (for example a radio link addressed by
/// index only) ignore `serial`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenConfig {
    /// Index into the transport's port list.
    pub port_index: usize,
    /// Line settings; zero fields select defaults.
    pub serial: SerialConfig,
}

impl OpenConfig {
    /// Open `port_index` with default line settings.
    pub fn port(port_index: usize) -> Self {
        Self {
            port_index,
            serial: SerialConfig::default(),
        }
    }

    /// Open `port_index` with explicit line settings.
    pub fn with_serial(port_index: usize, serial: SerialConfig) -> Self {
        Self { port_index, serial }
    }
}

/// A byte transport that can back a [`ControlChannel`](crate::ControlChannel).
///
/// Every capability has a default body reporting
/// [`ChannelError::NotSupported`], so a backend implements only what it can
/// do. The channel performs all state checking; implementations may assume
/// `send`, `receive` and `close` are only called after a successful `open`.
pub trait Transport: Send {
    /// Short backend name for diagnostics.
    fn name(&self) -> &'static str;

    /// Number of ports this transport can open.
    fn port_count(&mut self) -> Result<usize> {
        Err(ChannelError::NotSupported("port enumeration"))
    }

    /// Human-readable name of the port at `index`.
    fn port_name(&mut self, index: usize) -> Result<String> {
        let _ = index;
        Err(ChannelError::NotSupported("port description"))
    }

    /// Connect to the device.
    fn open(&mut self, config: &OpenConfig) -> Result<()> {
        let _ = config;
        Err(ChannelError::NotSupported("open"))
    }

    /// Disconnect from the device.
    fn close(&mut self) -> Result<()> {
        Err(ChannelError::NotSupported("close"))
    }

    /// Write bytes without blocking; returns how many were accepted.
    fn send(&mut self, data: &[u8]) -> Result<usize> {
        let _ = data;
        Err(ChannelError::NotSupported("send"))
    }

    /// Single non-blocking read; `Ok(0)` means nothing was available.
    fn receive(&mut self, buf: &mut [u8]) -> Result<usize> {
        let _ = buf;
        Err(ChannelError::NotSupported("receive"))
    }
}
