use std::sync::{Arc, Mutex, MutexGuard};

use provctl_serial::SerialHub;
use tracing::warn;

use crate::error::{ChannelError, Result};
use crate::transport::{OpenConfig, Transport};

/// Serial backend for [`ControlChannel`](crate::ControlChannel).
///
/// Several transports may share one [`SerialHub`]; the hub rejects a second
/// open of the same port index with a busy error.
pub struct SerialTransport {
    hub: Arc<Mutex<SerialHub>>,
    index: Option<usize>,
}

impl SerialTransport {
    /// Create a transport over its own freshly discovered hub.
    pub fn new() -> Self {
        Self::with_hub(Arc::new(Mutex::new(SerialHub::new())))
    }

    /// Create a transport over a shared hub.
    pub fn with_hub(hub: Arc<Mutex<SerialHub>>) -> Self {
        Self { hub, index: None }
    }

    /// The hub backing this transport.
    pub fn hub(&self) -> Arc<Mutex<SerialHub>> {
        Arc::clone(&self.hub)
    }

    /// Port index currently open through this transport.
    pub fn open_index(&self) -> Option<usize> {
        self.index
    }

    fn lock(&self) -> Result<MutexGuard<'_, SerialHub>> {
        self.hub.lock().map_err(|_| ChannelError::Poisoned)
    }

    fn open_index_or_err(&self, operation: &'static str) -> Result<usize> {
        self.index.ok_or(ChannelError::InvalidState {
            operation,
            state: crate::ChannelState::Init,
        })
    }
}

impl Default for SerialTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for SerialTransport {
    fn name(&self) -> &'static str {
        "serial"
    }

    fn port_count(&mut self) -> Result<usize> {
        Ok(self.lock()?.port_count())
    }

    fn port_name(&mut self, index: usize) -> Result<String> {
        Ok(self.lock()?.port_name(index)?)
    }

    fn open(&mut self, config: &OpenConfig) -> Result<()> {
        if let Some(index) = self.index {
            return Err(ChannelError::Busy(format!("transport already holds port {index}")));
        }
        self.lock()?.open(config.port_index, &config.serial)?;
        self.index = Some(config.port_index);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let index = self.open_index_or_err("close")?;
        self.index = None;
        Ok(self.lock()?.close(index)?)
    }

    fn send(&mut self, data: &[u8]) -> Result<usize> {
        let index = self.open_index_or_err("send")?;
        Ok(self.lock()?.send(index, data)?)
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<usize> {
        let index = self.open_index_or_err("receive")?;
        Ok(self.lock()?.poll(index, buf)?)
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        if let Some(index) = self.index.take() {
            match self.hub.lock() {
                Ok(mut hub) => {
                    if let Err(err) = hub.close(index) {
                        warn!(index, %err, "failed to close serial port on drop");
                    }
                }
                Err(_) => warn!(index, "serial hub lock poisoned; port left open"),
            }
        }
    }
}
