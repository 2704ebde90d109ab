//! Scripted in-memory transport for exercising protocol code without a device.
//!
//! [`ScriptedTransport`] is a cheaply cloneable handle: register one clone on
//! a channel and keep another in the test to queue device output and inspect
//! what was sent.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::{Buf, BytesMut};

use crate::error::{ChannelError, Result};
use crate::transport::{OpenConfig, Transport};

type Responder = Box<dyn FnMut(&[u8]) -> Vec<u8> + Send>;

#[derive(Default)]
struct Script {
    ports: Vec<String>,
    open: bool,
    last_open: Option<OpenConfig>,
    sent: Vec<Vec<u8>>,
    pending: BytesMut,
    chunk_size: Option<usize>,
    max_send: Option<usize>,
    idle_polls: usize,
    idle_remaining: usize,
    responder: Option<Responder>,
    receive_errors: VecDeque<ChannelError>,
}

/// In-memory transport with scripted device output.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    inner: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    /// A transport with one port named `scripted0`.
    pub fn new() -> Self {
        Self::with_ports(["scripted0"])
    }

    /// A transport offering the given port names.
    pub fn with_ports<I, S>(ports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let transport = Self::default();
        transport.lock().ports = ports.into_iter().map(Into::into).collect();
        transport
    }

    /// Deliver at most `size` bytes per `receive` call.
    pub fn set_chunk_size(&self, size: usize) -> &Self {
        self.lock().chunk_size = Some(size.max(1));
        self
    }

    /// Accept at most `size` bytes per `send` call.
    pub fn set_max_send(&self, size: usize) -> &Self {
        self.lock().max_send = Some(size);
        self
    }

    /// Return `Ok(0)` this many times before each delivered chunk.
    pub fn set_idle_polls(&self, polls: usize) -> &Self {
        let mut script = self.lock();
        script.idle_polls = polls;
        script.idle_remaining = polls;
        drop(script);
        self
    }

    /// Append bytes the device will emit.
    pub fn queue_response(&self, bytes: &[u8]) -> &Self {
        self.lock().pending.extend_from_slice(bytes);
        self
    }

    /// Make the next `receive` fail with `err`.
    pub fn queue_receive_error(&self, err: ChannelError) -> &Self {
        self.lock().receive_errors.push_back(err);
        self
    }

    /// Generate device output from every sent buffer.
    pub fn respond_with<F>(&self, responder: F) -> &Self
    where
        F: FnMut(&[u8]) -> Vec<u8> + Send + 'static,
    {
        self.lock().responder = Some(Box::new(responder));
        self
    }

    /// Every buffer passed to `send`, in order.
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.lock().sent.clone()
    }

    /// Sent bytes joined and split into lines.
    pub fn sent_lines(&self) -> Vec<String> {
        let joined: Vec<u8> = self.lock().sent.concat();
        String::from_utf8_lossy(&joined)
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Forget everything sent so far.
    pub fn clear_sent(&self) {
        self.lock().sent.clear();
    }

    /// Bytes queued but not yet received.
    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    /// True between a successful `open` and `close`.
    pub fn is_open(&self) -> bool {
        self.lock().open
    }

    /// Configuration passed to the most recent `open`.
    pub fn last_open_config(&self) -> Option<OpenConfig> {
        self.lock().last_open
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for ScriptedTransport {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn port_count(&mut self) -> Result<usize> {
        Ok(self.lock().ports.len())
    }

    fn port_name(&mut self, index: usize) -> Result<String> {
        let script = self.lock();
        script.ports.get(index).cloned().ok_or_else(|| {
            ChannelError::InvalidArgument(format!(
                "port index {index} out of range ({} ports)",
                script.ports.len()
            ))
        })
    }

    fn open(&mut self, config: &OpenConfig) -> Result<()> {
        let mut script = self.lock();
        if config.port_index >= script.ports.len() {
            return Err(ChannelError::InvalidArgument(format!(
                "port index {} out of range",
                config.port_index
            )));
        }
        script.open = true;
        script.last_open = Some(*config);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.lock().open = false;
        Ok(())
    }

    fn send(&mut self, data: &[u8]) -> Result<usize> {
        let mut script = self.lock();
        let accepted = script.max_send.map_or(data.len(), |max| max.min(data.len()));
        let chunk = &data[..accepted];
        script.sent.push(chunk.to_vec());

        if let Some(mut responder) = script.responder.take() {
            let output = responder(chunk);
            script.pending.extend_from_slice(&output);
            script.responder = Some(responder);
        }
        Ok(accepted)
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut script = self.lock();
        if let Some(err) = script.receive_errors.pop_front() {
            return Err(err);
        }
        if script.pending.is_empty() {
            return Ok(0);
        }
        if script.idle_remaining > 0 {
            script.idle_remaining -= 1;
            return Ok(0);
        }
        script.idle_remaining = script.idle_polls;

        let limit = script.chunk_size.unwrap_or(usize::MAX);
        let n = script.pending.len().min(buf.len()).min(limit);
        buf[..n].copy_from_slice(&script.pending[..n]);
        script.pending.advance(n);
        Ok(n)
    }
}
