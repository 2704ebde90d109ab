use tracing::{debug, info, trace, warn};

use crate::error::{ChannelError, Result};
use crate::state::ChannelState;
use crate::transport::{OpenConfig, Transport};

/// A connection handle to one device.
///
/// The channel is exclusively owned by its caller. It is `Send`, so a caller
/// driving several devices uses one channel per device, each on its own
/// thread.
#[derive(Default)]
pub struct ControlChannel {
    state: ChannelState,
    transport: Option<Box<dyn Transport>>,
}

impl ControlChannel {
    /// Create a channel with no transport (state [`ChannelState::Invalid`]).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a channel and register `transport` on it.
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            state: ChannelState::Init,
            transport: Some(Box::new(transport)),
        }
    }

    /// Register a transport. Only allowed from [`ChannelState::Invalid`].
    pub fn register(&mut self, transport: Box<dyn Transport>) -> Result<()> {
        if self.state != ChannelState::Invalid {
            return Err(ChannelError::AlreadyInUse);
        }
        debug!(transport = transport.name(), "transport registered");
        self.transport = Some(transport);
        self.state = ChannelState::Init;
        Ok(())
    }

    /// Drop the registered transport and return to [`ChannelState::Invalid`].
    ///
    /// A connected channel is closed first; a close failure is logged and
    /// does not prevent the unregistration.
    pub fn unregister(&mut self) {
        if self.state == ChannelState::Connected {
            if let Err(err) = self.close() {
                warn!(%err, "close during unregister failed");
            }
        }
        if let Some(transport) = self.transport.take() {
            debug!(transport = transport.name(), "transport unregistered");
        }
        self.state = ChannelState::Invalid;
    }

    /// Current connection state.
    pub fn state(&self) -> ChannelState {
        self.state
    }

    /// True while the channel is connected.
    pub fn is_connected(&self) -> bool {
        self.state == ChannelState::Connected
    }

    /// Name of the registered transport, if any.
    pub fn transport_name(&self) -> Option<&'static str> {
        self.transport.as_ref().map(|t| t.name())
    }

    /// Number of ports the transport offers. Allowed once registered.
    pub fn get_no_ports(&mut self) -> Result<usize> {
        self.transport_in(
            "get_no_ports",
            &[ChannelState::Init, ChannelState::Connected],
        )?
        .port_count()
    }

    /// Name of the port at `index`. Allowed once registered.
    pub fn get_port_name(&mut self, index: usize) -> Result<String> {
        self.transport_in(
            "get_port_name",
            &[ChannelState::Init, ChannelState::Connected],
        )?
        .port_name(index)
    }

    /// Connect. On failure the channel stays in [`ChannelState::Init`].
    pub fn open(&mut self, config: &OpenConfig) -> Result<()> {
        self.transport_in("open", &[ChannelState::Init])?
            .open(config)?;
        self.state = ChannelState::Connected;
        info!(
            transport = self.transport_name().unwrap_or("none"),
            port = config.port_index,
            "channel connected"
        );
        Ok(())
    }

    /// Disconnect and return to [`ChannelState::Init`].
    ///
    /// The transport releases its resource even when it reports an error, so
    /// the state changes either way.
    pub fn close(&mut self) -> Result<()> {
        let result = self.transport_in("close", &[ChannelState::Connected])?.close();
        self.state = ChannelState::Init;
        info!("channel closed");
        result
    }

    /// Send bytes; returns how many the transport accepted.
    pub fn send(&mut self, data: &[u8]) -> Result<usize> {
        let sent = self
            .transport_in("send", &[ChannelState::Connected])?
            .send(data)?;
        trace!(requested = data.len(), sent, "channel send");
        Ok(sent)
    }

    /// Poll once for received bytes; `Ok(0)` means nothing was available.
    pub fn receive(&mut self, buf: &mut [u8]) -> Result<usize> {
        let read = self
            .transport_in("receive", &[ChannelState::Connected])?
            .receive(buf)?;
        if read > 0 {
            trace!(read, "channel receive");
        }
        Ok(read)
    }

    fn transport_in(
        &mut self,
        operation: &'static str,
        allowed: &[ChannelState],
    ) -> Result<&mut dyn Transport> {
        if !allowed.contains(&self.state) {
            return Err(ChannelError::InvalidState {
                operation,
                state: self.state,
            });
        }
        match self.transport.as_deref_mut() {
            Some(transport) => Ok(transport),
            None => Err(ChannelError::InvalidState {
                operation,
                state: ChannelState::Invalid,
            }),
        }
    }
}

impl Drop for ControlChannel {
    fn drop(&mut self) {
        if self.state == ChannelState::Connected {
            self.unregister();
        }
    }
}

impl std::fmt::Debug for ControlChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlChannel")
            .field("state", &self.state)
            .field("transport", &self.transport_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;

    /// A transport that only knows how to connect and exchange bytes.
    struct MinimalTransport;

    impl Transport for MinimalTransport {
        fn name(&self) -> &'static str {
            "minimal"
        }

        fn open(&mut self, _config: &OpenConfig) -> Result<()> {
            Ok(())
        }

        fn close(&mut self) -> Result<()> {
            Ok(())
        }
    }

    struct RefusingTransport;

    impl Transport for RefusingTransport {
        fn name(&self) -> &'static str {
            "refusing"
        }

        fn open(&mut self, _config: &OpenConfig) -> Result<()> {
            Err(ChannelError::Busy("port 0".into()))
        }
    }

    #[test]
    fn new_channel_is_invalid() {
        let mut ch = ControlChannel::new();
        assert_eq!(ch.state(), ChannelState::Invalid);
        assert!(matches!(
            ch.get_no_ports(),
            Err(ChannelError::InvalidState {
                state: ChannelState::Invalid,
                ..
            })
        ));
        assert!(matches!(
            ch.open(&OpenConfig::default()),
            Err(ChannelError::InvalidState { .. })
        ));
    }

    #[test]
    fn register_twice_is_already_in_use() {
        let mut ch = ControlChannel::new();
        ch.register(Box::new(ScriptedTransport::new())).unwrap();
        assert_eq!(ch.state(), ChannelState::Init);
        assert!(matches!(
            ch.register(Box::new(ScriptedTransport::new())),
            Err(ChannelError::AlreadyInUse)
        ));

        ch.unregister();
        assert_eq!(ch.state(), ChannelState::Invalid);
        ch.register(Box::new(ScriptedTransport::new())).unwrap();
    }

    #[test]
    fn io_before_open_is_invalid_state_not_transport_error() {
        let script = ScriptedTransport::new();
        let mut ch = ControlChannel::with_transport(script.clone());
        let mut buf = [0u8; 8];

        for result in [
            ch.send(b"cam_gain\n").map(|_| ()),
            ch.receive(&mut buf).map(|_| ()),
            ch.close(),
        ] {
            assert!(matches!(
                result,
                Err(ChannelError::InvalidState {
                    state: ChannelState::Init,
                    ..
                })
            ));
        }
        assert!(script.sent().is_empty());
        assert!(!script.is_open());
    }

    #[test]
    fn full_state_cycle() {
        let script = ScriptedTransport::new();
        let mut ch = ControlChannel::with_transport(script.clone());

        ch.open(&OpenConfig::port(0)).unwrap();
        assert!(ch.is_connected());
        assert!(matches!(
            ch.open(&OpenConfig::port(0)),
            Err(ChannelError::InvalidState {
                state: ChannelState::Connected,
                ..
            })
        ));

        assert_eq!(ch.send(b"version\n").unwrap(), 8);
        script.queue_response(b"OK\n");
        let mut buf = [0u8; 16];
        assert_eq!(ch.receive(&mut buf).unwrap(), 3);

        ch.close().unwrap();
        assert_eq!(ch.state(), ChannelState::Init);
        assert!(!script.is_open());

        ch.open(&OpenConfig::port(0)).unwrap();
        assert!(ch.is_connected());
    }

    #[test]
    fn failed_open_leaves_state_init() {
        let mut ch = ControlChannel::with_transport(RefusingTransport);
        assert!(matches!(
            ch.open(&OpenConfig::default()),
            Err(ChannelError::Busy(_))
        ));
        assert_eq!(ch.state(), ChannelState::Init);
    }

    #[test]
    fn empty_slots_report_not_supported() {
        let mut ch = ControlChannel::with_transport(MinimalTransport);
        assert!(matches!(
            ch.get_no_ports(),
            Err(ChannelError::NotSupported("port enumeration"))
        ));
        assert!(matches!(
            ch.get_port_name(0),
            Err(ChannelError::NotSupported("port description"))
        ));

        ch.open(&OpenConfig::default()).unwrap();
        assert!(matches!(
            ch.send(b"x"),
            Err(ChannelError::NotSupported("send"))
        ));
        let mut buf = [0u8; 1];
        assert!(matches!(
            ch.receive(&mut buf),
            Err(ChannelError::NotSupported("receive"))
        ));
    }

    #[test]
    fn ports_are_queryable_before_open() {
        let script = ScriptedTransport::with_ports(["radio0", "radio1"]);
        let mut ch = ControlChannel::with_transport(script);
        assert_eq!(ch.get_no_ports().unwrap(), 2);
        assert_eq!(ch.get_port_name(1).unwrap(), "radio1");
        assert!(matches!(
            ch.get_port_name(2),
            Err(ChannelError::InvalidArgument(_))
        ));
    }

    #[test]
    fn unregister_closes_connected_transport() {
        let script = ScriptedTransport::new();
        let mut ch = ControlChannel::with_transport(script.clone());
        ch.open(&OpenConfig::default()).unwrap();
        assert!(script.is_open());

        ch.unregister();
        assert!(!script.is_open());
        assert_eq!(ch.state(), ChannelState::Invalid);
        assert_eq!(ch.transport_name(), None);
    }

    #[test]
    fn dropping_connected_channel_closes_transport() {
        let script = ScriptedTransport::new();
        {
            let mut ch = ControlChannel::with_transport(script.clone());
            ch.open(&OpenConfig::default()).unwrap();
        }
        assert!(!script.is_open());
    }
}
