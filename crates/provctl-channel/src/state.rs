use std::fmt;

/// Connection state of a [`ControlChannel`](crate::ControlChannel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelState {
    /// No transport registered.
    #[default]
    Invalid,
    /// Transport registered, not connected.
    Init,
    /// Transport opened; send, receive and close are allowed.
    Connected,
}

impl ChannelState {
    /// Returns a human-readable name for the state.
    pub fn name(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Init => "init",
            Self::Connected => "connected",
        }
    }
}

impl fmt::Display for ChannelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
