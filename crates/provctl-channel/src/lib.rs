//! Transport-agnostic control channel.
//!
//! A [`ControlChannel`] owns exactly one [`Transport`] and enforces the
//! connection state machine:
//!
//! ```text
//! Invalid ──register──▶ Init ──open──▶ Connected
//!    ▲                   ▲                 │
//!    └────unregister─────┴──────close──────┘
//! ```
//!
//! Operations attempted in the wrong state fail with
//! [`ChannelError::InvalidState`] without reaching the transport. A transport
//! that leaves one of its capability methods unimplemented reports
//! [`ChannelError::NotSupported`] for it.
//!
//! `receive` performs a single non-blocking poll. Timeouts and retries are
//! the caller's policy.

pub mod channel;
pub mod error;
pub mod serial;
pub mod state;
pub mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use channel::ControlChannel;
pub use error::{ChannelError, Result};
pub use provctl_serial::{Parity, SerialConfig};
pub use serial::SerialTransport;
pub use state::ChannelState;
pub use transport::{OpenConfig, Transport};
