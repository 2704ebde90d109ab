//! Serial control of ProVideo cameras.
//!
//! `provctl` bundles the layers of the stack under one name:
//!
//! - [`serial`]: port discovery and line configuration
//! - [`channel`]: the connection state machine over a pluggable transport
//! - [`protocol`]: the feature registry, typed device records and errors
//! - [`provideo`]: the ASCII wire driver implementing every feature
//!
//! The `cli` feature (on by default) additionally builds the `provctl`
//! operator binary.
//!
//! ```no_run
//! use provctl::channel::{ControlChannel, OpenConfig, SerialTransport};
//! use provctl::protocol::ControlProtocol;
//! use provctl::provideo::{register_all, DriverConfig, DriverOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut protocol = ControlProtocol::new();
//! register_all(&mut protocol, DriverConfig::default(), DriverOptions::default())?;
//!
//! let mut channel = ControlChannel::with_transport(SerialTransport::new());
//! channel.open(&OpenConfig::port(0))?;
//! let temp = protocol.get_temperature(&mut channel)?;
//! println!("{} C (max {} C)", temp.current, temp.max);
//! channel.close()?;
//! # Ok(())
//! # }
//! ```

/// Re-export serial transport types.
pub mod serial {
    pub use provctl_serial::*;
}

/// Re-export control channel types.
pub mod channel {
    pub use provctl_channel::*;
}

/// Re-export registry, feature and error types.
pub mod protocol {
    pub use provctl_protocol::*;
}

/// Re-export the ProVideo wire driver.
pub mod provideo {
    pub use provctl_provideo::*;
}
