//! ProVideo wire driver.
//!
//! Implements every `provctl-protocol` feature trait on top of the device's
//! line-oriented ASCII protocol:
//!
//! ```text
//! host:   cam_gain 120\n          host:   cam_gain\n
//! device: OK\n                    device: cam_gain 120\nOK\n
//! ```
//!
//! A rejected command ends in `FAIL[: text]`; the text is classified into a
//! [`DeviceFailure`](provctl_protocol::DeviceFailure). No terminal line
//! before the deadline is a desync.
//!
//! ```no_run
//! use provctl_channel::{ControlChannel, OpenConfig, SerialTransport};
//! use provctl_protocol::ControlProtocol;
//! use provctl_provideo::{register_all, DriverConfig, DriverOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut protocol = ControlProtocol::new();
//! register_all(&mut protocol, DriverConfig::default(), DriverOptions::default())?;
//!
//! let mut channel = ControlChannel::with_transport(SerialTransport::new());
//! channel.open(&OpenConfig::port(0))?;
//! protocol.set_cam_gain(&mut channel, 120)?;
//! println!("gain = {}", protocol.get_cam_gain(&mut channel)?);
//! # Ok(())
//! # }
//! ```

mod command;
pub mod config;
pub mod driver;
mod features;
mod register;
mod response;
mod scan;

pub use config::{
    DriverConfig, DriverOptions, DEFAULT_COMMAND_CAPACITY, DEFAULT_POLL_INTERVAL,
    DEFAULT_RESPONSE_CAPACITY, DEFAULT_SLOW_TIMEOUT, DEFAULT_TIMEOUT,
};
pub use driver::ProVideo;
pub use register::register_all;
pub use response::classify;
