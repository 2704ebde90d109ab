//! Serial port transport for provctl.
//!
//! This is the lowest layer of the stack. It discovers serial device nodes,
//! applies line settings (baud, data bits, parity, stop bits) and performs
//! non-blocking byte reads and writes:
//! - [`PortList`] is an owned snapshot of discovered ports, rebuilt only on
//!   an explicit refresh
//! - [`SerialPort`] is one open port that restores the prior line settings
//!   when closed
//! - [`SerialHub`] tracks which indices of a [`PortList`] are open
//!
//! Enumeration and line configuration go through the `serialport` crate.
//! Saving and restoring the prior line settings is Unix-only.

pub mod config;
pub mod error;
pub mod hub;
pub mod ports;
pub mod tty;

#[cfg(all(target_os = "linux", any(test, feature = "testing")))]
pub mod testing;

pub use config::{
    Parity, SerialConfig, ALLOWED_BAUD_RATES, ALLOWED_DATA_BITS, ALLOWED_STOP_BITS, DEFAULT_BAUD,
    DEFAULT_DATA_BITS, DEFAULT_STOP_BITS,
};
pub use error::{Result, SerialError};
pub use hub::SerialHub;
pub use ports::PortList;
pub use tty::SerialPort;
