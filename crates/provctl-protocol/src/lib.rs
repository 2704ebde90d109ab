//! Feature-keyed dispatch layer between callers and device drivers.
//!
//! A [`ControlProtocol`] holds at most one driver per [`FeatureId`]. Callers
//! make typed calls (`get_cam_gain`, `set_knee_config`, ...) and pass the
//! [`ControlChannel`](provctl_channel::ControlChannel) to use; the registry
//! forwards to the registered driver or reports
//! [`ProtocolError::NotSupported`].
//!
//! ```
//! use provctl_protocol::{ControlProtocol, ErrorKind};
//! use provctl_channel::ControlChannel;
//!
//! let protocol = ControlProtocol::new();
//! let mut channel = ControlChannel::new();
//! let err = protocol.get_cam_gain(&mut channel).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::NotSupported);
//! ```

pub mod error;
pub mod feature;
pub mod features;
pub mod record;
pub mod registry;

pub use error::{DeviceFailure, ErrorKind, ProtocolError, Result};
pub use feature::FeatureId;
pub use features::*;
pub use record::DeviceRecord;
pub use registry::{ControlProtocol, FeatureDriver};
