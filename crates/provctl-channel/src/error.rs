use provctl_serial::SerialError;

use crate::state::ChannelState;

/// Errors that can occur in control channel operations.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// A transport is already registered on this channel.
    #[error("channel already in use")]
    AlreadyInUse,

    /// The operation is not allowed in the channel's current state.
    #[error("{operation} not allowed in state '{state}'")]
    InvalidState {
        operation: &'static str,
        state: ChannelState,
    },

    /// The registered transport leaves this capability unimplemented.
    #[error("transport does not support {0}")]
    NotSupported(&'static str),

    /// The caller passed an argument the transport rejects.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The underlying resource is already in use.
    #[error("resource busy: {0}")]
    Busy(String),

    /// Serial transport failure.
    #[error("serial error: {0}")]
    Serial(#[source] SerialError),

    /// An I/O error occurred on the transport.
    #[error("channel I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A lock shared with other channels was poisoned by a panicking thread.
    #[error("transport lock poisoned")]
    Poisoned,
}

impl From<SerialError> for ChannelError {
    fn from(err: SerialError) -> Self {
        match err {
            SerialError::InvalidConfig(msg) => Self::InvalidArgument(msg),
            SerialError::NoSuchPort { .. } => Self::InvalidArgument(err.to_string()),
            SerialError::Busy(port) => Self::Busy(port),
            SerialError::Io(io) => Self::Io(io),
            SerialError::Open { source, .. } | SerialError::Configure { source, .. } => {
                Self::Io(source)
            }
            other => Self::Serial(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChannelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_errors_map_to_channel_kinds() {
        let err: ChannelError = SerialError::InvalidConfig("baud rate 1".into()).into();
        assert!(matches!(err, ChannelError::InvalidArgument(_)));

        let err: ChannelError = SerialError::NoSuchPort { index: 3, count: 1 }.into();
        assert!(matches!(err, ChannelError::InvalidArgument(_)));

        let err: ChannelError = SerialError::Busy("/dev/ttyUSB0".into()).into();
        assert!(matches!(err, ChannelError::Busy(port) if port == "/dev/ttyUSB0"));

        let err: ChannelError = SerialError::NotOpen(2).into();
        assert!(matches!(err, ChannelError::Serial(SerialError::NotOpen(2))));
    }

    #[test]
    fn open_failures_keep_the_os_error_kind() {
        let err: ChannelError = SerialError::Open {
            path: "/dev/ttyUSB0".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        }
        .into();
        assert!(
            matches!(&err, ChannelError::Io(io) if io.kind() == std::io::ErrorKind::PermissionDenied)
        );

        let err: ChannelError = SerialError::Configure {
            path: "/dev/ttyUSB0".into(),
            source: std::io::Error::from(std::io::ErrorKind::InvalidInput),
        }
        .into();
        assert!(matches!(err, ChannelError::Io(_)));
    }

    #[test]
    fn serial_variant_exposes_its_cause() {
        use std::error::Error;

        let err: ChannelError = SerialError::NotOpen(1).into();
        let cause = err.source().expect("serial cause");
        assert_eq!(cause.to_string(), SerialError::NotOpen(1).to_string());
    }
}
