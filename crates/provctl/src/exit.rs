use std::fmt;
use std::io;

use provctl_channel::ChannelError;
use provctl_protocol::{ErrorKind, ProtocolError};

// Process exit codes.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const DEVICE_REJECTED: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(USAGE, message)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: &io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::NotFound => USAGE,
        _ => TRANSPORT_ERROR,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn channel_error(context: &str, err: ChannelError) -> CliError {
    let code = match &err {
        ChannelError::Io(source) => return io_error(context, source),
        ChannelError::InvalidArgument(_) => USAGE,
        ChannelError::Busy(_) | ChannelError::Serial(_) => TRANSPORT_ERROR,
        ChannelError::AlreadyInUse
        | ChannelError::InvalidState { .. }
        | ChannelError::NotSupported(_) => FAILURE,
        ChannelError::Poisoned => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn protocol_error(context: &str, err: ProtocolError) -> CliError {
    if let ProtocolError::Channel(err) = err {
        return channel_error(context, err);
    }
    let kind = err.kind();
    let code = if kind.is_device_reported() {
        DEVICE_REJECTED
    } else {
        match kind {
            ErrorKind::InvalidArgument => USAGE,
            ErrorKind::Desync => TIMEOUT,
            ErrorKind::Busy | ErrorKind::Transport => TRANSPORT_ERROR,
            ErrorKind::Fault => INTERNAL,
            _ => FAILURE,
        }
    };
    CliError::new(code, format!("{context}: {err} [{}]", kind.name()))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use provctl_protocol::{DeviceFailure, FeatureId};

    use super::*;

    #[test]
    fn device_rejections_exit_60() {
        let err = ProtocolError::device(DeviceFailure::OutOfRange, "out of range");
        assert_eq!(protocol_error("set gain", err).code, DEVICE_REJECTED);

        let err = ProtocolError::device(DeviceFailure::Other, "nope");
        assert_eq!(protocol_error("set gain", err).code, DEVICE_REJECTED);
    }

    #[test]
    fn desync_is_a_timeout() {
        let err = ProtocolError::Desync(Duration::from_secs(2));
        let cli = protocol_error("get gain", err);
        assert_eq!(cli.code, TIMEOUT);
        assert!(cli.message.contains("[desync]"));
    }

    #[test]
    fn unsupported_feature_is_a_plain_failure() {
        let err = ProtocolError::NotSupported {
            feature: FeatureId::Lens,
            operation: "get_lens_focus",
        };
        assert_eq!(protocol_error("lens", err).code, FAILURE);
    }

    #[test]
    fn channel_errors_keep_their_own_mapping() {
        let err = ProtocolError::Channel(ChannelError::Busy("/dev/ttyUSB0".into()));
        assert_eq!(protocol_error("open", err).code, TRANSPORT_ERROR);

        let err = ChannelError::Io(io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(channel_error("open", err).code, PERMISSION_DENIED);

        let err = ChannelError::InvalidArgument("baud 12345".into());
        assert_eq!(channel_error("open", err).code, USAGE);
    }

    #[test]
    fn permission_denied_on_open_exits_50() {
        let err: ChannelError = provctl_serial::SerialError::Open {
            path: "/dev/ttyUSB0".into(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        }
        .into();
        assert_eq!(channel_error("open", err).code, PERMISSION_DENIED);

        let err: ChannelError = provctl_serial::SerialError::Open {
            path: "/dev/ttyUSB9".into(),
            source: io::Error::from(io::ErrorKind::NotFound),
        }
        .into();
        assert_eq!(channel_error("open", err).code, USAGE);
    }
}
