use std::fmt;
use std::time::Duration;

use provctl_channel::ChannelError;

use crate::feature::FeatureId;

/// Failure categories a device reports after its failure token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceFailure {
    /// A parameter is outside the range the device accepts.
    OutOfRange,
    /// The command carried the wrong number of parameters.
    ParamCount,
    /// The device is busy with another operation.
    Busy,
    /// The firmware does not implement the command.
    Unsupported,
    /// The feature needs a license the device does not hold.
    InvalidLicense,
    /// The addressed processing chain does not exist.
    InvalidChain,
    /// The device failed to lock to the reference signal.
    Genlock,
    /// Failure token without recognized diagnostic text.
    Other,
}

impl DeviceFailure {
    /// The flat error kind for this failure.
    pub fn kind(self) -> ErrorKind {
        match self {
            Self::OutOfRange => ErrorKind::OutOfRange,
            Self::ParamCount => ErrorKind::ParamCount,
            Self::Busy => ErrorKind::DeviceBusy,
            Self::Unsupported => ErrorKind::FirmwareUnsupported,
            Self::InvalidLicense => ErrorKind::InvalidLicense,
            Self::InvalidChain => ErrorKind::InvalidChain,
            Self::Genlock => ErrorKind::Genlock,
            Self::Other => ErrorKind::DeviceFailure,
        }
    }
}

impl fmt::Display for DeviceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().name())
    }
}

/// Flat classification of every protocol error.
///
/// Each kind has a stable negative errno-style [`code`](ErrorKind::code), so
/// callers can branch on it (retry on `DeviceBusy`, surface `OutOfRange` to
/// the user, reconnect on `Desync`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    InvalidState,
    NotSupported,
    AlreadyRegistered,
    Busy,
    Fault,
    Desync,
    Transport,
    OutOfRange,
    ParamCount,
    DeviceBusy,
    FirmwareUnsupported,
    InvalidLicense,
    InvalidChain,
    Genlock,
    DeviceFailure,
}

impl ErrorKind {
    /// Stable numeric code (negated Linux errno values).
    pub fn code(self) -> i32 {
        match self {
            Self::InvalidArgument => -22,     // EINVAL
            Self::InvalidState => -77,        // EBADFD
            Self::NotSupported => -95,        // EOPNOTSUPP
            Self::AlreadyRegistered => -17,   // EEXIST
            Self::Busy => -16,                // EBUSY
            Self::Fault => -14,               // EFAULT
            Self::Desync => -84,              // EILSEQ
            Self::Transport => -19,           // ENODEV
            Self::OutOfRange => -34,          // ERANGE
            Self::ParamCount => -7,           // E2BIG
            Self::DeviceBusy => -11,          // EAGAIN
            Self::FirmwareUnsupported => -38, // ENOSYS
            Self::InvalidLicense => -13,      // EACCES
            Self::InvalidChain => -6,         // ENXIO
            Self::Genlock => -67,             // ENOLINK
            Self::DeviceFailure => -5,        // EIO
        }
    }

    /// Short snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::InvalidState => "invalid_state",
            Self::NotSupported => "not_supported",
            Self::AlreadyRegistered => "already_registered",
            Self::Busy => "busy",
            Self::Fault => "fault",
            Self::Desync => "desync",
            Self::Transport => "transport",
            Self::OutOfRange => "out_of_range",
            Self::ParamCount => "param_count",
            Self::DeviceBusy => "device_busy",
            Self::FirmwareUnsupported => "firmware_unsupported",
            Self::InvalidLicense => "invalid_license",
            Self::InvalidChain => "invalid_chain",
            Self::Genlock => "genlock",
            Self::DeviceFailure => "device_failure",
        }
    }

    /// True for kinds reported by the device itself.
    pub fn is_device_reported(self) -> bool {
        matches!(
            self,
            Self::OutOfRange
                | Self::ParamCount
                | Self::DeviceBusy
                | Self::FirmwareUnsupported
                | Self::InvalidLicense
                | Self::InvalidChain
                | Self::Genlock
                | Self::DeviceFailure
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors returned by registry dispatch and feature drivers.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Caller input is inconsistent (wrong record size, full table, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No driver registered for the feature, or the driver leaves the
    /// operation unimplemented.
    #[error("{feature} does not support {operation}")]
    NotSupported {
        feature: FeatureId,
        operation: &'static str,
    },

    /// A driver is already registered for the feature.
    #[error("feature {0} already registered")]
    AlreadyRegistered(FeatureId),

    /// The response was received but could not be understood, or the command
    /// would not fit the command buffer.
    #[error("protocol fault: {0}")]
    Fault(String),

    /// No terminal marker arrived before the deadline.
    #[error("no response terminator within {0:?} (channel may be out of sync)")]
    Desync(Duration),

    /// The device answered with its failure token.
    #[error("device reported {failure}: {message}")]
    Device {
        failure: DeviceFailure,
        message: String,
    },

    /// Channel or transport failure.
    #[error("channel error: {0}")]
    Channel(#[from] ChannelError),
}

impl ProtocolError {
    /// Flat kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotSupported { .. } => ErrorKind::NotSupported,
            Self::AlreadyRegistered(_) => ErrorKind::AlreadyRegistered,
            Self::Fault(_) => ErrorKind::Fault,
            Self::Desync(_) => ErrorKind::Desync,
            Self::Device { failure, .. } => failure.kind(),
            Self::Channel(err) => match err {
                ChannelError::InvalidState { .. } => ErrorKind::InvalidState,
                ChannelError::NotSupported(_) => ErrorKind::NotSupported,
                ChannelError::InvalidArgument(_) => ErrorKind::InvalidArgument,
                ChannelError::Busy(_) | ChannelError::AlreadyInUse => ErrorKind::Busy,
                ChannelError::Serial(_) | ChannelError::Io(_) | ChannelError::Poisoned => {
                    ErrorKind::Transport
                }
            },
        }
    }

    /// Stable numeric code of this error.
    pub fn code(&self) -> i32 {
        self.kind().code()
    }

    /// Device failure with its diagnostic text.
    pub fn device(failure: DeviceFailure, message: impl Into<String>) -> Self {
        Self::Device {
            failure,
            message: message.into(),
        }
    }
}

/// Shorthand for a missing operation.
pub fn unsupported<T>(feature: FeatureId, operation: &'static str) -> Result<T> {
    Err(ProtocolError::NotSupported { feature, operation })
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
