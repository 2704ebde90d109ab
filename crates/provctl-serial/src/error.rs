use std::path::PathBuf;

/// Errors that can occur in serial transport operations.
#[derive(Debug, thiserror::Error)]
pub enum SerialError {
    /// A line setting is outside the allowed set.
    #[error("invalid serial configuration: {0}")]
    InvalidConfig(String),

    /// The port index does not refer to a discovered port.
    #[error("port index {index} out of range ({count} ports known)")]
    NoSuchPort { index: usize, count: usize },

    /// The port is already open.
    #[error("port {0} is already open")]
    Busy(String),

    /// The port index refers to a port that is not open.
    #[error("port index {0} is not open")]
    NotOpen(usize),

    /// Failed to open the device node.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read or apply line settings.
    #[error("failed to configure {path}: {source}")]
    Configure {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An I/O error occurred on an open port.
    #[error("serial I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SerialError>;
