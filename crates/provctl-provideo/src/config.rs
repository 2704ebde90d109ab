use std::time::Duration;

/// Default time to wait for a terminal token.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Default timeout for flash writes and long table transfers.
pub const DEFAULT_SLOW_TIMEOUT: Duration = Duration::from_secs(10);

/// Default command buffer size in bytes.
pub const DEFAULT_COMMAND_CAPACITY: usize = 256;

/// Default response accumulator size in bytes.
pub const DEFAULT_RESPONSE_CAPACITY: usize = 2 * 1024;

/// Default sleep after a poll that returned nothing.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2);

/// Timing and buffer limits of the wire driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// Deadline for ordinary commands. Default: 2 s.
    pub timeout: Duration,
    /// Deadline for slow operations (saving settings or tables). Default: 10 s.
    pub slow_timeout: Duration,
    /// Longest command line, newline included. Default: 256 bytes.
    pub command_capacity: usize,
    /// Longest response line kept while waiting for its newline.
    /// Default: 2 KiB.
    pub response_capacity: usize,
    /// Pause between empty polls. Default: 2 ms.
    pub poll_interval: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            slow_timeout: DEFAULT_SLOW_TIMEOUT,
            command_capacity: DEFAULT_COMMAND_CAPACITY,
            response_capacity: DEFAULT_RESPONSE_CAPACITY,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl DriverConfig {
    /// Same limits with a different ordinary timeout.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }
}

/// Per-registration driver state.
///
/// Each feature registration carries its own copy, so one device session can
/// propagate color settings to every chain while leaving others local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DriverOptions {
    /// Apply chain-aware settings to all processing chains.
    pub all_chains: bool,
}

impl DriverOptions {
    pub fn all_chains() -> Self {
        Self { all_chains: true }
    }
}
