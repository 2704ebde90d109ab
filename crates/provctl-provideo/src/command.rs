use std::fmt::Write;

use bytes::Bytes;
use provctl_protocol::{ProtocolError, Result};

/// Format `"<name>[ <arg>...]\n"`.
///
/// A line longer than `capacity` is a fault; nothing is truncated.
pub(crate) fn format_command(name: &str, args: &[i64], capacity: usize) -> Result<Bytes> {
    if name.is_empty() || name.contains(|c: char| c.is_whitespace()) {
        return Err(ProtocolError::InvalidArgument(format!(
            "invalid command name {name:?}"
        )));
    }

    let mut line = String::with_capacity(capacity.min(name.len() + args.len() * 12 + 1));
    line.push_str(name);
    for arg in args {
        // Writing to a String cannot fail.
        let _ = write!(line, " {arg}");
    }
    line.push('\n');

    if line.len() > capacity {
        return Err(ProtocolError::Fault(format!(
            "command {name} needs {} bytes, buffer holds {capacity}",
            line.len()
        )));
    }
    Ok(Bytes::from(line))
}

/// Validate a raw line typed by a user and terminate it.
pub(crate) fn raw_command(line: &str, capacity: usize) -> Result<Bytes> {
    let trimmed = line.trim_end_matches(['\r', '\n']);
    if trimmed.trim().is_empty() {
        return Err(ProtocolError::InvalidArgument("empty command".to_string()));
    }
    if trimmed.contains(['\r', '\n']) {
        return Err(ProtocolError::InvalidArgument(
            "raw command must be a single line".to_string(),
        ));
    }
    let total = trimmed.len() + 1;
    if total > capacity {
        return Err(ProtocolError::Fault(format!(
            "command needs {total} bytes, buffer holds {capacity}"
        )));
    }
    let mut bytes = Vec::with_capacity(total);
    bytes.extend_from_slice(trimmed.as_bytes());
    bytes.push(b'\n');
    Ok(Bytes::from(bytes))
}
