//! Incremental response parsing.
//!
//! Device output is a sequence of newline-terminated lines. Only complete
//! lines are inspected, so a token split across any number of reads is found
//! once its newline arrives. A line equal to `OK` ends a successful exchange;
//! a line starting with `FAIL` ends a failed one and carries the diagnostic
//! text. Every other complete line is handed to the caller.

use bytes::BytesMut;
use provctl_protocol::DeviceFailure;
use tracing::warn;

pub(crate) const SUCCESS_TOKEN: &str = "OK";
pub(crate) const FAILURE_TOKEN: &str = "FAIL";

/// How an exchange ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Terminal {
    Success,
    Failure(String),
}

/// Accumulates received bytes and splits them into lines.
///
/// Holds at most `capacity` bytes of an unfinished line. A longer line is
/// discarded up to its newline and parsing continues after it.
#[derive(Debug)]
pub(crate) struct ResponseBuffer {
    buf: BytesMut,
    capacity: usize,
    skipping: bool,
    discarded: usize,
}

impl ResponseBuffer {
    pub(crate) fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buf: BytesMut::with_capacity(capacity),
            capacity,
            skipping: false,
            discarded: 0,
        }
    }

    /// Number of over-long lines thrown away so far.
    pub(crate) fn discarded(&self) -> usize {
        self.discarded
    }

    /// Append `chunk`, then feed complete lines to `on_line` until a
    /// terminal token appears.
    pub(crate) fn extend(
        &mut self,
        mut chunk: &[u8],
        on_line: &mut dyn FnMut(&str),
    ) -> Option<Terminal> {
        while !chunk.is_empty() {
            if self.skipping {
                match chunk.iter().position(|&b| b == b'\n') {
                    Some(pos) => {
                        self.skipping = false;
                        chunk = &chunk[pos + 1..];
                        continue;
                    }
                    None => return None,
                }
            }

            let newline = chunk.iter().position(|&b| b == b'\n');
            let take = newline.map_or(chunk.len(), |pos| pos + 1);
            if self.buf.len() + take > self.capacity && newline.map_or(true, |pos| {
                self.buf.len() + pos > self.capacity
            }) {
                warn!(
                    capacity = self.capacity,
                    "response line exceeds accumulator, discarding"
                );
                self.discarded += 1;
                self.buf.clear();
                match newline {
                    Some(pos) => chunk = &chunk[pos + 1..],
                    None => {
                        self.skipping = true;
                        return None;
                    }
                }
                continue;
            }

            self.buf.extend_from_slice(&chunk[..take]);
            chunk = &chunk[take..];
            if newline.is_some() {
                if let Some(terminal) = self.take_line(on_line) {
                    return Some(terminal);
                }
            }
        }
        None
    }

    fn take_line(&mut self, on_line: &mut dyn FnMut(&str)) -> Option<Terminal> {
        let raw = self.buf.split();
        let text = String::from_utf8_lossy(&raw);
        let line = text.trim_end_matches(['\n', '\r']);
        match terminal(line) {
            Some(terminal) => Some(terminal),
            None => {
                on_line(line);
                None
            }
        }
    }

    /// Bytes of the unfinished line, if any.
    pub(crate) fn pending(&self) -> usize {
        self.buf.len()
    }
}

fn terminal(line: &str) -> Option<Terminal> {
    let trimmed = line.trim();
    if trimmed == SUCCESS_TOKEN {
        return Some(Terminal::Success);
    }
    let rest = trimmed.strip_prefix(FAILURE_TOKEN)?;
    let message = rest.trim_start().strip_prefix(':').unwrap_or(rest).trim();
    Some(Terminal::Failure(message.to_string()))
}

/// Map failure text onto a device failure kind.
///
/// Case-insensitive substring match; the first rule that matches wins.
pub fn classify(message: &str) -> DeviceFailure {
    const RULES: &[(&str, DeviceFailure)] = &[
        ("invalid license", DeviceFailure::InvalidLicense),
        ("invalid chain", DeviceFailure::InvalidChain),
        ("genlock", DeviceFailure::Genlock),
        ("out of range", DeviceFailure::OutOfRange),
        ("number of parameters", DeviceFailure::ParamCount),
        ("parameter count", DeviceFailure::ParamCount),
        ("not supported", DeviceFailure::Unsupported),
        ("busy", DeviceFailure::Busy),
    ];

    let lower = message.to_ascii_lowercase();
    RULES
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map_or(DeviceFailure::Other, |(_, failure)| *failure)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(buffer: &mut ResponseBuffer, chunks: &[&[u8]]) -> (Vec<String>, Option<Terminal>) {
        let mut lines = Vec::new();
        for chunk in chunks {
            if let Some(t) = buffer.extend(chunk, &mut |line| lines.push(line.to_string())) {
                return (lines, Some(t));
            }
        }
        (lines, None)
    }

    #[test]
    fn detects_ok_split_across_chunks() {
        let mut buffer = ResponseBuffer::new(64);
        let (lines, terminal) = feed(&mut buffer, &[b"cam_g", b"ain 12", b"0\nO", b"K", b"\n"]);
        assert_eq!(lines, vec!["cam_gain 120"]);
        assert_eq!(terminal, Some(Terminal::Success));
    }

    #[test]
    fn token_needs_complete_line() {
        let mut buffer = ResponseBuffer::new(64);
        let (_, terminal) = feed(&mut buffer, &[b"OK"]);
        assert_eq!(terminal, None);
        assert_eq!(buffer.pending(), 2);
    }

    #[test]
    fn ok_inside_other_text_is_not_a_token() {
        let mut buffer = ResponseBuffer::new(64);
        let (lines, terminal) = feed(&mut buffer, &[b"LOOKUP OK done\n"]);
        assert_eq!(lines, vec!["LOOKUP OK done"]);
        assert_eq!(terminal, None);
    }

    #[test]
    fn crlf_lines() {
        let mut buffer = ResponseBuffer::new(64);
        let (lines, terminal) = feed(&mut buffer, &[b"temp 41 70\r\nOK\r\n"]);
        assert_eq!(lines, vec!["temp 41 70"]);
        assert_eq!(terminal, Some(Terminal::Success));
    }

    #[test]
    fn failure_message_is_extracted() {
        let mut buffer = ResponseBuffer::new(64);
        let (_, terminal) = feed(&mut buffer, &[b"FAIL: out of range\n"]);
        assert_eq!(terminal, Some(Terminal::Failure("out of range".into())));

        let mut buffer = ResponseBuffer::new(64);
        let (_, terminal) = feed(&mut buffer, &[b"FAIL\n"]);
        assert_eq!(terminal, Some(Terminal::Failure(String::new())));

        let mut buffer = ResponseBuffer::new(64);
        let (_, terminal) = feed(&mut buffer, &[b"FAIL device busy\n"]);
        assert_eq!(terminal, Some(Terminal::Failure("device busy".into())));
    }

    #[test]
    fn overlong_line_is_discarded_and_parsing_resumes() {
        let mut buffer = ResponseBuffer::new(8);
        let (lines, terminal) = feed(
            &mut buffer,
            &[b"0123456", b"789abcdef", b"ghij\nfan 3", b"0\nOK\n"],
        );
        assert_eq!(lines, vec!["fan 30"]);
        assert_eq!(terminal, Some(Terminal::Success));
        assert_eq!(buffer.discarded(), 1);
    }

    #[test]
    fn overlong_line_within_one_chunk() {
        let mut buffer = ResponseBuffer::new(4);
        let (lines, terminal) = feed(&mut buffer, &[b"garbage-line\nOK\n"]);
        assert!(lines.is_empty());
        assert_eq!(terminal, Some(Terminal::Success));
        assert_eq!(buffer.discarded(), 1);
    }

    #[test]
    fn classification_table() {
        let cases = [
            ("invalid license for feature", DeviceFailure::InvalidLicense),
            ("Invalid Chain 3", DeviceFailure::InvalidChain),
            ("genlock failed", DeviceFailure::Genlock),
            ("out of range", DeviceFailure::OutOfRange),
            ("wrong number of parameters", DeviceFailure::ParamCount),
            ("parameter count mismatch", DeviceFailure::ParamCount),
            ("command not supported", DeviceFailure::Unsupported),
            ("BUSY", DeviceFailure::Busy),
            ("", DeviceFailure::Other),
            ("checksum error", DeviceFailure::Other),
        ];
        for (text, expected) in cases {
            assert_eq!(classify(text), expected, "{text:?}");
        }
    }

    #[test]
    fn first_rule_wins() {
        assert_eq!(
            classify("genlock busy, value out of range"),
            DeviceFailure::Genlock
        );
    }
}
