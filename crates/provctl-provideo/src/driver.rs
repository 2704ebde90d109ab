use std::io;
use std::thread;
use std::time::{Duration, Instant};

use bytes::Bytes;
use provctl_channel::{ChannelError, ControlChannel};
use provctl_protocol::{DeviceRecord, ProtocolError, Result};
use tracing::{debug, trace, warn};

use crate::command::{format_command, raw_command};
use crate::config::{DriverConfig, DriverOptions};
use crate::response::{classify, ResponseBuffer, Terminal};
use crate::scan::{is_anchor, scan_fields};

const READ_CHUNK_SIZE: usize = 256;

/// The ProVideo ASCII wire driver.
///
/// One value implements every feature trait of `provctl-protocol`. It holds
/// only configuration, so it is `Copy` and each feature registration gets its
/// own instance with its own [`DriverOptions`].
///
/// Every exchange is strictly sequential on the channel passed in: format the
/// command, send it completely, then read until a terminal token or the
/// deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProVideo {
    config: DriverConfig,
    options: DriverOptions,
}

impl ProVideo {
    /// Driver with default limits and options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Driver with explicit limits.
    pub fn with_config(config: DriverConfig) -> Self {
        Self {
            config,
            options: DriverOptions::default(),
        }
    }

    /// Same driver with different per-registration options.
    pub fn with_options(self, options: DriverOptions) -> Self {
        Self { options, ..self }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn options(&self) -> DriverOptions {
        self.options
    }

    /// Send `name args...` and wait for the success token.
    pub fn set(&self, channel: &mut ControlChannel, name: &str, args: &[i64]) -> Result<()> {
        self.set_with_timeout(channel, name, args, self.config.timeout)
    }

    /// [`set`](Self::set) with an explicit deadline.
    pub fn set_with_timeout(
        &self,
        channel: &mut ControlChannel,
        name: &str,
        args: &[i64],
        timeout: Duration,
    ) -> Result<()> {
        let command = format_command(name, args, self.config.command_capacity)?;
        self.exchange(channel, &command, timeout, &mut |_: &str| {})
    }

    /// Set on a chain-aware command.
    ///
    /// With [`DriverOptions::all_chains`] a trailing `1` asks the device to
    /// apply the value to every processing chain.
    pub fn set_chained(
        &self,
        channel: &mut ControlChannel,
        name: &str,
        args: &[i64],
    ) -> Result<()> {
        if self.options.all_chains {
            let mut chained = Vec::with_capacity(args.len() + 1);
            chained.extend_from_slice(args);
            chained.push(1);
            self.set(channel, name, &chained)
        } else {
            self.set(channel, name, args)
        }
    }

    /// Argument-less action command.
    pub fn exec(&self, channel: &mut ControlChannel, name: &str) -> Result<()> {
        self.set(channel, name, &[])
    }

    /// Query `name` and return exactly `expected` integer fields.
    pub fn get(
        &self,
        channel: &mut ControlChannel,
        name: &str,
        expected: usize,
    ) -> Result<Vec<i64>> {
        self.get_with_args(channel, name, &[], expected)
    }

    /// Query with selector arguments (for example a phase id).
    ///
    /// The response must contain a line starting with `name`; when the device
    /// echoes the query too, the last such line holds the data.
    pub fn get_with_args(
        &self,
        channel: &mut ControlChannel,
        name: &str,
        args: &[i64],
        expected: usize,
    ) -> Result<Vec<i64>> {
        let command = format_command(name, args, self.config.command_capacity)?;
        let mut anchor: Option<String> = None;
        self.exchange(channel, &command, self.config.timeout, &mut |line: &str| {
            if is_anchor(line, name) {
                anchor = Some(line.to_string());
            }
        })?;

        let line = anchor.ok_or_else(|| {
            ProtocolError::Fault(format!("response to {name} carries no {name} line"))
        })?;
        scan_fields(&line, name, expected)
    }

    /// Query a single integer.
    pub fn get_value(&self, channel: &mut ControlChannel, name: &str) -> Result<i64> {
        let fields = self.get(channel, name, 1)?;
        Ok(fields[0])
    }

    /// Query a multi-field record.
    pub fn get_record<R: DeviceRecord>(
        &self,
        channel: &mut ControlChannel,
        name: &str,
    ) -> Result<R> {
        R::from_fields(&self.get(channel, name, R::WIRE_FIELDS)?)
    }

    /// Send a record's fields as arguments.
    pub fn set_record<R: DeviceRecord>(
        &self,
        channel: &mut ControlChannel,
        name: &str,
        record: &R,
    ) -> Result<()> {
        self.set(channel, name, &record.to_fields())
    }

    /// Chain-aware [`set_record`](Self::set_record).
    pub fn set_record_chained<R: DeviceRecord>(
        &self,
        channel: &mut ControlChannel,
        name: &str,
        record: &R,
    ) -> Result<()> {
        self.set_chained(channel, name, &record.to_fields())
    }

    /// Send `name args...` and hand every non-terminal line to `on_line`.
    pub fn transact_lines(
        &self,
        channel: &mut ControlChannel,
        name: &str,
        args: &[i64],
        timeout: Duration,
        on_line: &mut dyn FnMut(&str),
    ) -> Result<()> {
        let command = format_command(name, args, self.config.command_capacity)?;
        self.exchange(channel, &command, timeout, on_line)
    }

    /// Send a free-form line and return every response line before the
    /// success token, newline-joined.
    ///
    /// A failure token is still classified and returned as an error.
    pub fn transact_raw(
        &self,
        channel: &mut ControlChannel,
        line: &str,
        timeout: Duration,
    ) -> Result<String> {
        let command = raw_command(line, self.config.command_capacity)?;
        let mut text = String::new();
        self.exchange(channel, &command, timeout, &mut |line: &str| {
            text.push_str(line);
            text.push('\n');
        })?;
        Ok(text)
    }

    fn exchange(
        &self,
        channel: &mut ControlChannel,
        command: &Bytes,
        timeout: Duration,
        on_line: &mut dyn FnMut(&str),
    ) -> Result<()> {
        let deadline = Instant::now() + timeout;
        debug!(command = %String::from_utf8_lossy(command).trim_end(), "sending command");
        self.send_all(channel, command, deadline)?;
        self.evaluate(channel, deadline, timeout, on_line)
    }

    fn send_all(
        &self,
        channel: &mut ControlChannel,
        command: &[u8],
        deadline: Instant,
    ) -> Result<()> {
        let mut offset = 0;
        while offset < command.len() {
            let sent = channel.send(&command[offset..])?;
            if sent > 0 {
                offset += sent;
                continue;
            }
            if Instant::now() >= deadline {
                return Err(ChannelError::Io(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("transport accepted {offset} of {} command bytes", command.len()),
                ))
                .into());
            }
            thread::sleep(self.config.poll_interval);
        }
        Ok(())
    }

    fn evaluate(
        &self,
        channel: &mut ControlChannel,
        deadline: Instant,
        timeout: Duration,
        on_line: &mut dyn FnMut(&str),
    ) -> Result<()> {
        let mut response = ResponseBuffer::new(self.config.response_capacity);
        let mut chunk = [0u8; READ_CHUNK_SIZE];

        loop {
            let read = match channel.receive(&mut chunk) {
                Ok(n) => n,
                Err(ChannelError::Io(err)) if err.kind() == io::ErrorKind::Interrupted => 0,
                Err(err) => return Err(err.into()),
            };

            if read > 0 {
                trace!(read, "response chunk");
                match response.extend(&chunk[..read], on_line) {
                    Some(Terminal::Success) => {
                        debug!("device acknowledged");
                        return Ok(());
                    }
                    Some(Terminal::Failure(message)) => {
                        let failure = classify(&message);
                        debug!(%failure, %message, "device rejected command");
                        return Err(ProtocolError::device(failure, message));
                    }
                    None => {}
                }
            }

            let now = Instant::now();
            if now >= deadline {
                warn!(
                    ?timeout,
                    pending = response.pending(),
                    discarded = response.discarded(),
                    "no terminal token before deadline"
                );
                return Err(ProtocolError::Desync(timeout));
            }
            if read == 0 {
                thread::sleep(self.config.poll_interval.min(deadline - now));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use provctl_channel::testing::ScriptedTransport;
    use provctl_channel::OpenConfig;
    use provctl_protocol::{DeviceFailure, ErrorKind, KneeConfig};

    use super::*;

    fn connected() -> (ControlChannel, ScriptedTransport) {
        let script = ScriptedTransport::new();
        let mut channel = ControlChannel::with_transport(script.clone());
        channel.open(&OpenConfig::default()).unwrap();
        (channel, script)
    }

    fn fast() -> ProVideo {
        ProVideo::with_config(DriverConfig {
            timeout: Duration::from_millis(100),
            poll_interval: Duration::from_millis(1),
            ..DriverConfig::default()
        })
    }

    #[test]
    fn set_sends_one_line_and_accepts_ok() {
        let (mut ch, script) = connected();
        script.queue_response(b"OK\n");
        fast().set(&mut ch, "cam_gain", &[120]).unwrap();
        assert_eq!(script.sent_lines(), vec!["cam_gain 120"]);
    }

    #[test]
    fn get_scans_the_echoed_fields() {
        let (mut ch, script) = connected();
        script.queue_response(b"knee 1 5 320 105\nOK\n");
        let knee: KneeConfig = fast().get_record(&mut ch, "knee").unwrap();
        assert_eq!(knee.knee_slope, 320);
        assert_eq!(script.sent_lines(), vec!["knee"]);
    }

    #[test]
    fn byte_sized_chunks_with_idle_polls() {
        let (mut ch, script) = connected();
        script
            .set_chunk_size(1)
            .set_idle_polls(2)
            .queue_response(b"cam_exposure 4000\r\nOK\r\n");
        assert_eq!(fast().get_value(&mut ch, "cam_exposure").unwrap(), 4000);
    }

    #[test]
    fn failure_text_is_classified() {
        let cases: [(&[u8], DeviceFailure); 4] = [
            (b"FAIL: out of range\n", DeviceFailure::OutOfRange),
            (b"FAIL: invalid license\n", DeviceFailure::InvalidLicense),
            (b"FAIL: wrong number of parameters\n", DeviceFailure::ParamCount),
            (b"FAIL\n", DeviceFailure::Other),
        ];
        for (response, expected) in cases {
            let (mut ch, script) = connected();
            script.queue_response(response);
            let err = fast().set(&mut ch, "cam_gain", &[1600]).unwrap_err();
            assert!(
                matches!(&err, ProtocolError::Device { failure, .. } if *failure == expected),
                "{err}"
            );
        }
    }

    #[test]
    fn silence_is_desync_not_hang() {
        let (mut ch, _script) = connected();
        let started = Instant::now();
        let err = fast().set(&mut ch, "fan", &[30]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Desync);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn output_without_terminator_is_desync() {
        let (mut ch, script) = connected();
        script.queue_response(b"fan 30\nfan 30\n");
        let err = fast().get_value(&mut ch, "fan").unwrap_err();
        assert!(matches!(err, ProtocolError::Desync(_)));
    }

    #[test]
    fn field_count_mismatch_is_fault() {
        let (mut ch, script) = connected();
        script.queue_response(b"knee 1 5 320\nOK\n");
        let err = fast().get_record::<KneeConfig>(&mut ch, "knee").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fault);

        script.queue_response(b"knee 1 5 320 105 9\nOK\n");
        let err = fast().get_record::<KneeConfig>(&mut ch, "knee").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fault);
    }

    #[test]
    fn missing_anchor_is_fault() {
        let (mut ch, script) = connected();
        script.queue_response(b"hello\nOK\n");
        let err = fast().get_value(&mut ch, "fan").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fault);
    }

    #[test]
    fn echoed_query_is_skipped() {
        let (mut ch, script) = connected();
        script.queue_response(b"mcc_phase 3\nmcc_phase 3 100 -20\nOK\n");
        let fields = fast().get_with_args(&mut ch, "mcc_phase", &[3], 3).unwrap();
        assert_eq!(fields, vec![3, 100, -20]);
        assert_eq!(script.sent_lines(), vec!["mcc_phase 3"]);
    }

    #[test]
    fn oversized_command_is_never_sent() {
        let (mut ch, script) = connected();
        let driver = ProVideo::with_config(DriverConfig {
            command_capacity: 8,
            ..DriverConfig::default()
        });
        let err = driver.set(&mut ch, "cam_exposure", &[40_000]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fault);
        assert!(script.sent().is_empty());
    }

    #[test]
    fn partial_sends_are_completed() {
        let (mut ch, script) = connected();
        script.set_max_send(3).queue_response(b"OK\n");
        fast().set(&mut ch, "knee", &[1, 5, 320, 105]).unwrap();
        assert_eq!(script.sent().len(), 6);
        assert_eq!(script.sent_lines(), vec!["knee 1 5 320 105"]);
    }

    #[test]
    fn overflowing_line_is_dropped_and_ok_still_found() {
        let (mut ch, script) = connected();
        let driver = ProVideo::with_config(DriverConfig {
            response_capacity: 16,
            timeout: Duration::from_millis(200),
            poll_interval: Duration::from_millis(1),
            ..DriverConfig::default()
        });
        let mut noise = vec![b'x'; 100];
        noise.extend_from_slice(b"\nOK\n");
        script.set_chunk_size(7).queue_response(&noise);
        driver.set(&mut ch, "reboot", &[]).unwrap();
    }

    #[test]
    fn chained_set_appends_flag() {
        let (mut ch, script) = connected();
        script.queue_response(b"OK\nOK\n");
        fast().set_chained(&mut ch, "cproc_bright", &[-10]).unwrap();
        fast()
            .with_options(DriverOptions::all_chains())
            .set_chained(&mut ch, "cproc_bright", &[-10])
            .unwrap();
        assert_eq!(
            script.sent_lines(),
            vec!["cproc_bright -10", "cproc_bright -10 1"]
        );
    }

    #[test]
    fn raw_transaction_returns_text() {
        let (mut ch, script) = connected();
        script.queue_response(b"version 1 4 2\nbuild 77\nOK\n");
        let text = fast()
            .transact_raw(&mut ch, "version", Duration::from_millis(100))
            .unwrap();
        assert_eq!(text, "version 1 4 2\nbuild 77\n");
    }

    #[test]
    fn channel_errors_propagate() {
        let (mut ch, script) = connected();
        script.queue_receive_error(ChannelError::Io(io::Error::other("unplugged")));
        let err = fast().get_value(&mut ch, "fan").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn closed_channel_is_invalid_state() {
        let script = ScriptedTransport::new();
        let mut ch = ControlChannel::with_transport(script.clone());
        let err = fast().get_value(&mut ch, "fan").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert!(script.sent().is_empty());
    }
}
