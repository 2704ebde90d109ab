use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use provctl_channel::{ControlChannel, OpenConfig, SerialConfig, SerialTransport};
use provctl_protocol::ControlProtocol;
use provctl_provideo::{register_all, DriverConfig, DriverOptions, ProVideo};
use provctl_serial::{PortList, SerialHub};
use tracing::{debug, warn};

use crate::cmd::{parse_duration, ConnectArgs};
use crate::exit::{channel_error, protocol_error, CliError, CliResult};

/// An open connection to one camera with every feature registered.
pub struct Session {
    pub channel: ControlChannel,
    pub protocol: ControlProtocol,
    pub driver: ProVideo,
    pub timeout: Duration,
}

impl Session {
    pub fn open(args: &ConnectArgs) -> CliResult<Self> {
        let timeout = parse_duration(&args.timeout)?;
        let serial = serial_config(args);

        let mut hub = SerialHub::new();
        let index = resolve_port(&mut hub, args.port.as_deref().unwrap_or("0"))?;
        let port_name = hub
            .port_name(index)
            .map_err(|err| channel_error("resolve port", err.into()))?;

        let mut channel =
            ControlChannel::with_transport(SerialTransport::with_hub(Arc::new(Mutex::new(hub))));
        channel
            .open(&OpenConfig::with_serial(index, serial))
            .map_err(|err| channel_error(&format!("open {port_name}"), err))?;
        debug!(port = %port_name, baud = serial.baud, "session opened");

        let config = DriverConfig::default().with_timeout(timeout);
        let options = if args.all_chains {
            DriverOptions::all_chains()
        } else {
            DriverOptions::default()
        };
        let mut protocol = ControlProtocol::new();
        register_all(&mut protocol, config, options)
            .map_err(|err| protocol_error("register driver", err))?;

        Ok(Self {
            channel,
            protocol,
            driver: ProVideo::with_config(config).with_options(options),
            timeout,
        })
    }

    /// Close the port. Failures are logged; the command result stands.
    pub fn close(mut self) {
        if let Err(err) = self.channel.close() {
            warn!(%err, "closing port failed");
        }
    }
}

/// Open a session, run `f`, and close the port whatever `f` returned.
pub fn with_session<T>(
    args: &ConnectArgs,
    f: impl FnOnce(&mut Session) -> CliResult<T>,
) -> CliResult<T> {
    let mut session = Session::open(args)?;
    let result = f(&mut session);
    session.close();
    result
}

fn serial_config(args: &ConnectArgs) -> SerialConfig {
    let defaults = SerialConfig::default();
    SerialConfig {
        baud: args.baud.unwrap_or(defaults.baud),
        data_bits: args.data_bits.unwrap_or(defaults.data_bits),
        parity: args.parity.unwrap_or(defaults.parity),
        stop_bits: args.stop_bits.unwrap_or(defaults.stop_bits),
    }
}

/// Map `--port` onto a hub index.
///
/// Accepts a discovered index, a discovered device or file name, or the path
/// of any existing device node, which then replaces the discovered list.
pub fn resolve_port(hub: &mut SerialHub, port: &str) -> CliResult<usize> {
    let port = port.trim();
    if port.is_empty() {
        return Err(CliError::usage("port must not be empty"));
    }
    if let Ok(index) = port.parse::<usize>() {
        let count = hub.port_count();
        if index >= count {
            return Err(CliError::usage(format!(
                "port index {index} out of range ({count} ports found)"
            )));
        }
        return Ok(index);
    }
    if let Some(index) = hub.ports().position(port) {
        return Ok(index);
    }
    if Path::new(port).exists() {
        hub.set_ports(PortList::from_names([port]))
            .map_err(|err| channel_error("select port", err.into()))?;
        return Ok(0);
    }
    Err(CliError::usage(format!("no such port: {port}")))
}
