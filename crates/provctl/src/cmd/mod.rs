use std::time::Duration;

use clap::{Args, Subcommand};
use provctl_protocol::DpcTable;
use provctl_serial::Parity;

use crate::exit::{CliError, CliResult};
use crate::output::OutputFormat;

pub mod dpc;
pub mod exposure;
pub mod gain;
pub mod info;
pub mod knee;
pub mod ports;
pub mod raw;
pub mod save;
pub mod version;
pub mod watch;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List serial ports.
    Ports,
    /// Show firmware version, temperature and sensor limits.
    Info,
    /// Read or set the sensor gain.
    Gain(ValueArgs),
    /// Read or set the exposure time.
    Exposure(ValueArgs),
    /// Read or set the knee configuration.
    Knee(KneeArgs),
    /// Manage the defect pixel table.
    #[command(subcommand)]
    Dpc(DpcCommand),
    /// Persist current settings on the device.
    Save,
    /// Send one command line and print the response.
    Raw(RawArgs),
    /// Poll the board temperature until interrupted.
    Watch(WatchArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, connect: &ConnectArgs, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Ports => ports::run(format),
        Command::Info => info::run(connect, format),
        Command::Gain(args) => gain::run(args, connect, format),
        Command::Exposure(args) => exposure::run(args, connect, format),
        Command::Knee(args) => knee::run(args, connect, format),
        Command::Dpc(cmd) => dpc::run(cmd, connect, format),
        Command::Save => save::run(connect, format),
        Command::Raw(args) => raw::run(args, connect, format),
        Command::Watch(args) => watch::run(args, connect, format),
        Command::Version(args) => version::run(args),
    }
}

/// Serial connection settings shared by every device command.
#[derive(Args, Debug)]
pub struct ConnectArgs {
    /// Port index, device name or device path (default: first port).
    #[arg(long, short = 'p', env = "PROVCTL_PORT", global = true)]
    pub port: Option<String>,
    /// Baud rate.
    #[arg(long, env = "PROVCTL_BAUD", global = true)]
    pub baud: Option<u32>,
    /// Data bits per character.
    #[arg(long, global = true)]
    pub data_bits: Option<u8>,
    /// Parity (none, odd, even).
    #[arg(long, global = true)]
    pub parity: Option<Parity>,
    /// Stop bits.
    #[arg(long, global = true)]
    pub stop_bits: Option<u8>,
    /// Response timeout (e.g. 2s, 500ms).
    #[arg(long, env = "PROVCTL_TIMEOUT", default_value = "2s", global = true)]
    pub timeout: String,
    /// Apply color settings to every chain of a multi-chain device.
    #[arg(long, global = true)]
    pub all_chains: bool,
}

#[derive(Args, Debug)]
pub struct ValueArgs {
    /// New value. Omit to read the current one.
    pub value: Option<u32>,
}

#[derive(Args, Debug)]
pub struct KneeArgs {
    /// ENABLE POINT SLOPE CLIP. Omit to read the current configuration.
    #[arg(num_args = 0..=4, value_names = ["ENABLE", "POINT", "SLOPE", "CLIP"])]
    pub values: Vec<u16>,
}

#[derive(Subcommand, Debug)]
pub enum DpcCommand {
    /// Print the stored defect pixel table.
    List(DpcListArgs),
    /// Add one defect pixel.
    Add { x: u16, y: u16 },
    /// Clear the table in device RAM.
    Clear,
    /// Persist the table on the device.
    Save,
}

#[derive(Args, Debug)]
pub struct DpcListArgs {
    /// Maximum number of pixels to read.
    #[arg(long, default_value_t = DpcTable::DEFAULT_CAPACITY)]
    pub capacity: usize,
}

#[derive(Args, Debug)]
pub struct RawArgs {
    /// Command line, without the trailing newline.
    #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub line: Vec<String>,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Poll interval (e.g. 1s, 250ms).
    #[arg(long, default_value = "1s")]
    pub interval: String,
    /// Stop after N samples.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Parse `500ms`, `2s` or a bare number of seconds.
pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::usage("duration must not be empty"));
    }

    let (number, millis) = match input.strip_suffix("ms") {
        Some(num) => (num, true),
        None => (input.strip_suffix('s').unwrap_or(input), false),
    };

    let value: u64 = number
        .trim()
        .parse()
        .map_err(|_| CliError::usage(format!("invalid duration: {input}")))?;
    if value == 0 {
        return Err(CliError::usage("duration must be greater than zero"));
    }

    Ok(if millis {
        Duration::from_millis(value)
    } else {
        Duration::from_secs(value)
    })
}
