mod cmd;
mod exit;
mod logging;
mod output;
mod session;

use clap::Parser;

use crate::cmd::{Command, ConnectArgs};
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "provctl", version, about = "Control ProVideo cameras over a serial line")]
struct Cli {
    /// Output format (default: table on a terminal, json otherwise).
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(flatten)]
    connect: ConnectArgs,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            let code = if err.use_stderr() {
                exit::USAGE
            } else {
                exit::SUCCESS
            };
            std::process::exit(code);
        }
    };
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    match cmd::run(cli.command, &cli.connect, format) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::DpcCommand;

    #[test]
    fn parses_gain_read_and_write() {
        let cli = Cli::try_parse_from(["provctl", "gain"]).expect("gain should parse");
        assert!(matches!(cli.command, Command::Gain(ref a) if a.value.is_none()));

        let cli = Cli::try_parse_from(["provctl", "--port", "1", "gain", "240"])
            .expect("gain with value should parse");
        assert!(matches!(cli.command, Command::Gain(ref a) if a.value == Some(240)));
        assert_eq!(cli.connect.port.as_deref(), Some("1"));
    }

    #[test]
    fn connection_flags_are_global() {
        let cli = Cli::try_parse_from([
            "provctl",
            "info",
            "--baud",
            "9600",
            "--parity",
            "even",
            "--timeout",
            "500ms",
            "--all-chains",
        ])
        .expect("info args should parse");
        assert_eq!(cli.connect.baud, Some(9600));
        assert_eq!(cli.connect.parity, Some(provctl_serial::Parity::Even));
        assert_eq!(cli.connect.timeout, "500ms");
        assert!(cli.connect.all_chains);
    }

    #[test]
    fn parses_dpc_add() {
        let cli = Cli::try_parse_from(["provctl", "dpc", "add", "12", "34"])
            .expect("dpc add should parse");
        assert!(matches!(
            cli.command,
            Command::Dpc(DpcCommand::Add { x: 12, y: 34 })
        ));
    }

    #[test]
    fn raw_keeps_every_word() {
        let cli = Cli::try_parse_from(["provctl", "raw", "cam_gain", "120"])
            .expect("raw should parse");
        match cli.command {
            Command::Raw(args) => assert_eq!(args.line.join(" "), "cam_gain 120"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_parity() {
        let err = Cli::try_parse_from(["provctl", "--parity", "mark", "info"])
            .expect_err("bad parity should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
