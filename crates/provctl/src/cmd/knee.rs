use provctl_protocol::KneeConfig;

use crate::cmd::{ConnectArgs, KneeArgs};
use crate::exit::{protocol_error, CliError, CliResult, SUCCESS};
use crate::output::{print_done, OutputFormat, Report};
use crate::session::with_session;

pub fn run(args: KneeArgs, connect: &ConnectArgs, format: OutputFormat) -> CliResult<i32> {
    if let Some(config) = parse_config(&args.values)? {
        with_session(connect, |s| {
            s.protocol
                .set_knee_config(&mut s.channel, &config)
                .map_err(|err| protocol_error("set knee", err))
        })?;
        print_done("knee", format);
        return Ok(SUCCESS);
    }

    let config = with_session(connect, |s| {
        s.protocol
            .get_knee_config(&mut s.channel)
            .map_err(|err| protocol_error("read knee", err))
    })?;
    Report {
        title: "knee",
        rows: vec![
            ("enable", config.enable.to_string()),
            ("point", config.knee_point.to_string()),
            ("slope", config.knee_slope.to_string()),
            ("white clip", config.white_clip.to_string()),
        ],
        json: &config,
    }
    .print(format);
    Ok(SUCCESS)
}

fn parse_config(values: &[u16]) -> CliResult<Option<KneeConfig>> {
    match *values {
        [] => Ok(None),
        [enable, point, slope, clip] => {
            let narrow = |name: &str, value: u16| {
                u8::try_from(value)
                    .map_err(|_| CliError::usage(format!("knee {name} {value} exceeds 255")))
            };
            Ok(Some(KneeConfig {
                enable: narrow("enable", enable)?,
                knee_point: narrow("point", point)?,
                knee_slope: slope,
                white_clip: clip,
            }))
        }
        _ => Err(CliError::usage(
            "knee takes no values or exactly four: ENABLE POINT SLOPE CLIP",
        )),
    }
}
