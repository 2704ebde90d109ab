use crate::cmd::{ConnectArgs, ValueArgs};
use crate::exit::{protocol_error, CliResult, SUCCESS};
use crate::output::{print_done, print_value, OutputFormat};
use crate::session::with_session;

pub fn run(args: ValueArgs, connect: &ConnectArgs, format: OutputFormat) -> CliResult<i32> {
    match args.value {
        Some(gain) => {
            with_session(connect, |s| {
                s.protocol
                    .set_cam_gain(&mut s.channel, gain)
                    .map_err(|err| protocol_error("set gain", err))
            })?;
            print_done("gain", format);
        }
        None => {
            let gain = with_session(connect, |s| {
                s.protocol
                    .get_cam_gain(&mut s.channel)
                    .map_err(|err| protocol_error("read gain", err))
            })?;
            print_value("gain", gain.into(), format);
        }
    }
    Ok(SUCCESS)
}
