use crate::cmd::{ConnectArgs, ValueArgs};
use crate::exit::{protocol_error, CliResult, SUCCESS};
use crate::output::{print_done, print_value, OutputFormat};
use crate::session::with_session;

pub fn run(args: ValueArgs, connect: &ConnectArgs, format: OutputFormat) -> CliResult<i32> {
    match args.value {
        Some(exposure) => {
            with_session(connect, |s| {
                s.protocol
                    .set_cam_exposure(&mut s.channel, exposure)
                    .map_err(|err| protocol_error("set exposure", err))
            })?;
            print_done("exposure", format);
        }
        None => {
            let exposure = with_session(connect, |s| {
                s.protocol
                    .get_cam_exposure(&mut s.channel)
                    .map_err(|err| protocol_error("read exposure", err))
            })?;
            print_value("exposure", exposure.into(), format);
        }
    }
    Ok(SUCCESS)
}
