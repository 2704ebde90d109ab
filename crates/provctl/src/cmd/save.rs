use crate::cmd::ConnectArgs;
use crate::exit::{protocol_error, CliResult, SUCCESS};
use crate::output::{print_done, OutputFormat};
use crate::session::with_session;

pub fn run(connect: &ConnectArgs, format: OutputFormat) -> CliResult<i32> {
    with_session(connect, |s| {
        s.protocol
            .save_settings(&mut s.channel)
            .map_err(|err| protocol_error("save settings", err))
    })?;
    print_done("save", format);
    Ok(SUCCESS)
}
