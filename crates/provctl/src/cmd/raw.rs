use serde::Serialize;

use crate::cmd::{ConnectArgs, RawArgs};
use crate::exit::{protocol_error, CliResult, SUCCESS};
use crate::output::{print_json, print_raw, OutputFormat};
use crate::session::with_session;

#[derive(Serialize)]
struct RawOutput<'a> {
    command: &'a str,
    response: Vec<&'a str>,
}

pub fn run(args: RawArgs, connect: &ConnectArgs, format: OutputFormat) -> CliResult<i32> {
    let line = args.line.join(" ");
    let response = with_session(connect, |s| {
        s.driver
            .transact_raw(&mut s.channel, &line, s.timeout)
            .map_err(|err| protocol_error(&format!("'{line}'"), err))
    })?;

    match format {
        OutputFormat::Json => print_json(&RawOutput {
            command: &line,
            response: response.lines().collect(),
        }),
        OutputFormat::Table | OutputFormat::Pretty => {
            for text in response.lines() {
                println!("< {text}");
            }
        }
        OutputFormat::Raw => print_raw(response.as_bytes()),
    }
    Ok(SUCCESS)
}
