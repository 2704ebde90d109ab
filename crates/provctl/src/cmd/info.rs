use provctl_protocol::{CamInfo, Temperature, VersionInfo};
use serde::Serialize;

use crate::cmd::ConnectArgs;
use crate::exit::{protocol_error, CliResult, SUCCESS};
use crate::output::{OutputFormat, Report};
use crate::session::with_session;

#[derive(Serialize)]
struct InfoOutput {
    version: VersionInfo,
    temperature: Temperature,
    camera: CamInfo,
}

pub fn run(connect: &ConnectArgs, format: OutputFormat) -> CliResult<i32> {
    let out = with_session(connect, |s| {
        let version = s
            .protocol
            .get_version(&mut s.channel)
            .map_err(|err| protocol_error("read version", err))?;
        let temperature = s
            .protocol
            .get_temperature(&mut s.channel)
            .map_err(|err| protocol_error("read temperature", err))?;
        let camera = s
            .protocol
            .get_cam_info(&mut s.channel)
            .map_err(|err| protocol_error("read camera info", err))?;
        Ok(InfoOutput {
            version,
            temperature,
            camera,
        })
    })?;

    Report {
        title: "device",
        rows: vec![
            ("firmware", out.version.to_string()),
            ("temperature", format!("{} C", out.temperature.current)),
            ("temperature max", format!("{} C", out.temperature.max)),
            ("gain range", format!("{}..={}", out.camera.min_gain, out.camera.max_gain)),
            (
                "exposure range",
                format!("{}..={}", out.camera.min_exposure, out.camera.max_exposure),
            ),
        ],
        json: &out,
    }
    .print(format);
    Ok(SUCCESS)
}
