use comfy_table::{presets::UTF8_FULL, Table};
use provctl_channel::{ControlChannel, SerialTransport};
use serde::Serialize;

use crate::exit::{channel_error, CliResult, SUCCESS};
use crate::output::{print_json, OutputFormat};

#[derive(Serialize)]
struct PortEntry {
    index: usize,
    name: String,
}

pub fn run(format: OutputFormat) -> CliResult<i32> {
    let ports = list_ports(&mut ControlChannel::with_transport(SerialTransport::new()))?;
    print_ports(&ports, format);
    Ok(SUCCESS)
}

fn list_ports(channel: &mut ControlChannel) -> CliResult<Vec<PortEntry>> {
    let count = channel
        .get_no_ports()
        .map_err(|err| channel_error("list ports", err))?;
    (0..count)
        .map(|index| {
            let name = channel
                .get_port_name(index)
                .map_err(|err| channel_error("port name", err))?;
            Ok(PortEntry { index, name })
        })
        .collect()
}

fn print_ports(ports: &[PortEntry], format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(ports),
        OutputFormat::Table => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL).set_header(vec!["INDEX", "PORT"]);
            for port in ports {
                table.add_row(vec![port.index.to_string(), port.name.clone()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            if ports.is_empty() {
                println!("no serial ports found");
            }
            for port in ports {
                println!("[{}] {}", port.index, port.name);
            }
        }
        OutputFormat::Raw => {
            for port in ports {
                println!("{}", port.name);
            }
        }
    }
}
