use comfy_table::{presets::UTF8_FULL, Table};
use provctl_protocol::{DpcPixel, DpcTable};

use crate::cmd::{ConnectArgs, DpcCommand};
use crate::exit::{protocol_error, CliResult, SUCCESS};
use crate::output::{print_done, print_json, OutputFormat};
use crate::session::with_session;

pub fn run(command: DpcCommand, connect: &ConnectArgs, format: OutputFormat) -> CliResult<i32> {
    match command {
        DpcCommand::List(args) => {
            let mut table = DpcTable::with_capacity(args.capacity);
            with_session(connect, |s| {
                s.protocol
                    .get_dpc_table(&mut s.channel, &mut table)
                    .map_err(|err| protocol_error("read defect pixel table", err))
            })?;
            print_table(&table, format);
        }
        DpcCommand::Add { x, y } => {
            with_session(connect, |s| {
                s.protocol
                    .add_dpc_pixel(&mut s.channel, &DpcPixel { x, y })
                    .map_err(|err| protocol_error("add defect pixel", err))
            })?;
            print_done("dpc add", format);
        }
        DpcCommand::Clear => {
            with_session(connect, |s| {
                s.protocol
                    .clear_dpc_table(&mut s.channel)
                    .map_err(|err| protocol_error("clear defect pixel table", err))
            })?;
            print_done("dpc clear", format);
        }
        DpcCommand::Save => {
            with_session(connect, |s| {
                s.protocol
                    .save_dpc_table(&mut s.channel)
                    .map_err(|err| protocol_error("save defect pixel table", err))
            })?;
            print_done("dpc save", format);
        }
    }
    Ok(SUCCESS)
}

fn print_table(table: &DpcTable, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(table),
        OutputFormat::Table => {
            let mut out = Table::new();
            out.load_preset(UTF8_FULL).set_header(vec!["#", "X", "Y"]);
            for (i, pixel) in table.iter().enumerate() {
                out.add_row(vec![i.to_string(), pixel.x.to_string(), pixel.y.to_string()]);
            }
            println!("{out}");
            println!("{} of {} entries", table.len(), table.capacity());
        }
        OutputFormat::Pretty => {
            for (i, pixel) in table.iter().enumerate() {
                println!("{i:>4}: ({}, {})", pixel.x, pixel.y);
            }
            println!("{} of {} entries", table.len(), table.capacity());
        }
        OutputFormat::Raw => {
            for pixel in table {
                println!("{} {}", pixel.x, pixel.y);
            }
        }
    }
}
