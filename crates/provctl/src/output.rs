use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// A named set of fields shown as one JSON object or a two-column table.
pub struct Report<'a, T: Serialize> {
    pub title: &'a str,
    pub rows: Vec<(&'static str, String)>,
    pub json: &'a T,
}

impl<T: Serialize> Report<'_, T> {
    pub fn print(&self, format: OutputFormat) {
        match format {
            OutputFormat::Json => print_json(self.json),
            OutputFormat::Table => {
                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(vec![self.title.to_uppercase(), "VALUE".to_string()]);
                for (key, value) in &self.rows {
                    table.add_row(vec![key.to_string(), value.clone()]);
                }
                println!("{table}");
            }
            OutputFormat::Pretty => {
                println!("{}:", self.title);
                let width = self.rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
                for (key, value) in &self.rows {
                    println!("  {key:<width$}  {value}");
                }
            }
            OutputFormat::Raw => {
                let values: Vec<&str> = self.rows.iter().map(|(_, v)| v.as_str()).collect();
                println!("{}", values.join(" "));
            }
        }
    }
}

#[derive(Serialize)]
struct ValueOutput<'a> {
    name: &'a str,
    value: i64,
}

/// Print a single named integer.
pub fn print_value(name: &str, value: i64, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&ValueOutput { name, value }),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_header(vec!["NAME", "VALUE"])
                .add_row(vec![name.to_string(), value.to_string()]);
            println!("{table}");
        }
        OutputFormat::Pretty => println!("{name} = {value}"),
        OutputFormat::Raw => println!("{value}"),
    }
}

#[derive(Serialize)]
struct DoneOutput<'a> {
    action: &'a str,
    ok: bool,
}

/// Acknowledge a command that returns no data.
pub fn print_done(action: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&DoneOutput { action, ok: true }),
        OutputFormat::Table | OutputFormat::Pretty => println!("{action}: ok"),
        OutputFormat::Raw => {}
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}
