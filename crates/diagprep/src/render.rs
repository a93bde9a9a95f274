use crate::prelude::*;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty printed JSON
    Json,
    /// Two column table of labels and values
    Table,
}

/// Text shown in a table cell: strings without quotes, everything else as compact JSON
fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render a payload in the requested format
pub fn render_value(value: &Value, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("Failed to serialize payload as JSON")
        }
        OutputFormat::Table => Ok(render_table(value)),
    }
}

fn render_table(value: &Value) -> String {
    let mut table = new_table();

    match value {
        Value::Object(object) => {
            for (key, item) in object {
                table.add_row(prettytable::row![key, cell(item)]);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                table.add_row(prettytable::row![index, cell(item)]);
            }
        }
        primitive => {
            table.add_row(prettytable::row![cell(primitive)]);
        }
    }

    table.to_string()
}
