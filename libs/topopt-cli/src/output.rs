//! Structured output helpers.

use serde::Serialize;

use crate::OutputFormat;

/// Prints `value` as pretty JSON unless `quiet` is set. Text output is
/// handled by each command.
pub fn print_json<T: Serialize>(value: &T, format: OutputFormat, quiet: bool) {
    if quiet || !matches!(format, OutputFormat::Json) {
        return;
    }
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Failed to serialize output: {e}"),
    }
}
