pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

type Fields<'a> = Vec<(&'a str, &'a Value)>;

/// Split a result object into scalar fields and nested sections.
///
/// Arrays of objects (the cash-flow schedule) and nested objects (the
/// valuation / yields halves of an analysis) are returned as sections so
/// each formatter can lay them out separately.
pub(crate) fn split_sections(map: &Map<String, Value>) -> (Fields<'_>, Fields<'_>) {
    let mut scalars = Vec::new();
    let mut sections = Vec::new();
    for (key, val) in map {
        let is_section = match val {
            Value::Object(_) => true,
            Value::Array(items) => items.iter().any(Value::is_object),
            _ => false,
        };
        if is_section {
            sections.push((key.as_str(), val));
        } else {
            scalars.push((key.as_str(), val));
        }
    }
    (scalars, sections)
}

/// Render a scalar JSON value as plain text.
pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
