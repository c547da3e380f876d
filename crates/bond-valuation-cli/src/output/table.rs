use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_value, split_sections};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => {
                print_object(None, result);
                print_envelope_notes(map);
            }
            _ => print_object(None, map),
        },
        Value::Array(arr) => print_rows(None, arr),
        _ => println!("{}", value),
    }
}

/// Print scalar fields as a Field/Value table, then each nested section.
fn print_object(title: Option<&str>, map: &Map<String, Value>) {
    let (scalars, sections) = split_sections(map);

    if let Some(title) = title {
        println!("\n{}:", title);
    }
    if !scalars.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in scalars {
            builder.push_record([key.to_string(), format_value(val)]);
        }
        println!("{}", Table::from(builder));
    }

    for (key, val) in sections {
        match val {
            Value::Object(inner) => print_object(Some(key), inner),
            Value::Array(rows) => print_rows(Some(key), rows),
            _ => {}
        }
    }
}

/// Print an array of objects with one column per key of the first row.
fn print_rows(title: Option<&str>, rows: &[Value]) {
    if let Some(title) = title {
        println!("\n{}:", title);
    }
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            println!("{}", format_value(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
