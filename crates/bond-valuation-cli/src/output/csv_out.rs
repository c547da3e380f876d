use serde_json::{Map, Value};
use std::io;

use super::{format_value, split_sections};

type StdoutCsv<'a> = csv::Writer<io::StdoutLock<'a>>;

/// Write output as CSV to stdout.
///
/// Scalar result fields come first as `field,value` rows; a cash-flow
/// schedule follows as its own header + rows block after a blank line.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(stdout.lock());

    let written = match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => write_object(&mut wtr, None, result),
            _ => write_object(&mut wtr, None, map),
        },
        Value::Array(arr) => write_rows(&mut wtr, arr),
        _ => wtr.write_record([format_value(value)]),
    };

    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        eprintln!("CSV output error: {}", e);
    }
}

fn write_object(
    wtr: &mut StdoutCsv<'_>,
    prefix: Option<&str>,
    map: &Map<String, Value>,
) -> csv::Result<()> {
    let (scalars, sections) = split_sections(map);

    if prefix.is_none() {
        wtr.write_record(["field", "value"])?;
    }
    for (key, val) in scalars {
        let field = match prefix {
            Some(p) => format!("{p}.{key}"),
            None => key.to_string(),
        };
        wtr.write_record([field, format_value(val)])?;
    }

    for (key, val) in sections {
        match val {
            Value::Object(inner) => write_object(wtr, Some(key), inner)?,
            Value::Array(rows) => {
                wtr.write_record([""])?;
                write_rows(wtr, rows)?;
            }
            _ => {}
        }
    }
    Ok(())
}

fn write_rows(wtr: &mut StdoutCsv<'_>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            wtr.write_record([format_value(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_value).unwrap_or_default())
                .collect();
            wtr.write_record(&row)?;
        }
    }
    Ok(())
}
