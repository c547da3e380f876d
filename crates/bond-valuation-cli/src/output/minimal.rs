use serde_json::Value;

use super::format_value;

/// Key answer fields, most specific first. Nested `valuation` / `yields`
/// sections of an analysis are searched after the top level.
const PRIORITY_KEYS: [&str; 3] = ["approximate_ytm", "total_present_value", "current_yield"];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match key_answer(result_obj) {
        Some(answer) => println!("{}", answer),
        None => println!("{}", format_value(result_obj)),
    }
}

fn key_answer(result: &Value) -> Option<String> {
    let map = result.as_object()?;

    let candidates = std::iter::once(map).chain(
        ["yields", "valuation"]
            .iter()
            .filter_map(|section| map.get(*section).and_then(Value::as_object)),
    );

    for obj in candidates {
        for key in PRIORITY_KEYS {
            if let Some(val) = obj.get(key).filter(|v| !v.is_null()) {
                return Some(format_value(val));
            }
        }
    }

    map.iter()
        .next()
        .map(|(key, val)| format!("{}: {}", key, format_value(val)))
}
