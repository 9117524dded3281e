use serde_json::Value;
use std::io;

/// Write output as CSV to stdout. A result carrying a series (schedule,
/// growth details, slabs, breakdown, yearly cashflow) exports the series
/// rows; otherwise the scalar fields go out as field,value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result.as_object() {
        Some(fields) => {
            if let Some(series) = first_series(fields) {
                write_series_csv(&mut wtr, series);
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in fields {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            }
        }
        None => {
            let _ = wtr.write_record([&format_csv_value(result)]);
        }
    }

    let _ = wtr.flush();
}

/// The first array-of-objects field in the result, if any.
fn first_series(fields: &serde_json::Map<String, Value>) -> Option<&[Value]> {
    for val in fields.values() {
        if let Value::Array(rows) = val {
            if matches!(rows.first(), Some(Value::Object(_))) {
                return Some(rows);
            }
        }
    }
    None
}

fn write_series_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let first = match rows.first() {
        Some(Value::Object(map)) => map,
        _ => return,
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&record);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
