use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Format the result envelope as tables: one Field/Value table for the
/// scalar outputs, then one table per series (schedule, growth details,
/// slabs, breakdown, yearly cashflow).
pub fn print_table(value: &Value) {
    let envelope = match value.as_object() {
        Some(map) => map,
        None => {
            println!("{}", value);
            return;
        }
    };

    let result = envelope.get("result").unwrap_or(value);
    match result.as_object() {
        Some(fields) => {
            print_scalar_fields(fields);
            for (key, val) in fields {
                if let Value::Array(rows) = val {
                    println!("\n{}:", key);
                    print_series(rows);
                }
            }
        }
        None => println!("{}", result),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

/// Field/Value table of the non-series outputs.
fn print_scalar_fields(fields: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in fields {
        if !matches!(val, Value::Array(_)) {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
    }
    let table = Table::from(builder);
    println!("{}", table);
}

/// One table for an array of uniform objects, headers from the first row.
fn print_series(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }

    match rows.first() {
        Some(Value::Object(first)) => {
            let headers: Vec<String> = first.keys().cloned().collect();
            let mut builder = Builder::default();
            builder.push_record(&headers);
            for row in rows {
                if let Value::Object(map) = row {
                    let record: Vec<String> = headers
                        .iter()
                        .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                        .collect();
                    builder.push_record(record);
                }
            }
            let table = Table::from(builder);
            println!("{}", table);
        }
        _ => {
            for row in rows {
                println!("{}", format_value(row));
            }
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
