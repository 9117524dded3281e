use serde_json::Value;

/// Print just the headline figure from the output.
///
/// Each engine has one number a caller usually wants: the EMI, the
/// maturity amount, the corpus, the tax, the net salary, or the final
/// savings. Fall back to the first scalar field otherwise.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // netSalary before tax: a salary result carries both
    let priority_keys = [
        "emi",
        "maturityAmount",
        "corpus",
        "netSalary",
        "tax",
        "totalSavings",
    ];

    if let Value::Object(map) = result {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        // Fall back to the first scalar field
        for (key, val) in map {
            if !matches!(val, Value::Array(_) | Value::Object(_)) {
                println!("{}: {}", key, format_minimal(val));
                return;
            }
        }
    }

    println!("{}", format_minimal(result));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
