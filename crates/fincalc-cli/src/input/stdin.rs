use serde_json::Value;
use std::io::{self, Read};

/// Attempt to read an input document from stdin if data is being piped,
/// trying JSON first and falling back to YAML. Returns None if stdin is
/// a TTY (interactive).
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(_) => serde_yaml::from_str(trimmed)
            .map_err(|e| format!("stdin is neither valid JSON nor YAML: {}", e))?,
    };
    Ok(Some(value))
}
