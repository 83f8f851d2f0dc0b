//! Pretty-printing of JSON text

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::error::{AppError, JsonField};

const INDENT: &[u8] = b"    ";

/// Pretty-print a JSON value with a 4-space indent
pub fn to_pretty(value: &Value) -> String {
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    match value.serialize(&mut ser) {
        Ok(()) => String::from_utf8(out).unwrap_or_else(|_| value.to_string()),
        Err(_) => value.to_string(),
    }
}

/// Re-format JSON text, failing with the given field when it does not parse
pub fn format_json(text: &str, field: JsonField) -> Result<String, AppError> {
    let value: Value = serde_json::from_str(text).map_err(|_| AppError::MalformedJson(field))?;
    Ok(to_pretty(&value))
}
