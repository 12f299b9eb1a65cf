//! JSON pretty-printing for failure diagnostics.
//!
//! Failed calls surface their body through the invoker's exception message;
//! this module reformats JSON bodies with two-space indentation so the
//! diagnostic reads well. Malformed JSON is an error, letting callers fall
//! back to the raw text.

use serde_json::Value;
use std::fmt;

/// Errors that can occur while formatting a response body.
#[derive(Debug)]
pub enum FormatError {
    /// JSON parsing or formatting error.
    JsonError(String),

    /// UTF-8 encoding error.
    EncodingError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::JsonError(msg) => write!(f, "JSON formatting error: {}", msg),
            FormatError::EncodingError(msg) => write!(f, "Encoding error: {}", msg),
        }
    }
}

impl std::error::Error for FormatError {}

/// Formats JSON with pretty-printing using 2-space indentation.
///
/// # Returns
///
/// `Ok(String)` with the reformatted JSON, or `Err(FormatError)` if the
/// input is not valid JSON.
pub fn format_json_pretty(json: &str) -> Result<String, FormatError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| FormatError::JsonError(e.to_string()))?;

    // Formatted output runs ~1.5x the input size.
    let mut buf = Vec::with_capacity(json.len() + (json.len() / 2));

    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"  ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);

    use serde::Serialize;
    value
        .serialize(&mut serializer)
        .map_err(|e| FormatError::JsonError(e.to_string()))?;

    String::from_utf8(buf).map_err(|e| FormatError::EncodingError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_json_pretty_object() {
        let json = r#"{"name":"John","age":30}"#;
        let formatted = format_json_pretty(json).unwrap();

        assert!(formatted.contains("  \"name\": \"John\""));
        assert!(formatted.contains("  \"age\": 30"));
    }

    #[test]
    fn test_format_json_pretty_nested() {
        let json = r#"{"outer":{"inner":[1,2]}}"#;
        let formatted = format_json_pretty(json).unwrap();

        assert!(formatted.contains("\"outer\": {"));
        assert!(formatted.contains("    \"inner\": ["));
    }

    #[test]
    fn test_format_json_pretty_rejects_malformed_input() {
        let result = format_json_pretty("not json at all");
        assert!(matches!(result, Err(FormatError::JsonError(_))));
    }

    #[test]
    fn test_format_json_pretty_empty_input() {
        assert!(format_json_pretty("").is_err());
    }

    #[test]
    fn test_format_error_display() {
        let err = FormatError::JsonError("expected value".to_string());
        assert_eq!(format!("{}", err), "JSON formatting error: expected value");
    }
}
