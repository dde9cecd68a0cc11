//! JSON rendering for conversion results.

use std::io::Write;

use crate::error::{Error, Result};
use crate::model::ConversionResult;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Single-line JSON
    #[default]
    Compact,
    /// Pretty-printed JSON with indentation
    Pretty,
}

/// Render a result to a JSON string.
pub fn to_json(result: &ConversionResult, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Compact => serde_json::to_string(result),
        JsonFormat::Pretty => serde_json::to_string_pretty(result),
    }?;
    Ok(json)
}

/// Write a result as exactly one JSON value followed by a newline.
pub fn write_json<W: Write>(
    writer: &mut W,
    result: &ConversionResult,
    format: JsonFormat,
) -> Result<()> {
    let json = to_json(result, format)?;
    writeln!(writer, "{}", json)?;
    writer.flush().map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Document;

    #[test]
    fn test_to_json_compact() {
        let result = ConversionResult::success(Document::new("a"));
        let json = to_json(&result, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.starts_with(r#"{"status":"success""#));
    }

    #[test]
    fn test_to_json_pretty() {
        let result = ConversionResult::failure("boom");
        let json = to_json(&result, JsonFormat::Pretty).unwrap();
        assert!(json.contains('\n'));

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["errors"][0]["error_message"], "boom");
    }

    #[test]
    fn test_write_json_is_one_value() {
        let mut out = Vec::new();
        write_json(&mut out, &ConversionResult::failure("x"), JsonFormat::Compact).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        let mut values = serde_json::Deserializer::from_str(&text).into_iter::<serde_json::Value>();
        assert!(values.next().unwrap().is_ok());
        assert!(values.next().is_none());
    }
}
