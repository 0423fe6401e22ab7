//! Tolerant decoding of raw JSON records.
//!
//! Record files are hand-maintained, so a malformed field degrades to a
//! missing value with a warning instead of failing the whole file.

use core_types::ReturnRecord;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

/// Decodes every object in `entries`. Entries that are not objects are skipped.
pub fn decode_records(entries: &[Value]) -> Vec<ReturnRecord> {
    let mut records = Vec::with_capacity(entries.len());
    for (position, entry) in entries.iter().enumerate() {
        match entry {
            Value::Object(fields) => records.push(decode_record(fields)),
            other => tracing::warn!(position, kind = json_kind(other), "Skipping non-object record."),
        }
    }
    records
}

/// Decodes one record object.
///
/// Missing `period` and `stock` become empty strings. Missing `sector` and
/// `index` stay `None`. `returns` accepts a number, a numeric string with an
/// optional trailing `%`, or `null`.
pub fn decode_record(fields: &Map<String, Value>) -> ReturnRecord {
    ReturnRecord {
        period: text_field(fields, "period").unwrap_or_default(),
        stock: text_field(fields, "stock").unwrap_or_default(),
        sector: text_field(fields, "sector"),
        index: text_field(fields, "index"),
        returns: returns_field(fields),
    }
}

/// Parses a textual return such as `"12.5"`, `"-3%"` or `"1e2"`.
///
/// Blank text, `null` and `-` mean "no return" and yield `Ok(None)`.
pub fn parse_return_text(text: &str) -> Result<Option<Decimal>, rust_decimal::Error> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed.eq_ignore_ascii_case("null") {
        return Ok(None);
    }
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    Decimal::from_str(number)
        .or_else(|_| Decimal::from_scientific(number))
        .map(Some)
}

fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        other => {
            tracing::warn!(field = key, kind = json_kind(other), "Ignoring non-text field.");
            None
        }
    }
}

fn returns_field(fields: &Map<String, Value>) -> Option<Decimal> {
    let value = fields.get("returns")?;
    let parsed = match value {
        Value::Null => return None,
        Value::Number(number) => parse_return_text(&number.to_string()),
        Value::String(text) => parse_return_text(text),
        other => {
            tracing::warn!(kind = json_kind(other), "Ignoring non-numeric return.");
            return None;
        }
    };
    parsed.unwrap_or_else(|e| {
        tracing::warn!(value = %value, error = %e, "Ignoring unparseable return.");
        None
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn decode(value: Value) -> ReturnRecord {
        match value {
            Value::Object(fields) => decode_record(&fields),
            _ => panic!("test input must be an object"),
        }
    }

    #[test]
    fn decodes_a_complete_record() {
        let record = decode(json!({
            "period": "Jul-24", "stock": "ACME", "sector": "Tech", "index": "NIFTY", "returns": 12.5
        }));
        assert_eq!(record, ReturnRecord::new("Jul-24", "ACME", "Tech", "NIFTY", Some(dec!(12.5))));
    }

    #[test]
    fn returns_accept_strings_and_percentages() {
        assert_eq!(decode(json!({ "returns": "7.25" })).returns, Some(dec!(7.25)));
        assert_eq!(decode(json!({ "returns": " -3% " })).returns, Some(dec!(-3)));
        assert_eq!(decode(json!({ "returns": 0 })).returns, Some(Decimal::ZERO));
        assert_eq!(decode(json!({ "returns": null })).returns, None);
        assert_eq!(decode(json!({})).returns, None);
    }

    #[test]
    fn malformed_values_degrade_to_missing() {
        let record = decode(json!({ "period": 2024, "stock": "ACME", "sector": ["x"], "returns": "n/a" }));
        assert_eq!(record.period, "2024");
        assert_eq!(record.sector, None);
        assert_eq!(record.returns, None);
        assert_eq!(decode(json!({ "returns": true })).returns, None);
    }

    #[test]
    fn missing_identity_fields_become_empty() {
        let record = decode(json!({ "returns": 1 }));
        assert_eq!(record.period, "");
        assert_eq!(record.stock, "");
        assert_eq!(record.index, None);
    }

    #[test]
    fn non_objects_are_skipped() {
        let records = decode_records(&[json!(1), json!({ "stock": "ACME" }), json!("x")]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].stock, "ACME");
    }

    #[test]
    fn parse_return_text_handles_placeholders() {
        assert_eq!(parse_return_text("").unwrap(), None);
        assert_eq!(parse_return_text("-").unwrap(), None);
        assert_eq!(parse_return_text("NULL").unwrap(), None);
        assert_eq!(parse_return_text("1.5e1").unwrap(), Some(dec!(15)));
        assert!(parse_return_text("abc").is_err());
    }
}
