//! Decoding helpers for the layer that feeds JSON into the engine.

use chrono::{DateTime, NaiveDate};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::AnalyticsError;

/// Decode a parameter record, insisting on a JSON object.
pub fn decode_params<T: DeserializeOwned>(value: Value) -> Result<T, AnalyticsError> {
    if !value.is_object() {
        return Err(AnalyticsError::InvalidArgument(format!(
            "expected a JSON object, found {}",
            value_kind(&value)
        )));
    }

    serde_json::from_value(value).map_err(|err| AnalyticsError::InvalidArgument(err.to_string()))
}

/// Decode each entry of a list on its own, skipping the ones that do not fit `T`.
pub fn decode_each<T: DeserializeOwned>(entries: Vec<Value>) -> Vec<T> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                debug!(index, error = %err, "skipping undecodable entry");
                None
            }
        })
        .collect()
}

/// Borrow a citation argument as text.
pub fn require_text<'a>(value: &'a Value, field: &str) -> Result<&'a str, AnalyticsError> {
    value.as_str().ok_or_else(|| {
        AnalyticsError::InvalidArgument(format!(
            "`{field}` must be a string, found {}",
            value_kind(value)
        ))
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse `YYYY-MM-DD`, or an RFC 3339 timestamp truncated to its date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|stamp| stamp.date_naive()))
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.filter(|value| !value.trim().is_empty())
        .map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

/// Accept either a JSON string or number for citation fields such as `title: 15`.
pub fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::CostParameters;
    use serde_json::json;

    #[test]
    fn decode_rejects_non_objects() {
        let result = decode_params::<CostParameters>(json!([1, 2, 3]));
        match result {
            Err(AnalyticsError::InvalidArgument(message)) => {
                assert!(message.contains("an array"), "{message}")
            }
            other => panic!("expected invalid argument, got {other:?}"),
        }
    }

    #[test]
    fn decode_accepts_partial_objects() {
        let params: CostParameters =
            decode_params(json!({ "caseType": "contract", "hourlyRate": 400 }))
                .expect("object decodes");
        assert_eq!(params.hourly_rate, 400.0);
    }

    #[test]
    fn decode_each_skips_entries_that_do_not_fit() {
        let citations: Vec<crate::Citation> = decode_each(vec![
            json!({ "type": "treaty", "name": "Geneva" }),
            json!({ "type": "constitution", "amendment": "XIV" }),
            json!("not a record"),
        ]);

        assert_eq!(citations.len(), 1);
        assert_eq!(citations[0].kind(), crate::CitationKind::Constitution);
    }

    #[test]
    fn require_text_rejects_numbers() {
        assert!(require_text(&json!(42), "citation").is_err());
        assert_eq!(
            require_text(&json!("15 U.S.C. § 1601"), "citation").expect("string"),
            "15 U.S.C. § 1601"
        );
    }

    #[test]
    fn parse_date_accepts_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
        assert_eq!(parse_date("2024-03-01").expect("plain date"), expected);
        assert_eq!(
            parse_date("2024-03-01T15:30:00Z").expect("timestamp"),
            expected
        );
        assert!(parse_date("03/01/2024").is_err());
    }
}
