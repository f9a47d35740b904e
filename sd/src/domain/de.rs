//! Lenient field decoders for records coming out of the persistence layer
//!
//! The records layer is loose about scalar types: an RT number may arrive as
//! `3` or `"003"`, a land area as `250` or `"250"`. These decoders accept both
//! and treat `null` as absent.
//! A person slot holding anything but an object (a bare NIK string, say) is
//! likewise absent.

use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use super::person::PersonReference;
use super::value::Amount;

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Text field accepting strings, numbers and booleans
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!("expected text, found {}", kind_of(&other)))),
    }
}

/// Numeric field accepting numbers and numeric strings.
///
/// Text that does not parse as a number is kept as [`Amount::Text`] rather
/// than rejecting the whole record.
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<Amount>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64().map(Amount::Number)),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            Ok(Some(match trimmed.parse::<f64>() {
                Ok(n) if n.is_finite() => Amount::Number(n),
                _ => Amount::Text(trimmed.to_string()),
            }))
        }
        Some(Value::Bool(b)) => Ok(Some(Amount::Text(b.to_string()))),
        Some(other) => Err(D::Error::custom(format!("expected a number, found {}", kind_of(&other)))),
    }
}

/// Person slot accepting an object; anything else is treated as absent
pub fn lenient_person<'de, D>(deserializer: D) -> Result<Option<PersonReference>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value @ Value::Object(_)) => PersonReference::deserialize(value).map(Some).map_err(D::Error::custom),
        Some(other) => {
            warn!(found = kind_of(&other), "lenient_person: person slot is not an object, treating as absent");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "lenient_string")]
        text: Option<String>,
        #[serde(default, deserialize_with = "lenient_amount")]
        number: Option<Amount>,
        #[serde(default, deserialize_with = "lenient_person")]
        person: Option<PersonReference>,
    }

    #[test]
    fn test_lenient_string_accepts_scalars() {
        let sample: Sample = serde_json::from_value(json!({"text": 3})).unwrap();
        assert_eq!(sample.text.as_deref(), Some("3"));

        let sample: Sample = serde_json::from_value(json!({"text": null})).unwrap();
        assert_eq!(sample.text, None);

        let sample: Sample = serde_json::from_value(json!({})).unwrap();
        assert_eq!(sample.text, None);
    }

    #[test]
    fn test_lenient_string_rejects_objects() {
        let err = serde_json::from_value::<Sample>(json!({"text": {"a": 1}})).unwrap_err();
        assert!(err.to_string().contains("expected text, found object"));
    }

    #[test]
    fn test_lenient_amount() {
        let sample: Sample = serde_json::from_value(json!({"number": "250"})).unwrap();
        assert_eq!(sample.number, Some(Amount::Number(250.0)));

        let sample: Sample = serde_json::from_value(json!({"number": 1.5})).unwrap();
        assert_eq!(sample.number, Some(Amount::Number(1.5)));

        let sample: Sample = serde_json::from_value(json!({"number": ""})).unwrap();
        assert_eq!(sample.number, None);
    }

    #[test]
    fn test_lenient_amount_keeps_text() {
        let sample: Sample = serde_json::from_value(json!({"number": " 250 m2 "})).unwrap();
        assert_eq!(sample.number, Some(Amount::Text("250 m2".to_string())));

        let sample: Sample = serde_json::from_value(json!({"number": "dua"})).unwrap();
        assert_eq!(sample.number, Some(Amount::Text("dua".to_string())));

        let err = serde_json::from_value::<Sample>(json!({"number": [1, 2]})).unwrap_err();
        assert!(err.to_string().contains("expected a number, found array"));
    }

    #[test]
    fn test_lenient_person() {
        let sample: Sample = serde_json::from_value(json!({"person": {"nik": 3201}})).unwrap();
        assert_eq!(sample.person.and_then(|p| p.nik).as_deref(), Some("3201"));

        let sample: Sample = serde_json::from_value(json!({"person": "3201010101010001"})).unwrap();
        assert_eq!(sample.person, None);

        let sample: Sample = serde_json::from_value(json!({"person": 7})).unwrap();
        assert_eq!(sample.person, None);
    }
}
