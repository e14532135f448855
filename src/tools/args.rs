//! Typed tool arguments and their validation.
//!
//! Every tool declares a struct implementing [`ToolArgs`]. Raw JSON arguments
//! are deserialized into it and then checked against field constraints;
//! [`parse_args`] either yields the typed value or every field error found.

use std::fmt;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value as JsonValue};
use thiserror::Error;

/// Message for a non-positive post number, shared with the client precondition.
pub const INVALID_POST_NUMBER: &str = "Invalid post number. Must be greater than 0.";

/// Validated argument shape of one tool.
pub trait ToolArgs: DeserializeOwned + Serialize + Send + Sync + 'static {
    /// JSON Schema advertised in `tools/list`.
    fn input_schema() -> JsonValue;

    /// Check field constraints serde cannot express.
    fn validate(&self) -> Vec<FieldError> {
        Vec::new()
    }
}

/// A constraint violation on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field path, e.g. `post_number` or `post.name`.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl FieldError {
    /// Create a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Arguments rejected before the tool ran.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid arguments: {}", join_errors(.errors))]
pub struct ValidationError {
    /// Every violation found.
    pub errors: Vec<FieldError>,
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(FieldError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Deserialize and validate raw tool arguments.
pub fn parse_args<A: ToolArgs>(args: Map<String, JsonValue>) -> Result<A, ValidationError> {
    let parsed: A = serde_json::from_value(JsonValue::Object(args)).map_err(|e| ValidationError {
        errors: vec![FieldError::new("arguments", e.to_string())],
    })?;

    let errors = parsed.validate();
    if errors.is_empty() {
        Ok(parsed)
    } else {
        Err(ValidationError { errors })
    }
}

/// Largest float that still converts to `i64` without losing precision.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

fn as_whole(number: &Number) -> Option<i64> {
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT)
            .map(|f| f as i64)
    })
}

/// Read an integer field, accepting whole floats such as `5.0`. A fractional
/// value is rejected with an error naming `field`.
pub fn whole_number<'de, D>(deserializer: D, field: &str) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    as_whole(&number)
        .ok_or_else(|| D::Error::custom(format!("{field}: must be an integer, got {number}")))
}

/// [`whole_number`] for an optional field; `null` reads as `None`.
pub fn optional_whole_number<'de, D>(deserializer: D, field: &str) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Number>::deserialize(deserializer)? {
        None => Ok(None),
        Some(number) => as_whole(&number).map(Some).ok_or_else(|| {
            D::Error::custom(format!("{field}: must be an integer, got {number}"))
        }),
    }
}

/// `value >= 1`, reported with `message`.
pub fn check_positive(errors: &mut Vec<FieldError>, field: &str, value: i64, message: &str) {
    if value < 1 {
        errors.push(FieldError::new(field, message));
    }
}

/// `min <= value <= max`.
pub fn check_range(errors: &mut Vec<FieldError>, field: &str, value: i64, min: i64, max: i64) {
    if value < min || value > max {
        errors.push(FieldError::new(
            field,
            format!("must be between {min} and {max}, got {value}"),
        ));
    }
}

/// Non-empty string.
pub fn check_non_empty(errors: &mut Vec<FieldError>, field: &str, value: &str, message: &str) {
    if value.is_empty() {
        errors.push(FieldError::new(field, message));
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct Paging {
        #[serde(deserialize_with = "id")]
        id: i64,
        #[serde(default, deserialize_with = "per_page")]
        per_page: Option<i64>,
    }

    fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        whole_number(deserializer, "id")
    }

    fn per_page<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        optional_whole_number(deserializer, "per_page")
    }

    impl ToolArgs for Paging {
        fn input_schema() -> JsonValue {
            json!({ "type": "object" })
        }

        fn validate(&self) -> Vec<FieldError> {
            let mut errors = Vec::new();
            check_positive(&mut errors, "id", self.id, INVALID_POST_NUMBER);
            if let Some(per_page) = self.per_page {
                check_range(&mut errors, "per_page", per_page, 1, 100);
            }
            errors
        }
    }

    fn args(value: JsonValue) -> Map<String, JsonValue> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_valid_args() {
        let parsed: Paging = parse_args(args(json!({ "id": 3, "per_page": 100 }))).unwrap();
        assert_eq!(parsed.id, 3);
        assert_eq!(parsed.per_page, Some(100));
    }

    #[test]
    fn test_collects_every_violation() {
        let err = parse_args::<Paging>(args(json!({ "id": 0, "per_page": 101 }))).unwrap_err();
        assert_eq!(err.errors.len(), 2);
        assert_eq!(err.errors[0], FieldError::new("id", INVALID_POST_NUMBER));
        assert!(err.to_string().starts_with("Invalid arguments: id: Invalid post number"));
        assert!(err.to_string().contains("per_page: must be between 1 and 100, got 101"));
    }

    #[test]
    fn test_type_mismatch_is_reported() {
        let err = parse_args::<Paging>(args(json!({ "id": "seven" }))).unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].field, "arguments");
    }

    #[test]
    fn test_missing_required_field() {
        let err = parse_args::<Paging>(Map::new()).unwrap_err();
        assert!(err.to_string().contains("missing field `id`"));
    }

    #[test]
    fn test_whole_floats_are_integers() {
        let parsed: Paging = parse_args(args(json!({ "id": 5.0, "per_page": 20.0 }))).unwrap();
        assert_eq!(parsed.id, 5);
        assert_eq!(parsed.per_page, Some(20));

        let parsed: Paging = parse_args(args(json!({ "id": 1, "per_page": null }))).unwrap();
        assert_eq!(parsed.per_page, None);
    }

    #[test]
    fn test_fractional_number_names_field() {
        let err = parse_args::<Paging>(args(json!({ "id": 2.5 }))).unwrap_err();
        assert!(err.to_string().contains("id: must be an integer, got 2.5"));

        let err = parse_args::<Paging>(args(json!({ "id": 1, "per_page": 1.5 }))).unwrap_err();
        assert!(err.to_string().contains("per_page: must be an integer"));
    }
}
