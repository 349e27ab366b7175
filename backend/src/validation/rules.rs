//! Per-type casting rules used by the schema validator.
//!
//! Each rule accepts the loose inputs a JSON client commonly sends and returns
//! the canonical JSON form, or a `ValidationError` naming what was expected.

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde_json::Value;
use validator::ValidationError;

pub const CODE_REQUIRED: &str = "required";
pub const CODE_NOT_NULLABLE: &str = "not_nullable";
pub const CODE_EXPECTED_STRING: &str = "expected_string";
pub const CODE_EXPECTED_INTEGER: &str = "expected_integer";
pub const CODE_EXPECTED_DATETIME: &str = "expected_datetime";
pub const CODE_EXPECTED_ARRAY: &str = "expected_array";

/// Strings pass through. Numbers and booleans are stringified.
pub fn cast_string(value: &Value) -> Result<Value, ValidationError> {
    match value {
        Value::String(_) => Ok(value.clone()),
        Value::Number(number) => Ok(Value::String(number.to_string())),
        Value::Bool(flag) => Ok(Value::String(flag.to_string())),
        _ => Err(ValidationError::new(CODE_EXPECTED_STRING)),
    }
}

/// Accepts integral numbers (including `100.0`) and numeric strings.
pub fn cast_integer(value: &Value) -> Result<Value, ValidationError> {
    let parsed = match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(raw) => raw.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed
        .map(Value::from)
        .ok_or_else(|| ValidationError::new(CODE_EXPECTED_INTEGER))
}

/// Accepts RFC 3339 timestamps, `YYYY-MM-DD` dates and epoch milliseconds.
/// The result is always an RFC 3339 UTC string.
pub fn cast_datetime(value: &Value) -> Result<Value, ValidationError> {
    let parsed: Option<DateTime<Utc>> = match value {
        Value::String(raw) => parse_datetime_str(raw.trim()),
        Value::Number(number) => number
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    };
    parsed
        .map(|dt| Value::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)))
        .ok_or_else(|| ValidationError::new(CODE_EXPECTED_DATETIME))
}

pub fn cast_array(value: &Value) -> Result<Value, ValidationError> {
    match value {
        Value::Array(_) => Ok(value.clone()),
        _ => Err(ValidationError::new(CODE_EXPECTED_ARRAY)),
    }
}

fn parse_datetime_str(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
