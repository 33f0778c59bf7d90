//! Request body validation: required fields, "at least one of" for partial updates, typed field reads.

use crate::error::AppError;
use serde_json::{Map, Value};

pub type Body = Map<String, Value>;

/// Falsy means missing, `null`, `false`, `0` or `""`. Arrays and objects count as present.
pub fn is_truthy(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Every field must be truthy. Fields are checked in the given order; the first failure is reported.
    pub fn require(body: &Body, fields: &[&str]) -> Result<(), AppError> {
        for field in fields {
            if !is_truthy(body.get(*field)) {
                return Err(AppError::bad_request(format!("Missing '{}' in request body", field)));
            }
        }
        Ok(())
    }

    /// At least one of the fields must be truthy (PATCH).
    pub fn require_any(body: &Body, fields: &[&str], message: &str) -> Result<(), AppError> {
        if fields.iter().any(|f| is_truthy(body.get(*f))) {
            Ok(())
        } else {
            Err(AppError::bad_request(message))
        }
    }

    /// Value must be one of `allowed` when present.
    pub fn one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), AppError> {
        if allowed.contains(&value) {
            Ok(())
        } else {
            Err(AppError::bad_request(format!(
                "'{}' must be one of: {}",
                field,
                allowed.join(", ")
            )))
        }
    }
}

/// Truthy string field. Falsy values read as `None`; a truthy non-string is rejected.
pub fn text_field(body: &Body, field: &str) -> Result<Option<String>, AppError> {
    let v = body.get(field);
    if !is_truthy(v) {
        return Ok(None);
    }
    match v {
        Some(Value::String(s)) => Ok(Some(s.clone())),
        _ => Err(AppError::bad_request(format!("'{}' must be a string", field))),
    }
}

/// Truthy integer id field. Accepts JSON numbers and numeric strings.
pub fn int_field(body: &Body, field: &str) -> Result<Option<i32>, AppError> {
    let v = body.get(field);
    if !is_truthy(v) {
        return Ok(None);
    }
    let parsed = match v {
        Some(Value::Number(n)) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse::<i32>().ok(),
        _ => None,
    };
    parsed
        .map(Some)
        .ok_or_else(|| AppError::bad_request(format!("'{}' must be an integer", field)))
}

/// Truthy RFC 3339 timestamp field, returned normalized to UTC.
pub fn timestamp_field(body: &Body, field: &str) -> Result<Option<String>, AppError> {
    let Some(raw) = text_field(body, field)? else {
        return Ok(None);
    };
    chrono::DateTime::parse_from_rfc3339(&raw)
        .map(|d| Some(d.with_timezone(&chrono::Utc).to_rfc3339()))
        .map_err(|_| AppError::bad_request(format!("'{}' must be an RFC 3339 timestamp", field)))
}
