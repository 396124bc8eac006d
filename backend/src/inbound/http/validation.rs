//! Request validation shared by the inbound HTTP adapters.
//!
//! JSON bodies are checked against a static field table before they are
//! deserialised: first every present field is checked for its declared type,
//! then required fields are checked in declaration order. The first failure
//! becomes an `invalid_request` error naming the field.

use actix_web::web;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use crate::domain::Error;

/// Validation error codes attached to request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidJson,
    InvalidBody,
    InvalidType,
    Required,
    InvalidParameter,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidJson => "invalid_json",
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::InvalidType => "invalid_type",
            ErrorCode::Required => "required",
            ErrorCode::InvalidParameter => "invalid_parameter",
        }
    }
}

/// Newtype wrapper for wire-level field and parameter names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

/// JSON type a field must carry when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldKind {
    String,
    Integer,
}

impl FieldKind {
    fn name(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Integer => value
                .as_i64()
                .is_some_and(|number| i32::try_from(number).is_ok()),
        }
    }
}

/// One entry in a request body's field table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldSpec {
    /// Name reported by required-field failures.
    pub label: &'static str,
    /// JSON key the value is read from.
    pub key: FieldName,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub(crate) const fn required(label: &'static str, key: &'static str, kind: FieldKind) -> Self {
        Self {
            label,
            key: FieldName::new(key),
            kind,
            required: true,
        }
    }

    pub(crate) const fn optional(label: &'static str, key: &'static str, kind: FieldKind) -> Self {
        Self {
            label,
            key: FieldName::new(key),
            kind,
            required: false,
        }
    }
}

/// Request bodies validated through [`validate`].
pub(crate) trait RequestSchema: DeserializeOwned {
    /// Field table in declaration order.
    const FIELDS: &'static [FieldSpec];
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.is_empty(),
        Some(Value::Number(number)) => number.as_i64() == Some(0),
        Some(_) => false,
    }
}

fn check_types(object: &Map<String, Value>, fields: &[FieldSpec]) -> Result<(), Error> {
    for field in fields {
        let key = field.key.as_str();
        let Some(value) = object.get(key).filter(|value| !value.is_null()) else {
            continue;
        };
        if !field.kind.accepts(value) {
            return Err(ValidationError::new(
                key,
                format!("Field '{key}' must be of type {}", field.kind.name()),
            )
            .with_code(ErrorCode::InvalidType));
        }
    }
    Ok(())
}

fn check_required(object: &Map<String, Value>, fields: &[FieldSpec]) -> Result<(), Error> {
    let missing = fields
        .iter()
        .filter(|field| field.required)
        .find(|field| is_blank(object.get(field.key.as_str())));
    match missing {
        Some(field) => Err(ValidationError::new(
            field.key.as_str(),
            format!(
                "Validation failed on field '{}', condition: 'required'",
                field.label
            ),
        )
        .with_code(ErrorCode::Required)),
        None => Ok(()),
    }
}

fn malformed_body_error() -> Error {
    ValidationError::new("body", "Request body must be a JSON object")
        .with_code(ErrorCode::InvalidJson)
}

/// Decode and validate a JSON request body against `T::FIELDS`.
///
/// Type mismatches are reported before missing required fields, so a body
/// with both problems names the type failure. A `null` on an optional field
/// reads as the field's zero value, exactly like an absent key.
pub(crate) fn validate<T: RequestSchema>(payload: &[u8]) -> Result<T, Error> {
    let value: Value = serde_json::from_slice(payload).map_err(|_| malformed_body_error())?;
    let Value::Object(mut object) = value else {
        return Err(malformed_body_error());
    };

    check_types(&object, T::FIELDS)?;
    check_required(&object, T::FIELDS)?;

    object.retain(|_, value| !value.is_null());
    serde_json::from_value(Value::Object(object)).map_err(|_| malformed_body_error())
}

/// Upper bound on request body size.
pub(crate) const MAX_BODY_BYTES: usize = 64 * 1024;

/// Unwrap an extracted request body, reporting read failures such as an
/// oversized payload as invalid requests.
pub(crate) fn read_body(
    payload: Result<web::Bytes, actix_web::Error>,
) -> Result<web::Bytes, Error> {
    payload.map_err(|err| {
        tracing::debug!(error = %err, "request body rejected");
        ValidationError::new("body", "Request body could not be read")
            .with_code(ErrorCode::InvalidBody)
    })
}

/// Decoded query string, tolerant of unknown and repeated keys.
///
/// Repeated keys keep every value; lookups return the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Decode a raw query string. Undecodable input yields no parameters.
    pub(crate) fn parse(raw: &str) -> Self {
        web::Query::<Vec<(String, String)>>::from_query(raw)
            .map(|query| Self(query.into_inner()))
            .unwrap_or_default()
    }

    /// First value supplied for `name`.
    pub(crate) fn first(&self, name: FieldName) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name.as_str())
            .map(|(_, value)| value.as_str())
    }
}

/// Parse a numeric path segment.
pub(crate) fn parse_path_id(raw: &str, name: FieldName) -> Result<i32, Error> {
    raw.trim().parse::<i32>().map_err(|_| {
        let name = name.as_str();
        ValidationError::new(name, format!("Parameter {name} must be a number"))
            .with_value(ErrorCode::InvalidParameter, raw)
    })
}

/// Wire format of activity window bounds.
pub(crate) const QUERY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse an optional `YYYY-MM-DD HH:MM` query bound, read as UTC.
///
/// An empty value counts as absent.
pub(crate) fn parse_query_timestamp(
    raw: Option<&str>,
    name: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };
    NaiveDateTime::parse_from_str(raw, QUERY_TIMESTAMP_FORMAT)
        .map(|timestamp| Some(timestamp.and_utc()))
        .map_err(|_| {
            let name = name.as_str();
            ValidationError::new(
                name,
                format!("Parameter {name} must be a date. Format YYYY-MM-DD HH:MM"),
            )
            .with_value(ErrorCode::InvalidParameter, raw)
        })
}
