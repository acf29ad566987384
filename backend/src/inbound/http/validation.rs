//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies deserialise loosely (optional strings) so missing or
//! malformed fields reach these helpers and come back as the JSON error
//! envelope, with `details` naming the field and the violated constraint.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::domain::{DESCRIPTION_MAX_CHARS, DURATION_MAX_MINUTES, Error, MaterialType};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    TooLong,
    InvalidId,
    InvalidDate,
    InvalidMaterialType,
    InvalidOrder,
    InvalidDuration,
    MalformedBody,
    MalformedQuery,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::TooLong => "too_long",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::InvalidMaterialType => "invalid_material_type",
            ErrorCode::InvalidOrder => "invalid_order",
            ErrorCode::InvalidDuration => "invalid_duration",
            ErrorCode::MalformedBody => "malformed_body",
            ErrorCode::MalformedQuery => "malformed_query",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
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

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

/// Require a non-blank string, returning it untouched.
pub(crate) fn require_text(value: Option<String>, field: FieldName) -> Result<String, Error> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(missing_field_error(field)),
    }
}

/// Reject descriptions longer than the catalogue limit.
pub(crate) fn check_description(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<String>, Error> {
    let Some(text) = value else {
        return Ok(None);
    };
    let actual = text.chars().count();
    if actual > DESCRIPTION_MAX_CHARS {
        let name = field.as_str();
        return Err(Error::invalid_request(format!(
            "{name} must be at most {DESCRIPTION_MAX_CHARS} characters"
        ))
        .with_details(json!({
            "field": name,
            "max": DESCRIPTION_MAX_CHARS,
            "actual": actual,
            "code": ErrorCode::TooLong.as_str(),
        })));
    }
    Ok(Some(text))
}

pub(crate) fn invalid_id_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be an integer identifier"))
        .with_value(ErrorCode::InvalidId, value)
}

/// Parse a decimal path identifier.
pub(crate) fn parse_id(value: &str, field: FieldName) -> Result<i64, Error> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| invalid_id_error(field, value))
}

pub(crate) fn invalid_date_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a date formatted as YYYY-MM-DD"))
        .with_value(ErrorCode::InvalidDate, value)
}

/// Parse an ISO `YYYY-MM-DD` calendar date.
pub(crate) fn parse_date(value: &str, field: FieldName) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| invalid_date_error(field, value))
}

pub(crate) fn parse_optional_date(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<NaiveDate>, Error> {
    value.map(|raw| parse_date(&raw, field)).transpose()
}

/// Parse a required date query parameter.
pub(crate) fn require_date(value: Option<String>, field: FieldName) -> Result<NaiveDate, Error> {
    let raw = value.ok_or_else(|| missing_field_error(field))?;
    parse_date(&raw, field)
}

pub(crate) fn invalid_material_type_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be one of VIDEO, PDF or QUIZ"))
        .with_value(ErrorCode::InvalidMaterialType, value)
}

/// Parse a material type, accepting any letter case.
pub(crate) fn parse_material_type(value: &str, field: FieldName) -> Result<MaterialType, Error> {
    value
        .parse::<MaterialType>()
        .map_err(|_| invalid_material_type_error(field, value))
}

pub(crate) fn require_material_type(
    value: Option<String>,
    field: FieldName,
) -> Result<MaterialType, Error> {
    let raw = value.ok_or_else(|| missing_field_error(field))?;
    parse_material_type(&raw, field)
}

pub(crate) fn invalid_order_error(field: FieldName, value: &str, allowed: &[&str]) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be one of {}", allowed.join(", ")))
        .with_value(ErrorCode::InvalidOrder, value)
}

/// Durations are whole minutes in `0..=DURATION_MAX_MINUTES`.
pub(crate) fn parse_duration(value: Option<i64>, field: FieldName) -> Result<Option<u32>, Error> {
    value
        .map(|minutes| {
            u32::try_from(minutes)
                .ok()
                .filter(|parsed| *parsed <= DURATION_MAX_MINUTES)
                .ok_or_else(|| {
                    let name = field.as_str();
                    ValidationError::new(
                        name,
                        format!("{name} must be between 0 and {DURATION_MAX_MINUTES} minutes"),
                    )
                    .with_value(ErrorCode::InvalidDuration, minutes.to_string())
                })
        })
        .transpose()
}

/// Keyword pair shared by the search endpoints.
///
/// Absent keywords count as blank.
#[derive(Debug, Default, Deserialize)]
pub struct KeywordQuery {
    /// First keyword; a blank keyword matches nothing.
    pub keyword1: Option<String>,
    /// Second keyword; a blank keyword matches nothing.
    pub keyword2: Option<String>,
}

impl KeywordQuery {
    pub(crate) fn into_pair(self) -> (String, String) {
        (
            self.keyword1.unwrap_or_default(),
            self.keyword2.unwrap_or_default(),
        )
    }
}

fn malformed_body_error(err: &JsonPayloadError) -> Error {
    Error::invalid_request("request body is not valid JSON for this endpoint").with_details(json!({
        "field": "body",
        "reason": err.to_string(),
        "code": ErrorCode::MalformedBody.as_str(),
    }))
}

fn malformed_query_error(err: &QueryPayloadError) -> Error {
    Error::invalid_request("query string could not be parsed").with_details(json!({
        "field": "query",
        "reason": err.to_string(),
        "code": ErrorCode::MalformedQuery.as_str(),
    }))
}

/// JSON extractor configuration answering malformed bodies with the error
/// envelope instead of actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req: &HttpRequest| malformed_body_error(&err).into())
}

/// Query extractor configuration with the same envelope for unparseable
/// query strings.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req: &HttpRequest| malformed_query_error(&err).into())
}
