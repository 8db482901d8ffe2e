//! Shared validation helpers for inbound HTTP adapters.
//!
//! Failures become `invalid_request` errors whose details name the offending
//! field and a stable machine-readable code.

use std::fmt::Display;

use actix_web::{HttpRequest, web};
use chrono::NaiveDate;
use serde_json::json;

use crate::domain::{Error, RestaurantId, UserId, VoteId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidValue,
    InvalidDate,
    InvalidBody,
    InvalidQuery,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::InvalidQuery => "invalid_query",
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

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn invalid_field_error(field: FieldName, reason: impl Display) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} is invalid: {reason}")).with_details(json!({
        "field": field,
        "code": ErrorCode::InvalidValue.as_str(),
    }))
}

pub(crate) fn invalid_date_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a date formatted as YYYY-MM-DD"))
        .with_details(json!({
            "field": field,
            "value": value,
            "code": ErrorCode::InvalidDate.as_str(),
        }))
}

pub(crate) fn parse_optional_date(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<NaiveDate>, Error> {
    value
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid_date_error(field, raw))
        })
        .transpose()
}

pub(crate) fn parse_user_id(raw: i32, field: FieldName) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err| invalid_field_error(field, err))
}

pub(crate) fn parse_restaurant_id(raw: i32, field: FieldName) -> Result<RestaurantId, Error> {
    RestaurantId::new(raw).map_err(|err| invalid_field_error(field, err))
}

pub(crate) fn parse_vote_id(raw: i32, field: FieldName) -> Result<VoteId, Error> {
    VoteId::new(raw).map_err(|err| invalid_field_error(field, err))
}

/// JSON extractor configuration reporting malformed bodies as domain errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        Error::invalid_request(format!("request body is invalid: {err}"))
            .with_details(json!({ "code": ErrorCode::InvalidBody.as_str() }))
            .into()
    })
}

/// Query-string extractor configuration reporting bad parameters as domain
/// errors.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        Error::invalid_request(format!("query string is invalid: {err}"))
            .with_details(json!({ "code": ErrorCode::InvalidQuery.as_str() }))
            .into()
    })
}

/// Path extractor configuration reporting non-numeric ids as domain errors.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req: &HttpRequest| {
        Error::invalid_request(format!("path is invalid: {err}"))
            .with_details(json!({ "code": ErrorCode::InvalidValue.as_str() }))
            .into()
    })
}
