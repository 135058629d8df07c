use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Classification code for a request that failed a domain rule.
pub const VALIDATION_ERROR_CODE: &str = "validation_error";
/// Classification code for a reference to a record that does not exist.
pub const NOT_FOUND_CODE: &str = "not_found";
/// Classification code for an unclassified storage or infrastructure failure.
pub const SERVER_ERROR_CODE: &str = "server_error";
/// Reserved for transport-level parse failures.
pub const PARSE_ERROR_CODE: &str = "parse_error";

/// Key used in [`ErrorResponse::errors`] when a detail names no attribute.
pub const BASE_ATTR: &str = "base";

/// One classified failure inside an [`ErrorResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    pub code: String,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr: Option<String>,
}

impl ErrorDetail {
    pub fn new(code: &str, detail: impl Into<String>) -> Self {
        Self {
            code: code.to_owned(),
            detail: detail.into(),
            attr: None,
        }
    }

    pub fn with_attr(mut self, attr: impl Into<String>) -> Self {
        self.attr = Some(attr.into());
        self
    }
}

/// Error envelope returned by every failing endpoint.
///
/// The same failure is described four ways (`error`, `message`, `errors`,
/// `error_detail`) so that older clients reading any one of them keep working.
/// Empty members are left out of the JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub error_detail: Vec<ErrorDetail>,
}

impl ErrorResponse {
    /// Builds an envelope from classified details. The first detail becomes the
    /// primary message.
    pub fn from_details(details: Vec<ErrorDetail>) -> Self {
        let message = details.first().map(|d| d.detail.clone());
        let errors = details
            .iter()
            .map(|d| {
                let key = d.attr.clone().unwrap_or_else(|| BASE_ATTR.to_owned());
                (key, d.detail.clone())
            })
            .collect();

        Self {
            error: None,
            message,
            errors,
            error_detail: details,
        }
    }

    /// Builds an envelope for a failure that has no structured detail.
    pub fn simple(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            error: Some(message.clone()),
            message: Some(message.clone()),
            errors: BTreeMap::from([(BASE_ATTR.to_owned(), message)]),
            error_detail: Vec::new(),
        }
    }
}

/// Response for the `/health` endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
}
