use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::responses::{
    ErrorDetail, ErrorResponse, NOT_FOUND_CODE, SERVER_ERROR_CODE, VALIDATION_ERROR_CODE,
};
use thiserror::Error;

/// Failures surfaced by the storage layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No row matched the given key.
    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Application-level errors for the procedure service.
///
/// Each variant carries its own HTTP status and is rendered into the shared
/// [`ErrorResponse`] envelope by the [`IntoResponse`] implementation.
#[derive(Debug, Error)]
pub enum ProcedureServiceError {
    /// Input breaks a domain rule; `attr` names the offending field.
    #[error("{detail}")]
    Validation { attr: &'static str, detail: String },

    #[error("{0}")]
    NotFound(String),

    /// Unclassified storage or infrastructure failure.
    #[error("{0}")]
    Server(String),

    /// Malformed path parameter or body, rejected before the service runs.
    #[error("{0}")]
    BadRequest(String),
}

impl ProcedureServiceError {
    pub fn required(attr: &'static str) -> Self {
        Self::Validation {
            attr,
            detail: format!("{attr} is required"),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(self) -> ErrorResponse {
        match self {
            Self::Validation { attr, detail } => ErrorResponse::from_details(vec![
                ErrorDetail::new(VALIDATION_ERROR_CODE, detail).with_attr(attr),
            ]),
            Self::NotFound(detail) => {
                ErrorResponse::from_details(vec![ErrorDetail::new(NOT_FOUND_CODE, detail)])
            }
            Self::Server(detail) => {
                ErrorResponse::from_details(vec![ErrorDetail::new(SERVER_ERROR_CODE, detail)])
            }
            Self::BadRequest(message) => ErrorResponse::simple(message),
        }
    }
}

impl IntoResponse for ProcedureServiceError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, %status, "Server error");
        } else {
            tracing::warn!(error = %self, %status, "Client error");
        }

        (status, axum::Json(self.body())).into_response()
    }
}
