use std::collections::BTreeMap;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Closed set of failure kinds the API answers with. Each maps to exactly
/// one status code; unexpected store failures are folded into `Internal`
/// with a generic message, the real cause logged at the call site.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation {
        message: String,
        errors: Option<BTreeMap<String, String>>,
    },
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            errors: None,
        }
    }

    /// Schema-style validation failure: every failing field's message,
    /// concatenated into the top-level message and kept as a map.
    pub fn fields(errors: BTreeMap<String, String>) -> Self {
        let joined = errors.values().cloned().collect::<Vec<_>>().join(" ");
        ApiError::Validation {
            message: format!("Validation Error: {joined}"),
            errors: Some(errors),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = json!({ "message": self.to_string() });
        if let ApiError::Validation {
            errors: Some(errors),
            ..
        } = self
        {
            body["errors"] = json!(errors);
        }
        HttpResponse::build(self.status_code()).json(body)
    }
}
