use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, error::InternalError, web};
use serde_json::json;
use tracing::error;

/// Domain error taxonomy. Every variant maps to a response status at the
/// gateway boundary; nothing propagates to the caller as an unhandled fault.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation {
        field: Option<&'static str>,
        message: String,
    },

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{message}")]
    Conflict {
        field: &'static str,
        message: String,
    },

    #[error("Internal server error")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            field: None,
            message: message.into(),
        }
    }

    pub fn field(field: &'static str, message: impl Into<String>) -> Self {
        ApiError::Validation {
            field: Some(field),
            message: message.into(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation {
                field: Some(field),
                message,
            } => json!({ "error": message, "field": field }),
            ApiError::Conflict { field, message } => {
                json!({ "error": message, "field": field })
            }
            ApiError::Database(e) => {
                error!(error = %e, "Database error");
                json!({ "error": "Internal server error" })
            }
            other => json!({ "error": other.to_string() }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Malformed request bodies get the same structured shape as domain errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = HttpResponse::BadRequest().json(json!({ "error": err.to_string() }));
        InternalError::from_response(err, body).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let body = HttpResponse::BadRequest().json(json!({ "error": err.to_string() }));
        InternalError::from_response(err, body).into()
    })
}
