//! Error taxonomy shared by the backend services.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// A required request field is missing or empty. Never retried.
    #[error("missing required field: {0}")]
    ClientInput(String),
    /// An API credential is absent from the environment.
    #[error("{0} is not configured")]
    MissingCredentials(&'static str),
    /// Every candidate model failed or ran out of retries.
    #[error("all models failed: {last}")]
    Exhausted { last: String },
    /// Non-transient failure reported by an external API.
    #[error("external API error: {0}")]
    ExternalApi(String),
    /// The model answered, but not in the requested shape.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
    /// Storage or database failure.
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl AppError {
    /// Stable classification carried in error payloads, so callers can tell
    /// "the model answered but wrong shape" from "the model didn't answer".
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::ClientInput(_) => "client_input",
            AppError::MissingCredentials(_) => "missing_credentials",
            AppError::Exhausted { .. } => "external_service_exhausted",
            AppError::ExternalApi(_) => "external_service_error",
            AppError::MalformedResponse(_) => "malformed_response",
            AppError::Persistence(_) => "persistence_error",
        }
    }
}

#[derive(Serialize, Debug)]
struct ErrorResponse {
    error: String,
    kind: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ClientInput(_) => StatusCode::BAD_REQUEST,
            AppError::MissingCredentials(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Exhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ExternalApi(_) | AppError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            kind: self.kind(),
        })
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
