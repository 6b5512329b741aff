//! Error taxonomy for the store and the request handlers.
//!
//! Three kinds of failure exist. An empty title is a validation error the
//! handlers recover from by redirecting back to the input form. A storage
//! failure is fatal for the request and surfaces as a 500. Operations on a
//! missing id are NOT errors anywhere in the application — they affect zero
//! rows and the request completes as if it had succeeded.

use actix_web::error::BlockingError;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// A create or update arrived with a title that is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The backing store could not be reached or a statement failed.
    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),

    /// The blocking worker pool shut down mid-request.
    #[error("worker pool unavailable")]
    Canceled,
}

impl From<BlockingError> for AppError {
    fn from(_: BlockingError) -> Self {
        AppError::Canceled
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::EmptyTitle => StatusCode::BAD_REQUEST,
            AppError::Storage(_) | AppError::Canceled => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        HttpResponse::build(self.status_code()).content_type(ContentType::plaintext()).body(self.to_string())
    }
}
