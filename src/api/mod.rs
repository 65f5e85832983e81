// API module for serving the reports over HTTP
// Author: Gabriel Demetrios Lafis

mod handlers;
mod models;
mod routes;
mod server;

pub use handlers::*;
pub use models::*;
pub use routes::*;
pub use server::*;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

use crate::processing::ProcessingError;
use crate::source::SourceError;

/// Represents an error in the API module
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Source(#[from] SourceError),

    #[error("{0}")]
    Processing(#[from] ProcessingError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Source(SourceError::InvalidQuery(_)) => StatusCode::BAD_REQUEST,
            ApiError::Source(_) => StatusCode::BAD_GATEWAY,
            ApiError::Processing(ProcessingError::InvalidPredicate(_)) => StatusCode::BAD_REQUEST,
            ApiError::Processing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
