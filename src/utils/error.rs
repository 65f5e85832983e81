// Error handling utilities
// Author: Gabriel Demetrios Lafis

use crate::api::ApiError;
use crate::data::DataError;
use crate::processing::ProcessingError;
use crate::source::SourceError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Processing error: {0}")]
    Processing(#[from] ProcessingError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for AppError
pub type AppResult<T> = Result<T, AppError>;
