// Processing module: filtering, projection and aggregation of sale records
// Author: Gabriel Demetrios Lafis

mod aggregate;
mod filter;
mod stats;
mod transform;

pub use aggregate::*;
pub use filter::*;
pub use stats::*;
pub use transform::*;

use crate::data::DataError;

/// Represents an error in the processing module
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Invalid predicate: {0}")]
    InvalidPredicate(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),
}
