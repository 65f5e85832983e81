// Data source adapters for the sales dataset
// Author: Gabriel Demetrios Lafis

mod file;
mod http;
mod memory;

pub use file::*;
pub use http::*;
pub use memory::*;

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::data::{DataError, Region, SaleRecord};
use crate::utils::validate_range;

/// Years the remote API serves data for
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 2020..=2023;

/// Represents a read-only source of sale records
pub trait SalesSource {
    /// Fetch every record matching the query
    fn fetch(&self, query: &SalesQuery) -> Result<Vec<SaleRecord>, SourceError>;

    /// Get the source name
    fn name(&self) -> &str;
}

/// Parameters of one read against a sales source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesQuery {
    pub region: Option<Region>,
    pub year: Option<i32>,
}

impl SalesQuery {
    /// A query with no region or year restriction
    pub fn all() -> Self {
        SalesQuery::default()
    }

    /// Create a query, rejecting years outside the supported range
    pub fn new(region: Option<Region>, year: Option<i32>) -> Result<Self, SourceError> {
        let query = SalesQuery { region, year };
        query.validate()?;
        Ok(query)
    }

    pub fn validate(&self) -> Result<(), SourceError> {
        if let Some(year) = self.year {
            validate_range(year, *SUPPORTED_YEARS.start(), *SUPPORTED_YEARS.end(), "ano")
                .map_err(SourceError::InvalidQuery)?;
        }
        Ok(())
    }

    /// Query parameters as sent to the remote API; unset values are empty
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let region = self.region.map(|r| r.query_value()).unwrap_or_default();
        let year = self.year.map(|y| y.to_string()).unwrap_or_default();
        vec![("regiao", region), ("ano", year)]
    }

    /// Whether a record satisfies this query, for sources that filter locally
    pub fn matches(&self, record: &SaleRecord) -> bool {
        let region_ok = self.region.map_or(true, |region| region.contains(&record.location));
        let year_ok = self.year.map_or(true, |year| record.year() == year);
        region_ok && year_ok
    }
}

/// Represents an error while reading from a sales source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Malformed record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl From<DataError> for SourceError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::MalformedRecord { index, reason } => {
                SourceError::MalformedRecord { index, reason }
            }
            DataError::Io(err) => SourceError::SourceUnavailable(err.to_string()),
            other => SourceError::MalformedResponse(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::SourceUnavailable(err.to_string())
    }
}
