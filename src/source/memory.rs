// In-memory sales source
// Author: Gabriel Demetrios Lafis

use crate::data::SaleRecord;
use super::{SalesQuery, SalesSource, SourceError};

/// Serves a fixed set of records, applying the query locally
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<SaleRecord>,
}

impl MemorySource {
    /// Create a new memory source
    pub fn new(records: Vec<SaleRecord>) -> Self {
        MemorySource { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SalesSource for MemorySource {
    fn fetch(&self, query: &SalesQuery) -> Result<Vec<SaleRecord>, SourceError> {
        query.validate()?;

        Ok(self.records.iter()
            .filter(|record| query.matches(record))
            .cloned()
            .collect())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
