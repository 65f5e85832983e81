// Report composition: fetch, filter and aggregate for each page
// Author: Gabriel Demetrios Lafis

mod dashboard;
mod raw;

pub use dashboard::*;
pub use raw::*;

use std::sync::Arc;

use log::{error, info};

use crate::data::SaleRecord;
use crate::processing::{FilterOptions, ProcessingError};
use crate::source::{SalesQuery, SalesSource, SourceError};

/// Runs the fetch -> filter -> aggregate pipeline against a sales source
#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn SalesSource + Send + Sync>,
}

impl DashboardService {
    /// Create a new service over the given source
    pub fn new<S>(source: S) -> Self
    where
        S: SalesSource + Send + Sync + 'static,
    {
        Self::from_arc(Arc::new(source))
    }

    pub fn from_arc(source: Arc<dyn SalesSource + Send + Sync>) -> Self {
        DashboardService { source }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Build the dashboard page; a failed fetch yields an empty page carrying the error
    pub fn dashboard(&self, request: &DashboardRequest) -> Result<DashboardPage, ProcessingError> {
        request.validate()?;

        match self.fetch(&request.query) {
            Ok(records) => DashboardPage::build(request, &records),
            Err(err) => Ok(DashboardPage::failed(request, err.to_string())),
        }
    }

    /// Build the raw data page; a failed fetch yields an empty table carrying the error
    pub fn raw_data(&self, request: &RawDataRequest) -> Result<RawDataView, ProcessingError> {
        request.validate()?;

        match self.fetch(&SalesQuery::all()) {
            Ok(records) => RawDataView::build(request, &records),
            Err(err) => RawDataView::failed(request, err.to_string()),
        }
    }

    /// Choices for the raw data filter widgets, taken from the full dataset
    pub fn filter_options(&self) -> Result<FilterOptions, SourceError> {
        let records = self.fetch(&SalesQuery::all())?;
        Ok(FilterOptions::from_records(&records))
    }

    fn fetch(&self, query: &SalesQuery) -> Result<Vec<SaleRecord>, SourceError> {
        match self.source.fetch(query) {
            Ok(records) => {
                info!("Loaded {} records from {}", records.len(), self.source.name());
                Ok(records)
            }
            Err(err) => {
                error!("Fetch from {} failed: {}", self.source.name(), err);
                Err(err)
            }
        }
    }
}
