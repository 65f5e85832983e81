// Local JSON file sales source
// Author: Gabriel Demetrios Lafis

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::info;

use crate::data::{JsonRecordDecoder, MalformedRecordPolicy, SaleRecord};
use super::{SalesQuery, SalesSource, SourceError};

/// Reads a saved copy of the remote body and applies the query locally
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
    decoder: JsonRecordDecoder,
}

impl JsonFileSource {
    /// Create a new JSON file source
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        JsonFileSource {
            name: path.to_string_lossy().to_string(),
            path,
            decoder: JsonRecordDecoder::default(),
        }
    }

    /// Set how undecodable records are handled
    pub fn with_policy(mut self, policy: MalformedRecordPolicy) -> Self {
        self.decoder = JsonRecordDecoder::new(policy);
        self
    }
}

impl SalesSource for JsonFileSource {
    fn fetch(&self, query: &SalesQuery) -> Result<Vec<SaleRecord>, SourceError> {
        query.validate()?;

        let file = File::open(&self.path).map_err(|e| {
            SourceError::SourceUnavailable(format!("{}: {}", self.name, e))
        })?;

        let records: Vec<SaleRecord> = self.decoder
            .decode_reader(BufReader::new(file))?
            .into_iter()
            .filter(|record| query.matches(record))
            .collect();

        info!("Loaded {} records from {}", records.len(), self.name);
        Ok(records)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
