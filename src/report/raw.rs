// Raw data page: filtered, column-projected records and CSV export
// Author: Gabriel Demetrios Lafis

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::data::{Column, CsvSink, DataSet, JsonSink, SaleRecord};
use crate::processing::{apply_filters, FilterOptions, PredicateSet, ProcessingError, SelectTransform};

/// File name offered for the CSV download when none is given
pub const DEFAULT_EXPORT_NAME: &str = "dados";

/// What the raw data page asks for
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDataRequest {
    #[serde(default)]
    pub predicates: PredicateSet,
    /// Visible columns; `None` shows every column
    #[serde(default)]
    pub columns: Option<Vec<Column>>,
}

impl RawDataRequest {
    pub fn new(predicates: PredicateSet) -> Self {
        RawDataRequest {
            predicates,
            columns: None,
        }
    }

    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn validate(&self) -> Result<(), ProcessingError> {
        self.predicates.validate()?;
        self.transform().validate()
    }

    fn transform(&self) -> SelectTransform {
        match &self.columns {
            Some(columns) => SelectTransform::new(columns.clone()),
            None => SelectTransform::all(),
        }
    }
}

/// The raw data page as handed to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct RawDataView {
    pub table: DataSet,
    /// Widget choices, from the unfiltered records
    pub options: FilterOptions,
    pub error: Option<String>,
}

impl RawDataView {
    /// Filter, then project the fetched records
    pub fn build(request: &RawDataRequest, fetched: &[SaleRecord]) -> Result<Self, ProcessingError> {
        let filtered = apply_filters(fetched, &request.predicates)?;
        let table = request.transform().process(&filtered)?;

        Ok(RawDataView {
            table,
            options: FilterOptions::from_records(fetched),
            error: None,
        })
    }

    /// An empty table reporting why nothing could be shown
    pub fn failed(request: &RawDataRequest, message: String) -> Result<Self, ProcessingError> {
        let table = request.transform().process(&[])?;

        Ok(RawDataView {
            table,
            options: FilterOptions::from_records(&[]),
            error: Some(message),
        })
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        self.table.shape()
    }

    /// The table as a UTF-8 CSV document with a header row
    pub fn to_csv(&self) -> Result<Vec<u8>, ProcessingError> {
        Ok(CsvSink::default().to_bytes(&self.table)?)
    }

    /// The table as a JSON array of objects
    pub fn to_json(&self) -> JsonValue {
        JsonSink::to_json(&self.table)
    }
}

/// Download name for an export: the given stem plus `.csv`
pub fn export_file_name(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '"') && !c.is_control())
        .collect();
    let stem = if stem.is_empty() { DEFAULT_EXPORT_NAME } else { stem.as_str() };

    if stem.to_lowercase().ends_with(".csv") {
        stem.to_string()
    } else {
        format!("{}.csv", stem)
    }
}
