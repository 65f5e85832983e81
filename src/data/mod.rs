// Data module for sale records and tabular output
// Author: Gabriel Demetrios Lafis

mod csv;
mod json;
mod record;
mod schema;

pub use self::csv::*;
pub use json::*;
pub use record::*;
pub use schema::*;

use std::fmt;
use std::io::Write;

use chrono::NaiveDate;

/// Represents a generic data sink for projected tables
pub trait DataSink {
    /// Write a dataset to the given writer
    fn write_to(&self, data: &DataSet, writer: &mut dyn Write) -> Result<(), DataError>;

    /// Get the sink name
    fn name(&self) -> &str;
}

/// A column-projected table of sale records
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    pub columns: Vec<Column>,
    pub data: Vec<Row>,
}

impl DataSet {
    /// Create a new empty dataset
    pub fn new(columns: Vec<Column>) -> Self {
        DataSet {
            columns,
            data: Vec::new(),
        }
    }

    /// Add a row to the dataset
    pub fn add_row(&mut self, row: Row) -> Result<(), DataError> {
        if row.values.len() != self.columns.len() {
            return Err(DataError::SchemaMismatch {
                expected: self.columns.len(),
                found: row.values.len(),
            });
        }

        self.data.push(row);
        Ok(())
    }

    /// Get the number of rows in the dataset
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.data.len(), self.columns.len())
    }

    /// Position of a column in this dataset
    pub fn column_index(&self, column: Column) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }

    /// Get a reference to a row by index
    pub fn get_row(&self, index: usize) -> Option<&Row> {
        self.data.get(index)
    }
}

/// Represents a row in a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub values: Vec<Value>,
}

impl Row {
    /// Create a new row with the given values
    pub fn new(values: Vec<Value>) -> Self {
        Row { values }
    }

    /// Get a reference to a value by index
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
}

/// Represents a value in a row
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    String(String),
    Date(NaiveDate),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// Represents an error in the data module
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Malformed record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("Schema mismatch: expected {expected} values, found {found}")]
    SchemaMismatch { expected: usize, found: usize },

    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    #[error("Unknown region '{0}'")]
    UnknownRegion(String),
}
