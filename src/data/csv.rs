// CSV sink for projected tables
// Author: Gabriel Demetrios Lafis

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{DataError, DataSet, DataSink};

/// CSV data sink: UTF-8, header row, one line per record
pub struct CsvSink {
    delimiter: u8,
}

impl CsvSink {
    /// Create a new CSV data sink
    pub fn new(delimiter: char) -> Self {
        CsvSink {
            delimiter: delimiter as u8,
        }
    }

    /// Encode a dataset into an in-memory CSV document
    pub fn to_bytes(&self, data: &DataSet) -> Result<Vec<u8>, DataError> {
        let mut buffer = Vec::new();
        self.write_to(data, &mut buffer)?;
        Ok(buffer)
    }

    /// Write a dataset to a CSV file, replacing any existing file
    pub fn write_file<P: AsRef<Path>>(&self, data: &DataSet, path: P) -> Result<(), DataError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(data, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl Default for CsvSink {
    fn default() -> Self {
        Self::new(',')
    }
}

impl DataSink for CsvSink {
    fn write_to(&self, data: &DataSet, writer: &mut dyn Write) -> Result<(), DataError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        // Write headers
        let headers: Vec<&str> = data.columns.iter()
            .map(|column| column.name())
            .collect();
        csv_writer.write_record(&headers)?;

        // Write data
        for row in &data.data {
            let record: Vec<String> = row.values.iter()
                .map(|value| value.to_string())
                .collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "csv"
    }
}
