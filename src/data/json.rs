// JSON decoding of the remote body and JSON output of projected tables
// Author: Gabriel Demetrios Lafis

use std::io::{Read, Write};

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::{DataError, DataSet, DataSink, RawSaleRecord, SaleRecord, Value};

/// What to do with a record that cannot be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedRecordPolicy {
    /// Fail the whole decode
    Abort,
    /// Drop the record and keep going
    Skip,
}

impl Default for MalformedRecordPolicy {
    fn default() -> Self {
        MalformedRecordPolicy::Abort
    }
}

/// Decoder for the remote sales body: a JSON array of record objects
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRecordDecoder {
    policy: MalformedRecordPolicy,
}

impl JsonRecordDecoder {
    /// Create a new decoder with the given malformed-record policy
    pub fn new(policy: MalformedRecordPolicy) -> Self {
        JsonRecordDecoder { policy }
    }

    /// Decode records from a string body
    pub fn decode_str(&self, body: &str) -> Result<Vec<SaleRecord>, DataError> {
        let json: JsonValue = serde_json::from_str(body)
            .map_err(|e| DataError::Parse(e.to_string()))?;
        self.decode_value(json)
    }

    /// Decode records from a reader
    pub fn decode_reader<R: Read>(&self, reader: R) -> Result<Vec<SaleRecord>, DataError> {
        let json: JsonValue = serde_json::from_reader(reader)
            .map_err(|e| DataError::Parse(e.to_string()))?;
        self.decode_value(json)
    }

    /// Decode records from an already-parsed JSON document
    pub fn decode_value(&self, json: JsonValue) -> Result<Vec<SaleRecord>, DataError> {
        let items = match json {
            JsonValue::Array(items) => items,
            _ => return Err(DataError::Parse("JSON root is not an array".to_string())),
        };

        let mut records = Vec::with_capacity(items.len());

        for (index, item) in items.into_iter().enumerate() {
            match Self::decode_item(index, item) {
                Ok(record) => records.push(record),
                Err(err) => match self.policy {
                    MalformedRecordPolicy::Abort => return Err(err),
                    MalformedRecordPolicy::Skip => {
                        warn!("Skipping record: {}", err);
                    }
                },
            }
        }

        Ok(records)
    }

    fn decode_item(index: usize, item: JsonValue) -> Result<SaleRecord, DataError> {
        let raw: RawSaleRecord = serde_json::from_value(item)
            .map_err(|e| DataError::MalformedRecord {
                index,
                reason: e.to_string(),
            })?;

        raw.into_record(index)
    }
}

/// JSON data sink: an array of objects keyed by column name
pub struct JsonSink {
    pretty: bool,
}

impl JsonSink {
    /// Create a new JSON data sink
    pub fn new(pretty: bool) -> Self {
        JsonSink { pretty }
    }

    /// Convert a data value to a JSON value
    fn value_to_json(value: &Value) -> JsonValue {
        match value {
            Value::Integer(i) => JsonValue::Number((*i).into()),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map_or(JsonValue::Null, JsonValue::Number),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Date(_) => JsonValue::String(value.to_string()),
        }
    }

    /// Convert a dataset into a JSON array of objects
    pub fn to_json(data: &DataSet) -> JsonValue {
        let rows = data.data.iter()
            .map(|row| {
                let mut obj = Map::new();
                for (column, value) in data.columns.iter().zip(&row.values) {
                    obj.insert(column.name().to_string(), Self::value_to_json(value));
                }
                JsonValue::Object(obj)
            })
            .collect();

        JsonValue::Array(rows)
    }
}

impl DataSink for JsonSink {
    fn write_to(&self, data: &DataSet, writer: &mut dyn Write) -> Result<(), DataError> {
        let json = Self::to_json(data);

        if self.pretty {
            serde_json::to_writer_pretty(writer, &json)
                .map_err(|e| DataError::Io(e.into()))?;
        } else {
            serde_json::to_writer(writer, &json)
                .map_err(|e| DataError::Io(e.into()))?;
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "json"
    }
}
