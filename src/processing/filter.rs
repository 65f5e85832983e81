// Filter operations over sale records
// Author: Gabriel Demetrios Lafis

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::data::{Column, DataType, SaleRecord};
use super::ProcessingError;

/// A constraint on one column
///
/// An empty allowed set or a range with both bounds unset places no
/// constraint on the column. Bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    OneOf {
        column: Column,
        allowed: BTreeSet<String>,
    },
    Between {
        column: Column,
        min: Option<f64>,
        max: Option<f64>,
    },
    DateBetween {
        column: Column,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl Predicate {
    pub fn column(&self) -> Column {
        match self {
            Predicate::OneOf { column, .. }
            | Predicate::Between { column, .. }
            | Predicate::DateBetween { column, .. } => *column,
        }
    }

    /// Check that the predicate fits its column and its bounds are ordered
    pub fn validate(&self) -> Result<(), ProcessingError> {
        let column = self.column();
        let data_type = column.data_type();

        match self {
            Predicate::OneOf { .. } => {
                if data_type != DataType::Text {
                    return Err(ProcessingError::InvalidPredicate(format!(
                        "set membership needs a text column, '{}' is {:?}",
                        column, data_type
                    )));
                }
            }
            Predicate::Between { min, max, .. } => {
                if !data_type.is_numeric() {
                    return Err(ProcessingError::InvalidPredicate(format!(
                        "numeric range needs a numeric column, '{}' is {:?}",
                        column, data_type
                    )));
                }
                if min.map_or(false, f64::is_nan) || max.map_or(false, f64::is_nan) {
                    return Err(ProcessingError::InvalidPredicate(format!(
                        "range on '{}' has a NaN bound",
                        column
                    )));
                }
                if let (Some(min), Some(max)) = (min, max) {
                    if min > max {
                        return Err(ProcessingError::InvalidPredicate(format!(
                            "range on '{}' is empty: {} > {}",
                            column, min, max
                        )));
                    }
                }
            }
            Predicate::DateBetween { start, end, .. } => {
                if data_type != DataType::Date {
                    return Err(ProcessingError::InvalidPredicate(format!(
                        "date range needs a date column, '{}' is {:?}",
                        column, data_type
                    )));
                }
                if let (Some(start), Some(end)) = (start, end) {
                    if start > end {
                        return Err(ProcessingError::InvalidPredicate(format!(
                            "date range on '{}' is empty: {} > {}",
                            column, start, end
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Whether a record satisfies this predicate; assumes `validate` passed
    pub fn matches(&self, record: &SaleRecord) -> bool {
        match self {
            Predicate::OneOf { column, allowed } => {
                allowed.is_empty()
                    || record.text(*column).map_or(false, |value| allowed.contains(value))
            }
            Predicate::Between { column, min, max } => match record.number(*column) {
                Some(value) => {
                    min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
                }
                None => false,
            },
            Predicate::DateBetween { column, start, end } => match record.date(*column) {
                Some(value) => {
                    start.map_or(true, |start| value >= start)
                        && end.map_or(true, |end| value <= end)
                }
                None => false,
            },
        }
    }
}

/// Conjunction of per-column predicates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredicateSet {
    predicates: Vec<Predicate>,
}

impl PredicateSet {
    /// Create an empty predicate set, which allows every record
    pub fn new() -> Self {
        PredicateSet::default()
    }

    /// Add a predicate
    pub fn with(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Keep records whose text column is one of `values`
    pub fn one_of<I, S>(self, column: Column, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with(Predicate::OneOf {
            column,
            allowed: values.into_iter().map(Into::into).collect(),
        })
    }

    /// Keep records whose numeric column lies in `[min, max]`
    pub fn between(self, column: Column, min: Option<f64>, max: Option<f64>) -> Self {
        self.with(Predicate::Between { column, min, max })
    }

    pub fn products<I: IntoIterator<Item = S>, S: Into<String>>(self, values: I) -> Self {
        self.one_of(Column::Product, values)
    }

    pub fn categories<I: IntoIterator<Item = S>, S: Into<String>>(self, values: I) -> Self {
        self.one_of(Column::Category, values)
    }

    pub fn sellers<I: IntoIterator<Item = S>, S: Into<String>>(self, values: I) -> Self {
        self.one_of(Column::Seller, values)
    }

    pub fn locations<I: IntoIterator<Item = S>, S: Into<String>>(self, values: I) -> Self {
        self.one_of(Column::Location, values)
    }

    pub fn payment_types<I: IntoIterator<Item = S>, S: Into<String>>(self, values: I) -> Self {
        self.one_of(Column::PaymentType, values)
    }

    pub fn price_between(self, min: Option<f64>, max: Option<f64>) -> Self {
        self.between(Column::Price, min, max)
    }

    pub fn freight_between(self, min: Option<f64>, max: Option<f64>) -> Self {
        self.between(Column::Freight, min, max)
    }

    pub fn rating_between(self, min: Option<i64>, max: Option<i64>) -> Self {
        self.between(Column::Rating, min.map(|v| v as f64), max.map(|v| v as f64))
    }

    pub fn installments_between(self, min: Option<i64>, max: Option<i64>) -> Self {
        self.between(Column::Installments, min.map(|v| v as f64), max.map(|v| v as f64))
    }

    /// Keep records purchased between `start` and `end`, inclusive
    pub fn purchased_between(self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.with(Predicate::DateBetween {
            column: Column::PurchaseDate,
            start,
            end,
        })
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn validate(&self) -> Result<(), ProcessingError> {
        self.predicates.iter().try_for_each(Predicate::validate)
    }

    /// Whether a record satisfies every predicate
    pub fn matches(&self, record: &SaleRecord) -> bool {
        self.predicates.iter().all(|predicate| predicate.matches(record))
    }
}

/// Filter records by a predicate set, preserving their order
pub struct FilterProcessor {
    predicates: PredicateSet,
}

impl FilterProcessor {
    /// Create a new filter processor
    pub fn new(predicates: PredicateSet) -> Self {
        FilterProcessor { predicates }
    }

    pub fn predicates(&self) -> &PredicateSet {
        &self.predicates
    }

    /// Keep the records that satisfy every predicate
    pub fn process(&self, input: &[SaleRecord]) -> Result<Vec<SaleRecord>, ProcessingError> {
        self.predicates.validate()?;

        let result: Vec<SaleRecord> = input.iter()
            .filter(|record| self.predicates.matches(record))
            .cloned()
            .collect();

        debug!(
            "Filter kept {} of {} records ({} predicates)",
            result.len(),
            input.len(),
            self.predicates.predicates().len()
        );

        Ok(result)
    }
}

/// Apply a predicate set to a record slice
pub fn apply_filters(
    records: &[SaleRecord],
    predicates: &PredicateSet,
) -> Result<Vec<SaleRecord>, ProcessingError> {
    FilterProcessor::new(predicates.clone()).process(records)
}

/// Distinct values of a text column, in first-encountered order
pub fn distinct_values(records: &[SaleRecord], column: Column) -> Vec<String> {
    let mut seen = HashSet::new();
    records.iter()
        .filter_map(|record| record.text(column))
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

/// Choices offered to the filter widgets, taken from a record set
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub columns: Vec<Column>,
    pub products: Vec<String>,
    pub categories: Vec<String>,
    pub sellers: Vec<String>,
    pub locations: Vec<String>,
    pub payment_types: Vec<String>,
    pub first_purchase: Option<NaiveDate>,
    pub last_purchase: Option<NaiveDate>,
}

impl FilterOptions {
    pub fn from_records(records: &[SaleRecord]) -> Self {
        FilterOptions {
            columns: Column::ALL.to_vec(),
            products: distinct_values(records, Column::Product),
            categories: distinct_values(records, Column::Category),
            sellers: distinct_values(records, Column::Seller),
            locations: distinct_values(records, Column::Location),
            payment_types: distinct_values(records, Column::PaymentType),
            first_purchase: records.iter().map(|r| r.purchase_date).min(),
            last_purchase: records.iter().map(|r| r.purchase_date).max(),
        }
    }
}
