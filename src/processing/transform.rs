// Column projection of sale records
// Author: Gabriel Demetrios Lafis

use std::collections::HashSet;

use crate::data::{Column, DataSet, Row, SaleRecord};
use super::ProcessingError;

/// Select the visible columns of a record set, in the given order
pub struct SelectTransform {
    columns: Vec<Column>,
}

impl SelectTransform {
    /// Create a new select transform with the given columns
    pub fn new(columns: Vec<Column>) -> Self {
        SelectTransform { columns }
    }

    /// Select every column
    pub fn all() -> Self {
        Self::new(Column::ALL.to_vec())
    }

    /// Parse column names, as a user would type them
    pub fn from_names<I, S>(names: I) -> Result<Self, ProcessingError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns = names.into_iter()
            .map(|name| name.as_ref().parse::<Column>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ProcessingError::InvalidPredicate(e.to_string()))?;
        Ok(Self::new(columns))
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Reject an empty or repeated column list
    pub fn validate(&self) -> Result<(), ProcessingError> {
        if self.columns.is_empty() {
            return Err(ProcessingError::InvalidPredicate(
                "at least one column must be selected".to_string()
            ));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column) {
                return Err(ProcessingError::InvalidPredicate(
                    format!("column '{}' selected more than once", column)
                ));
            }
        }

        Ok(())
    }

    /// Project records into a table holding only the selected columns
    pub fn process(&self, input: &[SaleRecord]) -> Result<DataSet, ProcessingError> {
        self.validate()?;

        let mut result = DataSet::new(self.columns.clone());

        for record in input {
            let values = self.columns.iter()
                .map(|column| record.value(*column))
                .collect();
            result.add_row(Row::new(values))?;
        }

        Ok(result)
    }
}

impl Default for SelectTransform {
    fn default() -> Self {
        Self::all()
    }
}
