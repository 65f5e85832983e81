// API request and response models
// Author: Gabriel Demetrios Lafis

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::data::{Column, Region};
use crate::processing::FilterOptions;
use crate::report::{DashboardRequest, RawDataView, DEFAULT_TOP_SELLERS};
use crate::source::SalesQuery;
use super::ApiError;

/// Query string of the dashboard endpoint, named as the remote API names them
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardParams {
    pub regiao: Option<String>,
    pub ano: Option<String>,
    /// Comma-separated seller names
    pub vendedores: Option<String>,
    pub top: Option<usize>,
}

impl DashboardParams {
    /// Turn the raw query string into a dashboard request
    pub fn into_request(self) -> Result<DashboardRequest, ApiError> {
        let region = match self.regiao.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(name) => Some(
                name.parse::<Region>()
                    .map_err(|e| ApiError::Validation(e.to_string()))?,
            ),
        };

        let year = match self.ano.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(year) => Some(year.parse::<i32>().map_err(|_| {
                ApiError::Validation(format!("'ano' must be a year, got '{}'", year))
            })?),
        };

        let sellers: Vec<String> = self.vendedores
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let request = DashboardRequest::new(SalesQuery::new(region, year)?)
            .with_sellers(sellers)
            .with_top_sellers(self.top.unwrap_or(DEFAULT_TOP_SELLERS));

        request.validate()?;
        Ok(request)
    }
}

/// Query string of the export endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportParams {
    pub file: Option<String>,
}

/// Shape of a table
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TableShape {
    pub rows: usize,
    pub columns: usize,
}

/// Raw data page as returned to the front end
#[derive(Debug, Clone, Serialize)]
pub struct RawDataResponse {
    pub columns: Vec<Column>,
    pub rows: JsonValue,
    pub shape: TableShape,
    pub options: FilterOptions,
    pub error: Option<String>,
}

impl From<RawDataView> for RawDataResponse {
    fn from(view: RawDataView) -> Self {
        let (rows, columns) = view.shape();
        RawDataResponse {
            rows: view.to_json(),
            columns: view.table.columns,
            shape: TableShape { rows, columns },
            options: view.options,
            error: view.error,
        }
    }
}
