// Dashboard page: metrics, summary tables and rankings
// Author: Gabriel Demetrios Lafis

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::data::{Column, SaleRecord};
use crate::processing::{
    aggregate_by_category, aggregate_by_location, aggregate_by_month, aggregate_by_seller,
    apply_filters, distinct_values, Location, Measure, Metrics, PredicateSet, ProcessingError,
    SellerRow, SellerTable, SummaryRow, SummaryTable, YearMonth,
};
use crate::source::SalesQuery;
use crate::utils::validate_range;

/// Number of locations in the top-location bar charts
pub const TOP_LOCATIONS: usize = 5;

/// Default number of sellers in the seller rankings
pub const DEFAULT_TOP_SELLERS: usize = 5;

/// Allowed number of sellers in the seller rankings
pub const TOP_SELLERS_RANGE: RangeInclusive<usize> = 2..=10;

/// What the dashboard page asks for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardRequest {
    #[serde(default)]
    pub query: SalesQuery,
    /// Sellers to keep after the fetch; empty keeps every seller
    #[serde(default)]
    pub sellers: BTreeSet<String>,
    #[serde(default = "default_top_sellers")]
    pub top_sellers: usize,
}

fn default_top_sellers() -> usize {
    DEFAULT_TOP_SELLERS
}

impl Default for DashboardRequest {
    fn default() -> Self {
        DashboardRequest {
            query: SalesQuery::all(),
            sellers: BTreeSet::new(),
            top_sellers: DEFAULT_TOP_SELLERS,
        }
    }
}

impl DashboardRequest {
    pub fn new(query: SalesQuery) -> Self {
        DashboardRequest {
            query,
            ..Default::default()
        }
    }

    pub fn with_sellers<I, S>(mut self, sellers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sellers = sellers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_top_sellers(mut self, top_sellers: usize) -> Self {
        self.top_sellers = top_sellers;
        self
    }

    pub fn validate(&self) -> Result<(), ProcessingError> {
        self.query
            .validate()
            .map_err(|e| ProcessingError::InvalidPredicate(e.to_string()))?;
        validate_range(
            self.top_sellers,
            *TOP_SELLERS_RANGE.start(),
            *TOP_SELLERS_RANGE.end(),
            "top_sellers",
        )
        .map_err(ProcessingError::InvalidPredicate)
    }

    fn predicates(&self) -> PredicateSet {
        PredicateSet::new().sellers(self.sellers.iter().cloned())
    }
}

/// Every summary table the dashboard shows, computed from one record set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub metrics: Metrics,
    pub revenue_by_location: SummaryTable<Location>,
    pub revenue_by_month: SummaryTable<YearMonth>,
    pub revenue_by_category: SummaryTable<String>,
    pub sales_by_location: SummaryTable<Location>,
    pub sales_by_month: SummaryTable<YearMonth>,
    pub sales_by_category: SummaryTable<String>,
    pub sellers: SellerTable,
}

impl DashboardReport {
    pub fn build(records: &[SaleRecord]) -> Self {
        DashboardReport {
            metrics: Metrics::from_records(records),
            revenue_by_location: aggregate_by_location(records, Measure::Sum),
            revenue_by_month: aggregate_by_month(records, Measure::Sum),
            revenue_by_category: aggregate_by_category(records, Measure::Sum),
            sales_by_location: aggregate_by_location(records, Measure::Count),
            sales_by_month: aggregate_by_month(records, Measure::Count),
            sales_by_category: aggregate_by_category(records, Measure::Count),
            sellers: aggregate_by_seller(records),
        }
    }
}

/// The dashboard page as handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardPage {
    pub query: SalesQuery,
    pub revenue_label: String,
    pub sales_label: String,
    pub report: DashboardReport,
    pub top_locations_by_revenue: Vec<SummaryRow<Location>>,
    pub top_locations_by_sales: Vec<SummaryRow<Location>>,
    pub top_sellers_by_revenue: Vec<SellerRow>,
    pub top_sellers_by_sales: Vec<SellerRow>,
    /// Sellers present in the fetched data, for the seller filter
    pub seller_options: Vec<String>,
    pub error: Option<String>,
}

impl DashboardPage {
    /// Filter the fetched records by seller and summarise them
    pub fn build(request: &DashboardRequest, fetched: &[SaleRecord]) -> Result<Self, ProcessingError> {
        let seller_options = distinct_values(fetched, Column::Seller);
        let records = apply_filters(fetched, &request.predicates())?;
        let report = DashboardReport::build(&records);

        Ok(DashboardPage {
            query: request.query,
            revenue_label: report.metrics.revenue_label(),
            sales_label: report.metrics.sales_label(),
            top_locations_by_revenue: report.revenue_by_location.top(TOP_LOCATIONS).to_vec(),
            top_locations_by_sales: report.sales_by_location.top(TOP_LOCATIONS).to_vec(),
            top_sellers_by_revenue: report.sellers.top_by_revenue(request.top_sellers),
            top_sellers_by_sales: report.sellers.top_by_sales(request.top_sellers),
            seller_options,
            report,
            error: None,
        })
    }

    /// An empty page reporting why nothing could be shown
    pub fn failed(request: &DashboardRequest, message: String) -> Self {
        let report = DashboardReport::build(&[]);

        DashboardPage {
            query: request.query,
            revenue_label: report.metrics.revenue_label(),
            sales_label: report.metrics.sales_label(),
            report,
            top_locations_by_revenue: Vec::new(),
            top_locations_by_sales: Vec::new(),
            top_sellers_by_revenue: Vec::new(),
            top_sellers_by_sales: Vec::new(),
            seller_options: Vec::new(),
            error: Some(message),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
