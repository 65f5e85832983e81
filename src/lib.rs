// Sales Dashboard Engine
// Author: Gabriel Demetrios Lafis

//! # Sales Dashboard Engine
//!
//! Fetches a sales dataset from a remote API and computes the tables a
//! sales dashboard shows.
//!
//! ## Features
//!
//! - Reading sale records from the remote products API, a JSON file or memory
//! - Filtering by set membership, numeric range and date range
//! - Revenue and sales-count summaries by state, month, category and seller
//! - Column projection and CSV export of the filtered records
//! - REST API for a dashboard front end
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use sales_dashboard_engine::{
//!     data::SaleRecord,
//!     processing::{aggregate_by_category, apply_filters, Measure, PredicateSet},
//! };
//!
//! let record = |category: &str, price: f64| SaleRecord {
//!     product: "Cadeira".to_string(),
//!     category: category.to_string(),
//!     price,
//!     freight: 10.0,
//!     purchase_date: NaiveDate::from_ymd_opt(2021, 3, 14).unwrap(),
//!     seller: "Ana".to_string(),
//!     location: "SP".to_string(),
//!     rating: 5,
//!     payment_type: "boleto".to_string(),
//!     installments: 1,
//!     lat: -22.19,
//!     lon: -48.79,
//! };
//!
//! let records = vec![record("moveis", 100.0), record("moveis", 200.0), record("livros", 300.0)];
//!
//! let cheap = apply_filters(&records, &PredicateSet::new().price_between(None, Some(250.0))).unwrap();
//! assert_eq!(cheap.len(), 2);
//!
//! let revenue = aggregate_by_category(&records, Measure::Sum);
//! assert_eq!(revenue.rows[0].key, "moveis");
//! assert_eq!(revenue.total(), 600.0);
//! ```

pub mod api;
pub mod data;
pub mod processing;
pub mod report;
pub mod source;
pub mod utils;

// Re-export main types
pub use api::Server;
pub use data::{Column, DataSet, Region, Row, SaleRecord, Value};
pub use processing::{Measure, PredicateSet, SummaryTable};
pub use report::DashboardService;
pub use source::{HttpSource, SalesQuery, SalesSource};
pub use utils::Config;
