// Summary metrics over sale records
// Author: Gabriel Demetrios Lafis

use serde::Serialize;

use crate::data::SaleRecord;

/// Headline numbers of a record set
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub total_revenue: f64,
    pub total_sales: usize,
}

impl Metrics {
    pub fn from_records(records: &[SaleRecord]) -> Self {
        Metrics {
            total_revenue: records.iter().fold(0.0, |sum, record| sum + record.price),
            total_sales: records.len(),
        }
    }

    /// Revenue as shown on the dashboard, e.g. `R$ 1.50 milhões`
    pub fn revenue_label(&self) -> String {
        format_number(self.total_revenue, "R$")
    }

    /// Sales count as shown on the dashboard, e.g. `12.30 mil`
    pub fn sales_label(&self) -> String {
        format_number(self.total_sales as f64, "")
    }
}

/// Format a number with two decimals and a thousand/million suffix
pub fn format_number(value: f64, prefix: &str) -> String {
    let mut value = value;

    for unit in ["", "mil"] {
        if value < 1000.0 {
            return join_parts(prefix, value, unit);
        }
        value /= 1000.0;
    }

    join_parts(prefix, value, "milhões")
}

fn join_parts(prefix: &str, value: f64, unit: &str) -> String {
    let number = format!("{:.2}", value);
    [prefix, number.as_str(), unit]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}
