// Aggregate operations over sale records
// Author: Gabriel Demetrios Lafis

use std::collections::HashMap;
use std::hash::Hash;

use log::debug;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::data::SaleRecord;

/// How a group of records is reduced to one number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    /// Sum of prices (revenue)
    Sum,
    /// Number of records (sales)
    Count,
}

impl Measure {
    fn finalize(&self, state: &Accumulator) -> f64 {
        match self {
            Measure::Sum => state.sum,
            Measure::Count => state.count as f64,
        }
    }
}

/// Running price sum and record count of one group
#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn update(&mut self, record: &SaleRecord) {
        self.sum += record.price;
        self.count += 1;
    }
}

/// One group, with the first record that produced it
struct Group<'a, K> {
    key: K,
    first: &'a SaleRecord,
    state: Accumulator,
}

/// Group records by key, keeping groups in first-encountered order
fn group_by<'a, K, F>(records: &'a [SaleRecord], key_of: F) -> Vec<Group<'a, K>>
where
    K: Eq + Hash + Clone,
    F: Fn(&SaleRecord) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<Group<'a, K>> = Vec::new();

    for record in records {
        let key = key_of(record);
        let position = match index.get(&key) {
            Some(&position) => position,
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(Group {
                    key,
                    first: record,
                    state: Accumulator::default(),
                });
                groups.len() - 1
            }
        };
        groups[position].state.update(record);
    }

    groups
}

/// One (group key, measure value) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow<K> {
    pub key: K,
    pub value: f64,
}

/// Ordered summary of a record set under one measure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable<K> {
    pub measure: Measure,
    pub rows: Vec<SummaryRow<K>>,
}

impl<K> SummaryTable<K> {
    fn new(measure: Measure, rows: Vec<SummaryRow<K>>) -> Self {
        SummaryTable { measure, rows }
    }

    /// Sort by value, largest first; ties keep their current order
    fn ranked(mut self) -> Self {
        self.rows.sort_by(|a, b| b.value.total_cmp(&a.value));
        self
    }

    /// The first `n` rows
    pub fn top(&self, n: usize) -> &[SummaryRow<K>] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Sum of every row's value
    pub fn total(&self) -> f64 {
        self.rows.iter().fold(0.0, |sum, row| sum + row.value)
    }

    /// Largest value, `None` for an empty table
    pub fn max_value(&self) -> Option<f64> {
        self.rows.iter().map(|row| row.value).reduce(f64::max)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SummaryRow<K>> {
        self.rows.iter()
    }
}

impl<K: PartialEq> SummaryTable<K> {
    /// Value of a key, if present
    pub fn get(&self, key: &K) -> Option<f64> {
        self.rows.iter().find(|row| &row.key == key).map(|row| row.value)
    }
}

/// A purchase location with its map coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// Calendar month of a purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        YearMonth { year, month }
    }

    pub fn of(record: &SaleRecord) -> Self {
        YearMonth::new(record.year(), record.month())
    }

    /// English month name
    pub fn month_name(&self) -> &'static str {
        self.month
            .checked_sub(1)
            .and_then(|i| MONTH_NAMES.get(i as usize))
            .copied()
            .unwrap_or("")
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("YearMonth", 3)?;
        state.serialize_field("year", &self.year)?;
        state.serialize_field("month", &self.month)?;
        state.serialize_field("month_name", self.month_name())?;
        state.end()
    }
}

/// Measure per purchase location, largest first
///
/// Records at one location are assumed to share coordinates; the first
/// record seen supplies them.
pub fn aggregate_by_location(records: &[SaleRecord], measure: Measure) -> SummaryTable<Location> {
    let rows = group_by(records, |record| record.location.clone())
        .into_iter()
        .map(|group| SummaryRow {
            value: measure.finalize(&group.state),
            key: Location {
                name: group.key,
                lat: group.first.lat,
                lon: group.first.lon,
            },
        })
        .collect();

    let table = SummaryTable::new(measure, rows).ranked();
    debug!("Aggregated {} records into {} locations", records.len(), table.len());
    table
}

/// Measure per calendar month, in chronological order
///
/// Months without records are absent rather than zero.
pub fn aggregate_by_month(records: &[SaleRecord], measure: Measure) -> SummaryTable<YearMonth> {
    let mut rows: Vec<SummaryRow<YearMonth>> = group_by(records, YearMonth::of)
        .into_iter()
        .map(|group| SummaryRow {
            key: group.key,
            value: measure.finalize(&group.state),
        })
        .collect();
    rows.sort_by_key(|row| row.key);

    debug!("Aggregated {} records into {} months", records.len(), rows.len());
    SummaryTable::new(measure, rows)
}

/// Measure per product category, largest first
pub fn aggregate_by_category(records: &[SaleRecord], measure: Measure) -> SummaryTable<String> {
    let rows = group_by(records, |record| record.category.clone())
        .into_iter()
        .map(|group| SummaryRow {
            key: group.key,
            value: measure.finalize(&group.state),
        })
        .collect();

    let table = SummaryTable::new(measure, rows).ranked();
    debug!("Aggregated {} records into {} categories", records.len(), table.len());
    table
}

/// Revenue and sales count of one seller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SellerRow {
    pub seller: String,
    pub revenue: f64,
    pub sales: usize,
}

/// Both measures per seller, in first-encountered order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SellerTable {
    rows: Vec<SellerRow>,
}

impl SellerTable {
    pub fn rows(&self) -> &[SellerRow] {
        &self.rows
    }

    pub fn get(&self, seller: &str) -> Option<&SellerRow> {
        self.rows.iter().find(|row| row.seller == seller)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The `n` sellers with the highest revenue
    pub fn top_by_revenue(&self, n: usize) -> Vec<SellerRow> {
        self.top_by(n, |a, b| b.revenue.total_cmp(&a.revenue))
    }

    /// The `n` sellers with the most sales
    pub fn top_by_sales(&self, n: usize) -> Vec<SellerRow> {
        self.top_by(n, |a, b| b.sales.cmp(&a.sales))
    }

    fn top_by<F>(&self, n: usize, compare: F) -> Vec<SellerRow>
    where
        F: FnMut(&SellerRow, &SellerRow) -> std::cmp::Ordering,
    {
        let mut rows = self.rows.clone();
        rows.sort_by(compare);
        rows.truncate(n);
        rows
    }
}

/// Revenue and sales count per seller
pub fn aggregate_by_seller(records: &[SaleRecord]) -> SellerTable {
    let rows = group_by(records, |record| record.seller.clone())
        .into_iter()
        .map(|group| SellerRow {
            seller: group.key,
            revenue: Measure::Sum.finalize(&group.state),
            sales: group.state.count,
        })
        .collect();

    SellerTable { rows }
}
