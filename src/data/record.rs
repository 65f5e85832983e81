// Sale record model
// Author: Gabriel Demetrios Lafis

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Column, DataError, Value};

/// Textual format of `Data da Compra` in the remote API
pub const PURCHASE_DATE_FORMAT: &str = "%d/%m/%Y";

/// One sales transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleRecord {
    #[serde(rename = "Produto")]
    pub product: String,
    #[serde(rename = "Categoria do Produto")]
    pub category: String,
    #[serde(rename = "Preço")]
    pub price: f64,
    #[serde(rename = "Frete")]
    pub freight: f64,
    #[serde(rename = "Data da Compra")]
    pub purchase_date: NaiveDate,
    #[serde(rename = "Vendedor")]
    pub seller: String,
    #[serde(rename = "Local da compra")]
    pub location: String,
    #[serde(rename = "Avaliação da compra")]
    pub rating: i64,
    #[serde(rename = "Tipo de pagamento")]
    pub payment_type: String,
    #[serde(rename = "Quantidade de parcelas")]
    pub installments: i64,
    #[serde(rename = "lat")]
    pub lat: f64,
    #[serde(rename = "lon")]
    pub lon: f64,
}

/// Record as it arrives on the wire, before the date is parsed
#[derive(Debug, Clone, Deserialize)]
pub struct RawSaleRecord {
    #[serde(rename = "Produto")]
    pub product: String,
    #[serde(rename = "Categoria do Produto")]
    pub category: String,
    #[serde(rename = "Preço")]
    pub price: f64,
    #[serde(rename = "Frete")]
    pub freight: f64,
    #[serde(rename = "Data da Compra")]
    pub purchase_date: String,
    #[serde(rename = "Vendedor")]
    pub seller: String,
    #[serde(rename = "Local da compra")]
    pub location: String,
    #[serde(rename = "Avaliação da compra")]
    pub rating: i64,
    #[serde(rename = "Tipo de pagamento")]
    pub payment_type: String,
    #[serde(rename = "Quantidade de parcelas")]
    pub installments: i64,
    pub lat: f64,
    pub lon: f64,
}

impl RawSaleRecord {
    /// Parse the purchase date; `index` is the record's position in the response
    pub fn into_record(self, index: usize) -> Result<SaleRecord, DataError> {
        let purchase_date = NaiveDate::parse_from_str(self.purchase_date.trim(), PURCHASE_DATE_FORMAT)
            .map_err(|e| DataError::MalformedRecord {
                index,
                reason: format!("invalid purchase date '{}': {}", self.purchase_date, e),
            })?;

        Ok(SaleRecord {
            product: self.product,
            category: self.category,
            price: self.price,
            freight: self.freight,
            purchase_date,
            seller: self.seller,
            location: self.location,
            rating: self.rating,
            payment_type: self.payment_type,
            installments: self.installments,
            lat: self.lat,
            lon: self.lon,
        })
    }
}

impl SaleRecord {
    /// Text value of a column, `None` for non-text columns
    pub fn text(&self, column: Column) -> Option<&str> {
        match column {
            Column::Product => Some(&self.product),
            Column::Category => Some(&self.category),
            Column::Seller => Some(&self.seller),
            Column::Location => Some(&self.location),
            Column::PaymentType => Some(&self.payment_type),
            _ => None,
        }
    }

    /// Numeric value of a column, `None` for text and date columns
    pub fn number(&self, column: Column) -> Option<f64> {
        match column {
            Column::Price => Some(self.price),
            Column::Freight => Some(self.freight),
            Column::Latitude => Some(self.lat),
            Column::Longitude => Some(self.lon),
            Column::Rating => Some(self.rating as f64),
            Column::Installments => Some(self.installments as f64),
            _ => None,
        }
    }

    /// Date value of a column, `None` for everything but the purchase date
    pub fn date(&self, column: Column) -> Option<NaiveDate> {
        match column {
            Column::PurchaseDate => Some(self.purchase_date),
            _ => None,
        }
    }

    /// Value of a column for a projected table
    pub fn value(&self, column: Column) -> Value {
        match column {
            Column::Product => Value::String(self.product.clone()),
            Column::Category => Value::String(self.category.clone()),
            Column::Price => Value::Float(self.price),
            Column::Freight => Value::Float(self.freight),
            Column::PurchaseDate => Value::Date(self.purchase_date),
            Column::Seller => Value::String(self.seller.clone()),
            Column::Location => Value::String(self.location.clone()),
            Column::Rating => Value::Integer(self.rating),
            Column::PaymentType => Value::String(self.payment_type.clone()),
            Column::Installments => Value::Integer(self.installments),
            Column::Latitude => Value::Float(self.lat),
            Column::Longitude => Value::Float(self.lon),
        }
    }

    pub fn year(&self) -> i32 {
        self.purchase_date.year()
    }

    pub fn month(&self) -> u32 {
        self.purchase_date.month()
    }
}
