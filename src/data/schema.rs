// Column catalogue and region enumeration
// Author: Gabriel Demetrios Lafis

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DataError;

/// Kind of value stored in a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Text,
    Decimal,
    Integer,
    Date,
}

impl DataType {
    /// Whether range predicates over numbers apply to this kind
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Decimal | DataType::Integer)
    }
}

/// Attributes of a sale record, named as the remote API names them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    #[serde(rename = "Produto")]
    Product,
    #[serde(rename = "Categoria do Produto")]
    Category,
    #[serde(rename = "Preço")]
    Price,
    #[serde(rename = "Frete")]
    Freight,
    #[serde(rename = "Data da Compra")]
    PurchaseDate,
    #[serde(rename = "Vendedor")]
    Seller,
    #[serde(rename = "Local da compra")]
    Location,
    #[serde(rename = "Avaliação da compra")]
    Rating,
    #[serde(rename = "Tipo de pagamento")]
    PaymentType,
    #[serde(rename = "Quantidade de parcelas")]
    Installments,
    #[serde(rename = "lat")]
    Latitude,
    #[serde(rename = "lon")]
    Longitude,
}

impl Column {
    /// Every column, in the order the remote API returns them
    pub const ALL: [Column; 12] = [
        Column::Product,
        Column::Category,
        Column::Price,
        Column::Freight,
        Column::PurchaseDate,
        Column::Seller,
        Column::Location,
        Column::Rating,
        Column::PaymentType,
        Column::Installments,
        Column::Latitude,
        Column::Longitude,
    ];

    /// Wire name, used for JSON keys and CSV headers
    pub fn name(&self) -> &'static str {
        match self {
            Column::Product => "Produto",
            Column::Category => "Categoria do Produto",
            Column::Price => "Preço",
            Column::Freight => "Frete",
            Column::PurchaseDate => "Data da Compra",
            Column::Seller => "Vendedor",
            Column::Location => "Local da compra",
            Column::Rating => "Avaliação da compra",
            Column::PaymentType => "Tipo de pagamento",
            Column::Installments => "Quantidade de parcelas",
            Column::Latitude => "lat",
            Column::Longitude => "lon",
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Column::Product
            | Column::Category
            | Column::Seller
            | Column::Location
            | Column::PaymentType => DataType::Text,
            Column::Price | Column::Freight | Column::Latitude | Column::Longitude => {
                DataType::Decimal
            }
            Column::Rating | Column::Installments => DataType::Integer,
            Column::PurchaseDate => DataType::Date,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = DataError;

    /// Accepts the wire name, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Column::ALL
            .iter()
            .copied()
            .find(|column| column.name().to_lowercase() == wanted)
            .ok_or_else(|| DataError::UnknownColumn(s.to_string()))
    }
}

/// Geographic regions accepted by the remote API
///
/// `Brasil` is the whole country and is sent as an empty region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Brasil,
    CentroOeste,
    Nordeste,
    Norte,
    Sudeste,
    Sul,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::Brasil,
        Region::CentroOeste,
        Region::Nordeste,
        Region::Norte,
        Region::Sudeste,
        Region::Sul,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Region::Brasil => "Brasil",
            Region::CentroOeste => "Centro-Oeste",
            Region::Nordeste => "Nordeste",
            Region::Norte => "Norte",
            Region::Sudeste => "Sudeste",
            Region::Sul => "Sul",
        }
    }

    /// Value sent as the `regiao` query parameter
    pub fn query_value(&self) -> String {
        match self {
            Region::Brasil => String::new(),
            other => other.display_name().to_lowercase(),
        }
    }

    /// Region of a Brazilian state, given its two-letter abbreviation
    pub fn of_state(state: &str) -> Option<Region> {
        let region = match state.trim().to_uppercase().as_str() {
            "DF" | "GO" | "MT" | "MS" => Region::CentroOeste,
            "AL" | "BA" | "CE" | "MA" | "PB" | "PE" | "PI" | "RN" | "SE" => Region::Nordeste,
            "AC" | "AP" | "AM" | "PA" | "RO" | "RR" | "TO" => Region::Norte,
            "ES" | "MG" | "RJ" | "SP" => Region::Sudeste,
            "PR" | "RS" | "SC" => Region::Sul,
            _ => return None,
        };
        Some(region)
    }

    /// Whether a purchase location falls inside this region
    pub fn contains(&self, state: &str) -> bool {
        match self {
            Region::Brasil => true,
            region => Region::of_state(state) == Some(*region),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Region {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted.is_empty() {
            return Ok(Region::Brasil);
        }

        Region::ALL
            .iter()
            .copied()
            .find(|region| region.display_name().to_lowercase() == wanted)
            .ok_or_else(|| DataError::UnknownRegion(s.to_string()))
    }
}
