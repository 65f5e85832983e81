// Shared test fixtures
// Author: Gabriel Demetrios Lafis

#![allow(dead_code)]

use chrono::NaiveDate;
use serde_json::{json, Value as JsonValue};

use sales_dashboard_engine::data::SaleRecord;

/// Coordinates the remote API reports for each state
fn coordinates(location: &str) -> (f64, f64) {
    match location {
        "SP" => (-22.19, -48.79),
        "RJ" => (-22.25, -42.66),
        "MG" => (-18.1, -44.38),
        "BA" => (-13.29, -41.71),
        "RS" => (-30.17, -53.5),
        _ => (0.0, 0.0),
    }
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

/// A record in SP sold by Ana; override other fields with struct update syntax
pub fn sale(category: &str, price: f64, purchase_date: &str) -> SaleRecord {
    SaleRecord {
        product: "Cadeira de escritório".to_string(),
        category: category.to_string(),
        price,
        freight: 15.0,
        purchase_date: date(purchase_date),
        seller: "Ana".to_string(),
        location: "SP".to_string(),
        rating: 4,
        payment_type: "cartao_credito".to_string(),
        installments: 1,
        lat: -22.19,
        lon: -48.79,
    }
}

#[allow(clippy::too_many_arguments)]
fn full(
    product: &str,
    category: &str,
    price: f64,
    freight: f64,
    purchase_date: &str,
    seller: &str,
    location: &str,
    rating: i64,
    payment_type: &str,
    installments: i64,
) -> SaleRecord {
    let (lat, lon) = coordinates(location);
    SaleRecord {
        product: product.to_string(),
        category: category.to_string(),
        price,
        freight,
        purchase_date: date(purchase_date),
        seller: seller.to_string(),
        location: location.to_string(),
        rating,
        payment_type: payment_type.to_string(),
        installments,
        lat,
        lon,
    }
}

/// Eight records spanning 2020 to 2023, four sellers and five states
///
/// Revenue 5310; in 2021 four records and 3900.
pub fn sample_records() -> Vec<SaleRecord> {
    vec![
        full("Modelagem preditiva", "livros", 100.0, 5.0, "2020-05-10", "Ana", "SP", 5, "boleto", 1),
        full("Cama king", "moveis", 900.0, 40.0, "2021-01-15", "Bruno", "RJ", 3, "cartao_credito", 10),
        full("Smartphone", "eletronicos", 2500.0, 120.0, "2021-03-02", "Ana", "SP", 4, "cartao_credito", 12),
        full("Iniciando em programação", "livros", 50.0, 3.0, "2021-03-20", "Carla", "MG", 2, "boleto", 1),
        full("Mesa de jantar", "moveis", 450.0, 25.0, "2021-12-31", "Bruno", "BA", 5, "cartao_debito", 1),
        full("TV", "eletronicos", 1200.0, 60.0, "2022-07-07", "Carla", "SP", 1, "cartao_credito", 6),
        full("Carrinho controle remoto", "brinquedos", 80.0, 8.0, "2023-02-14", "Ana", "RS", 4, "boleto", 1),
        full("Dashboards com Power BI", "livros", 30.0, 2.0, "2020-11-30", "Daniel", "RJ", 5, "cupom", 1),
    ]
}

/// A record as the remote API encodes it
pub fn to_wire(record: &SaleRecord) -> JsonValue {
    json!({
        "Produto": record.product,
        "Categoria do Produto": record.category,
        "Preço": record.price,
        "Frete": record.freight,
        "Data da Compra": record.purchase_date.format("%d/%m/%Y").to_string(),
        "Vendedor": record.seller,
        "Local da compra": record.location,
        "Avaliação da compra": record.rating,
        "Tipo de pagamento": record.payment_type,
        "Quantidade de parcelas": record.installments,
        "lat": record.lat,
        "lon": record.lon,
    })
}

/// The sample records as a remote API body
pub fn sample_body() -> String {
    let items: Vec<JsonValue> = sample_records().iter().map(to_wire).collect();
    JsonValue::Array(items).to_string()
}
