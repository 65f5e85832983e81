// Offline report example
// Author: Gabriel Demetrios Lafis

use chrono::NaiveDate;
use sales_dashboard_engine::{
    data::{Column, Region, SaleRecord},
    processing::PredicateSet,
    report::{DashboardRequest, DashboardService, RawDataRequest},
    source::{MemorySource, SalesQuery},
};

fn sale(
    product: &str,
    category: &str,
    price: f64,
    date: (i32, u32, u32),
    seller: &str,
    location: &str,
) -> Result<SaleRecord, Box<dyn std::error::Error>> {
    let (year, month, day) = date;
    let purchase_date = NaiveDate::from_ymd_opt(year, month, day).ok_or("invalid date")?;

    Ok(SaleRecord {
        product: product.to_string(),
        category: category.to_string(),
        price,
        freight: price * 0.05,
        purchase_date,
        seller: seller.to_string(),
        location: location.to_string(),
        rating: 5,
        payment_type: "cartao_credito".to_string(),
        installments: 1,
        lat: 0.0,
        lon: 0.0,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create an in-memory source
    let source = MemorySource::new(vec![
        sale("Smartphone", "eletronicos", 2500.0, (2021, 3, 2), "Ana", "SP")?,
        sale("Cama king", "moveis", 900.0, (2021, 1, 15), "Bruno", "RJ")?,
        sale("Mesa de jantar", "moveis", 450.0, (2021, 12, 31), "Bruno", "BA")?,
        sale("Modelagem preditiva", "livros", 100.0, (2020, 5, 10), "Ana", "SP")?,
        sale("TV", "eletronicos", 1200.0, (2022, 7, 7), "Carla", "SP")?,
    ]);
    let service = DashboardService::new(source);

    // Dashboard for the Southeast in 2021
    let query = SalesQuery::new(Some(Region::Sudeste), Some(2021))?;
    let page = service.dashboard(&DashboardRequest::new(query).with_top_sellers(3))?;

    println!("Receita: {}", page.revenue_label);
    println!("Quantidade de vendas: {}", page.sales_label);

    println!("\nReceita por categoria:");
    for row in page.report.revenue_by_category.iter() {
        println!("  {:<16} {:>10.2}", row.key, row.value);
    }

    println!("\nReceita mensal:");
    for row in page.report.revenue_by_month.iter() {
        println!("  {:<16} {:>10.2}", format!("{} {}", row.key.month_name(), row.key.year), row.value);
    }

    // Raw data: furniture only, three columns
    let request = RawDataRequest::new(PredicateSet::new().categories(["moveis"]))
        .with_columns(vec![Column::Product, Column::Price, Column::Seller]);
    let view = service.raw_data(&request)?;

    let (rows, columns) = view.shape();
    println!("\nA tabela possui {} linhas e {} colunas", rows, columns);
    print!("{}", String::from_utf8(view.to_csv()?)?);

    Ok(())
}
