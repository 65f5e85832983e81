// Pipeline tests: filtering, projection and aggregation
// Author: Gabriel Demetrios Lafis

mod common;

use common::{date, sale, sample_records};
use sales_dashboard_engine::{
    data::{Column, SaleRecord, Value},
    processing::{
        aggregate_by_category, aggregate_by_location, aggregate_by_month, aggregate_by_seller,
        apply_filters, distinct_values, format_number, FilterOptions, FilterProcessor, Measure,
        Metrics, Predicate, PredicateSet, ProcessingError, SelectTransform, YearMonth,
    },
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_empty_predicate_set_keeps_everything() {
    let records = sample_records();

    let result = apply_filters(&records, &PredicateSet::new()).unwrap();

    assert_eq!(result, records);
}

#[test]
fn test_empty_allowed_set_is_no_constraint() {
    let records = sample_records();
    let predicates = PredicateSet::new()
        .sellers(Vec::<String>::new())
        .price_between(None, None);

    let result = apply_filters(&records, &predicates).unwrap();

    assert_eq!(result.len(), records.len());
}

#[test]
fn test_filtered_records_satisfy_every_predicate() {
    let records = sample_records();
    let predicates = PredicateSet::new()
        .sellers(["Ana", "Carla"])
        .price_between(Some(60.0), Some(2000.0))
        .payment_types(["cartao_credito", "boleto"]);

    let result = apply_filters(&records, &predicates).unwrap();

    // Subset of the input, in input order
    let mut cursor = records.iter();
    for record in &result {
        assert!(cursor.any(|r| r == record));
        assert!(predicates.matches(record));
        assert!(record.seller == "Ana" || record.seller == "Carla");
        assert!(record.price >= 60.0 && record.price <= 2000.0);
    }

    let products: Vec<&str> = result.iter().map(|r| r.product.as_str()).collect();
    assert_eq!(products, vec!["Modelagem preditiva", "TV", "Carrinho controle remoto"]);
}

#[test]
fn test_filter_is_idempotent() {
    let records = sample_records();
    let predicates = PredicateSet::new()
        .categories(["livros", "moveis"])
        .rating_between(Some(3), None);

    let once = apply_filters(&records, &predicates).unwrap();
    let twice = apply_filters(&once, &predicates).unwrap();

    assert_eq!(once, twice);
}

#[test]
fn test_date_range_keeps_one_year() {
    let records = sample_records();
    let predicates = PredicateSet::new()
        .purchased_between(Some(date("2021-01-01")), Some(date("2021-12-31")));

    let result = apply_filters(&records, &predicates).unwrap();

    assert_eq!(result.len(), 4);
    assert!(result.iter().all(|r| r.year() == 2021));
}

#[test]
fn test_range_bounds_are_inclusive() {
    let records = sample_records();
    let predicates = PredicateSet::new()
        .price_between(Some(50.0), Some(100.0))
        .installments_between(Some(1), Some(1));

    let result = apply_filters(&records, &predicates).unwrap();

    let prices: Vec<f64> = result.iter().map(|r| r.price).collect();
    assert_eq!(prices, vec![100.0, 50.0, 80.0]);
}

#[test]
fn test_open_ended_ranges() {
    let records = sample_records();

    let expensive = apply_filters(&records, &PredicateSet::new().freight_between(Some(60.0), None)).unwrap();
    assert_eq!(expensive.len(), 2);

    let early = apply_filters(&records, &PredicateSet::new().purchased_between(None, Some(date("2020-12-31")))).unwrap();
    assert_eq!(early.len(), 2);
}

#[test]
fn test_invalid_predicates_are_rejected() {
    let records = sample_records();

    let inverted = PredicateSet::new().price_between(Some(500.0), Some(100.0));
    assert!(matches!(
        apply_filters(&records, &inverted),
        Err(ProcessingError::InvalidPredicate(_))
    ));

    let nan = PredicateSet::new().freight_between(Some(f64::NAN), None);
    assert!(matches!(
        apply_filters(&records, &nan),
        Err(ProcessingError::InvalidPredicate(_))
    ));

    let wrong_kind = PredicateSet::new().one_of(Column::Price, ["100"]);
    assert!(matches!(
        apply_filters(&records, &wrong_kind),
        Err(ProcessingError::InvalidPredicate(_))
    ));

    let text_range = PredicateSet::new().between(Column::Seller, Some(1.0), Some(2.0));
    assert!(matches!(
        apply_filters(&records, &text_range),
        Err(ProcessingError::InvalidPredicate(_))
    ));

    let inverted_dates = PredicateSet::new()
        .purchased_between(Some(date("2022-01-01")), Some(date("2021-01-01")));
    assert!(matches!(
        apply_filters(&records, &inverted_dates),
        Err(ProcessingError::InvalidPredicate(_))
    ));

    let date_on_number = PredicateSet::new().with(Predicate::DateBetween {
        column: Column::Price,
        start: None,
        end: None,
    });
    assert!(date_on_number.validate().is_err());
}

#[test]
fn test_filter_processor_keeps_predicates() {
    let predicates = PredicateSet::new().locations(["SP"]);
    let processor = FilterProcessor::new(predicates.clone());

    let result = processor.process(&sample_records()).unwrap();

    assert_eq!(processor.predicates(), &predicates);
    assert_eq!(result.len(), 3);
}

#[test]
fn test_predicates_from_json() {
    let json = r#"[
        {"kind": "one_of", "column": "Vendedor", "allowed": ["Bruno"]},
        {"kind": "between", "column": "Preço", "min": 500.0},
        {"kind": "date_between", "column": "Data da Compra", "start": "2021-01-01", "end": "2021-06-30"}
    ]"#;

    let predicates: PredicateSet = serde_json::from_str(json).unwrap();
    let result = apply_filters(&sample_records(), &predicates).unwrap();

    assert_eq!(predicates.predicates().len(), 3);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].product, "Cama king");
}

#[test]
fn test_select_projects_columns_after_filtering() {
    let records = sample_records();
    let filtered = apply_filters(&records, &PredicateSet::new().sellers(["Bruno"])).unwrap();

    let table = SelectTransform::new(vec![Column::Price, Column::Product, Column::PurchaseDate])
        .process(&filtered)
        .unwrap();

    assert_eq!(table.shape(), (2, 3));
    assert_eq!(table.columns, vec![Column::Price, Column::Product, Column::PurchaseDate]);
    assert_eq!(table.data[0].values[0], Value::Float(900.0));
    assert_eq!(table.data[0].values[1], Value::String("Cama king".to_string()));
    assert_eq!(table.data[0].values[2], Value::Date(date("2021-01-15")));
}

#[test]
fn test_select_rejects_empty_or_repeated_columns() {
    let records = sample_records();

    assert!(SelectTransform::new(vec![]).process(&records).is_err());
    assert!(SelectTransform::new(vec![Column::Seller, Column::Seller]).process(&records).is_err());
    assert!(SelectTransform::from_names(["Produto", "Nope"]).is_err());

    let by_name = SelectTransform::from_names(["vendedor", "Preço"]).unwrap();
    assert_eq!(by_name.columns(), &[Column::Seller, Column::Price]);
}

#[test]
fn test_category_tie_keeps_first_encountered() {
    let records = vec![
        sale("A", 100.0, "2021-01-01"),
        sale("A", 200.0, "2021-01-02"),
        sale("B", 300.0, "2021-01-03"),
    ];

    let table = aggregate_by_category(&records, Measure::Sum);

    let rows: Vec<(&str, f64)> = table.iter().map(|r| (r.key.as_str(), r.value)).collect();
    assert_eq!(rows, vec![("A", 300.0), ("B", 300.0)]);
}

#[test]
fn test_category_totals_are_conserved() {
    let records = sample_records();
    let price_total: f64 = records.iter().map(|r| r.price).sum();

    let revenue = aggregate_by_category(&records, Measure::Sum);
    let sales = aggregate_by_category(&records, Measure::Count);

    assert!(close(revenue.total(), price_total));
    assert!(close(sales.total(), records.len() as f64));
}

#[test]
fn test_ranked_tables_are_sorted_descending() {
    let records = sample_records();

    for measure in [Measure::Sum, Measure::Count] {
        let categories = aggregate_by_category(&records, measure);
        for pair in categories.rows.windows(2) {
            assert!(pair[0].value >= pair[1].value);
        }

        let locations = aggregate_by_location(&records, measure);
        for pair in locations.rows.windows(2) {
            assert!(pair[0].value >= pair[1].value);
        }
    }
}

#[test]
fn test_category_ranking() {
    let records = sample_records();

    let revenue = aggregate_by_category(&records, Measure::Sum);
    let keys: Vec<&str> = revenue.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["eletronicos", "moveis", "livros", "brinquedos"]);
    assert_eq!(revenue.get(&"eletronicos".to_string()), Some(3700.0));

    let sales = aggregate_by_category(&records, Measure::Count);
    let keys: Vec<&str> = sales.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["livros", "moveis", "eletronicos", "brinquedos"]);
}

#[test]
fn test_location_table_carries_coordinates() {
    let records = sample_records();

    let revenue = aggregate_by_location(&records, Measure::Sum);

    let names: Vec<&str> = revenue.iter().map(|r| r.key.name.as_str()).collect();
    assert_eq!(names, vec!["SP", "RJ", "BA", "RS", "MG"]);
    assert_eq!(revenue.rows[0].value, 3800.0);
    assert_eq!(revenue.rows[0].key.lat, -22.19);
    assert_eq!(revenue.rows[0].key.lon, -48.79);

    let sales = aggregate_by_location(&records, Measure::Count);
    let names: Vec<&str> = sales.iter().map(|r| r.key.name.as_str()).collect();
    assert_eq!(names, vec!["SP", "RJ", "MG", "BA", "RS"]);
    assert_eq!(sales.top(2).len(), 2);
    assert_eq!(sales.top(50).len(), 5);
}

#[test]
fn test_month_table_is_chronological_without_gaps() {
    let records = vec![
        sale("A", 30.0, "2022-03-15"),
        sale("A", 10.0, "2022-01-05"),
        sale("B", 20.0, "2022-01-28"),
    ];

    let table = aggregate_by_month(&records, Measure::Sum);

    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[0].key, YearMonth::new(2022, 1));
    assert_eq!(table.rows[0].value, 30.0);
    assert_eq!(table.rows[1].key, YearMonth::new(2022, 3));
    assert_eq!(table.rows[1].key.month_name(), "March");
}

#[test]
fn test_month_table_spans_years() {
    let records = sample_records();

    let sales = aggregate_by_month(&records, Measure::Count);

    let keys: Vec<(i32, u32)> = sales.iter().map(|r| (r.key.year, r.key.month)).collect();
    assert_eq!(
        keys,
        vec![(2020, 5), (2020, 11), (2021, 1), (2021, 3), (2021, 12), (2022, 7), (2023, 2)]
    );
    assert_eq!(sales.get(&YearMonth::new(2021, 3)), Some(2.0));
    assert_eq!(sales.max_value(), Some(2.0));
}

#[test]
fn test_seller_table_has_both_measures() {
    let records = sample_records();

    let sellers = aggregate_by_seller(&records);

    assert_eq!(sellers.len(), 4);
    let ana = sellers.get("Ana").unwrap();
    assert_eq!(ana.revenue, 2680.0);
    assert_eq!(ana.sales, 3);

    let top = sellers.top_by_revenue(3);
    let by_revenue: Vec<&str> = top.iter().map(|r| r.seller.as_str()).collect();
    assert_eq!(by_revenue, vec!["Ana", "Bruno", "Carla"]);

    let by_sales: Vec<String> = sellers.top_by_sales(10).into_iter().map(|r| r.seller).collect();
    assert_eq!(by_sales, vec!["Ana", "Bruno", "Carla", "Daniel"]);
}

#[test]
fn test_empty_records_give_empty_tables() {
    let records: Vec<SaleRecord> = Vec::new();

    assert!(aggregate_by_location(&records, Measure::Sum).is_empty());
    assert!(aggregate_by_month(&records, Measure::Count).is_empty());
    assert!(aggregate_by_category(&records, Measure::Sum).is_empty());
    assert!(aggregate_by_seller(&records).is_empty());
    assert_eq!(aggregate_by_category(&records, Measure::Sum).max_value(), None);
    assert_eq!(aggregate_by_category(&records, Measure::Count).total(), 0.0);
    assert_eq!(Metrics::from_records(&records), Metrics::default());
}

#[test]
fn test_distinct_values_and_filter_options() {
    let records = sample_records();

    assert_eq!(
        distinct_values(&records, Column::Seller),
        vec!["Ana", "Bruno", "Carla", "Daniel"]
    );
    assert!(distinct_values(&records, Column::Price).is_empty());

    let options = FilterOptions::from_records(&records);
    assert_eq!(options.locations, vec!["SP", "RJ", "MG", "BA", "RS"]);
    assert_eq!(options.first_purchase, Some(date("2020-05-10")));
    assert_eq!(options.last_purchase, Some(date("2023-02-14")));
    assert_eq!(options.columns.len(), 12);
}

#[test]
fn test_metrics_and_number_format() {
    let metrics = Metrics::from_records(&sample_records());

    assert_eq!(metrics.total_sales, 8);
    assert_eq!(metrics.revenue_label(), "R$ 5.31 mil");
    assert_eq!(metrics.sales_label(), "8.00");

    assert_eq!(format_number(999.0, ""), "999.00");
    assert_eq!(format_number(1500.0, "R$"), "R$ 1.50 mil");
    assert_eq!(format_number(2_500_000.0, "R$"), "R$ 2.50 milhões");
    assert_eq!(format_number(3_000_000_000.0, ""), "3000.00 milhões");
}

#[test]
fn test_negative_numbers_are_not_scaled() {
    // Only values of at least 1000 move to the next unit
    assert_eq!(format_number(-5000.0, ""), "-5000.00");
    assert_eq!(format_number(-2_500_000.0, "R$"), "R$ -2500000.00");
    assert_eq!(format_number(0.0, "R$"), "R$ 0.00");
}
