// API tests: routes, status codes and response bodies
// Author: Gabriel Demetrios Lafis

mod common;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use serde_json::{json, Value as JsonValue};

use common::sample_records;
use sales_dashboard_engine::{
    api::{configure, ApiState},
    report::{DashboardService, DEFAULT_EXPORT_NAME},
    source::{JsonFileSource, MemorySource},
};

fn state() -> ApiState {
    ApiState {
        service: DashboardService::new(MemorySource::new(sample_records())),
        default_export_name: DEFAULT_EXPORT_NAME.to_string(),
    }
}

fn unavailable_state() -> ApiState {
    ApiState {
        service: DashboardService::new(JsonFileSource::new("/nonexistent/produtos.json")),
        default_export_name: DEFAULT_EXPORT_NAME.to_string(),
    }
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(configure),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health() {
    let app = app!(state());

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: JsonValue = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_dashboard_by_year() {
    let app = app!(state());

    let req = test::TestRequest::get().uri("/api/v1/dashboard?ano=2021").to_request();
    let body: JsonValue = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["query"]["year"], 2021);
    assert_eq!(body["report"]["metrics"]["total_sales"], 4);
    assert_eq!(body["report"]["metrics"]["total_revenue"], 3900.0);
    assert_eq!(body["revenue_label"], "R$ 3.90 mil");
    assert_eq!(body["error"], JsonValue::Null);
}

#[actix_web::test]
async fn test_dashboard_region_and_sellers() {
    let app = app!(state());

    let req = test::TestRequest::get()
        .uri("/api/v1/dashboard?regiao=sudeste&vendedores=Ana,Carla&top=2")
        .to_request();
    let body: JsonValue = test::call_and_read_body_json(&app, req).await;

    // Ana in SP twice, Carla in MG and SP
    assert_eq!(body["report"]["metrics"]["total_sales"], 4);
    assert_eq!(body["top_sellers_by_revenue"].as_array().unwrap().len(), 2);
    assert_eq!(body["top_sellers_by_revenue"][0]["seller"], "Ana");
    assert_eq!(body["seller_options"].as_array().unwrap().len(), 4);
}

#[actix_web::test]
async fn test_dashboard_empty_parameters_mean_everything() {
    let app = app!(state());

    let req = test::TestRequest::get().uri("/api/v1/dashboard?regiao=&ano=").to_request();
    let body: JsonValue = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["report"]["metrics"]["total_sales"], 8);
}

#[actix_web::test]
async fn test_dashboard_bad_parameters() {
    let app = app!(state());

    for uri in [
        "/api/v1/dashboard?ano=2019",
        "/api/v1/dashboard?ano=dois-mil",
        "/api/v1/dashboard?regiao=atlantida",
        "/api/v1/dashboard?top=1",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);

        let body: JsonValue = test::read_body_json(resp).await;
        assert!(body["error"].is_string(), "{}", uri);
    }
}

#[actix_web::test]
async fn test_dashboard_undecodable_query_is_json_error() {
    let app = app!(state());

    let req = test::TestRequest::get().uri("/api/v1/dashboard?top=abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: JsonValue = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().starts_with("Validation error"));
}

#[actix_web::test]
async fn test_dashboard_unavailable_source_reports_error() {
    let app = app!(unavailable_state());

    let req = test::TestRequest::get().uri("/api/v1/dashboard").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: JsonValue = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
    assert_eq!(body["report"]["metrics"]["total_sales"], 0);
}

#[actix_web::test]
async fn test_raw_options() {
    let app = app!(state());

    let req = test::TestRequest::get().uri("/api/v1/raw/options").to_request();
    let body: JsonValue = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["sellers"], json!(["Ana", "Bruno", "Carla", "Daniel"]));
    assert_eq!(body["columns"].as_array().unwrap().len(), 12);
    assert_eq!(body["columns"][2], "Preço");
    assert_eq!(body["first_purchase"], "2020-05-10");
}

#[actix_web::test]
async fn test_raw_options_unavailable_source() {
    let app = app!(unavailable_state());

    let req = test::TestRequest::get().uri("/api/v1/raw/options").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}

#[actix_web::test]
async fn test_raw_data() {
    let app = app!(state());

    let req = test::TestRequest::post()
        .uri("/api/v1/raw")
        .set_json(json!({
            "predicates": [
                {"kind": "one_of", "column": "Categoria do Produto", "allowed": ["livros"]},
                {"kind": "between", "column": "Avaliação da compra", "min": 4}
            ],
            "columns": ["Produto", "Vendedor"]
        }))
        .to_request();
    let body: JsonValue = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["shape"], json!({"rows": 2, "columns": 2}));
    assert_eq!(body["columns"], json!(["Produto", "Vendedor"]));
    assert_eq!(
        body["rows"],
        json!([
            {"Produto": "Modelagem preditiva", "Vendedor": "Ana"},
            {"Produto": "Dashboards com Power BI", "Vendedor": "Daniel"}
        ])
    );
    assert_eq!(body["error"], JsonValue::Null);
}

#[actix_web::test]
async fn test_raw_data_invalid_predicate() {
    let app = app!(state());

    let req = test::TestRequest::post()
        .uri("/api/v1/raw")
        .set_json(json!({
            "predicates": [{"kind": "between", "column": "Frete", "min": 50.0, "max": 10.0}]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: JsonValue = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("Frete"));
}

#[actix_web::test]
async fn test_raw_data_undecodable_body_is_json_error() {
    let app = app!(state());

    for body in [
        json!({"predicates": [{"kind": "between", "column": "Frete", "min": "x"}]}),
        json!({"columns": ["Cor do produto"]}),
    ] {
        let req = test::TestRequest::post().uri("/api/v1/raw").set_json(&body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", body);

        let error: JsonValue = test::read_body_json(resp).await;
        assert!(error["error"].is_string(), "{}", body);
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/raw/export")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error: JsonValue = test::read_body_json(resp).await;
    assert!(error["error"].is_string());
}

#[actix_web::test]
async fn test_raw_data_unavailable_source() {
    let app = app!(unavailable_state());

    let req = test::TestRequest::post()
        .uri("/api/v1/raw")
        .set_json(json!({}))
        .to_request();
    let body: JsonValue = test::call_and_read_body_json(&app, req).await;

    assert!(body["error"].is_string());
    assert_eq!(body["shape"], json!({"rows": 0, "columns": 12}));
    assert_eq!(body["options"]["columns"].as_array().unwrap().len(), 12);
}

#[actix_web::test]
async fn test_export_csv() {
    let app = app!(state());

    let req = test::TestRequest::post()
        .uri("/api/v1/raw/export?file=vendas_bruno")
        .set_json(json!({
            "predicates": [{"kind": "one_of", "column": "Vendedor", "allowed": ["Bruno"]}],
            "columns": ["Produto", "Preço", "Data da Compra"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/csv; charset=utf-8"
    );
    let disposition = resp.headers().get(header::CONTENT_DISPOSITION).unwrap().to_str().unwrap();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("vendas_bruno.csv"));

    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Produto,Preço,Data da Compra",
            "Cama king,900,2021-01-15",
            "Mesa de jantar,450,2021-12-31",
        ]
    );
}

#[actix_web::test]
async fn test_export_default_file_name() {
    let app = app!(state());

    let req = test::TestRequest::post()
        .uri("/api/v1/raw/export")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp.headers().get(header::CONTENT_DISPOSITION).unwrap().to_str().unwrap();
    assert!(disposition.contains("dados.csv"));
}

#[actix_web::test]
async fn test_export_unavailable_source() {
    let app = app!(unavailable_state());

    let req = test::TestRequest::post()
        .uri("/api/v1/raw/export")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}
