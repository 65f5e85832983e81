// API routes configuration
// Author: Gabriel Demetrios Lafis

use actix_web::{web, HttpResponse, Responder};

use super::{handlers, ApiError};

/// Configure API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            // Extractor failures answer with the same JSON error body as the handlers
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                ApiError::Validation(err.to_string()).into()
            }))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                ApiError::Validation(err.to_string()).into()
            }))
            
            // Health check
            .route("/health", web::get().to(health_check))
            
            // Dashboard page
            .route("/dashboard", web::get().to(handlers::get_dashboard))
            
            // Raw data page
            .service(
                web::scope("/raw")
                    .route("", web::post().to(handlers::post_raw_data))
                    .route("/options", web::get().to(handlers::get_raw_options))
                    .route("/export", web::post().to(handlers::post_raw_export))
            )
    );
}

/// Health check handler
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
