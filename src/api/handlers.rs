// API request handlers
// Author: Gabriel Demetrios Lafis

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Responder};
use log::info;

use crate::report::{export_file_name, DashboardService, RawDataRequest};
use crate::source::SourceError;
use super::{models::*, ApiError};

/// Shared state of the API handlers
#[derive(Clone)]
pub struct ApiState {
    pub service: DashboardService,
    pub default_export_name: String,
}

/// Run a blocking report job on actix's blocking thread pool
async fn run_blocking<T, E, F>(job: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    web::block(job)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(Into::into)
}

/// Dashboard page: metrics, summary tables and rankings
pub async fn get_dashboard(
    state: web::Data<ApiState>,
    params: web::Query<DashboardParams>,
) -> Result<impl Responder, ApiError> {
    let request = params.into_inner().into_request()?;
    let service = state.service.clone();

    let page = run_blocking(move || service.dashboard(&request)).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// Filter widget choices for the raw data page
pub async fn get_raw_options(
    state: web::Data<ApiState>,
) -> Result<impl Responder, ApiError> {
    let service = state.service.clone();

    let options = run_blocking(move || service.filter_options()).await?;

    Ok(HttpResponse::Ok().json(options))
}

/// Filtered, column-projected records
pub async fn post_raw_data(
    state: web::Data<ApiState>,
    payload: web::Json<RawDataRequest>,
) -> Result<impl Responder, ApiError> {
    let request = payload.into_inner();
    request.validate()?;
    let service = state.service.clone();

    let view = run_blocking(move || service.raw_data(&request)).await?;

    Ok(HttpResponse::Ok().json(RawDataResponse::from(view)))
}

/// Filtered, column-projected records as a CSV download
pub async fn post_raw_export(
    state: web::Data<ApiState>,
    params: web::Query<ExportParams>,
    payload: web::Json<RawDataRequest>,
) -> Result<impl Responder, ApiError> {
    let request = payload.into_inner();
    request.validate()?;
    let service = state.service.clone();

    let view = run_blocking(move || service.raw_data(&request)).await?;
    if let Some(message) = &view.error {
        return Err(ApiError::Source(SourceError::SourceUnavailable(message.clone())));
    }

    let csv = view.to_csv()?;
    let file_name = export_file_name(
        params.file.as_deref().unwrap_or(&state.default_export_name),
    );
    info!("Exporting {} rows as {}", view.table.len(), file_name);

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file_name)],
        })
        .body(csv))
}
