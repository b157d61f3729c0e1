//! Call API handlers

use super::call_dto::{ApiError, CallResponse, MessageResponse, RegisterCallRequest, UpdateRowRequest};
use super::export::{render_csv, CSV_FILENAME};
use super::metrics_handler::{record_call_registered, record_rows_deleted, record_rows_updated};
use crate::application::{CallSeeder, CallService};
use crate::config::{Config, ExportConfig, PredictionConfig};
use crate::domain::call::{predict_from_log, CallStore, RestingFloorPrediction};
use crate::domain::shared::DomainError;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub call_store: Arc<dyn CallStore>,
    pub call_service: Arc<CallService>,
    pub seeder: Arc<CallSeeder>,
    pub export: ExportConfig,
    pub prediction: PredictionConfig,
}

impl AppState {
    pub fn new(call_store: Arc<dyn CallStore>, config: &Config) -> Self {
        let call_service = Arc::new(CallService::new(call_store.clone()));
        let seeder = CallSeeder::new(call_store.clone(), &config.seed.path)
            .with_write_lock(call_service.write_lock());

        Self {
            call_service,
            seeder: Arc::new(seeder),
            call_store,
            export: config.export,
            prediction: config.prediction,
        }
    }
}

/// Health check
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Recreate the table and load the seed travels
pub async fn generate_data(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    info!("API: Regenerating call log from {}", state.seeder.path().display());

    let rows = state.seeder.reseed().await?;

    Ok(Json(json!({
        "message": "Data generated successfully",
        "rows": rows,
    })))
}

/// Register a call from the demand floor to the destination floor
pub async fn call_elevator(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(body) = payload?;
    let req = RegisterCallRequest::from_json(&body)?;
    info!(
        "API: Calling elevator from floor {} to floor {}",
        req.demand_floor, req.destination_floor
    );

    state
        .call_service
        .register_call(req.demand_floor, req.destination_floor)
        .await?;
    record_call_registered();

    Ok(MessageResponse::new("Elevator called successfully"))
}

/// List every call record
pub async fn get_all_rows(State(state): State<AppState>) -> Result<Json<Vec<CallResponse>>, ApiError> {
    info!("API: Listing call records");

    let calls = state.call_store.get_all().await?;

    Ok(Json(calls.into_iter().map(CallResponse::from).collect()))
}

/// Update one or more fields of an existing record
pub async fn update_row(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(body) = payload?;
    let req = UpdateRowRequest::from_json(&body)?;
    info!("API: Updating row {} ({} fields)", req.id, req.fields.len());

    if !state.call_store.row_exists(req.id).await? {
        return Err(DomainError::row_not_found(req.id).into());
    }

    let updated = req.fields.len();
    state.call_store.update_fields(req.id, req.fields).await?;
    record_rows_updated(updated);

    Ok(MessageResponse::new(format!("Row {} updated successfully", req.id)))
}

/// Delete every record, keeping the table
pub async fn delete_all_rows(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    info!("API: Deleting all call records");

    let removed = state.call_store.delete_all().await?;
    record_rows_deleted(removed);

    Ok(MessageResponse::new("All rows deleted successfully"))
}

/// Export the call log as CSV
pub async fn export_csv(State(state): State<AppState>) -> Result<Response, ApiError> {
    info!("API: Exporting call records as CSV");

    let calls = state.call_store.get_all().await?;
    let csv_content = render_csv(&calls, state.export.include_call_datetime)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", CSV_FILENAME),
            ),
        ],
        csv_content,
    )
        .into_response())
}

/// Predict where the elevator should rest from the call history
pub async fn predict_resting_floor(
    State(state): State<AppState>,
) -> Result<Json<RestingFloorPrediction>, ApiError> {
    info!("API: Predicting resting floor");

    let calls = state.call_store.get_all().await?;
    let prediction = predict_from_log(
        &calls,
        state.prediction.recent_window,
        state.prediction.forgetting_factor,
    );

    Ok(Json(prediction))
}
