//! API Router configuration

use super::call_handler::{
    call_elevator, delete_all_rows, export_csv, generate_data, get_all_rows, health_check,
    predict_resting_floor, update_row, AppState,
};
use super::metrics_handler::{metrics_handler, track_metrics};
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the API router
pub fn build_router(state: AppState, prometheus_handle: PrometheusHandle) -> Router {
    // Health check route
    let health_routes = Router::new().route("/health", get(health_check));

    // Call log routes
    let call_routes = Router::new()
        .route("/generate-data", get(generate_data))
        .route("/call-elevator", post(call_elevator))
        .route("/get-all-rows", get(get_all_rows))
        .route("/update-row", put(update_row))
        .route("/delete-all-rows", delete(delete_all_rows))
        .route("/export-csv", get(export_csv))
        .route("/predict-resting-floor", get(predict_resting_floor));

    // Metrics route (separate state)
    let metrics_routes = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(prometheus_handle);

    // Combine routes with state
    Router::new()
        .merge(health_routes)
        .merge(call_routes)
        .with_state(state)
        .merge(metrics_routes)
        .route_layer(middleware::from_fn(track_metrics))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
