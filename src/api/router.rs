use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{branches, crowd_data, health, predictions, visitor_logs};
use super::state::AppState;

/// Build the application router
pub fn router(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Wait-time predictions
        .route(
            "/api/v1/wait-time-predictions",
            post(predictions::create_prediction).get(predictions::list_predictions),
        )
        .route(
            "/api/v1/wait-time-predictions/:id",
            get(predictions::get_prediction)
                .put(predictions::update_prediction)
                .delete(predictions::delete_prediction),
        )
        .route(
            "/api/v1/wait-time-predictions/visitor/:visitor_id",
            get(predictions::list_predictions_by_visitor),
        )
        .route(
            "/api/v1/wait-time-predictions/branch/:branch_id",
            get(predictions::list_predictions_by_branch),
        )
        // Visitor logs
        .route("/api/v1/visitor-logs", post(visitor_logs::create_visitor_log))
        .route("/api/v1/visitor-logs/:id", get(visitor_logs::get_visitor_log))
        .route(
            "/api/v1/visitor-logs/branch/:branch_id",
            get(visitor_logs::list_visitor_logs_by_branch),
        )
        .route(
            "/api/v1/visitor-logs/branch/:branch_id/average-wait-time",
            get(visitor_logs::average_wait_time),
        )
        // Crowd data
        .route("/api/v1/crowd-data", post(crowd_data::create_crowd_data))
        .route(
            "/api/v1/crowd-data/branch/:branch_id",
            get(crowd_data::list_crowd_data_by_branch),
        )
        // Branches
        .route("/api/v1/branches", post(branches::create_branch))
        .route("/api/v1/branches/:id", get(branches::get_branch))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(state)
}
