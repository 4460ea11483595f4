use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::PageQuery;
use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::prediction::{PredictionUpdate, WaitTimePrediction};
use crate::forecast::PredictionRequest;

/// Wait-time prediction as returned to clients
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    pub wait_time_prediction_id: String,
    pub visitor_id: String,
    pub branch_id: String,
    pub visit_date: DateTime<Utc>,
    pub predicted_wait_time: f64,
    pub actual_wait_time: f64,
    pub accuracy: f64,
    pub predicted_at: DateTime<Utc>,
}

impl From<&WaitTimePrediction> for PredictionResponse {
    fn from(p: &WaitTimePrediction) -> Self {
        Self {
            wait_time_prediction_id: p.id().to_string(),
            visitor_id: p.visitor_id().to_string(),
            branch_id: p.branch_id().to_string(),
            visit_date: p.visit_date(),
            predicted_wait_time: p.predicted_wait_time(),
            actual_wait_time: p.actual_wait_time(),
            accuracy: p.accuracy(),
            predicted_at: p.predicted_at(),
        }
    }
}

fn to_responses(predictions: &[WaitTimePrediction]) -> Vec<PredictionResponse> {
    predictions.iter().map(PredictionResponse::from).collect()
}

/// Predict the wait for an upcoming visit
///
/// POST /api/v1/wait-time-predictions
pub async fn create_prediction(
    State(state): State<AppState>,
    Json(req): Json<PredictionRequest>,
) -> Result<(StatusCode, Json<PredictionResponse>), ApiError> {
    let prediction = state.predictions.predict(&req).await?;

    Ok((StatusCode::CREATED, Json(PredictionResponse::from(&prediction))))
}

/// Get a prediction by ID
///
/// GET /api/v1/wait-time-predictions/:id
pub async fn get_prediction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let prediction = state.predictions.get(&id).await?;

    Ok(Json(PredictionResponse::from(&prediction)))
}

/// List predictions, newest first
///
/// GET /api/v1/wait-time-predictions
pub async fn list_predictions(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<PredictionResponse>>, ApiError> {
    let predictions = state.predictions.list(query.page()?).await?;

    Ok(Json(to_responses(&predictions)))
}

/// List a visitor's predictions
///
/// GET /api/v1/wait-time-predictions/visitor/:visitor_id
pub async fn list_predictions_by_visitor(
    State(state): State<AppState>,
    Path(visitor_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<PredictionResponse>>, ApiError> {
    let predictions = state
        .predictions
        .list_by_visitor(&visitor_id, query.page()?)
        .await?;

    Ok(Json(to_responses(&predictions)))
}

/// List a branch's predictions
///
/// GET /api/v1/wait-time-predictions/branch/:branch_id
pub async fn list_predictions_by_branch(
    State(state): State<AppState>,
    Path(branch_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<PredictionResponse>>, ApiError> {
    let predictions = state
        .predictions
        .list_by_branch(&branch_id, query.page()?)
        .await?;

    Ok(Json(to_responses(&predictions)))
}

/// Partially update a prediction
///
/// PUT /api/v1/wait-time-predictions/:id
pub async fn update_prediction(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<PredictionUpdate>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let prediction = state.predictions.update(&id, update).await?;

    Ok(Json(PredictionResponse::from(&prediction)))
}

/// Delete a prediction
///
/// DELETE /api/v1/wait-time-predictions/:id
pub async fn delete_prediction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.predictions.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
