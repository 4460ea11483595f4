use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PageQuery;
use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::crowd::CrowdSample;

/// Request body for recording an occupancy reading
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCrowdDataRequest {
    pub branch_id: String,
    #[serde(deserialize_with = "crate::domain::dates::deserialize_datetime")]
    pub timestamp: DateTime<Utc>,
    pub current_crowd_count: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrowdDataResponse {
    pub crowd_data_id: String,
    pub branch_id: String,
    pub timestamp: DateTime<Utc>,
    pub current_crowd_count: i32,
}

impl From<&CrowdSample> for CrowdDataResponse {
    fn from(s: &CrowdSample) -> Self {
        Self {
            crowd_data_id: s.id.clone(),
            branch_id: s.branch_id.clone(),
            timestamp: s.recorded_at,
            current_crowd_count: s.crowd_count,
        }
    }
}

/// Record a crowd count
///
/// POST /api/v1/crowd-data
pub async fn create_crowd_data(
    State(state): State<AppState>,
    Json(req): Json<CreateCrowdDataRequest>,
) -> Result<(StatusCode, Json<CrowdDataResponse>), ApiError> {
    state
        .repositories
        .branches
        .find_by_id(&req.branch_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Branch not found: {}", req.branch_id)))?;

    let sample = CrowdSample::new(req.branch_id, req.timestamp, req.current_crowd_count)
        .map_err(ApiError::bad_request)?;

    state.repositories.crowd_samples.create(&sample).await?;

    Ok((StatusCode::CREATED, Json(CrowdDataResponse::from(&sample))))
}

/// List a branch's crowd counts, newest first
///
/// GET /api/v1/crowd-data/branch/:branch_id
pub async fn list_crowd_data_by_branch(
    State(state): State<AppState>,
    Path(branch_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<CrowdDataResponse>>, ApiError> {
    let samples = state
        .repositories
        .crowd_samples
        .find_by_branch(&branch_id, query.page()?)
        .await?;

    Ok(Json(samples.iter().map(CrowdDataResponse::from).collect()))
}
