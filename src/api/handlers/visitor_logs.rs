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
use crate::domain::visitor_log::VisitorLog;

/// Request body for recording a visit
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVisitorLogRequest {
    pub visitor_name: String,
    pub branch_id: String,
    #[serde(deserialize_with = "crate::domain::dates::deserialize_datetime")]
    pub check_in_time: DateTime<Utc>,
    #[serde(deserialize_with = "crate::domain::dates::deserialize_datetime")]
    pub service_start_time: DateTime<Utc>,
    pub wait_time_in_minutes: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorLogResponse {
    pub visitor_log_id: String,
    pub visitor_name: String,
    pub branch_id: String,
    pub check_in_time: DateTime<Utc>,
    pub service_start_time: DateTime<Utc>,
    pub wait_time_in_minutes: i32,
}

impl From<&VisitorLog> for VisitorLogResponse {
    fn from(log: &VisitorLog) -> Self {
        Self {
            visitor_log_id: log.id().to_string(),
            visitor_name: log.visitor_name().to_string(),
            branch_id: log.branch_id().to_string(),
            check_in_time: log.check_in_time(),
            service_start_time: log.service_start_time(),
            wait_time_in_minutes: log.wait_time_minutes(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageWaitTimeResponse {
    pub branch_id: String,
    pub average_wait_time: f64,
}

/// Record a visit
///
/// POST /api/v1/visitor-logs
pub async fn create_visitor_log(
    State(state): State<AppState>,
    Json(req): Json<CreateVisitorLogRequest>,
) -> Result<(StatusCode, Json<VisitorLogResponse>), ApiError> {
    state
        .repositories
        .branches
        .find_by_id(&req.branch_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Branch not found: {}", req.branch_id)))?;

    let log = VisitorLog::new(
        req.visitor_name,
        req.branch_id,
        req.check_in_time,
        req.service_start_time,
        req.wait_time_in_minutes,
    )
    .map_err(ApiError::bad_request)?;

    state.repositories.visitor_logs.create(&log).await?;

    Ok((StatusCode::CREATED, Json(VisitorLogResponse::from(&log))))
}

/// Get a visitor log by ID
///
/// GET /api/v1/visitor-logs/:id
pub async fn get_visitor_log(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VisitorLogResponse>, ApiError> {
    let log = state
        .repositories
        .visitor_logs
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Visitor log not found: {}", id)))?;

    Ok(Json(VisitorLogResponse::from(&log)))
}

/// List a branch's visitor logs, newest check-in first
///
/// GET /api/v1/visitor-logs/branch/:branch_id
pub async fn list_visitor_logs_by_branch(
    State(state): State<AppState>,
    Path(branch_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<VisitorLogResponse>>, ApiError> {
    let logs = state
        .repositories
        .visitor_logs
        .find_by_branch(&branch_id, query.page()?)
        .await?;

    Ok(Json(logs.iter().map(VisitorLogResponse::from).collect()))
}

/// Mean wait over a branch's whole history
///
/// GET /api/v1/visitor-logs/branch/:branch_id/average-wait-time
pub async fn average_wait_time(
    State(state): State<AppState>,
    Path(branch_id): Path<String>,
) -> Result<Json<AverageWaitTimeResponse>, ApiError> {
    let average = state
        .repositories
        .visitor_logs
        .average_wait_time(&branch_id)
        .await?
        .unwrap_or(0.0);

    Ok(Json(AverageWaitTimeResponse {
        branch_id,
        average_wait_time: average,
    }))
}
