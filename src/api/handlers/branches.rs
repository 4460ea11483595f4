use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::branch::Branch;

/// Request body for creating a branch
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranchRequest {
    pub branch_id: Option<String>,
    pub institution_id: Option<String>,
    pub name: String,
    pub address: Option<String>,
    pub capacity: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchResponse {
    pub branch_id: String,
    pub institution_id: Option<String>,
    pub name: String,
    pub address: Option<String>,
    pub capacity: i32,
}

impl From<&Branch> for BranchResponse {
    fn from(b: &Branch) -> Self {
        Self {
            branch_id: b.id.clone(),
            institution_id: b.institution_id.clone(),
            name: b.name.clone(),
            address: b.address.clone(),
            capacity: b.capacity,
        }
    }
}

/// Create a branch
///
/// POST /api/v1/branches
pub async fn create_branch(
    State(state): State<AppState>,
    Json(req): Json<CreateBranchRequest>,
) -> Result<(StatusCode, Json<BranchResponse>), ApiError> {
    let branch = Branch::new(
        req.branch_id,
        req.name,
        req.institution_id,
        req.address,
        req.capacity,
    )
    .map_err(ApiError::bad_request)?;

    if state.repositories.branches.find_by_id(&branch.id).await?.is_some() {
        return Err(ApiError::bad_request(format!("Branch {} already exists", branch.id)));
    }

    // A concurrent create can still win between the lookup and the insert;
    // the store reports that as a conflict.
    state.repositories.branches.create(&branch).await?;

    Ok((StatusCode::CREATED, Json(BranchResponse::from(&branch))))
}

/// Get a branch by ID
///
/// GET /api/v1/branches/:id
pub async fn get_branch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BranchResponse>, ApiError> {
    let branch = state
        .repositories
        .branches
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Branch not found: {}", id)))?;

    Ok(Json(BranchResponse::from(&branch)))
}
