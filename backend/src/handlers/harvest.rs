//! Harvest management HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::middleware::CurrentUser;
use crate::services::harvest::{HarvestService, RecordHarvestInput};
use crate::AppState;

/// List harvests for a project
pub async fn list_harvests(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = HarvestService::new(state.db.clone());

    match service
        .list_harvests(current_user.0.user_id, project_id)
        .await
    {
        Ok(harvests) => {
            (StatusCode::OK, Json(serde_json::json!({ "harvests": harvests }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Record a new harvest
pub async fn record_harvest(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(project_id): Path<Uuid>,
    Json(input): Json<RecordHarvestInput>,
) -> impl IntoResponse {
    let service = HarvestService::new(state.db.clone());

    match service
        .record_harvest(current_user.0.user_id, project_id, input)
        .await
    {
        Ok(harvest) => (StatusCode::CREATED, Json(harvest)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a harvest
pub async fn delete_harvest(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path((project_id, harvest_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    let service = HarvestService::new(state.db.clone());

    match service
        .delete_harvest(current_user.0.user_id, project_id, harvest_id)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
