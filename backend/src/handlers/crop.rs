//! Crop management HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::middleware::CurrentUser;
use crate::services::crop::{CropService, RecordCropInput};
use crate::AppState;

/// List crops for a project
pub async fn list_crops(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = CropService::new(state.db.clone());

    match service.list_crops(current_user.0.user_id, project_id).await {
        Ok(crops) => (StatusCode::OK, Json(serde_json::json!({ "crops": crops }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Record a new planting
pub async fn record_crop(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(project_id): Path<Uuid>,
    Json(input): Json<RecordCropInput>,
) -> impl IntoResponse {
    let service = CropService::new(state.db.clone());

    match service
        .record_crop(current_user.0.user_id, project_id, input)
        .await
    {
        Ok(crop) => (StatusCode::CREATED, Json(crop)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a planting record
pub async fn delete_crop(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path((project_id, crop_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    let service = CropService::new(state.db.clone());

    match service
        .delete_crop(current_user.0.user_id, project_id, crop_id)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
