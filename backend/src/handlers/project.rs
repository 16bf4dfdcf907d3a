//! Project management HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::middleware::CurrentUser;
use crate::services::project::{CreateProjectInput, ProjectService, UpdateProjectInput};
use crate::AppState;
use shared::types::Pagination;

/// List the current user's projects
pub async fn list_projects(
    State(state): State<AppState>,
    current_user: CurrentUser,
    pagination: Option<Query<Pagination>>,
) -> impl IntoResponse {
    let service = ProjectService::new(state.db.clone());
    let pagination = pagination.map(|Query(p)| p).unwrap_or_default();

    match service.list_projects(current_user.0.user_id, &pagination).await {
        Ok(projects) => {
            (StatusCode::OK, Json(serde_json::json!({ "projects": projects }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Create a new project
pub async fn create_project(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateProjectInput>,
) -> impl IntoResponse {
    let service = ProjectService::new(state.db.clone());

    match service.create_project(current_user.0.user_id, input).await {
        Ok(project) => (StatusCode::CREATED, Json(project)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific project
pub async fn get_project(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ProjectService::new(state.db.clone());

    match service.get_project(current_user.0.user_id, project_id).await {
        Ok(project) => (StatusCode::OK, Json(project)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a project with its costs, crops, and harvests
pub async fn get_project_details(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ProjectService::new(state.db.clone());

    match service
        .get_project_details(current_user.0.user_id, project_id)
        .await
    {
        Ok(details) => (StatusCode::OK, Json(details)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a project
pub async fn update_project(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(project_id): Path<Uuid>,
    Json(input): Json<UpdateProjectInput>,
) -> impl IntoResponse {
    let service = ProjectService::new(state.db.clone());

    match service
        .update_project(current_user.0.user_id, project_id, input)
        .await
    {
        Ok(project) => (StatusCode::OK, Json(project)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a project and its records
pub async fn delete_project(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ProjectService::new(state.db.clone());

    match service.delete_project(current_user.0.user_id, project_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
