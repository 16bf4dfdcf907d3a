//! Cost management HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::middleware::CurrentUser;
use crate::services::cost::{CostService, RecordCostInput};
use crate::AppState;

/// List costs for a project
pub async fn list_costs(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = CostService::new(state.db.clone());

    match service.list_costs(current_user.0.user_id, project_id).await {
        Ok(costs) => (StatusCode::OK, Json(serde_json::json!({ "costs": costs }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Record a new cost
pub async fn record_cost(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(project_id): Path<Uuid>,
    Json(input): Json<RecordCostInput>,
) -> impl IntoResponse {
    let service = CostService::new(state.db.clone());

    match service
        .record_cost(current_user.0.user_id, project_id, input)
        .await
    {
        Ok(cost) => (StatusCode::CREATED, Json(cost)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a cost
pub async fn delete_cost(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path((project_id, cost_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    let service = CostService::new(state.db.clone());

    match service
        .delete_cost(current_user.0.user_id, project_id, cost_id)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
