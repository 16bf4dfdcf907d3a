//! Reporting and dashboard HTTP handlers

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::middleware::CurrentUser;
use crate::services::reporting::ReportingService;
use crate::AppState;

/// Derived metric bundle for one project
pub async fn get_project_summary(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ReportingService::new(state.db.clone());

    match service
        .project_summary(current_user.0.user_id, project_id)
        .await
    {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Aggregate dashboard metrics for the current user
pub async fn get_dashboard_metrics(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> impl IntoResponse {
    let service = ReportingService::new(state.db.clone());

    match service.dashboard_metrics(current_user.0.user_id).await {
        Ok(metrics) => (StatusCode::OK, Json(metrics)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Gantt-style timeline over the user's projects
pub async fn get_project_timeline(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> impl IntoResponse {
    let service = ReportingService::new(state.db.clone());
    let today = Utc::now().date_naive();

    match service.project_timeline(current_user.0.user_id, today).await {
        Ok(timeline) => (StatusCode::OK, Json(timeline)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Export a project's costs as CSV
pub async fn export_costs_csv(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ReportingService::new(state.db.clone());

    match service
        .export_costs_csv(current_user.0.user_id, project_id)
        .await
    {
        Ok(csv_data) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            csv_data,
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
