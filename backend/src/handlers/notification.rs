//! Push notification HTTP handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::external::push::WebPushClient;
use crate::middleware::CurrentUser;
use crate::services::notification::{
    BroadcastInput, NotificationService, SubscribeInput, UnsubscribeInput,
};
use crate::AppState;

fn notification_service(state: &AppState) -> NotificationService {
    let push = WebPushClient::new(&state.config.push);
    NotificationService::new(state.db.clone(), push)
}

/// VAPID public key for the browser's `applicationServerKey`
pub async fn get_vapid_public_key(State(state): State<AppState>) -> impl IntoResponse {
    let service = notification_service(&state);

    (
        StatusCode::OK,
        Json(serde_json::json!({ "public_key": service.vapid_public_key() })),
    )
}

/// Register a push subscription
pub async fn subscribe(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<SubscribeInput>,
) -> impl IntoResponse {
    let service = notification_service(&state);

    match service.subscribe(current_user.0.user_id, input).await {
        Ok(subscription) => (StatusCode::CREATED, Json(subscription)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Remove one or all push subscriptions
pub async fn unsubscribe(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<UnsubscribeInput>,
) -> impl IntoResponse {
    let service = notification_service(&state);

    match service.unsubscribe(current_user.0.user_id, input).await {
        Ok(removed) => {
            (StatusCode::OK, Json(serde_json::json!({ "removed": removed }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// List the current user's push subscriptions
pub async fn list_subscriptions(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> impl IntoResponse {
    let service = notification_service(&state);

    match service.list_subscriptions(current_user.0.user_id).await {
        Ok(subscriptions) => (
            StatusCode::OK,
            Json(serde_json::json!({ "subscriptions": subscriptions })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Broadcast a notification to every subscription of the user
pub async fn send_notification(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<BroadcastInput>,
) -> impl IntoResponse {
    let service = notification_service(&state);

    match service.broadcast(current_user.0.user_id, input).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Recent notification bodies for the current user
pub async fn get_notification_history(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> impl IntoResponse {
    let service = notification_service(&state);

    match service.notification_history(current_user.0.user_id).await {
        Ok(entries) => {
            (StatusCode::OK, Json(serde_json::json!({ "notifications": entries }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}
