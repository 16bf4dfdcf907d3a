//! Route definitions for the FarmTrack platform

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // VAPID public key (public - needed before subscribing)
        .route(
            "/notifications/vapid-public-key",
            get(handlers::get_vapid_public_key),
        )
        // Protected routes - project management
        .nest("/projects", project_routes())
        // Protected routes - dashboard and reports
        .nest("/dashboard", dashboard_routes())
        // Protected routes - weather display
        .nest("/weather", weather_routes())
        // Protected routes - push notifications
        .nest("/notifications", notification_routes())
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
}

/// Project management routes (protected)
fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_projects).post(handlers::create_project))
        .route(
            "/:project_id",
            get(handlers::get_project)
                .put(handlers::update_project)
                .delete(handlers::delete_project),
        )
        .route("/:project_id/details", get(handlers::get_project_details))
        .route("/:project_id/summary", get(handlers::get_project_summary))
        // Costs
        .route(
            "/:project_id/costs",
            get(handlers::list_costs).post(handlers::record_cost),
        )
        .route("/:project_id/costs/export", get(handlers::export_costs_csv))
        .route("/:project_id/costs/:cost_id", delete(handlers::delete_cost))
        // Crops
        .route(
            "/:project_id/crops",
            get(handlers::list_crops).post(handlers::record_crop),
        )
        .route("/:project_id/crops/:crop_id", delete(handlers::delete_crop))
        // Harvests
        .route(
            "/:project_id/harvests",
            get(handlers::list_harvests).post(handlers::record_harvest),
        )
        .route(
            "/:project_id/harvests/:harvest_id",
            delete(handlers::delete_harvest),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Dashboard and reporting routes (protected)
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_dashboard_metrics))
        .route("/timeline", get(handlers::get_project_timeline))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Weather routes (protected)
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/current", get(handlers::fetch_current_weather))
        .route("/forecast", get(handlers::get_weather_forecast))
        .route("/snapshots", get(handlers::get_weather_snapshots))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Push notification routes (protected)
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/subscriptions",
            get(handlers::list_subscriptions)
                .post(handlers::subscribe)
                .delete(handlers::unsubscribe),
        )
        .route("/send", post(handlers::send_notification))
        .route("/history", get(handlers::get_notification_history))
        .route_layer(middleware::from_fn(auth_middleware))
}
