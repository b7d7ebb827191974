use std::sync::Arc;

use axum::{middleware, Router};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_scalar::{Scalar, Servable};

use crate::AppState;

pub mod api_models;
pub mod dashboard_handlers;
pub mod middlewares;
pub mod settings_handlers;

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "dashboard", description = "Referral stats and activity"),
        (name = "settings", description = "Profile and notification settings")
    )
)]
pub struct ApiDoc;

pub fn setup_routes(app_state: Arc<AppState>) -> Router {
    let api_doc = ApiDoc::openapi();

    let dashboard_router = OpenApiRouter::new()
        .routes(routes!(dashboard_handlers::get_dashboard_summary))
        .routes(routes!(dashboard_handlers::get_stats))
        .routes(routes!(dashboard_handlers::refresh_stats))
        .routes(routes!(dashboard_handlers::get_referrals))
        .routes(routes!(dashboard_handlers::get_transactions))
        .routes(routes!(dashboard_handlers::get_referral_link));

    let settings_router = OpenApiRouter::new()
        .routes(routes!(
            settings_handlers::get_profile,
            settings_handlers::update_profile
        ))
        .routes(routes!(
            settings_handlers::get_notifications,
            settings_handlers::update_notifications
        ));

    let dashboard_router =
        OpenApiRouter::with_openapi(api_doc.clone()).nest("/dashboard", dashboard_router);
    let settings_router =
        OpenApiRouter::with_openapi(api_doc.clone()).nest("/settings", settings_router);

    let router = OpenApiRouter::new()
        .merge(dashboard_router)
        .merge(settings_router);

    let (api_router, api_openapi) = OpenApiRouter::new()
        .nest("/api/v1", router)
        .split_for_parts();

    let api_router = api_router.route_layer(middleware::from_fn_with_state(
        app_state.clone(),
        middlewares::security::require_user,
    ));

    Router::new()
        .merge(Scalar::with_url("/docs", api_openapi))
        .merge(api_router)
        .with_state(app_state)
}
