use std::sync::Arc;

use apis::setup_routes;
use axum::Router;
use container::ServiceContainer;
use models::currency::Currency;
use services::{
    auth_service::AuthProvider, referral_service::ReferralService,
    settings_service::SettingsService,
};
use tower_http::cors::CorsLayer;
use tracing::info;
use utils::errors::dashboard_error::DashboardError;

pub mod apis;
pub mod container;
pub mod external_services;
pub mod models;
pub mod services;
pub mod settings;
pub mod utils;

pub struct AppState {
    pub referral_service: Arc<ReferralService>,
    pub settings_service: Arc<SettingsService>,
    pub auth_provider: Arc<dyn AuthProvider>,
    pub currency: &'static Currency,
}

impl From<ServiceContainer> for AppState {
    fn from(container: ServiceContainer) -> Self {
        Self {
            referral_service: container.referral_service,
            settings_service: container.settings_service,
            auth_provider: container.auth_provider,
            currency: container.currency,
        }
    }
}

/// Builds the services, loads the first stats record and returns the router.
///
/// The initial load is bounded by the analytics timeout, so an unresponsive
/// source delays startup by at most that long and the service starts empty.
pub async fn setup_router(settings: &settings::Settings) -> Result<Router, DashboardError> {
    let state = Arc::new(AppState::from(ServiceContainer::new(settings)?));

    let outcome = state.referral_service.fetch_stats().await;
    info!("Initial stats load: {:?}", outcome);

    Ok(setup_routes(state).layer(CorsLayer::permissive()))
}

pub fn init_tracing(settings: &settings::Settings) {
    let level = if settings.is_production() {
        tracing::Level::INFO
    } else {
        tracing::Level::DEBUG
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_names(true)
        .with_ansi(!settings.is_production())
        .init();
}
