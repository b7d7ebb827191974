use std::{sync::Arc, time::Duration};

use chrono::Utc;

use crate::{
    external_services::analytics::AnalyticsService,
    models::currency::{currency_for_locale, Currency},
    services::{
        auth_service::StaticAuthProvider, referral_service::ReferralService,
        settings_service::SettingsService,
    },
    settings::Settings,
    utils::errors::dashboard_error::DashboardError,
};

pub struct ServiceContainer {
    pub referral_service: Arc<ReferralService>,
    pub settings_service: Arc<SettingsService>,
    pub auth_provider: Arc<StaticAuthProvider>,
    pub currency: &'static Currency,
}

impl ServiceContainer {
    pub fn new(settings: &Settings) -> Result<Self, DashboardError> {
        let analytics = Arc::new(AnalyticsService::new(
            settings.analytics_api_url.clone(),
            settings.analytics_api_key.clone(),
            settings.analytics_timeout(),
        )?);
        let referral_service = Arc::new(ReferralService::new(
            analytics,
            settings.referral_base_url.clone(),
            settings.analytics_timeout(),
            Utc::now(),
        ));
        let settings_service = Arc::new(SettingsService::new(Duration::from_millis(
            settings.settings_save_delay_ms,
        )));
        let auth_provider = Arc::new(StaticAuthProvider::new(
            settings.auth_token.clone(),
            settings.demo_user(),
        ));

        Ok(Self {
            referral_service,
            settings_service,
            auth_provider,
            currency: currency_for_locale(&settings.locale),
        })
    }
}
