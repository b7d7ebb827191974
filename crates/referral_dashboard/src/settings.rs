use std::time::Duration;

use config::{Config, Environment};
use serde::Deserialize;

use crate::{
    models::{currency::DEFAULT_LOCALE, users::AuthenticatedUser},
    services::referral_service::DEFAULT_REFERRAL_BASE_URL,
};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub environment: Option<String>,
    pub port: Option<u16>,
    pub analytics_api_url: String,
    pub analytics_api_key: Option<String>,
    #[serde(default = "default_analytics_timeout_ms")]
    pub analytics_timeout_ms: u64,
    #[serde(default = "default_referral_base_url")]
    pub referral_base_url: String,
    #[serde(default = "default_settings_save_delay_ms")]
    pub settings_save_delay_ms: u64,
    pub auth_token: Option<String>,
    #[serde(default = "default_demo_user_id")]
    pub demo_user_id: String,
    #[serde(default = "default_demo_user_name")]
    pub demo_user_name: String,
    #[serde(default = "default_demo_user_email")]
    pub demo_user_email: String,
    #[serde(default)]
    pub demo_user_whatsapp_number: String,
    #[serde(default)]
    pub demo_user_whatsapp_channel_name: String,
    pub demo_user_referral_link: Option<String>,
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_referral_base_url() -> String {
    DEFAULT_REFERRAL_BASE_URL.to_string()
}

fn default_analytics_timeout_ms() -> u64 {
    10_000
}

fn default_settings_save_delay_ms() -> u64 {
    1000
}

fn default_demo_user_id() -> String {
    "123456".to_string()
}

fn default_demo_user_name() -> String {
    "Demo User".to_string()
}

fn default_demo_user_email() -> String {
    "demo@optisage.com".to_string()
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

impl Settings {
    pub fn is_production(&self) -> bool {
        self.environment.as_deref() == Some("PROD")
    }

    pub fn analytics_timeout(&self) -> Duration {
        Duration::from_millis(self.analytics_timeout_ms)
    }

    /// The user the configured auth token signs in as.
    pub fn demo_user(&self) -> AuthenticatedUser {
        AuthenticatedUser {
            id: self.demo_user_id.clone(),
            full_name: self.demo_user_name.clone(),
            email: self.demo_user_email.clone(),
            whatsapp_number: self.demo_user_whatsapp_number.clone(),
            whatsapp_channel_name: self.demo_user_whatsapp_channel_name.clone(),
            referral_link: self.demo_user_referral_link.clone(),
        }
    }
}

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let settings = Config::builder();
    let settings = settings.add_source(Environment::default());
    settings.build()?.try_deserialize()
}
