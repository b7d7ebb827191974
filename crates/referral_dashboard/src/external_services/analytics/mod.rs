use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::utils::errors::dashboard_error::DashboardError;

pub mod dashboard_analytics;

use dashboard_analytics::DashboardAnalyticsResponse;

/// Anything that can answer the dashboard analytics request.
#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    /// Returns the source status and metrics. Transport failures are errors;
    /// a non-200 status is returned as a response without data.
    async fn get_dashboard_analytics(&self) -> Result<DashboardAnalyticsResponse, DashboardError>;
}

pub struct AnalyticsService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl AnalyticsService {
    /// Every request made through this client is abandoned after `timeout`.
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, DashboardError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}
