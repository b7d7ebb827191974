use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, error};

use crate::{models::metrics::AnalyticsMetric, utils::errors::dashboard_error::DashboardError};

use super::{AnalyticsService, AnalyticsSource};

pub const DASHBOARD_ANALYTICS_PATH: &str = "/analytics/dashboard";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardAnalyticsResponse {
    pub status: u16,
    pub data: Option<Vec<AnalyticsMetric>>,
}

impl DashboardAnalyticsResponse {
    pub fn ok(metrics: Vec<AnalyticsMetric>) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            data: Some(metrics),
        }
    }

    /// Metrics to aggregate, present only for a 200 response carrying data.
    pub fn into_metrics(self) -> Option<Vec<AnalyticsMetric>> {
        if self.status == StatusCode::OK.as_u16() {
            self.data
        } else {
            None
        }
    }
}

/// The source answers either with a bare metric list or wrapped in `data`.
#[derive(Deserialize)]
#[serde(untagged)]
enum AnalyticsPayload {
    Metrics(Vec<AnalyticsMetric>),
    Envelope { data: Option<Vec<AnalyticsMetric>> },
}

impl AnalyticsPayload {
    fn into_data(self) -> Option<Vec<AnalyticsMetric>> {
        match self {
            AnalyticsPayload::Metrics(metrics) => Some(metrics),
            AnalyticsPayload::Envelope { data } => data,
        }
    }
}

impl AnalyticsService {
    fn dashboard_url(&self) -> String {
        format!("{}{}", self.base_url, DASHBOARD_ANALYTICS_PATH)
    }
}

#[async_trait]
impl AnalyticsSource for AnalyticsService {
    async fn get_dashboard_analytics(&self) -> Result<DashboardAnalyticsResponse, DashboardError> {
        let url = self.dashboard_url();
        debug!("Fetching dashboard analytics from {}", url);

        let mut request = self.client.get(&url);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await.map_err(|e| {
            error!("Error fetching dashboard analytics: {}", e);
            DashboardError::from(e)
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!("Dashboard analytics answered with status {}", status);
            return Ok(DashboardAnalyticsResponse {
                status: status.as_u16(),
                data: None,
            });
        }

        let payload: AnalyticsPayload = response.json().await.map_err(|e| {
            error!("Error decoding dashboard analytics: {}", e);
            DashboardError::from(e)
        })?;

        Ok(DashboardAnalyticsResponse {
            status: status.as_u16(),
            data: payload.into_data(),
        })
    }
}
