use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::errors::dashboard_error::DashboardError;

/// One named measurement returned by the analytics source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsMetric {
    /// Metric name, e.g. `total referrals`.
    pub metric: String,
    /// Current value of the metric.
    pub value: Decimal,
    /// Month-over-month growth, in percent.
    pub month_growth: Decimal,
}

impl AnalyticsMetric {
    pub fn new(metric: &str, value: impl Into<Decimal>, month_growth: impl Into<Decimal>) -> Self {
        Self {
            metric: metric.to_string(),
            value: value.into(),
            month_growth: month_growth.into(),
        }
    }
}

/// The metric names the dashboard understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    TotalReferrals,
    TotalPoints,
    ConversionRate,
    TotalAmount,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::TotalReferrals => "total referrals",
            MetricKind::TotalPoints => "total points",
            MetricKind::ConversionRate => "conversion rate",
            MetricKind::TotalAmount => "total amount",
        }
    }
}

impl FromStr for MetricKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "total referrals" => Ok(MetricKind::TotalReferrals),
            "total points" => Ok(MetricKind::TotalPoints),
            "conversion rate" => Ok(MetricKind::ConversionRate),
            "total amount" => Ok(MetricKind::TotalAmount),
            other => Err(DashboardError::MalformedMetric(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(MetricKind::TotalReferrals)]
    #[case(MetricKind::TotalPoints)]
    #[case(MetricKind::ConversionRate)]
    #[case(MetricKind::TotalAmount)]
    fn parses_known_names(#[case] kind: MetricKind) {
        assert_eq!(kind.as_str().parse::<MetricKind>(), Ok(kind));
    }

    #[test]
    fn unknown_name_is_malformed() {
        assert_eq!(
            "active users".parse::<MetricKind>(),
            Err(DashboardError::MalformedMetric("active users".to_string()))
        );
    }

    #[test]
    fn deserializes_api_payload() {
        let metric: AnalyticsMetric = serde_json::from_str(
            r#"{"metric": "conversion rate", "value": 12.5, "month_growth": -3}"#,
        )
        .unwrap();
        assert_eq!(metric.metric, "conversion rate");
        assert_eq!(metric.value, Decimal::new(125, 1));
        assert_eq!(metric.month_growth, Decimal::from(-3));
    }
}
