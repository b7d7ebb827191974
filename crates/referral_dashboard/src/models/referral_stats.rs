use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use super::metrics::{AnalyticsMetric, MetricKind};

/// Currency units credited per referral point.
pub const POINTS_TO_CASH_RATE: u64 = 100;

/// Display-ready summary of the analytics metrics for one dashboard view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReferralStats {
    /// Number of people registered through the user's link.
    pub total_referrals: u64,
    /// Points accumulated from converted referrals.
    pub total_points: u64,
    /// Share of referrals that converted, in percent.
    pub conversion_rate: Decimal,
    /// Cash value reported by the source. Zero when the source omits it.
    pub total_amount: Decimal,
    pub growth_rate_referrals: Decimal,
    pub growth_rate_points: Decimal,
    pub growth_rate_conversion: Decimal,
}

impl ReferralStats {
    /// Builds a record from analytics metrics.
    ///
    /// Later entries win over earlier ones for the same field. Unknown metric
    /// names are skipped and missing metrics stay at zero.
    ///
    /// `total amount` also overwrites `growth_rate_points` with its own growth
    /// value, matching what existing API consumers expect.
    pub fn aggregate<'a, I>(metrics: I) -> Self
    where
        I: IntoIterator<Item = &'a AnalyticsMetric>,
    {
        let mut stats = ReferralStats::default();

        for metric in metrics {
            let kind = match metric.metric.parse::<MetricKind>() {
                Ok(kind) => kind,
                Err(e) => {
                    debug!("Skipping metric: {}", e);
                    continue;
                }
            };

            match kind {
                MetricKind::TotalReferrals => {
                    stats.total_referrals = to_count(metric.value);
                    stats.growth_rate_referrals = metric.month_growth;
                }
                MetricKind::TotalPoints => {
                    stats.total_points = to_count(metric.value);
                    stats.growth_rate_points = metric.month_growth;
                }
                MetricKind::ConversionRate => {
                    stats.conversion_rate = metric.value;
                    stats.growth_rate_conversion = metric.month_growth;
                }
                MetricKind::TotalAmount => {
                    stats.total_amount = metric.value;
                    stats.growth_rate_points = metric.month_growth;
                }
            }
        }

        stats
    }

    /// Cash value to show: the reported amount, or points converted at
    /// [`POINTS_TO_CASH_RATE`] when the source reported none.
    pub fn display_amount(&self) -> Decimal {
        if !self.total_amount.is_zero() {
            return self.total_amount;
        }

        Decimal::from(self.total_points) * Decimal::from(POINTS_TO_CASH_RATE)
    }
}

/// Whole part of `value`, clamped to the `u64` range.
fn to_count(value: Decimal) -> u64 {
    if value.is_sign_negative() {
        return 0;
    }
    value.trunc().to_u64().unwrap_or(u64::MAX)
}
