use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{currency::Currency, referral_stats::ReferralStats, referrals::Referral};

/// One line of the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub referral_id: String,
    pub description: String,
    pub minutes_ago: i64,
    pub points_label: String,
}

impl ActivityEntry {
    pub fn from_referral(referral: &Referral, now: DateTime<Utc>) -> Self {
        Self {
            referral_id: referral.id.clone(),
            description: referral.activity_description(),
            minutes_ago: referral.minutes_ago(now),
            points_label: referral.points_label(),
        }
    }
}

/// Everything the dashboard view shows for the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub stats: ReferralStats,
    pub display_amount: Decimal,
    pub formatted_amount: String,
    pub currency: Currency,
    pub referral_link: String,
    pub recent_activity: Vec<ActivityEntry>,
    pub is_loading: bool,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn activity_entry_mirrors_referral() {
        let now = Utc::now();
        let referral = Referral::completed("2", "Sarah M.", now - Duration::minutes(5), 50);

        let entry = ActivityEntry::from_referral(&referral, now);

        assert_eq!(
            entry,
            ActivityEntry {
                referral_id: "2".to_string(),
                description: "Sarah M. made their first subscription".to_string(),
                minutes_ago: 5,
                points_label: "+50 points".to_string(),
            }
        );
    }
}
