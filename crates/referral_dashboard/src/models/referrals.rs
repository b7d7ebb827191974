use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::time::minutes_between;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReferralStatus {
    /// Signed up through the link but has not subscribed yet.
    Registered,
    /// Made their first subscription.
    Completed,
}

/// A person who registered through the user's referral link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Referral {
    pub id: String,
    pub user_name: String,
    pub registration_date: DateTime<Utc>,
    pub status: ReferralStatus,
    points_earned: u64,
}

impl Referral {
    pub fn registered(id: &str, user_name: &str, registration_date: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            user_name: user_name.to_string(),
            registration_date,
            status: ReferralStatus::Registered,
            points_earned: 0,
        }
    }

    pub fn completed(
        id: &str,
        user_name: &str,
        registration_date: DateTime<Utc>,
        points_earned: u64,
    ) -> Self {
        Self {
            id: id.to_string(),
            user_name: user_name.to_string(),
            registration_date,
            status: ReferralStatus::Completed,
            points_earned,
        }
    }

    /// Points are only credited once the referral converts.
    pub fn points_earned(&self) -> u64 {
        match self.status {
            ReferralStatus::Registered => 0,
            ReferralStatus::Completed => self.points_earned,
        }
    }

    pub fn activity_description(&self) -> String {
        match self.status {
            ReferralStatus::Registered => format!("{} registered via your link", self.user_name),
            ReferralStatus::Completed => {
                format!("{} made their first subscription", self.user_name)
            }
        }
    }

    pub fn points_label(&self) -> String {
        match self.status {
            ReferralStatus::Registered => "0 points".to_string(),
            ReferralStatus::Completed => format!("+{} points", self.points_earned()),
        }
    }

    pub fn minutes_ago(&self, now: DateTime<Utc>) -> i64 {
        minutes_between(self.registration_date, now)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Completed,
    Pending,
}

/// A paid action made by a referred user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub amount: u64,
    pub date: DateTime<Utc>,
    pub status: TransactionStatus,
    pub points_earned: u64,
}

/// Demo referral history, timestamped relative to `now`.
pub fn sample_referrals(now: DateTime<Utc>) -> Vec<Referral> {
    vec![
        Referral::registered("1", "John D.", now - Duration::minutes(2)),
        Referral::completed("2", "Sarah M.", now - Duration::minutes(5), 50),
        Referral::registered("3", "Alex K.", now - Duration::minutes(12)),
    ]
}

/// Demo transaction history, timestamped relative to `now`.
pub fn sample_transactions(now: DateTime<Utc>) -> Vec<Transaction> {
    vec![Transaction {
        id: "1".to_string(),
        user_id: "2".to_string(),
        user_name: "Sarah M.".to_string(),
        amount: 200,
        date: now - Duration::minutes(5),
        status: TransactionStatus::Completed,
        points_earned: 50,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_referrals_earn_nothing() {
        let referral = Referral {
            status: ReferralStatus::Registered,
            points_earned: 30,
            ..Referral::registered("9", "Kim P.", Utc::now())
        };
        assert_eq!(referral.points_earned(), 0);
        assert_eq!(referral.points_label(), "0 points");
    }

    #[test]
    fn completed_referrals_describe_subscription() {
        let referral = Referral::completed("2", "Sarah M.", Utc::now(), 50);
        assert_eq!(
            referral.activity_description(),
            "Sarah M. made their first subscription"
        );
        assert_eq!(referral.points_label(), "+50 points");
    }

    #[test]
    fn samples_are_relative_to_now() {
        let now = Utc::now();
        let referrals = sample_referrals(now);

        assert_eq!(referrals.len(), 3);
        let minutes: Vec<i64> = referrals.iter().map(|r| r.minutes_ago(now)).collect();
        assert_eq!(minutes, vec![2, 5, 12]);
        assert_eq!(
            referrals[0].activity_description(),
            "John D. registered via your link"
        );

        let transactions = sample_transactions(now);
        assert_eq!(transactions[0].user_id, referrals[1].id);
        assert_eq!(transactions[0].points_earned, referrals[1].points_earned());
    }

    #[test]
    fn serializes_status_in_snake_case() {
        let json = serde_json::to_value(Referral::registered("1", "John D.", Utc::now())).unwrap();
        assert_eq!(json["status"], "registered");
        assert_eq!(json["userName"], "John D.");
    }
}
