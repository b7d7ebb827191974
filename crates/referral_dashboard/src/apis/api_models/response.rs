use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{models::referral_stats::ReferralStats, services::referral_service::FetchOutcome};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RefreshStatsResponse {
    /// Whether the record was replaced or the previous one kept.
    pub outcome: FetchOutcome,
    pub stats: ReferralStats,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReferralLinkResponse {
    pub link: String,
}
