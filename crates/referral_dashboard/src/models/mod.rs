pub mod currency;
pub mod dashboard;
pub mod metrics;
pub mod profiles;
pub mod referral_stats;
pub mod referrals;
pub mod users;
