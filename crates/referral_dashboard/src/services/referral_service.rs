use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info};
use utoipa::ToSchema;

use crate::{
    external_services::analytics::AnalyticsSource,
    models::{
        currency::Currency,
        dashboard::{ActivityEntry, DashboardSummary},
        referral_stats::ReferralStats,
        referrals::{sample_referrals, sample_transactions, Referral, Transaction},
        users::AuthenticatedUser,
    },
};

use super::clipboard_service::{copy_to_clipboard, Clipboard, CopyAcknowledgement};

pub const DEFAULT_REFERRAL_BASE_URL: &str = "https://optisage.com/ref";

/// Upper bound on one analytics round trip before the fetch gives up.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the shareable link for `identifier`. The identifier is used as given.
pub fn generate_referral_link(base_url: &str, identifier: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), identifier)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FetchOutcome {
    /// A fresh record replaced the previous one.
    Updated,
    /// The source gave nothing usable; the previous record stays.
    Retained,
}

/// Holds the loading flag up until the fetch finishes or its future is dropped.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn start(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Dashboard state for one user session: the current stats record, the
/// loading flag and the referral history.
pub struct ReferralService {
    analytics: Arc<dyn AnalyticsSource>,
    link_base_url: String,
    fetch_timeout: Duration,
    stats: RwLock<Arc<ReferralStats>>,
    is_loading: AtomicBool,
    fetch_lock: Mutex<()>,
    referrals: Vec<Referral>,
    transactions: Vec<Transaction>,
}

impl ReferralService {
    pub fn new(
        analytics: Arc<dyn AnalyticsSource>,
        link_base_url: String,
        fetch_timeout: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            analytics,
            link_base_url,
            fetch_timeout,
            stats: RwLock::new(Arc::new(ReferralStats::default())),
            is_loading: AtomicBool::new(false),
            fetch_lock: Mutex::new(()),
            referrals: sample_referrals(now),
            transactions: sample_transactions(now),
        }
    }

    pub async fn stats(&self) -> Arc<ReferralStats> {
        self.stats.read().await.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading.load(Ordering::SeqCst)
    }

    pub fn referrals(&self) -> &[Referral] {
        &self.referrals
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Pulls metrics from the analytics source and swaps in a new record.
    ///
    /// Failures never reach the caller: they are logged and the previous
    /// record stays in place. Concurrent calls run one after another, and a
    /// source that stops answering is abandoned after the fetch timeout.
    pub async fn fetch_stats(&self) -> FetchOutcome {
        let _serialised = self.fetch_lock.lock().await;
        let _loading = LoadingGuard::start(&self.is_loading);
        self.refresh_stats().await
    }

    async fn refresh_stats(&self) -> FetchOutcome {
        let request = self.analytics.get_dashboard_analytics();
        let response = match tokio::time::timeout(self.fetch_timeout, request).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                error!("Failed to fetch dashboard analytics: {}", e);
                return FetchOutcome::Retained;
            }
            Err(_) => {
                error!(
                    "Failed to fetch dashboard analytics: no answer within {:?}",
                    self.fetch_timeout
                );
                return FetchOutcome::Retained;
            }
        };

        let status = response.status;
        let Some(metrics) = response.into_metrics() else {
            error!(
                "Failed to fetch dashboard analytics: status {} without data",
                status
            );
            return FetchOutcome::Retained;
        };

        let stats = ReferralStats::aggregate(&metrics);
        info!(
            "Stats refreshed: {} referrals, {} points, {}% conversion",
            stats.total_referrals, stats.total_points, stats.conversion_rate
        );
        *self.stats.write().await = Arc::new(stats);
        FetchOutcome::Updated
    }

    pub fn generate_link(&self, identifier: &str) -> String {
        generate_referral_link(&self.link_base_url, identifier)
    }

    /// The link shown to `user`: their assigned link if the backend gave one.
    pub fn link_for(&self, user: &AuthenticatedUser) -> String {
        user.referral_link
            .clone()
            .unwrap_or_else(|| self.generate_link(&user.id))
    }

    pub async fn copy_link(
        &self,
        user: &AuthenticatedUser,
        clipboard: &dyn Clipboard,
    ) -> Option<CopyAcknowledgement> {
        copy_to_clipboard(clipboard, &self.link_for(user)).await
    }

    pub async fn dashboard_summary(
        &self,
        user: &AuthenticatedUser,
        currency: &Currency,
        now: DateTime<Utc>,
    ) -> DashboardSummary {
        let stats = self.stats().await;
        let display_amount = stats.display_amount();

        DashboardSummary {
            stats: stats.as_ref().clone(),
            display_amount,
            formatted_amount: currency.format_amount(display_amount),
            currency: currency.clone(),
            referral_link: self.link_for(user),
            recent_activity: self
                .referrals
                .iter()
                .map(|referral| ActivityEntry::from_referral(referral, now))
                .collect(),
            is_loading: self.is_loading(),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use rust_decimal::Decimal;

    use super::*;
    use crate::{
        external_services::analytics::{
            dashboard_analytics::DashboardAnalyticsResponse, test_support::FakeAnalyticsSource,
        },
        models::{currency::currency_for_locale, metrics::AnalyticsMetric},
        services::{
            auth_service::test_support::demo_user,
            clipboard_service::{test_support::RecordingClipboard, UnavailableClipboard},
        },
        utils::errors::dashboard_error::DashboardError,
    };

    fn example_metrics() -> Vec<AnalyticsMetric> {
        vec![
            AnalyticsMetric::new("total referrals", 120, 5),
            AnalyticsMetric::new("total points", 340, 8),
            AnalyticsMetric::new("conversion rate", 12, 1),
        ]
    }

    fn service(source: FakeAnalyticsSource) -> ReferralService {
        ReferralService::new(
            Arc::new(source),
            DEFAULT_REFERRAL_BASE_URL.to_string(),
            DEFAULT_FETCH_TIMEOUT,
            Utc::now(),
        )
    }

    /// Accepts the request and never answers.
    struct SilentSource;

    #[async_trait]
    impl AnalyticsSource for SilentSource {
        async fn get_dashboard_analytics(
            &self,
        ) -> Result<DashboardAnalyticsResponse, DashboardError> {
            std::future::pending().await
        }
    }

    fn silent_service() -> Arc<ReferralService> {
        Arc::new(ReferralService::new(
            Arc::new(SilentSource),
            DEFAULT_REFERRAL_BASE_URL.to_string(),
            Duration::from_secs(5),
            Utc::now(),
        ))
    }

    #[test]
    fn generates_link_from_identifier() {
        assert_eq!(
            generate_referral_link(DEFAULT_REFERRAL_BASE_URL, "123456"),
            "https://optisage.com/ref/123456"
        );
        assert_eq!(
            generate_referral_link("https://example.com/r/", "abc"),
            "https://example.com/r/abc"
        );
    }

    #[tokio::test]
    async fn fetch_replaces_stats() {
        let service = service(FakeAnalyticsSource::with_metrics(example_metrics()));

        assert_eq!(service.fetch_stats().await, FetchOutcome::Updated);

        let stats = service.stats().await;
        assert_eq!(stats.total_referrals, 120);
        assert_eq!(stats.growth_rate_conversion, Decimal::from(1));
        assert_eq!(stats.display_amount(), Decimal::from(34000));
        assert!(!service.is_loading());
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_stats() {
        let service = service(FakeAnalyticsSource::new(vec![
            Ok(DashboardAnalyticsResponse::ok(example_metrics())),
            Err(DashboardError::SourceUnavailable("connection refused".into())),
            Ok(DashboardAnalyticsResponse {
                status: 503,
                data: None,
            }),
        ]));

        service.fetch_stats().await;
        let before = service.stats().await;

        assert_eq!(service.fetch_stats().await, FetchOutcome::Retained);
        assert_eq!(service.fetch_stats().await, FetchOutcome::Retained);
        assert_eq!(service.stats().await, before);
        assert!(!service.is_loading());
    }

    #[tokio::test]
    async fn failed_first_fetch_leaves_zeroed_stats() {
        let service = service(FakeAnalyticsSource::new(vec![]));

        assert_eq!(service.fetch_stats().await, FetchOutcome::Retained);
        assert_eq!(*service.stats().await, ReferralStats::default());
    }

    #[tokio::test]
    async fn refetch_with_same_metrics_is_stable() {
        let service = service(FakeAnalyticsSource::new(vec![
            Ok(DashboardAnalyticsResponse::ok(example_metrics())),
            Ok(DashboardAnalyticsResponse::ok(example_metrics())),
        ]));

        service.fetch_stats().await;
        let first = service.stats().await;
        service.fetch_stats().await;
        assert_eq!(service.stats().await, first);
    }

    #[tokio::test]
    async fn summary_uses_assigned_link_when_present() {
        let service = service(FakeAnalyticsSource::with_metrics(example_metrics()));
        service.fetch_stats().await;
        let user = AuthenticatedUser {
            referral_link: Some("https://optisage.com/ref/custom".to_string()),
            ..demo_user()
        };

        let summary = service
            .dashboard_summary(&user, currency_for_locale("canada"), Utc::now())
            .await;

        assert_eq!(summary.referral_link, "https://optisage.com/ref/custom");
        assert_eq!(summary.formatted_amount, "C$34,000");
        assert_eq!(summary.recent_activity.len(), 3);
        assert!(!summary.is_loading);
    }

    #[tokio::test]
    async fn copy_link_writes_generated_link() {
        let service = service(FakeAnalyticsSource::new(vec![]));
        let clipboard = RecordingClipboard::default();

        let ack = service.copy_link(&demo_user(), &clipboard).await;

        assert!(ack.is_some());
        assert_eq!(
            *clipboard.contents.lock().unwrap(),
            vec!["https://optisage.com/ref/123456".to_string()]
        );
        assert!(service
            .copy_link(&demo_user(), &UnavailableClipboard)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn dropped_fetch_clears_loading_flag() {
        let service = silent_service();

        let handle = {
            let service = service.clone();
            tokio::spawn(async move { service.fetch_stats().await })
        };
        tokio::task::yield_now().await;
        assert!(service.is_loading());

        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());
        assert!(!service.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn silent_source_times_out_and_releases_the_fetch() {
        let service = silent_service();

        assert_eq!(service.fetch_stats().await, FetchOutcome::Retained);
        assert!(!service.is_loading());
        assert_eq!(service.fetch_stats().await, FetchOutcome::Retained);
        assert_eq!(*service.stats().await, ReferralStats::default());
    }
}
