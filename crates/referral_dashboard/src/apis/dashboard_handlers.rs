use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;

use crate::{
    models::{
        dashboard::DashboardSummary,
        referral_stats::ReferralStats,
        referrals::{Referral, Transaction},
        users::AuthenticatedUser,
    },
    utils::errors::{app_error::AppError, error_payload::ErrorPayload},
    AppState,
};

use super::api_models::response::{RefreshStatsResponse, ReferralLinkResponse};

pub const TAG: &str = "dashboard";

/// Get the full dashboard view for the signed-in user
#[utoipa::path(
    get,
    tag = TAG,
    path = "/summary",
    operation_id = "getDashboardSummary",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardSummary),
        (status = 401, description = "No active session", body = ErrorPayload)
    )
)]
pub(super) async fn get_dashboard_summary(
    State(app_state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<(StatusCode, Json<DashboardSummary>), AppError> {
    let summary = app_state
        .referral_service
        .dashboard_summary(&user, app_state.currency, Utc::now())
        .await;
    Ok((StatusCode::OK, Json(summary)))
}

/// Get the current stats record
#[utoipa::path(
    get,
    tag = TAG,
    path = "/stats",
    operation_id = "getStats",
    responses(
        (status = 200, description = "Current referral stats", body = ReferralStats),
        (status = 401, description = "No active session", body = ErrorPayload)
    )
)]
pub(super) async fn get_stats(
    State(app_state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<ReferralStats>), AppError> {
    let stats = app_state.referral_service.stats().await;
    Ok((StatusCode::OK, Json(stats.as_ref().clone())))
}

/// Re-fetch stats from the analytics source
///
/// A failed fetch is not an error: the previous record is returned with
/// outcome `retained`.
#[utoipa::path(
    post,
    tag = TAG,
    path = "/stats/refresh",
    operation_id = "refreshStats",
    responses(
        (status = 200, description = "Stats after the refresh attempt", body = RefreshStatsResponse),
        (status = 401, description = "No active session", body = ErrorPayload)
    )
)]
pub(super) async fn refresh_stats(
    State(app_state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<RefreshStatsResponse>), AppError> {
    let outcome = app_state.referral_service.fetch_stats().await;
    let stats = app_state.referral_service.stats().await;
    Ok((
        StatusCode::OK,
        Json(RefreshStatsResponse {
            outcome,
            stats: stats.as_ref().clone(),
        }),
    ))
}

#[utoipa::path(
    get,
    tag = TAG,
    path = "/referrals",
    operation_id = "getReferrals",
    responses(
        (status = 200, description = "Referral history", body = Vec<Referral>),
        (status = 401, description = "No active session", body = ErrorPayload)
    )
)]
pub(super) async fn get_referrals(
    State(app_state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<Vec<Referral>>), AppError> {
    Ok((
        StatusCode::OK,
        Json(app_state.referral_service.referrals().to_vec()),
    ))
}

#[utoipa::path(
    get,
    tag = TAG,
    path = "/transactions",
    operation_id = "getTransactions",
    responses(
        (status = 200, description = "Transactions made by referred users", body = Vec<Transaction>),
        (status = 401, description = "No active session", body = ErrorPayload)
    )
)]
pub(super) async fn get_transactions(
    State(app_state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<Vec<Transaction>>), AppError> {
    Ok((
        StatusCode::OK,
        Json(app_state.referral_service.transactions().to_vec()),
    ))
}

/// Get the shareable referral link for the signed-in user
#[utoipa::path(
    get,
    tag = TAG,
    path = "/referral-link",
    operation_id = "getReferralLink",
    responses(
        (status = 200, description = "Referral link", body = ReferralLinkResponse),
        (status = 401, description = "No active session", body = ErrorPayload)
    )
)]
pub(super) async fn get_referral_link(
    State(app_state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<(StatusCode, Json<ReferralLinkResponse>), AppError> {
    let link = app_state.referral_service.link_for(&user);
    Ok((StatusCode::OK, Json(ReferralLinkResponse { link })))
}
