use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::{
    models::{
        profiles::{NotificationPreferences, ProfileSettings, SaveAcknowledgement},
        users::AuthenticatedUser,
    },
    utils::errors::{app_error::AppError, error_payload::ErrorPayload},
    AppState,
};

pub const TAG: &str = "settings";

#[utoipa::path(
    get,
    tag = TAG,
    path = "/profile",
    operation_id = "getProfileSettings",
    responses(
        (status = 200, description = "Profile settings", body = ProfileSettings),
        (status = 401, description = "No active session", body = ErrorPayload)
    )
)]
pub(super) async fn get_profile(
    State(app_state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<(StatusCode, Json<ProfileSettings>), AppError> {
    let profile = app_state.settings_service.get_profile(&user).await;
    Ok((StatusCode::OK, Json(profile)))
}

/// Save profile settings
#[utoipa::path(
    put,
    tag = TAG,
    path = "/profile",
    operation_id = "updateProfileSettings",
    request_body = ProfileSettings,
    responses(
        (status = 200, description = "Profile saved", body = SaveAcknowledgement),
        (status = 401, description = "No active session", body = ErrorPayload),
        (status = 409, description = "Another save is in progress", body = ErrorPayload)
    )
)]
pub(super) async fn update_profile(
    State(app_state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(profile): Json<ProfileSettings>,
) -> Result<(StatusCode, Json<SaveAcknowledgement>), AppError> {
    let ack = app_state
        .settings_service
        .update_profile(&user, profile)
        .await?;
    Ok((StatusCode::OK, Json(ack)))
}

#[utoipa::path(
    get,
    tag = TAG,
    path = "/notifications",
    operation_id = "getNotificationPreferences",
    responses(
        (status = 200, description = "Notification preferences", body = NotificationPreferences),
        (status = 401, description = "No active session", body = ErrorPayload)
    )
)]
pub(super) async fn get_notifications(
    State(app_state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<(StatusCode, Json<NotificationPreferences>), AppError> {
    let preferences = app_state.settings_service.get_notifications(&user).await;
    Ok((StatusCode::OK, Json(preferences)))
}

/// Save notification preferences
#[utoipa::path(
    put,
    tag = TAG,
    path = "/notifications",
    operation_id = "updateNotificationPreferences",
    request_body = NotificationPreferences,
    responses(
        (status = 200, description = "Preferences saved", body = SaveAcknowledgement),
        (status = 401, description = "No active session", body = ErrorPayload),
        (status = 409, description = "Another save is in progress", body = ErrorPayload)
    )
)]
pub(super) async fn update_notifications(
    State(app_state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(preferences): Json<NotificationPreferences>,
) -> Result<(StatusCode, Json<SaveAcknowledgement>), AppError> {
    let ack = app_state
        .settings_service
        .update_notifications(&user, preferences)
        .await?;
    Ok((StatusCode::OK, Json(ack)))
}
