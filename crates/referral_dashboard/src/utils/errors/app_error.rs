use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use crate::services::auth_service::LOGIN_PATH;

use super::{
    dashboard_error::DashboardError,
    error_payload::{ErrorKind, ErrorPayload},
};

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Service is still loading, retry shortly")]
    Loading,

    #[error("{0}")]
    Dashboard(#[from] DashboardError),
}

impl AppError {
    pub fn code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Loading => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Dashboard(err) => match err {
                DashboardError::SourceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                DashboardError::MalformedMetric(_) => StatusCode::UNPROCESSABLE_ENTITY,
                DashboardError::ClipboardDenied(_) => StatusCode::INTERNAL_SERVER_ERROR,
                DashboardError::SaveInProgress => StatusCode::CONFLICT,
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Unauthorized(_) => ErrorKind::Unauthorized,
            AppError::Loading => ErrorKind::Loading,
            AppError::Dashboard(err) => match err {
                DashboardError::SourceUnavailable(_) => ErrorKind::SourceUnavailable,
                DashboardError::MalformedMetric(_) => ErrorKind::MalformedMetric,
                DashboardError::ClipboardDenied(_) => ErrorKind::ClipboardDenied,
                DashboardError::SaveInProgress => ErrorKind::SaveInProgress,
            },
        }
    }

    fn redirect_to(&self) -> Option<String> {
        match self {
            AppError::Unauthorized(_) => Some(LOGIN_PATH.to_string()),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.code();
        let kind = self.kind();
        let error_response = ErrorPayload {
            message: self.to_string(),
            code: status.as_u16(),
            kind,
            retryable: kind.is_retryable(),
            redirect_to: self.redirect_to(),
        };

        (status, Json(error_response)).into_response()
    }
}
