use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use tracing::warn;

use crate::{
    services::auth_service::{gate, GateDecision},
    utils::errors::app_error::AppError,
    AppState,
};

/// Resolves the session user and stores it as a request extension.
pub async fn require_user(
    State(app_state): State<Arc<AppState>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer.as_ref().map(|TypedHeader(auth)| auth.token());

    match gate(&app_state.auth_provider.authenticate(token)) {
        GateDecision::Allow(user) => {
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
        GateDecision::Redirect(login_path) => {
            warn!("Rejected request to {} without a session", request.uri());
            Err(AppError::Unauthorized(format!("sign in at {}", login_path)))
        }
        GateDecision::Loading => Err(AppError::Loading),
    }
}
