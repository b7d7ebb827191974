use tracing::warn;

use crate::models::users::AuthenticatedUser;

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/auth/login";

/// Snapshot of the authentication collaborator.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<AuthenticatedUser>,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    /// Authentication is still resolving; show a placeholder.
    Loading,
    /// No user once loading finished.
    Redirect(&'static str),
    Allow(AuthenticatedUser),
}

pub fn gate(state: &AuthState) -> GateDecision {
    if state.loading {
        return GateDecision::Loading;
    }

    match &state.user {
        Some(user) => GateDecision::Allow(user.clone()),
        None => GateDecision::Redirect(LOGIN_PATH),
    }
}

/// Resolves the current user from a session token.
pub trait AuthProvider: Send + Sync {
    fn authenticate(&self, token: Option<&str>) -> AuthState;
}

/// Accepts a single configured token and maps it to one user.
pub struct StaticAuthProvider {
    token: String,
    user: AuthenticatedUser,
}

const DEV_AUTH_TOKEN: &str = "dev-token";

impl StaticAuthProvider {
    pub fn new(token: Option<String>, user: AuthenticatedUser) -> Self {
        let token = token.unwrap_or_else(|| {
            warn!("AUTH_TOKEN not found in environment, using default token");
            DEV_AUTH_TOKEN.to_string()
        });
        Self { token, user }
    }
}

impl AuthProvider for StaticAuthProvider {
    fn authenticate(&self, token: Option<&str>) -> AuthState {
        let user = match token {
            Some(token) if token == self.token => Some(self.user.clone()),
            _ => None,
        };
        AuthState {
            user,
            loading: false,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn demo_user() -> AuthenticatedUser {
        AuthenticatedUser {
            id: "123456".to_string(),
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            whatsapp_number: "+1 555 0100".to_string(),
            whatsapp_channel_name: "Jane's Deals".to_string(),
            referral_link: None,
        }
    }
}
