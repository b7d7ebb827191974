use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Machine-readable category of a failed dashboard request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Unauthorized,
    Loading,
    SourceUnavailable,
    MalformedMetric,
    ClipboardDenied,
    SaveInProgress,
}

impl ErrorKind {
    /// Whether the same request can succeed later without any change on the
    /// client's side.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            ErrorKind::Loading | ErrorKind::SourceUnavailable | ErrorKind::SaveInProgress
        )
    }
}

/// Body of every non-2xx dashboard response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub message: String,
    /// HTTP status code, repeated for clients that only see the body
    pub code: u16,
    pub kind: ErrorKind,
    pub retryable: bool,
    /// Sign-in page for requests without an active session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}
