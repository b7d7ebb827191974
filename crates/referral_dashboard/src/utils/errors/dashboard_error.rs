/// Failures raised while assembling the dashboard.
///
/// None of these are fatal: callers recover locally and the dashboard keeps
/// rendering with the best data it has.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DashboardError {
    /// The analytics source could not be reached or answered with a non-success status.
    #[error("Analytics source unavailable: {0}")]
    SourceUnavailable(String),

    /// A metric name outside the known vocabulary.
    #[error("Unknown metric: {0}")]
    MalformedMetric(String),

    /// The environment rejected the clipboard write.
    #[error("Clipboard write denied: {0}")]
    ClipboardDenied(String),

    #[error("A settings save is already in progress")]
    SaveInProgress,
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::SourceUnavailable(err.to_string())
    }
}
