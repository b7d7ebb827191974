use std::{
    env,
    process::Stdio,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use tokio::{io::AsyncWriteExt, process::Command};
use tracing::{info, warn};

use crate::utils::errors::dashboard_error::DashboardError;

/// How long the "copied" acknowledgement should stay visible.
pub const COPIED_ACK_DURATION: Duration = Duration::from_secs(2);

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), DashboardError>;
}

/// Copies through a platform clipboard utility reading from stdin.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    /// Picks the clipboard utility for the current session, if there is one.
    pub fn detect() -> Option<Self> {
        if cfg!(target_os = "macos") {
            return Some(Self::new("pbcopy", &[]));
        }
        if env::var_os("WAYLAND_DISPLAY").is_some() {
            return Some(Self::new("wl-copy", &[]));
        }
        if env::var_os("DISPLAY").is_some() {
            return Some(Self::new("xclip", &["-selection", "clipboard"]));
        }
        None
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn write_text(&self, text: &str) -> Result<(), DashboardError> {
        let denied = |e: std::io::Error| {
            DashboardError::ClipboardDenied(format!("{}: {}", self.program, e))
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(denied)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await.map_err(denied)?;
        }

        let status = child.wait().await.map_err(denied)?;
        if !status.success() {
            return Err(DashboardError::ClipboardDenied(format!(
                "{} exited with {}",
                self.program, status
            )));
        }

        Ok(())
    }
}

/// Stand-in for sessions without clipboard access.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableClipboard;

#[async_trait]
impl Clipboard for UnavailableClipboard {
    async fn write_text(&self, _text: &str) -> Result<(), DashboardError> {
        Err(DashboardError::ClipboardDenied(
            "no clipboard available in this session".to_string(),
        ))
    }
}

/// Transient "copied" state. The holder decides when to stop showing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyAcknowledgement {
    copied_at: Instant,
}

impl CopyAcknowledgement {
    pub fn new(copied_at: Instant) -> Self {
        Self { copied_at }
    }

    pub fn is_active(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.copied_at) < COPIED_ACK_DURATION
    }
}

/// Writes `text` to the clipboard. A rejected write is logged and leaves the
/// acknowledgement unset.
pub async fn copy_to_clipboard(clipboard: &dyn Clipboard, text: &str) -> Option<CopyAcknowledgement> {
    match clipboard.write_text(text).await {
        Ok(()) => {
            info!("Referral link copied to clipboard");
            Some(CopyAcknowledgement::new(Instant::now()))
        }
        Err(e) => {
            warn!("Could not copy referral link: {}", e);
            None
        }
    }
}
