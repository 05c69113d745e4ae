use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Coarse classification shared by every layer of the crate stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The resource or file is genuinely absent. Never retried.
    NotFound,
    /// Connection-level failure or non-success status after the retry budget ran out.
    Transport,
    /// The peer answered with something we cannot interpret.
    Protocol,
    /// The operation is not valid for the current session/client state.
    SessionState,
    /// Input automation ran out of attempts without verifying its effect.
    AutomationExhausted,
}

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("resource not found: {url}")]
    NotFound { url: String },

    #[error("lockfile not found after {waited:?}: {}", .path.display())]
    LockfileMissing { path: PathBuf, waited: Duration },

    #[error("request to {url} failed after {attempts} attempt(s){}: {reason}", status_suffix(.status))]
    Transport {
        url: String,
        status: Option<u16>,
        attempts: u32,
        reason: String,
    },

    #[error("unexpected response from {url}: {reason}")]
    Protocol { url: String, reason: String },

    #[error("malformed lockfile {} ({fields} field(s), expected name:pid:port:secret:protocol)", .path.display())]
    MalformedLockfile { path: PathBuf, fields: usize },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Setup(String),

    #[error("client not ready: {reason}")]
    ClientState { reason: String },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (last status {s})")).unwrap_or_default()
}

impl HttpError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } | Self::LockfileMissing { .. } => ErrorKind::NotFound,
            Self::Transport { .. } | Self::Io { .. } | Self::Setup(_) => ErrorKind::Transport,
            Self::Protocol { .. } | Self::MalformedLockfile { .. } => ErrorKind::Protocol,
            Self::ClientState { .. } => ErrorKind::SessionState,
        }
    }

    /// URL the failing request targeted, if the error came from a request
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::NotFound { url } | Self::Transport { url, .. } | Self::Protocol { url, .. } => {
                Some(url)
            }
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}
