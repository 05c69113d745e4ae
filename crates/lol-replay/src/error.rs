use lol_http::{ErrorKind, HttpError};
use lol_input::AutomationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(
        "replay API unavailable after {attempts} attempt(s); make sure the replay API is \
         enabled and the client is running (last error: {last_error})"
    )]
    ReplayUnavailable { attempts: u32, last_error: String },

    #[error("replay process id unknown")]
    ProcessUnknown,

    #[error("summoner {name:?} not found in game")]
    SummonerNotFound { name: String },

    #[error("cannot {operation}: replay session has exited")]
    SessionExited { operation: &'static str },

    #[error(
        "camera did not lock onto {summoner:?} after {attempts} attempt(s) \
         (last selection: {last_selection:?})"
    )]
    FocusExhausted {
        summoner: String,
        attempts: u32,
        last_selection: Option<String>,
    },

    #[error(transparent)]
    Automation(#[from] AutomationError),
}

impl ReplayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(e) => e.kind(),
            Self::ReplayUnavailable { .. }
            | Self::ProcessUnknown
            | Self::SummonerNotFound { .. }
            | Self::SessionExited { .. } => ErrorKind::SessionState,
            Self::FocusExhausted { .. } => ErrorKind::AutomationExhausted,
            Self::Automation(_) => ErrorKind::Transport,
        }
    }
}
