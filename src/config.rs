use anyhow::{Context, Result};
use lol_http::lockfile::{self, ClientKind};
use lol_input::GAME_WINDOW_TITLE;
use lol_replay::FocusPolicy;
use lol_types::{RecordingUpdate, RenderState};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_LOAD_POLL_SECS: u64 = 10;
pub const DEFAULT_LOAD_RETRIES: u32 = 30;
pub const DEFAULT_INITIAL_WAIT_SECS: u64 = 10;

/// One replay to record, read from a JSON job file. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordJob {
    pub lockfile_path: PathBuf,
    /// When set, the replay is downloaded and launched through the client first
    pub match_id: Option<u64>,
    pub focus_summoner: Option<String>,
    pub recording: RecordingUpdate,
    pub render: Option<RenderState>,
    pub load_poll_secs: u64,
    pub load_retries: u32,
    /// First sleep before the recording state is polled
    pub initial_wait_secs: u64,
    pub window_title: String,
}

impl Default for RecordJob {
    fn default() -> Self {
        Self {
            lockfile_path: lockfile::default_path(ClientKind::LeagueClient),
            match_id: None,
            focus_summoner: None,
            recording: RecordingUpdate::default(),
            render: None,
            load_poll_secs: DEFAULT_LOAD_POLL_SECS,
            load_retries: DEFAULT_LOAD_RETRIES,
            initial_wait_secs: DEFAULT_INITIAL_WAIT_SECS,
            window_title: GAME_WINDOW_TITLE.to_string(),
        }
    }
}

impl RecordJob {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid job file {}", path.display()))
    }

    pub fn load_poll_interval(&self) -> Duration {
        Duration::from_secs(self.load_poll_secs)
    }

    pub fn initial_wait(&self) -> Duration {
        Duration::from_secs(self.initial_wait_secs)
    }

    pub fn focus_policy(&self) -> FocusPolicy {
        FocusPolicy {
            window_title: self.window_title.clone(),
            ..Default::default()
        }
    }
}
