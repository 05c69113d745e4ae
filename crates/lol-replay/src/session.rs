use lol_http::{HttpError, Method, Reply, Request, RequestClient};
use lol_types::{
    LiveGameSnapshot, PlaybackState, PlaybackUpdate, RecordingState, RecordingUpdate,
    RenderState, SeatIndex,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::process::{self, ExitOutcome};
use crate::ReplayError;

pub const REPLAY_API_PORT: u16 = 2999;
pub const REPLAY_API_URL: &str = "https://127.0.0.1:2999";

/// Replay API calls get more retries than the LCU: the replay process is
/// often still starting when the first requests go out.
pub const REPLAY_DEFAULT_RETRIES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Initializing,
    AwaitingReady,
    AssetsLoading,
    Interactive,
    Exited,
}

#[derive(Deserialize)]
struct ReplayGame {
    #[serde(rename = "processID")]
    process_id: Option<u32>,
}

/// One replay process, driven through the Replay API.
///
/// Reads never change server state. Once [`exit`](Self::exit) has run, every
/// further call fails with [`ReplayError::SessionExited`].
pub struct ReplaySession {
    http: RequestClient,
    base_url: String,
    retries: u32,
    pid: Option<NonZeroU32>,
    state: SessionState,
}

impl ReplaySession {
    pub fn new(http: RequestClient) -> Self {
        Self {
            http,
            base_url: REPLAY_API_URL.to_string(),
            retries: REPLAY_DEFAULT_RETRIES,
            pid: None,
            state: SessionState::Uninitialized,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid.map(NonZeroU32::get)
    }

    /// Use a pid obtained elsewhere (e.g. from the process that launched the replay).
    /// 0 is not a process and clears the cached pid.
    pub fn set_pid(&mut self, pid: u32) {
        self.pid = NonZeroU32::new(pid);
        if self.pid.is_none() {
            debug!("Ignoring replay pid 0");
        }
    }

    fn ensure_live(&self, operation: &'static str) -> Result<(), ReplayError> {
        if self.state == SessionState::Exited {
            return Err(ReplayError::SessionExited { operation });
        }
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
    ) -> Result<T, ReplayError> {
        self.ensure_live(operation)?;
        Ok(self
            .http
            .send_json(Request::get(self.url(path)), self.retries)
            .await?)
    }

    /// A 2xx without a JSON body means the update was applied but the
    /// server did not echo the new state back: `Ok(None)`.
    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, ReplayError> {
        self.ensure_live(operation)?;
        let url = self.url(path);
        let body = serde_json::to_value(body).map_err(|e| HttpError::Protocol {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        let request = Request::new(Method::POST, url.clone()).json(body);
        match self.http.send(request, self.retries).await? {
            Reply::Raw { status, body } => {
                debug!("{} -> {} without JSON ({} byte(s))", url, status, body.len());
                Ok(None)
            }
            reply => Ok(Some(reply.decode(&url)?)),
        }
    }

    /// Best-effort pid discovery. A replay that is not up yet leaves the
    /// session `Uninitialized`; nothing is raised.
    pub async fn init(&mut self) -> Option<u32> {
        if self.state == SessionState::Exited {
            return None;
        }
        self.state = SessionState::Initializing;
        match self.process_id().await {
            Ok(pid) => {
                info!("Replay process id: {}", pid);
                self.pid = NonZeroU32::new(pid);
                self.state = SessionState::AwaitingReady;
                Some(pid)
            }
            Err(e) => {
                warn!("Could not get replay process id: {}", e);
                self.state = SessionState::Uninitialized;
                None
            }
        }
    }

    /// The cached pid, or the one reported by `GET /replay/game`.
    pub async fn process_id(&self) -> Result<u32, ReplayError> {
        if let Some(pid) = self.pid {
            return Ok(pid.get());
        }
        let game: ReplayGame = self.get("read process id", "/replay/game").await?;
        game.process_id
            .and_then(NonZeroU32::new)
            .map(NonZeroU32::get)
            .ok_or(ReplayError::ProcessUnknown)
    }

    /// Poll until both playback and recording answer, then wait for assets.
    ///
    /// Each failed round sleeps `poll_interval`; after `max_retries` failed
    /// rounds the replay is declared unavailable.
    pub async fn load(&mut self, poll_interval: Duration, max_retries: u32) -> Result<(), ReplayError> {
        self.ensure_live("load")?;
        if self.state != SessionState::AssetsLoading && self.state != SessionState::Interactive {
            self.state = SessionState::AwaitingReady;
        }

        let mut last_error = String::from("no attempt made");
        let mut ready = false;
        for attempt in 1..=max_retries {
            let check = async {
                self.playback().await?;
                self.recording().await?;
                Ok::<_, ReplayError>(())
            };
            match check.await {
                Ok(()) => {
                    ready = true;
                    break;
                }
                Err(e) => {
                    warn!(
                        "Couldn't connect to replay API, waiting {:?} before retrying ({} retries left): {}",
                        poll_interval,
                        max_retries - attempt,
                        e
                    );
                    last_error = e.to_string();
                    sleep(poll_interval).await;
                }
            }
        }
        if !ready {
            return Err(ReplayError::ReplayUnavailable {
                attempts: max_retries,
                last_error,
            });
        }

        info!("Replay API is up, waiting for assets");
        self.state = SessionState::AssetsLoading;
        self.wait_for_assets_to_load().await?;
        self.state = SessionState::Interactive;
        Ok(())
    }

    /// Poll playback until the assets are in. Returns how many polls it took.
    pub async fn wait_for_assets_to_load(&self) -> Result<u32, ReplayError> {
        let mut polls = 0;
        loop {
            let playback = self.playback().await?;
            polls += 1;
            if playback.assets_loaded() {
                debug!(
                    "Assets loaded at t={:.1} (paused: {})",
                    playback.time, playback.paused
                );
                return Ok(polls);
            }
        }
    }

    /// Sleep `initial_wait`, then keep sleeping for whatever the recorder
    /// reports is left until it stops. Returns how many polls it took.
    pub async fn wait_for_recording_to_finish(
        &self,
        initial_wait: Duration,
    ) -> Result<u32, ReplayError> {
        self.ensure_live("wait for recording")?;
        let mut wait = initial_wait;
        let mut polls = 0;
        loop {
            sleep(wait).await;
            let recording = self.recording().await?;
            polls += 1;
            let remaining = recording.remaining();
            debug!(
                "Recording: {} at {:.1}/{:.1} ({:.1}s left)",
                recording.recording, recording.current_time, recording.end_time, remaining
            );
            if !recording.recording || remaining <= 0.0 {
                info!("Recording finished after {} poll(s)", polls);
                return Ok(polls);
            }
            wait = Duration::try_from_secs_f64(remaining).unwrap_or_default();
        }
    }

    /// Kill the replay process. Never fails: a process that cannot be found
    /// or killed counts as already gone.
    pub async fn exit(&mut self) -> ExitOutcome {
        if self.state == SessionState::Exited {
            return ExitOutcome::AlreadyGone;
        }
        let outcome = match self.process_id().await {
            Ok(pid) => match process::terminate(pid) {
                Ok(()) => {
                    info!("Killed replay process {}", pid);
                    ExitOutcome::Terminated { pid }
                }
                Err(e) => {
                    debug!("Replay process {} not killed: {}", pid, e);
                    ExitOutcome::AlreadyGone
                }
            },
            Err(e) => {
                debug!("No replay process to kill: {}", e);
                ExitOutcome::AlreadyGone
            }
        };
        self.state = SessionState::Exited;
        outcome
    }

    pub async fn playback(&self) -> Result<PlaybackState, ReplayError> {
        self.get("read playback", "/replay/playback").await
    }

    /// `Ok(None)` when the server applied the update without echoing state.
    pub async fn set_playback(
        &self,
        update: &PlaybackUpdate,
    ) -> Result<Option<PlaybackState>, ReplayError> {
        self.post("update playback", "/replay/playback", update).await
    }

    pub async fn pause(&self) -> Result<Option<PlaybackState>, ReplayError> {
        self.set_playback(&PlaybackUpdate {
            paused: Some(true),
            ..Default::default()
        })
        .await
    }

    pub async fn resume(&self) -> Result<Option<PlaybackState>, ReplayError> {
        self.set_playback(&PlaybackUpdate {
            paused: Some(false),
            ..Default::default()
        })
        .await
    }

    pub async fn seek(&self, time: f64) -> Result<Option<PlaybackState>, ReplayError> {
        self.set_playback(&PlaybackUpdate {
            time: Some(time),
            ..Default::default()
        })
        .await
    }

    pub async fn set_speed(&self, speed: f64) -> Result<Option<PlaybackState>, ReplayError> {
        self.set_playback(&PlaybackUpdate {
            speed: Some(speed),
            ..Default::default()
        })
        .await
    }

    pub async fn recording(&self) -> Result<RecordingState, ReplayError> {
        self.get("read recording", "/replay/recording").await
    }

    pub async fn set_recording(
        &self,
        update: &RecordingUpdate,
    ) -> Result<Option<RecordingState>, ReplayError> {
        self.post("update recording", "/replay/recording", update)
            .await
    }

    /// Post `update` with `recording` forced on.
    pub async fn start_recording(
        &self,
        mut update: RecordingUpdate,
    ) -> Result<Option<RecordingState>, ReplayError> {
        update.recording = Some(true);
        info!(
            "Starting recording ({:?} -> {:?})",
            update.start_time, update.end_time
        );
        self.set_recording(&update).await
    }

    pub async fn render(&self) -> Result<RenderState, ReplayError> {
        self.get("read render", "/replay/render").await
    }

    pub async fn set_render(
        &self,
        update: &RenderState,
    ) -> Result<Option<RenderState>, ReplayError> {
        self.post("update render", "/replay/render", update).await
    }

    pub async fn live_snapshot(&self) -> Result<LiveGameSnapshot, ReplayError> {
        self.get("read game data", "/liveclientdata/allgamedata")
            .await
    }

    /// Seat of the player with this in-game name: ORDER 0-4, CHAOS 5-9.
    pub async fn seat_index_by_summoner_name(&self, name: &str) -> Result<SeatIndex, ReplayError> {
        let snapshot = self.live_snapshot().await?;
        snapshot
            .seat_index(name)
            .ok_or_else(|| ReplayError::SummonerNotFound {
                name: name.to_string(),
            })
    }
}
