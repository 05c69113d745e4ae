use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use lol_types::{
    CurrentSummoner, DownloadState, MatchHistory, MatchSummary, MatchTimeline, Queue, RegionLocale,
    ReplayMetadata, Summoner, TimelineFrame,
};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::{HttpError, LockfileResolver, Reply, Request, RequestClient, LOCAL_HOST};

/// Default retry budget for control-plane calls. Deliberately lower than the
/// Replay API's: the control plane is either up or restarting.
pub const LCU_DEFAULT_RETRIES: u32 = 3;
/// Replay download/launch calls race the replay service warming up.
pub const LCU_REPLAY_RETRIES: u32 = 10;

const AUTH_USER: &str = "riot";
const CLIENT_READY_ATTEMPTS: u32 = 30;
const CLIENT_READY_INTERVAL: Duration = Duration::from_secs(1);
const DOWNLOAD_POLL_INTERVAL: Duration = Duration::from_secs(2);

const STATE_ENDPOINT: &str = "/lol-patch/v1/products/league_of_legends/state";
const GAME_SETTINGS_ENDPOINT: &str = "/lol-game-settings/v1/game-settings";

/// `Basic base64("riot:" + secret)`
pub fn authorization_header(secret: &str) -> String {
    format!("Basic {}", BASE64.encode(format!("{AUTH_USER}:{secret}")))
}

/// Authenticated client for the League client's local control plane.
/// Credentials come from the lockfile on every call.
#[derive(Clone)]
pub struct LcuClient {
    http: RequestClient,
    lockfile: PathBuf,
    resolver: LockfileResolver,
}

impl LcuClient {
    pub fn new(http: RequestClient, lockfile: impl Into<PathBuf>) -> Self {
        Self {
            http,
            lockfile: lockfile.into(),
            resolver: LockfileResolver::default(),
        }
    }

    pub fn with_resolver(mut self, resolver: LockfileResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn lockfile(&self) -> &Path {
        &self.lockfile
    }

    pub async fn request(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<Value>,
        retries: u32,
    ) -> Result<Reply, HttpError> {
        let (_, reply) = self.send(endpoint, method, body, retries).await?;
        Ok(reply)
    }

    /// Like [`request`](Self::request), also handing back the resolved URL.
    async fn send(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<Value>,
        retries: u32,
    ) -> Result<(String, Reply), HttpError> {
        let credentials = self.resolver.resolve(&self.lockfile).await?;
        let url = format!("https://{LOCAL_HOST}:{}{endpoint}", credentials.port);
        let mut request = Request::new(method, url.clone())
            .header("Authorization", authorization_header(&credentials.secret));
        if let Some(body) = body {
            request = request.json(body);
        }
        let reply = self.http.send(request, retries).await?;
        Ok((url, reply))
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        retries: u32,
    ) -> Result<T, HttpError> {
        let (url, reply) = self.send(endpoint, Method::GET, None, retries).await?;
        reply.decode(&url)
    }

    pub async fn current_summoner(&self) -> Result<Summoner, HttpError> {
        let current: CurrentSummoner = self
            .get("/lol-summoner/v1/current-summoner", LCU_DEFAULT_RETRIES)
            .await?;
        Ok(current.into())
    }

    /// Look up another account by Riot ID.
    pub async fn summoner_by_riot_id(&self, summoner: &Summoner) -> Result<Summoner, HttpError> {
        // A bare '#' would start the URL fragment
        let name = summoner.riot_id().replacen('#', "%23", 1);
        let found: CurrentSummoner = self
            .get(
                &format!("/lol-summoner/v1/summoners?name={name}"),
                LCU_DEFAULT_RETRIES,
            )
            .await?;
        Ok(found.into())
    }

    /// Games `beg_index..=end_index` of a player's history, newest first.
    pub async fn match_history(
        &self,
        puuid: &str,
        beg_index: u32,
        end_index: u32,
    ) -> Result<Vec<MatchSummary>, HttpError> {
        let history: MatchHistory = self
            .get(
                &format!(
                    "/lol-match-history/v1/products/lol/{puuid}/matches?begIndex={beg_index}&endIndex={end_index}"
                ),
                LCU_DEFAULT_RETRIES,
            )
            .await?;
        Ok(history.into_games())
    }

    /// Full end-of-game record for one match
    pub async fn match_details(&self, match_id: u64) -> Result<Value, HttpError> {
        self.get(
            &format!("/lol-match-history/v1/games/{match_id}"),
            LCU_DEFAULT_RETRIES,
        )
        .await
    }

    pub async fn match_timeline(&self, match_id: u64) -> Result<Vec<TimelineFrame>, HttpError> {
        let timeline: MatchTimeline = self
            .get(
                &format!("/lol-match-history/v1/game-timelines/{match_id}"),
                LCU_DEFAULT_RETRIES,
            )
            .await?;
        Ok(timeline.frames)
    }

    pub async fn queues(&self) -> Result<Vec<Queue>, HttpError> {
        self.get("/lol-game-queues/v1/queues", LCU_DEFAULT_RETRIES)
            .await
    }

    pub async fn client_state(&self, retries: u32) -> Result<Value, HttpError> {
        self.get(STATE_ENDPOINT, retries).await
    }

    /// Poll the patcher state (no retries per poll) until it answers.
    pub async fn wait_for_client_ready(&self) -> Result<(), HttpError> {
        for attempt in 1..=CLIENT_READY_ATTEMPTS {
            match self.client_state(0).await {
                Ok(_) => {
                    info!("League client is ready");
                    return Ok(());
                }
                Err(e) => debug!("Client not ready (attempt {}): {}", attempt, e),
            }
            sleep(CLIENT_READY_INTERVAL).await;
        }
        Err(HttpError::ClientState {
            reason: format!("league client did not answer after {CLIENT_READY_ATTEMPTS} attempts"),
        })
    }

    pub async fn patch_version(&self) -> Result<String, HttpError> {
        self.get("/lol-patch/v1/game-version", LCU_DEFAULT_RETRIES)
            .await
    }

    pub async fn region_locale(&self, retries: u32) -> Result<RegionLocale, HttpError> {
        self.get("/riotclient/region-locale", retries).await
    }

    pub async fn replay_config(&self) -> Result<Value, HttpError> {
        self.get("/lol-replays/v1/configuration", LCU_DEFAULT_RETRIES)
            .await
    }

    pub async fn rofls_path(&self) -> Result<String, HttpError> {
        self.get("/lol-replays/v1/rofls/path", LCU_DEFAULT_RETRIES)
            .await
    }

    pub async fn highlights_folder_path(&self) -> Result<String, HttpError> {
        self.get("/lol-highlights/v1/highlights-folder-path", LCU_DEFAULT_RETRIES)
            .await
    }

    pub async fn replay_metadata(&self, match_id: u64) -> Result<ReplayMetadata, HttpError> {
        self.get(
            &format!("/lol-replays/v1/metadata/{match_id}"),
            LCU_DEFAULT_RETRIES,
        )
        .await
    }

    /// Ask the client to fetch the replay file, then block until it is watchable.
    pub async fn download_replay(&self, match_id: u64) -> Result<(), HttpError> {
        info!("Downloading replay {}", match_id);
        self.request(
            &format!("/lol-replays/v1/rofls/{match_id}/download"),
            Method::POST,
            Some(json!({ "componentType": "replay-button_match-history" })),
            LCU_REPLAY_RETRIES,
        )
        .await?;
        self.wait_for_replay_download(match_id).await
    }

    pub async fn wait_for_replay_download(&self, match_id: u64) -> Result<(), HttpError> {
        loop {
            let metadata = self.replay_metadata(match_id).await?;
            match metadata.state {
                DownloadState::Watch => return Ok(()),
                ref state if state.is_pending() => {
                    debug!(
                        "Replay {} {:?} ({:.0}%)",
                        match_id,
                        state,
                        metadata.download_progress.unwrap_or(0.0)
                    );
                }
                state => {
                    return Err(HttpError::ClientState {
                        reason: format!(
                            "replay download for match {match_id} stopped in state {state:?}; \
                             the replay service may be down"
                        ),
                    })
                }
            }
            sleep(DOWNLOAD_POLL_INTERVAL).await;
        }
    }

    /// Download (if needed) and open the replay in the game client.
    pub async fn launch_replay(&self, match_id: u64) -> Result<(), HttpError> {
        self.download_replay(match_id).await?;
        info!("Launching replay {}", match_id);
        self.request(
            &format!("/lol-replays/v1/rofls/{match_id}/watch"),
            Method::POST,
            Some(json!({ "componentType": "replay-button_match-history" })),
            LCU_REPLAY_RETRIES,
        )
        .await?;
        Ok(())
    }

    pub async fn game_settings(&self) -> Result<Value, HttpError> {
        self.get(GAME_SETTINGS_ENDPOINT, LCU_DEFAULT_RETRIES).await
    }

    pub async fn input_settings(&self) -> Result<Value, HttpError> {
        self.get("/lol-game-settings/v1/input-settings", LCU_DEFAULT_RETRIES)
            .await
    }

    pub async fn patch_game_settings(&self, patch: Value) -> Result<Reply, HttpError> {
        self.request(
            GAME_SETTINGS_ENDPOINT,
            Method::PATCH,
            Some(patch),
            LCU_DEFAULT_RETRIES,
        )
        .await
    }

    /// Persist settings to disk. The client answers with a bare boolean.
    pub async fn save_game_settings(&self) -> Result<bool, HttpError> {
        let reply = self
            .request(
                "/lol-game-settings/v1/save",
                Method::POST,
                None,
                LCU_DEFAULT_RETRIES,
            )
            .await?;
        Ok(matches!(reply, Reply::Json(Value::Bool(true))))
    }

    /// Patch `General.WindowMode` (1 = windowed) and save.
    pub async fn set_window_mode(&self, windowed: bool) -> Result<(), HttpError> {
        let mode = if windowed { 1 } else { 0 };
        self.patch_game_settings(json!({ "General": { "WindowMode": mode } }))
            .await?;
        if !self.save_game_settings().await? {
            return Err(HttpError::ClientState {
                reason: format!(
                    "could not save WindowMode={mode}; change it manually in the client settings"
                ),
            });
        }
        Ok(())
    }
}
