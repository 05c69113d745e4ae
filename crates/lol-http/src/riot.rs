use lol_types::{InstallStatus, RegionLocale};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::lockfile::{self, ClientKind};
use crate::{HttpError, LcuClient, RequestClient};

/// Installs can take a while to show up after the Riot Client starts
const INSTALLS_RETRIES: u32 = 30;
const PATCH_POLL_ATTEMPTS: u32 = 300;
const PATCH_POLL_INTERVAL: Duration = Duration::from_secs(1);

const STATE_ENDPOINT: &str = "/lol-patch/v1/products/league_of_legends/state";
const PATCH_STATUS_ENDPOINT: &str = "/patch/v1/installs/league_of_legends.live/status";

/// The Riot Client launcher. Same Basic-auth scheme as the League client,
/// but keyed by its own lockfile.
#[derive(Clone)]
pub struct RiotClient {
    lcu: LcuClient,
}

impl RiotClient {
    pub fn new(http: RequestClient) -> Self {
        Self::with_lockfile(http, lockfile::default_path(ClientKind::RiotClient))
    }

    pub fn with_lockfile(http: RequestClient, lockfile: impl Into<PathBuf>) -> Self {
        Self {
            lcu: LcuClient::new(http, lockfile),
        }
    }

    /// Raw access for endpoints without a typed wrapper
    pub fn lcu(&self) -> &LcuClient {
        &self.lcu
    }

    pub async fn state(&self) -> Result<Value, HttpError> {
        self.lcu.get(STATE_ENDPOINT, 0).await
    }

    /// One unretried request to the patch state endpoint
    pub async fn is_running(&self) -> bool {
        match self.state().await {
            Ok(_) => true,
            Err(e) => {
                debug!("Riot client not running: {}", e);
                false
            }
        }
    }

    pub async fn auto_login_enabled(&self) -> Result<Value, HttpError> {
        self.lcu.get("/riotclient/get_auto_login_enabled", 0).await
    }

    pub async fn installs(&self) -> Result<Value, HttpError> {
        self.lcu.get("/patch/v1/installs", INSTALLS_RETRIES).await
    }

    pub async fn region_locale(&self, retries: u32) -> Result<RegionLocale, HttpError> {
        self.lcu.get("/riotclient/get_region_locale", retries).await
    }

    pub async fn patch_status(&self) -> Result<InstallStatus, HttpError> {
        self.lcu.get(PATCH_STATUS_ENDPOINT, 0).await
    }

    /// Poll the League install once a second until it reports `up_to_date`.
    pub async fn wait_to_patch(&self) -> Result<(), HttpError> {
        info!("Waiting for League of Legends to finish patching");
        for attempt in 1..=PATCH_POLL_ATTEMPTS {
            match self.patch_status().await {
                Ok(status) if status.is_up_to_date() => {
                    info!("League of Legends is up to date");
                    return Ok(());
                }
                Ok(status) => debug!(
                    "Patching {:?} ({:.0}%)",
                    status.patch.state,
                    status.progress().unwrap_or(0.0)
                ),
                Err(e) => debug!("Patch status unavailable (attempt {}): {}", attempt, e),
            }
            sleep(PATCH_POLL_INTERVAL).await;
        }
        Err(HttpError::ClientState {
            reason: format!("league install not up to date after {PATCH_POLL_ATTEMPTS} polls"),
        })
    }

    /// Best effort; a stale lockfile makes the next start look already running.
    pub fn remove_lockfile(&self) -> bool {
        lockfile::remove(self.lcu.lockfile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{http, write_lockfile, FakeLcu};
    use crate::{ErrorKind, RawResponse};
    use serde_json::json;
    use std::sync::Arc;

    fn riot_client(fake: Arc<FakeLcu>) -> (RiotClient, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let lockfile = write_lockfile(dir.path(), "Riot Client:777:61000:riotsecret:https");
        (RiotClient::with_lockfile(http(fake), lockfile), dir)
    }

    #[tokio::test]
    async fn test_region_locale_uses_riot_lockfile() {
        let fake = Arc::new(FakeLcu::default()).route(
            "/riotclient/get_region_locale",
            vec![RawResponse::json(200, &json!({ "locale": "ko_KR", "region": "KR" }))],
        );
        let (riot, _dir) = riot_client(fake.clone());

        let locale = riot.region_locale(crate::LCU_DEFAULT_RETRIES).await.unwrap();
        assert_eq!(locale.region, "KR");
        let seen = fake.seen();
        assert_eq!(
            seen[0].url(),
            "https://127.0.0.1:61000/riotclient/get_region_locale"
        );
        assert_eq!(
            seen[0].header_value("Authorization"),
            Some(crate::authorization_header("riotsecret").as_str())
        );
    }

    #[tokio::test]
    async fn test_is_running_makes_a_single_attempt() {
        let fake = Arc::new(FakeLcu::default()).route(STATE_ENDPOINT, vec![RawResponse::new(503, "")]);
        let (riot, _dir) = riot_client(fake.clone());

        assert!(!riot.is_running().await);
        assert_eq!(fake.seen().len(), 1);

        let fake = Arc::new(FakeLcu::default())
            .route(STATE_ENDPOINT, vec![RawResponse::json(200, &json!({ "action": "Idle" }))]);
        let (riot, _dir) = riot_client(fake);
        assert!(riot.is_running().await);
    }

    #[tokio::test]
    async fn test_installs_retry_budget() {
        let fake = Arc::new(FakeLcu::default()).route("/patch/v1/installs", vec![RawResponse::new(500, "")]);
        let (riot, _dir) = riot_client(fake.clone());

        let err = riot.installs().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(fake.seen().len(), INSTALLS_RETRIES as usize + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_to_patch_tolerates_errors_until_up_to_date() {
        let fake = Arc::new(FakeLcu::default()).route(
            PATCH_STATUS_ENDPOINT,
            vec![
                RawResponse::new(500, ""),
                RawResponse::json(
                    200,
                    &json!({ "patch": { "state": "patching", "progress": { "progress": 10.0 } } }),
                ),
                RawResponse::json(200, &json!({ "patch": { "state": "up_to_date" } })),
            ],
        );
        let (riot, _dir) = riot_client(fake.clone());

        let start = tokio::time::Instant::now();
        riot.wait_to_patch().await.unwrap();
        assert_eq!(fake.seen().len(), 3);
        assert_eq!(start.elapsed(), PATCH_POLL_INTERVAL * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_to_patch_gives_up() {
        let fake = Arc::new(FakeLcu::default()).route(
            PATCH_STATUS_ENDPOINT,
            vec![RawResponse::json(200, &json!({ "patch": { "state": "patching" } }))],
        );
        let (riot, _dir) = riot_client(fake.clone());

        let err = riot.wait_to_patch().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SessionState);
        assert_eq!(fake.seen().len(), PATCH_POLL_ATTEMPTS as usize);
    }

    #[test]
    fn test_remove_lockfile() {
        let dir = tempfile::tempdir().unwrap();
        let lockfile = write_lockfile(dir.path(), "Riot Client:1:2:s:https");
        let riot = RiotClient::with_lockfile(http(Arc::new(FakeLcu::default())), &lockfile);
        assert!(riot.remove_lockfile());
        assert!(!lockfile.exists());
        assert!(!riot.remove_lockfile());
    }
}
