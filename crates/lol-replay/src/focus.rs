use lol_input::{LogicalKey, WindowAutomation, GAME_WINDOW_TITLE};
use lol_types::SeatIndex;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::{ReplayError, ReplaySession};

/// Spectator hotkeys that lock the camera onto a seat: ORDER on 1-5, CHAOS on Q-T.
const CAMERA_KEYS: [LogicalKey; 10] = [
    LogicalKey::Num1,
    LogicalKey::Num2,
    LogicalKey::Num3,
    LogicalKey::Num4,
    LogicalKey::Num5,
    LogicalKey::Letter('q'),
    LogicalKey::Letter('w'),
    LogicalKey::Letter('e'),
    LogicalKey::Letter('r'),
    LogicalKey::Letter('t'),
];

pub fn camera_key(seat: SeatIndex) -> LogicalKey {
    CAMERA_KEYS[seat.get() as usize]
}

/// How hard to try before giving up on a camera lock.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusPolicy {
    pub window_title: String,
    pub attempts: u32,
    /// Key presses per attempt. The client drops presses while it is busy.
    pub presses: u32,
    pub press_interval: Duration,
    /// Pause between the last press and reading back the render state
    pub settle: Duration,
}

impl Default for FocusPolicy {
    fn default() -> Self {
        Self {
            window_title: GAME_WINDOW_TITLE.to_string(),
            attempts: 10,
            presses: 50,
            press_interval: Duration::from_millis(200),
            settle: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusReport {
    pub seat: SeatIndex,
    pub key: LogicalKey,
    /// Attempt on which the selection matched, starting at 1
    pub attempts: u32,
}

/// Locks the replay camera onto one player by pressing their seat hotkey
/// in the game window, then confirms via `GET /replay/render`.
pub struct CameraFocus<W> {
    automation: W,
    policy: FocusPolicy,
}

impl<W: WindowAutomation> CameraFocus<W> {
    pub fn new(automation: W) -> Self {
        Self {
            automation,
            policy: FocusPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FocusPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &FocusPolicy {
        &self.policy
    }

    pub fn automation(&self) -> &W {
        &self.automation
    }

    pub async fn focus_by_summoner_name(
        &self,
        session: &ReplaySession,
        target: &str,
    ) -> Result<FocusReport, ReplayError> {
        let seat = session.seat_index_by_summoner_name(target).await?;
        let key = camera_key(seat);
        info!("Focusing camera on {} (seat {}, key {})", target, seat, key);

        let mut last_selection = None;
        for attempt in 1..=self.policy.attempts {
            if self.automation.focus_window(&self.policy.window_title).await? {
                for _ in 0..self.policy.presses {
                    self.automation.press_key(key).await?;
                    sleep(self.policy.press_interval).await;
                }
            } else {
                warn!("Window {:?} not found", self.policy.window_title);
            }
            sleep(self.policy.settle).await;

            let render = session.render().await?;
            if render.is_selected(target) {
                info!("Camera locked on {} after {} attempt(s)", target, attempt);
                return Ok(FocusReport {
                    seat,
                    key,
                    attempts: attempt,
                });
            }
            debug!(
                "Attempt {}/{}: camera on {:?}, wanted {}",
                attempt, self.policy.attempts, render.selection_name, target
            );
            last_selection = render.selection_name;
        }

        Err(ReplayError::FocusExhausted {
            summoner: target.to_string(),
            attempts: self.policy.attempts,
            last_selection,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Action, FakeAutomation, FakeReplayApi};
    use lol_http::{ErrorKind, Method};
    use serde_json::json;

    fn roster() -> serde_json::Value {
        json!({
            "allPlayers": [
                { "riotIdGameName": "Blue1", "team": "ORDER" },
                { "riotIdGameName": "Red1", "team": "CHAOS" },
                { "riotIdGameName": "Blue2", "team": "ORDER" },
                { "riotIdGameName": "Red2", "team": "CHAOS" }
            ]
        })
    }

    fn quick_policy() -> FocusPolicy {
        FocusPolicy {
            attempts: 3,
            presses: 4,
            ..Default::default()
        }
    }

    #[test]
    fn test_camera_keys() {
        let key = |i| camera_key(SeatIndex::new(i).unwrap());
        assert_eq!(key(0), LogicalKey::Num1);
        assert_eq!(key(4), LogicalKey::Num5);
        assert_eq!(key(5), LogicalKey::Letter('q'));
        assert_eq!(key(9), LogicalKey::Letter('t'));
    }

    #[test]
    fn test_default_policy() {
        let policy = FocusPolicy::default();
        assert_eq!(policy.window_title, "League of Legends");
        assert_eq!(policy.attempts, 10);
        assert_eq!(policy.presses, 50);
        assert_eq!(policy.press_interval, Duration::from_millis(200));
        assert_eq!(policy.settle, Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_focus_succeeds_on_second_attempt() {
        let api = FakeReplayApi::new();
        api.json(Method::GET, "/liveclientdata/allgamedata", vec![roster()]);
        api.json(
            Method::GET,
            "/replay/render",
            vec![
                json!({ "selectionName": "Blue1" }),
                json!({ "selectionName": "Red2" }),
            ],
        );
        let session = api.session();
        let focus = CameraFocus::new(FakeAutomation::new(true)).with_policy(quick_policy());

        let report = focus.focus_by_summoner_name(&session, "Red2").await.unwrap();
        assert_eq!(report.seat.get(), 6);
        assert_eq!(report.key, LogicalKey::Letter('w'));
        assert_eq!(report.attempts, 2);

        let automation = focus.automation();
        assert_eq!(automation.focus_calls(), 2);
        assert_eq!(automation.presses(), vec![LogicalKey::Letter('w'); 8]);
        assert_eq!(
            automation.actions.lock().unwrap()[0],
            Action::Focus("League of Legends".into())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_focus_paces_presses_and_settles() {
        let api = FakeReplayApi::new();
        api.json(Method::GET, "/liveclientdata/allgamedata", vec![roster()]);
        api.json(Method::GET, "/replay/render", vec![json!({ "selectionName": "Blue2" })]);
        let session = api.session();
        let focus = CameraFocus::new(FakeAutomation::new(true)).with_policy(quick_policy());

        let start = tokio::time::Instant::now();
        let report = focus.focus_by_summoner_name(&session, "Blue2").await.unwrap();
        assert_eq!(report.key, LogicalKey::Num2);
        // 4 presses at 200ms, then the 10s settle
        assert_eq!(start.elapsed(), Duration::from_millis(10_800));
    }

    #[tokio::test(start_paused = true)]
    async fn test_focus_exhaustion_reports_last_selection() {
        let api = FakeReplayApi::new();
        api.json(Method::GET, "/liveclientdata/allgamedata", vec![roster()]);
        api.json(Method::GET, "/replay/render", vec![json!({ "selectionName": "Blue1" })]);
        let session = api.session();
        let focus = CameraFocus::new(FakeAutomation::new(true)).with_policy(quick_policy());

        let err = focus
            .focus_by_summoner_name(&session, "Red1")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AutomationExhausted);
        match err {
            ReplayError::FocusExhausted {
                summoner,
                attempts,
                last_selection,
            } => {
                assert_eq!(summoner, "Red1");
                assert_eq!(attempts, 3);
                assert_eq!(last_selection.as_deref(), Some("Blue1"));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(api.count(Method::GET, "/replay/render"), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_window_skips_presses() {
        let api = FakeReplayApi::new();
        api.json(Method::GET, "/liveclientdata/allgamedata", vec![roster()]);
        api.json(Method::GET, "/replay/render", vec![json!({})]);
        let session = api.session();
        let focus = CameraFocus::new(FakeAutomation::new(false)).with_policy(quick_policy());

        let err = focus
            .focus_by_summoner_name(&session, "Blue1")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ReplayError::FocusExhausted {
                last_selection: None,
                ..
            }
        ));
        assert_eq!(focus.automation().focus_calls(), 3);
        assert!(focus.automation().presses().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_summoner_never_touches_desktop() {
        let api = FakeReplayApi::new();
        api.json(Method::GET, "/liveclientdata/allgamedata", vec![roster()]);
        let session = api.session();
        let focus = CameraFocus::new(FakeAutomation::new(true));

        let err = focus
            .focus_by_summoner_name(&session, "Ghost")
            .await
            .unwrap_err();
        assert!(matches!(err, ReplayError::SummonerNotFound { .. }));
        assert!(focus.automation().actions.lock().unwrap().is_empty());
    }
}
