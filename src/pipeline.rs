use anyhow::{Context, Result};
use lol_http::{LcuClient, RequestClient};
use lol_input::WindowAutomation;
use lol_replay::{CameraFocus, ExitOutcome, ReplaySession};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::config::RecordJob;

/// Where a [`RecordingPipeline`] currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Launching,
    Loading,
    Focusing,
    Recording,
    Exiting,
    Done,
    Failed,
}

/// Runs one job end to end: launch → load → render → focus → record → wait → exit.
///
/// The replay process is killed on the way out whether or not the job
/// succeeded.
pub struct RecordingPipeline {
    job: RecordJob,
    http: RequestClient,
    replay: Option<ReplaySession>,
    automation: Option<Box<dyn WindowAutomation>>,
    stage_tx: watch::Sender<Stage>,
    stage_rx: watch::Receiver<Stage>,
}

impl RecordingPipeline {
    pub fn new(job: RecordJob, http: RequestClient) -> Self {
        let (stage_tx, stage_rx) = watch::channel(Stage::Idle);
        Self {
            job,
            http,
            replay: None,
            automation: None,
            stage_tx,
            stage_rx,
        }
    }

    /// Without automation the camera is left wherever the client puts it.
    pub fn with_automation(mut self, automation: Box<dyn WindowAutomation>) -> Self {
        self.automation = Some(automation);
        self
    }

    /// Drive a session other than the default Replay API endpoint.
    pub fn with_session(mut self, session: ReplaySession) -> Self {
        self.replay = Some(session);
        self
    }

    /// Subscribe to stage changes
    pub fn stages(&self) -> watch::Receiver<Stage> {
        self.stage_rx.clone()
    }

    pub fn stage(&self) -> Stage {
        *self.stage_rx.borrow()
    }

    fn enter(&self, stage: Stage) {
        info!("Pipeline stage: {:?}", stage);
        let _ = self.stage_tx.send(stage);
    }

    pub async fn run(mut self) -> Result<ExitOutcome> {
        if let Some(match_id) = self.job.match_id {
            self.enter(Stage::Launching);
            if let Err(e) = self.launch(match_id).await {
                self.enter(Stage::Failed);
                return Err(e);
            }
        }

        let mut session = self
            .replay
            .take()
            .unwrap_or_else(|| ReplaySession::new(self.http.clone()));
        self.enter(Stage::Loading);
        session.init().await;

        let result = self.drive(&mut session).await;

        self.enter(Stage::Exiting);
        let outcome = session.exit().await;
        match result {
            Ok(()) => {
                self.enter(Stage::Done);
                Ok(outcome)
            }
            Err(e) => {
                self.enter(Stage::Failed);
                Err(e)
            }
        }
    }

    async fn launch(&self, match_id: u64) -> Result<()> {
        let lcu = LcuClient::new(self.http.clone(), &self.job.lockfile_path);
        lcu.wait_for_client_ready()
            .await
            .context("League client never became ready")?;
        lcu.launch_replay(match_id)
            .await
            .with_context(|| format!("Failed to launch replay {}", match_id))
    }

    async fn drive(&self, session: &mut ReplaySession) -> Result<()> {
        session
            .load(self.job.load_poll_interval(), self.job.load_retries)
            .await
            .context("Replay did not load")?;

        if let Some(render) = &self.job.render {
            session
                .set_render(render)
                .await
                .context("Failed to apply render settings")?;
        }

        if let Some(summoner) = &self.job.focus_summoner {
            self.enter(Stage::Focusing);
            match &self.automation {
                Some(automation) => {
                    let focus =
                        CameraFocus::new(&**automation).with_policy(self.job.focus_policy());
                    let report = focus
                        .focus_by_summoner_name(session, summoner)
                        .await
                        .with_context(|| format!("Failed to focus camera on {}", summoner))?;
                    info!(
                        "Camera on {} via key {} ({} attempt(s))",
                        summoner, report.key, report.attempts
                    );
                }
                None => warn!(
                    "No window automation available, not focusing camera on {}",
                    summoner
                ),
            }
        }

        self.enter(Stage::Recording);
        session
            .start_recording(self.job.recording.clone())
            .await
            .context("Failed to start recording")?;
        session
            .wait_for_recording_to_finish(self.job.initial_wait())
            .await
            .context("Lost track of the recording")?;
        Ok(())
    }
}
