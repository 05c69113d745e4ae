pub mod config;
pub mod pipeline;

pub use config::RecordJob;
pub use pipeline::{RecordingPipeline, Stage};

use anyhow::{Context, Result};
use lol_http::RequestClient;
use lol_replay::ExitOutcome;
use std::path::Path;
use tracing::info;

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "replay_pilot=debug,lol_replay=debug,lol_http=info,lol_input=info".into()
            }),
        )
        .init();
}

/// Load the job at `job_path` and record it.
pub async fn run(job_path: &Path) -> Result<ExitOutcome> {
    let job = RecordJob::load(job_path)?;
    info!("Loaded job {}", job_path.display());

    let http = RequestClient::new().context("Failed to build HTTP client")?;
    let pipeline = RecordingPipeline::new(job, http);
    #[cfg(feature = "desktop")]
    let pipeline = pipeline.with_automation(Box::new(lol_input::DesktopAutomation::new()));

    pipeline.run().await
}
