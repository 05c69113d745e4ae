use anyhow::{bail, Result};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    replay_pilot::init_tracing();

    let Some(job_path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        bail!("usage: replay-pilot <job.json>");
    };
    let outcome = replay_pilot::run(&job_path).await?;
    tracing::info!("Finished: {:?}", outcome);
    Ok(())
}
