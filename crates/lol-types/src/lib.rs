mod client;
mod history;
mod live;
mod replay;
mod summoner;

pub use client::{
    CurrentSummoner, DownloadState, InstallStatus, PatchProgress, PatchState, RegionLocale,
    ReplayMetadata,
};
pub use history::{MatchHistory, MatchHistoryGames, MatchSummary, MatchTimeline, Queue, TimelineFrame};
pub use live::{GameInfo, LiveGameSnapshot, Player, SeatIndex, Team};
pub use replay::{
    PlaybackState, PlaybackUpdate, RecordingState, RecordingUpdate, RenderState, Vector3,
};
pub use summoner::Summoner;

use serde::{Deserialize, Serialize};

/// Connection parameters read from a client lockfile
/// (`name:pid:port:secret:protocol`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub port: String,
    pub secret: String,
}
