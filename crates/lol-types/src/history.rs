use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One game in `GET /lol-match-history/v1/products/lol/{puuid}/matches`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub game_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_creation: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchHistoryGames {
    #[serde(default)]
    pub games: Vec<MatchSummary>,
}

/// The history endpoint nests its list as `games.games`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchHistory {
    #[serde(default)]
    pub games: MatchHistoryGames,
}

impl MatchHistory {
    pub fn into_games(self) -> Vec<MatchSummary> {
        self.games.games
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineFrame {
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default)]
    pub events: Vec<Value>,
    #[serde(default)]
    pub participant_frames: Value,
}

/// `GET /lol-match-history/v1/game-timelines/{matchId}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchTimeline {
    #[serde(default)]
    pub frames: Vec<TimelineFrame>,
}

/// Entry of `GET /lol-game-queues/v1/queues`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Queue {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_ranked: Option<bool>,
}
