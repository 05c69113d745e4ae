use serde::{Deserialize, Serialize};
use std::fmt;

/// Players per team; CHAOS seats start at this offset.
pub const TEAM_SIZE: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Team {
    Order,
    Chaos,
    #[serde(other)]
    Neutral,
}

/// One entry of `allPlayers` in the live client data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(default)]
    pub riot_id_game_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub riot_id_tag_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summoner_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub champion_name: Option<String>,
    pub team: Team,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_dead: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_terrain: Option<String>,
}

/// `GET /liveclientdata/allgamedata`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveGameSnapshot {
    #[serde(default)]
    pub active_player: serde_json::Value,
    pub all_players: Vec<Player>,
    #[serde(default)]
    pub events: serde_json::Value,
    #[serde(default)]
    pub game_data: GameInfo,
}

impl LiveGameSnapshot {
    /// Players of one team in the order the client lists them.
    pub fn team(&self, team: Team) -> impl Iterator<Item = &Player> {
        self.all_players.iter().filter(move |p| p.team == team)
    }

    /// Seat of the player whose `riotIdGameName` equals `name`, searching
    /// ORDER before CHAOS. Players past the fifth of a team have no seat.
    pub fn seat_index(&self, name: &str) -> Option<SeatIndex> {
        let slot = |team| {
            self.team(team)
                .take(TEAM_SIZE as usize)
                .position(|p| p.riot_id_game_name == name)
                .map(|i| i as u8)
        };
        if let Some(i) = slot(Team::Order) {
            return SeatIndex::new(i);
        }
        slot(Team::Chaos).and_then(|i| SeatIndex::new(i + TEAM_SIZE))
    }
}

/// Position 0-9 in a 5v5 roster: ORDER occupies 0-4, CHAOS 5-9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeatIndex(u8);

impl SeatIndex {
    pub const MAX: u8 = TEAM_SIZE * 2 - 1;

    pub fn new(index: u8) -> Option<Self> {
        (index <= Self::MAX).then_some(Self(index))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn team(self) -> Team {
        if self.0 < TEAM_SIZE {
            Team::Order
        } else {
            Team::Chaos
        }
    }

    /// Index within the seat's own team
    pub fn slot(self) -> u8 {
        self.0 % TEAM_SIZE
    }
}

impl fmt::Display for SeatIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
