use crate::Summoner;
use serde::{Deserialize, Serialize};

/// Download state reported by the LCU replay service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DownloadState {
    Checking,
    Downloading,
    Watch,
    #[serde(other)]
    Other,
}

impl DownloadState {
    /// Still making progress towards `Watch`
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Checking | Self::Downloading)
    }
}

/// `GET /lol-replays/v1/metadata/{matchId}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<u64>,
    pub state: DownloadState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_progress: Option<f64>,
}

/// `GET /lol-summoner/v1/current-summoner`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentSummoner {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub tag_line: String,
    #[serde(default)]
    pub puuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summoner_level: Option<u32>,
}

impl From<CurrentSummoner> for Summoner {
    fn from(current: CurrentSummoner) -> Self {
        let name = if current.display_name.is_empty() {
            current.game_name
        } else {
            current.display_name
        };
        Summoner::new(name, current.tag_line, current.puuid)
    }
}

/// `GET /riotclient/region-locale` on the LCU, `/riotclient/get_region_locale` on the Riot Client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionLocale {
    pub locale: String,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_region: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchProgress {
    #[serde(default)]
    pub progress: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchState {
    #[serde(default)]
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<PatchProgress>,
}

/// `GET /patch/v1/installs/{product}/status` on the Riot Client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstallStatus {
    #[serde(default)]
    pub patch: PatchState,
}

impl InstallStatus {
    pub fn is_up_to_date(&self) -> bool {
        self.patch.state == "up_to_date"
    }

    /// Percent complete, when the client reports it
    pub fn progress(&self) -> Option<f64> {
        self.patch.progress.as_ref().map(|p| p.progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_download_state_parsing() {
        let meta: ReplayMetadata =
            serde_json::from_value(json!({ "gameId": 7, "state": "downloading" })).unwrap();
        assert!(meta.state.is_pending());

        let meta: ReplayMetadata =
            serde_json::from_value(json!({ "state": "lost" })).unwrap();
        assert_eq!(meta.state, DownloadState::Other);
        assert!(!meta.state.is_pending());
    }

    #[test]
    fn test_current_summoner_falls_back_to_game_name() {
        let current: CurrentSummoner = serde_json::from_value(json!({
            "displayName": "",
            "gameName": "Caps",
            "tagLine": "EUW",
            "puuid": "p-1"
        }))
        .unwrap();
        let summoner = Summoner::from(current);
        assert_eq!(summoner.summoner_name(), "Caps");
        assert_eq!(summoner.riot_id(), "Caps#EUW");
    }

    #[test]
    fn test_install_status() {
        let status: InstallStatus = serde_json::from_value(json!({
            "patch": { "state": "patching", "progress": { "progress": 42.5 } }
        }))
        .unwrap();
        assert!(!status.is_up_to_date());
        assert_eq!(status.progress(), Some(42.5));

        let status: InstallStatus =
            serde_json::from_value(json!({ "patch": { "state": "up_to_date" } })).unwrap();
        assert!(status.is_up_to_date());
        assert_eq!(status.progress(), None);
    }
}
