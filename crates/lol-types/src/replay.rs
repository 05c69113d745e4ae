use serde::{Deserialize, Serialize};

/// Playback time at which replay assets are considered streamed in
pub const ASSETS_READY_TIME: f64 = 15.0;

/// `GET /replay/playback`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    pub time: f64,
    pub paused: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seeking: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl PlaybackState {
    /// The replay has either played far enough to have its assets loaded, or
    /// the client paused it (which it does once loading finishes).
    pub fn assets_loaded(&self) -> bool {
        self.time >= ASSETS_READY_TIME || self.paused
    }
}

/// Partial body for `POST /replay/playback`. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seeking: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

/// `GET /replay/recording`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingState {
    pub recording: bool,
    pub current_time: f64,
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frames_per_second: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lossless: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replay_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce_frame_rate: Option<bool>,
}

impl RecordingState {
    /// Seconds of replay left to record. Zero or negative once the end is reached.
    pub fn remaining(&self) -> f64 {
        self.end_time - self.current_time
    }
}

/// Partial body for `POST /replay/recording`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frames_per_second: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lossless: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replay_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce_frame_rate: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// `GET /replay/render`. Every field is optional so the same record doubles as
/// a partial `POST` body; `selection_name` is what the camera is locked onto.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_offset: Option<Vector3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_attached: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_position: Option<Vector3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_rotation: Option<Vector3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_move_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_look_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_of_view: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub near_clip: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub far_clip: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fog_of_war: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_select: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_hover: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floating_text: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_bar_champions: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_bar_minions: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_bar_structures: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_bar_wards: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_bar_pets: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_all: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_announce: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_chat: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_frames: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_kill_callouts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_minimap: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_neutral_timers: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_quests: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_replay: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_score: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_scoreboard: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_target: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_timeline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub particles: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banners: Option<bool>,
}

impl RenderState {
    pub fn is_selected(&self, name: &str) -> bool {
        self.selection_name.as_deref() == Some(name)
    }
}
