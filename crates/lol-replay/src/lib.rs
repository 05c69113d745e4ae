//! Replay lifecycle control and camera focus.
//!
//! [`ReplaySession`] talks to the Replay API on port 2999 and tracks where a
//! replay is in its lifecycle; [`CameraFocus`] drives the desktop to lock the
//! camera onto a player and checks the result against the render state.

mod error;
mod focus;
mod process;
mod session;
#[cfg(test)]
mod testing;

pub use error::ReplayError;
pub use focus::{camera_key, CameraFocus, FocusPolicy, FocusReport};
pub use process::ExitOutcome;
pub use session::{
    ReplaySession, SessionState, REPLAY_API_PORT, REPLAY_API_URL, REPLAY_DEFAULT_RETRIES,
};
