//! Keyboard, pointer and window-focus automation for the game client.
//!
//! Callers own a [`WindowAutomation`] value and pass it to whatever needs it;
//! the desktop backend lives behind the `desktop` feature because it links
//! against the platform's windowing and input libraries.

mod key;
#[cfg(feature = "desktop")]
mod desktop;

pub use key::LogicalKey;
#[cfg(feature = "desktop")]
pub use desktop::DesktopAutomation;

use async_trait::async_trait;
use thiserror::Error;

/// Title of the in-game (and replay) window
pub const GAME_WINDOW_TITLE: &str = "League of Legends";

#[derive(Debug, Error)]
pub enum AutomationError {
    #[error("failed to enumerate windows: {0}")]
    Windows(String),
    #[error("input backend failed: {0}")]
    Input(String),
    #[error("input task panicked: {0}")]
    Task(String),
    #[error("key {0:?} does not exist")]
    InvalidKey(LogicalKey),
}

/// Logical desktop operations. Implementations must not block the async
/// scheduler; platform calls belong on a blocking thread.
#[async_trait]
pub trait WindowAutomation: Send + Sync {
    /// Bring the first window whose title contains `title` to the foreground.
    /// `Ok(false)` when no such window exists.
    async fn focus_window(&self, title: &str) -> Result<bool, AutomationError>;

    async fn press_key(&self, key: LogicalKey) -> Result<(), AutomationError>;

    async fn move_pointer(&self, x: i32, y: i32) -> Result<(), AutomationError>;

    async fn click(&self) -> Result<(), AutomationError>;
}

#[async_trait]
impl<'a, W: WindowAutomation + ?Sized> WindowAutomation for &'a W {
    async fn focus_window(&self, title: &str) -> Result<bool, AutomationError> {
        (**self).focus_window(title).await
    }

    async fn press_key(&self, key: LogicalKey) -> Result<(), AutomationError> {
        (**self).press_key(key).await
    }

    async fn move_pointer(&self, x: i32, y: i32) -> Result<(), AutomationError> {
        (**self).move_pointer(x, y).await
    }

    async fn click(&self) -> Result<(), AutomationError> {
        (**self).click().await
    }
}

#[async_trait]
impl<W: WindowAutomation + ?Sized> WindowAutomation for Box<W> {
    async fn focus_window(&self, title: &str) -> Result<bool, AutomationError> {
        (**self).focus_window(title).await
    }

    async fn press_key(&self, key: LogicalKey) -> Result<(), AutomationError> {
        (**self).press_key(key).await
    }

    async fn move_pointer(&self, x: i32, y: i32) -> Result<(), AutomationError> {
        (**self).move_pointer(x, y).await
    }

    async fn click(&self) -> Result<(), AutomationError> {
        (**self).click().await
    }
}

/// Case-insensitive substring match used to pick a window by title.
pub fn title_matches(window_title: &str, wanted: &str) -> bool {
    window_title
        .to_lowercase()
        .contains(&wanted.to_lowercase())
}
