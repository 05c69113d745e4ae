use async_trait::async_trait;
use enigo::{Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};
use std::time::Duration;
use tracing::{debug, warn};
use xcap::Window;

use crate::{title_matches, AutomationError, LogicalKey, WindowAutomation};

const FOCUS_TRIES: u32 = 10;
const FOCUS_BACKOFF_BASE: Duration = Duration::from_millis(50);
const FOCUS_BACKOFF_MAX: Duration = Duration::from_secs(1);

/// Real desktop backend: xcap finds windows, enigo synthesizes input.
/// Every platform call runs on tokio's blocking pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopAutomation;

impl DesktopAutomation {
    pub fn new() -> Self {
        Self
    }
}

/// Screen-space centre of the first visible window matching `title`
fn find_window_center(title: &str) -> Result<Option<(i32, i32)>, AutomationError> {
    let windows = Window::all().map_err(|e| AutomationError::Windows(e.to_string()))?;
    for window in windows {
        let Ok(window_title) = window.title() else {
            continue;
        };
        if !title_matches(&window_title, title) {
            continue;
        }
        if window.is_minimized().unwrap_or(false) {
            debug!("Skipping minimized window: {}", window_title);
            continue;
        }
        let geometry = (|| -> xcap::XCapResult<(i32, i32)> {
            let x = window.x()?;
            let y = window.y()?;
            let w = window.width()? as i32;
            let h = window.height()? as i32;
            Ok((x + w / 2, y + h / 2))
        })();
        match geometry {
            Ok(center) => {
                debug!("Found window {:?} centred at {:?}", window_title, center);
                return Ok(Some(center));
            }
            Err(e) => warn!("Could not read geometry of {:?}: {}", window_title, e),
        }
    }
    Ok(None)
}

fn with_enigo<T>(
    f: impl FnOnce(&mut Enigo) -> Result<T, enigo::InputError>,
) -> Result<T, AutomationError> {
    let mut enigo =
        Enigo::new(&Settings::default()).map_err(|e| AutomationError::Input(e.to_string()))?;
    f(&mut enigo).map_err(|e| AutomationError::Input(e.to_string()))
}

async fn blocking<T: Send + 'static>(
    f: impl FnOnce() -> Result<T, AutomationError> + Send + 'static,
) -> Result<T, AutomationError> {
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AutomationError::Task(e.to_string()))?
}

fn to_enigo(key: LogicalKey) -> Result<Key, AutomationError> {
    if !key.is_valid() {
        return Err(AutomationError::InvalidKey(key));
    }
    let key = match key {
        LogicalKey::F(n) => match n {
            1 => Key::F1,
            2 => Key::F2,
            3 => Key::F3,
            4 => Key::F4,
            5 => Key::F5,
            6 => Key::F6,
            7 => Key::F7,
            8 => Key::F8,
            9 => Key::F9,
            10 => Key::F10,
            11 => Key::F11,
            12 => Key::F12,
            _ => return Err(AutomationError::InvalidKey(key)),
        },
        LogicalKey::Escape => Key::Escape,
        LogicalKey::Tab => Key::Tab,
        LogicalKey::Space => Key::Space,
        LogicalKey::Enter => Key::Return,
        LogicalKey::Backspace => Key::Backspace,
        LogicalKey::Delete => Key::Delete,
        LogicalKey::Home => Key::Home,
        LogicalKey::End => Key::End,
        LogicalKey::PageUp => Key::PageUp,
        LogicalKey::PageDown => Key::PageDown,
        LogicalKey::Up => Key::UpArrow,
        LogicalKey::Down => Key::DownArrow,
        LogicalKey::Left => Key::LeftArrow,
        LogicalKey::Right => Key::RightArrow,
        typed => match typed.as_char() {
            Some(c) => Key::Unicode(c),
            None => return Err(AutomationError::InvalidKey(typed)),
        },
    };
    Ok(key)
}

#[async_trait]
impl WindowAutomation for DesktopAutomation {
    async fn focus_window(&self, title: &str) -> Result<bool, AutomationError> {
        for attempt in 0..FOCUS_TRIES {
            let wanted = title.to_string();
            if let Some((x, y)) = blocking(move || find_window_center(&wanted)).await? {
                // Clicking the client area is the portable way to raise a window.
                self.move_pointer(x, y).await?;
                self.click().await?;
                return Ok(true);
            }
            let wait = (FOCUS_BACKOFF_BASE * 2u32.pow(attempt)).min(FOCUS_BACKOFF_MAX);
            tokio::time::sleep(wait).await;
        }
        warn!("No window titled {:?}", title);
        Ok(false)
    }

    async fn press_key(&self, key: LogicalKey) -> Result<(), AutomationError> {
        let key = to_enigo(key)?;
        blocking(move || with_enigo(|e| e.key(key, Direction::Click))).await
    }

    async fn move_pointer(&self, x: i32, y: i32) -> Result<(), AutomationError> {
        blocking(move || with_enigo(|e| e.move_mouse(x, y, Coordinate::Abs))).await
    }

    async fn click(&self) -> Result<(), AutomationError> {
        blocking(|| with_enigo(|e| e.button(Button::Left, Direction::Click))).await
    }
}
