use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Keyboard key independent of any input backend's naming.
///
/// `Letter` holds a lowercase ASCII letter and `F` a number in 1-12; build
/// them with [`letter`](Self::letter) and [`function`](Self::function) to
/// stay in range. Out-of-range keys fail to serialize and to press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum LogicalKey {
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    Letter(char),
    F(u8),
    Escape,
    Tab,
    Space,
    Enter,
    Backspace,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
}

impl LogicalKey {
    pub const DIGITS: [LogicalKey; 10] = [
        Self::Num0,
        Self::Num1,
        Self::Num2,
        Self::Num3,
        Self::Num4,
        Self::Num5,
        Self::Num6,
        Self::Num7,
        Self::Num8,
        Self::Num9,
    ];

    /// Lowercase ASCII letter key. `None` for anything else.
    pub fn letter(c: char) -> Option<Self> {
        c.is_ascii_alphabetic()
            .then(|| Self::Letter(c.to_ascii_lowercase()))
    }

    /// Function key F1-F12.
    pub fn function(n: u8) -> Option<Self> {
        (1..=12).contains(&n).then_some(Self::F(n))
    }

    pub fn is_valid(self) -> bool {
        match self {
            Self::Letter(c) => c.is_ascii_lowercase(),
            Self::F(n) => (1..=12).contains(&n),
            _ => true,
        }
    }

    /// The character this key types, for keys that type one.
    pub fn as_char(self) -> Option<char> {
        match self {
            Self::Letter(c) => Some(c),
            Self::Space => Some(' '),
            other => Self::DIGITS
                .iter()
                .position(|k| *k == other)
                .and_then(|d| char::from_digit(d as u32, 10)),
        }
    }

    pub fn name(self) -> String {
        match self {
            Self::F(n) => format!("f{n}"),
            Self::Escape => "esc".into(),
            Self::Tab => "tab".into(),
            Self::Space => "space".into(),
            Self::Enter => "enter".into(),
            Self::Backspace => "backspace".into(),
            Self::Delete => "delete".into(),
            Self::Home => "home".into(),
            Self::End => "end".into(),
            Self::PageUp => "pageup".into(),
            Self::PageDown => "pagedown".into(),
            Self::Up => "up".into(),
            Self::Down => "down".into(),
            Self::Left => "left".into(),
            Self::Right => "right".into(),
            typed => typed.as_char().map(String::from).unwrap_or_default(),
        }
    }
}

impl fmt::Display for LogicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for LogicalKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let key = match lower.as_str() {
            "esc" | "escape" => Self::Escape,
            "tab" => Self::Tab,
            "space" => Self::Space,
            "enter" | "return" => Self::Enter,
            "backspace" => Self::Backspace,
            "delete" => Self::Delete,
            "home" => Self::Home,
            "end" => Self::End,
            "pageup" => Self::PageUp,
            "pagedown" => Self::PageDown,
            "up" => Self::Up,
            "down" => Self::Down,
            "left" => Self::Left,
            "right" => Self::Right,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => {
                        Self::DIGITS[c.to_digit(10).unwrap_or(0) as usize]
                    }
                    (Some(c), None) => Self::letter(c).ok_or_else(|| format!("unknown key {s:?}"))?,
                    (Some('f'), Some(_)) => other[1..]
                        .parse::<u8>()
                        .ok()
                        .and_then(Self::function)
                        .ok_or_else(|| format!("unknown key {s:?}"))?,
                    _ => return Err(format!("unknown key {s:?}")),
                }
            }
        };
        Ok(key)
    }
}

impl TryFrom<String> for LogicalKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for LogicalKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !self.is_valid() {
            return Err(serde::ser::Error::custom(format!("invalid key {self:?}")));
        }
        serializer.serialize_str(&self.name())
    }
}
