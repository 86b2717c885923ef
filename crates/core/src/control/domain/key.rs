use std::fmt;
use std::str::FromStr;

/// A single keyboard key delivered to the media player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Enter,
    Left,
    Right,
    Up,
    Down,
    /// A printable key, stored lowercase.
    Char(char),
}

impl Key {
    /// Name as understood by common key injection tools (`xdotool key ...`).
    pub fn name(&self) -> String {
        match self {
            Key::Space => "space".to_string(),
            Key::Enter => "Return".to_string(),
            Key::Left => "Left".to_string(),
            Key::Right => "Right".to_string(),
            Key::Up => "Up".to_string(),
            Key::Down => "Down".to_string(),
            Key::Char(c) => c.to_string(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_graphic() {
                return Ok(Key::Char(c.to_ascii_lowercase()));
            }
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "space" => Ok(Key::Space),
            "enter" | "return" => Ok(Key::Enter),
            "left" => Ok(Key::Left),
            "right" => Ok(Key::Right),
            "up" => Ok(Key::Up),
            "down" => Ok(Key::Down),
            _ => Err(format!("unknown key name: {s:?}")),
        }
    }
}
