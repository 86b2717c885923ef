use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Per-frame classification outcome.
///
/// `None` means no usable hand region was found; `Unknown` means a region was
/// found but its shape matched no known pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureLabel {
    Fist,
    OpenHand,
    ThumbUp,
    PinkyUp,
    Unknown,
    None,
}

impl GestureLabel {
    pub const ALL: &[GestureLabel] = &[
        GestureLabel::Fist,
        GestureLabel::OpenHand,
        GestureLabel::ThumbUp,
        GestureLabel::PinkyUp,
        GestureLabel::Unknown,
        GestureLabel::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GestureLabel::Fist => "fist",
            GestureLabel::OpenHand => "open_hand",
            GestureLabel::ThumbUp => "thumb_up",
            GestureLabel::PinkyUp => "pinky_up",
            GestureLabel::Unknown => "unknown",
            GestureLabel::None => "none",
        }
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GestureLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GestureLabel::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| format!("unknown gesture label '{s}'"))
    }
}
