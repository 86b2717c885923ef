use std::fmt;

use crate::control::domain::key::Key;
use crate::shared::config::KeyBindings;
use crate::shared::gesture_label::GestureLabel;

/// A playback action triggered by a held gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaCommand {
    TogglePause,
    TogglePlay,
    SkipForward(u32),
    SkipBack(u32),
}

impl MediaCommand {
    /// Command bound to a pose, or `None` for `none`/`unknown`.
    pub fn for_label(label: GestureLabel, skip_seconds: u32) -> Option<Self> {
        match label {
            GestureLabel::Fist => Some(MediaCommand::TogglePause),
            GestureLabel::OpenHand => Some(MediaCommand::TogglePlay),
            GestureLabel::ThumbUp => Some(MediaCommand::SkipForward(skip_seconds)),
            GestureLabel::PinkyUp => Some(MediaCommand::SkipBack(skip_seconds)),
            GestureLabel::Unknown | GestureLabel::None => None,
        }
    }

    pub fn description(&self) -> String {
        match self {
            MediaCommand::TogglePause => "Paused video".to_string(),
            MediaCommand::TogglePlay => "Resumed video".to_string(),
            MediaCommand::SkipForward(secs) => format!("Fast-forwarded {secs} seconds"),
            MediaCommand::SkipBack(secs) => format!("Rewound {secs} seconds"),
        }
    }
}

impl fmt::Display for MediaCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// Parsed key for every command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyMap {
    pub toggle_pause: Key,
    pub toggle_play: Key,
    pub skip_forward: Key,
    pub skip_back: Key,
}

impl KeyMap {
    pub fn from_bindings(bindings: &KeyBindings) -> Result<Self, String> {
        Ok(Self {
            toggle_pause: bindings.toggle_pause.parse()?,
            toggle_play: bindings.toggle_play.parse()?,
            skip_forward: bindings.skip_forward.parse()?,
            skip_back: bindings.skip_back.parse()?,
        })
    }

    pub fn key_for(&self, command: MediaCommand) -> Key {
        match command {
            MediaCommand::TogglePause => self.toggle_pause,
            MediaCommand::TogglePlay => self.toggle_play,
            MediaCommand::SkipForward(_) => self.skip_forward,
            MediaCommand::SkipBack(_) => self.skip_back,
        }
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            toggle_pause: Key::Space,
            toggle_play: Key::Space,
            skip_forward: Key::Char('l'),
            skip_back: Key::Char('j'),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(GestureLabel::Fist, Some(MediaCommand::TogglePause))]
    #[case(GestureLabel::OpenHand, Some(MediaCommand::TogglePlay))]
    #[case(GestureLabel::ThumbUp, Some(MediaCommand::SkipForward(10)))]
    #[case(GestureLabel::PinkyUp, Some(MediaCommand::SkipBack(10)))]
    #[case(GestureLabel::Unknown, None)]
    #[case(GestureLabel::None, None)]
    fn test_for_label(#[case] label: GestureLabel, #[case] expected: Option<MediaCommand>) {
        assert_eq!(MediaCommand::for_label(label, 10), expected);
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(MediaCommand::TogglePause.to_string(), "Paused video");
        assert_eq!(
            MediaCommand::SkipForward(10).description(),
            "Fast-forwarded 10 seconds"
        );
        assert_eq!(MediaCommand::SkipBack(5).description(), "Rewound 5 seconds");
    }

    #[test]
    fn test_default_bindings_parse_to_default_map() {
        let map = KeyMap::from_bindings(&KeyBindings::default()).unwrap();
        assert_eq!(map, KeyMap::default());
        assert_eq!(map.key_for(MediaCommand::TogglePlay), Key::Space);
        assert_eq!(map.key_for(MediaCommand::SkipBack(10)), Key::Char('j'));
    }

    #[test]
    fn test_bad_binding_is_rejected() {
        let bindings = KeyBindings {
            skip_forward: "warp".to_string(),
            ..KeyBindings::default()
        };
        assert!(KeyMap::from_bindings(&bindings).is_err());
    }
}
