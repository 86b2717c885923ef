use std::time::{Duration, Instant};

use crate::control::domain::key_sender::KeySender;
use crate::control::domain::media_command::{KeyMap, MediaCommand};
use crate::shared::config::DispatchConfig;
use crate::shared::gesture_label::GestureLabel;

/// Turns stable gesture labels into media key presses.
///
/// A pose must be held for `hold` before its command is attempted. A command
/// only fires if `cooldown` has passed since the last fired command. After
/// every attempt the hold timer is pushed `cooldown` into the future, so a
/// pose held continuously repeats at most once per `hold + cooldown`.
///
/// `none`, `unknown` and frames without a stable label are not poses: they
/// are ignored and leave the current hold untouched.
pub struct ActionDispatcher {
    sender: Box<dyn KeySender>,
    keys: KeyMap,
    hold: Duration,
    cooldown: Duration,
    skip_seconds: u32,
    held: Option<GestureLabel>,
    hold_start: Option<Instant>,
    last_fired: Option<Instant>,
}

impl ActionDispatcher {
    pub fn new(
        sender: Box<dyn KeySender>,
        keys: KeyMap,
        hold: Duration,
        cooldown: Duration,
        skip_seconds: u32,
    ) -> Self {
        Self {
            sender,
            keys,
            hold,
            cooldown,
            skip_seconds,
            held: None,
            hold_start: None,
            last_fired: None,
        }
    }

    /// Builds a dispatcher from validated configuration.
    pub fn from_config(
        sender: Box<dyn KeySender>,
        config: &DispatchConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let keys = KeyMap::from_bindings(&config.keys)?;
        Ok(Self::new(
            sender,
            keys,
            Duration::try_from_secs_f64(config.hold_secs)?,
            Duration::try_from_secs_f64(config.cooldown_secs)?,
            config.skip_seconds,
        ))
    }

    /// The pose whose hold is currently being timed.
    pub fn held(&self) -> Option<GestureLabel> {
        self.held
    }

    /// Feeds one stabilizer output observed at `now`.
    ///
    /// Returns the command that fired, if any. A failed key send is returned
    /// as an error; the hold and cooldown state advance as if it had fired.
    pub fn observe(
        &mut self,
        stable: Option<GestureLabel>,
        now: Instant,
    ) -> Result<Option<MediaCommand>, Box<dyn std::error::Error>> {
        let Some(label) = stable else {
            return Ok(None);
        };
        let Some(command) = MediaCommand::for_label(label, self.skip_seconds) else {
            return Ok(None);
        };

        let hold_start = match (self.held, self.hold_start) {
            (Some(held), Some(start)) if held == label => start,
            _ => {
                log::debug!("Holding {label}");
                self.held = Some(label);
                self.hold_start = Some(now);
                return Ok(None);
            }
        };

        if now < hold_start || now.duration_since(hold_start) < self.hold {
            return Ok(None);
        }

        self.hold_start = Some(now + self.cooldown);

        let cooled_down = self
            .last_fired
            .map_or(true, |t| now.saturating_duration_since(t) >= self.cooldown);
        if !cooled_down {
            log::debug!("{command} suppressed by cooldown");
            return Ok(None);
        }
        self.last_fired = Some(now);

        let key = self.keys.key_for(command);
        log::info!("Action: {command} (key {key})");
        self.sender.send(key)?;
        Ok(Some(command))
    }
}
