use crate::control::domain::key::Key;

/// Delivers a key press to whatever application has focus.
pub trait KeySender: Send {
    fn send(&mut self, key: Key) -> Result<(), Box<dyn std::error::Error>>;
}
