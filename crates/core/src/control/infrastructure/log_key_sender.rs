use crate::control::domain::key::Key;
use crate::control::domain::key_sender::KeySender;

/// Dry-run sender: logs keys without touching the keyboard.
#[derive(Default)]
pub struct LogKeySender {
    presses: u64,
    #[cfg(test)]
    sent: Vec<Key>,
}

impl LogKeySender {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeySender for LogKeySender {
    fn send(&mut self, key: Key) -> Result<(), Box<dyn std::error::Error>> {
        self.presses += 1;
        log::info!("Key press #{} (dry run): {key}", self.presses);
        #[cfg(test)]
        self.sent.push(key);
        Ok(())
    }
}
