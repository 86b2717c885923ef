use std::process::{Command, ExitStatus};

use thiserror::Error;

use crate::control::domain::key::Key;
use crate::control::domain::key_sender::KeySender;

#[derive(Error, Debug)]
pub enum KeySendError {
    #[error("key command is empty")]
    EmptyCommand,
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status} while sending {key}")]
    Status {
        program: String,
        key: Key,
        status: ExitStatus,
    },
}

/// Injects keys by running an external program, e.g. `xdotool key`.
///
/// The key name is appended as the final argument on every press.
pub struct CommandKeySender {
    program: String,
    args: Vec<String>,
}

impl CommandKeySender {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Splits a whitespace-separated command line such as `"xdotool key"`.
    pub fn parse(command_line: &str) -> Result<Self, KeySendError> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(KeySendError::EmptyCommand)?;
        Ok(Self::new(program, parts.collect()))
    }

    fn run(&self, key: Key) -> Result<(), KeySendError> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(key.name())
            .status()
            .map_err(|source| KeySendError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if !status.success() {
            return Err(KeySendError::Status {
                program: self.program.clone(),
                key,
                status,
            });
        }
        log::debug!("Sent {key} via {}", self.program);
        Ok(())
    }
}

impl KeySender for CommandKeySender {
    fn send(&mut self, key: Key) -> Result<(), Box<dyn std::error::Error>> {
        Ok(self.run(key)?)
    }
}
