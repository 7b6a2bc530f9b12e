use std::process::{Command, Stdio};

use crate::config::PlayerConfig;
use crate::error::PlayerError;

/// Launches an external player for trailer URLs
pub struct Player {
    config: PlayerConfig,
}

impl Player {
    pub fn new(config: PlayerConfig) -> Self {
        Self { config }
    }

    /// Check if the configured player is available in PATH
    pub fn is_available(&self) -> bool {
        which::which(&self.config.command).is_ok()
    }

    /// Full command line for a URL
    fn command_for(&self, url: &str) -> Command {
        let mut cmd = Command::new(&self.config.command);
        cmd.args(&self.config.args).arg(url);
        cmd
    }

    /// Play a URL with the configured player, blocking until it exits
    pub fn play(&self, url: &str) -> Result<(), PlayerError> {
        if !self.is_available() {
            return Err(PlayerError::NotFound(self.config.command.clone()));
        }

        let mut cmd = self.command_for(url);

        // Inherit stdio so player can interact with terminal
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        tracing::info!("Launching player: {} {}", self.config.command, url);

        let status = cmd
            .status()
            .map_err(|e| PlayerError::LaunchFailed(e.to_string()))?;

        if !status.success() {
            if let Some(code) = status.code() {
                return Err(PlayerError::ExitError(format!("Exit code: {}", code)));
            }
        }

        Ok(())
    }
}
