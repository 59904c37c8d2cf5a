use serde::{Deserialize, Serialize};

use std::io::ErrorKind;
use std::path::Path;

use crate::{AgentError, Result};

/// Default location of the configuration file, relative to the working directory
pub const CONFIG_PATH: &str = "agent_config.json";

/// Search depth policy of the heuristic agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Depth used while fewer than `opening_plies` tokens are on the board
    pub opening_depth: u32,
    /// Depth used for the rest of the game
    pub standard_depth: u32,
    pub opening_plies: usize,
}

impl AgentConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_str = std::fs::read_to_string(path.as_ref())
            .map_err(|err| AgentError::Config(format!("{}: {}", path.as_ref().display(), err)))?;
        Self::from_json(&config_str)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| AgentError::Config(err.to_string()))
    }

    /// Loads `CONFIG_PATH`, or the defaults if there is no such file
    pub fn load_or_default() -> Result<Self> {
        Self::load_or_default_from(CONFIG_PATH)
    }

    /// Loads `path`, falling back to the defaults only when the file is absent
    ///
    /// An unreadable or malformed file is an error, never silently replaced.
    pub fn load_or_default_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(config_str) => Self::from_json(&config_str),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AgentError::Config(format!(
                "{}: {}",
                path.as_ref().display(),
                err
            ))),
        }
    }

    /// Search depth for a position with `plies` tokens on the board
    pub fn depth_for(&self, plies: usize) -> u32 {
        if plies < self.opening_plies {
            self.opening_depth
        } else {
            self.standard_depth
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            opening_depth: 3,
            standard_depth: 7,
            opening_plies: 2,
        }
    }
}
