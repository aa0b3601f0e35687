//! Front-end configuration.
//!
//! Wraps the simulation settings with display options. Configuration can be
//! loaded from and saved to a TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use seedbed_common::{SeedbedError, SeedbedResult};
use seedbed_sim::SimSettings;

/// Configuration file name.
const CONFIG_FILE: &str = "seedbed.toml";

/// How state is printed after each command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Grid drawn with icons.
    #[default]
    Text,
    /// One JSON document per line.
    Json,
}

/// Front-end configuration parameters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Output format
    pub output: OutputFormat,
    /// Repeat each command before its result
    pub echo_commands: bool,
    /// Simulation parameters
    pub sim: SimSettings,
}

impl CliConfig {
    /// Load configuration from the default file location.
    pub fn load() -> Self {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from a specific path.
    ///
    /// A missing or unreadable file yields the defaults; loaded values are
    /// clamped before use.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        match Self::read(path) {
            Ok(Some(mut config)) => {
                config.validate();
                info!(path = %path.display(), "Loaded config");
                config
            },
            Ok(None) => {
                info!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring config file");
                Self::default()
            },
        }
    }

    fn read(path: &Path) -> SeedbedResult<Option<Self>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        toml::from_str(&contents)
            .map(Some)
            .map_err(|e| SeedbedError::Config(e.to_string()))
    }

    /// Save configuration to the default file location.
    pub fn save(&self) -> SeedbedResult<()> {
        self.save_to(Self::config_path())
    }

    /// Save configuration as TOML, creating parent directories.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> SeedbedResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| SeedbedError::Config(e.to_string()))?;
        fs::write(path, contents)?;

        info!(path = %path.display(), "Saved config");
        Ok(())
    }

    /// `seedbed/seedbed.toml` under the platform config directory, or
    /// `seedbed.toml` in the working directory when there is none.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("seedbed").join(CONFIG_FILE))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        self.sim.validate();
    }
}
