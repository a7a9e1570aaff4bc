// Solver settings
// Loaded from ~/.config/dailydoku/config.toml (or --config)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Daily puzzle endpoint of the upstream puzzle source.
pub const DEFAULT_PUZZLE_URL: &str = "https://api.pokedoku.com/api/puzzle/current";

/// Puzzle source settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleSettings {
    /// Daily puzzle endpoint
    pub url: String,

    /// Per-request timeout
    pub timeout_secs: u64,

    /// Retries after a 429/5xx/network failure
    pub retries: u32,
}

impl Default for PuzzleSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_PUZZLE_URL.to_string(),
            timeout_secs: 30,
            retries: 2,
        }
    }
}

/// Entity catalog settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// JSON entity index used to answer cell queries
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveSettings {
    /// Resolve the nine cells concurrently
    pub parallel: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub puzzle: PuzzleSettings,
    pub catalog: CatalogSettings,
    pub solve: SolveSettings,

    /// Extra source-name → canonical-kind aliases, applied over the built-in table
    pub kinds: BTreeMap<String, String>,
}

#[derive(Debug)]
pub enum SettingsError {
    /// File could not be read.
    Read { path: PathBuf, message: String },
    /// TOML parse / deserialization error.
    Parse { path: PathBuf, message: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => {
                write!(f, "cannot read settings '{}': {message}", path.display())
            }
            Self::Parse { path, message } => {
                write!(f, "invalid settings '{}': {message}", path.display())
            }
        }
    }
}

impl std::error::Error for SettingsError {}

impl Settings {
    /// Default settings file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dailydoku").join("config.toml"))
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load settings.
    ///
    /// An explicit path must exist. The default path is optional: when it
    /// is missing, defaults are returned.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&text).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
