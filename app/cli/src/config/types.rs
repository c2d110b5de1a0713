//! Configuration types for dwall.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

use std::fs;
use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Configuration file names, in lookup order.
const CONFIG_FILE_NAMES: &[&str] = &["dwall.jsonc", "dwall.json"];

/// Settings passed to the wallpaper setter backend.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SetterConfig {
    /// Scaling mode for the wallpaper.
    /// One of `fill`, `fit`, `center`, `stretch`, `tile`.
    pub mode: String,

    /// Output selector passed to swaybg. `*` targets every output.
    pub output: String,
}

impl Default for SetterConfig {
    fn default() -> Self {
        Self {
            mode: "fill".to_string(),
            output: "*".to_string(),
        }
    }
}

/// Top-level dwall configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct DwallConfig {
    /// Wallpaper store directory holding `heic/` and `jpg/`.
    /// The `DWALL_PATH` environment variable takes precedence.
    pub path: String,

    /// JPEG quality (1-100) for extracted frames.
    pub jpeg_quality: u8,

    /// Wallpaper setter backend settings.
    pub setter: SetterConfig,
}

impl Default for DwallConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            jpeg_quality: 90,
            setter: SetterConfig::default(),
        }
    }
}

/// Errors that can occur while loading the configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    NotFound,
    /// The configuration file exists but could not be read.
    IoError(std::io::Error),
    /// The configuration file contains invalid JSON.
    ParseError(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(
                f,
                "No configuration file found. Expected at ~/.config/dwall/dwall.jsonc \
                or ~/.config/dwall/dwall.json"
            ),
            Self::IoError(err) => write!(f, "Failed to read configuration file: {err}"),
            Self::ParseError(err) => write!(f, "Failed to parse configuration file: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err) }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self { Self::ParseError(err) }
}

/// Returns the candidate configuration file paths, in lookup order.
///
/// Checks `$XDG_CONFIG_HOME/dwall/` first when set, then `~/.config/dwall/`
/// and the platform config directory, skipping duplicates.
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        let dwall_dir = PathBuf::from(xdg_config).join("dwall");
        for filename in CONFIG_FILE_NAMES {
            paths.push(dwall_dir.join(filename));
        }
    }

    if let Some(home) = dirs::home_dir() {
        let dwall_dir = home.join(".config").join("dwall");
        for filename in CONFIG_FILE_NAMES {
            let path = dwall_dir.join(filename);
            // XDG_CONFIG_HOME is usually ~/.config
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let dwall_dir = config_dir.join("dwall");
        for filename in CONFIG_FILE_NAMES {
            let path = dwall_dir.join(filename);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    paths
}

/// Loads the configuration from the first existing candidate path.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists in any
/// of the expected locations, `ConfigError::IoError` if a file exists but
/// could not be read, and `ConfigError::ParseError` for invalid JSON.
pub fn load_config() -> Result<(DwallConfig, PathBuf), ConfigError> {
    for path in config_paths() {
        if path.exists() {
            let file = fs::File::open(&path)?;
            // Strip comments from JSONC before parsing
            let reader = json_comments::StripComments::new(file);
            let config: DwallConfig = serde_json::from_reader(reader)?;
            return Ok((config, path));
        }
    }

    Err(ConfigError::NotFound)
}
