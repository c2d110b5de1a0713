//! Configuration module for dwall.
//!
//! Provides configuration types and loading, plus the persisted theme
//! selection. The configuration file supports JSONC format (JSON with
//! comments).

pub mod template;
pub mod theme;
pub mod types;

use std::path::PathBuf;
use std::sync::OnceLock;

pub use types::{ConfigError, DwallConfig, SetterConfig, config_paths, load_config};

/// Global configuration instance, loaded once at startup.
static CONFIG: OnceLock<DwallConfig> = OnceLock::new();

/// Path to the currently loaded configuration file.
static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Loads the configuration from disk.
///
/// Returns the loaded configuration, or a default configuration if loading
/// fails. If no configuration file exists, creates a template file.
fn load_or_default() -> DwallConfig {
    match load_config() {
        Ok((config, path)) => {
            let _ = CONFIG_PATH.set(path);
            config
        }
        Err(ConfigError::NotFound) => {
            create_default_config_file();
            DwallConfig::default()
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load configuration, using defaults");
            DwallConfig::default()
        }
    }
}

/// Creates a template configuration file at the default location.
fn create_default_config_file() {
    let Some(config_path) = config_paths().into_iter().next() else {
        tracing::debug!("no config path available for creating template");
        return;
    };

    if config_path.exists() {
        return;
    }

    match template::create_config_file(&config_path) {
        Ok(()) => {
            let _ = CONFIG_PATH.set(config_path.clone());
            tracing::info!(
                path = %config_path.display(),
                "created default configuration file"
            );
        }
        Err(err) => {
            tracing::debug!(
                error = %err,
                path = %config_path.display(),
                "failed to create default configuration file"
            );
        }
    }
}

/// Initializes and returns the global configuration instance.
///
/// Idempotent; later calls return the same instance.
pub fn init() -> &'static DwallConfig { CONFIG.get_or_init(load_or_default) }

/// Returns the global configuration instance, initializing it if necessary.
pub fn get_config() -> &'static DwallConfig { CONFIG.get_or_init(load_or_default) }

/// Returns the path to the loaded configuration file, if any.
pub fn get_config_path() -> Option<&'static PathBuf> { CONFIG_PATH.get() }
