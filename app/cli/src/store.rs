//! Wallpaper store layout.
//!
//! The store is a directory tree holding HEIC containers and the frames
//! extracted from them:
//!
//! ```text
//! <root>/heic/<theme>.heic       input containers
//! <root>/jpg/<theme>-<hour>.jpg  extracted frames and per-hour symlinks
//! ```
//!
//! The root comes from the `DWALL_PATH` environment variable, with the
//! config `path` field as fallback.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use natord::compare;
use thiserror::Error;

use crate::config::DwallConfig;
use crate::utils::path::expand;

/// Environment variable naming the store root.
pub const STORE_ENV: &str = "DWALL_PATH";

/// Errors that can occur while resolving the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Neither `DWALL_PATH` nor the config `path` field is set.
    #[error(
        "no wallpaper store configured; set $DWALL_PATH or the `path` field in dwall.jsonc"
    )]
    MissingPath,
}

/// A resolved wallpaper store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Creates a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    /// Resolves the store from the environment and configuration.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MissingPath` when no root is configured.
    pub fn resolve(config: &DwallConfig) -> Result<Self, StoreError> {
        let env_root = std::env::var(STORE_ENV).ok();
        Self::resolve_from(env_root.as_deref(), config)
    }

    /// Resolves the store from an explicit environment value, falling
    /// back to the config `path` field.
    pub(crate) fn resolve_from(
        env_root: Option<&str>,
        config: &DwallConfig,
    ) -> Result<Self, StoreError> {
        if let Some(root) = env_root
            && !root.trim().is_empty()
        {
            return Ok(Self::new(expand(root)));
        }

        if !config.path.trim().is_empty() {
            return Ok(Self::new(expand(&config.path)));
        }

        Err(StoreError::MissingPath)
    }

    /// Returns the store root directory.
    #[must_use]
    pub fn root(&self) -> &Path { &self.root }

    /// Returns the directory holding HEIC containers.
    #[must_use]
    pub fn heic_dir(&self) -> PathBuf { self.root.join("heic") }

    /// Returns the directory holding extracted frames.
    #[must_use]
    pub fn jpg_dir(&self) -> PathBuf { self.root.join("jpg") }

    /// Returns the container path for a theme: `<root>/heic/<theme>.heic`.
    #[must_use]
    pub fn container_path(&self, theme: &str) -> PathBuf {
        self.heic_dir().join(format!("{theme}.heic"))
    }

    /// Returns the frame path for a theme and hour:
    /// `<root>/jpg/<theme>-<hour>.jpg`.
    #[must_use]
    pub fn frame_path(&self, theme: &str, hour: u32) -> PathBuf {
        self.jpg_dir().join(format!("{theme}-{hour}.jpg"))
    }

    /// Creates the frame directory when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_jpg_dir(&self) -> io::Result<()> {
        let dir = self.jpg_dir();
        if !dir.exists() {
            std::fs::create_dir_all(&dir)?;
        }
        Ok(())
    }

    /// Lists installed theme names (container basenames), naturally sorted.
    #[must_use]
    pub fn themes(&self) -> Vec<String> {
        let mut themes = Vec::new();

        if let Ok(entries) = std::fs::read_dir(self.heic_dir()) {
            for entry in entries.flatten() {
                let path = entry.path();
                let is_heic = path
                    .extension()
                    .and_then(OsStr::to_str)
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("heic"));

                if path.is_file()
                    && is_heic
                    && let Some(stem) = path.file_stem().and_then(OsStr::to_str)
                {
                    themes.push(stem.to_string());
                }
            }
        }

        themes.sort_by(|a, b| compare(a, b));
        themes
    }
}
