//! Error types for dwall.
//!
//! This module provides the unified error type returned by CLI commands.
//! Module-local error enums convert into `DwallError` at the command
//! boundary so `main` can print a single `dwall: <error>` line.

use thiserror::Error;

use crate::config::ConfigError;
use crate::display::DisplayError;
use crate::heic::HeicError;
use crate::heic::timetable::TimetableError;
use crate::store::StoreError;
use crate::wallpaper::linker::LinkError;

/// Errors that can occur during application execution.
#[derive(Debug, Error)]
pub enum DwallError {
    /// Invalid command arguments.
    #[error("{0}")]
    InvalidArguments(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Wallpaper store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    /// HEIC container error.
    #[error("Container error: {0}")]
    Container(#[from] HeicError),
    /// Timetable metadata error.
    #[error("Timetable error: {0}")]
    Timetable(#[from] TimetableError),
    /// Frame extraction or linking error.
    #[error("Extraction error: {0}")]
    Extract(#[from] LinkError),
    /// Display server error.
    #[error("Display error: {0}")]
    Display(#[from] DisplayError),
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
