//! Persisted theme selection.
//!
//! The last theme passed on the command line is stored in a plain-text
//! state file (`<config dir>/theme`) so later invocations without an
//! argument reuse it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the state file inside the dwall config directory.
const THEME_FILE: &str = "theme";

/// Returns the path of the theme state file.
///
/// Prefers `$XDG_CONFIG_HOME/dwall/theme`, falling back to
/// `~/.config/dwall/theme`.
#[must_use]
pub fn state_file() -> Option<PathBuf> {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.trim().is_empty()
    {
        return Some(PathBuf::from(xdg_config).join("dwall").join(THEME_FILE));
    }

    dirs::home_dir().map(|home| home.join(".config").join("dwall").join(THEME_FILE))
}

/// Returns the persisted theme name, if any.
#[must_use]
pub fn load() -> Option<String> { state_file().and_then(|path| load_from(&path)) }

/// Persists the theme name for later invocations.
///
/// # Errors
///
/// Returns an error if the state directory cannot be determined or the
/// file cannot be written.
pub fn persist(name: &str) -> io::Result<()> {
    let path = state_file().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "could not determine config directory")
    })?;

    persist_in(&path, name)
}

/// Reads a theme name from the given state file.
///
/// Returns `None` for a missing file or one holding only whitespace.
#[must_use]
pub fn load_from(path: &Path) -> Option<String> {
    let contents = fs::read_to_string(path).ok()?;
    let name = contents.trim();

    if name.is_empty() { None } else { Some(name.to_string()) }
}

/// Writes a theme name to the given state file, creating parent
/// directories when missing.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn persist_in(path: &Path, name: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, name)
}
