//! Shell-like path expansion.
//!
//! Store and config paths may be written with a leading tilde
//! (`~/.local/share/dwall`); this module expands them to absolute paths.

use std::path::PathBuf;

/// Expands shell-like paths (tilde) to absolute paths.
///
/// Absolute and relative paths are returned unchanged; paths starting
/// with `~` are expanded to the user's home directory.
#[must_use]
pub fn expand(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return PathBuf::new();
    }

    let expanded = shellexpand::tilde(path);
    PathBuf::from(expanded.as_ref())
}
