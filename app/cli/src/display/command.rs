//! Executable resolution for setter binaries.

use std::env;
use std::path::{Path, PathBuf};

/// Resolve the absolute path to an executable binary.
///
/// Absolute paths are checked directly. Names are searched on `PATH`
/// first, then in a short list of directories where user-installed tools
/// commonly live but which login shells sometimes omit from `PATH`.
///
/// # Errors
///
/// Returns a descriptive message when the binary cannot be found or is
/// not executable.
pub fn resolve_binary(binary: &str) -> Result<PathBuf, String> {
    if binary.is_empty() {
        return Err("Binary name cannot be empty".to_string());
    }

    let candidate = Path::new(binary);
    if candidate.is_absolute() {
        return if is_executable(candidate) {
            Ok(candidate.to_path_buf())
        } else {
            Err(format!("Binary at {} is not executable", candidate.display()))
        };
    }

    let mut search_paths = Vec::new();

    if let Some(path_var) = env::var_os("PATH") {
        search_paths.extend(env::split_paths(&path_var));
    }

    search_paths.push(PathBuf::from("/usr/local/bin"));

    if let Some(home) = env::var_os("HOME").map(PathBuf::from) {
        search_paths.push(home.join(".local/bin"));
        search_paths.push(home.join(".cargo/bin"));
    }

    for directory in search_paths {
        if directory.as_os_str().is_empty() {
            continue;
        }

        let candidate_path = directory.join(binary);
        if is_executable(&candidate_path) {
            return Ok(candidate_path);
        }
    }

    Err(format!(
        "Unable to locate executable '{binary}' in known search paths"
    ))
}

fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|metadata| metadata.is_file() && metadata.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
