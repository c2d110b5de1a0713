//! Display server detection and wallpaper setting.
//!
//! Wayland sessions are detected via `WAYLAND_DISPLAY` and handled with
//! `swaybg`, spawned through `riverctl` so the process outlives this one.
//! X11 sessions are detected via `DISPLAY` and handled with `feh`, which
//! writes the root window and exits.

mod command;

use std::env;
use std::path::Path;
use std::process::{Command, Stdio};

use sysinfo::{ProcessesToUpdate, System};

use crate::config::SetterConfig;

/// The detected display server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayServer {
    Wayland,
    X11,
}

/// Errors that can occur while setting the wallpaper.
#[derive(Debug)]
pub enum DisplayError {
    /// Neither `WAYLAND_DISPLAY` nor `DISPLAY` is set.
    NoDisplayServer,
    /// A required environment variable is missing.
    MissingEnv(&'static str),
    /// The setter binary could not be found.
    CommandNotFound(String),
    /// The setter process could not be spawned.
    Spawn(String),
}

impl std::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDisplayServer => write!(f, "No display server is running"),
            Self::MissingEnv(name) => write!(f, "required environment variable {name} is not set"),
            Self::CommandNotFound(msg) => write!(f, "{msg}"),
            Self::Spawn(msg) => write!(f, "failed to run setter: {msg}"),
        }
    }
}

impl std::error::Error for DisplayError {}

/// Detects the running display server from the environment.
///
/// # Errors
///
/// Returns `DisplayError::NoDisplayServer` when neither variable is set.
pub fn detect() -> Result<DisplayServer, DisplayError> {
    detect_from(
        env::var_os("WAYLAND_DISPLAY").is_some(),
        env::var_os("DISPLAY").is_some(),
    )
}

/// Detection on explicit flags; Wayland wins when both are present.
pub(crate) fn detect_from(wayland: bool, x11: bool) -> Result<DisplayServer, DisplayError> {
    if wayland {
        Ok(DisplayServer::Wayland)
    } else if x11 {
        Ok(DisplayServer::X11)
    } else {
        Err(DisplayError::NoDisplayServer)
    }
}

/// Sets the desktop wallpaper to the given image.
///
/// # Errors
///
/// Returns an error when no display server is detected, the setter
/// binary is missing, or the spawn fails. A nonzero setter exit is
/// logged, not treated as fatal, matching swaybg's habit of staying
/// alive past the handoff.
pub fn set_wallpaper(image: &Path, setter: &SetterConfig) -> Result<(), DisplayError> {
    match detect()? {
        DisplayServer::Wayland => set_wayland(image, setter),
        DisplayServer::X11 => set_x11(image, setter),
    }
}

fn set_wayland(image: &Path, setter: &SetterConfig) -> Result<(), DisplayError> {
    terminate_running_setter();

    let riverctl = command::resolve_binary("riverctl").map_err(DisplayError::CommandNotFound)?;

    let runtime_dir =
        env::var("XDG_RUNTIME_DIR").map_err(|_| DisplayError::MissingEnv("XDG_RUNTIME_DIR"))?;
    let wayland_display =
        env::var("WAYLAND_DISPLAY").map_err(|_| DisplayError::MissingEnv("WAYLAND_DISPLAY"))?;

    let spawn_cmd = format!(
        r#"swaybg --image "{}" --mode {} --output "{}""#,
        image.display(),
        setter.mode,
        setter.output
    );

    let status = Command::new(riverctl)
        .args(["spawn", &spawn_cmd])
        .env_clear()
        .env("XDG_RUNTIME_DIR", runtime_dir)
        .env("WAYLAND_DISPLAY", wayland_display)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|err| DisplayError::Spawn(err.to_string()))?;

    if !status.success() {
        tracing::warn!(%status, "riverctl exited with a failure status");
    }

    Ok(())
}

fn set_x11(image: &Path, setter: &SetterConfig) -> Result<(), DisplayError> {
    let feh = command::resolve_binary("feh").map_err(DisplayError::CommandNotFound)?;

    let status = Command::new(feh)
        .arg(feh_mode_flag(&setter.mode))
        .arg(image)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|err| DisplayError::Spawn(err.to_string()))?;

    if !status.success() {
        tracing::warn!(%status, "feh exited with a failure status");
    }

    Ok(())
}

/// Maps the configured swaybg scaling mode onto feh's background flags.
fn feh_mode_flag(mode: &str) -> &'static str {
    match mode {
        "fit" => "--bg-max",
        "center" => "--bg-center",
        "stretch" => "--bg-scale",
        "tile" => "--bg-tile",
        _ => "--bg-fill",
    }
}

/// Terminates any running swaybg so outputs do not stack stale layers.
fn terminate_running_setter() {
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::All, true);

    for process in system.processes_by_exact_name("swaybg".as_ref()) {
        if process.kill() {
            tracing::debug!(pid = process.pid().as_u32(), "terminated running swaybg");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_prefers_wayland() {
        assert_eq!(detect_from(true, true).unwrap(), DisplayServer::Wayland);
        assert_eq!(detect_from(true, false).unwrap(), DisplayServer::Wayland);
    }

    #[test]
    fn test_detect_falls_back_to_x11() {
        assert_eq!(detect_from(false, true).unwrap(), DisplayServer::X11);
    }

    #[test]
    fn test_detect_errors_without_display() {
        let err = detect_from(false, false).unwrap_err();
        assert!(matches!(err, DisplayError::NoDisplayServer));
        assert_eq!(err.to_string(), "No display server is running");
    }

    #[test]
    fn test_feh_mode_mapping() {
        assert_eq!(feh_mode_flag("fill"), "--bg-fill");
        assert_eq!(feh_mode_flag("fit"), "--bg-max");
        assert_eq!(feh_mode_flag("center"), "--bg-center");
        assert_eq!(feh_mode_flag("stretch"), "--bg-scale");
        assert_eq!(feh_mode_flag("tile"), "--bg-tile");
        assert_eq!(feh_mode_flag("unknown"), "--bg-fill");
    }

    #[test]
    fn test_missing_env_display() {
        let err = DisplayError::MissingEnv("XDG_RUNTIME_DIR");
        assert!(err.to_string().contains("XDG_RUNTIME_DIR"));
    }
}
