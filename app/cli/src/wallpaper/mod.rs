//! Wallpaper orchestration.
//!
//! One pass: resolve the store and theme, make sure the current hour's
//! frame exists (extracting the container when it does not), then hand
//! the frame to the display setter.

pub mod linker;

use chrono::Timelike;

use crate::config::{self, DwallConfig};
use crate::display;
use crate::error::DwallError;
use crate::heic::{Container, timetable};
use crate::store::Store;

/// Sets the wallpaper for the current hour, extracting frames on demand.
///
/// # Errors
///
/// Returns an error when the store is unconfigured, the container is
/// missing or undecodable, or no display server is running.
pub fn apply(theme: &str, force: bool) -> Result<(), DwallError> {
    let config = config::get_config();
    let store = Store::resolve(config)?;

    let hour = current_hour();
    let frame = store.frame_path(theme, hour);

    if force || !frame.exists() {
        install(&store, theme, config)?;
    }

    display::set_wallpaper(&frame, &config.setter)?;
    tracing::info!(theme, hour, "wallpaper applied");

    Ok(())
}

/// Extracts a container into per-hour frames and symlinks.
///
/// # Errors
///
/// Returns an error when the container is missing, its timetable cannot
/// be decoded, or the frames cannot be written.
pub fn install(store: &Store, theme: &str, config: &DwallConfig) -> Result<(), DwallError> {
    let container = Container::open(&store.container_path(theme))?;

    let blocks = container.metadata_blocks()?;
    let slots = timetable::from_metadata(&blocks)?;
    let frames = container.decode_frames()?;

    store.ensure_jpg_dir()?;

    let hours = linker::plan(&slots);
    linker::execute(&hours, &frames, store, theme, config.jpeg_quality)?;

    tracing::info!(
        theme,
        frames = frames.len(),
        entries = slots.len(),
        "extracted wallpaper frames"
    );

    Ok(())
}

/// Returns the local hour of day in `[0, 24)`.
fn current_hour() -> u32 { chrono::Local::now().hour() }
