//! Per-hour frame linking.
//!
//! A timetable names a frame for some hours only; every other hour shows
//! the frame of the nearest preceding entry. The plan assigns each of the
//! 24 hours either a real frame write or a symlink to an entry hour, and
//! the execute pass applies it to the store.

use std::collections::BTreeMap;
use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::os::unix::fs::symlink;
use std::path::Path;

use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use rayon::prelude::*;
use thiserror::Error;

use crate::heic::timetable::{HOURS, TimeSlot};
use crate::store::Store;

/// What an hour of the day resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourSource {
    /// A real JPEG written from the container frame at this index.
    Frame(usize),
    /// A symlink to the frame written for the given hour.
    Link(u32),
}

/// Errors that can occur during the extraction pass.
#[derive(Debug, Error)]
pub enum LinkError {
    /// A timetable entry references a frame the container does not have.
    #[error("timetable references frame {index} but the container has {available}")]
    FrameIndex { index: usize, available: usize },
    /// A frame could not be written.
    #[error("failed to write frame: {0}")]
    FrameWrite(String),
    /// A symlink could not be created.
    #[error("failed to link {path}: {source}")]
    Symlink {
        path: String,
        source: std::io::Error,
    },
}

/// Builds the per-hour plan for a sorted timetable.
///
/// Walks each entry's hour range the way the frames are laid out on disk:
/// the entry hour gets the real frame, and every following hour up to the
/// next entry (wrapping at 24) gets a symlink to it. Frames always win
/// over links when ranges collide, and an empty timetable yields an empty
/// plan.
#[must_use]
pub fn plan(slots: &[TimeSlot]) -> BTreeMap<u32, HourSource> {
    let mut hours = BTreeMap::new();

    for (i, slot) in slots.iter().enumerate() {
        hours.insert(slot.hour, HourSource::Frame(slot.index));

        let next = slots[(i + 1) % slots.len()].hour;
        let mut cursor = (slot.hour + 1) % HOURS;

        while cursor != next {
            // Links never displace a frame already placed for this hour
            hours.entry(cursor).or_insert(HourSource::Link(slot.hour));
            cursor = (cursor + 1) % HOURS;
        }
    }

    hours
}

/// Applies a plan to the store: removes stale frames, writes entry-hour
/// frames in parallel, then creates the symlink chain.
///
/// # Errors
///
/// Returns an error when a frame index is out of range or a write fails.
pub fn execute(
    hours: &BTreeMap<u32, HourSource>,
    frames: &[RgbImage],
    store: &Store,
    theme: &str,
    quality: u8,
) -> Result<(), LinkError> {
    // Stale frames or links from a previous install would make the
    // symlink pass fail, so clear the full hour range first.
    for hour in 0..HOURS {
        let _ = fs::remove_file(store.frame_path(theme, hour));
    }

    let writes: Vec<(u32, usize)> = hours
        .iter()
        .filter_map(|(&hour, source)| match source {
            HourSource::Frame(index) => Some((hour, *index)),
            HourSource::Link(_) => None,
        })
        .collect();

    writes.par_iter().try_for_each(|&(hour, index)| {
        let frame = frames.get(index).ok_or(LinkError::FrameIndex {
            index,
            available: frames.len(),
        })?;
        write_frame(frame, &store.frame_path(theme, hour), quality)
    })?;

    for (&hour, source) in hours {
        if let HourSource::Link(target_hour) = source {
            let target = store.frame_path(theme, *target_hour);
            let link = store.frame_path(theme, hour);

            symlink(&target, &link).map_err(|source| LinkError::Symlink {
                path: link.display().to_string(),
                source,
            })?;
        }
    }

    Ok(())
}

/// Encodes a frame as JPEG at the given path.
fn write_frame(frame: &RgbImage, path: &Path, quality: u8) -> Result<(), LinkError> {
    let file =
        File::create(path).map_err(|_| LinkError::FrameWrite(path.display().to_string()))?;
    let writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(writer, quality);

    frame
        .write_with_encoder(encoder)
        .map_err(|_| LinkError::FrameWrite(path.display().to_string()))
}
