//! HEIC container access.
//!
//! Thin wrapper over `libheif-rs` exposing the two things dwall needs
//! from a dynamic wallpaper container: the primary image's metadata
//! blocks (carrying the timetable) and the top-level images decoded to
//! RGB frames.

pub mod timetable;

use std::path::Path;

use image::RgbImage;
use libheif_rs::{ColorSpace, HeifContext, ItemId, LibHeif, RgbChroma};

/// Errors that can occur while reading a HEIC container.
#[derive(Debug)]
pub enum HeicError {
    /// The container file does not exist.
    NotFound(String),
    /// The container path is not valid UTF-8.
    InvalidPath(String),
    /// The container could not be opened or parsed.
    Open(String),
    /// A frame could not be decoded.
    Decode(String),
    /// The primary image carries no metadata blocks.
    NoMetadata,
}

impl std::fmt::Display for HeicError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "no file exists at \"{path}\""),
            Self::InvalidPath(path) => write!(f, "container path is not valid UTF-8: {path}"),
            Self::Open(msg) => write!(f, "failed to open container: {msg}"),
            Self::Decode(msg) => write!(f, "failed to decode frame: {msg}"),
            Self::NoMetadata => write!(f, "primary image carries no metadata"),
        }
    }
}

impl std::error::Error for HeicError {}

/// An opened dynamic wallpaper container.
pub struct Container {
    ctx: HeifContext<'static>,
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container").finish_non_exhaustive()
    }
}

impl Container {
    /// Opens the container at the given path.
    ///
    /// # Errors
    ///
    /// Returns `HeicError::NotFound` when the file is missing, and
    /// `HeicError::Open` when libheif rejects it.
    pub fn open(path: &Path) -> Result<Self, HeicError> {
        if !path.exists() {
            return Err(HeicError::NotFound(path.display().to_string()));
        }

        let path_str = path
            .to_str()
            .ok_or_else(|| HeicError::InvalidPath(path.display().to_string()))?;

        let ctx = HeifContext::read_from_file(path_str)
            .map_err(|err| HeicError::Open(err.to_string()))?;

        Ok(Self { ctx })
    }

    /// Returns the raw metadata blocks of the primary image.
    ///
    /// The timetable attribute lives in the XMP block; callers scan the
    /// blocks rather than trusting content-type declarations, since some
    /// encoders label the packet inconsistently.
    ///
    /// # Errors
    ///
    /// Returns an error when the primary image is unreadable or carries
    /// no metadata at all.
    pub fn metadata_blocks(&self) -> Result<Vec<Vec<u8>>, HeicError> {
        let handle = self
            .ctx
            .primary_image_handle()
            .map_err(|err| HeicError::Open(err.to_string()))?;

        let blocks: Vec<Vec<u8>> = handle
            .all_metadata()
            .into_iter()
            .map(|meta| meta.raw_data)
            .collect();

        if blocks.is_empty() {
            return Err(HeicError::NoMetadata);
        }

        Ok(blocks)
    }

    /// Decodes every top-level image into an RGB frame, in container order.
    ///
    /// # Errors
    ///
    /// Returns an error when any frame fails to decode.
    pub fn decode_frames(&self) -> Result<Vec<RgbImage>, HeicError> {
        let lib_heif = LibHeif::new();

        let count = self.ctx.number_of_top_level_images();
        let mut ids: Vec<ItemId> = vec![0; count];
        let filled = self.ctx.top_level_image_ids(&mut ids);
        ids.truncate(filled);

        let mut frames = Vec::with_capacity(ids.len());

        for id in ids {
            let handle = self
                .ctx
                .image_handle(id)
                .map_err(|err| HeicError::Decode(err.to_string()))?;

            let decoded = lib_heif
                .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
                .map_err(|err| HeicError::Decode(err.to_string()))?;

            frames.push(to_rgb_image(&decoded)?);
        }

        Ok(frames)
    }
}

/// Copies a decoded interleaved-RGB image into an `RgbImage`, dropping
/// libheif's row padding.
fn to_rgb_image(decoded: &libheif_rs::Image) -> Result<RgbImage, HeicError> {
    let planes = decoded.planes();
    let plane = planes
        .interleaved
        .ok_or_else(|| HeicError::Decode("no interleaved RGB plane".to_string()))?;

    let width = plane.width;
    let height = plane.height;
    let row_bytes = width as usize * 3;

    let mut buf = Vec::with_capacity(row_bytes * height as usize);
    for row in plane.data.chunks(plane.stride).take(height as usize) {
        buf.extend_from_slice(&row[..row_bytes]);
    }

    RgbImage::from_raw(width, height, buf)
        .ok_or_else(|| HeicError::Decode("frame buffer size mismatch".to_string()))
}
