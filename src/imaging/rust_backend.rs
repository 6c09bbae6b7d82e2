//! Pure Rust conversion backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, WebP, GIF) | `image::ImageReader::with_format` |
//! | Flatten alpha | `DynamicImage::to_rgb8` (JPEG has no alpha channel) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder::new_with_quality` |
//! | Atomic write | `tempfile::NamedTempFile::persist_noclobber` in the output directory |
//!
//! Encoding is deterministic for a given input and quality, so converting the
//! same file twice yields identical bytes.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::ConvertParams;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image, using its extension as the format hint.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    let format = ImageFormat::from_path(path).map_err(|e| BackendError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let reader = BufReader::new(File::open(path)?);
    ImageReader::with_format(reader, format)
        .decode()
        .map_err(|e| BackendError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Encode as JPEG into a temp file next to `path`, then move it into place.
///
/// An existing file at `path` is left alone and reported as
/// [`BackendError::OutputExists`]. On any failure the temp file is removed
/// when it drops.
fn save_jpeg(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;

    let mut writer = BufWriter::new(tmp.as_file_mut());
    let encoder = JpegEncoder::new_with_quality(&mut writer, quality as u8);
    DynamicImage::ImageRgb8(img.to_rgb8())
        .write_with_encoder(encoder)
        .map_err(|e| BackendError::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    writer.flush()?;
    drop(writer);

    tmp.persist_noclobber(path).map_err(|e| match e.error.kind() {
        ErrorKind::AlreadyExists => BackendError::OutputExists(path.to_path_buf()),
        _ => BackendError::Io(e.error),
    })?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| BackendError::Decode {
            path: path.to_path_buf(),
            message: format!("Failed to read dimensions: {e}"),
        })?;
        Ok(Dimensions { width, height })
    }

    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError> {
        if params.output.exists() {
            return Err(BackendError::OutputExists(params.output.clone()));
        }
        let img = load_image(&params.source)?;
        log::debug!(
            "Decoded {} ({}x{})",
            params.source.display(),
            img.width(),
            img.height()
        );
        save_jpeg(&img, &params.output, params.quality.value())
    }
}
