//! Shared test utilities: fixture files, synthetic images and mtime control.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! create_test_png(&tmp.path().join("photo_1.png"), 64, 48);
//! set_age(&tmp.path().join("photo_1.png"), 60);
//! ```

use image::{DynamicImage, ImageEncoder, RgbImage, RgbaImage};
use std::fs::File;
use std::path::Path;
use std::time::{Duration, SystemTime};

// =========================================================================
// Plain files
// =========================================================================

/// Create an empty file (and its parent directories).
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    File::create(path).unwrap();
}

/// Set a file's modification time to `seconds` before now.
pub fn set_age(path: &Path, seconds: u64) {
    let when = SystemTime::now() - Duration::from_secs(seconds);
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(when)
        .unwrap();
}

// =========================================================================
// Synthetic images
// =========================================================================

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Write a small valid JPEG.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = gradient(width, height);
    let writer = std::io::BufWriter::new(File::create(path).unwrap());
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a small valid PNG with an alpha channel.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 200, 180])
    });
    DynamicImage::ImageRgba8(img)
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

/// Write a small valid lossless WebP.
pub fn create_test_webp(path: &Path, width: u32, height: u32) {
    DynamicImage::ImageRgb8(gradient(width, height))
        .save_with_format(path, image::ImageFormat::WebP)
        .unwrap();
}

/// Write a small valid GIF.
pub fn create_test_gif(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, _| {
        image::Rgba([if x % 2 == 0 { 255 } else { 0 }, 0, 0, 255])
    });
    DynamicImage::ImageRgba8(img)
        .save_with_format(path, image::ImageFormat::Gif)
        .unwrap();
}

/// Write bytes that carry an image extension but cannot be decoded.
pub fn create_corrupt_image(path: &Path) {
    std::fs::write(path, b"definitely not an image").unwrap();
}
