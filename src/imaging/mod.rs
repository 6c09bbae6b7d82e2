//! Format conversion — pure Rust, no system codecs.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Decode** (PNG, WebP, GIF, JPEG) | `image::ImageReader` with the format implied by the extension |
//! | **Encode → JPEG** | `image::codecs::jpeg::JpegEncoder` at a fixed quality |
//!
//! The module is split into:
//! - **Parameters**: data structures describing a conversion
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: output naming + conversion through a backend

pub mod backend;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use operations::{convert_to_postable, converted_path};
pub use params::{ConvertParams, Quality};
pub use rust_backend::RustBackend;
