//! Image backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the pipeline needs:
//! identify (read pixel dimensions) and convert (decode, then encode as JPEG).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the recording `MockBackend` below.

use super::params::ConvertParams;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("Failed to encode {path}: {message}")]
    Encode { path: PathBuf, message: String },
    #[error("{0} already exists; move it away or post it first")]
    OutputExists(PathBuf),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image conversion backends.
pub trait ImageBackend {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode `params.source` and write it as a JPEG to `params.output`.
    ///
    /// On error no file may be left at `params.output`, and the source must be
    /// untouched. An existing file at `params.output` is never replaced:
    /// that is [`BackendError::OutputExists`].
    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::Quality;
    use std::cell::RefCell;

    /// Mock backend that records operations without decoding anything.
    ///
    /// `convert` writes a placeholder file at the output path so later stages
    /// have something to move and read.
    #[derive(Default)]
    pub struct MockBackend {
        pub operations: RefCell<Vec<RecordedOp>>,
        pub fail_decode: bool,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Convert {
            source: String,
            output: String,
            quality: u32,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing_decode() -> Self {
            Self {
                fail_decode: true,
                ..Self::default()
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.borrow().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.operations
                .borrow_mut()
                .push(RecordedOp::Identify(path.to_string_lossy().to_string()));
            Ok(Dimensions {
                width: 1,
                height: 1,
            })
        }

        fn convert(&self, params: &ConvertParams) -> Result<(), BackendError> {
            self.operations.borrow_mut().push(RecordedOp::Convert {
                source: params.source.to_string_lossy().to_string(),
                output: params.output.to_string_lossy().to_string(),
                quality: params.quality.value(),
            });
            if self.fail_decode {
                return Err(BackendError::Decode {
                    path: params.source.clone(),
                    message: "mock decode failure".into(),
                });
            }
            if params.output.exists() {
                return Err(BackendError::OutputExists(params.output.clone()));
            }
            std::fs::write(&params.output, b"converted")?;
            Ok(())
        }
    }

    #[test]
    fn mock_records_convert() {
        let tmp = tempfile::TempDir::new().unwrap();
        let output = tmp.path().join("out.jpg");
        let backend = MockBackend::new();

        backend
            .convert(&ConvertParams {
                source: "/source.png".into(),
                output: output.clone(),
                quality: Quality::new(85),
            })
            .unwrap();

        assert!(output.exists());
        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Convert { source, quality: 85, .. } if source == "/source.png"
        ));
    }

    #[test]
    fn mock_decode_failure_writes_nothing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let output = tmp.path().join("out.jpg");
        let backend = MockBackend::failing_decode();

        let result = backend.convert(&ConvertParams {
            source: "/broken.webp".into(),
            output: output.clone(),
            quality: Quality::default(),
        });

        assert!(matches!(result, Err(BackendError::Decode { .. })));
        assert!(!output.exists());
    }
}
