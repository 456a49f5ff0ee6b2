/// Image source
///
/// This module handles:
/// - Listing a flat folder of images (scan.rs)
/// - Decoding each image and extracting its histograms (loader.rs)
/// - Generating square grid thumbnails (thumbnail.rs)
/// - Generating the enlarged preview of the reference image (preview.rs)

pub mod loader;
pub mod preview;
pub mod scan;
pub mod thumbnail;

pub use loader::{load_folder_async, LoadReport};
pub use preview::{load_preview, Preview};
pub use scan::scan_folder;

use std::path::PathBuf;
use thiserror::Error;

/// A single source image could not be read or decoded.
///
/// Never aborts a batch: the image is dropped and the failure reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to decode {}: {message}", .path.display())]
pub struct DecodeError {
    pub path: PathBuf,
    pub message: String,
}

impl DecodeError {
    pub fn new(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// The batch itself could not run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("cannot read image folder {}: {message}", .path.display())]
    Folder { path: PathBuf, message: String },
    #[error("background task failed: {0}")]
    Join(String),
}
