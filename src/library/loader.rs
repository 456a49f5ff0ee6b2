/// Batch image loader
///
/// Decodes every image in a folder once, up front. Each image yields its
/// histograms (at the fixed processing size) and a grid thumbnail; the
/// decoded pixels are dropped afterwards.

use image::{DynamicImage, ImageReader};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::task;

use super::thumbnail::square_thumbnail;
use super::{scan_folder, DecodeError, LoadError};
use crate::features::{extract_at_processing_size, ImageFeatures};
use crate::state::data::Thumbnail;
use crate::state::settings::Settings;

/// One successfully decoded image
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub path: PathBuf,
    pub filename: String,
    pub features: ImageFeatures,
    pub thumbnail: Thumbnail,
}

/// Outcome of loading a whole folder
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Folder that was scanned
    pub folder: PathBuf,
    /// Decoded images, in load order
    pub images: Vec<LoadedImage>,
    /// Images that were skipped
    pub failures: Vec<DecodeError>,
}

impl LoadReport {
    /// Number of files the scan picked up
    pub fn attempted(&self) -> usize {
        self.images.len() + self.failures.len()
    }

    /// One-line status for the user
    pub fn summary(&self) -> String {
        if self.failures.is_empty() {
            format!("Loaded {} images from {}", self.images.len(), self.folder.display())
        } else {
            format!(
                "Loaded {} images from {} ({} of {} images failed to load)",
                self.images.len(),
                self.folder.display(),
                self.failures.len(),
                self.attempted(),
            )
        }
    }
}

fn decode(path: &Path) -> Result<DynamicImage, DecodeError> {
    ImageReader::open(path)
        .map_err(|e| DecodeError::new(path, e))?
        .with_guessed_format()
        .map_err(|e| DecodeError::new(path, e))?
        .decode()
        .map_err(|e| DecodeError::new(path, e))
}

/// Decode one image, extract its histograms and build its thumbnail
pub fn load_image(path: &Path, settings: &Settings) -> Result<LoadedImage, DecodeError> {
    let img = decode(path)?;
    if img.width() == 0 || img.height() == 0 {
        return Err(DecodeError::new(path, "image has no pixels"));
    }

    let features = extract_at_processing_size(&img, settings.processing_size());
    tracing::debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        pixels = features.intensity.total(),
        "histograms extracted"
    );
    let thumbnail = square_thumbnail(&img, settings.thumbnail_size);

    let filename = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    Ok(LoadedImage {
        path: path.to_path_buf(),
        filename,
        features,
        thumbnail,
    })
}

/// Load every image in `folder`.
///
/// Fails only if the folder cannot be listed. Per-image decode failures are
/// logged and collected in the report; survivors keep their scan order.
pub fn load_folder(folder: &Path, settings: &Settings) -> Result<LoadReport, LoadError> {
    let started = Instant::now();
    let paths = scan_folder(folder, settings)?;

    tracing::info!(folder = %folder.display(), count = paths.len(), "loading images");

    let mut report = LoadReport {
        folder: folder.to_path_buf(),
        ..LoadReport::default()
    };

    for path in paths {
        match load_image(&path, settings) {
            Ok(image) => report.images.push(image),
            Err(e) => {
                tracing::warn!("{e}");
                report.failures.push(e);
            }
        }
    }

    tracing::info!(
        loaded = report.images.len(),
        failed = report.failures.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "load complete"
    );

    Ok(report)
}

/// Run `load_folder` on the blocking pool so the UI keeps drawing
pub async fn load_folder_async(folder: PathBuf, settings: Settings) -> Result<LoadReport, LoadError> {
    // Spawn blocking because decoding is CPU-intensive
    task::spawn_blocking(move || load_folder(&folder, &settings))
        .await
        .map_err(|e| LoadError::Join(e.to_string()))?
}
