/// Enlarged preview of the reference image
/// Re-opens the source file so full resolution is never kept in memory
use image::imageops::FilterType;
use std::path::{Path, PathBuf};

use super::DecodeError;

/// RGBA preview scaled to fit a square box
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Load a preview whose longest edge is `max_edge`, keeping the aspect ratio.
///
/// Small sources are scaled up to the box.
pub async fn load_preview(path: PathBuf, max_edge: u32) -> Result<Preview, DecodeError> {
    // Spawn blocking task for CPU-bound work
    let join_path = path.clone();
    tokio::task::spawn_blocking(move || load_preview_blocking(&path, max_edge))
        .await
        .map_err(|e| DecodeError::new(join_path, format!("task join error: {e}")))?
}

fn load_preview_blocking(path: &Path, max_edge: u32) -> Result<Preview, DecodeError> {
    let img = image::open(path).map_err(|e| DecodeError::new(path, e))?;
    let preview = img.resize(max_edge, max_edge, FilterType::Lanczos3).to_rgba8();

    tracing::debug!(
        path = %path.display(),
        width = preview.width(),
        height = preview.height(),
        "preview ready"
    );

    Ok(Preview {
        width: preview.width(),
        height: preview.height(),
        rgba: preview.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[tokio::test]
    async fn test_preview_fits_box() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        RgbImage::new(200, 100).save(&path).unwrap();

        let preview = load_preview(path, 50).await.unwrap();
        assert_eq!((preview.width, preview.height), (50, 25));
        assert_eq!(preview.rgba.len(), 50 * 25 * 4);
    }

    #[tokio::test]
    async fn test_preview_missing_file() {
        let result = load_preview(PathBuf::from("/nonexistent/path.jpg"), 100).await;
        assert!(result.is_err());
    }
}
