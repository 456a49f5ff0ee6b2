use image::{imageops::FilterType, DynamicImage, Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use super::histogram::{ColorHistogram, IntensityHistogram, INTENSITY_BINS};

/// The fixed resolution every image is resampled to before histogramming.
///
/// Histograms are raw counts, so distances between them are only comparable
/// when every image contributes the same number of pixels. The ranker divides
/// by `pixel_count()` of this same size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingSize {
    pub width: u32,
    pub height: u32,
}

impl ProcessingSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels in one processed image
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl Default for ProcessingSize {
    fn default() -> Self {
        Self::new(384, 256)
    }
}

/// Both histograms computed for one image
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageFeatures {
    pub intensity: IntensityHistogram,
    pub color: ColorHistogram,
}

/// Grayscale intensity bucket for a pixel, in `0..25`.
///
/// Luma is `0.299 R + 0.587 G + 0.114 B` truncated toward zero, then divided
/// by 10. Luma 250..=255 lands in bucket 25 and is folded into 24.
pub fn intensity_bucket(pixel: Rgb<u8>) -> usize {
    let [r, g, b] = pixel.0;
    let luma = (r as f64 * 0.299 + g as f64 * 0.587 + b as f64 * 0.114) as usize;
    (luma / 10).min(INTENSITY_BINS - 1)
}

/// Quantize one channel into 4 bands: <64, 64..128, 128..192, >=192
fn channel_band(value: u8) -> usize {
    (value / 64) as usize
}

/// Packed color code for a pixel, in `0..64`.
///
/// R is the most significant base-4 digit (x16), then G (x4), then B (x1).
pub fn color_code(pixel: Rgb<u8>) -> usize {
    let [r, g, b] = pixel.0;
    channel_band(r) * 16 + channel_band(g) * 4 + channel_band(b)
}

/// Compute both histograms in a single pass over every pixel
pub fn extract(image: &RgbImage) -> ImageFeatures {
    let mut features = ImageFeatures::default();

    for pixel in image.pixels() {
        features.intensity.increment(intensity_bucket(*pixel));
        features.color.increment(color_code(*pixel));
    }

    features
}

/// Normalize a decoded image to RGB8 at the processing size, then extract.
///
/// Alpha and 16-bit layouts are converted first; the source image is left
/// untouched.
pub fn extract_at_processing_size(image: &DynamicImage, size: ProcessingSize) -> ImageFeatures {
    let rgb = if image.width() == size.width && image.height() == size.height {
        image.to_rgb8()
    } else {
        image
            .resize_exact(size.width, size.height, FilterType::Triangle)
            .to_rgb8()
    };

    extract(&rgb)
}
