/// Image feature extraction
///
/// Every loaded image is reduced to two fixed-width histograms:
/// - a 25-bucket grayscale intensity histogram (histogram.rs)
/// - a 64-bucket quantized color-code histogram (histogram.rs)
///
/// Both are filled in one pass over the pixels (extract.rs).

pub mod extract;
pub mod histogram;

pub use extract::{extract_at_processing_size, ImageFeatures, ProcessingSize};
pub use histogram::{ColorHistogram, Histogram, IntensityHistogram};
