/// Presentation widgets
///
/// - Thumbnail grid of the working set (grid.rs)
/// - Bar chart of the reference image's histograms (histogram.rs)

pub mod grid;
pub mod histogram;
