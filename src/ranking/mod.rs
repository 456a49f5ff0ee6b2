/// Similarity ranking
///
/// Orders a working set by L1 histogram distance to a reference image.
/// The algorithm only needs a fixed-width row per image, so the same code
/// ranks against either the intensity or the color table (metric.rs).

pub mod metric;

pub use metric::Metric;

use thiserror::Error;

use crate::features::{Histogram, ProcessingSize};
use crate::state::data::ImageId;

/// Why a rank request did not produce a new order.
///
/// In every case the caller's working set is left as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    /// No reference image has been picked yet
    #[error("no image selected")]
    NoSelection,
    /// The reference id has no row in the histogram table
    #[error("reference image {0} is not in the histogram table")]
    UnknownReference(ImageId),
    /// A working-set id has no row in the histogram table
    #[error("image {0} is not in the histogram table")]
    UnknownImage(ImageId),
    /// Histogram table and working set disagree on the image count
    #[error("histogram table has {rows} rows but the working set has {images} images")]
    DimensionMismatch { images: usize, rows: usize },
}

impl RankError {
    /// True for integration bugs, false for conditions the user can fix
    pub fn is_fatal(&self) -> bool {
        !matches!(self, RankError::NoSelection)
    }
}

/// One image in a ranked order with its distance to the reference
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedImage {
    pub id: ImageId,
    /// Sum of absolute bucket differences
    pub raw_distance: u64,
    /// `raw_distance` divided by the processing-size pixel count
    pub distance: f64,
}

/// Result of a successful rank, nearest first
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub reference: ImageId,
    pub entries: Vec<RankedImage>,
}

impl Ranking {
    /// Image ids in ranked order
    pub fn order(&self) -> Vec<ImageId> {
        self.entries.iter().map(|entry| entry.id).collect()
    }
}

/// Rank `working_set` by distance to `reference` using `table`.
///
/// `table` is indexed by `ImageId` and must have exactly one row per image in
/// the working set. Every row must have been extracted at `size`: the scale
/// factor is the same for all images, so it never changes the order, only the
/// reported distances.
///
/// Ties keep their current relative order, except that the reference itself
/// (distance 0) always comes first, even ahead of identical images.
pub fn rank<const N: usize>(
    working_set: &[ImageId],
    table: &[Histogram<N>],
    reference: Option<ImageId>,
    size: ProcessingSize,
) -> Result<Ranking, RankError> {
    let reference = reference.ok_or(RankError::NoSelection)?;

    if table.len() != working_set.len() {
        return Err(RankError::DimensionMismatch {
            images: working_set.len(),
            rows: table.len(),
        });
    }

    let reference_row = table
        .get(reference.index())
        .ok_or(RankError::UnknownReference(reference))?;

    let scale = size.pixel_count().max(1) as f64;

    let mut entries = working_set
        .iter()
        .map(|&id| {
            let row = table.get(id.index()).ok_or(RankError::UnknownImage(id))?;
            let raw_distance = reference_row.l1_distance(row);
            Ok(RankedImage {
                id,
                raw_distance,
                distance: raw_distance as f64 / scale,
            })
        })
        .collect::<Result<Vec<_>, RankError>>()?;

    // Stable: equal distances keep their working-set order
    entries.sort_by_key(|entry| (entry.raw_distance, entry.id != reference));

    Ok(Ranking { reference, entries })
}
