/// Fixed-width pixel-count histograms
///
/// Both feature tables (intensity and color code) are rows of raw pixel
/// counts with a width known at compile time.

/// Number of grayscale intensity buckets (luma / 10, with 250..=255 folded into 24)
pub const INTENSITY_BINS: usize = 25;

/// Number of quantized color codes (4 bands per channel, 4^3)
pub const COLOR_BINS: usize = 64;

/// A histogram of raw pixel counts with `N` buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Histogram<const N: usize> {
    counts: [u32; N],
}

/// 25-bucket grayscale intensity histogram
pub type IntensityHistogram = Histogram<INTENSITY_BINS>;

/// 64-bucket quantized color histogram
pub type ColorHistogram = Histogram<COLOR_BINS>;

impl<const N: usize> Default for Histogram<N> {
    fn default() -> Self {
        Self { counts: [0; N] }
    }
}

impl<const N: usize> Histogram<N> {
    /// Create an empty histogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a histogram directly from bucket counts
    pub fn from_counts(counts: [u32; N]) -> Self {
        Self { counts }
    }

    /// Count one pixel in `bucket`.
    ///
    /// Callers compute buckets with the quantizers in `extract`, which never
    /// produce a value outside `0..N`.
    pub fn increment(&mut self, bucket: usize) {
        self.counts[bucket] += 1;
    }

    /// Bucket counts in order
    pub fn bins(&self) -> &[u32; N] {
        &self.counts
    }

    /// Total number of pixels counted
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Sum of absolute per-bucket differences
    pub fn l1_distance(&self, other: &Self) -> u64 {
        self.counts
            .iter()
            .zip(other.counts.iter())
            .map(|(&a, &b)| a.abs_diff(b) as u64)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_histogram_is_empty() {
        let hist = IntensityHistogram::new();
        assert_eq!(hist.total(), 0);
        assert_eq!(hist.bins().len(), INTENSITY_BINS);
    }

    #[test]
    fn test_increment_and_total() {
        let mut hist = ColorHistogram::new();
        hist.increment(0);
        hist.increment(63);
        hist.increment(63);

        assert_eq!(hist.bins()[0], 1);
        assert_eq!(hist.bins()[63], 2);
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn test_l1_distance_is_symmetric_and_zero_on_self() {
        let mut a = [0u32; 4];
        a[0] = 10;
        let mut b = [0u32; 4];
        b[3] = 10;
        let a = Histogram::from_counts(a);
        let b = Histogram::from_counts(b);

        assert_eq!(a.l1_distance(&a), 0);
        assert_eq!(a.l1_distance(&b), 20);
        assert_eq!(b.l1_distance(&a), 20);
    }
}
