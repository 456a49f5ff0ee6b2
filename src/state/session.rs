use std::path::{Path, PathBuf};

use super::data::{ImageId, ImageRecord, Selection};
use crate::features::{ColorHistogram, ImageFeatures, IntensityHistogram, ProcessingSize};
use crate::library::LoadReport;
use crate::ranking::{self, Metric, RankError, Ranking};

/// Everything the browser knows about the currently loaded folder.
///
/// Owned by the top-level application and handed to the ranker by reference.
/// Histogram rows are indexed by `ImageId`, and the working set is always a
/// permutation of every loaded id.
#[derive(Debug, Clone)]
pub struct Session {
    folder: PathBuf,
    processing: ProcessingSize,
    records: Vec<ImageRecord>,
    intensity: Vec<IntensityHistogram>,
    color: Vec<ColorHistogram>,
    working_set: Vec<ImageId>,
    selection: Selection,
    /// Distance to the reference from the last successful rank, by id
    distances: Vec<Option<f64>>,
    ranked_by: Option<Metric>,
}

impl Session {
    /// A session with no images
    pub fn empty(folder: PathBuf, processing: ProcessingSize) -> Self {
        Self {
            folder,
            processing,
            records: Vec::new(),
            intensity: Vec::new(),
            color: Vec::new(),
            working_set: Vec::new(),
            selection: Selection::None,
            distances: Vec::new(),
            ranked_by: None,
        }
    }

    /// Build a session from a finished load, assigning ids in load order.
    ///
    /// `processing` must be the size the report's histograms were extracted at.
    pub fn from_report(report: &LoadReport, processing: ProcessingSize) -> Self {
        let mut session = Self::empty(report.folder.clone(), processing);

        for (index, image) in report.images.iter().enumerate() {
            let id = ImageId(index);
            session.records.push(ImageRecord {
                id,
                filename: image.filename.clone(),
                path: image.path.clone(),
            });
            session.intensity.push(image.features.intensity);
            session.color.push(image.features.color);
            session.working_set.push(id);
        }

        session.distances = vec![None; session.records.len()];
        session
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Ids in display order
    pub fn working_set(&self) -> &[ImageId] {
        &self.working_set
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn ranked_by(&self) -> Option<Metric> {
        self.ranked_by
    }

    pub fn record(&self, id: ImageId) -> Option<&ImageRecord> {
        self.records.get(id.index())
    }

    /// Both histograms of one image
    pub fn features_of(&self, id: ImageId) -> Option<ImageFeatures> {
        Some(ImageFeatures {
            intensity: *self.intensity.get(id.index())?,
            color: *self.color.get(id.index())?,
        })
    }

    /// Distance to the reference from the last rank, if any
    pub fn distance_of(&self, id: ImageId) -> Option<f64> {
        self.distances.get(id.index()).copied().flatten()
    }

    /// Make `id` the reference image. Unknown ids are ignored.
    pub fn select(&mut self, id: ImageId) -> Option<&ImageRecord> {
        let record = self.records.get(id.index())?;
        self.selection = Selection::Selected(id);
        tracing::debug!(id = %record.id, filename = %record.filename, "reference selected");
        Some(record)
    }

    /// Reorder the working set by similarity to the reference.
    ///
    /// On error the working set and previous distances are untouched. The new
    /// order stays in place until the next rank or `reset_order`.
    pub fn rank(&mut self, metric: Metric) -> Result<Ranking, RankError> {
        let reference = self.selection.id();
        let result = match metric {
            Metric::Intensity => ranking::rank(&self.working_set, &self.intensity, reference, self.processing),
            Metric::Color => ranking::rank(&self.working_set, &self.color, reference, self.processing),
        };

        let ranking = match result {
            Ok(ranking) => ranking,
            Err(e) if e.is_fatal() => {
                tracing::error!(%metric, "rank aborted: {e}");
                return Err(e);
            }
            Err(e) => {
                tracing::info!(%metric, "nothing to rank: {e}");
                return Err(e);
            }
        };

        self.working_set = ranking.order();
        self.distances = vec![None; self.records.len()];
        for entry in &ranking.entries {
            self.distances[entry.id.index()] = Some(entry.distance);
        }
        self.ranked_by = Some(metric);

        tracing::info!(%metric, reference = %ranking.reference, "working set ranked");
        Ok(ranking)
    }

    /// Put the working set back in load order and forget distances
    pub fn reset_order(&mut self) {
        self.working_set.sort();
        self.distances = vec![None; self.records.len()];
        self.ranked_by = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::histogram::INTENSITY_BINS;
    use crate::library::loader::LoadedImage;
    use crate::state::data::Thumbnail;

    fn image(name: &str, intensity: &[(usize, u32)], color_bucket: usize) -> LoadedImage {
        let mut counts = [0u32; INTENSITY_BINS];
        for &(bucket, count) in intensity {
            counts[bucket] = count;
        }
        let mut color = ColorHistogram::new();
        for _ in 0..100 {
            color.increment(color_bucket);
        }

        LoadedImage {
            path: PathBuf::from(format!("/photos/{name}")),
            filename: name.to_string(),
            features: ImageFeatures {
                intensity: IntensityHistogram::from_counts(counts),
                color,
            },
            thumbnail: Thumbnail { size: 1, rgba: vec![0; 4] },
        }
    }

    /// ref: all dark, A: all dark, B: all bright, C: half and half
    fn scenario() -> Session {
        let report = LoadReport {
            folder: PathBuf::from("/photos"),
            images: vec![
                image("ref.jpg", &[(0, 100)], 0),
                image("b.jpg", &[(24, 100)], 63),
                image("c.jpg", &[(0, 50), (24, 50)], 1),
                image("a.jpg", &[(0, 100)], 0),
            ],
            failures: Vec::new(),
        };
        Session::from_report(&report, ProcessingSize::new(10, 10))
    }

    fn names(session: &Session) -> Vec<String> {
        session
            .working_set()
            .iter()
            .map(|&id| session.record(id).unwrap().filename.clone())
            .collect()
    }

    #[test]
    fn test_from_report_assigns_ids_in_order() {
        let session = scenario();
        assert_eq!(session.len(), 4);
        assert_eq!(session.working_set(), &[ImageId(0), ImageId(1), ImageId(2), ImageId(3)]);
        assert_eq!(session.record(ImageId(2)).unwrap().filename, "c.jpg");
        assert_eq!(session.selection(), Selection::None);
    }

    #[test]
    fn test_rank_by_intensity_scenario() {
        let mut session = scenario();
        session.select(ImageId(0)).unwrap();

        session.rank(Metric::Intensity).unwrap();

        assert_eq!(names(&session), vec!["ref.jpg", "a.jpg", "c.jpg", "b.jpg"]);
        assert_eq!(session.distance_of(ImageId(3)), Some(0.0));
        assert_eq!(session.distance_of(ImageId(2)), Some(1.0));
        assert_eq!(session.distance_of(ImageId(1)), Some(2.0));
        assert_eq!(session.ranked_by(), Some(Metric::Intensity));
    }

    #[test]
    fn test_rank_without_selection_leaves_order() {
        let mut session = scenario();
        let before = session.working_set().to_vec();

        let err = session.rank(Metric::Color).unwrap_err();

        assert_eq!(err, RankError::NoSelection);
        assert_eq!(session.working_set(), before.as_slice());
        assert_eq!(session.distance_of(ImageId(0)), None);
    }

    #[test]
    fn test_ranked_order_persists_and_selection_survives() {
        let mut session = scenario();
        session.select(ImageId(1)).unwrap();
        let ranking = session.rank(Metric::Color).unwrap();

        assert_eq!(session.working_set(), ranking.order().as_slice());
        assert_eq!(session.selection(), Selection::Selected(ImageId(1)));

        // Second rank on the already ranked set changes nothing
        session.rank(Metric::Color).unwrap();
        assert_eq!(session.working_set(), ranking.order().as_slice());
    }

    #[test]
    fn test_reset_order() {
        let mut session = scenario();
        session.select(ImageId(1)).unwrap();
        session.rank(Metric::Intensity).unwrap();

        session.reset_order();

        assert_eq!(names(&session), vec!["ref.jpg", "b.jpg", "c.jpg", "a.jpg"]);
        assert_eq!(session.distance_of(ImageId(1)), None);
        assert_eq!(session.ranked_by(), None);
    }

    #[test]
    fn test_select_unknown_id_is_ignored() {
        let mut session = scenario();
        assert!(session.select(ImageId(40)).is_none());
        assert_eq!(session.selection(), Selection::None);
    }

    #[test]
    fn test_empty_session_reports_no_selection() {
        let mut session = Session::empty(PathBuf::from("/empty"), ProcessingSize::default());
        assert!(session.is_empty());
        assert_eq!(session.rank(Metric::Intensity), Err(RankError::NoSelection));
    }
}
