/// Shared data structures for the application state
/// 
/// These structs represent the data model that flows between
/// the image loader, the ranker, and the UI layer.

use std::fmt;
use std::path::PathBuf;

/// Stable identity of a loaded image: its 0-based position in load order.
///
/// Ids index directly into the session's histogram tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub usize);

impl ImageId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Represents a single image in the working set
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    /// Index assigned at load time
    pub id: ImageId,
    /// Filename only (e.g., "IMG_0001.jpg")
    pub filename: String,
    /// Full path to the source file
    pub path: PathBuf,
}

/// Square RGBA thumbnail ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    pub size: u32,
    pub rgba: Vec<u8>,
}

/// Which image, if any, is the ranking reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Selected(ImageId),
}

impl Selection {
    pub fn id(&self) -> Option<ImageId> {
        match self {
            Selection::None => None,
            Selection::Selected(id) => Some(*id),
        }
    }
}
