/// Application settings
///
/// Stored as JSON in the user's config directory:
/// - Linux: ~/.config/image-scroller/settings.json
/// - macOS: ~/Library/Application Support/image-scroller/settings.json
/// - Windows: %APPDATA%\image-scroller\settings.json
///
/// A missing file means defaults. Every field is optional in the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::features::ProcessingSize;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Folder scanned at startup
    pub image_dir: PathBuf,
    /// Upper bound on images loaded from the folder
    pub max_images: usize,
    /// Lowercase file extensions to load
    pub extensions: Vec<String>,
    /// Edge length of the square grid thumbnails, in pixels
    pub thumbnail_size: u32,
    /// Longest edge of the enlarged preview, in pixels
    pub preview_size: u32,
    /// Thumbnails per grid row
    pub columns: usize,
    /// Width every image is resampled to before histogramming
    pub processing_width: u32,
    /// Height every image is resampled to before histogramming
    pub processing_height: u32,
}

impl Default for Settings {
    fn default() -> Self {
        let processing = ProcessingSize::default();
        Self {
            image_dir: PathBuf::from("images"),
            max_images: 100,
            extensions: vec!["jpg".to_string(), "jpeg".to_string()],
            thumbnail_size: 90,
            preview_size: 384,
            columns: 10,
            processing_width: processing.width,
            processing_height: processing.height,
        }
    }
}

impl Settings {
    /// Default location of the settings file, if a config directory exists
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("image-scroller");
        path.push("settings.json");
        Some(path)
    }

    /// Read settings from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let settings: Settings = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from the default location, falling back to defaults on any error
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            tracing::warn!("no config directory available, using default settings");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(settings) => {
                tracing::info!(path = %path.display(), "settings loaded");
                settings
            }
            Err(e) => {
                tracing::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON, creating the parent directory
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source: io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(io_err)
    }

    /// Reject values the loader and grid cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("max_images", self.max_images as u64),
            ("thumbnail_size", self.thumbnail_size as u64),
            ("preview_size", self.preview_size as u64),
            ("columns", self.columns as u64),
            ("processing_width", self.processing_width as u64),
            ("processing_height", self.processing_height as u64),
        ];

        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        if self.extensions.is_empty() {
            return Err(ConfigError::Invalid {
                field: "extensions",
                reason: "at least one extension is required".to_string(),
            });
        }

        Ok(())
    }

    pub fn processing_size(&self) -> ProcessingSize {
        ProcessingSize::new(self.processing_width, self.processing_height)
    }

    /// True if `path` has one of the configured extensions (case-insensitive)
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| *allowed == ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.max_images, 100);
        assert_eq!(settings.processing_size(), ProcessingSize::new(384, 256));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "max_images": 12, "columns": 4 }"#).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.max_images, 12);
        assert_eq!(settings.columns, 4);
        assert_eq!(settings.thumbnail_size, 90);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Settings::load_from(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_zero_values_rejected() {
        let mut settings = Settings::default();
        settings.processing_width = 0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Invalid { field: "processing_width", .. })
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.image_dir = PathBuf::from("/photos/summer");
        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_accepts_extensions_case_insensitively() {
        let settings = Settings::default();
        assert!(settings.accepts(Path::new("a/b/IMG_01.JPG")));
        assert!(settings.accepts(Path::new("photo.jpeg")));
        assert!(!settings.accepts(Path::new("notes.txt")));
        assert!(!settings.accepts(Path::new("README")));
    }
}
