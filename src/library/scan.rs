use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::LoadError;
use crate::state::settings::Settings;

/// List the images in `dir` in load order.
///
/// Only direct children are considered. Files are matched by extension,
/// sorted by file name, deduplicated by canonical path (so two symlinks to
/// one file count once) and capped at `settings.max_images`.
pub fn scan_folder(dir: &Path, settings: &Settings) -> Result<Vec<PathBuf>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::Folder {
            path: dir.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let mut seen = HashSet::new();
    let mut paths = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(LoadError::Folder {
                    path: dir.to_path_buf(),
                    message: e.to_string(),
                })
            }
            Err(e) => {
                tracing::warn!("skipping unreadable entry: {e}");
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || !settings.accepts(path) {
            continue;
        }

        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if !seen.insert(key) {
            tracing::debug!(path = %path.display(), "duplicate image skipped");
            continue;
        }

        paths.push(path.to_path_buf());
        if paths.len() == settings.max_images {
            tracing::info!(limit = settings.max_images, "image limit reached, ignoring the rest");
            break;
        }
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_scan_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.jpg");
        touch(dir.path(), "a.JPG");
        touch(dir.path(), "c.jpeg");
        touch(dir.path(), "notes.txt");
        fs::create_dir(dir.path().join("nested.jpg")).unwrap();

        let paths = scan_folder(dir.path(), &Settings::default()).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["a.JPG", "b.jpg", "c.jpeg"]);
    }

    #[test]
    fn test_scan_is_not_recursive() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        touch(&sub, "deep.jpg");
        touch(dir.path(), "top.jpg");

        let paths = scan_folder(dir.path(), &Settings::default()).unwrap();
        assert_eq!(paths, vec![dir.path().join("top.jpg")]);
    }

    #[test]
    fn test_scan_caps_at_max_images() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..7 {
            touch(dir.path(), &format!("img_{i:02}.jpg"));
        }

        let settings = Settings {
            max_images: 5,
            ..Settings::default()
        };
        let paths = scan_folder(dir.path(), &settings).unwrap();

        assert_eq!(paths.len(), 5);
        assert_eq!(paths[4], dir.path().join("img_04.jpg"));
    }

    #[test]
    fn test_scan_missing_folder() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_folder(&dir.path().join("missing"), &Settings::default()).unwrap_err();
        assert!(matches!(err, LoadError::Folder { .. }));
    }
}
