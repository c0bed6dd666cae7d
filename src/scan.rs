//! Source directory scanning.
//!
//! Lists the emoji and flag image directories, filtering and ordering
//! entries so the rest of the pipeline is deterministic.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::encode::EMOJI_PREFIX;
use crate::error::{Result, ThemeError};

/// A flag image found in the flag directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagEntry {
    /// File name within the flag directory.
    pub file_name: String,
    /// For symlinked flags, the file name the link points at.
    pub link_target: Option<String>,
}

/// List emoji image names in `dir`, lexicographically sorted.
///
/// Only names with the `emoji_u` prefix are retained; everything else
/// (hidden files, unrelated names, subdirectories) is skipped silently.
pub fn emoji_images(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in listing(dir) {
        let entry = entry.map_err(|e| list_error(dir, &e))?;
        if entry.file_type().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if name.starts_with(EMOJI_PREFIX) {
            names.push(name.to_string());
        }
    }

    Ok(names)
}

/// List flag images in `dir`, lexicographically sorted, noting symlinks.
///
/// Hidden entries and subdirectories are skipped. The link target recorded
/// for a symlink is the target's file name as written in the link itself.
pub fn flag_images(dir: &Path) -> Result<Vec<FlagEntry>> {
    let mut entries = Vec::new();

    for entry in listing(dir) {
        let entry = entry.map_err(|e| list_error(dir, &e))?;
        if entry.file_type().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        let link_target = if entry.path_is_symlink() {
            let target = fs::read_link(entry.path()).map_err(|e| ThemeError::Io {
                path: entry.path().to_path_buf(),
                message: format!("failed to read symlink: {e}"),
            })?;
            target
                .file_name()
                .and_then(|n| n.to_str())
                .map(String::from)
        } else {
            None
        };

        entries.push(FlagEntry {
            file_name: name.to_string(),
            link_target,
        });
    }

    Ok(entries)
}

/// Flat, deterministically ordered listing of a single directory.
fn listing(dir: &Path) -> walkdir::IntoIter {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
}

fn list_error(dir: &Path, e: &walkdir::Error) -> ThemeError {
    ThemeError::Io {
        path: dir.to_path_buf(),
        message: format!("failed to list directory: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_emoji_images_filters_and_sorts() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("emoji_u1f600.png"), b"png").unwrap();
        fs::write(dir.path().join("emoji_u0023_20e3.png"), b"png").unwrap();
        fs::write(dir.path().join("readme.md"), b"#").unwrap();
        fs::write(dir.path().join(".hidden.png"), b"png").unwrap();
        fs::create_dir(dir.path().join("emoji_udir.png")).unwrap();

        let names = emoji_images(dir.path()).unwrap();

        assert_eq!(
            names,
            vec!["emoji_u0023_20e3.png".to_string(), "emoji_u1f600.png".to_string()]
        );
    }

    #[test]
    fn test_emoji_images_empty_directory() {
        let dir = tempdir().unwrap();
        assert!(emoji_images(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_emoji_images_missing_directory() {
        assert!(emoji_images(Path::new("/nonexistent/emoji")).is_err());
    }

    #[test]
    fn test_flag_images_sorts_and_skips_hidden() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("US.png"), b"png").unwrap();
        fs::write(dir.path().join("AD.png"), b"png").unwrap();
        fs::write(dir.path().join(".DS_Store"), b"").unwrap();

        let flags = flag_images(dir.path()).unwrap();

        assert_eq!(flags.len(), 2);
        assert_eq!(flags[0].file_name, "AD.png");
        assert_eq!(flags[1].file_name, "US.png");
        assert!(flags.iter().all(|f| f.link_target.is_none()));
    }

    #[cfg(unix)]
    #[test]
    fn test_flag_images_records_symlink_target() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("US.png"), b"png").unwrap();
        std::os::unix::fs::symlink("US.png", dir.path().join("UM.png")).unwrap();

        let flags = flag_images(dir.path()).unwrap();

        assert_eq!(flags.len(), 2);
        assert_eq!(flags[0].file_name, "UM.png");
        assert_eq!(flags[0].link_target.as_deref(), Some("US.png"));
        assert_eq!(flags[1].file_name, "US.png");
        assert_eq!(flags[1].link_target, None);
    }

    #[test]
    fn test_flag_images_missing_directory() {
        assert!(flag_images(Path::new("/nonexistent/flags")).is_err());
    }
}
