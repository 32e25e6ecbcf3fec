//! Icon source directory scanner.
//!
//! Lists the `.svg` files directly inside one group directory. The order
//! is the byte-wise order of file names, so every run on an unchanged
//! directory sees the same sequence.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, SpriteError};

use super::manifest::Manifest;

/// File name suffix of icon sources.
pub const ICON_EXTENSION: &str = ".svg";

/// Check whether a path names an icon source file.
pub fn is_icon_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(ICON_EXTENSION))
}

/// Scan one group directory for icon files.
///
/// Returns `None` when the directory does not exist. Subdirectories are
/// not descended into (the colour group lives in one inside the mono
/// directory). An unreadable icon entry, such as a broken `.svg` symlink,
/// is an error; unreadable entries that are not icons are skipped.
pub fn scan_icon_dir(dir: &Path, manifest: &Manifest) -> Result<Option<Vec<PathBuf>>> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let mut files = Vec::new();
    let entries = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(dir).to_path_buf();
                if path != dir && !is_icon_file(&path) {
                    continue;
                }
                return Err(SpriteError::Io {
                    path,
                    message: format!("Failed to read directory entry: {}", e),
                });
            }
        };

        let path = entry.path();
        if entry.file_type().is_file() && is_icon_file(path) && !manifest.is_excluded(path) {
            files.push(entry.into_path());
        }
    }

    Ok(Some(files))
}
