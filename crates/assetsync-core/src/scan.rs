//! Recursive image discovery

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn has_accepted_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|accepted| accepted.as_ref().strip_prefix('.') == Some(ext))
}

/// List image files under `root`, depth-first with siblings sorted by name.
///
/// Hidden entries below the root are skipped. Symlinks to files are listed
/// under their link path; symlinked directories are not followed. A
/// missing root yields an empty list.
pub fn enumerate_images<S: AsRef<str>>(root: &Path, extensions: &[S]) -> Vec<PathBuf> {
    if !root.exists() {
        tracing::debug!("Scan root {} does not exist", root.display());
        return Vec::new();
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        // A symlink is kept when it resolves to a file; linked directories
        // are never descended into
        let file_type = entry.file_type();
        if !(file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())) {
            continue;
        }

        if has_accepted_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }

    tracing::debug!("Found {} image files under {}", files.len(), root.display());
    files
}
