//! Parallel directory scanning for caption discovery.
//!
//! This module walks a folder tree using rayon so that opening a large media
//! library (hundreds of talk folders, each with its caption files) stays
//! responsive.
//!
//! # Note on Ordering
//!
//! When several subdirectories are scanned in parallel the order of results
//! is non-deterministic. Callers that need a stable order sort the output.

use crate::constants::SKIP_DIRECTORIES;
use crate::error::{Result, SubtitleError};
use log::warn;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Check if a file or directory is hidden (starts with '.')
pub fn is_hidden_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// Check if a directory should be skipped during traversal
pub fn should_skip_directory(name: &str) -> bool {
    SKIP_DIRECTORIES.contains(&name)
}

/// Collect every file under `dir` accepted by `keep`.
///
/// # Error Handling
///
/// Failing to read `dir` itself is an error. Subdirectories that cannot be
/// read (permission denied, removed mid-scan) are logged and skipped so the
/// rest of the tree is still collected.
pub fn collect_files<F>(dir: &Path, keep: &F) -> Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool + Sync,
{
    let mut files = Vec::new();
    scan_directory_parallel(dir, keep, &mut files)?;
    Ok(files)
}

fn scan_directory_parallel<F>(dir: &Path, keep: &F, files: &mut Vec<PathBuf>) -> Result<()>
where
    F: Fn(&Path) -> bool + Sync,
{
    let entries = fs::read_dir(dir).map_err(|e| SubtitleError::io(dir, e))?;
    let entries: Vec<_> = entries
        .collect::<std::io::Result<_>>()
        .map_err(|e| SubtitleError::io(dir, e))?;

    let mut directories = Vec::new();

    for entry in entries {
        let path = entry.path();

        if is_hidden_file(&path) {
            continue;
        }

        if path.is_dir() {
            let dir_name = match path.file_name() {
                Some(name) => name.to_string_lossy(),
                None => continue,
            };
            if !should_skip_directory(&dir_name) {
                directories.push(path);
            }
        } else if path.is_file() && keep(&path) {
            files.push(path);
        }
    }

    if directories.len() > 1 {
        let nested: Vec<Vec<PathBuf>> = directories
            .par_iter()
            .filter_map(|subdir| match collect_files(subdir, keep) {
                Ok(found) => Some(found),
                Err(e) => {
                    warn!("Failed to scan directory '{}': {e}", subdir.display());
                    None
                }
            })
            .collect();

        for found in nested {
            files.extend(found);
        }
    } else {
        for subdir in directories {
            if let Err(e) = scan_directory_parallel(&subdir, keep, files) {
                warn!("Failed to scan directory '{}': {e}", subdir.display());
            }
        }
    }

    Ok(())
}
