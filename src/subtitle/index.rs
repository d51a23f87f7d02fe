//! Folder-wide caption index.
//!
//! When a folder is opened the whole tree is scanned once for files following
//! the `BASE.<lang>.<ext>` convention, grouped by `BASE`. Pairing consults the
//! index when nothing suitable sits next to the media file itself, which
//! covers libraries that keep captions in a separate `subs/` folder.
//!
//! An index is never edited after it is built. Rescanning produces a new
//! value that replaces the old one.

use super::language::{LanguageFiles, split_dual_suffix};
use super::scoring;
use crate::error::Result;
use crate::utils::parallel_scan;
use log::info;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubtitleIndex {
    entries: BTreeMap<String, LanguageFiles>,
}

impl SubtitleIndex {
    /// Group caption paths by base name.
    ///
    /// Paths that do not follow the dual-suffix convention are ignored. When
    /// two files claim the same base and language the later one wins.
    pub fn from_paths<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut entries: BTreeMap<String, LanguageFiles> = BTreeMap::new();
        for path in paths {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some((base, lang)) = split_dual_suffix(name) else {
                continue;
            };
            let base = base.to_string();
            entries.entry(base).or_default().set(lang, path);
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, base: &str) -> Option<&LanguageFiles> {
        self.entries.get(base)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LanguageFiles)> {
        self.entries.iter().map(|(base, files)| (base.as_str(), files))
    }

    /// Number of bases that have both languages
    pub fn complete_pairs(&self) -> usize {
        self.entries.values().filter(|f| f.is_complete()).count()
    }

    /// Files stored under exactly `base`.
    pub fn find_exact(&self, base: &str) -> LanguageFiles {
        self.entries.get(base).cloned().unwrap_or_default()
    }

    /// Files stored under the base name closest to `media_stem`.
    pub fn find_closest(&self, media_stem: &str) -> LanguageFiles {
        scoring::closest(self.entries.keys().map(String::as_str), media_stem)
            .map(|base| self.find_exact(base))
            .unwrap_or_default()
    }
}

/// Scan `root` recursively and index every dual-suffix caption file.
pub fn build_index(root: &Path) -> Result<SubtitleIndex> {
    let mut paths = parallel_scan::collect_files(root, &|path: &Path| {
        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(split_dual_suffix)
            .is_some()
    })?;
    // Parallel scanning returns files in arbitrary order
    paths.sort();
    let index = SubtitleIndex::from_paths(paths);
    info!(
        "Indexed {} caption bases ({} complete pairs) under {}",
        index.len(),
        index.complete_pairs(),
        root.display()
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_from_paths_groups_by_base() {
        let index = SubtitleIndex::from_paths(paths(&[
            "/lib/a/talk.en.vtt",
            "/lib/b/talk.vi.srt",
            "/lib/a/other.en.vtt",
            "/lib/a/notes.txt",
            "/lib/a/plain.vtt",
        ]));
        assert_eq!(index.len(), 2);
        assert_eq!(index.complete_pairs(), 1);
        let talk = index.find_exact("talk");
        assert_eq!(talk.en, Some(PathBuf::from("/lib/a/talk.en.vtt")));
        assert_eq!(talk.vi, Some(PathBuf::from("/lib/b/talk.vi.srt")));
        assert!(index.find_exact("plain").is_empty());
    }

    #[test]
    fn test_find_closest() {
        let index = SubtitleIndex::from_paths(paths(&[
            "/lib/Evening Talk 2024.en.vtt",
            "/lib/Evening Talk 2024.vi.vtt",
            "/lib/Breathing.en.vtt",
        ]));
        let found = index.find_closest("evening talk");
        assert_eq!(found.en, Some(PathBuf::from("/lib/Evening Talk 2024.en.vtt")));
        // Nothing in common still yields the first base in order
        let fallback = index.find_closest("completely different");
        assert_eq!(fallback.en, Some(PathBuf::from("/lib/Breathing.en.vtt")));
        assert!(SubtitleIndex::default().find_closest("evening talk").is_empty());
    }

    #[test]
    fn test_build_index_walks_tree() {
        let temp_dir = TempDir::new().unwrap();
        let subs = temp_dir.path().join("subs");
        fs::create_dir(&subs).unwrap();
        fs::write(subs.join("talk.en.vtt"), "").unwrap();
        fs::write(subs.join("talk.vi.vtt"), "").unwrap();
        fs::write(temp_dir.path().join("talk.mp3"), "").unwrap();
        fs::write(temp_dir.path().join("loose.vtt"), "").unwrap();

        let index = build_index(temp_dir.path()).unwrap();
        assert_eq!(index.len(), 1);
        assert!(index.find_exact("talk").is_complete());
    }

    #[test]
    fn test_rebuild_is_a_fresh_value() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.en.vtt"), "").unwrap();
        let first = build_index(temp_dir.path()).unwrap();

        fs::remove_file(temp_dir.path().join("a.en.vtt")).unwrap();
        fs::write(temp_dir.path().join("b.vi.vtt"), "").unwrap();
        let second = build_index(temp_dir.path()).unwrap();

        assert!(first.get("a").is_some());
        assert!(second.get("a").is_none());
        assert!(second.get("b").is_some());
    }
}
