//! Finding the caption files that belong to a media file.
//!
//! Resolution walks through stages of decreasing confidence and stops at the
//! first one that finds anything:
//!
//! 1. `{stem}.{lang}.{ext}` right next to the media file
//! 2. a complete `BASE.en/BASE.vi` pair in the same folder, closest base wins
//! 3. the folder-wide index, exact base
//! 4. the folder-wide index, closest base (any non-empty index answers)
//! 5. any caption in the same folder whose name hints at a language, best
//!    score per language even when nothing in the name matches
//!
//! Finding nothing is a normal outcome and yields an empty [`Pairing`].

use super::index::SubtitleIndex;
use super::language::{
    Language, LanguageFiles, guess_language, is_caption_file, split_dual_suffix,
};
use super::scoring::{self, MatchTarget, ScoreWeights};
use crate::constants::CAPTION_EXTENSIONS;
use crate::error::{Result, SubtitleError};
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingStage {
    ExactStem,
    DirectoryPair,
    IndexExact,
    IndexClosest,
    Fuzzy,
}

impl fmt::Display for PairingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PairingStage::ExactStem => "exact name",
            PairingStage::DirectoryPair => "folder pair",
            PairingStage::IndexExact => "library index (exact)",
            PairingStage::IndexClosest => "library index (closest)",
            PairingStage::Fuzzy => "fuzzy match",
        };
        f.write_str(label)
    }
}

/// Outcome of pairing: the files found and the stage that found them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pairing {
    pub files: LanguageFiles,
    pub stage: Option<PairingStage>,
}

impl Pairing {
    fn found(files: LanguageFiles, stage: PairingStage) -> Option<Self> {
        (!files.is_empty()).then_some(Self {
            files,
            stage: Some(stage),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Resolve the caption files for `media_path`.
///
/// `index` is the folder-wide index built when the library was opened, if
/// any. Only a failure to list the media's own directory is an error; a
/// directory that does not exist is treated as empty.
pub fn resolve_pair(media_path: &Path, index: Option<&SubtitleIndex>) -> Result<Pairing> {
    let stem = media_stem(media_path);
    let dir = parent_dir(media_path);

    if let Some(pairing) = Pairing::found(exact_stem_pair(dir, &stem), PairingStage::ExactStem) {
        debug!("Exact caption pair for {stem:?}");
        return Ok(pairing);
    }

    let entries = list_directory(dir)?;

    let pairs = directory_pairs(&entries);
    if let Some(base) = scoring::closest(pairs.keys().map(String::as_str), &stem)
        && let Some(pairing) = Pairing::found(pairs[base].clone(), PairingStage::DirectoryPair)
    {
        debug!("Folder pair {base:?} chosen for {stem:?}");
        return Ok(pairing);
    }

    if let Some(index) = index {
        if let Some(pairing) = Pairing::found(index.find_exact(&stem), PairingStage::IndexExact) {
            debug!("Index holds exact base {stem:?}");
            return Ok(pairing);
        }
        if let Some(pairing) =
            Pairing::found(index.find_closest(&stem), PairingStage::IndexClosest)
        {
            debug!("Closest index base used for {stem:?}");
            return Ok(pairing);
        }
    }

    let fuzzy = fuzzy_pick(&entries, &stem);
    if let Some(pairing) = Pairing::found(fuzzy, PairingStage::Fuzzy) {
        debug!("Fuzzy caption match for {stem:?}");
        return Ok(pairing);
    }

    debug!("No captions found for {stem:?}");
    Ok(Pairing::default())
}

/// Complete a manually chosen caption file with its other-language partner.
///
/// A file named `BASE.<lang>.<ext>` keeps its own slot and takes the partner
/// from a complete pair with the same base in its folder. Any other file goes
/// into the slot its name suggests (English when unclear) and the other slot
/// is filled with the caption whose name length is closest to it.
pub fn pair_for_selected(picked: &Path) -> Result<LanguageFiles> {
    let dir = parent_dir(picked);
    let name = file_name(picked);
    let entries = list_directory(dir)?;

    if let Some((base, lang)) = split_dual_suffix(&name) {
        let mut files = directory_pairs(&entries).remove(base).unwrap_or_default();
        files.set(lang, picked.to_path_buf());
        return Ok(files);
    }

    let lang = guess_language(&name).unwrap_or(Language::English);
    let mut files = LanguageFiles::default();
    files.set(lang, picked.to_path_buf());

    let wanted = other_language(lang);
    let picked_len = scoring::normalize(&media_stem(picked)).chars().count();
    let partner = entries
        .iter()
        .filter(|path| is_caption_file(path) && path.as_path() != picked)
        .filter(|path| guess_language(&file_name(path)) == Some(wanted))
        .min_by_key(|path| {
            scoring::normalize(&media_stem(path))
                .chars()
                .count()
                .abs_diff(picked_len)
        });
    if let Some(partner) = partner {
        files.set(wanted, partner.clone());
    }
    Ok(files)
}

fn other_language(lang: Language) -> Language {
    match lang {
        Language::English => Language::Vietnamese,
        Language::Vietnamese => Language::English,
    }
}

fn media_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Files directly inside `dir`, sorted by path.
fn list_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(SubtitleError::io(dir, e)),
    };
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| SubtitleError::io(dir, e))?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn exact_stem_pair(dir: &Path, stem: &str) -> LanguageFiles {
    let mut files = LanguageFiles::default();
    for lang in Language::ALL {
        // Later extensions take precedence when both exist
        for ext in CAPTION_EXTENSIONS {
            let candidate = dir.join(format!("{stem}.{}.{ext}", lang.tag()));
            if candidate.is_file() {
                files.set(lang, candidate);
            }
        }
    }
    files
}

/// Bases in `entries` that have a caption for every language.
fn directory_pairs(entries: &[PathBuf]) -> BTreeMap<String, LanguageFiles> {
    let mut groups: BTreeMap<String, LanguageFiles> = BTreeMap::new();
    for path in entries {
        let name = file_name(path);
        if let Some((base, lang)) = split_dual_suffix(&name) {
            groups
                .entry(base.to_string())
                .or_default()
                .set(lang, path.clone());
        }
    }
    groups.retain(|_, files| files.is_complete());
    groups
}

fn fuzzy_pick(entries: &[PathBuf], stem: &str) -> LanguageFiles {
    let target = MatchTarget::new(stem);
    let weights = ScoreWeights::default();
    let mut best: BTreeMap<Language, (f64, &PathBuf)> = BTreeMap::new();

    for path in entries.iter().filter(|path| is_caption_file(path)) {
        let Some(lang) = guess_language(&file_name(path)) else {
            continue;
        };
        let score = scoring::score_against(&media_stem(path), &target, &weights);
        let better = best
            .get(&lang)
            .is_none_or(|(best_score, _)| score > *best_score);
        if better {
            best.insert(lang, (score, path));
        }
    }

    let mut files = LanguageFiles::default();
    for (lang, (_, path)) in best {
        files.set(lang, path.clone());
    }
    files
}
