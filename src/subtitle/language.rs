//! Caption language tags and file-name conventions.
//!
//! Caption files follow a two-suffix convention, `NAME.<lang>.<ext>`, with
//! `<lang>` one of the recognized tags and `<ext>` a caption extension. Files
//! outside the convention can still be classified by [`guess_language`].

use crate::constants::CAPTION_EXTENSIONS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Vietnamese,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Vietnamese];

    /// File-name tag, e.g. `en` in `talk.en.vtt`
    pub fn tag(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Vietnamese => "vi",
        }
    }

    /// Short label for status lines
    pub fn label(self) -> &'static str {
        match self {
            Language::English => "EN",
            Language::Vietnamese => "VI",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Language> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.tag().eq_ignore_ascii_case(tag))
    }

    fn name_hints(self) -> &'static [&'static str] {
        match self {
            Language::English => &[".en.", " english", "(en)", "_en", "-en"],
            Language::Vietnamese => &[".vi.", " viet", " vietnam", "(vi)", "_vi", "-vi"],
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Classify a caption file name by loose substring hints.
///
/// English hints are checked first. Returns `None` when nothing matches.
pub fn guess_language(file_name: &str) -> Option<Language> {
    let name = file_name.to_lowercase();
    Language::ALL.into_iter().find(|lang| {
        name.ends_with(&format!(".{}", lang.tag()))
            || lang.name_hints().iter().any(|hint| name.contains(hint))
    })
}

/// Split `BASE.<lang>.<ext>` into its base and language.
///
/// Both the language tag and the extension must be recognized.
pub fn split_dual_suffix(file_name: &str) -> Option<(&str, Language)> {
    let (rest, ext) = file_name.rsplit_once('.')?;
    if !is_caption_extension(ext) {
        return None;
    }
    let (base, tag) = rest.rsplit_once('.')?;
    if base.is_empty() {
        return None;
    }
    Language::from_tag(tag).map(|lang| (base, lang))
}

pub fn is_caption_extension(ext: &str) -> bool {
    CAPTION_EXTENSIONS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(ext))
}

pub fn is_caption_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| is_caption_extension(&ext.to_string_lossy()))
        .unwrap_or(false)
}

/// One optional caption file per recognized language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageFiles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub en: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vi: Option<PathBuf>,
}

impl LanguageFiles {
    pub fn get(&self, lang: Language) -> Option<&Path> {
        match lang {
            Language::English => self.en.as_deref(),
            Language::Vietnamese => self.vi.as_deref(),
        }
    }

    pub fn set(&mut self, lang: Language, path: PathBuf) {
        match lang {
            Language::English => self.en = Some(path),
            Language::Vietnamese => self.vi = Some(path),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.en.is_none() && self.vi.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.en.is_some() && self.vi.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_dual_suffix() {
        assert_eq!(
            split_dual_suffix("talk.en.vtt"),
            Some(("talk", Language::English))
        );
        assert_eq!(
            split_dual_suffix("My.Talk.VI.SRT"),
            Some(("My.Talk", Language::Vietnamese))
        );
        assert_eq!(split_dual_suffix("talk.fr.vtt"), None);
        assert_eq!(split_dual_suffix("talk.en.txt"), None);
        assert_eq!(split_dual_suffix("talk.vtt"), None);
        assert_eq!(split_dual_suffix(".en.vtt"), None);
    }

    #[test]
    fn test_guess_language() {
        assert_eq!(guess_language("talk.en.vtt"), Some(Language::English));
        assert_eq!(guess_language("Talk (EN).srt"), Some(Language::English));
        assert_eq!(guess_language("talk_vi.srt"), Some(Language::Vietnamese));
        assert_eq!(guess_language("talk Vietnam.vtt"), Some(Language::Vietnamese));
        assert_eq!(guess_language("subs.vi"), Some(Language::Vietnamese));
        assert_eq!(guess_language("talk.vtt"), None);
    }

    #[test]
    fn test_language_files_slots() {
        let mut files = LanguageFiles::default();
        assert!(files.is_empty());
        files.set(Language::Vietnamese, PathBuf::from("a.vi.vtt"));
        assert!(!files.is_empty());
        assert!(!files.is_complete());
        assert_eq!(files.get(Language::Vietnamese), Some(Path::new("a.vi.vtt")));
        assert_eq!(files.get(Language::English), None);
    }
}
