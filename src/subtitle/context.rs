//! Per-track subtitle state owned by the playback coordinator.
//!
//! A [`NowPlayingSubtitleContext`] is built in one go when a media item starts
//! and dropped when the next one starts; nothing in it is patched field by
//! field across a track switch. [`SubtitleSession`] owns the current context
//! together with the library index, which a rescan swaps for a new one.

use super::alignment::{AlignmentConfig, AlignmentReport, diagnose_with};
use super::cue::Cue;
use super::index::{SubtitleIndex, build_index};
use super::language::{Language, LanguageFiles};
use super::pairing::{PairingStage, resolve_pair};
use super::parser;
use super::resolver::{adjusted_time, resolve};
use crate::config::SubtitleSettings;
use crate::error::{Result, SubtitleError};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One language track of the playing item.
#[derive(Debug, Clone)]
pub struct SubtitleTrack {
    pub language: Language,
    pub file: Option<PathBuf>,
    pub cues: Vec<Cue>,
    last_displayed: Option<String>,
}

impl SubtitleTrack {
    fn empty(language: Language) -> Self {
        Self {
            language,
            file: None,
            cues: Vec::new(),
            last_displayed: None,
        }
    }

    pub fn last_displayed(&self) -> Option<&str> {
        self.last_displayed.as_deref()
    }

    fn file_name(&self) -> String {
        self.file
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "(none)".to_string())
    }
}

/// What one track shows after a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackFrame {
    pub language: Language,
    pub text: Option<String>,
    /// The display needs repainting
    pub changed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleFrame {
    pub tracks: Vec<TrackFrame>,
}

impl SubtitleFrame {
    pub fn get(&self, language: Language) -> Option<&TrackFrame> {
        self.tracks.iter().find(|t| t.language == language)
    }

    pub fn text(&self, language: Language) -> Option<&str> {
        self.get(language).and_then(|t| t.text.as_deref())
    }

    pub fn any_changed(&self) -> bool {
        self.tracks.iter().any(|t| t.changed)
    }
}

#[derive(Debug)]
pub struct NowPlayingSubtitleContext {
    media_path: PathBuf,
    stage: Option<PairingStage>,
    tracks: Vec<SubtitleTrack>,
    alignment: Option<AlignmentReport>,
    load_errors: Vec<SubtitleError>,
}

impl NowPlayingSubtitleContext {
    /// Pair, parse and diagnose the captions for `media_path`.
    ///
    /// Fails only when the media's directory cannot be listed. A caption
    /// file that cannot be read leaves its track empty and is recorded in
    /// [`load_errors`](Self::load_errors).
    pub fn load(
        media_path: &Path,
        index: Option<&SubtitleIndex>,
        alignment: &AlignmentConfig,
    ) -> Result<Self> {
        let pairing = resolve_pair(media_path, index)?;
        if let Some(stage) = pairing.stage {
            info!("Captions for {} found by {stage}", media_path.display());
        }
        Ok(Self::build(media_path, &pairing.files, pairing.stage, alignment))
    }

    /// Context for caption files the user picked by hand.
    pub fn from_files(
        media_path: &Path,
        files: &LanguageFiles,
        alignment: &AlignmentConfig,
    ) -> Self {
        Self::build(media_path, files, None, alignment)
    }

    fn build(
        media_path: &Path,
        files: &LanguageFiles,
        stage: Option<PairingStage>,
        alignment_config: &AlignmentConfig,
    ) -> Self {
        let mut load_errors = Vec::new();
        let tracks: Vec<SubtitleTrack> = Language::ALL
            .into_iter()
            .map(|language| {
                let mut track = SubtitleTrack::empty(language);
                if let Some(path) = files.get(language) {
                    track.file = Some(path.to_path_buf());
                    match parser::load(path) {
                        Ok(cues) => track.cues = cues,
                        Err(e) => {
                            error!("Cannot load {} subtitle: {e}", language.label());
                            load_errors.push(e);
                        }
                    }
                }
                track
            })
            .collect();

        let alignment = match (tracks[0].cues.as_slice(), tracks[1].cues.as_slice()) {
            (a, b) if !a.is_empty() && !b.is_empty() => Some(diagnose_with(a, b, alignment_config)),
            _ => None,
        };

        Self {
            media_path: media_path.to_path_buf(),
            stage,
            tracks,
            alignment,
            load_errors,
        }
    }

    pub fn media_path(&self) -> &Path {
        &self.media_path
    }

    pub fn stage(&self) -> Option<PairingStage> {
        self.stage
    }

    pub fn track(&self, language: Language) -> Option<&SubtitleTrack> {
        self.tracks.iter().find(|t| t.language == language)
    }

    pub fn tracks(&self) -> &[SubtitleTrack] {
        &self.tracks
    }

    pub fn alignment(&self) -> Option<&AlignmentReport> {
        self.alignment.as_ref()
    }

    pub fn load_errors(&self) -> &[SubtitleError] {
        &self.load_errors
    }

    pub fn has_cues(&self) -> bool {
        self.tracks.iter().any(|t| !t.cues.is_empty())
    }

    /// Status text shown under the captions.
    pub fn status_line(&self) -> String {
        let parts: Vec<String> = self
            .tracks
            .iter()
            .filter(|t| !t.cues.is_empty())
            .map(|t| format!("{}:{}({})", t.language.label(), t.file_name(), t.cues.len()))
            .collect();
        if parts.is_empty() {
            return "Sub: (not found)".to_string();
        }
        let base = parts.join(" • ");
        match &self.alignment {
            Some(report) => format!("{base} | {report}"),
            None => base,
        }
    }

    /// Forget what is on screen so the next tick repaints every track.
    pub fn reset_display(&mut self) {
        for track in &mut self.tracks {
            track.last_displayed = None;
        }
    }

    /// Resolve every track at the player's current position.
    ///
    /// A negative `media_time_ms` means the player has no position yet; like
    /// disabled subtitles it leaves the display untouched.
    pub fn tick(&mut self, media_time_ms: i64, settings: &SubtitleSettings) -> SubtitleFrame {
        if !settings.enabled || media_time_ms < 0 {
            return self.current_frame();
        }
        let t = adjusted_time(media_time_ms, settings.delay_ms);
        let tracks = self
            .tracks
            .iter_mut()
            .map(|track| {
                let text = resolve(&track.cues, t, &settings.hold).map(str::to_string);
                let changed = text != track.last_displayed;
                if changed {
                    track.last_displayed = text.clone();
                }
                TrackFrame {
                    language: track.language,
                    text,
                    changed,
                }
            })
            .collect();
        SubtitleFrame { tracks }
    }

    fn current_frame(&self) -> SubtitleFrame {
        SubtitleFrame {
            tracks: self
                .tracks
                .iter()
                .map(|track| TrackFrame {
                    language: track.language,
                    text: track.last_displayed.clone(),
                    changed: false,
                })
                .collect(),
        }
    }
}

/// Library index plus the context of whatever is playing now.
#[derive(Debug, Default)]
pub struct SubtitleSession {
    index: Arc<SubtitleIndex>,
    now_playing: Option<NowPlayingSubtitleContext>,
}

impl SubtitleSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the index for `root` and swap it in.
    ///
    /// The previous index stays in place if the scan fails.
    pub fn rescan(&mut self, root: &Path) -> Result<()> {
        let fresh = build_index(root)?;
        self.index = Arc::new(fresh);
        Ok(())
    }

    /// Shared handle to the current index
    pub fn index(&self) -> Arc<SubtitleIndex> {
        Arc::clone(&self.index)
    }

    /// Replace the subtitle context for a newly started media item.
    pub fn start(
        &mut self,
        media_path: &Path,
        alignment: &AlignmentConfig,
    ) -> Result<&NowPlayingSubtitleContext> {
        let index = self.index();
        let context = NowPlayingSubtitleContext::load(media_path, Some(&index), alignment)?;
        Ok(&*self.now_playing.insert(context))
    }

    /// Replace the subtitle context with files chosen by hand.
    pub fn start_with_files(
        &mut self,
        media_path: &Path,
        files: &LanguageFiles,
        alignment: &AlignmentConfig,
    ) -> &NowPlayingSubtitleContext {
        self.now_playing
            .insert(NowPlayingSubtitleContext::from_files(media_path, files, alignment))
    }

    pub fn stop(&mut self) {
        self.now_playing = None;
    }

    pub fn now_playing(&self) -> Option<&NowPlayingSubtitleContext> {
        self.now_playing.as_ref()
    }

    pub fn tick(&mut self, media_time_ms: i64, settings: &SubtitleSettings) -> Option<SubtitleFrame> {
        self.now_playing
            .as_mut()
            .map(|context| context.tick(media_time_ms, settings))
    }
}
