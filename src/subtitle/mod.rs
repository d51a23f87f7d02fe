//! Dual-language subtitle engine.
//!
//! The pieces run in this order when a track starts playing:
//!
//! 1. [`pairing`] decides which caption files belong to the media file,
//!    optionally consulting a folder-wide [`index`].
//! 2. [`parser`] turns each caption file into a sorted list of [`Cue`]s.
//! 3. [`alignment`] compares the two languages and produces an advisory
//!    report for the status bar.
//! 4. On every player tick [`resolver`] picks the caption text to show,
//!    holding short cues on screen a little longer than authored.
//!
//! [`context::NowPlayingSubtitleContext`] bundles the per-track state and is
//! replaced as a whole whenever the playing item changes; a
//! [`context::SubtitleSession`] owns it next to the shared index.

pub mod alignment;
pub mod context;
pub mod cue;
pub mod index;
pub mod language;
pub mod pairing;
pub mod parser;
pub mod resolver;
pub mod scoring;

pub use alignment::{AlignmentConfig, AlignmentReport, Verdict, diagnose, diagnose_with};
pub use context::{
    NowPlayingSubtitleContext, SubtitleFrame, SubtitleSession, SubtitleTrack, TrackFrame,
};
pub use cue::Cue;
pub use index::{SubtitleIndex, build_index};
pub use language::{Language, LanguageFiles, guess_language};
pub use pairing::{Pairing, PairingStage, pair_for_selected, resolve_pair};
pub use parser::{Dialect, parse};
pub use resolver::{HoldConfig, effective_end, resolve};
