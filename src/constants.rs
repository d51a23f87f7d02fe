//! Project-wide constants shared by the subtitle engine and the CLI.

/// Spinner animation characters for progress indicators
pub const SPINNER_CHARS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Caption file extensions, lowercase and without the leading dot
pub const CAPTION_EXTENSIONS: &[&str] = &["vtt", "srt"];

/// Media file extensions the player lists
pub const MEDIA_EXTENSIONS: &[&str] = &[
    "mp3", "wav", "flac", "m4a", "aac", "ogg", "wma", "mp4", "mkv", "webm", "mov", "m4v",
];

/// Directories to skip during file system traversal
pub const SKIP_DIRECTORIES: &[&str] = &["node_modules", ".git", "temp"];

/// Lines inspected when sniffing the caption dialect
pub const DIALECT_SNIFF_LINES: usize = 20;

/// Minimum gap kept between a held cue and the next cue's start
pub const NEXT_CUE_GAP_MS: i64 = 40;

/// Player tick interval used by the preview command
pub const TICK_INTERVAL_MS: i64 = 300;
