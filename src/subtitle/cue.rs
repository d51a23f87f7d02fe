use serde::{Deserialize, Serialize};

/// A single timed caption.
///
/// `end_ms` is normally greater than `start_ms`, but malformed sources can
/// produce zero or negative widths. Those cues are kept and simply never
/// match a time lookup through their authored interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    pub start_ms: i64,
    pub end_ms: i64,
    pub text: String,
}

impl Cue {
    pub fn new(start_ms: i64, end_ms: i64, text: impl Into<String>) -> Self {
        Self {
            start_ms,
            end_ms,
            text: text.into(),
        }
    }

    /// Authored duration, clamped at zero for inverted cues
    pub fn duration_ms(&self) -> i64 {
        (self.end_ms - self.start_ms).max(0)
    }

    /// Number of non-whitespace characters, used as a reading-time proxy
    pub fn visible_chars(&self) -> usize {
        self.text.chars().filter(|c| !c.is_whitespace()).count()
    }

    pub fn is_active_at(&self, t_ms: i64) -> bool {
        self.start_ms <= t_ms && t_ms < self.end_ms
    }
}
