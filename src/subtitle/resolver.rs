//! Picking the caption to show at a playback instant.
//!
//! Authored cue durations are often too short to read, especially for short
//! lines that flash by. Each cue is therefore held until its *effective end*:
//!
//! ```text
//! hold          = max(min_hold_ms, per_char_ms * visible_chars)
//! effective_end = min(max(end, start + hold, end + linger_ms),
//!                     next_start - NEXT_CUE_GAP_MS)
//! ```
//!
//! A cue never ends before its authored end or `end + linger`, and always
//! yields shortly before the next cue starts. Times in a real silence gap
//! resolve to nothing.

use super::cue::Cue;
use crate::constants::NEXT_CUE_GAP_MS;
use serde::{Deserialize, Serialize};

/// Smart-hold tuning, adjustable at runtime and persisted in the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldConfig {
    /// Extra time after the authored end
    pub linger_ms: i64,
    /// Minimum time on screen measured from the cue start
    pub min_hold_ms: i64,
    /// Reading time per visible character
    pub per_char_ms: i64,
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self {
            linger_ms: 800,
            min_hold_ms: 1200,
            per_char_ms: 28,
        }
    }
}

impl HoldConfig {
    pub fn hold_ms(&self, cue: &Cue) -> i64 {
        let chars = i64::try_from(cue.visible_chars()).unwrap_or(i64::MAX);
        self.min_hold_ms.max(self.per_char_ms.saturating_mul(chars))
    }
}

/// Lookup time after applying the user's subtitle delay.
pub fn adjusted_time(media_time_ms: i64, user_delay_ms: i64) -> i64 {
    media_time_ms.saturating_add(user_delay_ms)
}

/// End of the window during which `cue` stays visible.
///
/// `next_start` is the start of the following cue, `None` for the last one.
/// The result can be at or before `cue.start_ms` when the next cue starts
/// almost immediately (or overlaps), giving an empty window.
pub fn effective_end(cue: &Cue, next_start: Option<i64>, config: &HoldConfig) -> i64 {
    let held = cue
        .end_ms
        .max(cue.start_ms.saturating_add(config.hold_ms(cue)))
        .max(cue.end_ms.saturating_add(config.linger_ms));
    match next_start {
        Some(next) => held.min(next.saturating_sub(NEXT_CUE_GAP_MS)),
        None => held,
    }
}

fn in_window(cue: &Cue, end: i64, t: i64) -> bool {
    cue.start_ms <= t && t < end
}

/// Text to display at `t_ms` (already adjusted for delay), if any.
///
/// Cues are scanned in order and the first whose held window contains `t_ms`
/// wins. Reaching a cue that has not started yet means `t_ms` sits in a gap:
/// only the previous cue's held window can still cover it.
pub fn resolve<'a>(cues: &'a [Cue], t_ms: i64, config: &HoldConfig) -> Option<&'a str> {
    for (i, cue) in cues.iter().enumerate() {
        let next_start = cues.get(i + 1).map(|next| next.start_ms);
        if in_window(cue, effective_end(cue, next_start, config), t_ms) {
            return Some(cue.text.as_str());
        }

        if t_ms < cue.start_ms {
            if i > 0 {
                let prev = &cues[i - 1];
                if in_window(prev, effective_end(prev, Some(cue.start_ms), config), t_ms) {
                    return Some(prev.text.as_str());
                }
            }
            return None;
        }
    }

    // Past the last cue's start: only its held window is left
    let last = cues.last()?;
    in_window(last, effective_end(last, None, config), t_ms).then_some(last.text.as_str())
}
