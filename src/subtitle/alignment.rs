//! Advisory check that two caption tracks describe the same timeline.
//!
//! The report only feeds the status line. It never blocks pairing or
//! playback, so the thresholds are loose heuristics and live in
//! [`AlignmentConfig`].

use super::cue::Cue;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    /// Evenly spaced instants probed across the combined duration
    pub samples: usize,
    /// Minimum share of "either active" samples where both are active
    pub min_overlap: f64,
    /// Largest tolerated median start offset, in seconds
    pub max_offset_seconds: f64,
    /// Cap on start-time differences collected for the median
    pub max_offset_pairs: usize,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            samples: 48,
            min_overlap: 0.55,
            max_offset_seconds: 1.5,
            max_offset_pairs: 200,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Aligned,
    Mismatch,
    InsufficientData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentReport {
    pub overlap_ratio: f64,
    pub median_offset_seconds: Option<f64>,
    pub verdict: Verdict,
}

impl AlignmentReport {
    fn insufficient() -> Self {
        Self {
            overlap_ratio: 0.0,
            median_offset_seconds: None,
            verdict: Verdict::InsufficientData,
        }
    }

    pub fn is_aligned(&self) -> bool {
        self.verdict == Verdict::Aligned
    }
}

impl fmt::Display for AlignmentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let percent = self.overlap_ratio * 100.0;
        match self.verdict {
            Verdict::InsufficientData => return f.write_str("Sub: (one track missing)"),
            Verdict::Aligned => write!(f, "✓ aligned · overlap {percent:.0}%")?,
            Verdict::Mismatch => write!(f, "⚠ mismatch · overlap {percent:.0}%")?,
        }
        if let Some(offset) = self.median_offset_seconds {
            write!(f, ", Δ {offset:+.1}s")?;
        }
        if self.verdict == Verdict::Mismatch {
            f.write_str(" (check EN/VI files)")?;
        }
        Ok(())
    }
}

pub fn diagnose(a: &[Cue], b: &[Cue]) -> AlignmentReport {
    diagnose_with(a, b, &AlignmentConfig::default())
}

pub fn diagnose_with(a: &[Cue], b: &[Cue], config: &AlignmentConfig) -> AlignmentReport {
    let (Some(last_a), Some(last_b)) = (a.last(), b.last()) else {
        return AlignmentReport::insufficient();
    };
    let end_ms = last_a.end_ms.max(last_b.end_ms);
    if end_ms <= 0 || config.samples == 0 {
        return AlignmentReport::insufficient();
    }

    let overlap_ratio = overlap_ratio(a, b, end_ms, config.samples);
    let median_offset_seconds = median_start_offset(a, b, config.max_offset_pairs);

    let overlap_ok = overlap_ratio >= config.min_overlap;
    let offset_ok = median_offset_seconds.is_none_or(|o| o.abs() <= config.max_offset_seconds);
    let verdict = if overlap_ok && offset_ok {
        Verdict::Aligned
    } else {
        Verdict::Mismatch
    };

    AlignmentReport {
        overlap_ratio,
        median_offset_seconds,
        verdict,
    }
}

/// Whether any cue covers `t`, scanning in start order.
fn has_text_at(cues: &[Cue], t: i64) -> bool {
    for cue in cues {
        if t < cue.start_ms {
            return false;
        }
        if cue.is_active_at(t) {
            return true;
        }
    }
    false
}

fn overlap_ratio(a: &[Cue], b: &[Cue], end_ms: i64, samples: usize) -> f64 {
    let mut both = 0usize;
    let mut either = 0usize;
    for k in 0..samples {
        let t = ((k as f64 + 0.5) * end_ms as f64 / samples as f64) as i64;
        let on_a = has_text_at(a, t);
        let on_b = has_text_at(b, t);
        if on_a || on_b {
            either += 1;
        }
        if on_a && on_b {
            both += 1;
        }
    }
    if either == 0 {
        0.0
    } else {
        both as f64 / either as f64
    }
}

/// Median of `b.start - a.start` (seconds) along a two-pointer merge.
///
/// A difference is recorded at every merge step before advancing whichever
/// side starts earlier (`a` on ties).
fn median_start_offset(a: &[Cue], b: &[Cue], max_pairs: usize) -> Option<f64> {
    let mut diffs = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() && diffs.len() < max_pairs {
        let (start_a, start_b) = (a[i].start_ms, b[j].start_ms);
        diffs.push((start_b - start_a) as f64 / 1000.0);
        if start_a <= start_b {
            i += 1;
        } else {
            j += 1;
        }
    }
    median(&mut diffs)
}

fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}
