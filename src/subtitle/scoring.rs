//! Name similarity scoring between caption base names and a media stem.
//!
//! Scoring is an ordered list of rules. Each rule looks at the normalized
//! candidate and the media stem and either produces a score or passes; the
//! first rule that produces one decides the base score. A bracketed video
//! identifier shared by both names (`Title [dQw4w9WgXcQ]`) adds a bonus on
//! top, which lets downloads with reworded titles still find each other.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static BRACKET_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([A-Za-z0-9_\-]{6,})\]").unwrap());

/// Weights used by the scoring rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub exact: f64,
    pub affix: f64,
    pub contains: f64,
    /// Multiplied by the fraction of media-stem tokens found in the candidate
    pub token_overlap: f64,
    pub bracket_id_bonus: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            exact: 100.0,
            affix: 90.0,
            contains: 80.0,
            token_overlap: 60.0,
            bracket_id_bonus: 10.0,
        }
    }
}

/// Precomputed view of the media stem being matched against.
#[derive(Debug, Clone)]
pub struct MatchTarget {
    pub normalized: String,
    pub tokens: HashSet<String>,
    pub bracket_id: Option<String>,
}

impl MatchTarget {
    pub fn new(media_stem: &str) -> Self {
        Self {
            normalized: normalize(media_stem),
            tokens: tokens(media_stem),
            bracket_id: bracket_id(media_stem).map(str::to_string),
        }
    }
}

/// A single scoring rule: `None` means "does not apply, try the next one".
pub type ScoreRule = fn(&str, &MatchTarget, &ScoreWeights) -> Option<f64>;

/// Rules in priority order.
pub const RULES: &[(&str, ScoreRule)] = &[
    ("exact", exact_rule),
    ("affix", affix_rule),
    ("contains", contains_rule),
    ("token_overlap", token_overlap_rule),
];

fn exact_rule(candidate: &str, target: &MatchTarget, weights: &ScoreWeights) -> Option<f64> {
    (candidate == target.normalized).then_some(weights.exact)
}

fn affix_rule(candidate: &str, target: &MatchTarget, weights: &ScoreWeights) -> Option<f64> {
    let stem = target.normalized.as_str();
    (!stem.is_empty() && (candidate.starts_with(stem) || candidate.ends_with(stem)))
        .then_some(weights.affix)
}

fn contains_rule(candidate: &str, target: &MatchTarget, weights: &ScoreWeights) -> Option<f64> {
    (!target.normalized.is_empty() && candidate.contains(&target.normalized))
        .then_some(weights.contains)
}

fn token_overlap_rule(
    candidate: &str,
    target: &MatchTarget,
    weights: &ScoreWeights,
) -> Option<f64> {
    if target.tokens.is_empty() {
        return None;
    }
    let shared = candidate
        .split_whitespace()
        .collect::<HashSet<_>>()
        .into_iter()
        .filter(|token| target.tokens.contains(*token))
        .count();
    let score = weights.token_overlap * shared as f64 / target.tokens.len() as f64;
    (score > 0.0).then_some(score)
}

/// Lowercase, turn punctuation into spaces and collapse whitespace.
pub fn normalize(s: &str) -> String {
    let spaced: String = s
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn tokens(s: &str) -> HashSet<String> {
    normalize(s).split_whitespace().map(str::to_string).collect()
}

/// First bracketed identifier of six or more `[A-Za-z0-9_-]` characters.
pub fn bracket_id(s: &str) -> Option<&str> {
    BRACKET_ID_RE
        .captures(s)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Score `candidate` against a prepared target.
///
/// The bracket bonus checks the raw candidate text, so callers pass the name
/// as it appears on disk rather than a normalized form.
pub fn score_against(candidate: &str, target: &MatchTarget, weights: &ScoreWeights) -> f64 {
    let normalized = normalize(candidate);
    let base = RULES
        .iter()
        .find_map(|(_, rule)| rule(&normalized, target, weights))
        .unwrap_or(0.0);
    let bonus = match &target.bracket_id {
        Some(id) if candidate.contains(id.as_str()) => weights.bracket_id_bonus,
        _ => 0.0,
    };
    base + bonus
}

pub fn score(candidate: &str, media_stem: &str) -> f64 {
    score_against(candidate, &MatchTarget::new(media_stem), &ScoreWeights::default())
}

/// Pick the candidate closest to `media_stem`.
///
/// Any candidate qualifies, even one sharing nothing with the stem, so only
/// an empty list yields `None`. Ties go to the earliest one.
pub fn closest<'a, I>(candidates: I, media_stem: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let target = MatchTarget::new(media_stem);
    let weights = ScoreWeights::default();
    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        let s = score_against(candidate, &target, &weights);
        if best.is_none_or(|(_, best_score)| s > best_score) {
            best = Some((candidate, s));
        }
    }
    best.map(|(candidate, _)| candidate)
}
