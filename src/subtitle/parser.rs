//! Timed-text parser for the two caption dialects the player reads.
//!
//! SubRip files use a comma before the milliseconds and number every block;
//! WebVTT files use a period, may start with a `WEBVTT` header and carry cue
//! settings after the end timestamp. Both are read by the same line scanner,
//! the dialect only decides whether a bare number right above a timing line
//! is a block index or caption text.
//!
//! Parsing never fails. Lines that cannot be read are skipped and a document
//! with nothing usable yields an empty list.

use super::cue::Cue;
use crate::constants::DIALECT_SNIFF_LINES;
use crate::error::{Result, SubtitleError};
use log::{debug, warn};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static HSPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

const ARROW: &str = "-->";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Comma decimal separator, numbered blocks (`.srt`)
    SubRip,
    /// Period decimal separator, optional header, no block numbers (`.vtt`)
    WebVtt,
}

/// Guess the dialect from the first few lines of a document.
pub fn detect_dialect(text: &str) -> Dialect {
    let lines: Vec<&str> = text.lines().take(DIALECT_SNIFF_LINES).collect();
    detect_dialect_lines(&lines)
}

fn detect_dialect_lines(lines: &[&str]) -> Dialect {
    let comma_timing = lines
        .iter()
        .take(DIALECT_SNIFF_LINES)
        .any(|line| line.contains(ARROW) && line.contains(','));
    if comma_timing {
        Dialect::SubRip
    } else {
        Dialect::WebVtt
    }
}

/// Parse a caption document into cues sorted by start time.
pub fn parse(text: &str) -> Vec<Cue> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let lines: Vec<&str> = text.lines().collect();
    let dialect = detect_dialect_lines(&lines);

    let mut block = BlockBuilder::default();
    for (i, line) in lines.iter().enumerate() {
        if line.contains(ARROW) {
            block.flush();
            block.timing = parse_timing_line(line);
            if block.timing.is_none() {
                warn!("Skipping unreadable timing line {}: {line:?}", i + 1);
            }
        } else if dialect == Dialect::SubRip
            && is_index_line(line)
            && lines.get(i + 1).is_some_and(|next| next.contains(ARROW))
        {
            continue;
        } else if line.trim().is_empty() && !block.body.is_empty() {
            block.flush();
            block.timing = None;
        } else if block.timing.is_some() {
            block.body.push(line);
        }
    }
    block.flush();

    let mut cues = block.cues;
    // Vec::sort_by_key is stable, equal starts keep document order
    cues.sort_by_key(|cue| cue.start_ms);
    debug!("Parsed {} cues ({dialect:?})", cues.len());
    cues
}

/// Decode raw file contents and parse them.
pub fn parse_bytes(bytes: &[u8]) -> Vec<Cue> {
    parse(&decode(bytes))
}

/// Read and parse a caption file.
///
/// Only the read itself can fail; the contents are never rejected.
pub fn load(path: &Path) -> Result<Vec<Cue>> {
    let bytes = fs::read(path).map_err(|e| SubtitleError::io(path, e))?;
    let cues = parse_bytes(&bytes);
    debug!("Loaded {} cues from {}", cues.len(), path.display());
    Ok(cues)
}

/// Decode caption bytes as UTF-8, falling back to a lossy UTF-16 read.
pub fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            debug!("Caption is not UTF-8, decoding as UTF-16");
            decode_utf16_lossy(bytes)
        }
    }
}

fn decode_utf16_lossy(bytes: &[u8]) -> String {
    let (body, big_endian) = match bytes {
        [0xFE, 0xFF, rest @ ..] => (rest, true),
        [0xFF, 0xFE, rest @ ..] => (rest, false),
        _ => (bytes, false),
    };
    let units = body.chunks_exact(2).map(|pair| {
        if big_endian {
            u16::from_be_bytes([pair[0], pair[1]])
        } else {
            u16::from_le_bytes([pair[0], pair[1]])
        }
    });
    char::decode_utf16(units)
        .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Convert `HH:MM:SS.mmm` or `MM:SS.mmm` (comma or period) to milliseconds.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let normalized = raw.trim().replace(',', ".");
    let parts: Vec<&str> = normalized.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [m, s] => (0, m.trim().parse::<i64>().ok()?, s.trim().parse::<f64>().ok()?),
        [h, m, s] => (
            h.trim().parse::<i64>().ok()?,
            m.trim().parse::<i64>().ok()?,
            s.trim().parse::<f64>().ok()?,
        ),
        _ => return None,
    };
    if !seconds.is_finite() {
        return None;
    }
    let whole = hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?;
    let total = whole as f64 + seconds;
    if total < 0.0 {
        return None;
    }
    Some((total * 1000.0).round() as i64)
}

/// Read the start and end of a `start --> end [settings]` line.
fn parse_timing_line(line: &str) -> Option<(i64, i64)> {
    let (left, right) = line.split_once(ARROW)?;
    if right.contains(ARROW) {
        return None;
    }
    let start = parse_timestamp(left)?;
    let end = parse_timestamp(right.split_whitespace().next()?)?;
    Some((start, end))
}

fn is_index_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit())
}

/// Strip inline markup and tidy whitespace, keeping line breaks.
pub fn clean_text(raw: &str) -> String {
    let without_tags = TAG_RE.replace_all(raw, "");
    without_tags
        .lines()
        .map(|line| HSPACE_RE.replace_all(line, " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Default)]
struct BlockBuilder<'a> {
    timing: Option<(i64, i64)>,
    body: Vec<&'a str>,
    cues: Vec<Cue>,
}

impl BlockBuilder<'_> {
    fn flush(&mut self) {
        if let Some((start, end)) = self.timing
            && !self.body.is_empty()
        {
            let text = clean_text(&self.body.join("\n"));
            if !text.is_empty() {
                self.cues.push(Cue::new(start, end, text));
            }
        }
        self.body.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SRT: &str = "1\n00:00:01,000 --> 00:00:02,000\nHello there\n\n2\n00:00:03,500 --> 00:00:05,250\n<i>Second</i>   line\nwraps here\n";

    #[test]
    fn test_parse_srt_blocks() {
        let cues = parse(SRT);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0], Cue::new(1000, 2000, "Hello there"));
        assert_eq!(cues[1].start_ms, 3500);
        assert_eq!(cues[1].end_ms, 5250);
        assert_eq!(cues[1].text, "Second line\nwraps here");
    }

    #[test]
    fn test_parse_vtt_with_header_and_settings() {
        let doc = "WEBVTT\n\n00:01.500 --> 00:03.000 align:start position:10%\nFirst\n\n00:00:04.000 --> 00:00:06.000\nSecond\n";
        assert_eq!(detect_dialect(doc), Dialect::WebVtt);
        let cues = parse(doc);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0], Cue::new(1500, 3000, "First"));
        assert_eq!(cues[1], Cue::new(4000, 6000, "Second"));
    }

    #[test]
    fn test_number_is_text_when_not_followed_by_timing() {
        let doc = "1\n00:00:01,000 --> 00:00:02,000\n42\nanswers\n";
        let cues = parse(doc);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "42\nanswers");
    }

    #[test]
    fn test_vtt_keeps_numbers_inside_cue_text() {
        // In WebVTT a bare number directly above a timing line ends up as text
        // of the previous cue, since there is no blank line between them.
        let doc = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nCount\n7\n00:00:03.000 --> 00:00:04.000\nNext\n";
        let cues = parse(doc);
        assert_eq!(cues[0].text, "Count\n7");
        assert_eq!(cues[1].text, "Next");
    }

    #[test]
    fn test_timing_line_terminates_block_without_blank() {
        let doc = "00:00:01.000 --> 00:00:02.000\nOne\n00:00:02.000 --> 00:00:03.000\nTwo\n";
        let cues = parse(doc);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].text, "One");
        assert_eq!(cues[1].text, "Two");
    }

    #[test]
    fn test_markup_only_cue_is_dropped() {
        let doc = "00:00:01.000 --> 00:00:02.000\n<i></i>\n\n00:00:03.000 --> 00:00:04.000\nKept\n";
        let cues = parse(doc);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "Kept");
    }

    #[test]
    fn test_bad_timing_line_skips_only_its_block() {
        let doc = "00:00:xx.000 --> 00:00:02.000\nLost\n\n00:00:03.000 --> 00:00:04.000\nFound\n";
        let cues = parse(doc);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "Found");
    }

    #[test]
    fn test_output_is_sorted_and_stable() {
        let doc = "00:00:05.000 --> 00:00:06.000\nLate\n\n00:00:01.000 --> 00:00:02.000\nEarly A\n\n00:00:01.000 --> 00:00:03.000\nEarly B\n";
        let texts: Vec<_> = parse(doc).into_iter().map(|c| c.text).collect();
        assert_eq!(texts, vec!["Early A", "Early B", "Late"]);
    }

    #[test]
    fn test_empty_document() {
        assert!(parse("").is_empty());
        assert!(parse("WEBVTT\n\n").is_empty());
    }

    #[test]
    fn test_crlf_and_bom() {
        let doc = "\u{feff}1\r\n00:00:01,000 --> 00:00:02,000\r\nHi\r\n\r\n";
        let cues = parse(doc);
        assert_eq!(cues, vec![Cue::new(1000, 2000, "Hi")]);
    }

    #[test]
    fn test_parse_timestamp_forms() {
        assert_eq!(parse_timestamp("00:00:01,000"), Some(1000));
        assert_eq!(parse_timestamp("01:02:03.004"), Some(3_723_004));
        assert_eq!(parse_timestamp("02:03.5"), Some(123_500));
        assert_eq!(parse_timestamp("3.5"), None);
        assert_eq!(parse_timestamp("aa:bb"), None);
    }

    #[test]
    fn test_oversized_fields_skip_only_that_line() {
        assert_eq!(parse_timestamp("99999999999999999:00:00.000"), None);
        assert_eq!(parse_timestamp("00:999999999999999999:00.000"), None);

        let doc = "99999999999999999:00:00.000 --> 99999999999999999:00:01.000\nBoom\n\n00:00:01.000 --> 00:00:02.000\nOk\n";
        assert_eq!(parse(doc), vec![Cue::new(1000, 2000, "Ok")]);
    }

    #[test]
    fn test_decode_utf16_fallback() {
        let text = "00:00:01.000 --> 00:00:02.000\nXin chào\n";
        let mut bytes = vec![0xFF, 0xFE];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let cues = parse_bytes(&bytes);
        assert_eq!(cues, vec![Cue::new(1000, 2000, "Xin chào")]);
    }

    #[test]
    fn test_load_missing_file_is_reported() {
        let result = load(Path::new("/this/path/does/not/exist/track.en.vtt"));
        assert!(matches!(result, Err(SubtitleError::Io { .. })));
    }
}
