//! End-to-end checks from caption files on disk to what the player shows.

use prajna_subs::config::SubtitleSettings;
use prajna_subs::subtitle::{
    AlignmentConfig, Cue, HoldConfig, Language, NowPlayingSubtitleContext, PairingStage,
    SubtitleSession, Verdict, build_index, diagnose, effective_end, parse, resolve, resolve_pair,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

const TALK_EN: &str = "1\n00:00:01,000 --> 00:00:03,000\nHello\n\n2\n00:00:03,000 --> 00:00:05,000\nWorld\n";
const TALK_VI: &str = "WEBVTT\n\n00:00:01.000 --> 00:00:03.000\n<i>Xin chào</i>\n\n00:00:03.000 --> 00:00:05.000\nThế giới\n";

#[test]
fn test_hello_world_resolution() {
    let cues = vec![Cue::new(1000, 3000, "Hello"), Cue::new(3000, 5000, "World")];
    let cfg = HoldConfig::default();

    assert_eq!(resolve(&cues, 2000, &cfg), Some("Hello"));
    assert_eq!(resolve(&cues, 3100, &cfg), Some("World"));

    assert_eq!(effective_end(&cues[0], Some(3000), &cfg), 2960);
    assert_eq!(resolve(&cues, 3001, &cfg), Some("World"));

    // Same arguments, same answer
    for t in [0, 999, 1000, 2959, 2960, 3000, 5799, 5800] {
        assert_eq!(resolve(&cues, t, &cfg), resolve(&cues, t, &cfg));
    }
}

#[test]
fn test_subrip_document_parses() {
    let cues = parse("1\n00:00:01,000 --> 00:00:02,000\nOne line\n");
    assert_eq!(cues, vec![Cue::new(1000, 2000, "One line")]);
    assert!(parse("").is_empty());
}

#[test]
fn test_parsed_cues_are_ordered() {
    let doc = "WEBVTT\n\n00:00:09.000 --> 00:00:10.000\nlate\n\n00:00:01.000 --> 00:00:02.000\nearly\n\n00:00:05.000 --> 00:00:06.000\nmiddle\n";
    let cues = parse(doc);
    assert_eq!(cues.len(), 3);
    assert!(cues.windows(2).all(|w| w[0].start_ms <= w[1].start_ms));
    assert_eq!(cues[0].text, "early");
}

#[test]
fn test_exact_stem_beats_lookalikes() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(dir, "talk.mp3", "fake");
    write(dir, "talk.en.vtt", TALK_VI);
    write(dir, "talk.vi.vtt", TALK_VI);
    write(dir, "talk_old.en.vtt", TALK_VI);
    write(dir, "talk_old.vi.vtt", TALK_VI);

    let pairing = resolve_pair(&dir.join("talk.mp3"), None).unwrap();
    assert_eq!(pairing.stage, Some(PairingStage::ExactStem));
    assert_eq!(pairing.files.en.as_deref(), Some(dir.join("talk.en.vtt").as_path()));
    assert_eq!(pairing.files.vi.as_deref(), Some(dir.join("talk.vi.vtt").as_path()));
}

#[test]
fn test_diagnose_disjoint_and_empty() {
    let a = vec![Cue::new(0, 1000, "a"), Cue::new(1000, 2000, "b")];
    let b = vec![Cue::new(10_000, 11_000, "c"), Cue::new(11_000, 12_000, "d")];
    let report = diagnose(&a, &b);
    assert_eq!(report.overlap_ratio, 0.0);
    assert_eq!(report.verdict, Verdict::Mismatch);

    assert_eq!(diagnose(&[], &[]).verdict, Verdict::InsufficientData);
}

#[test]
fn test_library_playback_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let media_dir = temp_dir.path().join("Retreat 2024");
    let subs_dir = temp_dir.path().join("captions");
    fs::create_dir_all(&media_dir).unwrap();
    fs::create_dir_all(&subs_dir).unwrap();
    write(&media_dir, "Day 1 - Opening Talk [abc123xyz].mp4", "fake");
    write(&subs_dir, "Opening Talk [abc123xyz].en.srt", TALK_EN);
    write(&subs_dir, "Opening Talk [abc123xyz].vi.vtt", TALK_VI);
    write(&subs_dir, "Closing Words.en.srt", TALK_EN);

    let index = build_index(temp_dir.path()).unwrap();
    assert_eq!(index.len(), 2);
    assert_eq!(index.complete_pairs(), 1);

    let media = media_dir.join("Day 1 - Opening Talk [abc123xyz].mp4");
    let mut context =
        NowPlayingSubtitleContext::load(&media, Some(&index), &AlignmentConfig::default())
            .unwrap();
    assert_eq!(context.stage(), Some(PairingStage::IndexClosest));
    assert!(context.alignment().unwrap().is_aligned());

    let settings = SubtitleSettings::default();
    let frame = context.tick(1200, &settings);
    assert_eq!(frame.text(Language::English), Some("Hello"));
    assert_eq!(frame.text(Language::Vietnamese), Some("Xin chào"));

    let frame = context.tick(2980, &settings);
    assert_eq!(frame.text(Language::English), None);
    assert!(frame.any_changed());

    let frame = context.tick(3500, &settings);
    assert_eq!(frame.text(Language::Vietnamese), Some("Thế giới"));
}

#[test]
fn test_session_keeps_old_index_when_rescan_fails() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "talk.en.srt", TALK_EN);

    let mut session = SubtitleSession::new();
    session.rescan(temp_dir.path()).unwrap();
    assert_eq!(session.index().len(), 1);

    assert!(session.rescan(&temp_dir.path().join("missing")).is_err());
    assert_eq!(session.index().len(), 1);
}
