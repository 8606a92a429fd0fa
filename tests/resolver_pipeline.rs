// SIGNCAST Resolver Pipeline Tests
// Copyright (c) 2026 SIGNCAST

use std::collections::HashMap;
use std::path::PathBuf;

use signcast_core::compositor::translate_to_video;
use signcast_core::translator::resolver::TokenResolver;
use signcast_core::translator::synthesizer::{ClipSynthesizer, SynthesisError};
use signcast_core::translator::vocabulary::Vocabulary;

/// Scripted synthesizer: fixed token->clip table plus tokens that fail
/// with a dataset error instead of "not found".
struct ScriptedSynth {
    clips: HashMap<String, Vec<PathBuf>>,
    broken: Vec<String>,
}

impl ScriptedSynth {
    fn new(tokens: &[&str]) -> Self {
        let clips = tokens
            .iter()
            .map(|t| {
                let file = format!("/clips/{}.mp4", t.replace(' ', "_"));
                (t.to_string(), vec![PathBuf::from(file)])
            })
            .collect();
        Self {
            clips,
            broken: Vec::new(),
        }
    }

    fn with_broken(mut self, tokens: &[&str]) -> Self {
        self.broken = tokens.iter().map(|t| t.to_string()).collect();
        self
    }
}

impl ClipSynthesizer for ScriptedSynth {
    fn synthesize(&self, token: &str) -> Result<Vec<PathBuf>, SynthesisError> {
        if self.broken.iter().any(|t| t == token) {
            return Err(SynthesisError::Dataset("disk on fire".to_string()));
        }
        self.clips
            .get(token)
            .cloned()
            .ok_or_else(|| SynthesisError::TokenNotFound(token.to_string()))
    }
}

fn pause() -> PathBuf {
    PathBuf::from("/clips/pause.mp4")
}

#[test]
fn empty_normalized_input_resolves_to_nothing() {
    let vocab = Vocabulary::from_entries(["hello"]);
    let synth = ScriptedSynth::new(&["hello"]);
    let resolver = TokenResolver::new(&vocab, &synth).with_pause_clip(Some(pause()));

    // The emoji is not alphanumeric, so it normalizes away entirely.
    for input in ["", "   ", "!!! ...", "🙂"] {
        let res = resolver.resolve(input);
        assert!(res.clips.is_empty(), "input {:?}", input);
        assert!(res.labels.is_empty(), "input {:?}", input);
        assert!(res.skipped.is_empty(), "input {:?}", input);
    }
}

#[test]
fn greedy_phrase_match_beats_word_matches() {
    let vocab = Vocabulary::from_entries(["good", "good morning", "morning"]);
    let synth = ScriptedSynth::new(&["good", "good morning", "morning"]);
    let resolver = TokenResolver::new(&vocab, &synth);

    let res = resolver.resolve("good morning");
    assert_eq!(res.labels, vec!["good morning"]);
    assert!(res.skipped.is_empty());
    assert_eq!(res.clips, vec![PathBuf::from("/clips/good_morning.mp4")]);
}

#[test]
fn phrase_in_vocabulary_without_clips_falls_back_per_word() {
    // "good morning" is a known phrase but has no recording; both words do.
    let vocab = Vocabulary::from_entries(["good morning"]);
    let synth = ScriptedSynth::new(&["good", "morning"]);
    let resolver = TokenResolver::new(&vocab, &synth);

    let res = resolver.resolve("good morning");
    assert_eq!(res.labels, vec!["good", "morning"]);
    assert!(res.skipped.is_empty());
}

#[test]
fn every_token_lands_in_exactly_one_list() {
    let vocab = Vocabulary::from_entries(["good morning"]);
    let synth = ScriptedSynth::new(&["good morning", "hello", "4", "2"]);
    let resolver = TokenResolver::new(&vocab, &synth);

    let res = resolver.resolve("hello good morning 42 xyzzy");

    // 5 input tokens: "good morning" consumes two under one label.
    assert_eq!(res.labels, vec!["hello", "good morning", "4+2"]);
    assert_eq!(res.skipped, vec!["xyzzy"]);

    let labeled_words: usize = res
        .labels
        .iter()
        .map(|l| if l.contains(' ') { 2 } else { 1 })
        .sum();
    assert_eq!(labeled_words + res.skipped.len(), 5);
}

#[test]
fn multi_digit_numeral_spells_per_digit_when_whole_token_missing() {
    let vocab = Vocabulary::empty();
    let synth = ScriptedSynth::new(&["4", "2"]);
    let resolver = TokenResolver::new(&vocab, &synth);

    let res = resolver.resolve("42");
    assert_eq!(res.labels, vec!["4+2"]);
    assert_eq!(
        res.clips,
        vec![PathBuf::from("/clips/4.mp4"), PathBuf::from("/clips/2.mp4")]
    );
}

#[test]
fn multi_digit_numeral_prefers_whole_token_clip() {
    let vocab = Vocabulary::empty();
    let synth = ScriptedSynth::new(&["42", "4", "2"]);
    let resolver = TokenResolver::new(&vocab, &synth);

    let res = resolver.resolve("42");
    assert_eq!(res.labels, vec!["42"]);
    assert_eq!(res.clips, vec![PathBuf::from("/clips/42.mp4")]);
}

#[test]
fn numeral_with_unsynthesizable_digit_is_skipped() {
    let vocab = Vocabulary::empty();
    let synth = ScriptedSynth::new(&["4"]);
    let resolver = TokenResolver::new(&vocab, &synth);

    let res = resolver.resolve("49");
    assert!(res.labels.is_empty());
    assert_eq!(res.skipped, vec!["49"]);
    assert!(res.clips.is_empty());
}

#[test]
fn word_spelling_uses_letter_variants() {
    let vocab = Vocabulary::empty();
    let synth = ScriptedSynth::new(&["h(single-handed-letter)", "i(double-handed-letter)"]);
    let resolver = TokenResolver::new(&vocab, &synth);

    let res = resolver.resolve("hi");
    assert_eq!(res.labels, vec!["h+i"]);
    assert_eq!(res.clips.len(), 2);
}

#[test]
fn token_with_foreign_character_is_never_partially_spelled() {
    let vocab = Vocabulary::empty();
    // Every ASCII letter of "héllo" could be spelled, but the accent
    // aborts the whole word.
    let synth = ScriptedSynth::new(&[
        "h(single-handed-letter)",
        "e(single-handed-letter)",
        "l(single-handed-letter)",
        "o(single-handed-letter)",
    ]);
    let resolver = TokenResolver::new(&vocab, &synth);

    let res = resolver.resolve("héllo");
    assert!(res.labels.is_empty());
    assert_eq!(res.skipped, vec!["héllo"]);
    assert!(res.clips.is_empty());
}

#[test]
fn separators_sit_between_units_only() {
    let vocab = Vocabulary::empty();
    let synth = ScriptedSynth::new(&["hello", "world", "friend"]);
    let resolver = TokenResolver::new(&vocab, &synth).with_pause_clip(Some(pause()));

    let res = resolver.resolve("hello world friend");
    assert_eq!(res.labels.len(), 3);
    assert_eq!(
        res.clips,
        vec![
            PathBuf::from("/clips/hello.mp4"),
            pause(),
            PathBuf::from("/clips/world.mp4"),
            pause(),
            PathBuf::from("/clips/friend.mp4"),
        ]
    );
    assert_ne!(res.clips.first(), Some(&pause()));
    assert_ne!(res.clips.last(), Some(&pause()));
}

#[test]
fn single_unit_has_no_separator_at_all() {
    let vocab = Vocabulary::empty();
    let synth = ScriptedSynth::new(&["hello"]);
    let resolver = TokenResolver::new(&vocab, &synth).with_pause_clip(Some(pause()));

    let res = resolver.resolve("hello");
    assert_eq!(res.clips, vec![PathBuf::from("/clips/hello.mp4")]);
}

#[test]
fn synthesizer_errors_degrade_to_skip_without_aborting() {
    let vocab = Vocabulary::empty();
    let synth = ScriptedSynth::new(&["hello", "world"]).with_broken(&["storm"]);
    let resolver = TokenResolver::new(&vocab, &synth);

    // "storm" raises a dataset error mid-stream; the rest still resolves.
    // Its letters have no clips either, so it ends up skipped.
    let res = resolver.resolve("hello storm world");
    assert_eq!(res.labels, vec!["hello", "world"]);
    assert_eq!(res.skipped, vec!["storm"]);
}

#[test]
fn resolution_is_idempotent() {
    let vocab = Vocabulary::from_entries(["good morning"]);
    let synth = ScriptedSynth::new(&["good morning", "hello", "4", "2"]);
    let resolver = TokenResolver::new(&vocab, &synth).with_pause_clip(Some(pause()));

    let first = resolver.resolve("hello good morning 42 zap");
    let second = resolver.resolve("hello good morning 42 zap");
    assert_eq!(first.labels, second.labels);
    assert_eq!(first.skipped, second.skipped);
    assert_eq!(first.clips, second.clips);
}

#[tokio::test]
async fn pipeline_reports_total_failure_without_writing_video() {
    let vocab = Vocabulary::empty();
    let synth = ScriptedSynth::new(&[]);
    let resolver = TokenResolver::new(&vocab, &synth);

    let out_dir = std::env::temp_dir().join(format!("signcast_out_{}", std::process::id()));
    let outcome = translate_to_video(&resolver, "completely unknown words", &out_dir).await;

    assert!(!outcome.success);
    assert!(outcome.video_path.is_none());
    assert_eq!(outcome.error.as_deref(), Some("No translatable words found."));
    assert_eq!(
        outcome.skipped_words,
        vec!["completely", "unknown", "words"]
    );
    // Nothing resolved, so nothing was written.
    assert!(!out_dir.exists() || std::fs::read_dir(&out_dir).unwrap().next().is_none());
    let _ = std::fs::remove_dir_all(&out_dir);
}
