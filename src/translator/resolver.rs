// SIGNCAST Token Resolver — Text to Clip Sequence
// Copyright (c) 2026 SIGNCAST
//
// Core resolution order per position: longest vocabulary phrase (3 → 2 → 1
// words), then whole-token synthesis, then letter/digit spelling. A token
// that survives none of the tiers is skipped; one bad token never aborts
// the pass.

use std::path::PathBuf;
use tracing::{debug, info};

use super::spelling::{probe, spell_word};
use super::synthesizer::ClipSynthesizer;
use super::vocabulary::Vocabulary;

/// Longest phrase the resolver will try to match from the vocabulary.
const MAX_PHRASE_WORDS: usize = 3;

/// Ordered outcome of resolving one input string. Labels and skipped
/// tokens preserve input order; `clips` interleaves pause clips between
/// resolved units (never leading or trailing).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resolution {
    pub clips: Vec<PathBuf>,
    pub labels: Vec<String>,
    pub skipped: Vec<String>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// Lowercase, strip punctuation (word-internal hyphens and apostrophes
/// survive), and split into tokens. An input that normalizes to nothing
/// yields an empty token list.
pub fn normalize_text(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '-' | '\'' | '_'))
        .collect();

    cleaned
        .split_whitespace()
        .map(|word| word.trim_matches(|c| c == '-' || c == '\'').to_string())
        .filter(|word| !word.is_empty())
        .collect()
}

/// Greedy maximal munch: longest vocabulary phrase starting at `i`.
/// Returns the phrase and the number of tokens it spans.
fn max_phrase_match(vocabulary: &Vocabulary, tokens: &[String], i: usize) -> Option<(String, usize)> {
    for size in (1..=MAX_PHRASE_WORDS).rev() {
        let end = (i + size).min(tokens.len());
        let phrase = tokens[i..end].join(" ");
        if vocabulary.contains(&phrase) {
            return Some((phrase, end - i));
        }
    }
    None
}

/// Resolves free-form text into the clip sequence representing it.
/// Stateless per call; the vocabulary and synthesizer are read-only
/// collaborators, so one resolver can serve concurrent requests.
pub struct TokenResolver<'a> {
    vocabulary: &'a Vocabulary,
    synthesizer: &'a dyn ClipSynthesizer,
    /// Separator clip inserted between resolved units, when configured.
    pause_clip: Option<PathBuf>,
    /// Stand-in asset for digit `0`, which the dataset lacks.
    zero_clip: Option<PathBuf>,
}

impl<'a> TokenResolver<'a> {
    pub fn new(vocabulary: &'a Vocabulary, synthesizer: &'a dyn ClipSynthesizer) -> Self {
        Self {
            vocabulary,
            synthesizer,
            pause_clip: None,
            zero_clip: None,
        }
    }

    pub fn with_pause_clip(mut self, pause: Option<PathBuf>) -> Self {
        self.pause_clip = pause;
        self
    }

    pub fn with_zero_clip(mut self, zero: Option<PathBuf>) -> Self {
        self.zero_clip = zero;
        self
    }

    pub fn resolve(&self, text: &str) -> Resolution {
        let tokens = normalize_text(text);
        let mut result = Resolution::default();

        let mut i = 0;
        while i < tokens.len() {
            // Tier 1: longest vocabulary phrase that actually synthesizes.
            if let Some((phrase, consumed)) = max_phrase_match(self.vocabulary, &tokens, i) {
                let paths = probe(self.synthesizer, &phrase);
                if !paths.is_empty() {
                    self.push_unit(&mut result, paths, phrase);
                    i += consumed;
                    continue;
                }
            }

            let word = &tokens[i];
            i += 1;

            // Tier 2a: multi-digit numerals get digit-by-digit fallback.
            if word.len() > 1 && word.chars().all(|c| c.is_ascii_digit()) {
                let paths = probe(self.synthesizer, word);
                if !paths.is_empty() {
                    self.push_unit(&mut result, paths, word.clone());
                } else if let Some(paths) =
                    spell_word(self.synthesizer, word, self.zero_clip.as_deref())
                {
                    self.push_unit(&mut result, paths, spelled_label(word));
                } else {
                    debug!("[RESOLVER] Skipping numeral '{}'", word);
                    result.skipped.push(word.clone());
                }
                continue;
            }

            // Tier 2b: whole token, then letter spelling.
            let paths = probe(self.synthesizer, word);
            if !paths.is_empty() {
                self.push_unit(&mut result, paths, word.clone());
            } else if let Some(paths) = spell_word(self.synthesizer, word, self.zero_clip.as_deref())
            {
                self.push_unit(&mut result, paths, spelled_label(word));
            } else {
                debug!("[RESOLVER] Skipping '{}'", word);
                result.skipped.push(word.clone());
            }
        }

        // Pauses separate units; one trails after the final unit and
        // comes off here.
        if let Some(pause) = &self.pause_clip {
            if result.clips.last() == Some(pause) {
                result.clips.pop();
            }
        }

        info!(
            "[RESOLVER] {} resolved, {} skipped, {} clips",
            result.labels.len(),
            result.skipped.len(),
            result.clips.len()
        );
        result
    }

    fn push_unit(&self, result: &mut Resolution, paths: Vec<PathBuf>, label: String) {
        result.clips.extend(paths);
        if let Some(pause) = &self.pause_clip {
            result.clips.push(pause.clone());
        }
        result.labels.push(label);
    }
}

/// Label for a spelled unit: characters joined by `+` (`42` → `4+2`).
fn spelled_label(word: &str) -> String {
    word.chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join("+")
}
