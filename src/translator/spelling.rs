// SIGNCAST Spelling — Letter/Digit Fallback Synthesis
// Copyright (c) 2026 SIGNCAST
//
// When a word has no whole-token clip, it is finger-spelled. The dataset
// records alphabet clips under two naming conventions; not every letter
// exists in both, so each letter is probed single-handed first.

use std::path::{Path, PathBuf};
use tracing::debug;

use super::synthesizer::ClipSynthesizer;

/// Probe the synthesizer for one token, collapsing every failure
/// (not found, dataset error) into "no clips". The per-token failure
/// policy of the whole resolver hangs on this.
pub fn probe(synth: &dyn ClipSynthesizer, token: &str) -> Vec<PathBuf> {
    match synth.synthesize(token) {
        Ok(paths) => paths,
        Err(err) => {
            debug!("[SPELL] '{}': {}", token, err);
            Vec::new()
        }
    }
}

/// Pick the dataset token for one alphabetic character: single-handed
/// variant if it yields clips, double-handed otherwise. `None` means the
/// dataset has neither and the containing word cannot be spelled.
pub fn letter_token(synth: &dyn ClipSynthesizer, letter: char) -> Option<String> {
    let single = format!("{}(single-handed-letter)", letter);
    if !probe(synth, &single).is_empty() {
        return Some(single);
    }

    let double = format!("{}(double-handed-letter)", letter);
    if !probe(synth, &double).is_empty() {
        return Some(double);
    }

    None
}

/// Spell a word character by character. Every character must be `[a-z0-9]`
/// or the whole attempt is abandoned; a word is never partially spelled.
/// Digit `0` substitutes the bundled zero clip when the dataset has none.
pub fn spell_word(
    synth: &dyn ClipSynthesizer,
    word: &str,
    zero_clip: Option<&Path>,
) -> Option<Vec<PathBuf>> {
    let mut all_paths: Vec<PathBuf> = Vec::new();

    for ch in word.chars() {
        if !ch.is_ascii_lowercase() && !ch.is_ascii_digit() {
            return None;
        }

        if ch.is_ascii_digit() {
            let digit_paths = probe(synth, &ch.to_string());
            if !digit_paths.is_empty() {
                all_paths.extend(digit_paths);
                continue;
            }

            // The dataset ships no clip for zero; a local asset stands in.
            if ch == '0' {
                if let Some(zero) = zero_clip {
                    if zero.exists() {
                        all_paths.push(zero.to_path_buf());
                        continue;
                    }
                }
            }

            return None;
        }

        let token = letter_token(synth, ch)?;
        let paths = probe(synth, &token);
        if paths.is_empty() {
            return None;
        }
        all_paths.extend(paths);
    }

    Some(all_paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::synthesizer::SynthesisError;
    use std::collections::HashMap;

    struct FakeSynth {
        clips: HashMap<String, Vec<PathBuf>>,
    }

    impl FakeSynth {
        fn new(tokens: &[&str]) -> Self {
            let clips = tokens
                .iter()
                .map(|t| (t.to_string(), vec![PathBuf::from(format!("{}.mp4", t))]))
                .collect();
            Self { clips }
        }
    }

    impl ClipSynthesizer for FakeSynth {
        fn synthesize(&self, token: &str) -> Result<Vec<PathBuf>, SynthesisError> {
            self.clips
                .get(token)
                .cloned()
                .ok_or_else(|| SynthesisError::TokenNotFound(token.to_string()))
        }
    }

    #[test]
    fn test_letter_token_prefers_single_handed() {
        let synth = FakeSynth::new(&["a(single-handed-letter)", "a(double-handed-letter)"]);
        assert_eq!(
            letter_token(&synth, 'a').as_deref(),
            Some("a(single-handed-letter)")
        );
    }

    #[test]
    fn test_letter_token_falls_back_to_double_handed() {
        let synth = FakeSynth::new(&["b(double-handed-letter)"]);
        assert_eq!(
            letter_token(&synth, 'b').as_deref(),
            Some("b(double-handed-letter)")
        );
    }

    #[test]
    fn test_letter_token_missing_both_variants() {
        let synth = FakeSynth::new(&[]);
        assert_eq!(letter_token(&synth, 'q'), None);
    }

    #[test]
    fn test_spell_word_mixes_letters_and_digits() {
        let synth = FakeSynth::new(&["a(single-handed-letter)", "b(double-handed-letter)", "4"]);
        let paths = spell_word(&synth, "ab4", None).unwrap();
        assert_eq!(paths.len(), 3);
    }

    #[test]
    fn test_spell_word_rejects_non_alphanumeric() {
        let synth = FakeSynth::new(&["a(single-handed-letter)"]);
        assert_eq!(spell_word(&synth, "a!", None), None);
        assert_eq!(spell_word(&synth, "héllo", None), None);
    }

    #[test]
    fn test_spell_word_aborts_on_unspellable_letter() {
        let synth = FakeSynth::new(&["a(single-handed-letter)"]);
        // 'z' has no clip in either variant, so nothing is emitted at all.
        assert_eq!(spell_word(&synth, "az", None), None);
    }

    #[test]
    fn test_zero_substitution_requires_existing_asset() {
        let synth = FakeSynth::new(&["1"]);
        assert_eq!(spell_word(&synth, "10", None), None);
        assert_eq!(
            spell_word(&synth, "10", Some(Path::new("/no/such/0.mp4"))),
            None
        );

        let zero = std::env::temp_dir().join(format!("signcast_zero_{}.mp4", std::process::id()));
        std::fs::write(&zero, b"x").unwrap();
        let paths = spell_word(&synth, "10", Some(&zero)).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[1], zero);
        let _ = std::fs::remove_file(&zero);
    }
}
