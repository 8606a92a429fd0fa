// SIGNCAST Vocabulary — Supported Phrase Set
// Copyright (c) 2026 SIGNCAST

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Read-only set of supported words and space-joined phrases, loaded once
/// at startup. A missing file is not an error: phrase matching is simply
/// disabled and only whole-token/spelling fallback remains.
pub struct Vocabulary {
    entries: HashSet<String>,
}

impl Vocabulary {
    pub fn empty() -> Self {
        Self {
            entries: HashSet::new(),
        }
    }

    pub fn from_entries<I: IntoIterator<Item = S>, S: Into<String>>(entries: I) -> Self {
        Self {
            entries: entries.into_iter().map(|s| s.into()).collect(),
        }
    }

    /// Load a newline-delimited vocabulary file. Entries are lowercased
    /// and blank lines dropped.
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => {
                warn!("[VOCAB] {:?} not found. Phrase matching disabled.", path);
                return Self::empty();
            }
        };

        let entries: HashSet<String> = text
            .lines()
            .map(|line| line.trim().to_lowercase())
            .filter(|line| !line.is_empty())
            .collect();

        info!("[VOCAB] Loaded {} entries from {:?}", entries.len(), path);
        Self { entries }
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.entries.contains(phrase)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Dictionary-mapping JSON shape: [{ "mapping": [{ "token": { "en": [..] } }] }]

#[derive(Deserialize)]
struct MappingBlock {
    #[serde(default)]
    mapping: Vec<MappingRow>,
}

#[derive(Deserialize)]
struct MappingRow {
    #[serde(default)]
    token: TokenEntry,
}

#[derive(Deserialize, Default)]
struct TokenEntry {
    #[serde(default)]
    en: Vec<String>,
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract the unique, normalized English tokens from a dictionary-mapping
/// JSON file and write them as a newline-delimited vocabulary file.
/// Returns the number of entries written.
pub fn build_from_mapping(mapping_path: &Path, output_path: &Path) -> Result<usize> {
    let raw = fs::read_to_string(mapping_path)
        .with_context(|| format!("Failed to read mapping file {:?}", mapping_path))?;
    let blocks: Vec<MappingBlock> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse mapping JSON {:?}", mapping_path))?;

    let mut english: HashSet<String> = HashSet::new();
    for block in &blocks {
        for row in &block.mapping {
            for term in &row.token.en {
                let term = collapse_whitespace(term.trim()).to_lowercase();
                if !term.is_empty() {
                    english.insert(term);
                }
            }
        }
    }

    let mut sorted: Vec<&String> = english.iter().collect();
    sorted.sort();
    let body = sorted
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(output_path, body)
        .with_context(|| format!("Failed to write vocabulary file {:?}", output_path))?;

    info!(
        "[VOCAB] Wrote {} unique English tokens to {:?}",
        english.len(),
        output_path
    );
    Ok(english.len())
}
