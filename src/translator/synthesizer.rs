// SIGNCAST Synthesizer Seam — Token to Clip Lookup
// Copyright (c) 2026 SIGNCAST
//
// The original concatenative synthesis model is reduced to the one
// behavior this service relies on: given a dataset token, hand back the
// video clips recorded for it. Implementations return an explicit list
// of media paths, never an opaque object to introspect.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum SynthesisError {
    /// The dataset has no clip for this token.
    #[error("no clip recorded for token '{0}'")]
    TokenNotFound(String),
    /// The dataset itself is unusable (unreadable directory, etc.).
    #[error("clip dataset error: {0}")]
    Dataset(String),
}

/// A collaborator that maps a single dataset token to zero or more
/// playable clip files. Callers own the fallback policy; implementations
/// only report what the dataset holds.
pub trait ClipSynthesizer: Send + Sync {
    fn synthesize(&self, token: &str) -> Result<Vec<PathBuf>, SynthesisError>;
}

/// Directory-backed synthesizer: every `.mp4` under the dataset root is
/// indexed by its lowercase file stem, so the token `a(single-handed-letter)`
/// resolves to `a(single-handed-letter).mp4` wherever it lives in the tree.
pub struct ClipLibrary {
    clips: HashMap<String, Vec<PathBuf>>,
}

impl ClipLibrary {
    /// Scan the dataset directory once. Tokens with multiple recordings
    /// (same stem in different subdirectories) accumulate in walk order.
    pub fn scan(root: &Path) -> Self {
        let mut clips: HashMap<String, Vec<PathBuf>> = HashMap::new();

        if !root.is_dir() {
            warn!("[LIBRARY] Clip directory {:?} not found. Synthesis will find nothing.", root);
            return Self { clips };
        }

        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let is_mp4 = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("mp4"))
                .unwrap_or(false);
            if !is_mp4 {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                clips
                    .entry(stem.to_lowercase())
                    .or_default()
                    .push(path.to_path_buf());
            }
        }

        info!("[LIBRARY] Indexed {} tokens from {:?}", clips.len(), root);
        Self { clips }
    }

    pub fn token_count(&self) -> usize {
        self.clips.len()
    }
}

impl ClipSynthesizer for ClipLibrary {
    fn synthesize(&self, token: &str) -> Result<Vec<PathBuf>, SynthesisError> {
        match self.clips.get(token) {
            Some(paths) => Ok(paths.clone()),
            None => Err(SynthesisError::TokenNotFound(token.to_string())),
        }
    }
}
