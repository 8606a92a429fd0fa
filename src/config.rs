// SIGNCAST Service Configuration
// Copyright (c) 2026 SIGNCAST

use std::env;
use std::path::PathBuf;
use tracing::info;

/// Read-only service configuration, collected from `SIGNCAST_*`
/// environment variables once at startup and injected everywhere else.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Root of the sign clip dataset (lowercase `.mp4` stems are tokens).
    pub clip_dir: PathBuf,
    /// Newline-delimited vocabulary of supported words and phrases.
    pub vocab_file: PathBuf,
    /// Where concatenated translation videos are written.
    pub output_dir: PathBuf,
    /// Separator clip inserted between resolved units.
    pub pause_clip: PathBuf,
    /// Stand-in clip for digit `0`.
    pub zero_clip: PathBuf,
    /// CORS origins for the HTTP boundary; empty means permissive.
    pub allowed_origins: Vec<String>,
}

fn env_path(key: &str, default: &str) -> PathBuf {
    PathBuf::from(env::var(key).unwrap_or_else(|_| default.to_string()))
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        let allowed_origins = env::var("SIGNCAST_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let config = Self {
            clip_dir: env_path("SIGNCAST_CLIP_DIR", "dataset"),
            vocab_file: env_path("SIGNCAST_VOCAB_FILE", "supported_words.txt"),
            output_dir: env_path("SIGNCAST_OUTPUT_DIR", "outputs"),
            pause_clip: env_path("SIGNCAST_PAUSE_CLIP", "assets/Pause.mp4"),
            zero_clip: env_path("SIGNCAST_ZERO_CLIP", "assets/0.mp4"),
            allowed_origins,
        };

        info!(
            "[CONFIG] clips={:?} vocab={:?} outputs={:?}",
            config.clip_dir, config.vocab_file, config.output_dir
        );
        config
    }

    /// Pause clip path, only when the asset actually exists. Without it
    /// the resolver emits no separators at all.
    pub fn pause_clip_if_present(&self) -> Option<PathBuf> {
        self.pause_clip.exists().then(|| self.pause_clip.clone())
    }

    /// Zero stand-in clip path, only when the asset exists.
    pub fn zero_clip_if_present(&self) -> Option<PathBuf> {
        self.zero_clip.exists().then(|| self.zero_clip.clone())
    }
}
