// SIGNCAST Compositor — Lossless Clip Concatenation
// Copyright (c) 2026 SIGNCAST
//
// Resolved clips are joined with FFmpeg's concat demuxer (`-f concat`).
// With `-c copy` the output is a stream-copy mux of the dataset clips,
// so the join costs near-zero CPU and loses no quality.

use anyhow::{bail, Context, Result};
use rand::Rng;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{error, info};

use crate::translator::resolver::TokenResolver;

/// Final result of the text-to-video pipeline, in the shape the HTTP
/// boundary and the CLI both report.
#[derive(Debug, Serialize)]
pub struct TranslateOutcome {
    pub success: bool,
    pub video_path: Option<PathBuf>,
    pub translated_words: Vec<String>,
    pub skipped_words: Vec<String>,
    pub error: Option<String>,
}

impl TranslateOutcome {
    fn failure(translated: Vec<String>, skipped: Vec<String>, error: String) -> Self {
        Self {
            success: false,
            video_path: None,
            translated_words: translated,
            skipped_words: skipped,
            error: Some(error),
        }
    }
}

/// Unique output name for one translation run.
pub fn output_filename() -> String {
    let tag: u64 = rand::thread_rng().gen();
    format!("sign_translation_{:016x}.mp4", tag)
}

pub struct VideoCompositor;

impl VideoCompositor {
    /// Build the FFmpeg concat manifest: one `file '<path>'` line per clip.
    pub fn create_concat_manifest(clips: &[PathBuf]) -> String {
        clips
            .iter()
            .map(|p| format!("file '{}'", p.to_string_lossy()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Write the manifest next to the output file and invoke FFmpeg to
    /// join the clips into a single stream-copied video.
    pub async fn concatenate(clips: &[PathBuf], output_path: &Path) -> Result<PathBuf> {
        if clips.is_empty() {
            bail!("No clips to concatenate.");
        }

        let manifest_path = output_path.with_extension("concat_manifest.txt");
        let manifest_content = Self::create_concat_manifest(clips);
        fs::write(&manifest_path, &manifest_content)
            .with_context(|| format!("Failed to write concat manifest {:?}", manifest_path))?;

        info!(
            "[COMPOSE] Manifest written ({} clips): {:?}",
            clips.len(),
            manifest_path
        );

        let status = Command::new("ffmpeg")
            .args(["-y", "-f", "concat", "-safe", "0", "-i"])
            .arg(&manifest_path)
            .args(["-c", "copy"])
            .arg(output_path)
            .status()
            .await
            .context("Failed to execute ffmpeg")?;

        let _ = fs::remove_file(&manifest_path);

        if status.success() {
            info!("[COMPOSE] Final output: {:?}", output_path);
            Ok(output_path.to_path_buf())
        } else {
            error!("[COMPOSE] FFmpeg concat failed.");
            bail!("FFmpeg concat demuxer failed.");
        }
    }
}

/// Full pipeline: resolve text to clips, then concatenate into a uniquely
/// named video under `output_dir`. Per-token failures have already been
/// absorbed by the resolver; anything that goes wrong here (no clips at
/// all, FFmpeg, I/O) comes back as a failed outcome, never a panic and
/// never a partial video.
pub async fn translate_to_video(
    resolver: &TokenResolver<'_>,
    text: &str,
    output_dir: &Path,
) -> TranslateOutcome {
    let resolution = resolver.resolve(text);

    if resolution.is_empty() {
        return TranslateOutcome::failure(
            resolution.labels,
            resolution.skipped,
            "No translatable words found.".to_string(),
        );
    }

    if let Err(err) = fs::create_dir_all(output_dir) {
        error!("[COMPOSE] Cannot create output dir {:?}: {}", output_dir, err);
        return TranslateOutcome::failure(
            resolution.labels,
            resolution.skipped,
            format!("Failed to create output directory: {}", err),
        );
    }

    let out_path = output_dir.join(output_filename());
    match VideoCompositor::concatenate(&resolution.clips, &out_path).await {
        Ok(path) => TranslateOutcome {
            success: true,
            video_path: Some(path),
            translated_words: resolution.labels,
            skipped_words: resolution.skipped,
            error: None,
        },
        Err(err) => {
            error!("[COMPOSE] Pipeline failed: {}", err);
            TranslateOutcome::failure(resolution.labels, resolution.skipped, err.to_string())
        }
    }
}
