// SIGNCAST HTTP Boundary
// Copyright (c) 2026 SIGNCAST
//
// One query endpoint turns text into a video, one static route serves
// the generated videos back by filename. Consumed by an external
// frontend, hence the configurable CORS layer.

use anyhow::{Context, Result};
use axum::{
    extract::{Path as UrlPath, Query, Request, State},
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tower::ServiceExt; // For oneshot
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeFile;
use tracing::{error, info};

use crate::state::AppState;

#[derive(Deserialize)]
struct TranslateParams {
    text: String,
}

#[derive(Serialize)]
pub struct TranslateResponse {
    pub success: bool,
    pub video_url: Option<String>,
    pub translated_words: Vec<String>,
    pub skipped_words: Vec<String>,
    pub error: Option<String>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    vocabulary_entries: usize,
    dataset_tokens: usize,
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Generated videos are addressed by bare filename only: no separators,
/// no traversal, nothing hidden, `.mp4` and nothing else.
fn is_safe_video_name(name: &str) -> bool {
    if name.is_empty() || name.starts_with('.') {
        return false;
    }
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return false;
    }
    std::path::Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mp4"))
        .unwrap_or(false)
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/translate", get(handle_translate))
        .route("/videos/:filename", get(serve_video))
        .route("/healthz", get(health))
        .with_state(state)
        .layer(cors)
}

pub async fn start_server(port: u16, state: AppState) -> Result<()> {
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("[SERVER] SIGNCAST listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;
    Ok(())
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        vocabulary_entries: state.vocabulary.len(),
        dataset_tokens: state.library.token_count(),
    })
}

async fn handle_translate(
    State(state): State<AppState>,
    Query(params): Query<TranslateParams>,
) -> Json<TranslateResponse> {
    info!("[SERVER] Translate request: {:?}", params.text);

    let outcome = state.translate(&params.text).await;

    // Expose generated videos by URL only, never by filesystem path.
    let video_url = outcome
        .video_path
        .as_ref()
        .and_then(|p| p.file_name())
        .and_then(|name| name.to_str())
        .map(|name| format!("/videos/{}", name));

    Json(TranslateResponse {
        success: outcome.success,
        video_url,
        translated_words: outcome.translated_words,
        skipped_words: outcome.skipped_words,
        error: outcome.error,
    })
}

async fn serve_video(
    State(state): State<AppState>,
    UrlPath(filename): UrlPath<String>,
    req: Request,
) -> impl IntoResponse {
    if !is_safe_video_name(&filename) {
        error!("[SERVER] Video access denied: {:?}", filename);
        return (StatusCode::FORBIDDEN, "Access denied").into_response();
    }

    let path = state.config.output_dir.join(&filename);
    if !path.exists() {
        return StatusCode::NOT_FOUND.into_response();
    }

    match ServeFile::new(path).oneshot(req).await {
        Ok(res) => res.into_response(),
        Err(err) => {
            error!("[SERVER] ServeFile error: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
