pub mod form;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{any, get, post},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};

use crate::analysis::handlers as analysis;
use crate::errors::AppError;
use crate::extraction::handlers as extraction;
use crate::state::AppState;

/// Headroom above the upload limit for multipart framing and text fields.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

async fn api_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No API endpoint at {}", uri.path()))
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("Nothing to serve at {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.config.max_upload_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let static_dir = state.config.static_dir.clone();

    let router = Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/health", get(health::health_handler))
        .route("/api", get(health::api_banner))
        .route(
            "/api/upload-resume",
            post(extraction::handle_upload_resume),
        )
        .route("/api/analyze", post(analysis::handle_analyze))
        .route(
            "/api/analyze-with-file",
            post(analysis::handle_analyze_with_file),
        )
        .route("/api/analyze-text", post(analysis::handle_analyze_text))
        .route("/api/skills", get(analysis::handle_skills))
        .route("/api/stats", get(analysis::handle_stats))
        .route("/api/*path", any(api_not_found))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state);

    // Built SPA: real files first, index.html for client-side routes.
    match static_dir {
        Some(dir) => {
            let index = ServeFile::new(dir.join("index.html"));
            router.fallback_service(ServeDir::new(dir).not_found_service(index))
        }
        None => router.fallback(not_found),
    }
}
