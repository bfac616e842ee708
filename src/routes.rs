use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

/// Extra room for multipart framing and text fields around the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn create_routes(state: AppState) -> Router<AppState> {
    let body_limit = state.config.limits.max_file_size as usize + MULTIPART_OVERHEAD;

    Router::new()
        // Reachability
        .route("/api/health", get(handlers::health_check))
        .route("/api/status", get(handlers::connection_status))

        // Languages
        .route("/api/languages", get(handlers::supported_languages))
        .route("/api/catalog", get(handlers::language_catalog))
        .route("/api/language-pairs", get(handlers::language_pairs))

        // Translation
        .route("/api/translate", post(handlers::translate_text))
        .route("/api/translate/video", post(handlers::translate_video))
        .route("/api/detect-language", post(handlers::detect_language))

        // Files and history
        .route("/api/upload", post(handlers::upload_file))
        .route("/api/history", get(handlers::translation_history))
        .layer(DefaultBodyLimit::max(body_limit))
}

/// Full application with state, tracing and CORS applied.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(create_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
