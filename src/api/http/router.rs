// src/api/http/router.rs
// HTTP router composition

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use super::handlers::{emotion_detector_handler, health_handler, index_handler};
use crate::state::AppState;

pub fn http_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/emotionDetector", get(emotion_detector_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
