// src/api/http/handlers.rs
// Handlers for the emotion detector endpoint, index page and health check

use axum::{
    Json,
    extract::{Query, State},
    response::{Html, IntoResponse},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::api::error::{ApiError, ApiResult, IntoApiErrorOption};
use crate::emotion::ClassificationResult;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../../templates/index.html");

#[derive(Debug, Deserialize)]
pub struct TextQuery {
    #[serde(rename = "textToAnalyze")]
    pub text_to_analyze: Option<String>,
}

/// GET /emotionDetector?textToAnalyze=...
///
/// Blank or missing text is rejected with 400 before the classifier runs.
/// An all-null result means the upstream call failed and maps to 502.
pub async fn emotion_detector_handler(
    State(state): State<AppState>,
    Query(query): Query<TextQuery>,
) -> ApiResult<Json<ClassificationResult>> {
    let text = query
        .text_to_analyze
        .filter(|t| !t.trim().is_empty())
        .ok_or_bad_request("No text provided")?;

    let result = state.classifier.classify(&text).await;

    match result.dominant_emotion {
        Some(emotion) => {
            info!(classifier = state.classifier.name(), dominant = %emotion, "Classified text");
            Ok(Json(result))
        }
        None => Err(ApiError::bad_gateway("Emotion service unavailable").with_body(json!(result))),
    }
}

/// GET /
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339()
    }))
}
