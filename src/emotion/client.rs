// src/emotion/client.rs
// HTTP client for the remote EmotionPredict service

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::wire::{self, EmotionMention, EmotionPredictRequest};
use super::ClassificationResult;
use crate::config::EmotionConfig;
use crate::error::{ClassifyError, Result};

/// Header the service uses to select a model
pub const MODEL_ID_HEADER: &str = "grpc-metadata-mm-model-id";

/// Max characters of an upstream error body kept for logging
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Anything that can turn text into a classification result.
///
/// Implementations never fail: every problem collapses into
/// `ClassificationResult::null()`.
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    /// Classifier name for logging
    fn name(&self) -> &'static str;

    async fn classify(&self, text: &str) -> ClassificationResult;
}

/// Result plus the per-span breakdown the service returns
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    #[serde(flatten)]
    pub result: ClassificationResult,
    pub mentions: Vec<EmotionMention>,
}

/// Emotion service client
pub struct EmotionClient {
    endpoint: String,
    model_id: String,
    http_client: reqwest::Client,
}

impl EmotionClient {
    /// Create new client with a per-request timeout
    pub fn new(
        endpoint: impl Into<String>,
        model_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint: endpoint.into(),
            model_id: model_id.into(),
            http_client,
        })
    }

    pub fn from_config(config: &EmotionConfig) -> Result<Self> {
        Self::new(
            config.api_url.clone(),
            config.model_id.clone(),
            config.request_timeout(),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Classify text, reporting why it failed instead of returning nulls
    pub async fn try_classify(&self, text: &str) -> Result<ClassificationResult> {
        let body = self.fetch(text).await?;
        Ok(ClassificationResult::from_scores(wire::parse_scores(&body)?))
    }

    /// Classify text and keep the per-span mentions
    pub async fn try_analyze(&self, text: &str) -> Result<Analysis> {
        let body = self.fetch(text).await?;
        let response = wire::parse_response(&body)?;
        Ok(Analysis {
            result: ClassificationResult::from_scores(response.scores()?),
            mentions: response.mentions()?,
        })
    }

    /// Single POST to the service; returns the raw body of a 2xx reply
    async fn fetch(&self, text: &str) -> Result<Vec<u8>> {
        if text.trim().is_empty() {
            return Err(ClassifyError::InvalidInput("no text provided".to_string()));
        }

        debug!(endpoint = %self.endpoint, chars = text.len(), "Sending emotion request");

        let response = self
            .http_client
            .post(&self.endpoint)
            .header(MODEL_ID_HEADER, &self.model_id)
            .json(&EmotionPredictRequest::new(text))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifyError::Upstream {
                status,
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl EmotionClassifier for EmotionClient {
    fn name(&self) -> &'static str {
        "emotion-predict"
    }

    async fn classify(&self, text: &str) -> ClassificationResult {
        match self.try_classify(text).await {
            Ok(result) => result,
            Err(ClassifyError::InvalidInput(reason)) => {
                debug!("Skipping emotion request: {}", reason);
                ClassificationResult::null()
            }
            Err(e) => {
                warn!(kind = %e.kind(), error = %e, "Emotion classification failed");
                ClassificationResult::null()
            }
        }
    }
}
