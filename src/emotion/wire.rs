// src/emotion/wire.rs
// Request and response payloads for the EmotionPredict endpoint

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

use super::{ClassificationResult, Emotion, EmotionScores};
use crate::error::{ClassifyError, Result};

/// `{"raw_document": {"text": ...}}`
#[derive(Debug, Serialize)]
pub struct EmotionPredictRequest<'a> {
    pub raw_document: RawDocument<'a>,
}

#[derive(Debug, Serialize)]
pub struct RawDocument<'a> {
    pub text: &'a str,
}

impl<'a> EmotionPredictRequest<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            raw_document: RawDocument { text },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionPredictResponse {
    pub emotion_predictions: Vec<EmotionPrediction>,
    #[serde(default)]
    pub producer_id: Option<ProducerId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionPrediction {
    pub emotion: HashMap<String, f64>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub emotion_mentions: Vec<MentionPayload>,
}

#[derive(Debug, Deserialize)]
pub struct MentionPayload {
    pub span: Span,
    pub emotion: HashMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Span {
    #[serde(default)]
    pub begin: usize,
    #[serde(default)]
    pub end: usize,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ProducerId {
    pub name: String,
    pub version: String,
}

/// A span of the input with its own classification
#[derive(Debug, Clone, Serialize)]
pub struct EmotionMention {
    pub span: Span,
    pub result: ClassificationResult,
}

impl EmotionPredictResponse {
    fn first_prediction(&self) -> Result<&EmotionPrediction> {
        self.emotion_predictions
            .first()
            .ok_or_else(|| ClassifyError::Parse("emotionPredictions is empty".to_string()))
    }

    pub fn scores(&self) -> Result<EmotionScores> {
        scores_from_map(&self.first_prediction()?.emotion)
    }

    /// Mentions with unusable scores are logged and skipped
    pub fn mentions(&self) -> Result<Vec<EmotionMention>> {
        Ok(self
            .first_prediction()?
            .emotion_mentions
            .iter()
            .filter_map(|m| match scores_from_map(&m.emotion) {
                Ok(scores) => Some(EmotionMention {
                    span: m.span.clone(),
                    result: ClassificationResult::from_scores(scores),
                }),
                Err(e) => {
                    warn!(span = %m.span.text, error = %e, "Skipping emotion mention");
                    None
                }
            })
            .collect())
    }
}

/// Pull the five fixed labels out of an upstream emotion map.
/// Every label must be present with a confidence in [0, 1]; unknown labels are ignored.
fn scores_from_map(map: &HashMap<String, f64>) -> Result<EmotionScores> {
    let mut scores = EmotionScores::empty();
    for emotion in Emotion::ALL {
        let score = map.get(emotion.as_str()).copied().ok_or_else(|| {
            ClassifyError::Parse(format!("missing score for '{}'", emotion))
        })?;
        if !(0.0..=1.0).contains(&score) {
            return Err(ClassifyError::Parse(format!(
                "score for '{}' out of range: {}",
                emotion, score
            )));
        }
        scores.set(emotion, Some(score));
    }
    Ok(scores)
}

pub fn parse_response(body: &[u8]) -> Result<EmotionPredictResponse> {
    Ok(serde_json::from_slice(body)?)
}

/// Scores from `emotionPredictions[0].emotion`
pub fn parse_scores(body: &[u8]) -> Result<EmotionScores> {
    parse_response(body)?.scores()
}

/// Per-span results from `emotionPredictions[0].emotionMentions`
pub fn parse_mentions(body: &[u8]) -> Result<Vec<EmotionMention>> {
    parse_response(body)?.mentions()
}
