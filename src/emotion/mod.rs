// src/emotion/mod.rs
// Emotion labels, score normalization and dominant-emotion selection

pub mod client;
pub mod wire;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use client::{Analysis, EmotionClassifier, EmotionClient};
pub use wire::{EmotionMention, parse_mentions, parse_scores};

/// The fixed label set reported by the classification service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anger,
    Disgust,
    Fear,
    Joy,
    Sadness,
}

impl Emotion {
    /// All labels in priority order. Earlier labels win ties.
    pub const ALL: [Emotion; 5] = [
        Emotion::Anger,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Joy,
        Emotion::Sadness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "anger" => Ok(Emotion::Anger),
            "disgust" => Ok(Emotion::Disgust),
            "fear" => Ok(Emotion::Fear),
            "joy" => Ok(Emotion::Joy),
            "sadness" => Ok(Emotion::Sadness),
            other => Err(format!("unknown emotion label: {other}")),
        }
    }
}

/// Confidence per label. All five keys are always serialized, null when absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionScores {
    pub anger: Option<f64>,
    pub disgust: Option<f64>,
    pub fear: Option<f64>,
    pub joy: Option<f64>,
    pub sadness: Option<f64>,
}

impl EmotionScores {
    /// Scores with every label absent
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, emotion: Emotion) -> Option<f64> {
        match emotion {
            Emotion::Anger => self.anger,
            Emotion::Disgust => self.disgust,
            Emotion::Fear => self.fear,
            Emotion::Joy => self.joy,
            Emotion::Sadness => self.sadness,
        }
    }

    pub fn set(&mut self, emotion: Emotion, score: Option<f64>) {
        let slot = match emotion {
            Emotion::Anger => &mut self.anger,
            Emotion::Disgust => &mut self.disgust,
            Emotion::Fear => &mut self.fear,
            Emotion::Joy => &mut self.joy,
            Emotion::Sadness => &mut self.sadness,
        };
        *slot = score;
    }

    /// Labels and scores in priority order
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, Option<f64>)> + '_ {
        Emotion::ALL.iter().map(move |e| (*e, self.get(*e)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, score)| score.is_none())
    }
}

/// Highest-scoring label. NaN and absent scores are skipped; ties go to the
/// label that comes first in `Emotion::ALL`.
pub fn dominant_emotion(scores: &EmotionScores) -> Option<Emotion> {
    let mut best: Option<(Emotion, f64)> = None;
    for (emotion, score) in scores.iter() {
        let Some(score) = score.filter(|s| !s.is_nan()) else {
            continue;
        };
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((emotion, score)),
        }
    }
    best.map(|(emotion, _)| emotion)
}

/// Scores plus the dominant label, as published by the HTTP endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(flatten)]
    pub scores: EmotionScores,
    pub dominant_emotion: Option<Emotion>,
}

impl ClassificationResult {
    /// The all-null result returned for blank input and every failure
    pub fn null() -> Self {
        Self::default()
    }

    pub fn from_scores(scores: EmotionScores) -> Self {
        Self {
            dominant_emotion: dominant_emotion(&scores),
            scores,
        }
    }

    pub fn is_null(&self) -> bool {
        self.dominant_emotion.is_none()
    }

    /// Score of the dominant label, if any
    pub fn dominant_score(&self) -> Option<f64> {
        self.dominant_emotion.and_then(|e| self.scores.get(e))
    }

    /// One-line description, e.g. "Dominant emotion: joy (97.00%)"
    pub fn summary(&self) -> String {
        match (self.dominant_emotion, self.dominant_score()) {
            (Some(emotion), Some(score)) => {
                format!("Dominant emotion: {} ({:.2}%)", emotion, score * 100.0)
            }
            _ => "No dominant emotion".to_string(),
        }
    }
}
