// src/lib.rs

pub mod api;
pub mod config;
pub mod emotion;
pub mod error;
pub mod state;

pub use emotion::{ClassificationResult, Emotion, EmotionClassifier, EmotionClient, EmotionScores};
pub use error::{ClassifyError, FailureKind};
