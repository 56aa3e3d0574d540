// src/state.rs
// Shared application state for the HTTP layer

use std::sync::Arc;

use crate::config::EmotionConfig;
use crate::emotion::{EmotionClassifier, EmotionClient};
use crate::error::Result;

/// Handlers only hold the classifier; there is no other shared state.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn EmotionClassifier>,
}

impl AppState {
    pub fn new(classifier: Arc<dyn EmotionClassifier>) -> Self {
        Self { classifier }
    }

    pub fn from_config(config: &EmotionConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(EmotionClient::from_config(config)?)))
    }
}
