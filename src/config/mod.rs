// src/config/mod.rs
// Service configuration loaded from .env and environment variables

use once_cell::sync::Lazy;
use std::str::FromStr;
use std::time::Duration;
use tracing::Level;

pub const DEFAULT_API_URL: &str =
    "https://sn-watson-emotion.labs.skills.network/v1/watson.runtime.nlp.v1/NlpService/EmotionPredict";
pub const DEFAULT_MODEL_ID: &str = "emotion_aggregated-workflow_lang_en_stock";

#[derive(Debug, Clone)]
pub struct EmotionConfig {
    // ── Upstream service
    pub api_url: String,
    pub model_id: String,
    pub timeout_secs: u64,

    // ── Server
    pub host: String,
    pub port: u16,

    // ── Logging
    pub log_level: String,
}

impl Default for EmotionConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            timeout_secs: 10,
            host: "0.0.0.0".to_string(),
            port: 5000,
            log_level: "info".to_string(),
        }
    }
}

// Values may carry trailing comments and whitespace ("10  # seconds").
// Unparseable values fall back to the default.
fn env_var_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr,
{
    match lookup(key) {
        Some(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        None => default,
    }
}

impl EmotionConfig {
    pub fn from_env() -> Self {
        // A missing .env is normal in production
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_url: env_var_or(&lookup, "EMOTION_API_URL", defaults.api_url),
            model_id: env_var_or(&lookup, "EMOTION_MODEL_ID", defaults.model_id),
            timeout_secs: env_var_or(&lookup, "EMOTION_TIMEOUT_SECS", defaults.timeout_secs),
            host: env_var_or(&lookup, "EMOTION_HOST", defaults.host),
            port: env_var_or(&lookup, "EMOTION_PORT", defaults.port),
            log_level: env_var_or(&lookup, "EMOTION_LOG_LEVEL", defaults.log_level),
        }
    }

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Log level for the fmt subscriber, INFO if unrecognized
    pub fn tracing_level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }
}

// Global config instance - loaded once at startup
pub static CONFIG: Lazy<EmotionConfig> = Lazy::new(EmotionConfig::from_env);
