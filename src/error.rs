// src/error.rs
// Error types for the emotion classification path

use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/// Everything that can go wrong between receiving text and producing scores
#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("request to emotion service timed out")]
    Timeout,

    #[error("unable to reach emotion service: {0}")]
    Network(#[source] reqwest::Error),

    #[error("emotion service returned {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    #[error("unable to parse emotion service response: {0}")]
    Parse(String),
}

/// Convenience type alias for Result using ClassifyError
pub type Result<T> = std::result::Result<T, ClassifyError>;

/// Coarse failure category, used as a structured log field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidInput,
    NetworkFailure,
    UpstreamError,
    ParseFailure,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::InvalidInput => "invalid_input",
            FailureKind::NetworkFailure => "network_failure",
            FailureKind::UpstreamError => "upstream_error",
            FailureKind::ParseFailure => "parse_failure",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ClassifyError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ClassifyError::InvalidInput(_) => FailureKind::InvalidInput,
            ClassifyError::Timeout | ClassifyError::Network(_) => FailureKind::NetworkFailure,
            ClassifyError::Upstream { .. } => FailureKind::UpstreamError,
            ClassifyError::Parse(_) => FailureKind::ParseFailure,
        }
    }
}

impl From<reqwest::Error> for ClassifyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClassifyError::Timeout
        } else if err.is_decode() {
            ClassifyError::Parse(err.to_string())
        } else {
            ClassifyError::Network(err)
        }
    }
}

impl From<serde_json::Error> for ClassifyError {
    fn from(err: serde_json::Error) -> Self {
        ClassifyError::Parse(err.to_string())
    }
}
