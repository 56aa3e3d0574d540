// src/api/http/mod.rs

mod handlers;
mod router;

pub use handlers::{TextQuery, emotion_detector_handler, health_handler, index_handler};
pub use router::http_router;
