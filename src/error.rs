use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnricherError {
    #[error("Failed to read report {path}: {source}")]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Report {path} is not valid JSON: {source}")]
    InvalidReport {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Could not parse model response ({reason}): {excerpt}")]
    ResponseParse { reason: String, excerpt: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EnricherError>;

// Kept as a string so the variant exists with or without the HTTP backend.
#[cfg(feature = "openai")]
impl From<reqwest::Error> for EnricherError {
    fn from(err: reqwest::Error) -> Self {
        EnricherError::Http(err.to_string())
    }
}
