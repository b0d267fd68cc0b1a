use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("generation credential is not configured")]
    MissingCredential,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generation api rejected the request (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("generation response carried no text")]
    EmptyResponse,
}

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("embedding model file missing: {}", .0.display())]
    ModelNotFound(PathBuf),

    #[error("embedding model failed to load: {0}")]
    ModelInit(String),

    #[error("tokenization failed: {0}")]
    Tokenization(String),

    #[error("embedding inference failed: {0}")]
    Inference(String),
}
