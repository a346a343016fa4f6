use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("shape mismatch: {0}")]
    Shape(String),

    #[error("inference failed: {0}")]
    Runtime(String),

    #[error("model call exceeded {0} ms")]
    Timeout(u64),

    #[error("no model session loaded")]
    NotLoaded,
}
