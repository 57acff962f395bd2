use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Backend capability not available: {0}")]
    NotSupported(&'static str),

    #[error("Failed to construct backend: {0}")]
    Construction(String),

    #[error("Failed to load source: {0}")]
    Load(String),

    #[error("Playback operation failed: {0}")]
    Playback(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BackendError>;
