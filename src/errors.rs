use thiserror::Error;

pub type Result<T> = std::result::Result<T, StreamError>;

#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Buffer capacity must be positive, got {0}")]
    InvalidCapacity(usize),
    #[error("Image encoding error: {0}")]
    Encoding(#[from] image::ImageError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for StreamError {
    fn from(value: serde_json::Error) -> Self {
        Self::Config(value.to_string())
    }
}
