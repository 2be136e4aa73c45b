use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaskError {
    #[error("Text detection unavailable: {0}")]
    DetectionUnavailable(String),

    #[error("PII detection unavailable: {0}")]
    PiiUnavailable(String),

    #[error("Invalid rule '{pattern}': {source}")]
    InvalidRule {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("PII confidence threshold must be between 0 and 1, got {0}")]
    InvalidThreshold(f64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, MaskError>;
