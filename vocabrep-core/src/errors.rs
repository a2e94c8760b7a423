use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid quality: {0} (expected 0..=5)")]
    InvalidQuality(i32),
    #[error("malformed card: {0}")]
    MalformedCard(String),
    #[error("not found: {0}")]
    NotFound(&'static str),
    #[error("storage error: {0}")]
    Storage(&'static str),
    #[error("date out of range: {0}")]
    DateOutOfRange(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
