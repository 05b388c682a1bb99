use branddna_core::RecordError;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("source not found: {0}")]
    NotFound(String),
    #[error("invalid source id `{0}`")]
    InvalidSourceId(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid brand record: {0}")]
    Record(#[from] RecordError),
    #[error("duplicate brand name `{0}`")]
    DuplicateName(String),
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}
