use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnnotatorError {
    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),
    #[error("unknown tool {0:?}")]
    InvalidTool(String),
    #[error("invalid annotator config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("annotator already active")]
    AlreadyActive,
}
