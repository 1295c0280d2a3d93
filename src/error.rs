use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bad record at line {line}: {detail}")]
    Record { line: usize, detail: String },

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, IntakeError>;
