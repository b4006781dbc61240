use thiserror::Error;

#[derive(Error, Debug)]
pub enum TagtableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Source error: {0}")]
    Source(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Invalid column filter '{0}' (expected COLUMN=EXPR)")]
    InvalidColumnFilter(String),

    #[error("Invalid delimiter '{0}' (expected a single non-whitespace character)")]
    InvalidDelimiter(String),
}

pub type Result<T> = std::result::Result<T, TagtableError>;
