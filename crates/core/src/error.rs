use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Expected a JSON object for an input record, got {0}")]
    NotAnObject(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
