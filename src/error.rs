use thiserror::Error;

#[derive(Error, Debug)]
pub enum AulaError {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Capacity full: {0}")]
    CapacityFull(String),

    #[error("Enrollment rejected: {0}")]
    Enrollment(String),

    #[error("Assignment rejected: {0}")]
    Assignment(String),

    #[error("Deletion not allowed: {0}")]
    DeletionNotAllowed(String),

    #[error("Edit not allowed: {0}")]
    EditNotAllowed(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AulaError>;
