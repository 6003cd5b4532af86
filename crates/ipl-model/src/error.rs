use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("player identifier must not be empty")]
    EmptyPlayer,
}

pub type Result<T> = std::result::Result<T, ModelError>;
