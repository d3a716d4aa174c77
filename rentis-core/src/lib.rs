pub mod codes;
pub mod model;
pub mod repository;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Unknown booking status: {0}")]
    UnknownStatus(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
