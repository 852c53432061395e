use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid input for {0}: {1:?}")]
    InvalidInput(&'static str, String),
}
