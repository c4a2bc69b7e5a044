use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("identifier must not be empty")]
    EmptyId,
    #[error("unknown dancer label: {0}")]
    UnknownDancer(String),
    #[error("unknown facing glyph: {0}")]
    UnknownFacing(char),
}

pub type Result<T> = std::result::Result<T, ModelError>;
