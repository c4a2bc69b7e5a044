use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// A clause that does not lead to any option the editor offers.
    #[error("unrecognized query clause: {clause}")]
    Unrecognized { clause: String },
}

pub type Result<T> = std::result::Result<T, QueryError>;
