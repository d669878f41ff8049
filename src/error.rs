// src/error.rs
use jsonsel_jpath::JPathError;
use jsonsel_unmarshal::UnmarshalError;
use thiserror::Error;

/// The error type for everything exposed by this crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Query failed: {0}")]
    Query(#[from] JPathError),

    #[error("Unmarshal failed: {0}")]
    Unmarshal(#[from] UnmarshalError),
}

// Decode errors surface at the top level through the query layer.
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Query(JPathError::Decode(e))
    }
}
