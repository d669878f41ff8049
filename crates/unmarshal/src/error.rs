use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnmarshalError {
    #[error("JPath error: {0}")]
    JPath(#[from] jsonsel_jpath::JPathError),

    #[error("{field} - value of type {found} is not assignable to type {expected}")]
    TypeMismatch {
        field: String,
        found: &'static str,
        expected: &'static str,
    },

    #[error("{field} - selector '{selector}' matched nothing")]
    NotFound { field: String, selector: String },

    #[error("Destination must be a record, got {found}")]
    NotARecord { found: &'static str },

    #[error("Record deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}
