use thiserror::Error;

#[derive(Error, Debug)]
pub enum JPathError {
    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
}

impl JPathError {
    pub(crate) fn invalid(selector: &str, reason: impl Into<String>) -> Self {
        JPathError::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }
}
