use thiserror::Error;

#[derive(Error, Debug)]
pub enum NarratorError {
    #[error("Narrative service request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Narrative service returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to decode narrative service response: {0}")]
    Deserialization(String),

    #[error("Narrative service returned an empty response")]
    EmptyResponse,
}

impl NarratorError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            NarratorError::Request(e) => e.is_timeout() || e.is_connect(),
            NarratorError::ApiError { status, .. } => *status >= 500,
            NarratorError::Deserialization(_) | NarratorError::EmptyResponse => false,
        }
    }
}
