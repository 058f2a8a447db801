//! Remote Service Errors
//!
//! Failures talking to the remote registration service.

/// Errors that can occur submitting to the registration service
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    /// Request never completed (connection, timeout, TLS)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Service answered with a non-success status
    #[error("Rejected by registration service: HTTP {status} - {body}")]
    Rejected { status: u16, body: String },

    /// Service answered but the body was not what we expected
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Outbound request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for SubmissionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            SubmissionError::InvalidRequest(err.to_string())
        } else if err.is_decode() {
            SubmissionError::MalformedResponse(err.to_string())
        } else {
            SubmissionError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SubmissionError {
    fn from(err: serde_json::Error) -> Self {
        SubmissionError::MalformedResponse(err.to_string())
    }
}
