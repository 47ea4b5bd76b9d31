use thiserror::Error;

/// Failures talking to the reminder service.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Reminder service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Reminder service responded with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to decode reminder service response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Http(e) if e.is_timeout())
    }
}
