//! Error type shared by every Ambari API call.

use thiserror::Error;

/// Failures surfaced by [`crate::api::client::AmbariClient`] operations.
///
/// Contract violations (empty cluster names and the like) are not
/// represented here: they panic before any request is sent.
#[derive(Error, Debug)]
pub enum AmbariError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Ambari API error {code}: {status}")]
    Api { code: u16, status: String },

    #[error("Invalid Ambari base URL {0}")]
    InvalidBaseUrl(String),

    #[error("Failed to decode Ambari response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AmbariError {
    pub fn api(code: u16, status: impl Into<String>) -> Self {
        AmbariError::Api {
            code,
            status: status.into(),
        }
    }

    /// HTTP status code for API errors, `None` for transport and decode failures
    pub fn code(&self) -> Option<u16> {
        match self {
            AmbariError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AmbariError>;
