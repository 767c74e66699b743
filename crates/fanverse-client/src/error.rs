//! Client error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or an undecodable body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with its error body
    #[error("API error {status} {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// The refresh token was rejected; both tokens have been dropped
    #[error("Session expired, sign in again")]
    SessionExpired,
}

impl ClientError {
    /// HTTP status for API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::SessionExpired => Some(401),
        }
    }

    /// Error code for API errors
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
