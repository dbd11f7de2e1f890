//! # API error taxonomy
//!
//! Every failed call to the remote API ends up as an [`ApiError`]. The UI only
//! ever needs to know whether the server answered with an error status
//! ([`ApiError::Rejected`]) or never produced a usable answer at all
//! ([`ApiError::Transport`], [`ApiError::Decode`]).
//!
//! The variants carry plain data instead of the underlying [`reqwest::Error`] so
//! that errors are `Clone + PartialEq`, can be stored in Dioxus signals and can be
//! built by test doubles.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("server rejected the request with status {status}")]
    Rejected { status: u16 },
    /// The request never completed (DNS, connection, CORS, ...).
    #[error("could not reach the server: {0}")]
    Transport(String),
    /// The server answered but the body was not what we expected.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// True when the server received the request and said no.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Rejected { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            ApiError::Rejected {
                status: status.as_u16(),
            }
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}
