//! Error taxonomy of the fetch/decode pipeline.
//!
//! # Design
//! Every failure is classified at the stage where it happens into exactly
//! one of three kinds. Callers branch on the variant (or on `kind()`), never
//! on the type of some underlying transport error; those are flattened to
//! their message at classification time.

use thiserror::Error;

/// Result of one pipeline run.
pub type Outcome<T> = Result<T, FetchDecodeError>;

/// Errors returned by the fetch/decode pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchDecodeError {
    /// No response was obtained: network failure, invalid target, timeout.
    #[error("fetch failed: {message}")]
    Fetch { message: String },

    /// A response was obtained but its status is not 2xx. `message` is the
    /// response body when it parsed as JSON, the status text otherwise.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The 2xx response body did not satisfy the schema.
    #[error("decode failed: {message}")]
    Decode { message: String },
}

/// Discriminant of a `FetchDecodeError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Fetch,
    Http,
    Decode,
}

impl FetchDecodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchDecodeError::Fetch { .. } => ErrorKind::Fetch,
            FetchDecodeError::Http { .. } => ErrorKind::Http,
            FetchDecodeError::Decode { .. } => ErrorKind::Decode,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            FetchDecodeError::Fetch { message }
            | FetchDecodeError::Http { message, .. }
            | FetchDecodeError::Decode { message } => message,
        }
    }

    /// HTTP status, only for `Http` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchDecodeError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
