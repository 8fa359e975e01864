use davclnt_rfc::rfc::dav::parse::ParseError;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by [`crate::DavClient`].
///
/// Every variant is terminal for the call that produced it; nothing is
/// retried and no partial result accompanies an error.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Status outside `[200, 400)`. Displays as the numeric code followed by
    /// its standard reason phrase, e.g. `404 Not Found`. A custom reason
    /// phrase sent by the server is not reported; the code is what callers
    /// match on.
    #[error("Error: {0}")]
    Status(StatusCode),

    #[error("Unknown xml schema: {0}")]
    Schema(#[from] ParseError),

    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Returns the HTTP status for a [`ClientError::Status`].
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status(status) => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema(_))
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
