//! Error types for restomod-client

use restomod_forms::FormError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ListingFetchError>;

/// A listing request that did not produce usable data.
///
/// The caller decides how to present it and whether to retry with the same
/// `PageSpec`.
#[derive(Error, Debug)]
#[error("Failed to fetch {url}")]
pub struct ListingFetchError {
    pub url: String,
    #[source]
    pub cause: FetchCause,
}

impl ListingFetchError {
    pub fn new(url: impl Into<String>, cause: impl Into<FetchCause>) -> Self {
        Self {
            url: url.into(),
            cause: cause.into(),
        }
    }

    /// HTTP status of the failed response, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self.cause {
            FetchCause::Status(code) => Some(code),
            _ => None,
        }
    }
}

/// Original cause of a failed request
#[derive(Error, Debug)]
pub enum FetchCause {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error {0}")]
    Status(u16),

    #[error("Invalid JSON body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected response shape: {0}")]
    Shape(String),
}

/// Lead submission failure
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] FormError),

    #[error("Failed to submit to {url}")]
    Transport {
        url: String,
        #[source]
        cause: FetchCause,
    },
}
