use serde::{Deserialize, Serialize};

/// An error when performing a request against the Picket API.
#[derive(Debug, thiserror::Error)]
pub enum PicketError {
    /// An Http request failed or its response could not be read.
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be decoded into the expected shape.
    #[error("decoding response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request body could not be serialized.
    #[error("encoding request: {0}")]
    Encode(serde_json::Error),

    /// The configured base url is not usable.
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl {
        /// The url as it was provided.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The Picket API returned an error.
    #[error(transparent)]
    Api(#[from] ErrorResponse),
}

impl PicketError {
    /// The structured error returned by the API, if this is one.
    pub fn api_error(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }

    /// The machine-readable error code returned by the API, if any.
    pub fn code(&self) -> Option<&str> {
        self.api_error().map(|e| e.code.as_str())
    }
}

/// An error payload returned by the Picket API on a non-2xx response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(default)]
#[error("{msg}")]
pub struct ErrorResponse {
    /// A human readable message.
    pub msg: String,

    /// The error code.
    pub code: String,
}
