use thiserror::Error;

/// Errors returned by [`ProposalsClient`](crate::ProposalsClient) operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The requested page size is larger than the ceiling enforced by the service.
    /// Raised before any request is sent.
    #[error("Limit cannot exceed {max} (requested {requested})")]
    LimitExceeded { requested: u32, max: u32 },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Failures surfaced by a [`Transport`](crate::Transport).
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Failed to send request: {0}")]
    RequestFailed(String),

    #[error("Response error (status {0}): {1}")]
    ResponseError(u16, String),

    #[error("Failed to deserialize response: {0}")]
    Deserialization(String),

    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Deserialization(err.to_string())
    }
}

/// Rejected account or proposal name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("Name '{0}' is longer than 13 characters")]
    TooLong(String),

    #[error("Name '{name}' contains invalid character '{character}' at position {position}")]
    InvalidCharacter {
        name: String,
        character: char,
        position: usize,
    },
}
