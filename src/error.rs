/// Client-level errors
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Network unreachable: {0}")]
    Offline(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Whether this failure belongs to the network-unreachable class.
    ///
    /// Connect-level transport failures are recoverable once connectivity
    /// returns; everything else is terminal for the request that produced it.
    pub fn is_connectivity(&self) -> bool {
        match self {
            ClientError::Offline(_) => true,
            ClientError::Http(e) => e.is_connect(),
            _ => false,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
