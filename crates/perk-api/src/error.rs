use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The stored token is missing/expired, or the service answered 401.
    /// The logout path has already been signalled when this is returned.
    #[error("your session has expired — please log in again")]
    SessionExpired,

    /// Connection, DNS, or timeout failure below the HTTP layer.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service rejected the request (non-2xx other than 401).
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// A 2xx response carried a body that does not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),
}
