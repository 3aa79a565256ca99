use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("login failed: {0}")]
    LoginFailed(String),

    #[error("login succeeded but the returned token could not be decoded")]
    UndecodableToken,

    #[error("token store error: {0}")]
    TokenStore(String),
}
