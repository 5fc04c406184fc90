use thiserror::Error;

/// Errors from account store operations
#[derive(Clone, Error, Debug)]
pub enum AccountError {
    #[error("Storage error: {0}")]
    Storage(String),

    /// Duplicate registration or a threepid already bound to another user
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A qualified user id that does not parse as `@localpart:domain`
    #[error("Invalid user id: {0}")]
    InvalidUserId(String),
}
