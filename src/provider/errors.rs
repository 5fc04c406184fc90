use thiserror::Error;

use crate::account::AccountError;
use crate::verifier::VerifierError;

/// Errors surfaced to the host from an authentication attempt.
///
/// Failed authentication and policy rejections are NOT errors; those are
/// `Ok(None)` on the checker entry points.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Error from the remote verifier call
    #[error("Verifier error: {0}")]
    Verifier(VerifierError),

    /// Error from the account store
    #[error("Store error: {0}")]
    Store(AccountError),
}

impl AuthError {
    /// Log the error and return self, allowing method chaining where a call
    /// site wants explicit logging.
    pub fn log(self) -> Self {
        match &self {
            Self::Verifier(err) => tracing::warn!("Verifier error: {}", err),
            Self::Store(err) => tracing::warn!("Store error: {}", err),
        }
        self
    }
}

// From implementations that log as the error crosses into the provider

impl From<VerifierError> for AuthError {
    fn from(err: VerifierError) -> Self {
        let error = Self::Verifier(err);
        tracing::warn!("{}", error);
        error
    }
}

impl From<AccountError> for AuthError {
    fn from(err: AccountError) -> Self {
        let error = Self::Store(err);
        tracing::warn!("{}", error);
        error
    }
}
