use thiserror::Error;

/// Errors that can occur while talking to the remote verifier
#[derive(Clone, Error, Debug)]
pub enum VerifierError {
    /// The HTTP call failed or returned an unexpected status (other than 401)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The verifier answered 2xx but the body is not a valid check response.
    /// Kept distinct from a failed login: the remote service is broken, the
    /// credentials were never judged.
    #[error("Protocol error: {0}")]
    Protocol(String),
}
