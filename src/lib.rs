//! rest_auth_provider - REST-delegated credential checking for Matrix-style homeservers
//!
//! This crate delegates password and email login checks to an external REST
//! verifier endpoint and, when the verifier accepts the credentials,
//! provisions or updates the local user record (registration, display name,
//! third-party identifiers).

mod account;
mod config;
mod provider;
mod verifier;

pub use account::{AccountError, AccountStore, MemoryAccountStore, QualifiedUserId, Threepid};
pub use config::{AuthPolicy, ConfigError};
pub use provider::{AuthError, EMAIL_MEDIUM, PASSWORD_LOGIN_TYPE, RestAuthProvider};
pub use verifier::{
    CHECK_CREDENTIALS_PATH, CheckOutcome, CredentialRequest, ExternalThreepid, RestVerifier,
    VerifiedProfile, VerifierError,
};
