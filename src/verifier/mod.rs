mod client;
mod errors;
mod types;

pub use client::{CHECK_CREDENTIALS_PATH, RestVerifier};
pub use errors::VerifierError;
pub use types::{CheckOutcome, CredentialRequest, ExternalThreepid, VerifiedProfile};
