use serde::{Deserialize, Serialize};
use std::fmt;

/// Credential payload sent to the verifier, keyed by which login entry point
/// was used. Serialized untagged so the wire body is
/// `{"user": {"id"|"email": …, "password": …}}`.
#[derive(Clone, Serialize)]
#[serde(untagged)]
pub enum CredentialRequest {
    /// Password login against a user id
    UserId { id: String, password: String },
    /// Password login against an email threepid
    Email { email: String, password: String },
}

// Manual Debug so the password never reaches logs.
impl fmt::Debug for CredentialRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserId { id, .. } => f
                .debug_struct("UserId")
                .field("id", id)
                .field("password", &"[redacted]")
                .finish(),
            Self::Email { email, .. } => f
                .debug_struct("Email")
                .field("email", email)
                .field("password", &"[redacted]")
                .finish(),
        }
    }
}

/// Result of one credential check against the verifier
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    /// The verifier accepted the credentials
    Authenticated {
        /// Qualified user id (`@localpart:domain`) as reported by the verifier
        mxid: String,
        /// Profile data to reconcile into the local account store, if any
        profile: Option<VerifiedProfile>,
    },
    /// The verifier rejected the credentials (401 or `success: false`)
    NotAuthenticated,
}

/// Profile data returned alongside a successful check
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VerifiedProfile {
    pub display_name: Option<String>,
    /// `None` means the verifier sent no threepid list at all; `Some(vec![])`
    /// means it sent an empty one. Replace-mode reconciliation relies on the
    /// distinction.
    pub three_pids: Option<Vec<ExternalThreepid>>,
}

/// One third-party identifier as reported by the verifier
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ExternalThreepid {
    pub medium: String,
    pub address: String,
}

/// Top-level verifier response envelope
#[derive(Debug, Deserialize)]
pub(super) struct CheckCredentialsResponse {
    #[serde(default)]
    pub auth: Option<AuthResult>,
}

/// The `auth` object of a verifier response
#[derive(Debug, Deserialize)]
pub(super) struct AuthResult {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub mxid: Option<String>,
    #[serde(default)]
    pub profile: Option<VerifiedProfile>,
}
