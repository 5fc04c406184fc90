mod errors;
mod reconcile;

pub use errors::AuthError;

use serde_json::Value;
use std::sync::Arc;

use crate::account::AccountStore;
use crate::config::AuthPolicy;
use crate::verifier::{CheckOutcome, CredentialRequest, RestVerifier};

/// Login type the password checker handles, as the host framework names it.
pub const PASSWORD_LOGIN_TYPE: &str = "m.login.password";

/// Threepid medium the email checker handles.
pub const EMAIL_MEDIUM: &str = "email";

/// REST-delegated credential checker and profile reconciler.
///
/// One instance is constructed at startup with its resolved [`AuthPolicy`]
/// and a handle to the host's account store; every authentication attempt
/// flows through it. The two checker entry points return `Ok(None)` both
/// when the checker does not apply (wrong login type or medium) and when the
/// credentials were rejected; `Ok(Some(user_id))` signals success.
pub struct RestAuthProvider {
    policy: AuthPolicy,
    verifier: RestVerifier,
    store: Arc<dyn AccountStore>,
}

impl RestAuthProvider {
    pub fn new(policy: AuthPolicy, store: Arc<dyn AccountStore>) -> Result<Self, AuthError> {
        let verifier = RestVerifier::new(&policy)?;

        tracing::info!("Endpoint: {}", policy.endpoint);
        tracing::info!(
            "Enforce lowercase username during registration: {}",
            policy.enforce_lowercase_username
        );

        Ok(Self {
            policy,
            verifier,
            store,
        })
    }

    /// Password login checker.
    ///
    /// Applies only to `m.login.password` with a string `password` in the
    /// payload; anything else is `Ok(None)` without a network call.
    pub async fn check_password(
        &self,
        username: &str,
        login_type: &str,
        login_payload: &Value,
    ) -> Result<Option<String>, AuthError> {
        if login_type != PASSWORD_LOGIN_TYPE {
            return Ok(None);
        }
        let Some(password) = login_payload.get("password").and_then(Value::as_str) else {
            return Ok(None);
        };

        tracing::info!("Got password check for {}", username);
        let request = CredentialRequest::UserId {
            id: username.to_string(),
            password: password.to_string(),
        };

        self.check_auth(&request).await
    }

    /// Email-based login checker. Applies only to the `email` medium.
    pub async fn check_threepid_auth(
        &self,
        medium: &str,
        address: &str,
        password: &str,
    ) -> Result<Option<String>, AuthError> {
        if medium != EMAIL_MEDIUM {
            return Ok(None);
        }

        tracing::info!("Got password check for {}", address);
        let request = CredentialRequest::Email {
            email: address.to_string(),
            password: password.to_string(),
        };

        self.check_auth(&request).await
    }

    /// Whether a threepid may be bound to an account. This provider never
    /// restricts threepids.
    pub async fn is_threepid_allowed(
        &self,
        _medium: &str,
        _address: &str,
        _registration: bool,
    ) -> bool {
        true
    }

    async fn check_auth(&self, request: &CredentialRequest) -> Result<Option<String>, AuthError> {
        match self.verifier.check_credentials(request).await? {
            CheckOutcome::NotAuthenticated => Ok(None),
            CheckOutcome::Authenticated { mxid, profile } => {
                self.reconcile_authenticated(&mxid, profile.as_ref()).await
            }
        }
    }
}
