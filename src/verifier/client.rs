use serde_json::json;

use crate::config::AuthPolicy;

use super::errors::VerifierError;
use super::types::{CheckCredentialsResponse, CheckOutcome, CredentialRequest};

/// Fixed path of the credential check API on the verifier, appended verbatim
/// to the configured endpoint.
pub const CHECK_CREDENTIALS_PATH: &str = "/_matrix-internal/identity/v1/check_credentials/";

/// HTTP client for the remote verifier
pub struct RestVerifier {
    endpoint: String,
    client: reqwest::Client,
}

impl RestVerifier {
    /// Build a verifier client against the policy's endpoint, with the
    /// policy's request timeout.
    pub fn new(policy: &AuthPolicy) -> Result<Self, VerifierError> {
        let client = reqwest::Client::builder()
            .timeout(policy.request_timeout)
            .build()
            .map_err(|err| VerifierError::Transport(err.to_string()))?;

        Ok(Self {
            endpoint: policy.endpoint.clone(),
            client,
        })
    }

    /// Submit one credential check to the verifier.
    ///
    /// 401 and `success: false` are normal outcomes, not errors. Any other
    /// non-2xx status is a transport error; a 2xx body without a usable
    /// `auth` object is a protocol error.
    pub async fn check_credentials(
        &self,
        request: &CredentialRequest,
    ) -> Result<CheckOutcome, VerifierError> {
        let url = format!("{}{CHECK_CREDENTIALS_PATH}", self.endpoint);

        let response = self
            .client
            .post(&url)
            .json(&json!({ "user": request }))
            .send()
            .await
            .map_err(|err| VerifierError::Transport(err.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(CheckOutcome::NotAuthenticated);
        }
        if !status.is_success() {
            tracing::warn!("Credential check failed with status: {}", status);
            return Err(VerifierError::Transport(format!(
                "verifier returned status {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|err| VerifierError::Transport(err.to_string()))?;

        let response: CheckCredentialsResponse = serde_json::from_str(&body).map_err(|err| {
            tracing::warn!("Invalid JSON data returned from verifier: {}", err);
            VerifierError::Protocol(format!("failed to deserialize verifier response: {err}"))
        })?;

        let auth = response.auth.ok_or_else(|| {
            tracing::warn!("Invalid JSON data returned from verifier: no auth data");
            VerifierError::Protocol("invalid response: no auth data".to_string())
        })?;

        let success = auth.success.ok_or_else(|| {
            tracing::warn!("Invalid JSON data returned from verifier: auth.success missing");
            VerifierError::Protocol("invalid response: auth.success missing".to_string())
        })?;

        if !success {
            tracing::info!("User not authenticated");
            return Ok(CheckOutcome::NotAuthenticated);
        }

        let mxid = auth.mxid.ok_or_else(|| {
            VerifierError::Protocol("invalid response: mxid missing on success".to_string())
        })?;

        tracing::info!("User {} authenticated", mxid);
        Ok(CheckOutcome::Authenticated {
            mxid,
            profile: auth.profile,
        })
    }
}
