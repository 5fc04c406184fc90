use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Default timeout for the outbound credential check call.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur while resolving the provider configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The required `endpoint` key is absent, not a string, or empty
    #[error("Missing endpoint config")]
    MissingEndpoint,

    /// The `endpoint` value is not a valid URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Resolved provider policy, immutable after load.
///
/// Produced by [`AuthPolicy::parse`] from the raw nested configuration tree
/// the homeserver hands the module. Only `endpoint` is required; every other
/// key falls back to its documented default when absent or malformed.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthPolicy {
    /// Base URL of the remote verifier; the check-credentials path is
    /// appended verbatim.
    pub endpoint: String,
    /// Reject registration of localparts containing uppercase characters
    pub enforce_lowercase_username: bool,
    /// Set the display name from profile data when registering a new user
    pub set_name_on_register: bool,
    /// Overwrite the stored display name from profile data on every login
    pub set_name_on_login: bool,
    /// Add threepids from profile data to the local store
    pub update_threepids: bool,
    /// Delete stored threepids absent from the verifier's current list
    pub replace_threepids: bool,
    /// Timeout applied to the outbound verification call. Not part of the
    /// nested config surface; hosts override the field directly.
    pub request_timeout: Duration,
}

impl AuthPolicy {
    /// Resolve the raw configuration tree into a flat policy.
    ///
    /// Fails only on a missing or invalid `endpoint`; all optional nested
    /// paths resolve best-effort to their defaults.
    pub fn parse(config: &Value) -> Result<Self, ConfigError> {
        let endpoint = match config.get("endpoint").and_then(Value::as_str) {
            Some(endpoint) if !endpoint.is_empty() => endpoint.to_string(),
            _ => return Err(ConfigError::MissingEndpoint),
        };

        Url::parse(&endpoint)
            .map_err(|err| ConfigError::InvalidEndpoint(format!("{endpoint}: {err}")))?;

        Ok(Self {
            endpoint,
            enforce_lowercase_username: policy_flag(
                config,
                &["policy", "registration", "username", "enforceLowercase"],
                true,
            ),
            set_name_on_register: policy_flag(
                config,
                &["policy", "registration", "profile", "name"],
                true,
            ),
            set_name_on_login: policy_flag(config, &["policy", "login", "profile", "name"], false),
            update_threepids: policy_flag(config, &["policy", "all", "threepid", "update"], true),
            replace_threepids: policy_flag(config, &["policy", "all", "threepid", "replace"], false),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }
}

/// Best-effort nested boolean lookup.
///
/// Walks `path` through the configuration tree; a missing intermediate key, a
/// non-object node along the way, or a non-boolean leaf all yield `default`.
/// Optional paths never produce an error.
fn policy_flag(config: &Value, path: &[&str], default: bool) -> bool {
    let mut node = config;
    for key in path {
        match node.get(key) {
            Some(next) => node = next,
            None => return default,
        }
    }
    node.as_bool().unwrap_or(default)
}
