use std::fmt;

use super::errors::AccountError;

/// A parsed qualified user id of the form `@localpart:domain`.
///
/// The localpart is everything between the leading `@` and the first `:`;
/// the domain is everything after that colon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedUserId {
    localpart: String,
    domain: String,
}

impl QualifiedUserId {
    /// Parse a qualified user id. Fails when the leading `@` or the `:`
    /// separator is missing.
    pub fn parse(user_id: &str) -> Result<Self, AccountError> {
        let rest = user_id
            .strip_prefix('@')
            .ok_or_else(|| AccountError::InvalidUserId(user_id.to_string()))?;

        let (localpart, domain) = rest
            .split_once(':')
            .ok_or_else(|| AccountError::InvalidUserId(user_id.to_string()))?;

        Ok(Self {
            localpart: localpart.to_string(),
            domain: domain.to_string(),
        })
    }

    pub fn localpart(&self) -> &str {
        &self.localpart
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl fmt::Display for QualifiedUserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}:{}", self.localpart, self.domain)
    }
}

/// A third-party identifier bound to a local account.
///
/// Medium and address are stored lowercased; `(medium, address)` is globally
/// unique across users. Timestamps are milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Threepid {
    pub medium: String,
    pub address: String,
    pub added_at: i64,
    pub validated_at: i64,
}
