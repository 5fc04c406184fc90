use async_trait::async_trait;

use super::errors::AccountError;
use super::types::Threepid;

/// Persistence seam the host homeserver implements.
///
/// Covers the user-account, display-name, and threepid stores the
/// reconciliation steps touch. The store owns its own concurrency
/// discipline; in particular it must enforce `(medium, address)` uniqueness
/// atomically on insert.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Whether an account exists for this qualified user id.
    async fn user_exists(&self, user_id: &str) -> Result<bool, AccountError>;

    /// Register a new account for `localpart`, optionally with an initial
    /// display name. Returns the canonical qualified user id.
    async fn register_user(
        &self,
        localpart: &str,
        display_name: Option<&str>,
    ) -> Result<String, AccountError>;

    /// Canonical qualified user id for a localpart on this server.
    /// Pure formatting against the store's server name.
    fn qualified_user_id(&self, localpart: &str) -> String;

    /// Overwrite the display name of an existing account.
    async fn set_display_name(&self, user_id: &str, display_name: &str)
    -> Result<(), AccountError>;

    /// Qualified user id owning this `(medium, address)`, if any.
    async fn threepid_owner(
        &self,
        medium: &str,
        address: &str,
    ) -> Result<Option<String>, AccountError>;

    /// Bind a threepid to an account. Timestamps are milliseconds since the
    /// Unix epoch.
    async fn add_threepid(
        &self,
        user_id: &str,
        medium: &str,
        address: &str,
        added_at: i64,
        validated_at: i64,
    ) -> Result<(), AccountError>;

    /// All threepids bound to an account.
    async fn user_threepids(&self, user_id: &str) -> Result<Vec<Threepid>, AccountError>;

    /// Unbind a threepid from an account. Removing an absent threepid is not
    /// an error.
    async fn delete_threepid(
        &self,
        user_id: &str,
        medium: &str,
        address: &str,
    ) -> Result<(), AccountError>;
}
