use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::errors::AccountError;
use super::store::AccountStore;
use super::types::Threepid;

#[derive(Debug, Default)]
struct UserRecord {
    display_name: Option<String>,
}

#[derive(Debug, Default)]
struct Inner {
    /// Keyed by qualified user id
    users: HashMap<String, UserRecord>,
    /// Keyed by `(medium, address)`, value is the owning qualified user id
    threepids: HashMap<(String, String), (String, Threepid)>,
}

/// In-memory [`AccountStore`] for embedding and tests.
///
/// A single mutex over both maps keeps registration and threepid inserts
/// atomic with their uniqueness checks.
pub struct MemoryAccountStore {
    server_name: String,
    inner: Mutex<Inner>,
}

impl MemoryAccountStore {
    pub fn new(server_name: impl Into<String>) -> Self {
        tracing::info!("Creating new in-memory account store");
        Self {
            server_name: server_name.into(),
            inner: Mutex::new(Inner::default()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, AccountError> {
        self.inner
            .lock()
            .map_err(|_| AccountError::Storage("account store lock poisoned".to_string()))
    }

    /// Stored display name for an account, for assertions and embedding.
    pub fn display_name(&self, user_id: &str) -> Result<Option<String>, AccountError> {
        let inner = self.lock()?;
        let record = inner
            .users
            .get(user_id)
            .ok_or_else(|| AccountError::NotFound(user_id.to_string()))?;
        Ok(record.display_name.clone())
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn user_exists(&self, user_id: &str) -> Result<bool, AccountError> {
        Ok(self.lock()?.users.contains_key(user_id))
    }

    async fn register_user(
        &self,
        localpart: &str,
        display_name: Option<&str>,
    ) -> Result<String, AccountError> {
        let user_id = self.qualified_user_id(localpart);
        let mut inner = self.lock()?;
        if inner.users.contains_key(&user_id) {
            return Err(AccountError::Conflict(format!(
                "user {user_id} already registered"
            )));
        }
        inner.users.insert(
            user_id.clone(),
            UserRecord {
                display_name: display_name.map(str::to_string),
            },
        );
        Ok(user_id)
    }

    fn qualified_user_id(&self, localpart: &str) -> String {
        format!("@{localpart}:{}", self.server_name)
    }

    async fn set_display_name(
        &self,
        user_id: &str,
        display_name: &str,
    ) -> Result<(), AccountError> {
        let mut inner = self.lock()?;
        let record = inner
            .users
            .get_mut(user_id)
            .ok_or_else(|| AccountError::NotFound(user_id.to_string()))?;
        record.display_name = Some(display_name.to_string());
        Ok(())
    }

    async fn threepid_owner(
        &self,
        medium: &str,
        address: &str,
    ) -> Result<Option<String>, AccountError> {
        let key = (medium.to_string(), address.to_string());
        Ok(self
            .lock()?
            .threepids
            .get(&key)
            .map(|(owner, _)| owner.clone()))
    }

    async fn add_threepid(
        &self,
        user_id: &str,
        medium: &str,
        address: &str,
        added_at: i64,
        validated_at: i64,
    ) -> Result<(), AccountError> {
        let key = (medium.to_string(), address.to_string());
        let mut inner = self.lock()?;
        if let Some((owner, _)) = inner.threepids.get(&key) {
            if owner != user_id {
                return Err(AccountError::Conflict(format!(
                    "threepid {medium}:{address} already bound to another user"
                )));
            }
        }
        inner.threepids.insert(
            key,
            (
                user_id.to_string(),
                Threepid {
                    medium: medium.to_string(),
                    address: address.to_string(),
                    added_at,
                    validated_at,
                },
            ),
        );
        Ok(())
    }

    async fn user_threepids(&self, user_id: &str) -> Result<Vec<Threepid>, AccountError> {
        Ok(self
            .lock()?
            .threepids
            .values()
            .filter(|(owner, _)| owner == user_id)
            .map(|(_, threepid)| threepid.clone())
            .collect())
    }

    async fn delete_threepid(
        &self,
        user_id: &str,
        medium: &str,
        address: &str,
    ) -> Result<(), AccountError> {
        let key = (medium.to_string(), address.to_string());
        let mut inner = self.lock()?;
        let owned = inner
            .threepids
            .get(&key)
            .is_some_and(|(owner, _)| owner == user_id);
        if owned {
            inner.threepids.remove(&key);
        }
        Ok(())
    }
}
