use chrono::Utc;
use std::collections::HashSet;

use crate::account::QualifiedUserId;
use crate::verifier::{ExternalThreepid, VerifiedProfile, VerifierError};

use super::RestAuthProvider;
use super::errors::AuthError;

/// Current timestamp in milliseconds since the Unix epoch
fn time_msec() -> i64 {
    Utc::now().timestamp_millis()
}

impl RestAuthProvider {
    /// Apply the verifier's identity and profile data to the local account
    /// store: registration on first login, display-name sync, threepid sync.
    ///
    /// Returns `Ok(None)` when the lowercase-username policy rejects a new
    /// registration; that is a normal outcome, not an error.
    pub(super) async fn reconcile_authenticated(
        &self,
        mxid: &str,
        profile: Option<&VerifiedProfile>,
    ) -> Result<Option<String>, AuthError> {
        // A broken identifier means the verifier is misbehaving, same family
        // as a malformed response body.
        let user_id = QualifiedUserId::parse(mxid).map_err(|_| {
            AuthError::from(VerifierError::Protocol(format!(
                "verifier returned invalid mxid: {mxid}"
            )))
        })?;
        let localpart = user_id.localpart();

        if !self.store.user_exists(mxid).await? {
            tracing::info!("User {} does not exist yet, creating", mxid);

            if self.policy.enforce_lowercase_username
                && localpart.chars().any(char::is_uppercase)
            {
                tracing::info!(
                    "User {} cannot be created due to username lowercase policy",
                    localpart
                );
                return Ok(None);
            }

            let display_name = if self.policy.set_name_on_register {
                profile.and_then(|profile| profile.display_name.as_deref())
            } else {
                None
            };
            let registered = self.store.register_user(localpart, display_name).await?;
            tracing::info!("Registration based on verifier data was successful for {}", registered);
        } else {
            tracing::info!("User {} already exists, registration skipped", mxid);
        }

        // Every mutation below and the returned id use the store's canonical
        // form, not the raw verifier mxid.
        let canonical = self.store.qualified_user_id(localpart);

        if let Some(profile) = profile {
            tracing::debug!("Handling profile data");

            match profile.display_name.as_deref() {
                Some(display_name) if self.policy.set_name_on_login => {
                    tracing::info!(
                        "Setting display name to '{}' based on profile data",
                        display_name
                    );
                    self.store.set_display_name(&canonical, display_name).await?;
                }
                _ => {
                    tracing::debug!(
                        "Display name was not set because it was not given or policy restricted it"
                    );
                }
            }

            if self.policy.update_threepids {
                if let Some(external) = profile.three_pids.as_deref() {
                    self.sync_threepids(&canonical, external).await?;
                }
            } else {
                tracing::debug!("Threepids were not updated due to policy");
            }
        } else {
            tracing::debug!("No profile data");
        }

        Ok(Some(canonical))
    }

    /// Add missing threepids from the external list; in replace mode, also
    /// delete stored threepids the external list no longer carries.
    async fn sync_threepids(
        &self,
        user_id: &str,
        external: &[ExternalThreepid],
    ) -> Result<(), AuthError> {
        let mut external_set: HashSet<(String, String)> = HashSet::new();

        for threepid in external {
            let medium = threepid.medium.to_lowercase();
            let address = threepid.address.to_lowercase();
            tracing::debug!("Looking for threepid {}:{} in user profile", medium, address);

            if self.store.threepid_owner(&medium, &address).await?.is_none() {
                tracing::debug!("Threepid is not present, adding");
                let now = time_msec();
                self.store
                    .add_threepid(user_id, &medium, &address, now, now)
                    .await?;
            } else {
                tracing::debug!("Threepid is present, skipping");
            }

            external_set.insert((medium, address));
        }

        if self.policy.replace_threepids {
            for stored in self.store.user_threepids(user_id).await? {
                let key = (stored.medium.to_lowercase(), stored.address.to_lowercase());
                if !external_set.contains(&key) {
                    tracing::debug!(
                        "Threepid {}:{} is not present in external data, deleting",
                        key.0,
                        key.1
                    );
                    self.store.delete_threepid(user_id, &key.0, &key.1).await?;
                }
            }
        }

        Ok(())
    }
}
