//! CRUD operations for [`User`] records.

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use safeview_core::models::{NewUser, User, UserPatch};

use crate::error::{Result, StoreError};
use crate::store::MemStore;

impl MemStore {
    /// Fetch a single user by id.
    pub async fn get_user(&self, id: Uuid) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }

    /// Fetch a user by email (exact match, linear scan).
    pub async fn get_user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned()
    }

    /// Insert a new user, assigning a fresh id and `created_at`.
    ///
    /// Email uniqueness is checked under the write lock so two concurrent
    /// signups with the same address cannot both succeed.
    pub async fn create_user(&self, new: NewUser) -> Result<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == new.email) {
            return Err(StoreError::EmailExists(new.email));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: new.email,
            name: new.name,
            subscription_tier: new.subscription_tier,
            subscription_status: new.subscription_status,
            trial_ends_at: new.trial_ends_at,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());

        debug!(user = %user.id, email = %user.email, "User created");
        Ok(user)
    }

    /// Partially update a user. Returns the updated record, or `None` if
    /// the id is unknown.
    pub async fn update_user(&self, id: Uuid, patch: UserPatch) -> Option<User> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id)?;

        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(tier) = patch.subscription_tier {
            user.subscription_tier = tier;
        }
        if let Some(status) = patch.subscription_status {
            user.subscription_status = status;
        }
        if let Some(trial_ends_at) = patch.trial_ends_at {
            user.trial_ends_at = trial_ends_at;
        }

        Some(user.clone())
    }
}
