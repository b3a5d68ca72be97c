//! CRUD operations for [`Subscription`] records.

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use safeview_core::models::{NewSubscription, Subscription, SubscriptionPatch};

use crate::error::{Result, StoreError};
use crate::store::MemStore;

impl MemStore {
    /// Fetch a single subscription by id.
    pub async fn get_subscription(&self, id: Uuid) -> Option<Subscription> {
        self.subscriptions.read().await.get(&id).cloned()
    }

    /// Fetch a user's subscription (first match; one per user in
    /// practice).
    pub async fn subscription_for_user(&self, user_id: Uuid) -> Option<Subscription> {
        self.subscriptions
            .read()
            .await
            .values()
            .find(|s| s.user_id == user_id)
            .cloned()
    }

    /// Insert a new subscription, assigning a fresh id and `start_date`.
    ///
    /// The owner must already exist.
    pub async fn create_subscription(&self, new: NewSubscription) -> Result<Subscription> {
        if self.get_user(new.user_id).await.is_none() {
            return Err(StoreError::UnknownUser(new.user_id));
        }

        let subscription = Subscription {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            tier: new.tier,
            status: new.status,
            price_per_month: new.price_per_month,
            max_devices: new.max_devices,
            max_students: new.max_students,
            features: new.features,
            start_date: Utc::now(),
            end_date: None,
        };
        self.subscriptions
            .write()
            .await
            .insert(subscription.id, subscription.clone());

        debug!(
            subscription = %subscription.id,
            user = %subscription.user_id,
            tier = ?subscription.tier,
            "Subscription created"
        );
        Ok(subscription)
    }

    /// Partially update a subscription (plan change, cancellation).
    /// Returns the updated record, or `None` if the id is unknown.
    pub async fn update_subscription(
        &self,
        id: Uuid,
        patch: SubscriptionPatch,
    ) -> Option<Subscription> {
        let mut subscriptions = self.subscriptions.write().await;
        let subscription = subscriptions.get_mut(&id)?;

        if let Some(tier) = patch.tier {
            subscription.tier = tier;
        }
        if let Some(status) = patch.status {
            subscription.status = status;
        }
        if let Some(price) = patch.price_per_month {
            subscription.price_per_month = price;
        }
        if let Some(end_date) = patch.end_date {
            subscription.end_date = end_date;
        }

        Some(subscription.clone())
    }
}
