//! CRUD operations for [`Device`] records.

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use safeview_core::models::{Device, DevicePatch, NewDevice};

use crate::error::{Result, StoreError};
use crate::store::MemStore;

impl MemStore {
    /// Fetch a single device by id.
    pub async fn get_device(&self, id: Uuid) -> Option<Device> {
        self.devices.read().await.get(&id).cloned()
    }

    /// List all devices owned by a user.
    pub async fn devices_for_user(&self, user_id: Uuid) -> Vec<Device> {
        let mut devices: Vec<Device> = self
            .devices
            .read()
            .await
            .values()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect();
        devices.sort_by(|a, b| a.name.cmp(&b.name));
        devices
    }

    /// Insert a new device, assigning a fresh id and `last_seen`.
    ///
    /// The owner must already exist.
    pub async fn create_device(&self, new: NewDevice) -> Result<Device> {
        if self.get_user(new.user_id).await.is_none() {
            return Err(StoreError::UnknownUser(new.user_id));
        }

        let device = Device {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            name: new.name,
            kind: new.kind,
            is_online: new.is_online,
            is_protected: new.is_protected,
            last_seen: Utc::now(),
        };
        self.devices.write().await.insert(device.id, device.clone());

        debug!(device = %device.id, user = %device.user_id, "Device created");
        Ok(device)
    }

    /// Partially update a device (heartbeat, protection toggle, rename).
    /// Returns the updated record, or `None` if the id is unknown.
    pub async fn update_device(&self, id: Uuid, patch: DevicePatch) -> Option<Device> {
        let mut devices = self.devices.write().await;
        let device = devices.get_mut(&id)?;

        if let Some(name) = patch.name {
            device.name = name;
        }
        if let Some(is_online) = patch.is_online {
            device.is_online = is_online;
        }
        if let Some(is_protected) = patch.is_protected {
            device.is_protected = is_protected;
        }
        if let Some(last_seen) = patch.last_seen {
            device.last_seen = last_seen;
        }

        Some(device.clone())
    }

    /// Delete a device. Returns `true` if a record was removed.
    pub async fn delete_device(&self, id: Uuid) -> bool {
        self.devices.write().await.remove(&id).is_some()
    }
}
