//! The [`MemStore`] handle.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use safeview_core::models::{ContentAnalysis, Device, Subscription, User};

/// In-memory store: one map per record kind behind an async `RwLock`.
///
/// Cloning is cheap (the maps are shared), so one instance is built at
/// startup and handed to every handler through axum state. Dropping the
/// last clone discards all data, which doubles as the teardown story for
/// tests.
#[derive(Clone, Default)]
pub struct MemStore {
    pub(crate) users: Arc<RwLock<HashMap<Uuid, User>>>,
    pub(crate) devices: Arc<RwLock<HashMap<Uuid, Device>>>,
    pub(crate) analyses: Arc<RwLock<HashMap<Uuid, ContentAnalysis>>>,
    pub(crate) subscriptions: Arc<RwLock<HashMap<Uuid, Subscription>>>,
}

impl MemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}
