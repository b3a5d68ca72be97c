//! # safeview-store
//!
//! In-memory store for the SafeView demo backend.
//!
//! The crate exposes a cloneable [`MemStore`] handle wrapping one map per
//! record kind, with typed CRUD helpers split into per-entity modules.
//! There is no persistence: state lives for the lifetime of the process,
//! which is the point of a demo store. Handlers receive an explicitly
//! constructed instance instead of reaching for a global.

pub mod analyses;
pub mod devices;
pub mod seed;
pub mod store;
pub mod subscriptions;
pub mod users;

mod error;

pub use error::StoreError;
pub use store::MemStore;
