use thiserror::Error;
use uuid::Uuid;

/// Errors produced by the store layer.
///
/// Plain absence is reported as `Option::None` by the accessors; these
/// variants cover writes that would break a documented invariant.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// A user with this email already exists.
    #[error("User already exists with this email")]
    EmailExists(String),

    /// A write referenced a user id that does not exist.
    #[error("Unknown user: {0}")]
    UnknownUser(Uuid),

    /// A write referenced a device id that does not exist.
    #[error("Unknown device: {0}")]
    UnknownDevice(Uuid),

    /// The device exists but belongs to a different user.
    #[error("Device {device} does not belong to user {user}")]
    DeviceNotOwned { device: Uuid, user: Uuid },
}

pub type Result<T> = std::result::Result<T, StoreError>;
