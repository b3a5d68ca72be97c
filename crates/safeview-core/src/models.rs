//! Domain model structs shared by the store and the HTTP layer.
//!
//! Every struct serializes as camelCase JSON so records can be handed
//! directly to the dashboard frontend without a mapping layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Classification outcome for a content item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "safe",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Subscription plan category determining price and feature set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    Family,
    SchoolBasic,
    SchoolEnterprise,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Trial,
    Canceled,
}

/// Kind of monitored device.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Tablet,
    Phone,
    Laptop,
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// An account holder (a parent or a school administrator).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    /// Unique across all users; enforced by the store on create.
    pub email: String,
    pub name: String,
    pub subscription_tier: SubscriptionTier,
    pub subscription_status: SubscriptionStatus,
    /// When the free trial ends, if the account is on one.
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a [`User`]; id and `created_at` are assigned by the
/// store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub subscription_tier: SubscriptionTier,
    pub subscription_status: SubscriptionStatus,
    pub trial_ends_at: Option<DateTime<Utc>>,
}

/// Partial update for a [`User`]. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub name: Option<String>,
    pub subscription_tier: Option<SubscriptionTier>,
    pub subscription_status: Option<SubscriptionStatus>,
    pub trial_ends_at: Option<Option<DateTime<Utc>>>,
}

// ---------------------------------------------------------------------------
// Device
// ---------------------------------------------------------------------------

/// A monitored device belonging to one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    pub is_online: bool,
    pub is_protected: bool,
    pub last_seen: DateTime<Utc>,
}

/// Input for creating a [`Device`]; id and `last_seen` are assigned by the
/// store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDevice {
    pub user_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    #[serde(default = "default_true")]
    pub is_online: bool,
    #[serde(default = "default_true")]
    pub is_protected: bool,
}

/// Partial update for a [`Device`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicePatch {
    pub name: Option<String>,
    pub is_online: Option<bool>,
    pub is_protected: Option<bool>,
    pub last_seen: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Content analysis
// ---------------------------------------------------------------------------

/// One classification event for a piece of content seen on a device.
/// Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Must reference a device owned by `user_id`; enforced on create.
    pub device_id: Uuid,
    /// Platform the content was seen on ("YouTube", "TikTok", ...).
    pub platform: String,
    pub content_url: Option<String>,
    pub content_title: Option<String>,
    pub risk_level: RiskLevel,
    /// Classifier confidence, 0..=100.
    pub ai_confidence: u8,
    pub was_blocked: bool,
    /// Ordered list of reason codes; empty for safe content.
    pub detection_reasons: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
}

/// Input for creating a [`ContentAnalysis`]; id and `analyzed_at` are
/// assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContentAnalysis {
    pub user_id: Uuid,
    pub device_id: Uuid,
    pub platform: String,
    pub content_url: Option<String>,
    pub content_title: Option<String>,
    pub risk_level: RiskLevel,
    pub ai_confidence: u8,
    pub was_blocked: bool,
    #[serde(default)]
    pub detection_reasons: Vec<String>,
}

/// Counts of analyses per risk level over some window.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskBreakdown {
    pub safe: usize,
    pub medium: usize,
    pub high: usize,
}

impl RiskBreakdown {
    /// Bump the counter for one level.
    pub fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Safe => self.safe += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.safe + self.medium + self.high
    }
}

/// Aggregated analysis counts for a user over a lookback window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStats {
    pub total_analyzed: usize,
    pub total_blocked: usize,
    pub risk_breakdown: RiskBreakdown,
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// A user's plan. In practice each user has one active subscription.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tier: SubscriptionTier,
    pub status: SubscriptionStatus,
    /// Monthly price in minor currency units (cents).
    pub price_per_month: u32,
    /// `None` means unlimited.
    pub max_devices: Option<u32>,
    pub max_students: Option<u32>,
    pub features: Vec<String>,
    pub start_date: DateTime<Utc>,
    /// Set when the subscription is canceled.
    pub end_date: Option<DateTime<Utc>>,
}

/// Input for creating a [`Subscription`]; id and `start_date` are assigned
/// by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubscription {
    pub user_id: Uuid,
    pub tier: SubscriptionTier,
    pub status: SubscriptionStatus,
    pub price_per_month: u32,
    pub max_devices: Option<u32>,
    pub max_students: Option<u32>,
    pub features: Vec<String>,
}

/// Partial update for a [`Subscription`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPatch {
    pub tier: Option<SubscriptionTier>,
    pub status: Option<SubscriptionStatus>,
    pub price_per_month: Option<u32>,
    pub end_date: Option<Option<DateTime<Utc>>>,
}
