//! Subscription plan catalog.
//!
//! Prices, trial lengths, device/student caps and feature lists per tier.
//! The signup handler reads everything it needs about a tier from here so
//! plan details live in exactly one place.

use crate::models::SubscriptionTier;

/// Static description of one subscription tier.
#[derive(Debug, Clone, Copy)]
pub struct Plan {
    pub tier: SubscriptionTier,
    /// Monthly price in minor currency units (cents).
    pub price_per_month: u32,
    /// Free trial length granted at signup.
    pub trial_days: i64,
    /// `None` means unlimited.
    pub max_devices: Option<u32>,
    pub max_students: Option<u32>,
    pub features: &'static [&'static str],
}

const FAMILY: Plan = Plan {
    tier: SubscriptionTier::Family,
    price_per_month: 900,
    trial_days: 7,
    max_devices: Some(5),
    max_students: None,
    features: &[
        "real_time_detection",
        "parent_dashboard",
        "mobile_notifications",
        "24_7_support",
    ],
};

const SCHOOL_BASIC: Plan = Plan {
    tier: SubscriptionTier::SchoolBasic,
    price_per_month: 34_900,
    trial_days: 14,
    max_devices: Some(500),
    max_students: Some(500),
    features: &[
        "real_time_detection",
        "admin_dashboard",
        "teacher_controls",
        "detailed_reporting",
        "priority_support",
    ],
};

const SCHOOL_ENTERPRISE: Plan = Plan {
    tier: SubscriptionTier::SchoolEnterprise,
    price_per_month: 59_900,
    trial_days: 30,
    max_devices: None,
    max_students: None,
    features: &[
        "real_time_detection",
        "admin_dashboard",
        "custom_ai_training",
        "api_integration",
        "white_label",
        "sla_guarantee",
        "dedicated_support",
    ],
};

/// Look up the plan for a tier.
pub fn plan_for(tier: SubscriptionTier) -> &'static Plan {
    match tier {
        SubscriptionTier::Family => &FAMILY,
        SubscriptionTier::SchoolBasic => &SCHOOL_BASIC,
        SubscriptionTier::SchoolEnterprise => &SCHOOL_ENTERPRISE,
    }
}

/// All plans, cheapest first.
pub fn all_plans() -> [&'static Plan; 3] {
    [&FAMILY, &SCHOOL_BASIC, &SCHOOL_ENTERPRISE]
}
