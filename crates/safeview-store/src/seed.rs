//! Demo data set loaded at startup.
//!
//! Recreates the fixture the dashboard expects: the Johnson Family
//! account with three devices, three analysis records (one per risk
//! level) and an active family subscription.

use chrono::{Duration, Utc};
use tracing::info;

use safeview_core::models::{
    DeviceKind, NewContentAnalysis, NewDevice, NewSubscription, NewUser, RiskLevel,
    SubscriptionStatus, SubscriptionTier, User,
};
use safeview_core::plans;

use crate::error::Result;
use crate::store::MemStore;

/// Email of the seeded demo account.
pub const DEMO_EMAIL: &str = "parent@example.com";

/// Populate an empty store with the demo account. Returns the seeded
/// user.
pub async fn seed_demo_data(store: &MemStore) -> Result<User> {
    let plan = plans::plan_for(SubscriptionTier::Family);

    let user = store
        .create_user(NewUser {
            email: DEMO_EMAIL.to_string(),
            name: "Johnson Family".to_string(),
            subscription_tier: SubscriptionTier::Family,
            subscription_status: SubscriptionStatus::Active,
            trial_ends_at: Some(Utc::now() + Duration::days(plan.trial_days)),
        })
        .await?;

    let tablet = store
        .create_device(NewDevice {
            user_id: user.id,
            name: "Emma's iPad".to_string(),
            kind: DeviceKind::Tablet,
            is_online: true,
            is_protected: true,
        })
        .await?;

    let phone = store
        .create_device(NewDevice {
            user_id: user.id,
            name: "Alex's Phone".to_string(),
            kind: DeviceKind::Phone,
            is_online: true,
            is_protected: true,
        })
        .await?;

    store
        .create_device(NewDevice {
            user_id: user.id,
            name: "Family Laptop".to_string(),
            kind: DeviceKind::Laptop,
            is_online: false,
            is_protected: true,
        })
        .await?;

    store
        .create_analysis(NewContentAnalysis {
            user_id: user.id,
            device_id: tablet.id,
            platform: "YouTube".to_string(),
            content_url: Some("https://youtube.com/watch?v=example1".to_string()),
            content_title: Some("Inappropriate AI-Generated Video".to_string()),
            risk_level: RiskLevel::High,
            ai_confidence: 97,
            was_blocked: true,
            detection_reasons: vec![
                "synthetic_face_detected".to_string(),
                "inappropriate_content_pattern".to_string(),
                "voice_deepfake".to_string(),
            ],
        })
        .await?;

    store
        .create_analysis(NewContentAnalysis {
            user_id: user.id,
            device_id: phone.id,
            platform: "TikTok".to_string(),
            content_url: Some("https://tiktok.com/@user/video/example2".to_string()),
            content_title: Some("Suspicious Content".to_string()),
            risk_level: RiskLevel::Medium,
            ai_confidence: 82,
            was_blocked: true,
            detection_reasons: vec![
                "behavioral_pattern_anomaly".to_string(),
                "moderate_risk_indicators".to_string(),
            ],
        })
        .await?;

    store
        .create_analysis(NewContentAnalysis {
            user_id: user.id,
            device_id: tablet.id,
            platform: "YouTube Kids".to_string(),
            content_url: Some("https://youtube.com/watch?v=example3".to_string()),
            content_title: Some("Educational Animal Video".to_string()),
            risk_level: RiskLevel::Safe,
            ai_confidence: 99,
            was_blocked: false,
            detection_reasons: Vec::new(),
        })
        .await?;

    store
        .create_subscription(NewSubscription {
            user_id: user.id,
            tier: plan.tier,
            status: SubscriptionStatus::Active,
            price_per_month: plan.price_per_month,
            max_devices: plan.max_devices,
            max_students: plan.max_students,
            features: plan.features.iter().map(|f| f.to_string()).collect(),
        })
        .await?;

    info!(user = %user.id, email = DEMO_EMAIL, "Seeded demo data");
    Ok(user)
}
