//! Heuristic content classification.
//!
//! This is a demo-grade stand-in for a real detection model: risk comes
//! from substring triggers plus randomness, confidence is drawn from a
//! per-level range, and reasons are sampled from a fixed vocabulary. The
//! [`ContentClassifier`] trait isolates the policy so a real classifier
//! can be dropped in without touching callers.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::RiskLevel;

/// URL substrings that deterministically force a high risk verdict.
const HIGH_TRIGGERS: [&str; 3] = ["deepfake", "synthetic", "inappropriate"];

/// URL substrings that force at least a medium risk verdict.
const MEDIUM_TRIGGERS: [&str; 2] = ["unverified", "viral"];

const HIGH_REASONS: [&str; 5] = [
    "synthetic_face_detected",
    "deepfake_audio_pattern",
    "inappropriate_content_pattern",
    "ai_generated_imagery",
    "voice_synthesis_detected",
];

const MEDIUM_REASONS: [&str; 4] = [
    "behavioral_pattern_anomaly",
    "moderate_risk_indicators",
    "unverified_source",
    "suspicious_metadata",
];

/// A request to classify one piece of content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub content_url: String,
    pub platform: String,
    pub device_id: Uuid,
    pub user_id: Uuid,
}

/// Outcome of one classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub risk_level: RiskLevel,
    /// 0..=100.
    pub ai_confidence: u8,
    pub detection_reasons: Vec<String>,
    pub was_blocked: bool,
    /// Synthesized analysis latency.
    pub processing_time_ms: u64,
}

/// What the detection engine claims to handle, for the capabilities
/// endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub supported_platforms: Vec<&'static str>,
    pub detection_reasons: Vec<&'static str>,
    pub accuracy_rate: f64,
    pub avg_processing_time_ms: u64,
}

/// Classification policy seam. Object-safe so handlers can hold a
/// `dyn ContentClassifier` and swap the heuristic stub for a real model.
pub trait ContentClassifier {
    fn analyze(&self, request: &AnalysisRequest) -> DetectionResult;

    fn capabilities(&self) -> Capabilities;
}

/// The demo classifier: substring triggers plus randomness.
pub struct HeuristicClassifier {
    rng: Mutex<StdRng>,
}

impl HeuristicClassifier {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Fixed-seed constructor for deterministic tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn determine_risk(url: &str, rng: &mut StdRng) -> RiskLevel {
        let url = url.to_lowercase();

        if HIGH_TRIGGERS.iter().any(|t| url.contains(t)) {
            return RiskLevel::High;
        }

        if MEDIUM_TRIGGERS.iter().any(|t| url.contains(t)) || rng.gen_bool(0.3) {
            return RiskLevel::Medium;
        }

        if rng.gen_bool(0.2) {
            RiskLevel::Medium
        } else {
            RiskLevel::Safe
        }
    }

    /// Higher confidence for the extreme verdicts.
    fn confidence(level: RiskLevel, rng: &mut StdRng) -> u8 {
        match level {
            RiskLevel::High => rng.gen_range(90..=99),
            RiskLevel::Medium => rng.gen_range(70..=89),
            RiskLevel::Safe => rng.gen_range(85..=99),
        }
    }

    fn reasons(level: RiskLevel, rng: &mut StdRng) -> Vec<String> {
        let vocabulary: &[&str] = match level {
            RiskLevel::High => &HIGH_REASONS,
            RiskLevel::Medium => &MEDIUM_REASONS,
            RiskLevel::Safe => return Vec::new(),
        };

        let count = rng.gen_range(1..=3usize).min(vocabulary.len());
        vocabulary
            .choose_multiple(rng, count)
            .map(|r| r.to_string())
            .collect()
    }

    fn blocked(level: RiskLevel, rng: &mut StdRng) -> bool {
        match level {
            RiskLevel::High => true,
            RiskLevel::Medium => rng.gen_bool(0.7),
            RiskLevel::Safe => false,
        }
    }
}

impl Default for HeuristicClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentClassifier for HeuristicClassifier {
    fn analyze(&self, request: &AnalysisRequest) -> DetectionResult {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let risk_level = Self::determine_risk(&request.content_url, &mut rng);
        let ai_confidence = Self::confidence(risk_level, &mut rng);
        let detection_reasons = Self::reasons(risk_level, &mut rng);
        let was_blocked = Self::blocked(risk_level, &mut rng);
        let processing_time_ms = rng.gen_range(500..=2500);

        DetectionResult {
            risk_level,
            ai_confidence,
            detection_reasons,
            was_blocked,
            processing_time_ms,
        }
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            supported_platforms: vec!["YouTube", "TikTok", "Instagram"],
            detection_reasons: HIGH_REASONS
                .iter()
                .chain(MEDIUM_REASONS.iter())
                .copied()
                .collect(),
            accuracy_rate: 0.94,
            avg_processing_time_ms: 2300,
        }
    }
}
