//! # safeview-core
//!
//! Shared domain types and pure logic for the SafeView backend.
//!
//! This crate has no I/O: it defines the record types exchanged between
//! the store and the HTTP layer, the subscription plan catalog, the
//! heuristic content classifier, and the signup wizard state machine.

pub mod detection;
pub mod models;
pub mod plans;
pub mod wizard;

pub use detection::{AnalysisRequest, ContentClassifier, DetectionResult, HeuristicClassifier};
pub use models::*;
