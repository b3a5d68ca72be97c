//! CRUD and aggregation for [`ContentAnalysis`] records.
//!
//! Records are immutable once created, so this module only grows the map
//! and scans it. The scans are linear, which is fine at the tens of
//! records a demo account holds.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use safeview_core::models::{AnalysisStats, ContentAnalysis, NewContentAnalysis, RiskBreakdown};

use crate::error::{Result, StoreError};
use crate::store::MemStore;

impl MemStore {
    /// Fetch a single analysis record by id.
    pub async fn get_analysis(&self, id: Uuid) -> Option<ContentAnalysis> {
        self.analyses.read().await.get(&id).cloned()
    }

    /// List a user's analysis records, most recent first, up to `limit`.
    pub async fn analyses_for_user(&self, user_id: Uuid, limit: usize) -> Vec<ContentAnalysis> {
        let mut records: Vec<ContentAnalysis> = self
            .analyses
            .read()
            .await
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.analyzed_at.cmp(&a.analyzed_at));
        records.truncate(limit);
        records
    }

    /// Insert a new analysis record, assigning a fresh id and
    /// `analyzed_at`.
    ///
    /// The referenced device must exist and belong to the referenced
    /// user.
    pub async fn create_analysis(&self, new: NewContentAnalysis) -> Result<ContentAnalysis> {
        let device = self
            .get_device(new.device_id)
            .await
            .ok_or(StoreError::UnknownDevice(new.device_id))?;
        if device.user_id != new.user_id {
            return Err(StoreError::DeviceNotOwned {
                device: new.device_id,
                user: new.user_id,
            });
        }

        let analysis = ContentAnalysis {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            device_id: new.device_id,
            platform: new.platform,
            content_url: new.content_url,
            content_title: new.content_title,
            risk_level: new.risk_level,
            ai_confidence: new.ai_confidence,
            was_blocked: new.was_blocked,
            detection_reasons: new.detection_reasons,
            analyzed_at: Utc::now(),
        };
        self.analyses
            .write()
            .await
            .insert(analysis.id, analysis.clone());

        debug!(
            analysis = %analysis.id,
            risk = analysis.risk_level.as_str(),
            blocked = analysis.was_blocked,
            "Analysis recorded"
        );
        Ok(analysis)
    }

    /// Tally a user's analyses over the last `days` days.
    pub async fn analysis_stats(&self, user_id: Uuid, days: u32) -> AnalysisStats {
        let cutoff = Utc::now() - Duration::days(i64::from(days));

        let analyses = self.analyses.read().await;
        let mut breakdown = RiskBreakdown::default();
        let mut total_blocked = 0;

        for analysis in analyses
            .values()
            .filter(|a| a.user_id == user_id && a.analyzed_at >= cutoff)
        {
            breakdown.record(analysis.risk_level);
            if analysis.was_blocked {
                total_blocked += 1;
            }
        }

        AnalysisStats {
            total_analyzed: breakdown.total(),
            total_blocked,
            risk_breakdown: breakdown,
        }
    }

    /// Per-calendar-day risk counts for a user over the last `days` days.
    /// Days with no analyses are absent from the map.
    pub async fn daily_risk_breakdown(
        &self,
        user_id: Uuid,
        days: u32,
    ) -> BTreeMap<NaiveDate, RiskBreakdown> {
        let cutoff = Utc::now() - Duration::days(i64::from(days));

        let analyses = self.analyses.read().await;
        let mut daily: BTreeMap<NaiveDate, RiskBreakdown> = BTreeMap::new();

        for analysis in analyses
            .values()
            .filter(|a| a.user_id == user_id && a.analyzed_at >= cutoff)
        {
            daily
                .entry(analysis.analyzed_at.date_naive())
                .or_default()
                .record(analysis.risk_level);
        }

        daily
    }
}
