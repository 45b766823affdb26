//! Risk history tracking and trend derivation
//!
//! Every re-assessment pushes the pre-mutation assessment into a
//! bounded history log (30 entries, oldest evicted first), then replaces
//! the current assessment in one step. The trend is computed on demand
//! from the two most recent history entries with a ±10 hysteresis band
//! so small fluctuations do not flap the signal.

use crate::config::HistoryConfig;
use crate::types::{RiskHistoryEntry, RiskTrend, SellerRiskAssessment, SellerRiskRecord};
use chrono::{DateTime, Utc};

/// Risk history tracker
pub struct RiskHistoryTracker {
    config: HistoryConfig,
}

impl RiskHistoryTracker {
    /// Create a tracker with the standard 30-entry cap and ±10 band
    pub fn new() -> Self {
        Self {
            config: HistoryConfig::default(),
        }
    }

    /// Create a tracker with custom history configuration
    pub fn with_config(config: HistoryConfig) -> Self {
        Self { config }
    }

    /// Snapshot the record's current assessment into history, prune to
    /// capacity, then install the new assessment.
    pub fn record_assessment(
        &self,
        record: &mut SellerRiskRecord,
        mut new_assessment: SellerRiskAssessment,
        now: DateTime<Utc>,
    ) {
        record.history.push(Self::snapshot(&record.assessment, now));

        if record.history.len() > self.config.capacity {
            let excess = record.history.len() - self.config.capacity;
            record.history.drain(..excess);
        }

        new_assessment.last_updated = Some(now);
        record.assessment = new_assessment;
    }

    /// Derive the trend from the two most recent history entries.
    /// Fewer than two entries reads as stable.
    pub fn trend(&self, record: &SellerRiskRecord) -> RiskTrend {
        let len = record.history.len();
        if len < 2 {
            return RiskTrend::Stable;
        }

        let recent = i16::from(record.history[len - 1].risk_score.score());
        let previous = i16::from(record.history[len - 2].risk_score.score());
        let delta = recent - previous;

        if delta > self.config.trend_band {
            RiskTrend::Increasing
        } else if delta < -self.config.trend_band {
            RiskTrend::Decreasing
        } else {
            RiskTrend::Stable
        }
    }

    fn snapshot(assessment: &SellerRiskAssessment, now: DateTime<Utc>) -> RiskHistoryEntry {
        RiskHistoryEntry {
            risk_score: assessment.risk_score,
            risk_level: assessment.risk_level,
            total_reviews: assessment.total_reviews,
            fake_reviews: assessment.fake_reviews,
            fake_review_percentage: assessment.fake_review_percentage,
            suspicious_patterns: assessment.suspicious_patterns,
            risk_factors: assessment.risk_factors.clone(),
            timestamp: now,
        }
    }
}

impl Default for RiskHistoryTracker {
    fn default() -> Self {
        Self::new()
    }
}
