//! Delivery violation scoring
//!
//! Converts a seller's all-time violation records into one normalized
//! risk score (0-100) plus breakdowns by category and severity. Each
//! violation contributes `type_weight * severity_multiplier *
//! recency_multiplier * 10`; the sum is normalized by the total type
//! weight so the result reads as a weighted-average risk.

use crate::types::{
    RiskScore, SellerId, SeverityBreakdown, ViolationBreakdown, ViolationRecord,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Violations decay linearly over one year
const DECAY_DAYS: f64 = 365.0;

/// Old violations never drop below half weight
const RECENCY_FLOOR: f64 = 0.5;

/// Source of a seller's order volume, used for the violation rate.
///
/// Real order counts are not available to the engine yet, so the default
/// implementation estimates volume from the violation count. Swap in a
/// real source once order data is wired up.
pub trait OrderVolumeSource: Send + Sync {
    /// Total orders for a seller, given how many violations are on record
    fn total_orders(&self, seller_id: &SellerId, violation_count: u32) -> u64;
}

/// Default estimate: `max(10 * violations, 100)`
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicOrders;

impl OrderVolumeSource for HeuristicOrders {
    fn total_orders(&self, _seller_id: &SellerId, violation_count: u32) -> u64 {
        (u64::from(violation_count) * 10).max(100)
    }
}

/// Result of scoring one seller's violations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViolationRiskReport {
    /// Normalized violation risk (0-100)
    pub risk_score: RiskScore,

    /// Violations on record
    pub total_violations: u32,

    /// Violations per estimated order, percent (0-100)
    pub violation_rate: f64,

    /// Estimated order volume used for the rate
    pub total_orders: u64,

    /// Counts per violation category
    pub violation_breakdown: ViolationBreakdown,

    /// Counts per severity
    pub severity_breakdown: SeverityBreakdown,
}

impl ViolationRiskReport {
    fn zero() -> Self {
        Self {
            risk_score: RiskScore::default(),
            total_violations: 0,
            violation_rate: 0.0,
            total_orders: 0,
            violation_breakdown: ViolationBreakdown::default(),
            severity_breakdown: SeverityBreakdown::default(),
        }
    }
}

/// Violation scorer
pub struct ViolationScorer {
    order_volume: Arc<dyn OrderVolumeSource>,
}

impl ViolationScorer {
    /// Create a scorer with the default order-volume heuristic
    pub fn new() -> Self {
        Self {
            order_volume: Arc::new(HeuristicOrders),
        }
    }

    /// Create a scorer backed by a real order-volume source
    pub fn with_order_volume(order_volume: Arc<dyn OrderVolumeSource>) -> Self {
        Self { order_volume }
    }

    /// Score all violations for one seller.
    ///
    /// No violations is the identity case, not an error: returns a
    /// zero-risk report with empty breakdowns.
    pub fn score(
        &self,
        seller_id: &SellerId,
        violations: &[ViolationRecord],
        now: DateTime<Utc>,
    ) -> ViolationRiskReport {
        if violations.is_empty() {
            return ViolationRiskReport::zero();
        }

        let mut violation_breakdown = ViolationBreakdown::default();
        let mut severity_breakdown = SeverityBreakdown::default();
        let mut total_risk_score = 0.0_f64;
        let mut total_weight = 0u32;

        for violation in violations {
            violation_breakdown.increment(violation.violation_type);
            severity_breakdown.increment(violation.severity);

            let weight = violation.violation_type.type_weight();
            let severity_multiplier = violation.severity.multiplier();
            let recency_multiplier = Self::recency_multiplier(violation.violation_date, now);

            total_risk_score += f64::from(weight) * severity_multiplier * recency_multiplier * 10.0;
            total_weight += weight;
        }

        // Cannot be zero while the type-weight table covers every
        // category, but the normalization must not divide by zero.
        let normalized = if total_weight > 0 {
            (total_risk_score / f64::from(total_weight)).min(100.0)
        } else {
            0.0
        };

        let violation_count = violations.len() as u32;
        let total_orders = self.order_volume.total_orders(seller_id, violation_count);
        let violation_rate = if total_orders > 0 {
            (f64::from(violation_count) / total_orders as f64 * 100.0).min(100.0)
        } else {
            0.0
        };

        ViolationRiskReport {
            risk_score: RiskScore::from_f64(normalized),
            total_violations: violation_count,
            violation_rate,
            total_orders,
            violation_breakdown,
            severity_breakdown,
        }
    }

    /// Linear decay over one year, floored at 0.5 so old violations
    /// never fully vanish. Future-dated violations count as fresh.
    fn recency_multiplier(violation_date: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
        let days_since = (now - violation_date).num_seconds() as f64 / 86_400.0;
        let days_since = days_since.max(0.0);
        (1.0 - days_since / DECAY_DAYS).max(RECENCY_FLOOR)
    }
}

impl Default for ViolationScorer {
    fn default() -> Self {
        Self::new()
    }
}
