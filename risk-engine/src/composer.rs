//! Risk composition
//!
//! Blends the review signal and the violation signal into one composite
//! assessment: score, derived level, and ordered human-readable factors.
//! Composition does not persist anything and does not touch history;
//! that is the tracker's job, invoked by the engine after composition.

use crate::config::ComposerConfig;
use crate::review::ReviewSignal;
use crate::types::{
    DeliveryViolationStats, RiskLevel, RiskScore, SellerRiskAssessment, ViolationType,
};
use crate::violation::ViolationRiskReport;
use chrono::{DateTime, Utc};

/// Per-review pattern penalties, divided by the review count
const BURST_PENALTY: f64 = 10.0;
const COPY_PASTE_PENALTY: f64 = 15.0;
const BOT_PENALTY: f64 = 20.0;
const SHORT_PENALTY: f64 = 5.0;

/// Risk composer
pub struct RiskComposer {
    config: ComposerConfig,
}

impl RiskComposer {
    /// Create a composer with the standard 60/40 review/violation blend
    pub fn new() -> Self {
        Self {
            config: ComposerConfig::default(),
        }
    }

    /// Create a composer with custom weights
    pub fn with_config(config: ComposerConfig) -> Self {
        Self { config }
    }

    /// Compose a fresh assessment from the two signals
    pub fn compose(
        &self,
        review: &ReviewSignal,
        violations: &ViolationRiskReport,
        now: DateTime<Utc>,
    ) -> SellerRiskAssessment {
        let review_risk = Self::review_risk(review);

        let overall = review_risk * self.config.review_weight
            + violations.risk_score.as_f64() * self.config.violation_weight;
        let risk_score = RiskScore::from_f64(overall);
        let risk_level = RiskLevel::from(risk_score);

        let risk_factors = Self::risk_factors(risk_score, review, violations);

        SellerRiskAssessment {
            risk_score,
            risk_level,
            total_reviews: review.total_reviews,
            fake_reviews: review.fake_reviews,
            fake_review_percentage: review.fake_review_percentage,
            delivery_violations: DeliveryViolationStats {
                total_orders: violations.total_orders,
                fake_product_received: violations.violation_breakdown.fake_product_received,
                damaged_product_received: violations.violation_breakdown.damaged_product_received,
                wrong_product_received: violations.violation_breakdown.wrong_product_received,
                late_delivery: violations.violation_breakdown.late_delivery,
                missing_items: violations.violation_breakdown.missing_items,
                total_violations: violations.total_violations,
                violation_rate: violations.violation_rate,
            },
            suspicious_patterns: review.suspicious_patterns,
            risk_factors,
            last_updated: Some(now),
        }
    }

    /// Review-side risk: fake percentage weighted at 0.6 plus the
    /// per-review pattern penalty. Zero when the seller has no reviews.
    fn review_risk(review: &ReviewSignal) -> f64 {
        if review.total_reviews == 0 {
            return 0.0;
        }

        let patterns = &review.suspicious_patterns;
        let pattern_risk = (f64::from(patterns.burst_reviews) * BURST_PENALTY
            + f64::from(patterns.copy_paste) * COPY_PASTE_PENALTY
            + f64::from(patterns.bot_activity) * BOT_PENALTY
            + f64::from(patterns.short_reviews) * SHORT_PENALTY)
            / f64::from(review.total_reviews);

        review.fake_review_percentage * 0.6 + pattern_risk
    }

    /// Ordered factor list: review factors first, then violation factors
    /// in breakdown-table order, then the score-level factor last.
    fn risk_factors(
        score: RiskScore,
        review: &ReviewSignal,
        violations: &ViolationRiskReport,
    ) -> Vec<String> {
        let mut factors = Vec::new();

        if review.fake_review_percentage > 20.0 {
            factors.push("High fake review percentage".to_string());
        } else if review.fake_review_percentage > 10.0 {
            factors.push("Moderate fake review percentage".to_string());
        }

        if violations.total_violations > 0 {
            for violation_type in ViolationType::ALL {
                if violations.violation_breakdown.count(violation_type) > 0 {
                    factors.push(Self::violation_factor(violation_type).to_string());
                }
            }
        }

        if score.score() > 80 {
            factors.push("Critical risk level".to_string());
        } else if score.score() > 60 {
            factors.push("High risk level".to_string());
        } else if score.score() > 40 {
            factors.push("Medium risk level".to_string());
        }

        factors
    }

    fn violation_factor(violation_type: ViolationType) -> &'static str {
        match violation_type {
            ViolationType::FakeProduct => "Fake products delivered",
            ViolationType::DamagedProduct => "Damaged products delivered",
            ViolationType::WrongProduct => "Wrong products delivered",
            ViolationType::LateDelivery => "Late deliveries",
            ViolationType::MissingItems => "Missing items in orders",
        }
    }
}

impl Default for RiskComposer {
    fn default() -> Self {
        Self::new()
    }
}
