//! Property-based tests for risk engine invariants
//!
//! These tests use proptest to verify critical invariants:
//! - Boundedness: every score stays within 0-100
//! - Level purity: risk level is a deterministic, monotone function of score
//! - History bound: the log never exceeds 30 entries, oldest evicted first
//! - Trend locality: the trend depends only on the two most recent entries

use chrono::{Duration, Utc};
use proptest::prelude::*;
use risk_engine::{
    ResolutionStatus, ReviewRecord, ReviewSignalAggregator, RiskComposer, RiskHistoryTracker,
    RiskLevel, RiskScore, SellerRiskAssessment, SellerRiskRecord, Severity, SuspiciousPattern,
    ViolationRecord, ViolationScorer, ViolationType,
};
use uuid::Uuid;

/// Strategy for generating violation types
fn violation_type_strategy() -> impl Strategy<Value = ViolationType> {
    prop_oneof![
        Just(ViolationType::FakeProduct),
        Just(ViolationType::DamagedProduct),
        Just(ViolationType::WrongProduct),
        Just(ViolationType::LateDelivery),
        Just(ViolationType::MissingItems),
    ]
}

/// Strategy for generating severities
fn severity_strategy() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Low),
        Just(Severity::Medium),
        Just(Severity::High),
        Just(Severity::Critical),
    ]
}

/// Strategy for generating suspicious pattern tags
fn pattern_strategy() -> impl Strategy<Value = SuspiciousPattern> {
    prop_oneof![
        Just(SuspiciousPattern::BurstReviews),
        Just(SuspiciousPattern::CopyPaste),
        Just(SuspiciousPattern::BotActivity),
        Just(SuspiciousPattern::ShortReviews),
    ]
}

/// Strategy for generating violation records with ages up to ~3 years
fn violation_strategy() -> impl Strategy<Value = ViolationRecord> {
    (violation_type_strategy(), severity_strategy(), 0i64..1100).prop_map(
        |(violation_type, severity, age_days)| {
            let date = Utc::now() - Duration::days(age_days);
            ViolationRecord {
                violation_id: Uuid::new_v4(),
                seller_id: "SELL001".to_string(),
                order_id: "ORD001".to_string(),
                violation_type,
                severity,
                violation_date: date,
                resolution_status: ResolutionStatus::Pending,
                created_at: date,
                updated_at: date,
            }
        },
    )
}

/// Strategy for generating review records
fn review_strategy() -> impl Strategy<Value = ReviewRecord> {
    (
        1u8..=5,
        any::<bool>(),
        prop::collection::vec(pattern_strategy(), 0..4),
    )
        .prop_map(|(rating, is_fake, suspicious_patterns)| ReviewRecord {
            review_id: Uuid::new_v4(),
            seller_id: "SELL001".to_string(),
            rating,
            is_fake,
            suspicious_patterns,
        })
}

fn level_rank(level: RiskLevel) -> u8 {
    match level {
        RiskLevel::Low => 0,
        RiskLevel::Medium => 1,
        RiskLevel::High => 2,
        RiskLevel::Critical => 3,
    }
}

fn assessment_with_score(score: u8) -> SellerRiskAssessment {
    let risk_score = RiskScore::new(score);
    SellerRiskAssessment {
        risk_score,
        risk_level: RiskLevel::from(risk_score),
        ..Default::default()
    }
}

proptest! {
    /// Violation scoring never escapes 0-100, whatever the input mix
    #[test]
    fn violation_score_bounded(violations in prop::collection::vec(violation_strategy(), 0..60)) {
        let scorer = ViolationScorer::new();
        let report = scorer.score(&"SELL001".to_string(), &violations, Utc::now());

        prop_assert!(report.risk_score.score() <= 100);
        prop_assert!(report.violation_rate >= 0.0 && report.violation_rate <= 100.0);
        prop_assert_eq!(report.total_violations as usize, violations.len());
    }

    /// Category breakdown always sums to the violation count
    #[test]
    fn violation_breakdown_consistent(violations in prop::collection::vec(violation_strategy(), 0..60)) {
        let scorer = ViolationScorer::new();
        let report = scorer.score(&"SELL001".to_string(), &violations, Utc::now());

        let breakdown_total = ViolationType::ALL
            .iter()
            .map(|vt| report.violation_breakdown.count(*vt))
            .sum::<u32>();
        prop_assert_eq!(breakdown_total, report.total_violations);

        let severity_total = report.severity_breakdown.low
            + report.severity_breakdown.medium
            + report.severity_breakdown.high
            + report.severity_breakdown.critical;
        prop_assert_eq!(severity_total, report.total_violations);
    }

    /// Review aggregation: percentage bounded, fake count never exceeds total
    #[test]
    fn review_signal_bounded(reviews in prop::collection::vec(review_strategy(), 0..80)) {
        let signal = ReviewSignalAggregator::new().aggregate(&reviews);

        prop_assert!(signal.fake_reviews <= signal.total_reviews);
        prop_assert!(signal.fake_review_percentage >= 0.0);
        prop_assert!(signal.fake_review_percentage <= 100.0);
    }

    /// Composition stays bounded for arbitrary review/violation mixes
    #[test]
    fn composed_score_bounded(
        reviews in prop::collection::vec(review_strategy(), 0..80),
        violations in prop::collection::vec(violation_strategy(), 0..60),
    ) {
        let now = Utc::now();
        let signal = ReviewSignalAggregator::new().aggregate(&reviews);
        let report = ViolationScorer::new().score(&"SELL001".to_string(), &violations, now);
        let assessment = RiskComposer::new().compose(&signal, &report, now);

        prop_assert!(assessment.risk_score.score() <= 100);
        prop_assert_eq!(assessment.risk_level, RiskLevel::from(assessment.risk_score));
    }

    /// Risk level is total over all scores and monotone in the score
    #[test]
    fn risk_level_monotone(a in 0u8..=100, b in 0u8..=100) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let lo_level = RiskLevel::from(RiskScore::new(lo));
        let hi_level = RiskLevel::from(RiskScore::new(hi));
        prop_assert!(level_rank(lo_level) <= level_rank(hi_level));
    }

    /// History never exceeds the 30-entry cap; the retained entries are
    /// exactly the most recent ones, oldest first
    #[test]
    fn history_bounded(scores in prop::collection::vec(0u8..=100, 1..80)) {
        let tracker = RiskHistoryTracker::new();
        let mut record = SellerRiskRecord::new("SELL001");

        for &score in &scores {
            tracker.record_assessment(&mut record, assessment_with_score(score), Utc::now());
        }

        prop_assert_eq!(record.history.len(), scores.len().min(30));

        // The current assessment holds the last score; history holds the
        // states that preceded each assessment
        prop_assert_eq!(record.assessment.risk_score.score(), *scores.last().unwrap());
        if scores.len() >= 2 {
            let last_snapshot = record.history.last().unwrap();
            prop_assert_eq!(last_snapshot.risk_score.score(), scores[scores.len() - 2]);
        }
    }

    /// The trend depends only on the last two history entries
    #[test]
    fn trend_locality(
        prefix in prop::collection::vec(0u8..=100, 0..20),
        previous in 0u8..=100,
        recent in 0u8..=100,
    ) {
        let tracker = RiskHistoryTracker::new();

        let build = |prefix: &[u8]| {
            let mut record = SellerRiskRecord::new("SELL001");
            for &score in prefix {
                tracker.record_assessment(&mut record, assessment_with_score(score), Utc::now());
            }
            // Force the last two snapshots to (previous, recent)
            record.assessment = assessment_with_score(previous);
            tracker.record_assessment(&mut record, assessment_with_score(recent), Utc::now());
            record.assessment = assessment_with_score(recent);
            tracker.record_assessment(&mut record, assessment_with_score(recent), Utc::now());
            record
        };

        let with_prefix = build(&prefix);
        let without_prefix = build(&[]);
        prop_assert_eq!(tracker.trend(&with_prefix), tracker.trend(&without_prefix));

        // And the band behaves as specified
        let delta = i16::from(recent) - i16::from(previous);
        let expected = if delta > 10 {
            risk_engine::RiskTrend::Increasing
        } else if delta < -10 {
            risk_engine::RiskTrend::Decreasing
        } else {
            risk_engine::RiskTrend::Stable
        };
        prop_assert_eq!(tracker.trend(&with_prefix), expected);
    }

    /// Serde round-trip reproduces identical assessments
    #[test]
    fn assessment_round_trip(score in 0u8..=100, total in 0u32..1000, fake_ratio in 0.0f64..=1.0) {
        let fake = (f64::from(total) * fake_ratio) as u32;
        let pct = if total > 0 {
            (f64::from(fake) / f64::from(total) * 10_000.0).round() / 100.0
        } else {
            0.0
        };

        let mut assessment = assessment_with_score(score);
        assessment.total_reviews = total;
        assessment.fake_reviews = fake;
        assessment.fake_review_percentage = pct;

        let json = serde_json::to_string(&assessment).unwrap();
        let restored: SellerRiskAssessment = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(restored, assessment);
    }
}
