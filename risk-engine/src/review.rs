//! Review signal aggregation
//!
//! Pure counting over a seller's reviews and their precomputed fraud
//! flags. No weighting happens here; the composer weighs the signal.

use crate::types::{PatternCounts, ReviewRecord, SuspiciousPattern};
use serde::{Deserialize, Serialize};

/// Aggregated review signal for one seller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewSignal {
    /// Reviews on record
    pub total_reviews: u32,

    /// Reviews flagged fake by the detector
    pub fake_reviews: u32,

    /// 100 * fake / total, 0 when no reviews, rounded to 2 decimals
    pub fake_review_percentage: f64,

    /// Suspicious pattern counts
    pub suspicious_patterns: PatternCounts,
}

/// Review signal aggregator
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewSignalAggregator;

impl ReviewSignalAggregator {
    /// Create a new aggregator
    pub fn new() -> Self {
        Self
    }

    /// Aggregate all reviews for one seller
    pub fn aggregate(&self, reviews: &[ReviewRecord]) -> ReviewSignal {
        let total_reviews = reviews.len() as u32;
        let fake_reviews = reviews.iter().filter(|r| r.is_fake).count() as u32;

        let fake_review_percentage = if total_reviews > 0 {
            let pct = f64::from(fake_reviews) / f64::from(total_reviews) * 100.0;
            (pct * 100.0).round() / 100.0
        } else {
            0.0
        };

        let mut patterns = PatternCounts::default();
        for review in reviews {
            if review
                .suspicious_patterns
                .contains(&SuspiciousPattern::BurstReviews)
            {
                patterns.burst_reviews += 1;
            }
            if review
                .suspicious_patterns
                .contains(&SuspiciousPattern::CopyPaste)
            {
                patterns.copy_paste += 1;
            }
            if review
                .suspicious_patterns
                .contains(&SuspiciousPattern::BotActivity)
            {
                patterns.bot_activity += 1;
            }
            if review
                .suspicious_patterns
                .contains(&SuspiciousPattern::ShortReviews)
            {
                patterns.short_reviews += 1;
            }
        }

        ReviewSignal {
            total_reviews,
            fake_reviews,
            fake_review_percentage,
            suspicious_patterns: patterns,
        }
    }
}
