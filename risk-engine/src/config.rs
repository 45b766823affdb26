//! Configuration for the risk engine

use serde::{Deserialize, Serialize};

/// Composer weights: how review and violation signals blend into the
/// composite score. Must sum to 1.0 for the score to stay in 0-100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Weight of the review signal
    pub review_weight: f64,

    /// Weight of the delivery violation signal
    pub violation_weight: f64,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            review_weight: 0.6,
            violation_weight: 0.4,
        }
    }
}

/// History and trend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum retained history entries (oldest evicted first)
    pub capacity: usize,

    /// Hysteresis band for trend classification; score deltas within
    /// the band read as stable
    pub trend_band: i16,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: 30,
            trend_band: 10,
        }
    }
}
