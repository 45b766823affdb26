//! Core types for the seller risk engine

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Seller identifier (external key owned by the marketplace)
pub type SellerId = String;

/// Risk score (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RiskScore(u8);

impl RiskScore {
    /// Create new risk score, clamped to 0-100
    pub fn new(score: u8) -> Self {
        Self(score.min(100))
    }

    /// Create from an unclamped float, rounding to the nearest integer
    pub fn from_f64(score: f64) -> Self {
        Self(score.round().clamp(0.0, 100.0) as u8)
    }

    /// Get raw score
    pub fn score(&self) -> u8 {
        self.0
    }

    /// Score as a float, for weighted composition
    pub fn as_f64(&self) -> f64 {
        f64::from(self.0)
    }
}

impl Default for RiskScore {
    fn default() -> Self {
        Self(0)
    }
}

/// Risk level derived from the risk score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Score below 40
    #[default]
    Low,
    /// Score 40-69
    Medium,
    /// Score 70-84
    High,
    /// Score 85 and above
    Critical,
}

impl From<RiskScore> for RiskLevel {
    fn from(score: RiskScore) -> Self {
        match score.score() {
            85..=100 => RiskLevel::Critical,
            70..=84 => RiskLevel::High,
            40..=69 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }
}

/// Delivery violation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationType {
    /// Counterfeit product delivered
    FakeProduct,
    /// Product arrived damaged
    DamagedProduct,
    /// Different product than ordered
    WrongProduct,
    /// Delivery past the promised date
    LateDelivery,
    /// Order arrived incomplete
    MissingItems,
}

impl ViolationType {
    /// Relative business severity of each violation category.
    /// Fake products carry the highest weight.
    pub fn type_weight(&self) -> u32 {
        match self {
            ViolationType::FakeProduct => 5,
            ViolationType::WrongProduct => 4,
            ViolationType::DamagedProduct => 3,
            ViolationType::MissingItems => 3,
            ViolationType::LateDelivery => 2,
        }
    }

    /// All categories, in risk-factor reporting order
    pub const ALL: [ViolationType; 5] = [
        ViolationType::FakeProduct,
        ViolationType::DamagedProduct,
        ViolationType::WrongProduct,
        ViolationType::LateDelivery,
        ViolationType::MissingItems,
    ];
}

impl TryFrom<&str> for ViolationType {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "fake_product" => Ok(ViolationType::FakeProduct),
            "damaged_product" => Ok(ViolationType::DamagedProduct),
            "wrong_product" => Ok(ViolationType::WrongProduct),
            "late_delivery" => Ok(ViolationType::LateDelivery),
            "missing_items" => Ok(ViolationType::MissingItems),
            other => Err(Error::InvalidInput(format!(
                "unrecognized violation type: {other}"
            ))),
        }
    }
}

/// Violation severity assigned at intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Minor impact
    Low,
    /// Standard impact
    Medium,
    /// Serious impact
    High,
    /// Severe impact
    Critical,
}

impl Severity {
    /// Multiplier applied to the violation type weight
    pub fn multiplier(&self) -> f64 {
        match self {
            Severity::Low => 0.5,
            Severity::Medium => 1.0,
            Severity::High => 1.5,
            Severity::Critical => 2.0,
        }
    }
}

impl TryFrom<&str> for Severity {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(Error::InvalidInput(format!(
                "unrecognized severity: {other}"
            ))),
        }
    }
}

/// Resolution state of a delivery violation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionStatus {
    /// Awaiting investigation
    #[default]
    Pending,
    /// Resolved without compensation
    Resolved,
    /// Customer refunded
    Refunded,
    /// Product replaced
    Replaced,
    /// Dismissed after investigation
    Ignored,
}

/// Fraud-indicator tag attached to a review by the external detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuspiciousPattern {
    /// Many reviews in a short window
    BurstReviews,
    /// Near-duplicate review text
    CopyPaste,
    /// Automated posting behavior
    BotActivity,
    /// Unusually short review text
    ShortReviews,
}

impl TryFrom<&str> for SuspiciousPattern {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "burst_reviews" => Ok(SuspiciousPattern::BurstReviews),
            "copy_paste" => Ok(SuspiciousPattern::CopyPaste),
            "bot_activity" => Ok(SuspiciousPattern::BotActivity),
            "short_reviews" => Ok(SuspiciousPattern::ShortReviews),
            other => Err(Error::InvalidInput(format!(
                "unrecognized suspicious pattern: {other}"
            ))),
        }
    }
}

/// A delivery violation record, owned by the violation store.
/// Immutable once created except for `resolution_status`/`updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViolationRecord {
    /// Violation id
    pub violation_id: Uuid,

    /// Owning seller
    pub seller_id: SellerId,

    /// Order the violation was reported against
    pub order_id: String,

    /// Violation category
    pub violation_type: ViolationType,

    /// Severity assigned at intake
    pub severity: Severity,

    /// When the violation occurred
    pub violation_date: DateTime<Utc>,

    /// Current resolution state
    pub resolution_status: ResolutionStatus,

    /// Record creation time
    pub created_at: DateTime<Utc>,

    /// Last mutation time
    pub updated_at: DateTime<Utc>,
}

/// A review record produced by the external ML detector. Read-only input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Review id
    pub review_id: Uuid,

    /// Reviewed seller
    pub seller_id: SellerId,

    /// Star rating, 1-5
    pub rating: u8,

    /// Fake-review verdict from the detector
    pub is_fake: bool,

    /// Fraud-indicator tags from the detector
    pub suspicious_patterns: Vec<SuspiciousPattern>,
}

/// Counts of suspicious patterns across a seller's reviews
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternCounts {
    /// Reviews tagged burst_reviews
    pub burst_reviews: u32,
    /// Reviews tagged copy_paste
    pub copy_paste: u32,
    /// Reviews tagged bot_activity
    pub bot_activity: u32,
    /// Reviews tagged short_reviews
    pub short_reviews: u32,
}

/// Violation counts by category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationBreakdown {
    /// fake_product count
    pub fake_product_received: u32,
    /// damaged_product count
    pub damaged_product_received: u32,
    /// wrong_product count
    pub wrong_product_received: u32,
    /// late_delivery count
    pub late_delivery: u32,
    /// missing_items count
    pub missing_items: u32,
}

impl ViolationBreakdown {
    /// Count for one category
    pub fn count(&self, violation_type: ViolationType) -> u32 {
        match violation_type {
            ViolationType::FakeProduct => self.fake_product_received,
            ViolationType::DamagedProduct => self.damaged_product_received,
            ViolationType::WrongProduct => self.wrong_product_received,
            ViolationType::LateDelivery => self.late_delivery,
            ViolationType::MissingItems => self.missing_items,
        }
    }

    pub(crate) fn increment(&mut self, violation_type: ViolationType) {
        match violation_type {
            ViolationType::FakeProduct => self.fake_product_received += 1,
            ViolationType::DamagedProduct => self.damaged_product_received += 1,
            ViolationType::WrongProduct => self.wrong_product_received += 1,
            ViolationType::LateDelivery => self.late_delivery += 1,
            ViolationType::MissingItems => self.missing_items += 1,
        }
    }
}

/// Violation counts by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityBreakdown {
    /// low count
    pub low: u32,
    /// medium count
    pub medium: u32,
    /// high count
    pub high: u32,
    /// critical count
    pub critical: u32,
}

impl SeverityBreakdown {
    pub(crate) fn increment(&mut self, severity: Severity) {
        match severity {
            Severity::Low => self.low += 1,
            Severity::Medium => self.medium += 1,
            Severity::High => self.high += 1,
            Severity::Critical => self.critical += 1,
        }
    }
}

/// Delivery violation statistics embedded in the seller assessment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryViolationStats {
    /// Estimated order volume (see `OrderVolumeSource`)
    pub total_orders: u64,

    /// fake_product count
    pub fake_product_received: u32,

    /// damaged_product count
    pub damaged_product_received: u32,

    /// wrong_product count
    pub wrong_product_received: u32,

    /// late_delivery count
    pub late_delivery: u32,

    /// missing_items count
    pub missing_items: u32,

    /// Total violations on record
    pub total_violations: u32,

    /// Violations per estimated order, percent (0-100)
    pub violation_rate: f64,
}

/// The current risk assessment for one seller.
///
/// `risk_level` is derived from `risk_score` and never set directly;
/// mutation happens only through a full re-assessment pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SellerRiskAssessment {
    /// Composite risk score (0-100)
    pub risk_score: RiskScore,

    /// Level derived from the score
    pub risk_level: RiskLevel,

    /// Reviews on record
    pub total_reviews: u32,

    /// Reviews flagged fake by the detector
    pub fake_reviews: u32,

    /// 100 * fake / total, 0 when no reviews (0-100)
    pub fake_review_percentage: f64,

    /// Delivery violation statistics
    pub delivery_violations: DeliveryViolationStats,

    /// Suspicious pattern counts
    pub suspicious_patterns: PatternCounts,

    /// Human-readable factors, regenerated each assessment
    pub risk_factors: Vec<String>,

    /// Last assessment time
    pub last_updated: Option<DateTime<Utc>>,
}

/// Snapshot of a past assessment, kept for trend analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskHistoryEntry {
    /// Score at snapshot time
    pub risk_score: RiskScore,

    /// Level at snapshot time
    pub risk_level: RiskLevel,

    /// Reviews on record at snapshot time
    pub total_reviews: u32,

    /// Fake reviews at snapshot time
    pub fake_reviews: u32,

    /// Fake percentage at snapshot time
    pub fake_review_percentage: f64,

    /// Pattern counts at snapshot time
    pub suspicious_patterns: PatternCounts,

    /// Factors at snapshot time
    pub risk_factors: Vec<String>,

    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,
}

/// The persisted risk entity for one seller: current assessment plus
/// a bounded append-only history (capped at 30 entries, FIFO eviction).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerRiskRecord {
    /// Seller key
    pub seller_id: SellerId,

    /// Current assessment
    pub assessment: SellerRiskAssessment,

    /// Past assessments, oldest first
    pub history: Vec<RiskHistoryEntry>,
}

impl SellerRiskRecord {
    /// Zeroed record for a newly registered seller
    pub fn new(seller_id: impl Into<SellerId>) -> Self {
        Self {
            seller_id: seller_id.into(),
            assessment: SellerRiskAssessment::default(),
            history: Vec::new(),
        }
    }
}

/// Direction of a seller's risk over the two most recent history entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTrend {
    /// Score rose by more than the hysteresis band
    Increasing,
    /// Score fell by more than the hysteresis band
    Decreasing,
    /// Within the band, or insufficient history
    Stable,
}
