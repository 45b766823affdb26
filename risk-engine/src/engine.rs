//! Risk engine front-end
//!
//! Orchestrates a full re-assessment pass per seller: read reviews and
//! violations, score both signals, compose, push the prior assessment
//! into history, write the record back. Re-assessments for the same
//! seller are serialized through a per-seller lock so concurrent passes
//! cannot interleave history pushes; different sellers run fully in
//! parallel.

use crate::composer::RiskComposer;
use crate::error::{Error, Result};
use crate::history::RiskHistoryTracker;
use crate::review::ReviewSignalAggregator;
use crate::store::{ReviewStore, SellerStore, ViolationStore};
use crate::types::{
    ResolutionStatus, RiskTrend, SellerId, SellerRiskAssessment, Severity, ViolationRecord,
    ViolationType,
};
use crate::violation::ViolationScorer;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{info, warn};
use uuid::Uuid;

/// A violation report arriving from the ingestion boundary. Type and
/// severity are raw strings; validation fails closed with
/// `Error::InvalidInput` before anything is persisted.
#[derive(Debug, Clone)]
pub struct NewViolation {
    /// Owning seller
    pub seller_id: SellerId,

    /// Order the violation was reported against
    pub order_id: String,

    /// Raw violation type tag
    pub violation_type: String,

    /// Raw severity tag
    pub severity: String,

    /// When the violation occurred
    pub violation_date: DateTime<Utc>,
}

/// Seller risk engine
pub struct RiskEngine {
    sellers: Arc<dyn SellerStore>,
    reviews: Arc<dyn ReviewStore>,
    violations: Arc<dyn ViolationStore>,
    scorer: ViolationScorer,
    aggregator: ReviewSignalAggregator,
    composer: RiskComposer,
    tracker: RiskHistoryTracker,
    // Per-seller locks; same-seller re-assessments serialize here
    locks: DashMap<SellerId, Arc<Mutex<()>>>,
}

impl RiskEngine {
    /// Create an engine over the given stores with default scoring,
    /// composition, and history configuration
    pub fn new(
        sellers: Arc<dyn SellerStore>,
        reviews: Arc<dyn ReviewStore>,
        violations: Arc<dyn ViolationStore>,
    ) -> Self {
        Self {
            sellers,
            reviews,
            violations,
            scorer: ViolationScorer::new(),
            aggregator: ReviewSignalAggregator::new(),
            composer: RiskComposer::new(),
            tracker: RiskHistoryTracker::new(),
            locks: DashMap::new(),
        }
    }

    /// Replace the violation scorer (custom order-volume source)
    pub fn with_scorer(mut self, scorer: ViolationScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Replace the composer (custom weights)
    pub fn with_composer(mut self, composer: RiskComposer) -> Self {
        self.composer = composer;
        self
    }

    /// Replace the history tracker (custom capacity or trend band)
    pub fn with_tracker(mut self, tracker: RiskHistoryTracker) -> Self {
        self.tracker = tracker;
        self
    }

    /// Run a full re-assessment for one seller and return the new
    /// assessment. Fails with `SellerNotFound` for unknown keys.
    pub async fn assess_seller(&self, seller_id: &SellerId) -> Result<SellerRiskAssessment> {
        let lock = self.seller_lock(seller_id);
        let _guard = lock.lock().await;

        let mut record = self
            .sellers
            .load(seller_id)?
            .ok_or_else(|| Error::SellerNotFound(seller_id.clone()))?;

        let reviews = self.reviews.reviews_for_seller(seller_id)?;
        let violations = self.violations.violations_for_seller(seller_id)?;

        let now = Utc::now();
        let review_signal = self.aggregator.aggregate(&reviews);
        let violation_report = self.scorer.score(seller_id, &violations, now);
        let assessment = self
            .composer
            .compose(&review_signal, &violation_report, now);

        self.tracker
            .record_assessment(&mut record, assessment.clone(), now);
        self.sellers.save(record)?;

        info!(
            seller_id = %seller_id,
            score = assessment.risk_score.score(),
            level = ?assessment.risk_level,
            reviews = review_signal.total_reviews,
            violations = violation_report.total_violations,
            "seller risk assessed"
        );

        Ok(assessment)
    }

    /// Current risk trend for one seller, computed from history on demand
    pub async fn risk_trend(&self, seller_id: &SellerId) -> Result<RiskTrend> {
        let record = self
            .sellers
            .load(seller_id)?
            .ok_or_else(|| Error::SellerNotFound(seller_id.clone()))?;
        Ok(self.tracker.trend(&record))
    }

    /// Re-assess a batch of sellers, one task per seller. Sellers are
    /// independent, so the batch fans out fully in parallel; results
    /// come back in completion order.
    pub async fn assess_batch(
        self: &Arc<Self>,
        seller_ids: Vec<SellerId>,
    ) -> Vec<(SellerId, Result<SellerRiskAssessment>)> {
        let mut tasks = JoinSet::new();
        for seller_id in seller_ids {
            let engine = Arc::clone(self);
            tasks.spawn(async move {
                let result = engine.assess_seller(&seller_id).await;
                (seller_id, result)
            });
        }

        let mut results = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => results.push(outcome),
                Err(e) => {
                    warn!("batch assessment task failed: {e}");
                }
            }
        }
        results
    }

    /// Validate and persist a new violation, then re-assess the owning
    /// seller. Unknown type or severity strings fail closed before
    /// anything is written.
    pub async fn report_violation(&self, new: NewViolation) -> Result<ViolationRecord> {
        let violation_type = ViolationType::try_from(new.violation_type.as_str())
            .inspect_err(|_| {
                warn!(
                    seller_id = %new.seller_id,
                    raw = %new.violation_type,
                    "rejected violation with unrecognized type"
                );
            })?;
        let severity = Severity::try_from(new.severity.as_str()).inspect_err(|_| {
            warn!(
                seller_id = %new.seller_id,
                raw = %new.severity,
                "rejected violation with unrecognized severity"
            );
        })?;

        let now = Utc::now();
        let record = ViolationRecord {
            violation_id: Uuid::new_v4(),
            seller_id: new.seller_id.clone(),
            order_id: new.order_id,
            violation_type,
            severity,
            violation_date: new.violation_date,
            resolution_status: ResolutionStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        self.violations.insert(record.clone())?;
        self.assess_seller(&new.seller_id).await?;

        Ok(record)
    }

    /// Update a violation's resolution status, then re-assess the
    /// owning seller
    pub async fn resolve_violation(
        &self,
        violation_id: Uuid,
        status: ResolutionStatus,
    ) -> Result<ViolationRecord> {
        let record = self.violations.update_resolution(violation_id, status)?;
        self.assess_seller(&record.seller_id).await?;
        Ok(record)
    }

    /// Delete a violation, then re-assess the owning seller
    pub async fn remove_violation(&self, violation_id: Uuid) -> Result<ViolationRecord> {
        let record = self.violations.remove(violation_id)?;
        self.assess_seller(&record.seller_id).await?;
        Ok(record)
    }

    fn seller_lock(&self, seller_id: &SellerId) -> Arc<Mutex<()>> {
        self.locks
            .entry(seller_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
