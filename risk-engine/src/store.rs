//! Store seams for the engine's external collaborators
//!
//! The engine reads reviews and violations and reads/writes seller risk
//! records; it owns none of the persistence. These traits are the seams,
//! with `DashMap`-backed in-memory implementations for tests and local
//! runs. Real deployments back them with the marketplace's data stores;
//! outages surface as `Error::StorageUnavailable` and the engine never
//! retries on its own.

use crate::error::{Error, Result};
use crate::types::{
    ResolutionStatus, ReviewRecord, SellerId, SellerRiskRecord, ViolationRecord,
};
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

/// Read access to the review store
pub trait ReviewStore: Send + Sync {
    /// All reviews for one seller
    fn reviews_for_seller(&self, seller_id: &SellerId) -> Result<Vec<ReviewRecord>>;
}

/// Read/write access to the violation store
pub trait ViolationStore: Send + Sync {
    /// All violations for one seller
    fn violations_for_seller(&self, seller_id: &SellerId) -> Result<Vec<ViolationRecord>>;

    /// Persist a new violation
    fn insert(&self, violation: ViolationRecord) -> Result<()>;

    /// Update a violation's resolution status; returns the updated record
    fn update_resolution(
        &self,
        violation_id: Uuid,
        status: ResolutionStatus,
    ) -> Result<ViolationRecord>;

    /// Delete a violation; returns the removed record
    fn remove(&self, violation_id: Uuid) -> Result<ViolationRecord>;
}

/// Read/write access to seller risk records
pub trait SellerStore: Send + Sync {
    /// Load a seller's risk record, `None` when the key is unknown
    fn load(&self, seller_id: &SellerId) -> Result<Option<SellerRiskRecord>>;

    /// Persist a seller's risk record (full-record replacement)
    fn save(&self, record: SellerRiskRecord) -> Result<()>;
}

/// In-memory review store
#[derive(Debug, Default)]
pub struct MemoryReviewStore {
    reviews: DashMap<SellerId, Vec<ReviewRecord>>,
}

impl MemoryReviewStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a review
    pub fn add(&self, review: ReviewRecord) {
        self.reviews
            .entry(review.seller_id.clone())
            .or_default()
            .push(review);
    }
}

impl ReviewStore for MemoryReviewStore {
    fn reviews_for_seller(&self, seller_id: &SellerId) -> Result<Vec<ReviewRecord>> {
        Ok(self
            .reviews
            .get(seller_id)
            .map(|entry| entry.clone())
            .unwrap_or_default())
    }
}

/// In-memory violation store
#[derive(Debug, Default)]
pub struct MemoryViolationStore {
    violations: DashMap<Uuid, ViolationRecord>,
}

impl MemoryViolationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl ViolationStore for MemoryViolationStore {
    fn violations_for_seller(&self, seller_id: &SellerId) -> Result<Vec<ViolationRecord>> {
        let mut records: Vec<ViolationRecord> = self
            .violations
            .iter()
            .filter(|entry| &entry.value().seller_id == seller_id)
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by_key(|v| v.violation_date);
        Ok(records)
    }

    fn insert(&self, violation: ViolationRecord) -> Result<()> {
        self.violations.insert(violation.violation_id, violation);
        Ok(())
    }

    fn update_resolution(
        &self,
        violation_id: Uuid,
        status: ResolutionStatus,
    ) -> Result<ViolationRecord> {
        let mut entry = self
            .violations
            .get_mut(&violation_id)
            .ok_or_else(|| Error::ViolationNotFound(violation_id.to_string()))?;
        entry.resolution_status = status;
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    fn remove(&self, violation_id: Uuid) -> Result<ViolationRecord> {
        self.violations
            .remove(&violation_id)
            .map(|(_, record)| record)
            .ok_or_else(|| Error::ViolationNotFound(violation_id.to_string()))
    }
}

/// In-memory seller risk record store
#[derive(Debug, Default)]
pub struct MemorySellerStore {
    sellers: DashMap<SellerId, SellerRiskRecord>,
}

impl MemorySellerStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a seller with a zeroed risk record. No-op if the seller
    /// already exists.
    pub fn register(&self, seller_id: impl Into<SellerId>) {
        let seller_id = seller_id.into();
        self.sellers
            .entry(seller_id.clone())
            .or_insert_with(|| SellerRiskRecord::new(seller_id));
    }
}

impl SellerStore for MemorySellerStore {
    fn load(&self, seller_id: &SellerId) -> Result<Option<SellerRiskRecord>> {
        Ok(self.sellers.get(seller_id).map(|entry| entry.clone()))
    }

    fn save(&self, record: SellerRiskRecord) -> Result<()> {
        self.sellers.insert(record.seller_id.clone(), record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Severity, ViolationType};

    fn violation(seller_id: &str) -> ViolationRecord {
        let now = Utc::now();
        ViolationRecord {
            violation_id: Uuid::new_v4(),
            seller_id: seller_id.to_string(),
            order_id: "ORD001".to_string(),
            violation_type: ViolationType::LateDelivery,
            severity: Severity::Low,
            violation_date: now,
            resolution_status: ResolutionStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_violation_store_filters_by_seller() {
        let store = MemoryViolationStore::new();
        store.insert(violation("SELL001")).unwrap();
        store.insert(violation("SELL001")).unwrap();
        store.insert(violation("SELL002")).unwrap();

        let records = store.violations_for_seller(&"SELL001".to_string()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_update_resolution() {
        let store = MemoryViolationStore::new();
        let record = violation("SELL001");
        let id = record.violation_id;
        store.insert(record).unwrap();

        let updated = store
            .update_resolution(id, ResolutionStatus::Refunded)
            .unwrap();
        assert_eq!(updated.resolution_status, ResolutionStatus::Refunded);
    }

    #[test]
    fn test_unknown_violation_id() {
        let store = MemoryViolationStore::new();
        let result = store.update_resolution(Uuid::new_v4(), ResolutionStatus::Resolved);
        assert!(matches!(result, Err(Error::ViolationNotFound(_))));
    }

    #[test]
    fn test_register_is_idempotent() {
        let store = MemorySellerStore::new();
        store.register("SELL001");

        let mut record = store.load(&"SELL001".to_string()).unwrap().unwrap();
        record.assessment.total_reviews = 5;
        store.save(record).unwrap();

        // Second registration must not clobber the saved record
        store.register("SELL001");
        let record = store.load(&"SELL001".to_string()).unwrap().unwrap();
        assert_eq!(record.assessment.total_reviews, 5);
    }
}
