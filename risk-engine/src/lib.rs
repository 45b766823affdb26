//! Seller Risk Engine
//!
//! Converts raw review-fraud signals and delivery-violation records into
//! a single bounded, auditable risk score per marketplace seller,
//! classifies it into a risk level, tracks its evolution in a bounded
//! history log, and derives a trend signal.
//!
//! # Invariants
//!
//! - Risk scores are always clamped to 0-100
//! - Risk level is a pure function of the risk score
//! - History never exceeds 30 entries (oldest evicted first)
//! - A seller with no reviews and no violations assesses to zero risk

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod composer;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod review;
pub mod store;
pub mod types;
pub mod violation;

pub use composer::RiskComposer;
pub use config::{ComposerConfig, HistoryConfig};
pub use engine::{NewViolation, RiskEngine};
pub use error::{Error, Result};
pub use history::RiskHistoryTracker;
pub use review::{ReviewSignal, ReviewSignalAggregator};
pub use store::{ReviewStore, SellerStore, ViolationStore};
pub use types::*;
pub use violation::{
    HeuristicOrders, OrderVolumeSource, ViolationRiskReport, ViolationScorer,
};
