//! Clientbook - client and policy renewal tracking engine
//!
//! This library provides:
//! - Immutable, validated client records with policy and renewal data
//! - A composable predicate library for multi-field OR search
//! - Date-range filtering and renewal-window reporting with pluggable sort order
//! - An in-memory store maintaining two derived views (current + renewals)
//! - A snapshot interface for JSON persistence

pub mod client;
pub mod clock;
pub mod error;
pub mod query;
pub mod store;

// Re-export commonly used types
pub use client::{ClientRecord, Policy, PolicyKind, PolicyNumber, RecordDetail, RenewalDate};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CommandError, InvariantViolation};
pub use query::{
    CommandOutcome, CommandRunner, CompositePredicate, FieldPredicate, RecordFilter,
    SearchCriteria, SortKey,
};
pub use store::{ClientStore, StoreSnapshot};
