//! Error taxonomy for the client/renewal engine
//!
//! Two classes of failure:
//! - [`InvariantViolation`]: a construction contract was broken (empty field,
//!   malformed value, past renewal date). Upstream validation should have
//!   rejected the input already, so these signal a caller bug.
//! - [`CommandError`]: a rejected command - bad user input caught at the
//!   boundary, or a lookup that found nothing (or too much). Recoverable;
//!   the store is left unchanged.

use thiserror::Error;

/// Construction-contract violations on value types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A required field was empty
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    /// A field value failed its format constraint
    #[error("{field} is malformed: {reason}")]
    MalformedField { field: &'static str, reason: String },

    /// Policy numbers are digits only
    #[error("policy number must contain only digits, got '{0}'")]
    NonNumericPolicyNumber(String),

    /// Renewal dates must be strictly in the future at construction time
    #[error("renewal date {date} is not after {today}")]
    PastRenewalDate { date: String, today: String },

    /// A field predicate was given no target values
    #[error("predicate requires at least one target value")]
    EmptyTargetList,

    /// An unrecognized policy kind string
    #[error("unknown policy kind '{0}'")]
    UnknownPolicyKind(String),
}

/// Rejected commands and failed lookups
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Input did not match the day-month-year numeric pattern
    #[error("invalid date '{0}', expected DD-MM-YYYY")]
    InvalidDateFormat(String),

    /// Input matched the pattern but names no real calendar date
    #[error("'{0}' is not a calendar date")]
    NonexistentDate(String),

    #[error("start date {start} is after end date {end}")]
    StartAfterEnd { start: String, end: String },

    /// Date-range filters are bounded to five years out
    #[error("end date {end} is more than five years ahead")]
    HorizonExceeded { end: String },

    #[error("renewal window must be between 1 and 365 days, got {0}")]
    WindowOutOfRange(u16),

    #[error("unknown sort key '{0}', expected 'date' or 'name'")]
    UnknownSortKey(String),

    #[error("at least one search field must be provided")]
    NoSearchCriteria,

    /// Pairwise identity collision on add or replace
    #[error("a client with matching identity already exists")]
    DuplicateClient,

    /// Remove/replace target is not in the store
    #[error("client not found in the store")]
    ClientNotFound,

    #[error("policy {0} not found")]
    PolicyNotFound(String),

    /// Deliberate refusal to guess between claimants of one policy number
    #[error("multiple clients hold policy {0}, use direct edit instead")]
    MultiplePoliciesFound(String),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}
