//! Immutable client record value object
//!
//! Records are validated on construction and never mutated; "editing" a
//! client means building a replacement record and swapping it into the store
//! by identity match. Identity equality (`is_same_client`) is deliberately
//! looser than full equality and non-transitive, so deduplication must apply
//! it pairwise.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::policy::Policy;
use crate::error::InvariantViolation;

static NAME_REGEX: OnceLock<Regex> = OnceLock::new();
static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static TAG_REGEX: OnceLock<Regex> = OnceLock::new();

/// Alphanumeric words separated by single spaces
fn name_regex() -> &'static Regex {
    NAME_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9]+( [A-Za-z0-9]+)*$").expect("invalid name regex")
    })
}

/// Digits only, at least three of them
fn phone_regex() -> &'static Regex {
    PHONE_REGEX.get_or_init(|| Regex::new(r"^\d{3,}$").expect("invalid phone regex"))
}

/// local@domain with no whitespace on either side
fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9+_.\-]+@[A-Za-z0-9.\-]+$").expect("invalid email regex")
    })
}

/// A single alphanumeric word
fn tag_regex() -> &'static Regex {
    TAG_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9]+$").expect("invalid tag regex"))
}

fn validate_field(
    field: &'static str,
    value: &str,
    pattern: &Regex,
    reason: &str,
) -> Result<(), InvariantViolation> {
    if value.is_empty() {
        return Err(InvariantViolation::EmptyField { field });
    }
    if !pattern.is_match(value) {
        return Err(InvariantViolation::MalformedField {
            field,
            reason: reason.to_string(),
        });
    }
    Ok(())
}

/// A client in the book, with contact details and one policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    name: String,
    phone: String,
    email: String,
    address: String,
    policy: Policy,
    #[serde(default)]
    note: String,
    #[serde(default)]
    tags: BTreeSet<String>,
}

impl ClientRecord {
    /// Validated record with an empty note and no tags
    pub fn new(
        name: String,
        phone: String,
        email: String,
        address: String,
        policy: Policy,
    ) -> Result<Self, InvariantViolation> {
        Self::with_details(name, phone, email, address, policy, String::new(), BTreeSet::new())
    }

    /// Validated record with all fields supplied
    pub fn with_details(
        name: String,
        phone: String,
        email: String,
        address: String,
        policy: Policy,
        note: String,
        tags: BTreeSet<String>,
    ) -> Result<Self, InvariantViolation> {
        validate_field(
            "name",
            &name,
            name_regex(),
            "expected alphanumeric words separated by single spaces",
        )?;
        validate_field("phone", &phone, phone_regex(), "expected at least 3 digits")?;
        validate_field("email", &email, email_regex(), "expected local@domain")?;
        if address.is_empty() {
            return Err(InvariantViolation::EmptyField { field: "address" });
        }
        for tag in &tags {
            validate_field("tag", tag, tag_regex(), "expected a single alphanumeric word")?;
        }

        Ok(Self {
            name,
            phone,
            email,
            address,
            policy,
            note,
            tags,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Identity equality: the-same-client relation
    ///
    /// True if ANY of: equal policy number; equal name and email; equal name
    /// and phone. Symmetric but non-transitive, so callers must check
    /// pairwise rather than partitioning into equivalence classes.
    pub fn is_same_client(&self, other: &ClientRecord) -> bool {
        if self.policy.number() == other.policy.number() {
            return true;
        }
        self.name == other.name && (self.email == other.email || self.phone == other.phone)
    }

    /// Replacement record with the same identity fields and a new policy
    pub fn with_policy(&self, policy: Policy) -> Self {
        Self {
            policy,
            ..self.clone()
        }
    }

    /// Per-record projection for the presentation layer
    pub fn detail(&self) -> RecordDetail {
        RecordDetail {
            policy_number: self.policy.number().to_string(),
            renewal_date: self.policy.renewal_date().to_string(),
        }
    }
}

/// Detail projection of a single selected record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordDetail {
    pub policy_number: String,
    pub renewal_date: String,
}
