//! Single-field matchers and the composite match-any-set predicate
//!
//! Two matching modes, chosen per field:
//! - exact-word-ignore-case for phone numbers and tags, where a substring hit
//!   would be spurious ("123" must not match inside "91234567");
//! - partial-substring-ignore-case for name/address/email/policy fields,
//!   where partial typing is useful.
//!
//! A composite predicate ORs across its configured fields: a search for
//! name="Alice" or phone="555" surfaces clients matching either.

use chrono::NaiveDate;

use crate::client::ClientRecord;
use crate::error::{CommandError, InvariantViolation};

/// True if any whitespace-separated word of `field` equals any target,
/// ignoring case
fn word_match(field: &str, targets: &[String]) -> bool {
    field
        .split_whitespace()
        .any(|word| targets.iter().any(|t| word.eq_ignore_ascii_case(t)))
}

/// True if the lower-cased field contains any lower-cased target
fn substring_match(field: &str, targets: &[String]) -> bool {
    let haystack = field.to_lowercase();
    targets.iter().any(|t| haystack.contains(&t.to_lowercase()))
}

/// A predicate over one searchable field, wrapping its target values
///
/// A field predicate matches when ANY of its targets matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPredicate {
    Name(Vec<String>),
    Phone(Vec<String>),
    Email(Vec<String>),
    Address(Vec<String>),
    PolicyNumber(Vec<String>),
    PolicyKind(Vec<String>),
    Tag(Vec<String>),
}

impl FieldPredicate {
    fn targets(&self) -> &[String] {
        match self {
            FieldPredicate::Name(t)
            | FieldPredicate::Phone(t)
            | FieldPredicate::Email(t)
            | FieldPredicate::Address(t)
            | FieldPredicate::PolicyNumber(t)
            | FieldPredicate::PolicyKind(t)
            | FieldPredicate::Tag(t) => t,
        }
    }

    pub fn matches(&self, record: &ClientRecord) -> bool {
        match self {
            FieldPredicate::Name(t) => substring_match(record.name(), t),
            FieldPredicate::Phone(t) => word_match(record.phone(), t),
            FieldPredicate::Email(t) => substring_match(record.email(), t),
            FieldPredicate::Address(t) => substring_match(record.address(), t),
            FieldPredicate::PolicyNumber(t) => {
                substring_match(record.policy().number().as_str(), t)
            }
            FieldPredicate::PolicyKind(t) => substring_match(record.policy().kind().as_str(), t),
            FieldPredicate::Tag(t) => record
                .tags()
                .iter()
                .any(|tag| t.iter().any(|target| tag.eq_ignore_ascii_case(target))),
        }
    }
}

/// Zero or more field predicates, matching when ANY of them matches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositePredicate {
    predicates: Vec<FieldPredicate>,
}

impl CompositePredicate {
    /// Build from field predicates; every target list must be non-empty
    pub fn new(predicates: Vec<FieldPredicate>) -> Result<Self, InvariantViolation> {
        if predicates.iter().any(|p| p.targets().is_empty()) {
            return Err(InvariantViolation::EmptyTargetList);
        }
        Ok(Self { predicates })
    }

    /// Whether any field predicate is configured
    ///
    /// False means the command layer must reject, never silently match all.
    pub fn has_any_criterion(&self) -> bool {
        !self.predicates.is_empty()
    }

    pub fn matches(&self, record: &ClientRecord) -> bool {
        self.predicates.iter().any(|p| p.matches(record))
    }
}

/// Per-field search terms as supplied by the boundary layer
///
/// `None` means the field was not part of the search at all; presence of a
/// field is what `has_any_criterion` is derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub name_terms: Option<Vec<String>>,
    pub phone_terms: Option<Vec<String>>,
    pub email_terms: Option<Vec<String>>,
    pub address_terms: Option<Vec<String>>,
    pub policy_terms: Option<Vec<String>>,
    pub kind_terms: Option<Vec<String>>,
    pub tag_terms: Option<Vec<String>>,
}

impl SearchCriteria {
    /// Whether at least one field was supplied
    pub fn has_any_criterion(&self) -> bool {
        self.name_terms.is_some()
            || self.phone_terms.is_some()
            || self.email_terms.is_some()
            || self.address_terms.is_some()
            || self.policy_terms.is_some()
            || self.kind_terms.is_some()
            || self.tag_terms.is_some()
    }

    /// Convert into a composite predicate, rejecting empty criteria
    pub fn into_predicate(self) -> Result<CompositePredicate, CommandError> {
        if !self.has_any_criterion() {
            return Err(CommandError::NoSearchCriteria);
        }

        let mut predicates = Vec::new();
        if let Some(t) = self.name_terms {
            predicates.push(FieldPredicate::Name(t));
        }
        if let Some(t) = self.phone_terms {
            predicates.push(FieldPredicate::Phone(t));
        }
        if let Some(t) = self.email_terms {
            predicates.push(FieldPredicate::Email(t));
        }
        if let Some(t) = self.address_terms {
            predicates.push(FieldPredicate::Address(t));
        }
        if let Some(t) = self.policy_terms {
            predicates.push(FieldPredicate::PolicyNumber(t));
        }
        if let Some(t) = self.kind_terms {
            predicates.push(FieldPredicate::PolicyKind(t));
        }
        if let Some(t) = self.tag_terms {
            predicates.push(FieldPredicate::Tag(t));
        }

        Ok(CompositePredicate::new(predicates)?)
    }
}

/// Store-facing filter driving a derived view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RecordFilter {
    /// Accept-all: the view shows the whole store
    #[default]
    All,

    /// Multi-field OR search
    Fields(CompositePredicate),

    /// Renewal date within `[start, end]` inclusive
    RenewalBetween { start: NaiveDate, end: NaiveDate },

    /// Renewal due within `days` of `today`; lapsed policies are excluded
    RenewalWithin { days: u16, today: NaiveDate },
}

impl RecordFilter {
    pub fn matches(&self, record: &ClientRecord) -> bool {
        match self {
            RecordFilter::All => true,
            RecordFilter::Fields(predicate) => predicate.matches(record),
            RecordFilter::RenewalBetween { start, end } => {
                let date = record.policy().renewal_date().date();
                *start <= date && date <= *end
            }
            RecordFilter::RenewalWithin { days, today } => {
                let due = record.policy().renewal_date().days_until(*today);
                0 <= due && due <= i64::from(*days)
            }
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        matches!(self, RecordFilter::All)
    }
}
