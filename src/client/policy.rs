//! Policy value types
//!
//! A [`Policy`] ties a digits-only policy number to a line of business and a
//! renewal date. Policy numbers are expected (but not proven) unique across
//! the book; the renew command refuses to guess when that expectation fails.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::date::RenewalDate;
use crate::error::InvariantViolation;

/// Line of business for a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyKind {
    Life,
    Health,
    Property,
    Vehicle,
    Travel,
}

impl PolicyKind {
    /// Parse a kind name, case-insensitively
    pub fn parse(input: &str) -> Result<Self, InvariantViolation> {
        match input.to_lowercase().as_str() {
            "life" => Ok(PolicyKind::Life),
            "health" => Ok(PolicyKind::Health),
            "property" => Ok(PolicyKind::Property),
            "vehicle" => Ok(PolicyKind::Vehicle),
            "travel" => Ok(PolicyKind::Travel),
            _ => Err(InvariantViolation::UnknownPolicyKind(input.to_string())),
        }
    }

    /// Display name, also the value searched by kind predicates
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::Life => "Life",
            PolicyKind::Health => "Health",
            PolicyKind::Property => "Property",
            PolicyKind::Vehicle => "Vehicle",
            PolicyKind::Travel => "Travel",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Digits-only policy identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyNumber(String);

impl PolicyNumber {
    pub fn new(input: &str) -> Result<Self, InvariantViolation> {
        if input.is_empty() {
            return Err(InvariantViolation::EmptyField {
                field: "policy number",
            });
        }
        if !input.chars().all(|c| c.is_ascii_digit()) {
            return Err(InvariantViolation::NonNumericPolicyNumber(
                input.to_string(),
            ));
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PolicyNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An insurance policy held by a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    number: PolicyNumber,
    renewal_date: RenewalDate,
    kind: PolicyKind,
}

impl Policy {
    pub fn new(number: PolicyNumber, renewal_date: RenewalDate, kind: PolicyKind) -> Self {
        Self {
            number,
            renewal_date,
            kind,
        }
    }

    /// Policy with the renewal date defaulted to one calendar year from today
    pub fn with_default_renewal(number: PolicyNumber, kind: PolicyKind, today: NaiveDate) -> Self {
        Self {
            number,
            renewal_date: RenewalDate::one_year_after(today),
            kind,
        }
    }

    pub fn number(&self) -> &PolicyNumber {
        &self.number
    }

    pub fn renewal_date(&self) -> RenewalDate {
        self.renewal_date
    }

    pub fn kind(&self) -> PolicyKind {
        self.kind
    }

    /// Same number and kind, new renewal date. Used by the renew command.
    pub fn renewed(&self, new_date: RenewalDate) -> Self {
        Self {
            number: self.number.clone(),
            renewal_date: new_date,
            kind: self.kind,
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, renews {})", self.number, self.kind, self.renewal_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_policy_number_digits_only() {
        assert!(PolicyNumber::new("0012345").is_ok());
        assert!(matches!(
            PolicyNumber::new(""),
            Err(InvariantViolation::EmptyField { .. })
        ));
        assert!(matches!(
            PolicyNumber::new("12-345"),
            Err(InvariantViolation::NonNumericPolicyNumber(_))
        ));
        assert!(PolicyNumber::new("12 345").is_err());
        assert!(PolicyNumber::new("POL123").is_err());
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(PolicyKind::parse("life").unwrap(), PolicyKind::Life);
        assert_eq!(PolicyKind::parse("TRAVEL").unwrap(), PolicyKind::Travel);
        assert_eq!(PolicyKind::parse("Property").unwrap(), PolicyKind::Property);
        assert!(matches!(
            PolicyKind::parse("marine"),
            Err(InvariantViolation::UnknownPolicyKind(_))
        ));
    }

    #[test]
    fn test_default_renewal_is_one_year_out() {
        let today = date(2025, 8, 5);
        let number = PolicyNumber::new("445566").unwrap();
        let policy = Policy::with_default_renewal(number, PolicyKind::Health, today);

        assert_eq!(policy.renewal_date().date(), date(2026, 8, 5));
    }

    #[test]
    fn test_renewed_keeps_number_and_kind() {
        let today = date(2025, 1, 1);
        let policy = Policy::new(
            PolicyNumber::new("778899").unwrap(),
            RenewalDate::new(date(2025, 6, 1), today).unwrap(),
            PolicyKind::Vehicle,
        );

        let renewed = policy.renewed(RenewalDate::new(date(2026, 6, 1), today).unwrap());

        assert_eq!(renewed.number(), policy.number());
        assert_eq!(renewed.kind(), PolicyKind::Vehicle);
        assert_eq!(renewed.renewal_date().date(), date(2026, 6, 1));
    }
}
