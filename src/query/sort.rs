//! Sort comparators for the derived views

use std::cmp::Ordering;
use std::str::FromStr;

use crate::client::ClientRecord;
use crate::error::CommandError;

/// Total ordering over client records
///
/// No secondary key is defined; views are sorted with a stable sort, so ties
/// keep the store's insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Renewal date ascending
    #[default]
    Date,
    /// Full name, case-sensitive lexicographic
    Name,
}

impl SortKey {
    /// Parse one of the two recognized key names
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        match input {
            "date" => Ok(SortKey::Date),
            "name" => Ok(SortKey::Name),
            other => Err(CommandError::UnknownSortKey(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Name => "name",
        }
    }

    pub fn compare(&self, a: &ClientRecord, b: &ClientRecord) -> Ordering {
        match self {
            SortKey::Date => a
                .policy()
                .renewal_date()
                .cmp(&b.policy().renewal_date()),
            SortKey::Name => a.name().cmp(b.name()),
        }
    }
}

impl FromStr for SortKey {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        SortKey::parse(input)
    }
}
