//! Predicates, comparators, and the query command surface

mod command;
mod predicate;
mod sort;

pub use command::{CommandOutcome, CommandRunner, DEFAULT_RENEWAL_WINDOW_DAYS};
pub use predicate::{CompositePredicate, FieldPredicate, RecordFilter, SearchCriteria};
pub use sort::SortKey;
