//! Query command surface
//!
//! The four operations an operator drives the engine with, plus the explicit
//! list-all reset. Commands receive already-validated, strongly-typed
//! arguments; raw-text parsing lives with the caller. Every command validates
//! before touching the store, so a rejected command never partially applies.

use chrono::{Months, NaiveDate};
use log::{debug, info};

use crate::client::{ClientRecord, PolicyNumber, RenewalDate, DATE_FORMAT};
use crate::clock::Clock;
use crate::error::CommandError;
use crate::query::predicate::{RecordFilter, SearchCriteria};
use crate::query::sort::SortKey;
use crate::store::ClientStore;

/// Window applied when the operator gives no day count
pub const DEFAULT_RENEWAL_WINDOW_DAYS: u16 = 30;

/// Date-range filters may not reach further out than this many months
const HORIZON_MONTHS: u32 = 60;

/// Result of a successfully executed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Human-readable summary for the operator
    pub summary: String,
    /// Size of the view the command produced
    pub view_size: usize,
}

/// Executes query commands against a store
///
/// Holds the injected clock once so every command resolves "now" the same
/// way; the store is passed per call.
pub struct CommandRunner<'a> {
    clock: &'a dyn Clock,
}

impl<'a> CommandRunner<'a> {
    pub fn new(clock: &'a dyn Clock) -> Self {
        Self { clock }
    }

    /// Multi-field OR search over the current view
    ///
    /// Rejects empty criteria before anything is installed; an empty search
    /// must never silently match the whole book.
    pub fn search(
        &self,
        store: &mut ClientStore,
        criteria: SearchCriteria,
        sort: Option<SortKey>,
    ) -> Result<CommandOutcome, CommandError> {
        let predicate = criteria.into_predicate()?;
        store.set_current_filter(RecordFilter::Fields(predicate), sort);

        let found = store.current_view().len();
        info!("search matched {} of {} clients", found, store.len());
        Ok(CommandOutcome {
            summary: format!("{} clients found", found),
            view_size: found,
        })
    }

    /// Reset the current view to the unfiltered, insertion-ordered book
    pub fn list_all(&self, store: &mut ClientStore) -> CommandOutcome {
        store.reset_current_view();

        let total = store.current_view().len();
        CommandOutcome {
            summary: format!("listing all {} clients", total),
            view_size: total,
        }
    }

    /// Show policies renewing within `[start, end]` inclusive on the
    /// renewals view
    ///
    /// Checks run in order: start not after end, then end within the
    /// five-year horizon. The comparator installs on the renewals view and
    /// sticks for later repopulations.
    pub fn filter_by_date_range(
        &self,
        store: &mut ClientStore,
        start: NaiveDate,
        end: NaiveDate,
        sort: SortKey,
    ) -> Result<CommandOutcome, CommandError> {
        if start > end {
            return Err(CommandError::StartAfterEnd {
                start: start.format(DATE_FORMAT).to_string(),
                end: end.format(DATE_FORMAT).to_string(),
            });
        }
        let horizon = self.clock.today() + Months::new(HORIZON_MONTHS);
        if end > horizon {
            return Err(CommandError::HorizonExceeded {
                end: end.format(DATE_FORMAT).to_string(),
            });
        }

        store.set_renewals_sort(sort);
        store.set_renewals_filter(RecordFilter::RenewalBetween { start, end });

        let found = store.renewals_view().len();
        debug!(
            "date-range filter {}..{} matched {} clients",
            start.format(DATE_FORMAT),
            end.format(DATE_FORMAT),
            found
        );
        let summary = if found == 0 {
            format!(
                "no policies renew between {} and {}",
                start.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            )
        } else {
            format!(
                "{} policies renew between {} and {}",
                found,
                start.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            )
        };
        Ok(CommandOutcome {
            summary,
            view_size: found,
        })
    }

    /// Show policies due within the next `days` days on the renewals view
    ///
    /// Lapsed policies are excluded: only renewals with zero or more days
    /// remaining count. Defaults: 30 days, date order.
    pub fn upcoming_renewals(
        &self,
        store: &mut ClientStore,
        days: Option<u16>,
        sort: Option<SortKey>,
    ) -> Result<CommandOutcome, CommandError> {
        let days = days.unwrap_or(DEFAULT_RENEWAL_WINDOW_DAYS);
        if !(1..=365).contains(&days) {
            return Err(CommandError::WindowOutOfRange(days));
        }

        store.set_renewals_sort(sort.unwrap_or_default());
        store.set_renewals_filter(RecordFilter::RenewalWithin {
            days,
            today: self.clock.today(),
        });

        let found = store.renewals_view().len();
        debug!("{} renewals due within {} days", found, days);
        let summary = if found == 0 {
            format!("no renewals due within the next {} days", days)
        } else {
            format!("{} renewals due within the next {} days", found, days)
        };
        Ok(CommandOutcome {
            summary,
            view_size: found,
        })
    }

    /// Renew the policy with the given number to a new date
    ///
    /// Policy numbers are expected unique but the store cannot prove it, so
    /// anything other than exactly one match is refused: zero matches is a
    /// failed lookup, several matches means the operator must edit the right
    /// client directly rather than have the engine guess.
    pub fn renew(
        &self,
        store: &mut ClientStore,
        policy_number: &PolicyNumber,
        new_date: RenewalDate,
    ) -> Result<CommandOutcome, CommandError> {
        let mut matches = store
            .records()
            .iter()
            .filter(|r| r.policy().number() == policy_number);

        let outgoing: ClientRecord = match (matches.next(), matches.next()) {
            (None, _) => return Err(CommandError::PolicyNotFound(policy_number.to_string())),
            (Some(_), Some(_)) => {
                return Err(CommandError::MultiplePoliciesFound(
                    policy_number.to_string(),
                ))
            }
            (Some(record), None) => record.clone(),
        };

        let incoming = outgoing.with_policy(outgoing.policy().renewed(new_date));
        store.replace(&outgoing, incoming)?;

        info!("policy {} renewed to {}", policy_number, new_date);
        Ok(CommandOutcome {
            summary: format!("policy {} renewed, next due {}", policy_number, new_date),
            view_size: store.current_view().len(),
        })
    }
}
