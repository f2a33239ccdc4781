//! Running totals shared by every grouping.

use serde::Serialize;
use ynab_types::Milliunits;

/// Outflow, inflow and net of a group, in milliunits.
///
/// Serializes as display floats so callers never see raw milliunits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// Magnitude of negative amounts
    #[serde(serialize_with = "crate::units::serialize")]
    pub total_outflow: Milliunits,
    /// Sum of positive amounts
    #[serde(serialize_with = "crate::units::serialize")]
    pub total_inflow: Milliunits,
    /// Signed sum
    #[serde(serialize_with = "crate::units::serialize")]
    pub net: Milliunits,
    pub transaction_count: u32,
}

impl Totals {
    /// Record one signed amount.
    pub fn add(&mut self, amount: Milliunits) {
        if amount < 0 {
            self.total_outflow += -amount;
        } else {
            self.total_inflow += amount;
        }
        self.net += amount;
        self.transaction_count += 1;
    }

    /// Sum several totals.
    pub fn combine<'a>(parts: impl IntoIterator<Item = &'a Totals>) -> Totals {
        parts.into_iter().fold(Totals::default(), |mut acc, t| {
            acc.total_outflow += t.total_outflow;
            acc.total_inflow += t.total_inflow;
            acc.net += t.net;
            acc.transaction_count += t.transaction_count;
            acc
        })
    }
}
