//! YYYYMM period keys.
//!
//! A [`PeriodKey`] encodes `(year, month)` as `year * 100 + month` and is
//! the primary key for every per-month map in the ledger. Keys are derived
//! by the period clock, never stored independently.

use serde::{Deserialize, Serialize};

/// Integer YYYYMM encoding used to index per-month ledgers.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PeriodKey(u32);

impl PeriodKey {
    /// Build a key from an already-encoded YYYYMM integer.
    pub const fn new(raw: u32) -> Self {
        PeriodKey(raw)
    }

    /// Build a key from a year and a 1-based month.
    pub const fn from_year_month(year: u32, month: u32) -> Self {
        PeriodKey(year * 100 + month)
    }

    /// The raw YYYYMM integer.
    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// The year component.
    pub fn year(&self) -> u32 {
        self.0 / 100
    }

    /// The 1-based month component.
    pub fn month(&self) -> u32 {
        self.0 % 100
    }
}

impl std::fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
