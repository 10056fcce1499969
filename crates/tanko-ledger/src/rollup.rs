//! Monthly snapshot rows and their append-only store.
//!
//! A rollup joins accumulator and holdings data into immutable per-period
//! rows. Rows are only ever appended; re-running a rollup for a period
//! appends duplicate rows rather than replacing them, and callers must
//! track which periods have already been rolled up. The single destructive
//! operation is [`SnapshotStore::clear_period`], which irreversibly drops a
//! period's rows.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tanko_types::{Address, PeriodKey};

use crate::{LedgerError, Result};

/// One creator's immutable monthly snapshot row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorSnapshot {
    /// The creator.
    pub address: Address,
    /// Period the row belongs to.
    pub period: PeriodKey,
    /// Chapters published during the period.
    pub monthly_published: u64,
    /// Author-share tokens minted during the period.
    pub monthly_acquired: u64,
    /// Lifetime published total at rollup time.
    pub total_published: u64,
    /// Lifetime acquired total at rollup time.
    pub total_acquired: u64,
    /// Live held total at rollup time; can be lower than a prior snapshot.
    pub current_held: u64,
    /// Unix timestamp of the rollup call that appended this row.
    pub recorded_at: u64,
}

/// One investor's immutable monthly snapshot row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorSnapshot {
    /// The investor.
    pub address: Address,
    /// Period the row belongs to.
    pub period: PeriodKey,
    /// Tokens acquired during the period.
    pub monthly_acquired: u64,
    /// Lifetime acquired total at rollup time.
    pub total_acquired: u64,
    /// Live held total at rollup time.
    pub current_held: u64,
    /// Unix timestamp of the rollup call that appended this row.
    pub recorded_at: u64,
}

/// Append-only per-period snapshot ledgers for both roles.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    creators: HashMap<PeriodKey, Vec<CreatorSnapshot>>,
    investors: HashMap<PeriodKey, Vec<InvestorSnapshot>>,
}

impl SnapshotStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a creator row to its period's ledger.
    pub fn append_creator(&mut self, row: CreatorSnapshot) {
        self.creators.entry(row.period).or_default().push(row);
    }

    /// Append an investor row to its period's ledger.
    pub fn append_investor(&mut self, row: InvestorSnapshot) {
        self.investors.entry(row.period).or_default().push(row);
    }

    /// All creator rows for a period, in append order. Empty if the period
    /// has never been rolled up.
    pub fn creator_rows(&self, period: PeriodKey) -> &[CreatorSnapshot] {
        self.creators.get(&period).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All investor rows for a period, in append order.
    pub fn investor_rows(&self, period: PeriodKey) -> &[InvestorSnapshot] {
        self.investors.get(&period).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The first creator row for `address` in `period`.
    ///
    /// An explicit not-found failure distinguishes "no data uploaded yet"
    /// from "zero counts".
    ///
    /// # Errors
    ///
    /// - [`LedgerError::SnapshotNotFound`] if the period holds no row for
    ///   the address
    pub fn creator_row(&self, period: PeriodKey, address: Address) -> Result<&CreatorSnapshot> {
        self.creator_rows(period)
            .iter()
            .find(|row| row.address == address)
            .ok_or(LedgerError::SnapshotNotFound { address, period })
    }

    /// Investor twin of [`creator_row`](Self::creator_row).
    ///
    /// # Errors
    ///
    /// - [`LedgerError::SnapshotNotFound`] if the period holds no row for
    ///   the address
    pub fn investor_row(&self, period: PeriodKey, address: Address) -> Result<&InvestorSnapshot> {
        self.investor_rows(period)
            .iter()
            .find(|row| row.address == address)
            .ok_or(LedgerError::SnapshotNotFound { address, period })
    }

    /// Creator rows for each requested period, in the order given. Periods
    /// that were never rolled up yield empty lists.
    pub fn creator_rows_for_periods(
        &self,
        periods: &[PeriodKey],
    ) -> Vec<(PeriodKey, Vec<CreatorSnapshot>)> {
        periods
            .iter()
            .map(|&p| (p, self.creator_rows(p).to_vec()))
            .collect()
    }

    /// Investor twin of [`creator_rows_for_periods`](Self::creator_rows_for_periods).
    pub fn investor_rows_for_periods(
        &self,
        periods: &[PeriodKey],
    ) -> Vec<(PeriodKey, Vec<InvestorSnapshot>)> {
        periods
            .iter()
            .map(|&p| (p, self.investor_rows(p).to_vec()))
            .collect()
    }

    /// Irreversibly drop every row (both roles) for a period. Returns the
    /// number of creator and investor rows dropped.
    pub fn clear_period(&mut self, period: PeriodKey) -> (usize, usize) {
        let creators = self.creators.remove(&period).map(|v| v.len()).unwrap_or(0);
        let investors = self.investors.remove(&period).map(|v| v.len()).unwrap_or(0);
        tracing::info!(period = %period, creators, investors, "period snapshots cleared");
        (creators, investors)
    }
}
