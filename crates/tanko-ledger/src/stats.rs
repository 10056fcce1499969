//! Lifetime and per-period activity accumulators.
//!
//! Pure additive bookkeeping: every record call adds to both the lifetime
//! totals and the totals for the period the call lands in. There are no
//! caps and no cross-validation against mint events; trust is placed in the
//! authorized caller. Absent entries read as zero — the explicit not-found
//! failure is reserved for snapshot lookups.
//!
//! For creators, "acquired" counts tokens minted directly to the creator as
//! their author's share, not a market acquisition.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tanko_types::{Address, PeriodKey};

use crate::{LedgerError, Result};

/// Published/acquired totals for a creator (lifetime or one period).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorTotals {
    /// Chapters published.
    pub published: u64,
    /// Author-share tokens minted to the creator.
    pub acquired: u64,
}

/// Running totals of publish/acquire activity, keyed by address and by
/// `(address, period)`.
#[derive(Debug, Default)]
pub struct ActivityAccumulator {
    creator_lifetime: HashMap<Address, CreatorTotals>,
    creator_period: HashMap<(Address, PeriodKey), CreatorTotals>,
    investor_lifetime: HashMap<Address, u64>,
    investor_period: HashMap<(Address, PeriodKey), u64>,
}

impl ActivityAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a publish record for a creator: `published` is added to the
    /// lifetime and period published totals, `acquired` to the lifetime and
    /// period acquired totals.
    ///
    /// All four cells are computed before any is written, so an overflow
    /// leaves the accumulator untouched.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Overflow`] if any total would overflow
    pub fn add_published(
        &mut self,
        creator: Address,
        period: PeriodKey,
        published: u64,
        acquired: u64,
    ) -> Result<()> {
        let lifetime = self.creator_lifetime(creator);
        let monthly = self.creator_period(creator, period);

        let new_lifetime = CreatorTotals {
            published: checked(lifetime.published, published)?,
            acquired: checked(lifetime.acquired, acquired)?,
        };
        let new_monthly = CreatorTotals {
            published: checked(monthly.published, published)?,
            acquired: checked(monthly.acquired, acquired)?,
        };

        self.creator_lifetime.insert(creator, new_lifetime);
        self.creator_period.insert((creator, period), new_monthly);

        tracing::trace!(
            creator = %creator,
            period = %period,
            published,
            acquired,
            total_published = new_lifetime.published,
            "publish accumulated"
        );
        Ok(())
    }

    /// Add an acquire record for an investor.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Overflow`] if a total would overflow
    pub fn add_acquired(
        &mut self,
        investor: Address,
        period: PeriodKey,
        acquired: u64,
    ) -> Result<()> {
        let new_lifetime = checked(self.investor_lifetime(investor), acquired)?;
        let new_monthly = checked(self.investor_period(investor, period), acquired)?;

        self.investor_lifetime.insert(investor, new_lifetime);
        self.investor_period.insert((investor, period), new_monthly);

        tracing::trace!(
            investor = %investor,
            period = %period,
            acquired,
            total_acquired = new_lifetime,
            "acquire accumulated"
        );
        Ok(())
    }

    /// Lifetime totals for a creator; zero if never recorded.
    pub fn creator_lifetime(&self, creator: Address) -> CreatorTotals {
        self.creator_lifetime.get(&creator).copied().unwrap_or_default()
    }

    /// One period's totals for a creator; zero if never recorded.
    pub fn creator_period(&self, creator: Address, period: PeriodKey) -> CreatorTotals {
        self.creator_period
            .get(&(creator, period))
            .copied()
            .unwrap_or_default()
    }

    /// Lifetime acquired total for an investor; zero if never recorded.
    pub fn investor_lifetime(&self, investor: Address) -> u64 {
        self.investor_lifetime.get(&investor).copied().unwrap_or(0)
    }

    /// One period's acquired total for an investor; zero if never recorded.
    pub fn investor_period(&self, investor: Address, period: PeriodKey) -> u64 {
        self.investor_period
            .get(&(investor, period))
            .copied()
            .unwrap_or(0)
    }
}

fn checked(current: u64, add: u64) -> Result<u64> {
    current.checked_add(add).ok_or(LedgerError::Overflow)
}
