//! The [`ActivityLedger`] facade.
//!
//! Single entry point tying the registries, holdings tracker, accumulator,
//! snapshot store, and balance source together, with two independently held
//! privileged identities:
//!
//! - the **operator** (platform identity) records publish/acquire activity
//!   and ownership/association data;
//! - the **owner** (administrative identity) manages the registries, runs
//!   rollups, clears periods, appoints the operator, and transfers
//!   ownership.
//!
//! Every operation validates before mutating, so a failing call leaves all
//! state untouched. The one deliberate exception to all-or-nothing
//! semantics is batch registration, which silently skips invalid entries
//! and always completes.
//!
//! All calls run to completion on a single thread; there is no interior
//! locking. Notifications are buffered in emission order and drained with
//! [`ActivityLedger::take_events`].

use tanko_oracle::BalanceSource;
use tanko_types::{Address, LedgerEvent, PeriodKey, TokenId};

use crate::clock;
use crate::holdings::HoldingsTracker;
use crate::registry::RoleRegistry;
use crate::rollup::{CreatorSnapshot, InvestorSnapshot, SnapshotStore};
use crate::stats::{ActivityAccumulator, CreatorTotals};
use crate::{LedgerError, Result};

/// The creator/investor activity ledger.
pub struct ActivityLedger<B> {
    owner: Address,
    operator: Address,
    creators: RoleRegistry,
    investors: RoleRegistry,
    stats: ActivityAccumulator,
    holdings: HoldingsTracker,
    snapshots: SnapshotStore,
    balances: B,
    events: Vec<LedgerEvent>,
}

impl<B: BalanceSource> ActivityLedger<B> {
    /// Create a ledger with the given privileged identities and balance
    /// source.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::ZeroAddress`] if `owner` or `operator` is zero
    pub fn new(owner: Address, operator: Address, balances: B) -> Result<Self> {
        if owner.is_zero() || operator.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        Ok(Self {
            owner,
            operator,
            creators: RoleRegistry::new("creator"),
            investors: RoleRegistry::new("investor"),
            stats: ActivityAccumulator::new(),
            holdings: HoldingsTracker::new(),
            snapshots: SnapshotStore::new(),
            balances,
            events: Vec::new(),
        })
    }

    fn require_owner(&self, caller: Address) -> Result<()> {
        if caller != self.owner {
            return Err(LedgerError::Unauthorized {
                caller,
                required: "owner",
            });
        }
        Ok(())
    }

    fn require_operator(&self, caller: Address) -> Result<()> {
        if caller != self.operator {
            return Err(LedgerError::Unauthorized {
                caller,
                required: "operator",
            });
        }
        Ok(())
    }

    // ---- operator surface -------------------------------------------------

    /// Record a publish event for a creator: `published` chapters plus
    /// `acquired` author-share tokens, accumulated into the lifetime totals
    /// and the calendar period containing `now`. Registers the creator on
    /// first write.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Unauthorized`] unless `caller` is the operator
    /// - [`LedgerError::ZeroAddress`] for a zero creator address
    /// - [`LedgerError::Overflow`] if a running total would overflow
    pub fn record_publish(
        &mut self,
        caller: Address,
        creator: Address,
        published: u64,
        acquired: u64,
        now: u64,
    ) -> Result<()> {
        self.require_operator(caller)?;
        if creator.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        let period = clock::calendar_period(now);
        self.stats.add_published(creator, period, published, acquired)?;
        // Cannot fail past this point: the address is non-zero and
        // registration is idempotent, so the call stays atomic.
        self.creators.register(creator)?;

        tracing::info!(
            creator = %creator,
            period = %period,
            published,
            acquired,
            "publish recorded"
        );
        self.events.push(LedgerEvent::PublishRecorded {
            creator,
            period,
            published,
            acquired,
        });
        Ok(())
    }

    /// Record an acquire event for an investor, accumulated into the
    /// lifetime totals and the calendar period containing `now`. Registers
    /// the investor on first write.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Unauthorized`] unless `caller` is the operator
    /// - [`LedgerError::ZeroAddress`] for a zero investor address
    /// - [`LedgerError::Overflow`] if a running total would overflow
    pub fn record_acquire(
        &mut self,
        caller: Address,
        investor: Address,
        acquired: u64,
        now: u64,
    ) -> Result<()> {
        self.require_operator(caller)?;
        if investor.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        let period = clock::calendar_period(now);
        self.stats.add_acquired(investor, period, acquired)?;
        self.investors.register(investor)?;

        tracing::info!(investor = %investor, period = %period, acquired, "acquire recorded");
        self.events.push(LedgerEvent::AcquireRecorded {
            investor,
            period,
            acquired,
        });
        Ok(())
    }

    /// Record that `owner_addr` holds `token`. Idempotent and monotonic.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Unauthorized`] unless `caller` is the operator
    /// - [`LedgerError::ZeroAddress`] for a zero owner address
    pub fn record_ownership(
        &mut self,
        caller: Address,
        token: TokenId,
        owner_addr: Address,
    ) -> Result<()> {
        self.require_operator(caller)?;
        if owner_addr.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        self.holdings.record_ownership(token, owner_addr);
        Ok(())
    }

    /// Associate a token with a creator (appends, no deduplication).
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Unauthorized`] unless `caller` is the operator
    /// - [`LedgerError::ZeroAddress`] for a zero creator address
    pub fn associate_creator_token(
        &mut self,
        caller: Address,
        creator: Address,
        token: TokenId,
    ) -> Result<()> {
        self.require_operator(caller)?;
        if creator.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        self.holdings.associate_creator_token(creator, token);
        Ok(())
    }

    /// Associate a token with an investor (appends, no deduplication).
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Unauthorized`] unless `caller` is the operator
    /// - [`LedgerError::ZeroAddress`] for a zero investor address
    pub fn associate_investor_token(
        &mut self,
        caller: Address,
        investor: Address,
        token: TokenId,
    ) -> Result<()> {
        self.require_operator(caller)?;
        if investor.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        self.holdings.associate_investor_token(investor, token);
        Ok(())
    }

    // ---- owner surface ----------------------------------------------------

    /// Register a creator. Returns `true` if newly added.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Unauthorized`] unless `caller` is the owner
    /// - [`LedgerError::ZeroAddress`] for the zero address
    pub fn register_creator(&mut self, caller: Address, addr: Address) -> Result<bool> {
        self.require_owner(caller)?;
        self.creators.register(addr)
    }

    /// Register a batch of creators, silently skipping zero addresses and
    /// existing members. Returns the number actually added.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Unauthorized`] unless `caller` is the owner
    pub fn add_creators(&mut self, caller: Address, addrs: &[Address]) -> Result<usize> {
        self.require_owner(caller)?;
        Ok(self.creators.register_batch(addrs))
    }

    /// Remove a creator from the registry. Historical counts and past
    /// snapshot rows are retained.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Unauthorized`] unless `caller` is the owner
    /// - [`LedgerError::NotAMember`] if the address holds no creator role
    pub fn remove_creator(&mut self, caller: Address, addr: Address) -> Result<()> {
        self.require_owner(caller)?;
        self.creators.remove(addr)
    }

    /// Register an investor. Returns `true` if newly added.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Unauthorized`] unless `caller` is the owner
    /// - [`LedgerError::ZeroAddress`] for the zero address
    pub fn register_investor(&mut self, caller: Address, addr: Address) -> Result<bool> {
        self.require_owner(caller)?;
        self.investors.register(addr)
    }

    /// Register a batch of investors, silently skipping zero addresses and
    /// existing members. Returns the number actually added.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Unauthorized`] unless `caller` is the owner
    pub fn add_investors(&mut self, caller: Address, addrs: &[Address]) -> Result<usize> {
        self.require_owner(caller)?;
        Ok(self.investors.register_batch(addrs))
    }

    /// Remove an investor from the registry.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Unauthorized`] unless `caller` is the owner
    /// - [`LedgerError::NotAMember`] if the address holds no investor role
    pub fn remove_investor(&mut self, caller: Address, addr: Address) -> Result<()> {
        self.require_owner(caller)?;
        self.investors.remove(addr)
    }

    /// Gated monthly rollup: snapshots the calendar period containing
    /// `now`, but only during the last two days of the rolling 30-day
    /// cycle. Returns the period rolled.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Unauthorized`] unless `caller` is the owner
    /// - [`LedgerError::OutsideRollupWindow`] outside the gate
    pub fn rollup(&mut self, caller: Address, now: u64) -> Result<PeriodKey> {
        self.require_owner(caller)?;
        if !clock::in_rollup_window(now) {
            return Err(LedgerError::OutsideRollupWindow {
                cycle_day: clock::cycle_day(now),
            });
        }
        let period = clock::calendar_period(now);
        self.run_rollup(period, now);
        Ok(period)
    }

    /// Forced rollup: same core as [`rollup`](Self::rollup) without the
    /// time gate (operator emergency override, owner-gated like the rest of
    /// the administrative surface).
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Unauthorized`] unless `caller` is the owner
    pub fn rollup_forced(&mut self, caller: Address, now: u64) -> Result<PeriodKey> {
        self.require_owner(caller)?;
        let period = clock::calendar_period(now);
        self.run_rollup(period, now);
        Ok(period)
    }

    /// Rollup for an explicit period key (backfill or correction runs).
    ///
    /// NOT idempotent: re-running for the same period appends duplicate
    /// snapshot rows. Callers must track which periods have already been
    /// rolled up.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Unauthorized`] unless `caller` is the owner
    pub fn rollup_for_period(
        &mut self,
        caller: Address,
        period: PeriodKey,
        now: u64,
    ) -> Result<()> {
        self.require_owner(caller)?;
        self.run_rollup(period, now);
        Ok(())
    }

    /// Irreversibly drop every snapshot row for a period. Returns the
    /// number of creator and investor rows dropped.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Unauthorized`] unless `caller` is the owner
    pub fn clear_period(&mut self, caller: Address, period: PeriodKey) -> Result<(usize, usize)> {
        self.require_owner(caller)?;
        Ok(self.snapshots.clear_period(period))
    }

    /// Appoint a new platform operator.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Unauthorized`] unless `caller` is the owner
    /// - [`LedgerError::ZeroAddress`] for the zero address
    pub fn set_operator(&mut self, caller: Address, new_operator: Address) -> Result<()> {
        self.require_owner(caller)?;
        if new_operator.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        tracing::info!(old = %self.operator, new = %new_operator, "operator changed");
        self.operator = new_operator;
        Ok(())
    }

    /// Transfer the administrative owner identity.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Unauthorized`] unless `caller` is the owner
    /// - [`LedgerError::ZeroAddress`] for the zero address
    pub fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> Result<()> {
        self.require_owner(caller)?;
        if new_owner.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        tracing::info!(old = %self.owner, new = %new_owner, "ownership transferred");
        self.owner = new_owner;
        Ok(())
    }

    /// The rollup core: one snapshot row per currently registered address,
    /// creators first, each role in registry enumeration order at call
    /// time. Held totals are read live from the balance source inside this
    /// single call, so no read is older than rollup start.
    fn run_rollup(&mut self, period: PeriodKey, now: u64) {
        let creator_members = self.creators.members().to_vec();
        let investor_members = self.investors.members().to_vec();

        for address in creator_members.iter().copied() {
            let lifetime = self.stats.creator_lifetime(address);
            let monthly = self.stats.creator_period(address, period);
            let current_held = self.holdings.current_held_by_creator(address, &self.balances);
            self.snapshots.append_creator(CreatorSnapshot {
                address,
                period,
                monthly_published: monthly.published,
                monthly_acquired: monthly.acquired,
                total_published: lifetime.published,
                total_acquired: lifetime.acquired,
                current_held,
                recorded_at: now,
            });
            self.events.push(LedgerEvent::CreatorSnapshotted {
                address,
                period,
                monthly_published: monthly.published,
                monthly_acquired: monthly.acquired,
                total_published: lifetime.published,
                total_acquired: lifetime.acquired,
                current_held,
            });
        }

        for address in investor_members.iter().copied() {
            let total_acquired = self.stats.investor_lifetime(address);
            let monthly_acquired = self.stats.investor_period(address, period);
            let current_held = self.holdings.current_held_by_investor(address, &self.balances);
            self.snapshots.append_investor(InvestorSnapshot {
                address,
                period,
                monthly_acquired,
                total_acquired,
                current_held,
                recorded_at: now,
            });
            self.events.push(LedgerEvent::InvestorSnapshotted {
                address,
                period,
                monthly_acquired,
                total_acquired,
                current_held,
            });
        }

        tracing::info!(
            period = %period,
            creators = creator_members.len(),
            investors = investor_members.len(),
            "rollup completed"
        );
        self.events.push(LedgerEvent::RollupCompleted {
            period,
            creator_count: creator_members.len(),
            investor_count: investor_members.len(),
            recorded_at: now,
        });
    }

    // ---- read-only surface ------------------------------------------------

    /// The administrative owner identity.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// The platform operator identity.
    pub fn operator(&self) -> Address {
        self.operator
    }

    /// Registered creators in enumeration order.
    pub fn creators(&self) -> &[Address] {
        self.creators.members()
    }

    /// Registered investors in enumeration order.
    pub fn investors(&self) -> &[Address] {
        self.investors.members()
    }

    /// Whether the address currently holds the creator role.
    pub fn is_creator(&self, addr: Address) -> bool {
        self.creators.contains(addr)
    }

    /// Whether the address currently holds the investor role.
    pub fn is_investor(&self, addr: Address) -> bool {
        self.investors.contains(addr)
    }

    /// Lifetime published/acquired totals for a creator (zero if unseen).
    pub fn creator_lifetime(&self, addr: Address) -> CreatorTotals {
        self.stats.creator_lifetime(addr)
    }

    /// One period's published/acquired totals for a creator.
    pub fn creator_period_totals(&self, addr: Address, period: PeriodKey) -> CreatorTotals {
        self.stats.creator_period(addr, period)
    }

    /// Lifetime acquired total for an investor (zero if unseen).
    pub fn investor_lifetime(&self, addr: Address) -> u64 {
        self.stats.investor_lifetime(addr)
    }

    /// One period's acquired total for an investor.
    pub fn investor_period_total(&self, addr: Address, period: PeriodKey) -> u64 {
        self.stats.investor_period(addr, period)
    }

    /// The first creator snapshot row for `addr` in `period`.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::SnapshotNotFound`] if no row exists
    pub fn creator_snapshot(&self, period: PeriodKey, addr: Address) -> Result<&CreatorSnapshot> {
        self.snapshots.creator_row(period, addr)
    }

    /// All creator snapshot rows for a period, in append order.
    pub fn creator_snapshots(&self, period: PeriodKey) -> &[CreatorSnapshot] {
        self.snapshots.creator_rows(period)
    }

    /// Creator snapshot rows for several periods at once.
    pub fn creator_snapshots_for_periods(
        &self,
        periods: &[PeriodKey],
    ) -> Vec<(PeriodKey, Vec<CreatorSnapshot>)> {
        self.snapshots.creator_rows_for_periods(periods)
    }

    /// The first investor snapshot row for `addr` in `period`.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::SnapshotNotFound`] if no row exists
    pub fn investor_snapshot(&self, period: PeriodKey, addr: Address) -> Result<&InvestorSnapshot> {
        self.snapshots.investor_row(period, addr)
    }

    /// All investor snapshot rows for a period, in append order.
    pub fn investor_snapshots(&self, period: PeriodKey) -> &[InvestorSnapshot] {
        self.snapshots.investor_rows(period)
    }

    /// Investor snapshot rows for several periods at once.
    pub fn investor_snapshots_for_periods(
        &self,
        periods: &[PeriodKey],
    ) -> Vec<(PeriodKey, Vec<InvestorSnapshot>)> {
        self.snapshots.investor_rows_for_periods(periods)
    }

    /// Live held total for a creator over every token ever associated with
    /// it.
    pub fn current_held_by_creator(&self, addr: Address) -> u64 {
        self.holdings.current_held_by_creator(addr, &self.balances)
    }

    /// Live held total for an investor.
    pub fn current_held_by_investor(&self, addr: Address) -> u64 {
        self.holdings.current_held_by_investor(addr, &self.balances)
    }

    /// Every address ever recorded as an owner of `token`.
    pub fn token_owners(&self, token: TokenId) -> &[Address] {
        self.holdings.owners(token)
    }

    /// Every recorded owner of `token` paired with its live balance.
    pub fn token_owners_with_balances(&self, token: TokenId) -> Vec<(Address, u64)> {
        self.holdings.owners_with_balances(token, &self.balances)
    }

    /// Drain the buffered notifications in emission order.
    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    /// The injected balance source.
    pub fn balances(&self) -> &B {
        &self.balances
    }

    /// Mutable access to the balance source (stub mutation in tests).
    pub fn balances_mut(&mut self) -> &mut B {
        &mut self.balances
    }
}
