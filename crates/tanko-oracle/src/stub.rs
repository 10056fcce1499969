//! In-memory balance book.
//!
//! Backs the ledger in development and tests where no real token ledger is
//! deployed. Balances are set directly through the dev mutators; the rest of
//! the system only ever reads through [`BalanceSource`].

use std::collections::HashMap;

use tanko_types::{Address, TokenId};

use crate::BalanceSource;

/// An in-memory balance source keyed by `(owner, token)`.
#[derive(Debug, Clone, Default)]
pub struct StubBalances {
    balances: HashMap<(Address, TokenId), u64>,
}

impl StubBalances {
    /// Create an empty balance book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an owner's balance for a token (development/testing only).
    ///
    /// In production, balances come from the token ledger; this method
    /// exists so tests can stage holdings directly.
    pub fn set_balance(&mut self, owner: Address, token: TokenId, amount: u64) {
        tracing::warn!(%owner, token, amount, "stub balances: balance set (dev only)");
        self.balances.insert((owner, token), amount);
    }

    /// Add to an owner's balance for a token, saturating at `u64::MAX`
    /// (development/testing only).
    pub fn credit(&mut self, owner: Address, token: TokenId, amount: u64) {
        let entry = self.balances.entry((owner, token)).or_insert(0);
        *entry = entry.saturating_add(amount);
    }
}

impl BalanceSource for StubBalances {
    fn balance_of(&self, owner: Address, token: TokenId) -> u64 {
        self.balances.get(&(owner, token)).copied().unwrap_or(0)
    }
}
