//! Token ownership and association tracking.
//!
//! Three structures, all append-only:
//!
//! - per-token owner lists: every address ever recorded as holding the
//!   token. Monotonic — an owner is never removed, even after its balance
//!   drops to zero.
//! - per-creator and per-investor token lists: every token identifier ever
//!   associated with the address. NOT deduplicated; repeated association
//!   appends repeated entries. The current-held summation skips tokens it
//!   has already visited, so duplicates cost compute, never correctness.
//!
//! "Currently held" totals are always recomputed live through the injected
//! [`BalanceSource`]; each call is O(tokens-ever-associated), a documented
//! scaling liability.

use std::collections::{HashMap, HashSet};

use tanko_oracle::BalanceSource;
use tanko_types::{Address, TokenId};

/// Tracks token ownership sets and creator/investor token associations.
#[derive(Debug, Default)]
pub struct HoldingsTracker {
    token_owners: HashMap<TokenId, Vec<Address>>,
    creator_tokens: HashMap<Address, Vec<TokenId>>,
    investor_tokens: HashMap<Address, Vec<TokenId>>,
}

impl HoldingsTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `owner` holds (or once held) `token`. Idempotent and
    /// monotonic; returns `true` if the owner was newly recorded.
    pub fn record_ownership(&mut self, token: TokenId, owner: Address) -> bool {
        let owners = self.token_owners.entry(token).or_default();
        if owners.contains(&owner) {
            return false;
        }
        owners.push(owner);
        tracing::trace!(token, owner = %owner, "ownership recorded");
        true
    }

    /// Every address ever recorded as an owner of `token`, in recording
    /// order.
    pub fn owners(&self, token: TokenId) -> &[Address] {
        self.token_owners.get(&token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append `token` to the creator's association list (no deduplication).
    pub fn associate_creator_token(&mut self, creator: Address, token: TokenId) {
        self.creator_tokens.entry(creator).or_default().push(token);
    }

    /// Append `token` to the investor's association list (no deduplication).
    pub fn associate_investor_token(&mut self, investor: Address, token: TokenId) {
        self.investor_tokens.entry(investor).or_default().push(token);
    }

    /// Tokens ever associated with a creator, duplicates included.
    pub fn creator_tokens(&self, creator: Address) -> &[TokenId] {
        self.creator_tokens
            .get(&creator)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Tokens ever associated with an investor, duplicates included.
    pub fn investor_tokens(&self, investor: Address) -> &[TokenId] {
        self.investor_tokens
            .get(&investor)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sum of the creator's live balances over every token ever associated
    /// with it. Zero balances contribute zero; duplicate associations are
    /// visited once.
    pub fn current_held_by_creator<B: BalanceSource>(&self, creator: Address, src: &B) -> u64 {
        sum_live_balances(self.creator_tokens(creator), creator, src)
    }

    /// Investor twin of [`current_held_by_creator`](Self::current_held_by_creator).
    pub fn current_held_by_investor<B: BalanceSource>(&self, investor: Address, src: &B) -> u64 {
        sum_live_balances(self.investor_tokens(investor), investor, src)
    }

    /// Every recorded owner of `token` paired with its live balance.
    pub fn owners_with_balances<B: BalanceSource>(
        &self,
        token: TokenId,
        src: &B,
    ) -> Vec<(Address, u64)> {
        self.owners(token)
            .iter()
            .map(|&owner| (owner, src.balance_of(owner, token)))
            .collect()
    }
}

fn sum_live_balances<B: BalanceSource>(tokens: &[TokenId], owner: Address, src: &B) -> u64 {
    let mut seen = HashSet::new();
    let mut total: u64 = 0;
    for &token in tokens {
        if seen.insert(token) {
            total = total.saturating_add(src.balance_of(owner, token));
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use tanko_oracle::StubBalances;

    fn addr(b: u8) -> Address {
        Address([b; 20])
    }

    #[test]
    fn test_record_ownership_idempotent() {
        let mut tracker = HoldingsTracker::new();
        assert!(tracker.record_ownership(1, addr(1)));
        assert!(!tracker.record_ownership(1, addr(1)));
        assert!(tracker.record_ownership(1, addr(2)));
        assert_eq!(tracker.owners(1), &[addr(1), addr(2)]);
    }

    #[test]
    fn test_owners_empty_for_unknown_token() {
        let tracker = HoldingsTracker::new();
        assert!(tracker.owners(99).is_empty());
    }

    #[test]
    fn test_association_keeps_duplicates() {
        let mut tracker = HoldingsTracker::new();
        tracker.associate_creator_token(addr(1), 5);
        tracker.associate_creator_token(addr(1), 5);
        tracker.associate_creator_token(addr(1), 6);
        assert_eq!(tracker.creator_tokens(addr(1)), &[5, 5, 6]);
    }

    #[test]
    fn test_current_held_sums_all_tokens() {
        let mut tracker = HoldingsTracker::new();
        let mut book = StubBalances::new();
        let creator = addr(1);

        tracker.associate_creator_token(creator, 1);
        tracker.associate_creator_token(creator, 2);
        tracker.associate_creator_token(creator, 3);
        book.set_balance(creator, 1, 10);
        book.set_balance(creator, 2, 0);
        book.set_balance(creator, 3, 32);

        assert_eq!(tracker.current_held_by_creator(creator, &book), 42);
    }

    #[test]
    fn test_current_held_ignores_duplicate_associations() {
        let mut tracker = HoldingsTracker::new();
        let mut book = StubBalances::new();
        let investor = addr(2);

        tracker.associate_investor_token(investor, 7);
        tracker.associate_investor_token(investor, 7);
        book.set_balance(investor, 7, 50);

        assert_eq!(tracker.current_held_by_investor(investor, &book), 50);
    }

    #[test]
    fn test_current_held_decreases_with_live_balance() {
        let mut tracker = HoldingsTracker::new();
        let mut book = StubBalances::new();
        let investor = addr(3);

        tracker.associate_investor_token(investor, 1);
        book.set_balance(investor, 1, 100);
        assert_eq!(tracker.current_held_by_investor(investor, &book), 100);

        // Owner transfers away; held total drops, association remains.
        book.set_balance(investor, 1, 25);
        assert_eq!(tracker.current_held_by_investor(investor, &book), 25);
        assert_eq!(tracker.investor_tokens(investor), &[1]);
    }

    #[test]
    fn test_owners_with_balances() {
        let mut tracker = HoldingsTracker::new();
        let mut book = StubBalances::new();

        tracker.record_ownership(9, addr(1));
        tracker.record_ownership(9, addr(2));
        book.set_balance(addr(1), 9, 4);
        // addr(2) sold everything; still enumerated, at zero.

        assert_eq!(
            tracker.owners_with_balances(9, &book),
            vec![(addr(1), 4), (addr(2), 0)]
        );
    }
}
