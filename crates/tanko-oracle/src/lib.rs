//! # tanko-oracle
//!
//! Token balance source for the activity ledger.
//!
//! The ledger never stores balances itself; the chapter token ledger is the
//! single authority. This crate defines the injected capability the ledger
//! reads through, plus an in-memory implementation for development and
//! tests.
//!
//! ## Modules
//!
//! - [`stub`] — In-memory balance book

pub mod stub;

pub use stub::StubBalances;

use tanko_types::{Address, TokenId};

/// Live token-balance lookup.
///
/// Implementations must be synchronous and always available: every read made
/// during a single rollup call reflects state no older than rollup start.
/// A production implementation wraps the real token ledger; tests use
/// [`StubBalances`].
pub trait BalanceSource {
    /// The owner's current balance of the given token. Zero if the owner
    /// holds none.
    fn balance_of(&self, owner: Address, token: TokenId) -> u64;
}
