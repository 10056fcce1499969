//! # tanko-ledger
//!
//! Creator/investor activity ledger for the Tanko chapter publishing
//! platform.
//!
//! The ledger records publish and acquire events, maintains lifetime and
//! per-period totals, tracks which addresses hold which chapter tokens, and
//! periodically snapshots the whole registry into append-only monthly
//! ledgers. Balances are never stored here; they are read live through the
//! [`tanko_oracle::BalanceSource`] capability.
//!
//! ## Modules
//!
//! - [`registry`] — Creator/investor role registries
//! - [`holdings`] — Token ownership and association tracking
//! - [`stats`] — Lifetime and per-period activity accumulators
//! - [`clock`] — Period derivation and the rollup gate
//! - [`rollup`] — Monthly snapshot rows and their append-only store
//! - [`ledger`] — The [`ActivityLedger`] facade with authorization
//! - [`config`] — Bootstrap configuration

pub mod clock;
pub mod config;
pub mod holdings;
pub mod ledger;
pub mod registry;
pub mod rollup;
pub mod stats;

pub use ledger::ActivityLedger;
pub use rollup::{CreatorSnapshot, InvestorSnapshot};

use tanko_types::{Address, PeriodKey};

/// Error types for ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Caller does not hold the role the operation requires.
    #[error("unauthorized: {caller} does not hold the {required} role")]
    Unauthorized {
        /// The rejected caller.
        caller: Address,
        /// The required role ("owner" or "operator").
        required: &'static str,
    },

    /// The zero address was supplied where a participant is required.
    #[error("zero address is not a valid participant")]
    ZeroAddress,

    /// Removal target is not currently a member of the role registry.
    #[error("{address} is not a registered {role}")]
    NotAMember {
        /// The address that was not found.
        address: Address,
        /// The role registry searched ("creator" or "investor").
        role: &'static str,
    },

    /// No snapshot row exists for the address in the requested period.
    #[error("no snapshot for {address} in period {period}")]
    SnapshotNotFound {
        /// The address looked up.
        address: Address,
        /// The period searched.
        period: PeriodKey,
    },

    /// The gated rollup was called outside the end-of-cycle window.
    #[error("rollup window closed: day {cycle_day} of the 30-day cycle")]
    OutsideRollupWindow {
        /// Day within the current 30-day cycle (0-based).
        cycle_day: u64,
    },

    /// Arithmetic overflow in an accumulator.
    #[error("arithmetic overflow")]
    Overflow,
}

/// Convenience result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
