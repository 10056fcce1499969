//! # tanko-types
//!
//! Shared domain types used across the Tanko workspace.
//!
//! ## Modules
//!
//! - [`address`] — Participant addresses
//! - [`period`] — YYYYMM period keys
//! - [`events`] — Ledger notification events

pub mod address;
pub mod events;
pub mod period;

pub use address::Address;
pub use events::LedgerEvent;
pub use period::PeriodKey;

/// Identifier for a published chapter token.
pub type TokenId = u64;
