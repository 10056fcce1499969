//! Ledger notification events.
//!
//! The ledger emits one event per raw publish/acquire record call, one per
//! snapshot row created during a rollup, and one summary per rollup call.
//! Events are buffered by the ledger in emission order and drained by the
//! reporting layer.

use serde::{Deserialize, Serialize};

use crate::{Address, PeriodKey};

/// All notifications emitted by the activity ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum LedgerEvent {
    /// A publish record was accepted for a creator.
    PublishRecorded {
        creator: Address,
        period: PeriodKey,
        published: u64,
        acquired: u64,
    },

    /// An acquire record was accepted for an investor.
    AcquireRecorded {
        investor: Address,
        period: PeriodKey,
        acquired: u64,
    },

    /// A creator snapshot row was appended during a rollup.
    CreatorSnapshotted {
        address: Address,
        period: PeriodKey,
        monthly_published: u64,
        monthly_acquired: u64,
        total_published: u64,
        total_acquired: u64,
        current_held: u64,
    },

    /// An investor snapshot row was appended during a rollup.
    InvestorSnapshotted {
        address: Address,
        period: PeriodKey,
        monthly_acquired: u64,
        total_acquired: u64,
        current_held: u64,
    },

    /// A rollup call finished; counts are registry sizes at call time.
    RollupCompleted {
        period: PeriodKey,
        creator_count: usize,
        investor_count: usize,
        recorded_at: u64,
    },
}
