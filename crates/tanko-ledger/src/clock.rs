//! Period derivation and the rollup gate.
//!
//! Two deliberately separate notions of "period" live here and are never
//! unified:
//!
//! - [`calendar_period`] derives a YYYYMM key from a simplified calendar:
//!   365-day years and 30-day months from a fixed 2024-01-01 epoch, month
//!   clamped to 12. Real month lengths and leap years are ignored. This is
//!   an accepted approximation, not a bug to fix.
//! - [`in_rollup_window`] gates the periodic rollup on a rolling synthetic
//!   30-day cycle: the gate is open on the last two days of each cycle,
//!   independent of the calendar computation above.
//!
//! The two computations can disagree near synthetic month boundaries.

use tanko_types::PeriodKey;

/// Calendar epoch: 2024-01-01T00:00:00Z.
pub const CALENDAR_EPOCH: u64 = 1_704_067_200;

/// Year the calendar starts counting from.
pub const BASE_YEAR: u32 = 2024;

/// Seconds per day.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Days per simplified ledger year.
pub const DAYS_PER_LEDGER_YEAR: u64 = 365;

/// Days per simplified ledger month.
pub const DAYS_PER_LEDGER_MONTH: u64 = 30;

/// Length of the rolling gate cycle in days.
pub const GATE_CYCLE_DAYS: u64 = 30;

/// First day of the cycle (0-based) on which the rollup gate is open.
pub const GATE_OPEN_DAY: u64 = 28;

/// Derive the YYYYMM period key for a Unix timestamp.
///
/// Timestamps before the epoch saturate to the epoch (period 202401).
pub fn calendar_period(now: u64) -> PeriodKey {
    let elapsed = now.saturating_sub(CALENDAR_EPOCH);
    let year_secs = DAYS_PER_LEDGER_YEAR * SECONDS_PER_DAY;
    let month_secs = DAYS_PER_LEDGER_MONTH * SECONDS_PER_DAY;

    let year = BASE_YEAR + (elapsed / year_secs) as u32;
    // 365 / 30 yields a 13th slot on the last 5 days of the year; clamp.
    let month = ((elapsed % year_secs / month_secs) as u32 + 1).min(12);
    PeriodKey::from_year_month(year, month)
}

/// Whether the gated rollup may run at this timestamp: day 28 or 29 of the
/// rolling 30-day cycle.
pub fn in_rollup_window(now: u64) -> bool {
    cycle_day(now) >= GATE_OPEN_DAY
}

/// Day within the rolling 30-day cycle (0-based).
pub fn cycle_day(now: u64) -> u64 {
    (now / SECONDS_PER_DAY) % GATE_CYCLE_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: u64 = SECONDS_PER_DAY;

    #[test]
    fn test_epoch_is_january_2024() {
        assert_eq!(calendar_period(CALENDAR_EPOCH), PeriodKey::new(202401));
    }

    #[test]
    fn test_month_advances_every_30_days() {
        assert_eq!(
            calendar_period(CALENDAR_EPOCH + 29 * DAY),
            PeriodKey::new(202401)
        );
        assert_eq!(
            calendar_period(CALENDAR_EPOCH + 30 * DAY),
            PeriodKey::new(202402)
        );
        assert_eq!(
            calendar_period(CALENDAR_EPOCH + 60 * DAY),
            PeriodKey::new(202403)
        );
    }

    #[test]
    fn test_month_clamped_to_december() {
        // Days 360..364 of the 365-day year fall into a 13th slot.
        assert_eq!(
            calendar_period(CALENDAR_EPOCH + 360 * DAY),
            PeriodKey::new(202412)
        );
        assert_eq!(
            calendar_period(CALENDAR_EPOCH + 364 * DAY),
            PeriodKey::new(202412)
        );
    }

    #[test]
    fn test_year_advances_every_365_days() {
        assert_eq!(
            calendar_period(CALENDAR_EPOCH + 365 * DAY),
            PeriodKey::new(202501)
        );
        assert_eq!(
            calendar_period(CALENDAR_EPOCH + 2 * 365 * DAY + 31 * DAY),
            PeriodKey::new(202602)
        );
    }

    #[test]
    fn test_pre_epoch_saturates() {
        assert_eq!(calendar_period(0), PeriodKey::new(202401));
        assert_eq!(calendar_period(CALENDAR_EPOCH - 1), PeriodKey::new(202401));
    }

    #[test]
    fn test_rollup_window_boundaries() {
        // Cycle position is absolute (now / day) mod 30, independent of the
        // calendar epoch.
        let cycle_start = (CALENDAR_EPOCH / (30 * DAY)) * 30 * DAY;
        assert!(!in_rollup_window(cycle_start));
        assert!(!in_rollup_window(cycle_start + 27 * DAY));
        assert!(in_rollup_window(cycle_start + 28 * DAY));
        assert!(in_rollup_window(cycle_start + 29 * DAY + DAY - 1));
        assert!(!in_rollup_window(cycle_start + 30 * DAY));
    }

    #[test]
    fn test_cycle_day() {
        assert_eq!(cycle_day(0), 0);
        assert_eq!(cycle_day(28 * DAY), 28);
        assert_eq!(cycle_day(30 * DAY), 0);
        assert_eq!(cycle_day(31 * DAY + 123), 1);
    }
}
