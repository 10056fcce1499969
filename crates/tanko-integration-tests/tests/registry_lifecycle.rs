//! Integration test: registry lifecycle and authorization boundaries.
//!
//! Exercises:
//! 1. Single and batch registration through the owner identity
//! 2. Skip-invalid batch semantics (zero addresses, duplicates)
//! 3. Swap-remove deletion and re-registration
//! 4. The operator/owner split across the whole mutating surface

use tanko_ledger::{ActivityLedger, LedgerError};
use tanko_oracle::StubBalances;
use tanko_types::{Address, PeriodKey};

const OWNER: Address = Address([0xaa; 20]);
const OPERATOR: Address = Address([0xbb; 20]);
const BASE_TIME: u64 = 1_706_054_400;

fn addr(b: u8) -> Address {
    Address([b; 20])
}

fn new_ledger() -> ActivityLedger<StubBalances> {
    ActivityLedger::new(OWNER, OPERATOR, StubBalances::new()).expect("ledger")
}

#[test]
fn double_registration_keeps_one_entry() {
    let mut ledger = new_ledger();
    assert!(ledger.register_creator(OWNER, addr(1)).expect("first"));
    assert!(!ledger.register_creator(OWNER, addr(1)).expect("second"));
    assert_eq!(ledger.creators(), &[addr(1)]);

    assert!(ledger.register_investor(OWNER, addr(1)).expect("investor"));
    assert_eq!(ledger.investors(), &[addr(1)]);
}

#[test]
fn batch_registration_always_completes() {
    let mut ledger = new_ledger();
    ledger.register_investor(OWNER, addr(2)).expect("seed");

    let added = ledger
        .add_investors(
            OWNER,
            &[Address::ZERO, addr(1), addr(2), addr(1), addr(3)],
        )
        .expect("batch");
    // Zero and duplicates silently skipped; no partial-failure signal.
    assert_eq!(added, 2);
    assert_eq!(ledger.investors(), &[addr(2), addr(1), addr(3)]);
}

#[test]
fn removal_requires_membership_and_allows_reregistration() {
    let mut ledger = new_ledger();
    ledger
        .add_creators(OWNER, &[addr(1), addr(2), addr(3)])
        .expect("batch");

    assert!(matches!(
        ledger.remove_creator(OWNER, addr(9)),
        Err(LedgerError::NotAMember { .. })
    ));
    assert_eq!(ledger.creators().len(), 3);

    ledger.remove_creator(OWNER, addr(1)).expect("remove");
    assert!(!ledger.is_creator(addr(1)));
    // Swap-remove: last member fills the hole, order not preserved.
    assert_eq!(ledger.creators(), &[addr(3), addr(2)]);

    assert!(ledger.register_creator(OWNER, addr(1)).expect("re-register"));
    assert_eq!(ledger.creators(), &[addr(3), addr(2), addr(1)]);
}

#[test]
fn operator_cannot_administer_owner_cannot_record() {
    let mut ledger = new_ledger();
    let stranger = addr(0x77);

    // Administrative surface rejects the operator and strangers.
    for caller in [OPERATOR, stranger] {
        assert!(matches!(
            ledger.register_creator(caller, addr(1)),
            Err(LedgerError::Unauthorized { .. })
        ));
        assert!(matches!(
            ledger.rollup_forced(caller, BASE_TIME),
            Err(LedgerError::Unauthorized { .. })
        ));
        assert!(matches!(
            ledger.clear_period(caller, PeriodKey::new(202401)),
            Err(LedgerError::Unauthorized { .. })
        ));
    }

    // Recording surface rejects the owner and strangers.
    for caller in [OWNER, stranger] {
        assert!(matches!(
            ledger.record_publish(caller, addr(1), 1, 1, BASE_TIME),
            Err(LedgerError::Unauthorized { .. })
        ));
        assert!(matches!(
            ledger.record_ownership(caller, 1, addr(1)),
            Err(LedgerError::Unauthorized { .. })
        ));
        assert!(matches!(
            ledger.associate_investor_token(caller, addr(1), 1),
            Err(LedgerError::Unauthorized { .. })
        ));
    }

    // Failed calls left no trace.
    assert!(ledger.creators().is_empty());
    assert!(ledger.token_owners(1).is_empty());
    assert!(ledger.take_events().is_empty());
}

#[test]
fn zero_participants_rejected_everywhere() {
    let mut ledger = new_ledger();

    assert!(matches!(
        ledger.register_creator(OWNER, Address::ZERO),
        Err(LedgerError::ZeroAddress)
    ));
    assert!(matches!(
        ledger.record_publish(OPERATOR, Address::ZERO, 1, 1, BASE_TIME),
        Err(LedgerError::ZeroAddress)
    ));
    assert!(matches!(
        ledger.record_acquire(OPERATOR, Address::ZERO, 1, BASE_TIME),
        Err(LedgerError::ZeroAddress)
    ));
    assert!(matches!(
        ledger.record_ownership(OPERATOR, 1, Address::ZERO),
        Err(LedgerError::ZeroAddress)
    ));
    assert!(matches!(
        ledger.associate_creator_token(OPERATOR, Address::ZERO, 1),
        Err(LedgerError::ZeroAddress)
    ));
}

#[test]
fn current_held_matches_staged_balances_exactly() {
    let mut ledger = new_ledger();
    let c = addr(1);

    for token in [10, 11, 12] {
        ledger
            .associate_creator_token(OPERATOR, c, token)
            .expect("associate");
    }
    // Duplicate association of token 10 must not double-count.
    ledger
        .associate_creator_token(OPERATOR, c, 10)
        .expect("duplicate associate");

    ledger.balances_mut().set_balance(c, 10, 7);
    ledger.balances_mut().set_balance(c, 11, 0);
    ledger.balances_mut().set_balance(c, 12, 35);

    assert_eq!(ledger.current_held_by_creator(c), 42);
}
