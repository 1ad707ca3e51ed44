//! The ledger behaves the same over every backend.

use leave_core::types::CalendarDate;
use leave_storage::prelude::*;
use proptest::prelude::*;
use tempfile::tempdir;

fn d(y: i32, m: u32, day: u32) -> CalendarDate {
    CalendarDate::from_ymd(y, m, day).unwrap()
}

fn exercise<S: StorageAdapter>(ledger: &LeaveLedger<S>) {
    let summer = ledger
        .record_leave("maria", 2024, d(2024, 8, 12), d(2024, 8, 23))
        .unwrap();
    // Assumption on Thursday Aug 15
    assert_eq!(summer.days, 9);

    let christmas = ledger
        .record_leave("maria", 2024, d(2024, 12, 23), d(2025, 1, 3))
        .unwrap();
    assert_eq!(christmas.days, 7);

    ledger
        .record_leave("nikos", 2024, d(2024, 3, 4), d(2024, 3, 8))
        .unwrap();

    let balance = ledger.balance("maria", 2024).unwrap();
    assert_eq!(balance, LeaveBalance::new(2024, 20, 16));

    ledger.set_allowance("maria", 26).unwrap();
    assert_eq!(ledger.balance("maria", 2024).unwrap().remaining, 10);

    ledger
        .edit_leave(summer.id, 2024, d(2024, 8, 19), d(2024, 8, 23))
        .unwrap();
    assert_eq!(ledger.taken_days("maria", 2024).unwrap(), 12);

    assert!(ledger.delete_leave(christmas.id).unwrap());
    let remaining: Vec<_> = ledger
        .leaves_for_year("maria", 2024)
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(remaining, vec![summer.id]);

    assert_eq!(ledger.year_options("maria", 2025).unwrap(), vec![2025, 2024]);
    assert_eq!(ledger.balance("nikos", 2024).unwrap().taken, 5);
}

#[test]
fn memory_backend() {
    exercise(&LeaveLedger::new(InMemoryStorage::new()));
}

#[test]
fn redb_backend() {
    let dir = tempdir().unwrap();
    let storage = RedbStorage::open(dir.path().join("ledger.redb")).unwrap();
    exercise(&LeaveLedger::new(storage));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Balance is always allowance minus the sum of recorded days.
    #[test]
    fn balance_is_allowance_minus_taken(
        spans in prop::collection::vec((0i64..365, 0i64..20), 0..8),
        allowance in prop::sample::select(vec![20u32, 21, 22, 25, 26]),
    ) {
        let ledger = LeaveLedger::new(InMemoryStorage::new());
        ledger.set_allowance("u", allowance).unwrap();

        let start = d(2024, 1, 1);
        let mut total = 0u32;
        for (offset, len) in spans {
            let from = start.checked_add_days(offset).unwrap();
            let until = from.checked_add_days(len).unwrap();
            total += ledger.record_leave("u", 2024, from, until).unwrap().days;
        }

        let balance = ledger.balance("u", 2024).unwrap();
        prop_assert_eq!(balance.taken, total);
        prop_assert_eq!(balance.remaining, i64::from(allowance) - i64::from(total));
    }
}
