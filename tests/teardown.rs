// Ownership and teardown.
//
// The table owns its entry wrappers but not the payloads callers point it
// at. These tests store `Rc`s and references so the payload outlives the
// table, and check that every table-held handle is released exactly once.
mod common;

use chain_table::ChainTable;
use common::logger::init_test_logger;
use std::cell::Cell;
use std::rc::Rc;

struct DropCounter<'a>(&'a Cell<usize>);

impl Drop for DropCounter<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

// Test: dropping the table releases every entry, including across growth.
#[test]
fn drop_releases_every_entry_once() {
    init_test_logger();
    let drops = Cell::new(0);
    {
        let mut t = ChainTable::with_capacity(1);
        for i in 0..50u32 {
            t.insert(i, DropCounter(&drops));
        }
        assert!(t.capacity() > 1);
        assert_eq!(drops.get(), 0, "growth must not drop entries");
    }
    assert_eq!(drops.get(), 50);
}

// Test: payloads shared with the caller survive teardown.
#[test]
fn shared_payloads_outlive_table() {
    let payload = Rc::new(String::from("caller-owned"));
    let mut t = ChainTable::new();
    for i in 0..10u8 {
        t.insert(i, Rc::clone(&payload));
    }
    assert_eq!(Rc::strong_count(&payload), 11);
    drop(t);
    assert_eq!(Rc::strong_count(&payload), 1);
    assert_eq!(payload.as_str(), "caller-owned");
}

// Test: borrowed payloads; the table holds references only.
#[test]
fn borrowed_values_are_not_consumed() {
    let values = vec![String::from("a"), String::from("b")];
    let mut t = ChainTable::new();
    t.insert(0usize, &values[0]);
    t.insert(1usize, &values[1]);
    assert_eq!(t.get(&1).map(|s| s.as_str()), Some("b"));
    drop(t);
    assert_eq!(values.len(), 2);
}

// Test: update returns the displaced value to the caller instead of dropping it.
#[test]
fn update_hands_back_old_value() {
    let drops = Cell::new(0);
    let mut t = ChainTable::new();
    t.insert("k", DropCounter(&drops));
    let old = t.insert("k", DropCounter(&drops));
    assert!(old.is_some());
    assert_eq!(drops.get(), 0);
    drop(old);
    assert_eq!(drops.get(), 1);
    drop(t);
    assert_eq!(drops.get(), 2);
}

// Test: remove hands the entry back; absent removal drops nothing.
#[test]
fn remove_hands_back_entry() {
    let drops = Cell::new(0);
    let mut t = ChainTable::new();
    t.insert(7i32, DropCounter(&drops));
    assert!(t.remove(&8).is_none());
    assert_eq!(drops.get(), 0);
    let removed = t.remove_entry(&7);
    assert!(removed.is_some());
    assert_eq!(drops.get(), 0);
    drop(removed);
    assert_eq!(drops.get(), 1);
    assert!(t.is_empty());
}
