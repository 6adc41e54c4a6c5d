#![cfg(test)]

// Property tests for ChainTable kept inside the crate so they can check
// chain-level invariants that the public surface does not expose.

use crate::config::TableConfig;
use crate::error::InsertError;
use crate::table::ChainTable;
use hashbrown::HashMap;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    TryInsert(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::TryInsert(i, v)),
            3 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Get),
            1 => prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(OpI::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// State-machine equivalence against hashbrown::HashMap.
// Invariants checked after every op:
// - `get`/`contains_key` agree with the model; updates keep one entry per key.
// - `remove` reports exactly the model's removed value; absent keys are no-ops.
// - `len` equals the sum of chain lengths and the model's len.
// - Capacity never shrinks, and only doubles.
fn run_scenario(
    config: TableConfig,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut sut: ChainTable<String, i32> =
        ChainTable::with_config(config).expect("config is valid");
    let mut model: HashMap<String, i32> = HashMap::new();
    let mut capacity = sut.capacity();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = pool[i].clone();
                let prev = sut.insert(k.clone(), v);
                prop_assert_eq!(prev, model.insert(k, v));
            }
            OpI::TryInsert(i, v) => {
                let k = pool[i].clone();
                let already = model.contains_key(&k);
                match sut.try_insert(k.clone(), v) {
                    Ok(slot) => {
                        prop_assert!(!already, "try_insert must fail on duplicate");
                        prop_assert_eq!(*slot, v);
                        model.insert(k, v);
                    }
                    Err(InsertError::DuplicateKey { key, value }) => {
                        prop_assert!(already, "duplicate error only when key exists");
                        prop_assert_eq!(key, k);
                        prop_assert_eq!(value, v);
                    }
                }
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k.as_str()), model.remove(k));
                prop_assert!(sut.get(k.as_str()).is_none());
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k.as_str()), model.get(k));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(s.as_str()), model.contains_key(&s));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                match (sut.get_mut(k.as_str()), model.get_mut(k)) {
                    (Some(sv), Some(mv)) => {
                        *sv = sv.saturating_add(d);
                        *mv = mv.saturating_add(d);
                    }
                    (None, None) => {}
                    (s, m) => prop_assert!(false, "presence mismatch: {:?} vs {:?}", s, m),
                }
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert_eq!(sut.chain_lengths().iter().sum::<usize>(), sut.len());
        let now = sut.capacity();
        prop_assert!(now == capacity || now == capacity * 2, "{} -> {}", capacity, now);
        capacity = now;
    }

    for (k, v) in &model {
        prop_assert_eq!(sut.get(k.as_str()), Some(v));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_scenario(TableConfig::default(), &pool, ops)?;
    }

    // Starts at one bucket and grows at half load, so nearly every
    // scenario crosses several rehashes.
    #[test]
    fn prop_state_machine_frequent_growth((pool, ops) in arb_scenario()) {
        let config = TableConfig::new()
            .with_initial_capacity(1)
            .with_max_load_factor(0.5);
        run_scenario(config, &pool, ops)?;
    }

    // One bucket that never grows: every key shares a single chain,
    // stressing head/middle/tail unlinking.
    #[test]
    fn prop_state_machine_single_chain((pool, ops) in arb_scenario()) {
        let config = TableConfig::new()
            .with_initial_capacity(1)
            .with_max_load_factor(1.0e9);
        run_scenario(config, &pool, ops)?;
    }
}
