#![cfg(test)]

// Property tests for the structural layer kept inside the crate so they
// can reach ChainTable without feature gates.

use crate::config::Config;
use crate::hash::{ByteHash, HashFn, Murmur3};
use crate::table::ChainTable;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to
// earlier keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Set(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(usize),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<Vec<u8>>, Vec<OpI>)> {
    // Length 0 keys included on purpose: they are ordinary keys here.
    proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..6), 1..=8).prop_flat_map(
        |pool| {
            let idxs: Vec<usize> = (0..pool.len()).collect();
            let idx = proptest::sample::select(idxs);
            let op = prop_oneof![
                (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Set(i, v)),
                idx.clone().prop_map(OpI::Remove),
                idx.clone().prop_map(OpI::Get),
                idx.clone().prop_map(OpI::Contains),
                Just(OpI::Iterate),
            ];
            proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
        },
    )
}

fn run_scenario<H: ByteHash>(
    mut sut: ChainTable<i32, H>,
    pool: &[Vec<u8>],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Vec<u8>, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Set(i, v) => {
                let k = &pool[i];
                let displaced = sut.set(k, v);
                let model_prev = model.insert(k.clone(), v);
                prop_assert_eq!(displaced, model_prev, "set must return the displaced value");
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                let removed = sut.remove(k);
                let model_removed = model.remove(k.as_slice());
                prop_assert_eq!(removed, model_removed);
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k.as_slice()));
            }
            OpI::Contains(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.contains_key(k), model.contains_key(k.as_slice()));
            }
            OpI::Iterate => {
                let seen: BTreeMap<Vec<u8>, i32> =
                    sut.iter().map(|(k, v)| (k.to_vec(), *v)).collect();
                let expected: BTreeMap<Vec<u8>, i32> =
                    model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(seen, expected, "iteration must yield each live entry once");
            }
        }

        // Post-conditions after each op.
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        // Allocations do not fail under test, so the load-factor bound
        // must hold unconditionally after every operation.
        prop_assert!(
            sut.load_factor() <= sut.config().max_load_factor,
            "load factor {} exceeds configured max {}",
            sut.load_factor(),
            sut.config().max_load_factor
        );
        let s = sut.stats();
        prop_assert_eq!(s.len, model.len());
        prop_assert!(s.empty_buckets + s.overflow_buckets <= s.capacity);
        prop_assert_eq!(s.capacity, sut.capacity());
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap
// across random operation sequences, starting from the smallest legal
// capacity so growth fires many times.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let sut: ChainTable<i32, Murmur3> =
            ChainTable::with_hasher(1, Config::default(), Murmur3::default());
        run_scenario(sut, &pool, ops)?;
    }
}

// Collision variant: a constant hasher forces every key through one
// chain, stressing chain walking, unlink, and relink-on-growth.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let sut: ChainTable<i32, HashFn<fn(&[u8]) -> u32>> =
            ChainTable::with_hasher(1, Config::default(), HashFn(|_: &[u8]| 0));
        run_scenario(sut, &pool, ops)?;
    }
}
