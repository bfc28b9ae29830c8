#![cfg(test)]

// Property tests for TreeHashMap kept inside the crate so they can call
// the structural validators in `tree` after every operation.

use crate::tree;
use crate::{NodeArena, TreeHashMap};
use proptest::prelude::*;
use std::collections::HashMap;

// Keys are drawn from a small u64 pool, hashed by identity. Re-inserting
// a pool key is the interesting case: equal hashes are kept as distinct
// entries, so the model is a multiset per hash.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i32),
    InsertWith(usize, i32),
    EraseFound(usize),
    Find(usize),
    Mutate(usize, i32),
    Iterate,
    Destroy,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<u64>, Vec<Op>)> {
    proptest::collection::vec(0u64..64, 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::InsertWith(i, v)),
            3 => idx.clone().prop_map(Op::EraseFound),
            2 => idx.clone().prop_map(Op::Find),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| Op::Mutate(i, d)),
            1 => Just(Op::Iterate),
            1 => Just(Op::Destroy),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: State-machine equivalence against a multiset model, with the
// structural invariants re-validated after every operation:
// - hash order and parent-link consistency hold for the whole tree;
// - the live-node count matches the model's entry count;
// - find hits exactly when the model holds at least one entry for the
//   hash, and the value it reaches is one of the model's entries for it;
// - erase removes exactly one entry with that hash and returns a value
//   the model held; the erased cursor goes stale;
// - a full walk visits each live entry exactly once (multiset parity).
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut arena: NodeArena<i32> = NodeArena::new();
        let mut sut: TreeHashMap<u64, i32> = TreeHashMap::new();
        let mut model: HashMap<u64, Vec<i32>> = HashMap::new();

        for op in ops {
            match op {
                Op::Insert(i, v) => {
                    let k = pool[i];
                    let c = sut.insert(&mut arena, &k, v);
                    prop_assert_eq!(c.hash(&arena), Some(k));
                    prop_assert_eq!(c.value(&arena), Some(&v));
                    model.entry(k).or_default().push(v);
                }
                Op::InsertWith(i, v) => {
                    let k = pool[i];
                    let c = sut.insert_with(&mut arena, &k, || v);
                    prop_assert_eq!(c.value(&arena), Some(&v));
                    model.entry(k).or_default().push(v);
                }
                Op::EraseFound(i) => {
                    let k = pool[i];
                    let c = sut.find(&arena, &k);
                    match model.get_mut(&k) {
                        Some(vs) if !vs.is_empty() => {
                            prop_assert!(!c.is_end());
                            let v = sut.erase(&mut arena, c);
                            let pos = vs.iter().position(|&mv| mv == v);
                            prop_assert!(pos.is_some(), "erased a value the model never held");
                            vs.swap_remove(pos.unwrap());
                            prop_assert_eq!(c.value(&arena), None, "erased cursor must go stale");
                        }
                        _ => prop_assert!(c.is_end()),
                    }
                }
                Op::Find(i) => {
                    let k = pool[i];
                    let c = sut.find(&arena, &k);
                    let present = model.get(&k).map(|vs| !vs.is_empty()).unwrap_or(false);
                    prop_assert_eq!(!c.is_end(), present);
                    if let Some(v) = c.value(&arena) {
                        prop_assert!(model[&k].contains(v), "find reached a foreign entry");
                    }
                }
                Op::Mutate(i, d) => {
                    let k = pool[i];
                    let c = sut.find(&arena, &k);
                    if let Some(v) = c.value_mut(&mut arena) {
                        let old = *v;
                        *v = old.saturating_add(d);
                        let vs = model.get_mut(&k).expect("model holds the found hash");
                        let pos = vs.iter().position(|&mv| mv == old).expect("model holds the value");
                        vs[pos] = old.saturating_add(d);
                    } else {
                        prop_assert!(c.is_end());
                    }
                }
                Op::Iterate => {
                    let mut seen: Vec<(u64, i32)> = sut
                        .iter(&arena)
                        .map(|(c, v)| (c.hash(&arena).unwrap(), *v))
                        .collect();
                    let mut expect: Vec<(u64, i32)> = model
                        .iter()
                        .flat_map(|(&k, vs)| vs.iter().map(move |&v| (k, v)))
                        .collect();
                    seen.sort_unstable();
                    expect.sort_unstable();
                    prop_assert_eq!(seen, expect);
                }
                Op::Destroy => {
                    sut.destroy(&mut arena);
                    model.clear();
                    prop_assert!(sut.is_empty());
                }
            }

            // Post-conditions after each op.
            let live = tree::check_invariants(&arena, sut.root_key());
            let model_len: usize = model.values().map(Vec::len).sum();
            prop_assert_eq!(live, model_len);
            prop_assert_eq!(arena.len(), model_len);
            prop_assert_eq!(sut.is_empty(), model_len == 0);
        }

        sut.destroy(&mut arena);
    }
}
