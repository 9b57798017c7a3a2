// LinearProbeTable property tests.
//
// Model: std::collections::HashMap over the same keys.
// Invariant: after every operation the table and the model agree on
// membership, values, and population; removals in particular must never
// lose a neighbor to a broken probe cluster.
use super::LinearProbeTable;
use proptest::prelude::*;
use std::collections::HashMap;
use std::string::{String, ToString};
use std::vec::Vec;

const KEYS: [&str; 8] = [
    "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel",
];

proptest! {
    #[test]
    fn prop_table_matches_model(
        ops in proptest::collection::vec((0u8..=2, 0usize..KEYS.len(), 0i32..1000), 1..200),
    ) {
        // The small ladder keeps the load factor high so probe clusters
        // form and break constantly.
        let mut table: LinearProbeTable<String, i32> = LinearProbeTable::with_ladder(&[5, 13, 29]);
        let mut model: HashMap<String, i32> = HashMap::new();

        for (op, ki, value) in ops {
            let key = KEYS[ki].to_string();
            match op {
                // Insert or overwrite; previous values must agree.
                0 => {
                    let previous = table.set(key.clone(), value).unwrap();
                    prop_assert_eq!(previous, model.insert(key, value));
                }
                // Remove, present or not.
                1 => {
                    prop_assert_eq!(table.remove(&key), model.remove(&key));
                }
                // Plain lookup.
                _ => {
                    prop_assert_eq!(table.get(&key), model.get(&key));
                }
            }
            prop_assert_eq!(table.len(), model.len());
        }

        // Final sweep: every key agrees, and enumeration sees exactly the
        // model's population.
        for key in KEYS {
            let key = key.to_string();
            prop_assert_eq!(table.get(&key), model.get(&key));
            prop_assert_eq!(table.contains_key(&key), model.contains_key(&key));
        }
        let mut table_keys: Vec<&String> = table.keys().collect();
        let mut model_keys: Vec<&String> = model.keys().collect();
        table_keys.sort_unstable();
        model_keys.sort_unstable();
        prop_assert_eq!(table_keys, model_keys);
    }
}
