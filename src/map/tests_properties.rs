// DoubleKeyTable property tests.
//
// Model: std::collections::HashMap over (K1, K2) pairs.
// Invariants checked after every operation:
//  - get/contains agree with the model for the touched pair;
//  - len() equals the number of distinct first keys in the model.
//
// Removal streams never drain a sub-table completely (the walk skips a
// removal that would); clearing a first key's final entry is pinned by the
// deterministic tests instead.
use super::DoubleKeyTable;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::string::{String, ToString};
use std::vec::Vec;

const FIRSTS: [&str; 4] = ["ash", "birch", "cedar", "fir"];
const SECONDS: [&str; 5] = ["north", "south", "east", "west", "summit"];

fn distinct_firsts(model: &HashMap<(String, String), i32>) -> usize {
    model
        .keys()
        .map(|(k1, _)| k1)
        .collect::<HashSet<_>>()
        .len()
}

proptest! {
    #[test]
    fn prop_table_matches_two_level_model(
        ops in proptest::collection::vec(
            (0u8..=3, 0usize..FIRSTS.len(), 0usize..SECONDS.len(), 0i32..100),
            1..300,
        ),
    ) {
        let mut table: DoubleKeyTable<String, String, i32> =
            DoubleKeyTable::with_ladders(&[5, 13, 29], &[5, 13]);
        let mut model: HashMap<(String, String), i32> = HashMap::new();

        for (op, i, j, value) in ops {
            let key1 = FIRSTS[i].to_string();
            let key2 = SECONDS[j].to_string();
            let pair = (key1.clone(), key2.clone());
            match op {
                // Insert or overwrite; previous values must agree.
                0 | 1 => {
                    let previous = table.insert(key1, key2, value).unwrap();
                    prop_assert_eq!(previous, model.insert(pair, value));
                }
                // Remove, unless it would drain the sub-table.
                2 => {
                    let under = model.keys().filter(|(k1, _)| *k1 == pair.0).count();
                    if !(model.contains_key(&pair) && under < 2) {
                        prop_assert_eq!(table.remove(&pair.0, &pair.1), model.remove(&pair));
                    }
                }
                // Plain lookup.
                _ => {
                    prop_assert_eq!(table.get(&pair.0, &pair.1), model.get(&pair));
                    prop_assert_eq!(
                        table.contains_keys(&pair.0, &pair.1),
                        model.contains_key(&pair)
                    );
                }
            }
            prop_assert_eq!(table.len(), distinct_firsts(&model));
        }

        // Final sweep: every pair agrees and enumeration matches.
        for key1 in FIRSTS {
            for key2 in SECONDS {
                let pair = (key1.to_string(), key2.to_string());
                prop_assert_eq!(table.get(&pair.0, &pair.1), model.get(&pair));
            }
        }
        let mut table_keys: Vec<&String> = table.keys().collect();
        let mut model_keys: Vec<&String> = model
            .keys()
            .map(|(k1, _)| k1)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        table_keys.sort_unstable();
        model_keys.sort_unstable();
        prop_assert_eq!(table_keys, model_keys);

        let total: usize = table.iter().len();
        prop_assert_eq!(total, model.len());
    }
}
