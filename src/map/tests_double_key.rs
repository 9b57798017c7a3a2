use super::{DoubleKeyTable, ErrorKind, InsertError, Invalidated};
use rand::{thread_rng, Rng};
use std::collections::HashMap;
use std::string::{String, ToString};
use std::vec::Vec;

// Pins probe walks for the tests that need exact slot control: every key
// starts at its first byte modulo the capacity.
fn first_byte(key: &&str, capacity: usize) -> usize {
    key.as_bytes().first().map_or(0, |&b| b as usize) % capacity
}

// Sends every key to slot 0, forcing a single cluster.
fn clump(_key: &&str, _capacity: usize) -> usize {
    0
}

#[test]
fn test_insert_and_get() {
    let mut table = DoubleKeyTable::new();
    assert_eq!(table.len(), 0);
    assert_eq!(table.insert("tall", "north", 10), Ok(None));
    assert_eq!(table.insert("tall", "south", 20), Ok(None));
    assert_eq!(table.insert("wide", "north", 30), Ok(None));

    assert_eq!(table.get(&"tall", &"north"), Some(&10));
    assert_eq!(table.get(&"tall", &"south"), Some(&20));
    assert_eq!(table.get(&"wide", &"north"), Some(&30));
    assert_eq!(table.get(&"wide", &"south"), None);
    assert_eq!(table.get(&"flat", &"north"), None);
}

#[test]
fn test_len_counts_first_level_keys_only() {
    let mut table = DoubleKeyTable::new();
    table.insert("tall", "north", 1).unwrap();
    table.insert("tall", "south", 2).unwrap();
    table.insert("tall", "east", 3).unwrap();
    assert_eq!(table.len(), 1);
    table.insert("wide", "north", 4).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.iter().len(), 4);
}

#[test]
fn test_overwrite_keeps_len_and_returns_previous() {
    let mut table = DoubleKeyTable::new();
    assert_eq!(table.insert("tall", "north", 1), Ok(None));
    assert_eq!(table.insert("tall", "north", 2), Ok(Some(1)));
    assert_eq!(table.get(&"tall", &"north"), Some(&2));
    assert_eq!(table.len(), 1);
    assert_eq!(table.iter().len(), 1);
}

#[test]
fn test_get_mut() {
    let mut table = DoubleKeyTable::new();
    table.insert("tall", "north", 1).unwrap();
    *table.get_mut(&"tall", &"north").unwrap() += 5;
    assert_eq!(table.get(&"tall", &"north"), Some(&6));
    assert_eq!(table.get_mut(&"tall", &"south"), None);
}

#[test]
fn test_contains_keys() {
    let mut table = DoubleKeyTable::new();
    table.insert("tall", "north", 1).unwrap();
    assert!(table.contains_keys(&"tall", &"north"));
    assert!(!table.contains_keys(&"tall", &"south"));
    assert!(!table.contains_keys(&"wide", &"north"));
}

#[test]
fn test_remove() {
    let mut table = DoubleKeyTable::new();
    table.insert("tall", "north", 1).unwrap();
    table.insert("tall", "south", 2).unwrap();

    assert_eq!(table.remove(&"tall", &"north"), Some(1));
    assert_eq!(table.remove(&"tall", &"north"), None);
    assert_eq!(table.remove(&"wide", &"north"), None);
    assert_eq!(table.get(&"tall", &"south"), Some(&2));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_removing_last_entry_drops_first_key() {
    let mut table = DoubleKeyTable::new();
    table.insert("tall", "north", 1).unwrap();
    table.insert("wide", "south", 2).unwrap();

    assert_eq!(table.remove(&"tall", &"north"), Some(1));
    assert_eq!(table.len(), 1);
    assert!(!table.contains_keys(&"tall", &"north"));
    // No residue of the emptied sub-table is observable.
    assert!(table.keys_of(&"tall").is_none());
    let keys: Vec<&&str> = table.keys().collect();
    assert_eq!(keys, [&"wide"]);
}

#[test]
fn test_inner_cluster_repair_preserves_neighbors() {
    // One first key; its sub-table clusters "a", "f" and "k" at slot 2
    // of a five-slot array that can never grow.
    let mut table =
        DoubleKeyTable::with_ladders_and_hashers(&[13], &[5], first_byte, first_byte);
    table.insert("peak", "a", 1).unwrap();
    table.insert("peak", "f", 2).unwrap();
    table.insert("peak", "k", 3).unwrap();

    // Removing the middle of the cluster must not strand the tail.
    assert_eq!(table.remove(&"peak", &"f"), Some(2));
    assert_eq!(table.get(&"peak", &"a"), Some(&1));
    assert_eq!(table.get(&"peak", &"k"), Some(&3));

    // And removing the head afterwards keeps the survivor reachable.
    assert_eq!(table.remove(&"peak", &"a"), Some(1));
    assert_eq!(table.get(&"peak", &"k"), Some(&3));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_first_level_collisions_probe_forward() {
    // Every first key lands on slot 0; the walk places them in arrival
    // order without mixing up their sub-tables.
    let mut table = DoubleKeyTable::with_ladders_and_hashers(&[7], &[5], clump, first_byte);
    table.insert("tall", "north", 1).unwrap();
    table.insert("wide", "north", 2).unwrap();
    table.insert("flat", "north", 3).unwrap();

    assert_eq!(table.get(&"tall", &"north"), Some(&1));
    assert_eq!(table.get(&"wide", &"north"), Some(&2));
    assert_eq!(table.get(&"flat", &"north"), Some(&3));
    let keys: Vec<&&str> = table.keys().collect();
    assert_eq!(keys, [&"tall", &"wide", &"flat"]);
}

#[test]
fn test_growth_on_tiny_ladder() {
    // Ladder [5, 13] at both levels; "a" and "f" collide at slot 2 of the
    // initial five-slot array, and the third distinct first key pushes the
    // population over 5 / 2.
    let mut table =
        DoubleKeyTable::with_ladders_and_hashers(&[5, 13], &[5, 13], first_byte, first_byte);
    table.insert("a", "x", 1).unwrap();
    table.insert("f", "y", 2).unwrap();
    assert_eq!(table.capacity(), 5);

    table.insert("k", "z", 3).unwrap();
    assert_eq!(table.capacity(), 13);
    assert_eq!(table.len(), 3);

    let mut keys: Vec<&&str> = table.keys().collect();
    keys.sort_unstable();
    assert_eq!(keys, [&"a", &"f", &"k"]);
    assert_eq!(table.get(&"a", &"x"), Some(&1));
    assert_eq!(table.get(&"f", &"y"), Some(&2));
    assert_eq!(table.get(&"k", &"z"), Some(&3));
}

#[test]
fn test_growth_moves_sub_tables_wholesale() {
    let mut table =
        DoubleKeyTable::with_ladders_and_hashers(&[5, 13], &[5, 13], first_byte, first_byte);
    // Three entries under one first key grow its sub-table to 13 slots.
    table.insert("a", "ash", 1).unwrap();
    table.insert("a", "birch", 2).unwrap();
    table.insert("a", "cedar", 3).unwrap();
    // Two more first keys push the outer array over threshold.
    table.insert("f", "ash", 4).unwrap();
    table.insert("k", "ash", 5).unwrap();
    assert_eq!(table.capacity(), 13);

    // The relocated sub-table kept all of its entries.
    assert_eq!(table.get(&"a", &"ash"), Some(&1));
    assert_eq!(table.get(&"a", &"birch"), Some(&2));
    assert_eq!(table.get(&"a", &"cedar"), Some(&3));
    assert_eq!(table.keys_of(&"a").unwrap().len(), 3);
    assert_eq!(table.get(&"f", &"ash"), Some(&4));
    assert_eq!(table.get(&"k", &"ash"), Some(&5));
}

#[test]
fn test_outer_full_on_single_rung_ladder() {
    let mut table =
        DoubleKeyTable::with_ladders_and_hashers(&[5], &[5], first_byte, first_byte);
    for (i, key1) in ["a", "b", "c", "d", "e"].into_iter().enumerate() {
        assert_eq!(table.insert(key1, "x", i as i32), Ok(None));
    }
    assert_eq!(table.len(), 5);

    let err = table.insert("f", "x", 99).unwrap_err();
    assert_eq!(
        err,
        InsertError {
            error: ErrorKind::OuterFull,
            keys: ("f", "x"),
            value: 99,
        }
    );
    // The failed insertion left the table untouched.
    assert_eq!(table.len(), 5);
    for (i, key1) in ["a", "b", "c", "d", "e"].into_iter().enumerate() {
        assert_eq!(table.get(&key1, &"x"), Some(&(i as i32)));
    }
}

#[test]
fn test_inner_full_on_single_rung_ladder() {
    let mut table =
        DoubleKeyTable::with_ladders_and_hashers(&[13], &[5], first_byte, first_byte);
    for (i, key2) in ["a", "b", "c", "d", "e"].into_iter().enumerate() {
        table.insert("peak", key2, i as i32).unwrap();
    }

    let err = table.insert("peak", "f", 99).unwrap_err();
    assert_eq!(err.error, ErrorKind::InnerFull);
    assert_eq!(err.keys, ("peak", "f"));
    assert_eq!(err.value, 99);
    // Saturation of one sub-table does not block others.
    assert_eq!(table.insert("crag", "f", 7), Ok(None));
    assert_eq!(table.len(), 2);
    assert_eq!(table.keys_of(&"peak").unwrap().len(), 5);
}

#[test]
fn test_overwrite_still_works_on_full_tables() {
    let mut table =
        DoubleKeyTable::with_ladders_and_hashers(&[5], &[5], first_byte, first_byte);
    for key1 in ["a", "b", "c", "d", "e"] {
        table.insert(key1, "x", 0).unwrap();
    }
    assert_eq!(table.insert("c", "x", 42), Ok(Some(0)));
    assert_eq!(table.get(&"c", &"x"), Some(&42));
}

#[test]
fn test_keys_follow_array_order() {
    // "c" hashes to slot 1 and "a" to slot 6 of a seven-slot array, so
    // enumeration order is independent of insertion order.
    let mut table = DoubleKeyTable::with_ladders_and_hashers(&[7], &[5], first_byte, first_byte);
    table.insert("a", "x", 1).unwrap();
    table.insert("c", "x", 2).unwrap();
    let keys: Vec<&&str> = table.keys().collect();
    assert_eq!(keys, [&"c", &"a"]);
    let values: Vec<&i32> = table.values().collect();
    assert_eq!(values, [&2, &1]);
}

#[test]
fn test_values_flatten_across_first_keys() {
    let mut table = DoubleKeyTable::new();
    table.insert("tall", "north", 1).unwrap();
    table.insert("tall", "south", 2).unwrap();
    table.insert("wide", "east", 3).unwrap();

    let mut values: Vec<i32> = table.values().copied().collect();
    values.sort_unstable();
    assert_eq!(values, [1, 2, 3]);
    assert_eq!(table.values().len(), 3);

    let mut scoped: Vec<i32> = table.values_of(&"tall").unwrap().copied().collect();
    scoped.sort_unstable();
    assert_eq!(scoped, [1, 2]);
    assert!(table.values_of(&"flat").is_none());
}

#[test]
fn test_iter_groups_entries_by_first_key() {
    let mut table = DoubleKeyTable::new();
    table.insert("tall", "north", 1).unwrap();
    table.insert("wide", "east", 3).unwrap();
    table.insert("tall", "south", 2).unwrap();

    let entries: Vec<(&&str, &&str, &i32)> = table.iter().collect();
    assert_eq!(entries.len(), 3);
    // Entries under one first key are adjacent in the walk.
    let tall_positions: Vec<usize> = entries
        .iter()
        .enumerate()
        .filter(|(_, (k1, _, _))| ***k1 == *"tall")
        .map(|(i, _)| i)
        .collect();
    assert_eq!(tall_positions[1] - tall_positions[0], 1);
}

#[test]
fn test_key_cursor_walks_snapshot() {
    let mut table = DoubleKeyTable::new();
    table.insert("tall", "north", 1).unwrap();
    table.insert("wide", "south", 2).unwrap();

    let mut cursor = table.key_cursor();
    let mut seen = Vec::new();
    while let Some(key) = cursor.next(&table).unwrap() {
        seen.push(key);
    }
    let expected: Vec<&str> = table.keys().copied().collect();
    assert_eq!(seen, expected);
    // A finished cursor stays finished.
    assert_eq!(cursor.next(&table), Ok(None));
}

#[test]
fn test_key_cursor_fails_fast_on_insert() {
    let mut table = DoubleKeyTable::new();
    table.insert("tall", "north", 1).unwrap();

    let mut cursor = table.key_cursor();
    table.insert("wide", "south", 2).unwrap();
    assert_eq!(cursor.next(&table), Err(Invalidated));
}

#[test]
fn test_key_cursor_ignores_value_overwrites() {
    let mut table = DoubleKeyTable::new();
    table.insert("tall", "north", 1).unwrap();

    // Overwriting a value changes no key listing; the key cursor keeps
    // going while a value cursor trips.
    let mut keys = table.key_cursor();
    let mut values = table.value_cursor();
    table.insert("tall", "north", 99).unwrap();
    assert_eq!(keys.next(&table), Ok(Some("tall")));
    assert_eq!(values.next(&table), Err(Invalidated));
}

#[test]
fn test_scoped_cursors_fail_fast() {
    let mut table = DoubleKeyTable::new();
    table.insert("tall", "north", 1).unwrap();
    table.insert("tall", "south", 2).unwrap();

    let mut cursor = table.key_cursor_of(&"tall").unwrap();
    assert!(cursor.next(&table).unwrap().is_some());
    table.remove(&"tall", &"south");
    assert_eq!(cursor.next(&table), Err(Invalidated));

    // Removing the scoped first key entirely also invalidates.
    let mut table = DoubleKeyTable::new();
    table.insert("tall", "north", 1).unwrap();
    let mut cursor = table.value_cursor_of(&"tall").unwrap();
    table.remove(&"tall", &"north");
    assert_eq!(cursor.next(&table), Err(Invalidated));

    assert!(table.key_cursor_of(&"flat").is_none());
    assert!(table.value_cursor_of(&"flat").is_none());
}

#[test]
fn test_value_cursor_walks_snapshot() {
    let mut table = DoubleKeyTable::new();
    table.insert("tall", "north", 1).unwrap();
    table.insert("tall", "south", 2).unwrap();
    table.insert("wide", "east", 3).unwrap();

    let mut cursor = table.value_cursor();
    let mut seen = Vec::new();
    while let Some(value) = cursor.next(&table).unwrap() {
        seen.push(value);
    }
    seen.sort_unstable();
    assert_eq!(seen, [1, 2, 3]);
}

#[test]
fn test_default_ladder_climbs_under_load() {
    let mut table = DoubleKeyTable::new();
    let names: Vec<String> = (0..40).map(|i| std::format!("peak-{}", i)).collect();
    for (i, name) in names.iter().enumerate() {
        table.insert(name.clone(), "summit".to_string(), i).unwrap();
    }
    assert_eq!(table.len(), 40);
    assert!(table.capacity() > 40 * 2 - 1);
    for (i, name) in names.iter().enumerate() {
        assert_eq!(table.get(name, &"summit".to_string()), Some(&i));
    }
}

#[test]
fn test_index_and_index_panic() {
    let mut table = DoubleKeyTable::new();
    table.insert("tall", "north", 7).unwrap();
    assert_eq!(table[(&"tall", &"north")], 7);
}

#[test]
#[should_panic(expected = "no entry found for key pair")]
fn test_index_missing_pair_panics() {
    let table: DoubleKeyTable<&str, &str, i32> = DoubleKeyTable::new();
    let _ = table[(&"tall", &"north")];
}

#[test]
fn test_from_array_and_extend() {
    let mut table = DoubleKeyTable::from([
        ("tall", "north", 1),
        ("tall", "south", 2),
        ("wide", "east", 3),
    ]);
    assert_eq!(table.len(), 2);

    table.extend([("flat", "west", 4)]);
    assert_eq!(table.get(&"flat", &"west"), Some(&4));
    assert_eq!(table.len(), 3);
}

#[test]
fn test_eq_ignores_layout_and_ladders() {
    let mut left = DoubleKeyTable::new();
    let mut right =
        DoubleKeyTable::with_ladders_and_hashers(&[7, 29], &[5], first_byte, first_byte);
    for (k1, k2, v) in [("a", "x", 1), ("a", "y", 2), ("c", "x", 3)] {
        left.insert(k1, k2, v).unwrap();
        right.insert(k1, k2, v).unwrap();
    }
    assert_eq!(left, right);
    right.insert("d", "x", 4).unwrap();
    assert_ne!(left, right);
}

#[test]
fn test_clone_is_independent() {
    let mut table = DoubleKeyTable::new();
    table.insert("tall", "north", 1).unwrap();
    let mut copy = table.clone();
    copy.insert("wide", "south", 2).unwrap();
    copy.remove(&"tall", &"north");

    assert_eq!(table.get(&"tall", &"north"), Some(&1));
    assert_eq!(table.len(), 1);
    assert_eq!(copy.len(), 1);
    assert_eq!(copy.get(&"wide", &"south"), Some(&2));
}

#[test]
fn test_debug_output_lists_key_pairs() {
    let mut table = DoubleKeyTable::new();
    table.insert("tall", "north", 1).unwrap();
    let rendered = std::format!("{:?}", table);
    assert_eq!(rendered, "{(\"tall\", \"north\"): 1}");
}

#[test]
fn test_random_churn_against_model() {
    // Random inserts, overwrites and removals over a small key universe,
    // mirrored against std's HashMap. Removals keep at least one entry
    // under each first key so only the second-level deletion machinery is
    // exercised here; full sub-table drains are pinned by the
    // deterministic tests above.
    let firsts = ["ash", "birch", "cedar", "fir", "hazel", "larch"];
    let seconds = ["n", "s", "e", "w", "ne", "nw", "se", "sw"];
    let mut rng = thread_rng();

    let mut table: DoubleKeyTable<String, String, u32> =
        DoubleKeyTable::with_ladders(&[5, 13, 29], &[5, 13, 29]);
    let mut model: HashMap<(String, String), u32> = HashMap::new();

    for step in 0..2000 {
        let key1 = firsts[rng.gen_range(0..firsts.len())].to_string();
        let key2 = seconds[rng.gen_range(0..seconds.len())].to_string();
        match rng.gen_range(0..3) {
            0 | 1 => {
                let value = rng.gen_range(0..1000);
                let previous = table.insert(key1.clone(), key2.clone(), value).unwrap();
                assert_eq!(previous, model.insert((key1, key2), value));
            }
            _ => {
                let pair = (key1.clone(), key2.clone());
                let under = model.keys().filter(|(k1, _)| *k1 == key1).count();
                if model.contains_key(&pair) && under < 2 {
                    continue;
                }
                assert_eq!(table.remove(&key1, &key2), model.remove(&pair));
            }
        }

        if step % 100 == 0 {
            let distinct: std::collections::HashSet<&String> =
                model.keys().map(|(k1, _)| k1).collect();
            assert_eq!(table.len(), distinct.len());
            for ((k1, k2), value) in &model {
                assert_eq!(table.get(k1, k2), Some(value));
            }
        }
    }

    for ((k1, k2), value) in &model {
        assert_eq!(table.get(k1, k2), Some(value));
    }
}
