use super::{FullError, LinearProbeTable, ProbeError};
use std::vec::Vec;

// Pins every key to the same starting slot so the tests below control
// cluster shape exactly.
fn clump(_key: &&str, _capacity: usize) -> usize {
    0
}

fn first_byte(key: &&str, capacity: usize) -> usize {
    key.as_bytes().first().map_or(0, |&b| b as usize) % capacity
}

#[test]
fn test_set_and_get() {
    let mut table = LinearProbeTable::new();
    assert_eq!(table.len(), 0);
    assert_eq!(table.set("alpha", 1), Ok(None));
    assert_eq!(table.set("bravo", 2), Ok(None));
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(&"alpha"), Some(&1));
    assert_eq!(table.get(&"bravo"), Some(&2));
    assert_eq!(table.get(&"charlie"), None);
}

#[test]
fn test_overwrite_returns_previous_value() {
    let mut table = LinearProbeTable::new();
    assert_eq!(table.set("alpha", 1), Ok(None));
    assert_eq!(table.set("alpha", 2), Ok(Some(1)));
    assert_eq!(table.get(&"alpha"), Some(&2));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_get_mut() {
    let mut table = LinearProbeTable::new();
    table.set("alpha", 1).unwrap();
    *table.get_mut(&"alpha").unwrap() += 10;
    assert_eq!(table.get(&"alpha"), Some(&11));
    assert_eq!(table.get_mut(&"missing"), None);
}

#[test]
fn test_contains_key() {
    let mut table = LinearProbeTable::new();
    table.set("alpha", 1).unwrap();
    assert!(table.contains_key(&"alpha"));
    assert!(!table.contains_key(&"bravo"));
}

#[test]
fn test_remove() {
    let mut table = LinearProbeTable::new();
    table.set("alpha", 1).unwrap();
    table.set("bravo", 2).unwrap();
    assert_eq!(table.remove(&"alpha"), Some(1));
    assert_eq!(table.remove(&"alpha"), None);
    assert_eq!(table.len(), 1);
    assert!(!table.contains_key(&"alpha"));
    assert_eq!(table.get(&"bravo"), Some(&2));
}

#[test]
fn test_locate_semantics() {
    let mut table: LinearProbeTable<&str, i32> =
        LinearProbeTable::with_ladder_and_hasher(&[5], clump);
    assert_eq!(table.locate(&"a", false), Err(ProbeError::NotFound));
    assert_eq!(table.locate(&"a", true), Ok(0));

    table.set("a", 1).unwrap();
    table.set("b", 2).unwrap();
    // "b" collided at slot 0 and moved on to slot 1.
    assert_eq!(table.locate(&"a", false), Ok(0));
    assert_eq!(table.locate(&"b", false), Ok(1));
    assert_eq!(table.locate(&"c", true), Ok(2));

    for key in ["c", "d", "e"] {
        table.set(key, 0).unwrap();
    }
    assert_eq!(table.locate(&"f", true), Err(ProbeError::Full));
    assert_eq!(table.locate(&"f", false), Err(ProbeError::NotFound));
}

#[test]
fn test_cluster_repair_after_removing_cluster_head() {
    let mut table = LinearProbeTable::with_ladder_and_hasher(&[7], clump);
    table.set("a", 1).unwrap();
    table.set("b", 2).unwrap();
    table.set("c", 3).unwrap();
    // Cluster occupies slots 0..=2. Removing the head must not strand the
    // entries probed past it.
    assert_eq!(table.remove(&"a"), Some(1));
    assert_eq!(table.get(&"b"), Some(&2));
    assert_eq!(table.get(&"c"), Some(&3));
    assert_eq!(table.locate(&"b", false), Ok(0));
    assert_eq!(table.locate(&"c", false), Ok(1));
}

#[test]
fn test_cluster_repair_after_removing_cluster_middle() {
    let mut table = LinearProbeTable::with_ladder_and_hasher(&[7], clump);
    for (key, value) in [("a", 1), ("b", 2), ("c", 3), ("d", 4)] {
        table.set(key, value).unwrap();
    }
    assert_eq!(table.remove(&"b"), Some(2));
    assert_eq!(table.get(&"a"), Some(&1));
    assert_eq!(table.get(&"c"), Some(&3));
    assert_eq!(table.get(&"d"), Some(&4));
    // The survivors slid back over the hole.
    assert_eq!(table.locate(&"c", false), Ok(1));
    assert_eq!(table.locate(&"d", false), Ok(2));
}

#[test]
fn test_repair_leaves_unrelated_clusters_alone() {
    let mut table = LinearProbeTable::with_ladder_and_hasher(&[7], first_byte);
    // "h" and "a" both start at slot 6 and form one cluster across the
    // wrap; "c" (slot 1) sits apart from it.
    table.set("h", 10).unwrap();
    table.set("a", 20).unwrap();
    table.set("c", 30).unwrap();
    assert_eq!(table.remove(&"h"), Some(10));
    assert_eq!(table.get(&"a"), Some(&20));
    assert_eq!(table.get(&"c"), Some(&30));
    assert_eq!(table.locate(&"a", false), Ok(6));
    assert_eq!(table.locate(&"c", false), Ok(1));
}

#[test]
fn test_growth_climbs_ladder_and_rehashes() {
    let mut table: LinearProbeTable<&str, i32> = LinearProbeTable::with_ladder(&[5, 13]);
    assert_eq!(table.capacity(), 5);
    table.set("one", 1).unwrap();
    table.set("two", 2).unwrap();
    assert_eq!(table.capacity(), 5);
    // Third entry crosses 5 / 2 and forces the climb.
    table.set("three", 3).unwrap();
    assert_eq!(table.capacity(), 13);
    assert_eq!(table.len(), 3);
    for (key, value) in [("one", 1), ("two", 2), ("three", 3)] {
        assert_eq!(table.get(&key), Some(&value));
        // Every entry sits where a fresh probe at the new capacity says.
        assert_eq!(table.locate(&key, false), Ok(table.locate(&key, true).unwrap()));
    }
}

#[test]
fn test_growth_advances_rung_by_rung() {
    let mut table: LinearProbeTable<&str, i32> =
        LinearProbeTable::with_ladder_and_hasher(&[5, 7, 29], clump);
    table.set("a", 1).unwrap();
    table.set("b", 2).unwrap();
    assert_eq!(table.capacity(), 5);
    // 3 > 5 / 2 moves to 7; 3 does not exceed 7 / 2, so the climb stops.
    table.set("c", 3).unwrap();
    assert_eq!(table.capacity(), 7);
    // 4 > 7 / 2 moves on to the final rung.
    table.set("d", 4).unwrap();
    assert_eq!(table.capacity(), 29);
    assert_eq!(table.len(), 4);
    for (key, value) in [("a", 1), ("b", 2), ("c", 3), ("d", 4)] {
        assert_eq!(table.get(&key), Some(&value));
    }
}

#[test]
fn test_final_rung_fills_to_capacity_then_errors() {
    let mut table = LinearProbeTable::with_ladder_and_hasher(&[5], first_byte);
    for (key, value) in [("a", 1), ("b", 2), ("c", 3), ("d", 4), ("e", 5)] {
        assert_eq!(table.set(key, value), Ok(None));
    }
    assert_eq!(table.len(), 5);
    assert_eq!(table.capacity(), 5);

    let err = table.set("f", 6).unwrap_err();
    assert_eq!(err, FullError { key: "f", value: 6 });
    // Overwrites still work on a full table.
    assert_eq!(table.set("c", 33), Ok(Some(3)));
    assert_eq!(table.len(), 5);
}

#[test]
fn test_keys_and_values_follow_array_order() {
    let mut table = LinearProbeTable::with_ladder_and_hasher(&[7], first_byte);
    // "c" -> slot 1, "a" -> slot 6; insertion order is the other way round.
    table.set("a", 10).unwrap();
    table.set("c", 30).unwrap();
    let keys: Vec<&&str> = table.keys().collect();
    assert_eq!(keys, [&"c", &"a"]);
    let values: Vec<&i32> = table.values().collect();
    assert_eq!(values, [&30, &10]);
}

#[test]
fn test_iter_is_exact_size_and_fused() {
    let mut table = LinearProbeTable::new();
    table.set("alpha", 1).unwrap();
    table.set("bravo", 2).unwrap();
    let mut iter = table.iter();
    assert_eq!(iter.len(), 2);
    assert!(iter.next().is_some());
    assert_eq!(iter.len(), 1);
    assert!(iter.next().is_some());
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
}

#[test]
fn test_custom_hasher_is_used() {
    let mut table = LinearProbeTable::with_ladder_and_hasher(&[7], first_byte);
    table.set("boulder", 1).unwrap();
    assert_eq!(table.locate(&"boulder", false), Ok((b'b' as usize) % 7));
    assert_eq!(table.hasher()(&"boulder", 7), (b'b' as usize) % 7);
}

#[test]
fn test_default_hash_recomputes_after_growth() {
    let mut table: LinearProbeTable<&str, u32> = LinearProbeTable::with_ladder(&[5, 13, 29]);
    let words = [
        "ash", "birch", "cedar", "fir", "hazel", "larch", "maple", "oak", "pine", "rowan",
    ];
    for (i, word) in words.iter().enumerate() {
        table.set(word, i as u32).unwrap();
    }
    assert_eq!(table.capacity(), 29);
    assert_eq!(table.len(), words.len());
    for (i, word) in words.iter().enumerate() {
        assert_eq!(table.get(word), Some(&(i as u32)));
        // A fresh probe at the new capacity resolves to an occupied slot.
        assert!(table.locate(word, false).is_ok());
    }
}

#[test]
fn test_clone_is_independent() {
    let mut table = LinearProbeTable::new();
    table.set("alpha", 1).unwrap();
    let mut copy = table.clone();
    copy.set("bravo", 2).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(copy.len(), 2);
    assert_eq!(table.get(&"bravo"), None);
}

#[test]
fn test_eq_ignores_array_layout() {
    let mut left = LinearProbeTable::with_ladder_and_hasher(&[7], first_byte);
    let mut right = LinearProbeTable::with_ladder_and_hasher(&[7], clump);
    for (key, value) in [("a", 1), ("b", 2), ("c", 3)] {
        left.set(key, value).unwrap();
        right.set(key, value).unwrap();
    }
    // Same contents, different slot layouts and hash functions.
    assert_eq!(left, right);
    right.set("d", 4).unwrap();
    assert_ne!(left, right);
}

#[test]
fn test_empty_and_default() {
    let table: LinearProbeTable<&str, i32> = LinearProbeTable::default();
    assert!(table.is_empty());
    assert_eq!(table.iter().next(), None);
    assert_eq!(table.keys().next(), None);
    assert_eq!(table.values().next(), None);
}

#[test]
#[should_panic(expected = "strictly ascending")]
fn test_bad_ladder_panics() {
    let _table: LinearProbeTable<&str, i32> = LinearProbeTable::with_ladder(&[13, 5]);
}
