//! Capacity-dependent hashing primitives shared by both table levels.
//!
//! Every table in this crate carries its hash function as a plain function
//! pointer of type [`HashFn`]. The function receives the table's *current*
//! capacity together with the key, so a table that has just grown hashes
//! against its new capacity without any rebinding step: the capacity travels
//! with the call, not with the function.

/// A hash function for one table level.
///
/// The second argument is the capacity of the table the key is being hashed
/// for; the returned slot index must be strictly below it. Implementations
/// must be deterministic, and equal keys must hash equally for every
/// capacity.
pub type HashFn<K> = fn(&K, usize) -> usize;

/// The capacity ladder used by both table levels unless a custom one is
/// supplied at construction.
///
/// A table starts at the first rung and climbs one or more rungs each time
/// its occupancy crosses half of its capacity. Once the final rung is
/// reached the table stops growing and accepts entries until it is
/// completely full.
pub const DEFAULT_TABLE_SIZES: &[usize] = &[
    5, 13, 29, 53, 97, 193, 389, 769, 1543, 3079, 6151, 12289, 24593, 49157, 98317, 196613,
    393241, 786433, 1572869,
];

/// Multiplier applied to the moving coefficient after every character.
const HASH_BASE: u64 = 31;

/// Initial value of the moving coefficient.
const HASH_SEED: u64 = 31415;

/// Largest capacity a ladder rung may hold. Keeps the intermediate products
/// of [`polynomial_hash`] within `u64`.
pub(crate) const MAX_TABLE_SIZE: usize = 1 << 31;

/// Polynomial string hash with a moving multiplier.
///
/// Walks the key's characters, folding each code point into the running
/// value modulo `capacity` while the multiplier itself advances modulo
/// `capacity - 1`. The result therefore depends on the capacity it was
/// computed for; a table must rehash every key when its capacity changes.
///
/// `capacity` must be at least 2 (the multiplier recurrence divides by
/// `capacity - 1`); the ladder validation performed by every constructor
/// guarantees this for table-owned calls.
///
/// # Examples
///
/// ```
/// use double_key_table::hashing::polynomial_hash;
///
/// // The same key lands on different slots at different capacities.
/// assert_eq!(polynomial_hash("ab", 13), 11);
/// assert_ne!(polynomial_hash("ab", 13), polynomial_hash("ab", 29) % 13);
/// ```
#[cfg_attr(feature = "inline-more", inline)]
pub fn polynomial_hash<K: AsRef<str> + ?Sized>(key: &K, capacity: usize) -> usize {
    debug_assert!(capacity >= 2);
    let capacity = capacity as u64;
    let mut value: u64 = 0;
    let mut a = HASH_SEED;
    for c in key.as_ref().chars() {
        value = (c as u64 + a * value) % capacity;
        a = (a * HASH_BASE) % (capacity - 1);
    }
    value as usize
}

/// Checks that a capacity ladder is usable: non-empty, strictly ascending,
/// starting at 2 or more, with every rung below [`MAX_TABLE_SIZE`].
///
/// Called from every constructor; the panic messages name the violated
/// rule so a bad ladder fails loudly at construction instead of corrupting
/// probe arithmetic later.
pub(crate) fn validate_ladder(sizes: &[usize]) {
    assert!(!sizes.is_empty(), "size ladder must have at least one rung");
    assert!(
        sizes[0] >= 2,
        "size ladder rungs must be at least 2, got {}",
        sizes[0]
    );
    for pair in sizes.windows(2) {
        assert!(
            pair[0] < pair[1],
            "size ladder must be strictly ascending: {} is not below {}",
            pair[0],
            pair[1]
        );
    }
    let last = sizes[sizes.len() - 1];
    assert!(
        last < MAX_TABLE_SIZE,
        "size ladder rung {} exceeds the supported maximum",
        last
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_matches_hand_computed_values() {
        // "a": 97 % 13
        assert_eq!(polynomial_hash("a", 13), 6);
        // "ab": value = 97 % 13 = 6, a = (31415 * 31) % 12 = 5,
        // then (98 + 5 * 6) % 13 = 11.
        assert_eq!(polynomial_hash("ab", 13), 11);
        assert_eq!(polynomial_hash("", 13), 0);
    }

    #[test]
    fn hash_is_capacity_bound() {
        for capacity in [2, 3, 5, 13, 97, 1543] {
            for key in ["", "a", "ab", "linear probing", "日本語"] {
                assert!(polynomial_hash(key, capacity) < capacity);
            }
        }
    }

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(
            polynomial_hash("mountain", 769),
            polynomial_hash("mountain", 769)
        );
    }

    #[test]
    fn default_ladder_is_valid() {
        validate_ladder(DEFAULT_TABLE_SIZES);
    }

    #[test]
    #[should_panic(expected = "strictly ascending")]
    fn descending_ladder_is_rejected() {
        validate_ladder(&[13, 5]);
    }

    #[test]
    #[should_panic(expected = "at least 2")]
    fn degenerate_rung_is_rejected() {
        validate_ladder(&[1, 5]);
    }

    #[test]
    #[should_panic(expected = "at least one rung")]
    fn empty_ladder_is_rejected() {
        validate_ladder(&[]);
    }
}
