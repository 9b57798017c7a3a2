//! Double key table
//!
//! **`This crate provides a hash table addressed by a pair of keys, built
//! from two levels of linear probing.`**
//!
//! Sometimes data is naturally addressed by two keys at once: a mountain
//! and one of its trails, a host and one of its ports, a namespace and a
//! name inside it. Storing such data in a flat map keyed by the pair makes
//! "everything under this first key" an `O(n)` scan over the whole map.
//!
//! This crate resolves that with a [`DoubleKeyTable`] — a two-level
//! structure where an outer open-addressing array maps each first key to a
//! private [`LinearProbeTable`] of its second keys. Lookups walk two short
//! probe sequences, and the entries under one first key can be listed
//! without touching any other.
//!
//! Both levels use classic linear probing over a fixed ladder of
//! capacities, with capacity-dependent polynomial hashing over the key's
//! characters. Each level grows independently once it is more than half
//! full; removals repair their probe cluster so no neighbor is ever
//! stranded behind a vacated slot.
//!
//! [`LinearProbeTable`] is exported on its own and works as a standalone
//! single-key hash table with the same probing discipline.
//!
//! # Examples
//!
//! ```
//! use double_key_table::DoubleKeyTable;
//!
//! let mut table = DoubleKeyTable::new();
//! table.insert("kosciuszko", "main range", 22).unwrap();
//! table.insert("kosciuszko", "summit walk", 18).unwrap();
//! table.insert("townsend", "summit walk", 25).unwrap();
//!
//! assert_eq!(table.get(&"kosciuszko", &"summit walk"), Some(&18));
//!
//! // Two first-level keys, three entries overall.
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.iter().len(), 3);
//!
//! let mut trails: Vec<_> = table.keys_of(&"kosciuszko").unwrap().collect();
//! trails.sort_unstable();
//! assert_eq!(trails, [&"main range", &"summit walk"]);
//! ```

#![no_std]
#![allow(clippy::manual_map)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rustdoc::broken_intra_doc_links)]

#[cfg(test)]
#[macro_use]
extern crate std;

#[cfg_attr(test, macro_use)]
extern crate alloc;

#[macro_use]
mod macros;

pub mod hashing;
pub mod linear_probe;

mod external_trait_impls;

#[allow(missing_docs)]
mod map;

pub mod dk_table {
    //! A hash table addressed by a pair of keys, with linear probing at
    //! both levels.
    #![allow(missing_docs)]
    pub use crate::map::*;
}

pub use crate::linear_probe::LinearProbeTable;
pub use crate::map::DoubleKeyTable;
