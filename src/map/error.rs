use super::*;
use core::fmt::{self, Debug};

/// A view into the reason an [`insert`](DoubleKeyTable::insert) call could
/// not resolve a slot. It is part of the [`InsertError`] structure.
///
/// Either level of the table can saturate independently: the first-level
/// array may run out of slots for new first keys, or the table owned by one
/// first key may run out of slots for new second keys. Both only happen
/// once the affected table sits at the final rung of its size ladder.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The first-level table is at its final ladder rung and every slot is
    /// occupied by some other first key.
    OuterFull,
    /// The second-level table owned by the given first key is at its final
    /// ladder rung and every slot is occupied by some other second key.
    InnerFull,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let error_txt = match *self {
            ErrorKind::OuterFull => "first-level table is full",
            ErrorKind::InnerFull => "second-level table is full",
        };
        write!(f, "{}", error_txt)
    }
}

/// The error returned by [`insert`](DoubleKeyTable::insert) when a table at
/// its final ladder rung cannot accept another entry. For more information
/// about error kinds look at the [`ErrorKind`] enum.
///
/// Contains the [`ErrorKind`] enum, the provided keys and value that were
/// not inserted. These returned keys and value can be used for another
/// purpose. The table itself is left exactly as it was before the call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsertError<K1, K2, V> {
    /// A view into the reason the insertion failed. For more information
    /// about error kinds look at the [`ErrorKind`] enum.
    pub error: ErrorKind,
    /// The provided keys that were returned because of the error.
    pub keys: (K1, K2),
    /// The value which was not inserted because of the error.
    pub value: V,
}

impl<K1: Debug, K2: Debug, V: Debug> fmt::Display for InsertError<K1, K2, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let &(ref key1, ref key2) = &self.keys;
        match self.error {
            ErrorKind::OuterFull => write!(
                f,
                "failed to insert {:?}: no free first-level slot for key1 = {:?} (key2 = {:?})",
                self.value, key1, key2
            ),
            ErrorKind::InnerFull => write!(
                f,
                "failed to insert {:?}: the table under key1 = {:?} has no free slot for key2 = {:?}",
                self.value, key1, key2
            ),
        }
    }
}

/// The error returned by a cursor's `next` method when the table was
/// mutated after the cursor took its snapshot.
///
/// A cursor re-derives its enumeration from the table on every step and
/// compares it against the snapshot; the first divergence terminates the
/// enumeration with this error rather than serving stale or partial data.
/// See [`KeyCursor`](crate::dk_table::KeyCursor) and its siblings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Invalidated;

impl fmt::Display for Invalidated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "enumeration invalidated: the table was modified")
    }
}
