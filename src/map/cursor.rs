use super::*;

/// A one-shot forward cursor over a snapshot of a table's first-level keys.
///
/// Created by [`key_cursor`](DoubleKeyTable::key_cursor). The cursor owns a
/// snapshot taken at construction and borrows nothing, so the table stays
/// free to mutate between steps; each [`next`](KeyCursor::next) call hands
/// the table back in, re-derives the key listing, and compares it against
/// the snapshot. The first divergence ends the enumeration with
/// [`Invalidated`] — a cursor never serves stale or partial data.
///
/// # Example
///
/// ```
/// use double_key_table::dk_table::Invalidated;
/// use double_key_table::DoubleKeyTable;
///
/// let mut table = DoubleKeyTable::new();
/// table.insert("tall", "north", 1).unwrap();
///
/// let mut cursor = table.key_cursor();
/// assert_eq!(cursor.next(&table), Ok(Some("tall")));
/// assert_eq!(cursor.next(&table), Ok(None));
///
/// // Any structural change is detected on the next step.
/// let mut cursor = table.key_cursor();
/// table.insert("wide", "south", 2).unwrap();
/// assert_eq!(cursor.next(&table), Err(Invalidated));
/// ```
pub struct KeyCursor<K1> {
    pub(super) snapshot: Vec<K1>,
    pub(super) index: usize,
}

impl<K1: Eq + Clone> KeyCursor<K1> {
    /// Yields the next first-level key of the snapshot, or `Ok(None)` once
    /// the snapshot is exhausted.
    ///
    /// Fails with [`Invalidated`] if the table's key listing no longer
    /// matches the snapshot.
    pub fn next<K2: Eq, V>(
        &mut self,
        table: &DoubleKeyTable<K1, K2, V>,
    ) -> Result<Option<K1>, Invalidated> {
        if !table.keys().eq(self.snapshot.iter()) {
            return Err(Invalidated);
        }
        let item = self.snapshot.get(self.index).cloned();
        if item.is_some() {
            self.index += 1;
        }
        Ok(item)
    }
}

/// A one-shot forward cursor over a snapshot of the second-level keys under
/// one first-level key.
///
/// Created by [`key_cursor_of`](DoubleKeyTable::key_cursor_of). Behaves
/// like [`KeyCursor`]; removing the scoped first key entirely counts as a
/// structural change and invalidates the cursor.
pub struct InnerKeyCursor<K1, K2> {
    pub(super) key1: K1,
    pub(super) snapshot: Vec<K2>,
    pub(super) index: usize,
}

impl<K1: Eq, K2: Eq + Clone> InnerKeyCursor<K1, K2> {
    /// Yields the next second-level key of the snapshot, or `Ok(None)` once
    /// the snapshot is exhausted.
    ///
    /// Fails with [`Invalidated`] if the scoped key listing changed or the
    /// first key vanished.
    pub fn next<V>(
        &mut self,
        table: &DoubleKeyTable<K1, K2, V>,
    ) -> Result<Option<K2>, Invalidated> {
        let fresh = match table.keys_of(&self.key1) {
            Some(keys) => keys,
            None => return Err(Invalidated),
        };
        if !fresh.eq(self.snapshot.iter()) {
            return Err(Invalidated);
        }
        let item = self.snapshot.get(self.index).cloned();
        if item.is_some() {
            self.index += 1;
        }
        Ok(item)
    }
}

/// A one-shot forward cursor over a snapshot of every value in the table.
///
/// Created by [`value_cursor`](DoubleKeyTable::value_cursor). Behaves like
/// [`KeyCursor`]; note that overwriting a value is a change the *value*
/// cursor detects while a key cursor does not, since the key listing is
/// unaffected.
pub struct ValueCursor<V> {
    pub(super) snapshot: Vec<V>,
    pub(super) index: usize,
}

impl<V: Clone + PartialEq> ValueCursor<V> {
    /// Yields the next value of the snapshot, or `Ok(None)` once the
    /// snapshot is exhausted.
    ///
    /// Fails with [`Invalidated`] if the table's value listing no longer
    /// matches the snapshot.
    pub fn next<K1: Eq, K2: Eq>(
        &mut self,
        table: &DoubleKeyTable<K1, K2, V>,
    ) -> Result<Option<V>, Invalidated> {
        if !table.values().eq(self.snapshot.iter()) {
            return Err(Invalidated);
        }
        let item = self.snapshot.get(self.index).cloned();
        if item.is_some() {
            self.index += 1;
        }
        Ok(item)
    }
}

/// A one-shot forward cursor over a snapshot of the values under one
/// first-level key.
///
/// Created by [`value_cursor_of`](DoubleKeyTable::value_cursor_of).
pub struct InnerValueCursor<K1, V> {
    pub(super) key1: K1,
    pub(super) snapshot: Vec<V>,
    pub(super) index: usize,
}

impl<K1: Eq, V: Clone + PartialEq> InnerValueCursor<K1, V> {
    /// Yields the next value of the snapshot, or `Ok(None)` once the
    /// snapshot is exhausted.
    ///
    /// Fails with [`Invalidated`] if the scoped value listing changed or
    /// the first key vanished.
    pub fn next<K2: Eq>(
        &mut self,
        table: &DoubleKeyTable<K1, K2, V>,
    ) -> Result<Option<V>, Invalidated> {
        let fresh = match table.values_of(&self.key1) {
            Some(values) => values,
            None => return Err(Invalidated),
        };
        if !fresh.eq(self.snapshot.iter()) {
            return Err(Invalidated);
        }
        let item = self.snapshot.get(self.index).cloned();
        if item.is_some() {
            self.index += 1;
        }
        Ok(item)
    }
}
