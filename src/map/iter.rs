use super::*;

/// An iterator over the entries of a `DoubleKeyTable` in array order.
/// The iterator element type is `(&'a K1, &'a K2, &'a V)`.
///
/// The walk visits first-level slots front to back and, inside each, the
/// owning table's slots front to back; entries sharing a first key are
/// therefore always adjacent.
///
/// This `struct` is created by the [`iter`](DoubleKeyTable::iter) method
/// on [`DoubleKeyTable`]. See its documentation for more.
///
/// # Example
///
/// ```
/// use double_key_table::DoubleKeyTable;
///
/// let mut table = DoubleKeyTable::new();
/// table.insert("tall", "north", 1).unwrap();
/// table.insert("tall", "south", 2).unwrap();
/// table.insert("wide", "north", 3).unwrap();
///
/// let mut entries: Vec<(&&str, &&str, &i32)> = table.iter().collect();
/// entries.sort_unstable();
/// assert_eq!(
///     entries,
///     [(&"tall", &"north", &1), (&"tall", &"south", &2), (&"wide", &"north", &3)]
/// );
/// ```
pub struct Iter<'a, K1, K2, V> {
    pub(super) outer: slice::Iter<'a, Option<(K1, LinearProbeTable<K2, V>)>>,
    pub(super) current: Option<(&'a K1, linear_probe::Iter<'a, K2, V>)>,
    pub(super) remaining: usize,
}

impl<K1, K2, V> Clone for Iter<'_, K1, K2, V> {
    #[cfg_attr(feature = "inline-more", inline)]
    fn clone(&self) -> Self {
        Iter {
            outer: self.outer.clone(),
            current: self.current.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K1: Debug, K2: Debug, V: Debug> fmt::Debug for Iter<'_, K1, K2, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K1, K2, V> Iterator for Iter<'a, K1, K2, V> {
    type Item = (&'a K1, &'a K2, &'a V);

    fn next(&mut self) -> Option<(&'a K1, &'a K2, &'a V)> {
        loop {
            if let Some((key1, entries)) = &mut self.current {
                if let Some((key2, value)) = entries.next() {
                    self.remaining -= 1;
                    return Some((*key1, key2, value));
                }
                self.current = None;
            }
            match self.outer.next()? {
                Some((key1, inner)) => self.current = Some((key1, inner.iter())),
                None => {}
            }
        }
    }

    #[cfg_attr(feature = "inline-more", inline)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K1, K2, V> ExactSizeIterator for Iter<'_, K1, K2, V> {
    #[cfg_attr(feature = "inline-more", inline)]
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K1, K2, V> FusedIterator for Iter<'_, K1, K2, V> {}
