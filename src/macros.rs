/// Creates a [`DoubleKeyTable`](crate::DoubleKeyTable) from a list of
/// `key1, key2 => value` triples.
///
/// The table is built with the default ladders and hashing, so both key
/// types must implement `AsRef<str>`.
///
/// # Panics
///
/// Panics if a size ladder saturates while inserting (not reachable with
/// the default ladders at any realistic literal count).
///
/// # Examples
///
/// ```
/// use double_key_table::dktable;
///
/// let table = dktable! {
///     "kosciuszko", "summit" => 2228,
///     "kosciuszko", "lakes" => 2100,
///     "townsend", "summit" => 2209,
/// };
///
/// assert_eq!(table.get(&"kosciuszko", &"lakes"), Some(&2100));
/// assert_eq!(table.len(), 2);
/// ```
#[macro_export]
macro_rules! dktable {
    () => {
        $crate::DoubleKeyTable::new()
    };
    ($($key1:expr, $key2:expr => $value:expr),+ $(,)?) => {{
        let mut table = $crate::DoubleKeyTable::new();
        $(
            table
                .insert($key1, $key2, $value)
                .expect("size ladder exhausted");
        )+
        table
    }};
}
