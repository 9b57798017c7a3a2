use crate::linear_probe::LinearProbeTable;
use crate::map::DoubleKeyTable;
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;
use serde::de::{Deserialize, Deserializer, Error, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A `LinearProbeTable` serializes as a plain map of its entries, in
/// array order.
impl<K, V> Serialize for LinearProbeTable<K, V>
where
    K: Serialize + Eq,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Deserialization rebuilds the table through its normal insertion path
/// with the default ladder and hashing, so the key type must be
/// string-like.
impl<'de, K, V> Deserialize<'de> for LinearProbeTable<K, V>
where
    K: Deserialize<'de> + Eq + AsRef<str>,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TableVisitor<K, V>(PhantomData<(K, V)>);

        impl<'de, K, V> Visitor<'de> for TableVisitor<K, V>
        where
            K: Deserialize<'de> + Eq + AsRef<str>,
            V: Deserialize<'de>,
        {
            type Value = LinearProbeTable<K, V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut table = LinearProbeTable::new();
                while let Some((key, value)) = access.next_entry()? {
                    table
                        .set(key, value)
                        .map_err(|_| A::Error::custom("table size ladder exhausted"))?;
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor(PhantomData))
    }
}

/// Entries of one inner map, collected before insertion so the outer key
/// can be reused for each of them.
struct Entries<K2, V>(Vec<(K2, V)>);

impl<'de, K2, V> Deserialize<'de> for Entries<K2, V>
where
    K2: Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor<K2, V>(PhantomData<(K2, V)>);

        impl<'de, K2, V> Visitor<'de> for EntriesVisitor<K2, V>
        where
            K2: Deserialize<'de>,
            V: Deserialize<'de>,
        {
            type Value = Entries<K2, V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry()? {
                    entries.push(entry);
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

/// A `DoubleKeyTable` serializes as a map of maps: every first key maps to
/// its sub-table, which serializes as above.
impl<K1, K2, V> Serialize for DoubleKeyTable<K1, K2, V>
where
    K1: Serialize + Eq,
    K2: Serialize + Eq,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key1, inner) in self.outer_entries() {
            map.serialize_entry(key1, inner)?;
        }
        map.end()
    }
}

impl<'de, K1, K2, V> Deserialize<'de> for DoubleKeyTable<K1, K2, V>
where
    K1: Deserialize<'de> + Eq + AsRef<str> + Clone,
    K2: Deserialize<'de> + Eq + AsRef<str>,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TableVisitor<K1, K2, V>(PhantomData<(K1, K2, V)>);

        impl<'de, K1, K2, V> Visitor<'de> for TableVisitor<K1, K2, V>
        where
            K1: Deserialize<'de> + Eq + AsRef<str> + Clone,
            K2: Deserialize<'de> + Eq + AsRef<str>,
            V: Deserialize<'de>,
        {
            type Value = DoubleKeyTable<K1, K2, V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of maps")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut table = DoubleKeyTable::new();
                while let Some((key1, Entries(entries))) =
                    access.next_entry::<K1, Entries<K2, V>>()?
                {
                    for (key2, value) in entries {
                        table
                            .insert(key1.clone(), key2, value)
                            .map_err(|_| A::Error::custom("table size ladder exhausted"))?;
                    }
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use crate::linear_probe::LinearProbeTable;
    use crate::map::DoubleKeyTable;
    use crate::hashing::DEFAULT_TABLE_SIZES;
    use serde_test::{assert_tokens, Token};
    use std::string::{String, ToString};

    // Deterministic layout for the token assertions below: keys land on
    // their first byte modulo the capacity.
    fn first_byte(key: &String, capacity: usize) -> usize {
        key.as_bytes().first().map_or(0, |&b| b as usize) % capacity
    }

    #[test]
    fn linear_probe_table_tokens() {
        let mut table: LinearProbeTable<String, i32> =
            LinearProbeTable::with_ladder_and_hasher(DEFAULT_TABLE_SIZES, first_byte);
        // "a" -> slot 2, "b" -> slot 3 of the initial five-slot array.
        table.set("a".to_string(), 1).unwrap();
        table.set("b".to_string(), 2).unwrap();

        assert_tokens(
            &table,
            &[
                Token::Map { len: Some(2) },
                Token::Str("a"),
                Token::I32(1),
                Token::Str("b"),
                Token::I32(2),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn double_key_table_tokens() {
        let mut table: DoubleKeyTable<String, String, i32> =
            DoubleKeyTable::with_ladders_and_hashers(
                DEFAULT_TABLE_SIZES,
                DEFAULT_TABLE_SIZES,
                first_byte,
                first_byte,
            );
        // "a" -> slot 2 and "m" -> slot 4 at the first level; under "a",
        // "x" -> slot 0 and "y" -> slot 1.
        table
            .insert("a".to_string(), "x".to_string(), 1)
            .unwrap();
        table
            .insert("a".to_string(), "y".to_string(), 2)
            .unwrap();
        table
            .insert("m".to_string(), "x".to_string(), 3)
            .unwrap();

        assert_tokens(
            &table,
            &[
                Token::Map { len: Some(2) },
                Token::Str("a"),
                Token::Map { len: Some(2) },
                Token::Str("x"),
                Token::I32(1),
                Token::Str("y"),
                Token::I32(2),
                Token::MapEnd,
                Token::Str("m"),
                Token::Map { len: Some(1) },
                Token::Str("x"),
                Token::I32(3),
                Token::MapEnd,
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn empty_table_tokens() {
        let table: DoubleKeyTable<String, String, i32> = DoubleKeyTable::new();
        assert_tokens(
            &table,
            &[Token::Map { len: Some(0) }, Token::MapEnd],
        );
    }
}
