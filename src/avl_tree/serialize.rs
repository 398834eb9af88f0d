//! Serde support. A map serializes as a map and a set as a sequence, both in ascending key order.

use crate::avl_tree::{AvlMap, AvlSet};
use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;
use std::marker::PhantomData;

impl<T, U> Serialize for AvlMap<T, U>
where
    T: Serialize,
    U: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct AvlMapVisitor<T, U> {
    marker: PhantomData<fn() -> AvlMap<T, U>>,
}

impl<'de, T, U> Visitor<'de> for AvlMapVisitor<T, U>
where
    T: Deserialize<'de> + Ord,
    U: Deserialize<'de>,
{
    type Value = AvlMap<T, U>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = AvlMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, T, U> Deserialize<'de> for AvlMap<T, U>
where
    T: Deserialize<'de> + Ord,
    U: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(AvlMapVisitor {
            marker: PhantomData,
        })
    }
}

impl<T> Serialize for AvlSet<T>
where
    T: Serialize + Ord,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for key in self {
            seq.serialize_element(key)?;
        }
        seq.end()
    }
}

struct AvlSetVisitor<T> {
    marker: PhantomData<fn() -> AvlSet<T>>,
}

impl<'de, T> Visitor<'de> for AvlSetVisitor<T>
where
    T: Deserialize<'de> + Ord,
{
    type Value = AvlSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut set = AvlSet::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(key) = access.next_element()? {
            set.insert(key);
        }
        Ok(set)
    }
}

impl<'de, T> Deserialize<'de> for AvlSet<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(AvlSetVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::avl_tree::{AvlMap, AvlSet};
    use serde_test::{assert_de_tokens, assert_tokens, Token};

    #[test]
    fn test_map_tokens() {
        let mut map = AvlMap::new();
        map.insert(3u32, 'c');
        map.insert(1u32, 'a');

        assert_tokens(
            &map,
            &[
                Token::Map { len: Some(2) },
                Token::U32(1),
                Token::Char('a'),
                Token::U32(3),
                Token::Char('c'),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_map_empty_tokens() {
        let map: AvlMap<u32, u32> = AvlMap::new();
        assert_tokens(&map, &[Token::Map { len: Some(0) }, Token::MapEnd]);
    }

    #[test]
    fn test_map_deserialize_unordered_duplicates() {
        let map: AvlMap<u32, u32> = vec![(1, 20), (2, 30)].into_iter().collect();
        assert_de_tokens(
            &map,
            &[
                Token::Map { len: None },
                Token::U32(2),
                Token::U32(30),
                Token::U32(1),
                Token::U32(10),
                Token::U32(1),
                Token::U32(20),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_set_tokens() {
        let set: AvlSet<u32> = vec![5, 2, 9].into_iter().collect();
        assert_tokens(
            &set,
            &[
                Token::Seq { len: Some(3) },
                Token::U32(2),
                Token::U32(5),
                Token::U32(9),
                Token::SeqEnd,
            ],
        );
    }
}
