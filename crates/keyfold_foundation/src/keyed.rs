//! Persistent, insertion-ordered keyed collection.
//!
//! A [`KeyedMap`] stores each entry once under its key and remembers the
//! order keys first appeared in. It is the normalized form of a list of
//! records: lookups by key are cheap, and iteration still yields records in a
//! stable order suitable for rendering.
//!
//! # Layout
//! - `entries`: key -> (sequence number, value)
//! - `order`: sequence number -> key
//!
//! Sequence numbers only grow, so iterating `order` yields keys in the order
//! their current slot was assigned. Both halves are `im` structures, so
//! cloning a map is O(1) and clones never observe each other's updates.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

#[derive(Clone)]
struct Slot<V> {
    seq: u64,
    value: V,
}

/// Persistent map that iterates in insertion order.
///
/// Overwriting an existing key with [`insert`](Self::insert) replaces the
/// value but keeps the key's position; [`insert_last`](Self::insert_last)
/// moves it to the end instead.
#[derive(Clone)]
pub struct KeyedMap<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    entries: im::HashMap<K, Slot<V>>,
    order: im::OrdMap<u64, K>,
    next_seq: u64,
}

impl<K: Clone + Eq + Hash, V: Clone> KeyedMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: im::HashMap::new(),
            order: im::OrdMap::new(),
            next_seq: 0,
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Gets a value by key.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map(|slot| &slot.value)
    }

    /// Returns true if the map contains the key.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Returns the zero-based iteration position of a key.
    #[must_use]
    pub fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let seq = self.entries.get(key)?.seq;
        Some(self.order.range(..seq).count())
    }

    /// Returns a new map with the entry inserted.
    ///
    /// An existing key keeps its position.
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        let mut new = self.clone();
        new.insert_mut(key, value);
        new
    }

    /// Returns a new map with the entry inserted at the end.
    ///
    /// An existing key is moved to the last position.
    #[must_use]
    pub fn insert_last(&self, key: K, value: V) -> Self {
        let mut new = self.clone();
        new.insert_last_mut(key, value);
        new
    }

    /// Returns a new map with the key removed.
    #[must_use]
    pub fn remove<Q>(&self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut new = self.clone();
        new.remove_mut(key);
        new
    }

    /// Inserts in place, keeping the position of an existing key.
    ///
    /// Returns the replaced value, if any.
    pub fn insert_mut(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.entries.get_mut(&key) {
            return Some(std::mem::replace(&mut slot.value, value));
        }
        let seq = self.take_seq();
        self.order.insert(seq, key.clone());
        self.entries.insert(key, Slot { seq, value });
        None
    }

    /// Inserts in place at the end, moving an existing key.
    ///
    /// Returns the replaced value, if any.
    pub fn insert_last_mut(&mut self, key: K, value: V) -> Option<V> {
        let seq = self.take_seq();
        let previous = self.entries.insert(key.clone(), Slot { seq, value });
        if let Some(old) = &previous {
            self.order.remove(&old.seq);
        }
        self.order.insert(seq, key);
        previous.map(|slot| slot.value)
    }

    /// Removes in place, returning the removed value.
    pub fn remove_mut<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.entries.remove(key)?;
        self.order.remove(&slot.seq);
        Some(slot.value)
    }

    /// Returns an iterator over entries in order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            order: self.order.iter(),
            entries: &self.entries,
        }
    }

    /// Returns an iterator over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.values()
    }

    /// Returns an iterator over values in order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// Returns the first entry.
    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.iter().next()
    }

    /// Returns the last entry.
    #[must_use]
    pub fn last(&self) -> Option<(&K, &V)> {
        let (_, key) = self.order.get_max()?;
        self.entries.get(key).map(|slot| (key, &slot.value))
    }

    fn take_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

impl<K: Clone + Eq + Hash, V: Clone> Default for KeyedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered iterator over the entries of a [`KeyedMap`].
pub struct Iter<'a, K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    order: im::ordmap::Iter<'a, u64, K>,
    entries: &'a im::HashMap<K, Slot<V>>,
}

impl<'a, K: Clone + Eq + Hash, V: Clone> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entries = self.entries;
        self.order
            .by_ref()
            .find_map(|(_, key)| entries.get(key).map(|slot| (key, &slot.value)))
    }
}

impl<'a, K: Clone + Eq + Hash, V: Clone> IntoIterator for &'a KeyedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Clone + Eq + Hash + fmt::Debug, V: Clone + fmt::Debug> fmt::Debug for KeyedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// Equality is order-sensitive: two maps are equal when they would render
// the same entries in the same order.
impl<K: Clone + Eq + Hash, V: Clone + PartialEq> PartialEq for KeyedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Clone + Eq + Hash, V: Clone + Eq> Eq for KeyedMap<K, V> {}

impl<K: Clone + Eq + Hash, V: Clone + Hash> Hash for KeyedMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self.iter() {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: Clone + Eq + Hash, V: Clone> FromIterator<(K, V)> for KeyedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Clone + Eq + Hash, V: Clone> Extend<(K, V)> for KeyedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert_mut(key, value);
        }
    }
}

#[cfg(feature = "serde")]
mod serde_support {
    use super::KeyedMap;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;
    use std::hash::Hash;
    use std::marker::PhantomData;

    impl<K, V> Serialize for KeyedMap<K, V>
    where
        K: Clone + Eq + Hash + Serialize,
        V: Clone + Serialize,
    {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (k, v) in self {
                map.serialize_entry(k, v)?;
            }
            map.end()
        }
    }

    impl<'de, K, V> Deserialize<'de> for KeyedMap<K, V>
    where
        K: Clone + Eq + Hash + Deserialize<'de>,
        V: Clone + Deserialize<'de>,
    {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct KeyedMapVisitor<K, V>(PhantomData<(K, V)>);

            impl<'de, K, V> Visitor<'de> for KeyedMapVisitor<K, V>
            where
                K: Clone + Eq + Hash + Deserialize<'de>,
                V: Clone + Deserialize<'de>,
            {
                type Value = KeyedMap<K, V>;

                fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                    formatter.write_str("a keyed map")
                }

                fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
                where
                    A: MapAccess<'de>,
                {
                    let mut map = KeyedMap::new();
                    while let Some((key, value)) = access.next_entry()? {
                        map.insert_mut(key, value);
                    }
                    Ok(map)
                }
            }

            deserializer.deserialize_map(KeyedMapVisitor(PhantomData))
        }
    }
}
