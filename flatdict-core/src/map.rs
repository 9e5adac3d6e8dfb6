use indexmap::map::{Entry, IntoIter, Iter, Keys, Values};
use indexmap::{Equivalent, IndexMap};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::error::MapError;
use crate::snapshot::Snapshot;
use crate::storage::{Direct, ValueStorage};

/// The snapshot type produced by a `SnapshotMap<K, V, S>`.
pub type SnapshotOf<K, V, S> = Snapshot<K, <S as ValueStorage<V>>::Stored>;

/// An insertion-ordered map that flattens to and from a [`Snapshot`].
///
/// The map has two phases:
/// - **Live**: the entries are authoritative and are used through the usual
///   associative operations.
/// - **Flattened**: [`capture`](Self::capture) has produced a snapshot for a
///   serializer to write out. The snapshot is an independent copy; mutating
///   the map afterwards does not update it.
///
/// [`restore`](Self::restore) goes the other way and replaces every entry with
/// the contents of a snapshot that was just read back.
///
/// The storage strategy `S` decides how values appear in the snapshot:
/// [`Direct`] stores them as-is, [`Cached`](crate::Cached) boxes each one in a
/// [`ValueCache`](crate::ValueCache).
pub struct SnapshotMap<K, V, S = Direct> {
    entries: IndexMap<K, V>,
    storage: PhantomData<S>,
}

impl<K, V, S> SnapshotMap<K, V, S> {
    /// Creates a new empty map.
    pub fn new() -> Self {
        SnapshotMap {
            entries: IndexMap::new(),
            storage: PhantomData,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        SnapshotMap {
            entries: IndexMap::with_capacity(capacity),
            storage: PhantomData,
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates over entries in map order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.entries.iter()
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        self.entries.keys()
    }

    pub fn values(&self) -> Values<'_, K, V> {
        self.entries.values()
    }

    /// Returns the backing map.
    pub fn as_index_map(&self) -> &IndexMap<K, V> {
        &self.entries
    }

    pub fn into_index_map(self) -> IndexMap<K, V> {
        self.entries
    }
}

impl<K: Hash + Eq, V, S> SnapshotMap<K, V, S> {
    /// Returns the value for `key`, or [`MapError::KeyNotFound`].
    pub fn get<Q>(&self, key: &Q) -> Result<&V, MapError>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.entries.get(key).ok_or(MapError::KeyNotFound)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, MapError>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.entries.get_mut(key).ok_or(MapError::KeyNotFound)
    }

    /// Returns the value for `key`, or `None` if absent.
    pub fn try_get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.entries.get(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.entries.contains_key(key)
    }

    /// Inserts or overwrites the value for `key`, returning the previous value.
    ///
    /// An overwritten key keeps its position in the map order.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Inserts a new entry, failing with [`MapError::DuplicateKey`] if `key`
    /// is already present. The map is unchanged on failure.
    pub fn add(&mut self, key: K, value: V) -> Result<(), MapError> {
        match self.entries.entry(key) {
            Entry::Occupied(_) => Err(MapError::DuplicateKey),
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(())
            }
        }
    }

    /// Removes `key`, returning whether it was present.
    ///
    /// Remaining entries keep their relative order.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.take(key).is_some()
    }

    /// Removes `key` and returns its value.
    pub fn take<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.entries.shift_remove(key)
    }

    /// Replaces all entries with clones of the entries of `other`, in
    /// `other`'s order.
    pub fn copy_from<T>(&mut self, other: &SnapshotMap<K, V, T>)
    where
        K: Clone,
        V: Clone,
    {
        self.entries.clone_from(&other.entries);
    }
}

impl<K, V, S> SnapshotMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: ValueStorage<V>,
{
    /// Flattens the map into two index-aligned sequences in map order.
    ///
    /// The map itself is not modified.
    pub fn capture(&self) -> SnapshotOf<K, V, S> {
        let mut keys = Vec::with_capacity(self.entries.len());
        let mut values = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            keys.push(key.clone());
            values.push(S::store(value.clone()));
        }
        log::debug!("captured {} entries", keys.len());
        Snapshot { keys, values }
    }
}

impl<K, V, S> SnapshotMap<K, V, S>
where
    K: Hash + Eq,
    S: ValueStorage<V>,
{
    /// Replaces every entry with the contents of `snapshot`.
    ///
    /// The map is cleared before anything else happens, so a restore never
    /// merges with prior entries. If the key and value sequences differ in
    /// length this fails with [`MapError::LengthMismatch`] and the map stays
    /// empty. Repeated keys are not an error: the last occurrence wins.
    pub fn restore(&mut self, snapshot: SnapshotOf<K, V, S>) -> Result<(), MapError> {
        self.entries.clear();
        if let Err(err) = snapshot.check() {
            log::warn!("refusing to restore snapshot: {err}");
            return Err(err);
        }

        let Snapshot { keys, values } = snapshot;
        self.entries.reserve(keys.len());
        for (key, stored) in keys.into_iter().zip(values) {
            if self.entries.insert(key, S::load(stored)).is_some() {
                log::trace!("restore overwrote a repeated key");
            }
        }
        log::debug!("restored {} entries", self.entries.len());
        Ok(())
    }

    /// Creates a map from a snapshot.
    pub fn from_snapshot(snapshot: SnapshotOf<K, V, S>) -> Result<Self, MapError> {
        let mut map = Self::new();
        map.restore(snapshot)?;
        Ok(map)
    }
}

impl<K, V, S> Default for SnapshotMap<K, V, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone, S> Clone for SnapshotMap<K, V, S> {
    fn clone(&self) -> Self {
        SnapshotMap {
            entries: self.entries.clone(),
            storage: PhantomData,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for SnapshotMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<K, V, S, T> PartialEq<SnapshotMap<K, V, T>> for SnapshotMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
{
    fn eq(&self, other: &SnapshotMap<K, V, T>) -> bool {
        self.entries == other.entries
    }
}

impl<K: Hash + Eq, V: Eq, S> Eq for SnapshotMap<K, V, S> {}

impl<K, V, S> From<IndexMap<K, V>> for SnapshotMap<K, V, S> {
    fn from(entries: IndexMap<K, V>) -> Self {
        SnapshotMap {
            entries,
            storage: PhantomData,
        }
    }
}

impl<K: Hash + Eq, V, S> FromIterator<(K, V)> for SnapshotMap<K, V, S> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        SnapshotMap {
            entries: IndexMap::from_iter(iter),
            storage: PhantomData,
        }
    }
}

impl<K: Hash + Eq, V, S> Extend<(K, V)> for SnapshotMap<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<K, V, S> IntoIterator for SnapshotMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a SnapshotMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K, V, S> Serialize for SnapshotMap<K, V, S>
where
    K: Hash + Eq + Clone + Serialize,
    V: Clone,
    S: ValueStorage<V>,
    S::Stored: Serialize,
{
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        // Always serialize the flattened form
        self.capture().serialize(serializer)
    }
}

impl<'de, K, V, S> Deserialize<'de> for SnapshotMap<K, V, S>
where
    K: Hash + Eq + Deserialize<'de>,
    S: ValueStorage<V>,
    S::Stored: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let snapshot = SnapshotOf::<K, V, S>::deserialize(deserializer)?;
        Self::from_snapshot(snapshot).map_err(serde::de::Error::custom)
    }
}
