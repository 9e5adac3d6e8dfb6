use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

/// A cache wraps exactly one value so it can sit in a homogeneous sequence.
///
/// Values that a serializer cannot place directly in a flat list (for example
/// an enum that needs per-element type tagging) are boxed into a cache when a
/// map is captured and unboxed again on restore. The cache has no behavior of
/// its own beyond holding the value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueCache<V> {
    pub data: V,
}

impl<V> ValueCache<V> {
    /// Creates a new cache containing the given value.
    pub fn new(data: V) -> Self {
        ValueCache { data }
    }

    /// Returns a reference to the contained value.
    pub fn get(&self) -> &V {
        &self.data
    }

    pub fn get_mut(&mut self) -> &mut V {
        &mut self.data
    }

    /// Consumes the cache and returns the contained value.
    pub fn into_inner(self) -> V {
        self.data
    }
}

impl<V> From<V> for ValueCache<V> {
    fn from(data: V) -> Self {
        ValueCache { data }
    }
}

impl<V> Deref for ValueCache<V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self.data
    }
}

impl<V> DerefMut for ValueCache<V> {
    fn deref_mut(&mut self) -> &mut V {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_value_access() {
        let cache = ValueCache::new("hello".to_string());
        assert_eq!(cache.get(), "hello");
        assert_eq!(cache.len(), 5);
        assert_eq!(cache.into_inner(), "hello");
    }

    #[test]
    fn cache_mutation() {
        let mut cache = ValueCache::from(vec![1u32]);
        cache.get_mut().push(2);
        cache.push(3);
        assert_eq!(cache.data, vec![1, 2, 3]);
    }

    #[test]
    fn cache_serializes_as_data_field() {
        let mut bytes = Vec::new();
        ciborium::into_writer(&ValueCache::new(7u8), &mut bytes).unwrap();

        let value: ciborium::Value = ciborium::from_reader(&bytes[..]).unwrap();
        let map = value.as_map().expect("cache should encode as a map");
        assert_eq!(map.len(), 1);
        assert_eq!(map[0].0, ciborium::Value::Text("data".to_string()));
    }
}
