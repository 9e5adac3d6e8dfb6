//! Serde helpers for persisting plain maps in the flattened form.
//!
//! These modules let a struct keep an ordinary `IndexMap` field and still have
//! it written as two aligned sequences.

/// Serialize an `IndexMap<K, V>` as `{"keys": [...], "values": [...]}`.
///
/// Use with `#[serde(with = "flatdict_core::serde_helpers::flat_map")]`.
/// Deserialization fails if the two sequences differ in length; repeated keys
/// keep the last value.
pub mod flat_map {
    use indexmap::IndexMap;
    use serde::ser::SerializeStruct;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::hash::{BuildHasher, Hash};

    use crate::snapshot::Snapshot;

    struct KeySeq<'a, K, V, H>(&'a IndexMap<K, V, H>);

    impl<K: Serialize, V, H> Serialize for KeySeq<'_, K, V, H> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self.0.keys())
        }
    }

    struct ValueSeq<'a, K, V, H>(&'a IndexMap<K, V, H>);

    impl<K, V: Serialize, H> Serialize for ValueSeq<'_, K, V, H> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self.0.values())
        }
    }

    pub fn serialize<K, V, H, S>(map: &IndexMap<K, V, H>, serializer: S) -> Result<S::Ok, S::Error>
    where
        K: Serialize,
        V: Serialize,
        S: Serializer,
    {
        // Same shape as a derived `Snapshot`
        let mut state = serializer.serialize_struct("Snapshot", 2)?;
        state.serialize_field("keys", &KeySeq(map))?;
        state.serialize_field("values", &ValueSeq(map))?;
        state.end()
    }

    pub fn deserialize<'de, K, V, H, D>(deserializer: D) -> Result<IndexMap<K, V, H>, D::Error>
    where
        K: Hash + Eq + Deserialize<'de>,
        V: Deserialize<'de>,
        H: BuildHasher + Default,
        D: Deserializer<'de>,
    {
        let snapshot = Snapshot::<K, V>::deserialize(deserializer)?;
        snapshot.check().map_err(serde::de::Error::custom)?;

        let (keys, values) = snapshot.into_parts();
        let mut map = IndexMap::with_capacity_and_hasher(keys.len(), H::default());
        map.extend(keys.into_iter().zip(values));
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    use crate::codec::{from_cbor, to_cbor};
    use crate::snapshot::Snapshot;

    #[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq)]
    struct WithMap {
        #[serde(with = "flat_map")]
        scores: IndexMap<String, u32>,
    }

    #[test]
    fn flat_map_roundtrip() {
        let mut scores = IndexMap::new();
        scores.insert("alice".to_string(), 3);
        scores.insert("bob".to_string(), 5);
        let v = WithMap { scores };

        let bytes = to_cbor(&v).unwrap();
        let recovered: WithMap = from_cbor(&bytes).unwrap();
        assert_eq!(recovered, v);

        let keys: Vec<_> = recovered.scores.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["alice", "bob"]);
    }

    #[test]
    fn flat_map_matches_snapshot_shape() {
        let mut scores = IndexMap::new();
        scores.insert("carol".to_string(), 8);
        let bytes = to_cbor(&WithMap { scores }).unwrap();

        #[derive(serde::Deserialize)]
        struct Raw {
            scores: Snapshot<String, u32>,
        }

        let raw: Raw = from_cbor(&bytes).unwrap();
        assert_eq!(raw.scores, Snapshot::from_parts(vec!["carol".to_string()], vec![8]));
    }

    #[test]
    fn flat_map_rejects_misaligned_input() {
        #[derive(serde::Serialize)]
        struct Raw {
            scores: Snapshot<String, u32>,
        }

        let raw = Raw {
            scores: Snapshot::from_parts(vec!["a".to_string(), "b".to_string()], vec![1]),
        };
        let bytes = to_cbor(&raw).unwrap();
        let result: Result<WithMap, _> = from_cbor(&bytes);
        assert!(result.is_err());
    }

    #[test]
    fn flat_map_last_write_wins() {
        #[derive(serde::Serialize)]
        struct Raw {
            scores: Snapshot<String, u32>,
        }

        let raw = Raw {
            scores: Snapshot::from_parts(vec!["k".to_string(), "k".to_string()], vec![1, 2]),
        };
        let bytes = to_cbor(&raw).unwrap();
        let recovered: WithMap = from_cbor(&bytes).unwrap();
        assert_eq!(recovered.scores.len(), 1);
        assert_eq!(recovered.scores["k"], 2);
    }
}
