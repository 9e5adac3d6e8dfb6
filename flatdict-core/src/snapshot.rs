use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::codec;
use crate::error::{CodecError, MapError};

/// The flattened form of a map: two index-aligned sequences.
///
/// `keys[i]` belongs to `values[i]`. A snapshot produced by
/// [`SnapshotMap::capture`](crate::SnapshotMap::capture) is always aligned and
/// has unique keys. A snapshot read back from storage may be neither; that is
/// checked when it is restored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot<K, T> {
    pub keys: Vec<K>,
    pub values: Vec<T>,
}

impl<K, T> Snapshot<K, T> {
    /// Creates a snapshot from raw sequences without validating them.
    pub fn from_parts(keys: Vec<K>, values: Vec<T>) -> Self {
        Snapshot { keys, values }
    }

    pub fn into_parts(self) -> (Vec<K>, Vec<T>) {
        (self.keys, self.values)
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.values.is_empty()
    }

    /// Returns true if both sequences have the same length.
    pub fn is_aligned(&self) -> bool {
        self.keys.len() == self.values.len()
    }

    /// Fails with [`MapError::LengthMismatch`] if the sequences are not aligned.
    pub fn check(&self) -> Result<(), MapError> {
        if self.is_aligned() {
            Ok(())
        } else {
            Err(MapError::LengthMismatch {
                keys: self.keys.len(),
                values: self.values.len(),
            })
        }
    }

    /// Iterates over aligned `(key, value)` pairs.
    ///
    /// Stops at the shorter sequence; call [`check`](Self::check) first when
    /// trailing elements matter.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &T)> {
        self.keys.iter().zip(self.values.iter())
    }
}

impl<K: Serialize, T: Serialize> Snapshot<K, T> {
    /// Serializes this snapshot to CBOR bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        codec::to_cbor(self)
    }
}

impl<K: DeserializeOwned, T: DeserializeOwned> Snapshot<K, T> {
    /// Deserializes a snapshot from CBOR bytes. Alignment is not checked.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CodecError> {
        codec::from_cbor(data)
    }
}

impl<K, T> Default for Snapshot<K, T> {
    fn default() -> Self {
        Snapshot {
            keys: Vec::new(),
            values: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_alignment() {
        let aligned = Snapshot::from_parts(vec!["a", "b"], vec![1, 2]);
        assert!(aligned.is_aligned());
        assert_eq!(aligned.check(), Ok(()));

        let short = Snapshot::from_parts(vec!["a", "b"], vec![1]);
        assert!(!short.is_aligned());
        assert_eq!(
            short.check(),
            Err(MapError::LengthMismatch { keys: 2, values: 1 })
        );
    }

    #[test]
    fn snapshot_iter_pairs() {
        let snapshot = Snapshot::from_parts(vec!["x", "y"], vec![10, 20]);
        let pairs: Vec<_> = snapshot.iter().collect();
        assert_eq!(pairs, vec![(&"x", &10), (&"y", &20)]);
    }

    #[test]
    fn empty_snapshot() {
        let snapshot: Snapshot<String, u8> = Snapshot::default();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.len(), 0);

        let keys_only = Snapshot::<String, u8>::from_parts(vec![], vec![1]);
        assert!(!keys_only.is_empty());
    }

    #[test]
    fn snapshot_bytes_keep_misalignment() {
        let snapshot = Snapshot::from_parts(vec!["a".to_string()], vec![1u32, 2]);
        let bytes = snapshot.to_bytes().unwrap();
        let recovered: Snapshot<String, u32> = Snapshot::from_bytes(&bytes).unwrap();
        assert_eq!(recovered, snapshot);
        assert!(recovered.check().is_err());
    }
}
