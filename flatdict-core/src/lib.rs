//! Flatdict is an ordered map that persists as two flat sequences.
//!
//! Many serializers can write a list but not a map. A [`SnapshotMap`] bridges
//! the gap with a two-phase lifecycle:
//! - **Capture**: flatten the live map into a [`Snapshot`], a pair of
//!   index-aligned `keys` / `values` sequences, right before serialization.
//! - **Restore**: rebuild the live map from a snapshot right after
//!   deserialization, before anything else reads the map.
//!
//! Values can be stored directly or boxed in a [`ValueCache`], chosen by the
//! storage strategy type parameter ([`Direct`] or [`Cached`]).
//!
//! # Example
//!
//! ```
//! use flatdict_core::{Snapshot, SnapshotMap};
//!
//! let mut map: SnapshotMap<String, i32> = SnapshotMap::new();
//! map.set("a".to_string(), 1);
//! map.set("b".to_string(), 2);
//!
//! let snapshot = map.capture();
//! assert_eq!(snapshot.keys, ["a", "b"]);
//! assert_eq!(snapshot.values, [1, 2]);
//!
//! let mut restored: SnapshotMap<String, i32> = SnapshotMap::new();
//! restored.restore(snapshot).unwrap();
//! assert_eq!(restored, map);
//!
//! // Misaligned sequences are rejected and leave the map empty
//! let bad = Snapshot::from_parts(vec!["a".to_string(), "b".to_string()], vec![1]);
//! assert!(restored.restore(bad).is_err());
//! assert!(restored.is_empty());
//! ```
//!
//! # Serialization
//!
//! `SnapshotMap` implements serde's `Serialize` and `Deserialize` by capturing
//! and restoring, so it can be a field of any serde struct. Plain `IndexMap`
//! fields get the same encoding through [`serde_helpers::flat_map`]. The
//! [`codec`] module pins the format to CBOR (via `ciborium`).

mod cache;
pub mod codec;
mod error;
mod map;
pub mod serde_helpers;
mod snapshot;
mod storage;

pub use cache::ValueCache;
pub use error::{CodecError, MapError};
pub use map::{SnapshotMap, SnapshotOf};
pub use snapshot::Snapshot;
pub use storage::{Cached, Direct, ValueStorage};
