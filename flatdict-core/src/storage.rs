use crate::cache::ValueCache;

/// How values are laid out in the value sequence of a snapshot.
///
/// A storage strategy is chosen at compile time through the type parameter of
/// [`SnapshotMap`](crate::SnapshotMap). Strategies are stateless: they only
/// convert a live value into its stored form and back.
pub trait ValueStorage<V> {
    /// The element type of the value sequence.
    type Stored;

    /// Converts a live value into its stored form.
    fn store(value: V) -> Self::Stored;

    /// Converts a stored element back into a live value.
    fn load(stored: Self::Stored) -> V;
}

/// Values are stored as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Direct;

/// Every value is boxed into a [`ValueCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cached;

impl<V> ValueStorage<V> for Direct {
    type Stored = V;

    fn store(value: V) -> V {
        value
    }

    fn load(stored: V) -> V {
        stored
    }
}

impl<V> ValueStorage<V> for Cached {
    type Stored = ValueCache<V>;

    fn store(value: V) -> ValueCache<V> {
        ValueCache::new(value)
    }

    fn load(stored: ValueCache<V>) -> V {
        stored.into_inner()
    }
}
