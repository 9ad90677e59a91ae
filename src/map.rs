//! ByteMap: public layer over [`ChainTable`] with defaulted
//! construction and introspection.

use crate::config::Config;
use crate::hash::{ByteHash, Murmur3};
use crate::table::{ChainTable, Iter, IterMut, Stats, DEFAULT_CAPACITY};

/// A byte-keyed hash map using separate chaining.
///
/// Keys are arbitrary byte slices, copied into map-owned storage on
/// insert; values are any caller-supplied type `V` (use `V = &T` or a
/// handle type to keep value ownership with the caller). The hasher is
/// chosen at construction and fixed for the map's lifetime.
///
/// Single-threaded: no internal locking, every operation runs to
/// completion on the caller's thread. Wrap the whole map in external
/// synchronization for any multi-thread use.
pub struct ByteMap<V, H = Murmur3> {
    table: ChainTable<V, H>,
}

impl<V> ByteMap<V> {
    /// Default capacity and configuration, Murmur3 hashing.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(capacity, Config::default())
    }

    /// Invalid config fields fall back to their defaults; a zero
    /// capacity is clamped to 1.
    pub fn with_config(capacity: usize, config: Config) -> Self {
        Self::with_hasher(capacity, config, Murmur3::default())
    }
}

impl<V> Default for ByteMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, H> ByteMap<V, H>
where
    H: ByteHash,
{
    /// Construct with a caller-supplied hash function. Substituting the
    /// hasher changes bucket distribution but not correctness.
    pub fn with_hasher(capacity: usize, config: Config, hasher: H) -> Self {
        Self {
            table: ChainTable::with_hasher(capacity, config, hasher),
        }
    }

    /// Insert or update `key`. Returns the displaced value when the key
    /// was already present; `None` on a fresh insert. May grow the
    /// table before returning.
    pub fn set(&mut self, key: &[u8], value: V) -> Option<V> {
        self.table.set(key, value)
    }

    pub fn get(&self, key: &[u8]) -> Option<&V> {
        self.table.get(key)
    }

    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        self.table.get_mut(key)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.table.contains_key(key)
    }

    /// Remove `key`, returning its value. The map never shrinks.
    pub fn remove(&mut self, key: &[u8]) -> Option<V> {
        self.table.remove(key)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Current bucket count; changes only through growth.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn load_factor(&self) -> f64 {
        self.table.load_factor()
    }

    /// A copy of the (sanitized) configuration fixed at construction.
    pub fn config(&self) -> Config {
        self.table.config()
    }

    /// Occupancy snapshot for diagnostics; linear scan, no side
    /// effects.
    pub fn stats(&self) -> Stats {
        self.table.stats()
    }

    /// Visit every live entry once, in bucket-index order and current
    /// chain order. Iteration order is not stable across resizes.
    pub fn iter(&self) -> Iter<'_, V> {
        self.table.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        self.table.iter_mut()
    }
}

impl<'a, V, H> IntoIterator for &'a ByteMap<V, H>
where
    H: ByteHash,
{
    type Item = (&'a [u8], &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
