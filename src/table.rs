//! ChainTable: the structural layer. Bucket array, single-owner
//! collision chains, growth controller.
//!
//! Each bucket owns the head of a singly linked chain of `Box`ed nodes,
//! so the compiler enforces the at-most-one-owner invariant on every
//! node. A node stores its key bytes, its precomputed 32-bit hash, and
//! the caller's value; the hash function is never re-invoked for an
//! existing entry, so rehashing cannot call back into user code.

use crate::config::Config;
use crate::guard::ReentryCheck;
use crate::hash::ByteHash;

/// Default bucket count when the caller does not supply one.
pub const DEFAULT_CAPACITY: usize = 16;

type Link<V> = Option<Box<Entry<V>>>;

struct Entry<V> {
    key: Box<[u8]>,
    hash: u32,
    value: V,
    next: Link<V>,
}

impl<V> Entry<V> {
    #[inline]
    fn matches(&self, hash: u32, key: &[u8]) -> bool {
        self.hash == hash && *self.key == *key
    }
}

/// Bucket layer plus growth controller.
///
/// Invariants held between public calls:
/// - every node reachable from bucket `i` satisfies
///   `node.hash as usize % capacity == i`;
/// - at most one node per key within a chain;
/// - `len / capacity` does not exceed the configured maximum load
///   factor after a successful insert, unless the most recent growth
///   attempt failed to allocate (the table then keeps operating
///   over-threshold).
pub struct ChainTable<V, H> {
    hasher: H,
    buckets: Vec<Link<V>>,
    len: usize,
    config: Config,
    reentry: ReentryCheck,
}

/// Read-only snapshot of bucket occupancy, for diagnostics.
///
/// `overflow_buckets` counts buckets whose chain holds more than one
/// node. No contract on exact `Display` wording.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stats {
    pub capacity: usize,
    pub len: usize,
    pub empty_buckets: usize,
    pub overflow_buckets: usize,
    pub load_factor: f64,
}

impl core::fmt::Display for Stats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "capacity (buckets): {}", self.capacity)?;
        writeln!(f, "items (entries): {}", self.len)?;
        writeln!(f, "empty buckets: {}", self.empty_buckets)?;
        writeln!(f, "overflown buckets: {}", self.overflow_buckets)?;
        write!(f, "load factor: {:.3}", self.load_factor)
    }
}

impl<V, H> ChainTable<V, H>
where
    H: ByteHash,
{
    /// Build a table with `capacity` buckets (clamped to at least 1),
    /// a sanitized copy of `config`, and the given hasher.
    pub fn with_hasher(capacity: usize, config: Config, hasher: H) -> Self {
        let capacity = capacity.max(1);
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, || None);
        Self {
            hasher,
            buckets,
            len: 0,
            config: config.sanitized(),
            reentry: ReentryCheck::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    #[inline]
    fn bucket_of(&self, hash: u32) -> usize {
        hash as usize % self.buckets.len()
    }

    /// Insert or update. Returns the displaced value when the key was
    /// already present (entry count unchanged); `None` on a fresh
    /// insert. Growth runs synchronously after a fresh insert once the
    /// load factor strictly exceeds the configured maximum; a failed
    /// growth allocation leaves the insert successful and the table
    /// operating over-threshold.
    pub fn set(&mut self, key: &[u8], value: V) -> Option<V> {
        let _g = self.reentry.enter();
        let hash = self.hasher.hash_bytes(key);
        let idx = self.bucket_of(hash);
        let mut link = &mut self.buckets[idx];
        loop {
            match link {
                Some(entry) if entry.matches(hash, key) => {
                    return Some(core::mem::replace(&mut entry.value, value));
                }
                Some(entry) => link = &mut entry.next,
                None => break,
            }
        }
        *link = Some(Box::new(Entry {
            key: key.into(),
            hash,
            value,
            next: None,
        }));
        self.len += 1;
        // Growth never re-invokes the hash function, so the reentry
        // guard can be released before it runs.
        drop(_g);
        if self.load_factor() > self.config.max_load_factor {
            let _ = self.grow();
        }
        None
    }

    pub fn get(&self, key: &[u8]) -> Option<&V> {
        let _g = self.reentry.enter();
        let hash = self.hasher.hash_bytes(key);
        let mut cur = self.buckets[self.bucket_of(hash)].as_deref();
        while let Some(entry) = cur {
            if entry.matches(hash, key) {
                return Some(&entry.value);
            }
            cur = entry.next.as_deref();
        }
        None
    }

    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        let _g = self.reentry.enter();
        let hash = self.hasher.hash_bytes(key);
        let idx = self.bucket_of(hash);
        let mut cur = self.buckets[idx].as_deref_mut();
        while let Some(entry) = cur {
            if entry.matches(hash, key) {
                return Some(&mut entry.value);
            }
            cur = entry.next.as_deref_mut();
        }
        None
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Unlink and free the node for `key`, returning its value. The
    /// table never shrinks on removal.
    pub fn remove(&mut self, key: &[u8]) -> Option<V> {
        let _g = self.reentry.enter();
        let hash = self.hasher.hash_bytes(key);
        let idx = self.bucket_of(hash);
        let mut link = &mut self.buckets[idx];
        loop {
            let found = match link.as_deref() {
                None => return None,
                Some(entry) => entry.matches(hash, key),
            };
            if found {
                // Splice the successor into the link the node hung from.
                let mut node = link.take()?;
                *link = node.next.take();
                self.len -= 1;
                return Some(node.value);
            }
            link = match link {
                Some(entry) => &mut entry.next,
                None => return None,
            };
        }
    }

    /// Grow by the configured factor and relink every node under the
    /// new capacity. Nodes are moved, never re-allocated: key storage
    /// is untouched and the entry count cannot change. Relinking
    /// prepends, so intra-chain order comes out reversed; callers must
    /// not rely on chain order across a resize.
    ///
    /// Returns false without touching the table when the new bucket
    /// array cannot be allocated or the capacity would not change.
    fn grow(&mut self) -> bool {
        let old_capacity = self.buckets.len();
        let new_capacity = match old_capacity.checked_mul(self.config.growth_factor) {
            Some(n) if n > old_capacity => n,
            _ => return false,
        };
        let mut next = Vec::new();
        if next.try_reserve_exact(new_capacity).is_err() {
            return false;
        }
        next.resize_with(new_capacity, || None);

        let old = core::mem::replace(&mut self.buckets, next);
        for mut head in old {
            while let Some(mut node) = head {
                head = node.next.take();
                let idx = self.bucket_of(node.hash);
                node.next = self.buckets[idx].take();
                self.buckets[idx] = Some(node);
            }
        }
        true
    }

    /// Scan bucket occupancy. Read-only; linear in capacity.
    pub fn stats(&self) -> Stats {
        let mut empty_buckets = 0;
        let mut overflow_buckets = 0;
        for slot in &self.buckets {
            match slot {
                None => empty_buckets += 1,
                Some(entry) if entry.next.is_some() => overflow_buckets += 1,
                Some(_) => {}
            }
        }
        Stats {
            capacity: self.buckets.len(),
            len: self.len,
            empty_buckets,
            overflow_buckets,
            load_factor: self.load_factor(),
        }
    }

    /// Lazy traversal of all entries, bucket-index order, chain order
    /// within a bucket. Order is not stable across resizes.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            cur: None,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            buckets: self.buckets.iter_mut(),
            cur: None,
        }
    }
}

impl<V, H> Drop for ChainTable<V, H> {
    fn drop(&mut self) {
        // Unlink iteratively; dropping a long chain through the default
        // recursive Box drop would be bounded by stack depth.
        for slot in &mut self.buckets {
            let mut head = slot.take();
            while let Some(mut node) = head {
                head = node.next.take();
            }
        }
    }
}

/// Immutable entry iterator yielding `(key, &value)`.
pub struct Iter<'a, V> {
    buckets: core::slice::Iter<'a, Link<V>>,
    cur: Option<&'a Entry<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a [u8], &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.cur {
                self.cur = entry.next.as_deref();
                return Some((&entry.key[..], &entry.value));
            }
            self.cur = self.buckets.next()?.as_deref();
        }
    }
}

/// Mutable entry iterator yielding `(key, &mut value)`. Keys stay
/// immutable; only values can be changed in place.
pub struct IterMut<'a, V> {
    buckets: core::slice::IterMut<'a, Link<V>>,
    cur: Option<&'a mut Entry<V>>,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a [u8], &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.cur.take() {
                self.cur = entry.next.as_deref_mut();
                return Some((&entry.key[..], &mut entry.value));
            }
            self.cur = self.buckets.next()?.as_deref_mut();
        }
    }
}
