//! bytemap: a single-threaded hash map from byte-sequence keys to
//! caller-supplied values, built on separate chaining with a pluggable
//! 32-bit hash function and load-factor-driven growth.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the container in small, independently checkable layers
//!   so each invariant lives in exactly one place.
//! - Layers:
//!   - `hash`: the `ByteHash` capability plus the default `Murmur3`
//!     (x86 32-bit, reference-compatible finalization).
//!   - `table::ChainTable<V, H>`: bucket array, single-owner `Box`
//!     collision chains, insert/lookup/remove/iterate, and the growth
//!     controller; includes a debug-only reentry check around entry
//!     points that run caller hash code.
//!   - `map::ByteMap<V, H>`: public surface with defaulted
//!     construction, config sanitation, and `Stats` introspection.
//!
//! Constraints
//! - Single-threaded: no locking, no atomics; every operation runs to
//!   completion on the caller's thread. External synchronization is
//!   required for any multi-thread use.
//! - Chain nodes are exclusively owned by their bucket slot or
//!   predecessor (`Option<Box<...>>` links), so unlink/free is
//!   compiler-checked rather than conventional.
//! - Each node stores its hash at insert; the caller's hash function is
//!   never re-invoked for an existing entry, so growth relinks nodes
//!   without running user code.
//! - Growth only: removals never shrink the bucket array.
//!
//! Reentrancy policy
//! - `ChainTable` methods invoke user code only via `H::hash_bytes`
//!   while resolving a bucket. A debug-only guard at each entry point
//!   panics on nested entry while internal state may be transiently
//!   inconsistent; release builds compile the check away.
//!
//! Behavior deliberately left unguaranteed
//! - Intra-chain entry order across a resize (relinking prepends, which
//!   reverses it).
//! - Iteration order across resizes.
//!
//! Failure model
//! - Not-found is a normal `None`, never an error.
//! - A growth allocation failure is absorbed: the triggering insert
//!   still succeeds and the table keeps operating over-threshold,
//!   observable only through `load_factor()`/`stats()`.

mod config;
mod guard;
mod hash;
mod map;
pub mod table;
mod table_proptest;

// Public surface
pub use config::{Config, DEFAULT_GROWTH_FACTOR, DEFAULT_MAX_LOAD_FACTOR};
pub use hash::{ByteHash, HashFn, Murmur3};
pub use map::ByteMap;
pub use table::{Iter, IterMut, Stats, DEFAULT_CAPACITY};
