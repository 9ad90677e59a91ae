// ByteMap integration suite.
//
// Each test documents what behavior is being verified and which
// invariants are assumed or asserted. The core invariants exercised:
// - Retrievability: distinct keys hold distinct values simultaneously,
//   independent of insertion order.
// - Update semantics: re-setting a key replaces the value in place and
//   never changes the entry count.
// - Growth: resizes are invisible except through capacity/load factor;
//   every entry survives any number of them.
// - Removal: a removed key reads as not-found; counts move by exactly
//   one; removing an absent key is a no-op.
// - Load factor: count/capacity never exceeds the configured maximum
//   after a successful set (allocations do not fail under test).
use bytemap::{ByteMap, Config, HashFn};

// Test: distinct keys coexist regardless of insertion order.
// Assumes: keys differing in content or length are distinct entries.
// Verifies: every (key, value) pair reads back under both orders.
#[test]
fn distinct_keys_hold_simultaneously() {
    let pairs: &[(&[u8], i32)] = &[
        (b"alpha", 1),
        (b"beta", 2),
        (b"alph", 3),
        (b"alphaa", 4),
        (b"", 5),
    ];

    let mut forward: ByteMap<i32> = ByteMap::new();
    for &(k, v) in pairs {
        forward.set(k, v);
    }
    let mut backward: ByteMap<i32> = ByteMap::new();
    for &(k, v) in pairs.iter().rev() {
        backward.set(k, v);
    }

    for &(k, v) in pairs {
        assert_eq!(forward.get(k), Some(&v));
        assert_eq!(backward.get(k), Some(&v));
    }
    assert_eq!(forward.len(), pairs.len());
    assert_eq!(backward.len(), pairs.len());
}

// Test: idempotence of set with an identical value.
// Verifies: count unchanged, value unchanged.
#[test]
fn set_is_idempotent() {
    let mut m: ByteMap<i32> = ByteMap::new();
    m.set(b"k", 9);
    let before = m.len();
    assert_eq!(m.set(b"k", 9), Some(9));
    assert_eq!(m.len(), before);
    assert_eq!(m.get(b"k"), Some(&9));
}

// Test: update semantics.
// Verifies: second set displaces the first value; count unchanged.
#[test]
fn set_updates_in_place() {
    let mut m: ByteMap<&str> = ByteMap::new();
    m.set(b"k", "v1");
    let before = m.len();
    assert_eq!(m.set(b"k", "v2"), Some("v1"));
    assert_eq!(m.get(b"k"), Some(&"v2"));
    assert_eq!(m.len(), before);
}

// Test: round trip under repeated growth.
// Assumes: capacity 4, max load factor 0.75, growth factor 2, so 64
// distinct keys force five resizes (4 -> 8 -> 16 -> 32 -> 64 -> 128).
// Verifies: every originally stored value is returned unchanged.
#[test]
fn round_trip_across_many_resizes() {
    let mut m: ByteMap<u32> = ByteMap::with_capacity(4);
    let initial = m.capacity();
    let mut resizes = 0;
    let mut last = initial;
    for i in 0..64u32 {
        m.set(format!("word-{i:04}").as_bytes(), i * 31);
        if m.capacity() != last {
            resizes += 1;
            last = m.capacity();
        }
    }
    assert!(resizes >= 3, "expected at least 3 resizes, saw {resizes}");
    assert_eq!(m.len(), 64);
    for i in 0..64u32 {
        assert_eq!(m.get(format!("word-{i:04}").as_bytes()), Some(&(i * 31)));
    }
}

// Test: removal semantics.
// Verifies: removed keys read as not-found, count moves by exactly one,
// and removing an absent key changes nothing.
#[test]
fn remove_semantics() {
    let mut m: ByteMap<i32> = ByteMap::new();
    m.set(b"keep", 1);
    m.set(b"drop", 2);

    assert_eq!(m.remove(b"drop"), Some(2));
    assert_eq!(m.get(b"drop"), None);
    assert_eq!(m.len(), 1);

    assert_eq!(m.remove(b"never-existed"), None);
    assert_eq!(m.len(), 1);
    assert_eq!(m.get(b"keep"), Some(&1));
}

// Test: the load-factor bound holds after every successful set.
// Assumes: allocations do not fail under test, so the degraded mode
// escape hatch never applies.
#[test]
fn load_factor_bounded_after_every_set() {
    let mut m: ByteMap<usize> = ByteMap::with_capacity(2);
    let max = m.config().max_load_factor;
    for i in 0..500usize {
        m.set(i.to_string().as_bytes(), i);
        assert!(
            m.load_factor() <= max,
            "load factor {} exceeded {} after insert {}",
            m.load_factor(),
            max,
            i
        );
    }
}

// Test: the documented growth scenario, verbatim.
// Verifies: capacity 4 holds three entries (load reaches 0.75 without
// exceeding it); the fourth insert doubles capacity to 8 and all four
// keys stay retrievable with their original values.
#[test]
fn capacity_four_scenario() {
    let mut m: ByteMap<i32> = ByteMap::with_config(
        4,
        Config {
            max_load_factor: 0.75,
            growth_factor: 2,
        },
    );
    m.set(b"one", 1);
    m.set(b"two", 2);
    m.set(b"three", 3);
    assert_eq!(m.capacity(), 4);

    m.set(b"four", 4);
    assert_eq!(m.capacity(), 8);
    assert_eq!(m.get(b"one"), Some(&1));
    assert_eq!(m.get(b"two"), Some(&2));
    assert_eq!(m.get(b"three"), Some(&3));
    assert_eq!(m.get(b"four"), Some(&4));
}

// Test: iteration yields each live entry exactly once, after growth and
// removals, with values current.
#[test]
fn iteration_yields_live_entries_once() {
    let mut m: ByteMap<u32> = ByteMap::with_capacity(2);
    for i in 0..40u32 {
        m.set(format!("it-{i}").as_bytes(), i);
    }
    for i in (0..40u32).step_by(2) {
        m.remove(format!("it-{i}").as_bytes());
    }
    for (_k, v) in m.iter_mut() {
        *v += 100;
    }

    let mut seen: Vec<(Vec<u8>, u32)> = m.iter().map(|(k, v)| (k.to_vec(), *v)).collect();
    seen.sort();
    assert_eq!(seen.len(), 20);
    for (k, v) in seen {
        let i: u32 = std::str::from_utf8(&k[3..]).unwrap().parse().unwrap();
        assert_eq!(i % 2, 1);
        assert_eq!(v, i + 100);
    }
}

// Test: a caller-substituted hash function only changes distribution.
// Assumes: a length-based hasher collides heavily for same-length keys.
// Verifies: correctness of set/get/remove is untouched; stats expose
// the skewed distribution.
#[test]
fn substituted_hasher_preserves_correctness() {
    let mut m: ByteMap<i32, _> = ByteMap::with_hasher(
        8,
        Config::default(),
        HashFn(|bytes: &[u8]| bytes.len() as u32),
    );
    m.set(b"aa", 1);
    m.set(b"bb", 2);
    m.set(b"cc", 3);
    m.set(b"x", 4);

    assert_eq!(m.stats().overflow_buckets, 1);
    assert_eq!(m.get(b"aa"), Some(&1));
    assert_eq!(m.get(b"bb"), Some(&2));
    assert_eq!(m.remove(b"bb"), Some(2));
    assert_eq!(m.get(b"cc"), Some(&3));
    assert_eq!(m.get(b"x"), Some(&4));
    assert_eq!(m.len(), 3);
}

// Test: stats snapshot consistency on a freshly built map.
#[test]
fn stats_snapshot_is_consistent() {
    let mut m: ByteMap<i32> = ByteMap::with_capacity(32);
    for i in 0..10i32 {
        m.set(format!("s{i}").as_bytes(), i);
    }
    let s = m.stats();
    assert_eq!(s.capacity, m.capacity());
    assert_eq!(s.len, 10);
    assert!(s.empty_buckets + s.overflow_buckets <= s.capacity);
    assert!((s.load_factor - 10.0 / s.capacity as f64).abs() < 1e-12);
}
