//! Byte-buffer hashing: the `ByteHash` capability and the default
//! MurmurHash3 (x86, 32-bit) implementation.
//!
//! The table is polymorphic over "anything that maps a byte slice to a
//! `u32`". The choice is fixed at construction, so no dynamic dispatch
//! is involved; swapping the hasher changes bucket distribution but not
//! correctness.

/// A deterministic 32-bit hash over a byte buffer.
///
/// Identical byte content must produce identical output regardless of
/// call site. Implementations should avalanche well enough that similar
/// inputs map to dissimilar outputs; a weak hasher degrades chains, not
/// correctness.
pub trait ByteHash {
    fn hash_bytes(&self, bytes: &[u8]) -> u32;
}

/// MurmurHash3, x86 32-bit variant.
///
/// Processes input in 4-byte little-endian blocks with a scalar tail
/// finisher, and reproduces the reference avalanche finalization
/// (xor-shift/multiply sequence) bit for bit, so bucket distribution is
/// binary-compatible with the reference implementation for a given seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Murmur3 {
    seed: u32,
}

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

impl Murmur3 {
    pub const fn with_seed(seed: u32) -> Self {
        Self { seed }
    }

    pub const fn seed(&self) -> u32 {
        self.seed
    }

    #[inline]
    fn mix_block(mut k: u32) -> u32 {
        k = k.wrapping_mul(C1);
        k = k.rotate_left(15);
        k.wrapping_mul(C2)
    }
}

impl Default for Murmur3 {
    /// Seed 1, matching the distribution the table historically used.
    fn default() -> Self {
        Self::with_seed(1)
    }
}

impl ByteHash for Murmur3 {
    fn hash_bytes(&self, bytes: &[u8]) -> u32 {
        let mut h = self.seed;

        let mut blocks = bytes.chunks_exact(4);
        for block in &mut blocks {
            let k = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
            h ^= Self::mix_block(k);
            h = h.rotate_left(13).wrapping_mul(5).wrapping_add(0xe654_6b64);
        }

        let tail = blocks.remainder();
        if !tail.is_empty() {
            let mut k = 0u32;
            for (i, &b) in tail.iter().enumerate() {
                k ^= u32::from(b) << (8 * i);
            }
            h ^= Self::mix_block(k);
        }

        h ^= bytes.len() as u32;
        h ^= h >> 16;
        h = h.wrapping_mul(0x85eb_ca6b);
        h ^= h >> 13;
        h = h.wrapping_mul(0xc2b2_ae35);
        h ^= h >> 16;
        h
    }
}

/// Adapter letting any `Fn(&[u8]) -> u32` serve as a table hasher.
///
/// A newtype rather than a blanket impl so it cannot collide with
/// other `ByteHash` implementations.
#[derive(Clone, Copy, Debug)]
pub struct HashFn<F>(pub F);

impl<F> ByteHash for HashFn<F>
where
    F: Fn(&[u8]) -> u32,
{
    fn hash_bytes(&self, bytes: &[u8]) -> u32 {
        (self.0)(bytes)
    }
}
