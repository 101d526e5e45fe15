//! Seeded 64-bit hash functions used to map tokens onto `[0, u64::MAX]`.
//!
//! The estimator only relies on two properties of the hash: it is deterministic for a
//! given `(seed, token)` pair, and its output is uniform across distinct tokens.

use std::ops::BitXor;

/// Hash function parameterized by a 32-bit seed.
pub trait SeededHasher {
    /// Hash `bytes` with the given `seed`
    fn hash(bytes: &[u8], seed: u32) -> u64;
}

/// First 64 bits of MurmurHash3 x64-128, with both lanes seeded by the 32-bit seed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Murmur3Hasher;

impl SeededHasher for Murmur3Hasher {
    #[inline]
    fn hash(bytes: &[u8], seed: u32) -> u64 {
        (murmur3_x64_128(bytes, u64::from(seed)) >> 64) as u64
    }
}

/// WyHash with the seed widened to 64 bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WyHasher;

impl SeededHasher for WyHasher {
    #[inline]
    fn hash(bytes: &[u8], seed: u32) -> u64 {
        wyhash::wyhash(bytes, u64::from(seed))
    }
}

const C1: u64 = 0x87c3_7b91_1142_53d5;
const C2: u64 = 0x4cf5_ad43_2745_937f;

/// 128 bit version of MurmurHash3 for x64 architecture.
///
/// Returns `h1` in the upper 64 bits and `h2` in the lower 64 bits.
/// Reference implementation: https://github.com/aappleby/smhasher/blob/master/src/MurmurHash3.cpp
pub fn murmur3_x64_128(bytes: &[u8], seed: u64) -> u128 {
    let len = bytes.len();
    let mut h1 = seed;
    let mut h2 = seed;

    let mut blocks = bytes.chunks_exact(16);
    for block in &mut blocks {
        let (lo, hi) = block.split_at(8);
        let k1 = mix_k1(read_u64_le(lo));
        let k2 = mix_k2(read_u64_le(hi));

        h1 = h1
            .bitxor(k1)
            .rotate_left(27)
            .wrapping_add(h2)
            .wrapping_mul(5)
            .wrapping_add(0x52dc_e729);

        h2 = h2
            .bitxor(k2)
            .rotate_left(31)
            .wrapping_add(h1)
            .wrapping_mul(5)
            .wrapping_add(0x3849_5ab5);
    }

    let tail = blocks.remainder();
    if tail.len() > 8 {
        h2 ^= mix_k2(read_u64_le(&tail[8..]));
    }
    if !tail.is_empty() {
        h1 ^= mix_k1(read_u64_le(&tail[..tail.len().min(8)]));
    }

    h1 ^= len as u64;
    h2 ^= len as u64;
    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);

    h1 = fmix64(h1);
    h2 = fmix64(h2);

    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);

    (u128::from(h1) << 64) | u128::from(h2)
}

/// Little-endian read of up to 8 bytes, zero-padded
#[inline]
fn read_u64_le(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf[..bytes.len()].copy_from_slice(bytes);
    u64::from_le_bytes(buf)
}

#[inline]
fn mix_k1(k1: u64) -> u64 {
    k1.wrapping_mul(C1).rotate_left(31).wrapping_mul(C2)
}

#[inline]
fn mix_k2(k2: u64) -> u64 {
    k2.wrapping_mul(C2).rotate_left(33).wrapping_mul(C1)
}

/// Final avalanche mix
#[inline]
fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51_afd7_ed55_8ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    k ^= k >> 33;
    k
}
