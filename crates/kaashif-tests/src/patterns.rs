//! Seeded byte buffers

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Random buffer of `len` bytes
pub fn random_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = vec![0u8; len];
    rng.fill(&mut data[..]);
    data
}

/// Random buffers with lengths drawn from `0..max_len`
pub fn random_buffers(seed: u64, count: usize, max_len: usize) -> Vec<Vec<u8>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let len = rng.gen_range(0..max_len);
            let mut data = vec![0u8; len];
            rng.fill(&mut data[..]);
            data
        })
        .collect()
}

/// Every byte value once, in order
pub fn all_bytes() -> Vec<u8> {
    (0..=255u8).collect()
}
