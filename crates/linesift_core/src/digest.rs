//! Per-line hashing: one table slot for chain routing plus the bloom bit
//! positions and their combined signature, from a single digest call.
//!
//! Slot routing uses xxh3; bloom positions come from double hashing over a
//! blake3 digest, `(h1 + i*h2) mod m_bits`. Both are pure functions of the
//! byte sequence — insert and query must see identical digests for identical
//! bytes, or the no-false-negative guarantee breaks.

use crate::index::IndexConfig;

#[inline]
fn h64(line: &[u8]) -> u64 {
    xxhash_rust::xxh3::xxh3_64(line)
}

/// Everything the index needs to know about one line's bytes.
#[derive(Debug, Clone)]
pub struct LineDigest {
    /// Bucket slot, already reduced modulo the bucket count.
    pub bucket: usize,
    /// Bloom bit positions, reduced modulo the bloom bit count. Empty when
    /// the bloom layer is disabled.
    pub bloom: Vec<u64>,
    /// Bitwise OR of the bloom positions; 0 when the bloom layer is disabled.
    pub signature: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct Digester {
    bucket_count: u64,
    bloom_bits: u64,
    bloom_hashes: u32,
}

impl Digester {
    pub fn new(cfg: &IndexConfig) -> Self {
        Self {
            bucket_count: cfg.bucket_count as u64,
            bloom_bits: cfg.bloom_bits,
            bloom_hashes: cfg.bloom_hashes,
        }
    }

    pub fn bloom_enabled(&self) -> bool {
        self.bloom_bits > 0 && self.bloom_hashes > 0
    }

    pub fn digest(&self, line: &[u8]) -> LineDigest {
        let bucket = (h64(line) % self.bucket_count) as usize;
        let mut bloom = Vec::new();
        let mut signature = 0u64;
        if self.bloom_enabled() {
            let dig = blake3::hash(line);
            let b = dig.as_bytes();
            let h1 = u64::from_le_bytes(b[0..8].try_into().unwrap());
            let h2 = u64::from_le_bytes(b[8..16].try_into().unwrap());
            bloom.reserve_exact(self.bloom_hashes as usize);
            for i in 0..self.bloom_hashes as u64 {
                let bit = h1.wrapping_add(i.wrapping_mul(h2)) % self.bloom_bits;
                signature |= bit;
                bloom.push(bit);
            }
        }
        LineDigest {
            bucket,
            bloom,
            signature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(buckets: usize, bits: u64, k: u32) -> IndexConfig {
        IndexConfig {
            bucket_count: buckets,
            bloom_bits: bits,
            bloom_hashes: k,
        }
    }

    #[test]
    fn deterministic() {
        let d = Digester::new(&cfg(1024, 4096, 4));
        let a = d.digest(b"the quick brown fox");
        let b = d.digest(b"the quick brown fox");
        assert_eq!(a.bucket, b.bucket);
        assert_eq!(a.bloom, b.bloom);
        assert_eq!(a.signature, b.signature);
    }

    #[test]
    fn values_in_range() {
        let d = Digester::new(&cfg(7, 100, 5));
        for line in [&b""[..], b"x", b"some longer line with spaces"] {
            let out = d.digest(line);
            assert!(out.bucket < 7);
            assert_eq!(out.bloom.len(), 5);
            assert!(out.bloom.iter().all(|&bit| bit < 100));
            assert_eq!(out.signature, out.bloom.iter().fold(0, |acc, &b| acc | b));
        }
    }

    #[test]
    fn disabled_bloom_yields_empty() {
        let d = Digester::new(&cfg(64, 4096, 0));
        assert!(!d.bloom_enabled());
        let out = d.digest(b"anything");
        assert!(out.bloom.is_empty());
        assert_eq!(out.signature, 0);

        let d = Digester::new(&cfg(64, 0, 4));
        assert!(!d.bloom_enabled());
        assert!(d.digest(b"anything").bloom.is_empty());
    }

    #[test]
    fn different_lines_diverge() {
        // Not a distribution test, just a sanity check that the family is
        // not degenerate on near-identical inputs.
        let d = Digester::new(&cfg(1 << 16, 1 << 20, 4));
        let a = d.digest(b"line one");
        let b = d.digest(b"line two");
        assert!(a.bucket != b.bucket || a.bloom != b.bloom);
    }
}
