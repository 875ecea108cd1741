// crates/linesift_core/src/consts.rs

/// Hash-table bucket count used when the caller does not tune it.
pub const DEFAULT_BUCKET_COUNT: usize = 1_000_000;

/// Bloom array size in bits.
pub const DEFAULT_BLOOM_BITS: u64 = 10_000_000;

/// Bloom hash functions per line (0 disables the bloom layer).
pub const DEFAULT_BLOOM_HASHES: u32 = 4;

/// Line records carry u32 lengths; longer lines are rejected, never truncated.
pub const MAX_LINE_BYTES: usize = u32::MAX as usize;
