//! The membership index: a bloom pre-filter over offset-ordered bucket
//! chains, with exact verification against the mapped source.
//!
//! Records never hold line bytes. Each one points back into the source by
//! (offset, len), and a query that survives the bloom and signature
//! pre-checks is settled by re-reading those bytes. Bloom false positives
//! and table collisions are expected here, not errors.
//!
//! All inserts must complete before the first query; the index is not
//! synchronized.

use crate::consts::{
    DEFAULT_BLOOM_BITS, DEFAULT_BLOOM_HASHES, DEFAULT_BUCKET_COUNT, MAX_LINE_BYTES,
};
use crate::digest::Digester;
use crate::errors::{Result, SiftError};
use crate::filter::Bloom;
use crate::scan::LineReader;
use crate::source::SourceMap;
use std::io::BufRead;

/// Index geometry, fixed at construction.
#[derive(Debug, Clone, Copy)]
pub struct IndexConfig {
    pub bucket_count: usize,
    /// Bloom array size in bits; 0 disables the bloom layer.
    pub bloom_bits: u64,
    /// Bloom hash functions per line; 0 disables the bloom layer.
    pub bloom_hashes: u32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            bloom_bits: DEFAULT_BLOOM_BITS,
            bloom_hashes: DEFAULT_BLOOM_HASHES,
        }
    }
}

impl IndexConfig {
    pub fn bloom_enabled(&self) -> bool {
        self.bloom_bits > 0 && self.bloom_hashes > 0
    }

    fn validate(&self) -> Result<()> {
        if self.bucket_count == 0 {
            return Err(SiftError::InvalidConfig(
                "bucket_count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// One indexed line of the source.
#[derive(Debug, Clone, Copy)]
struct LineRecord {
    offset: u64,
    len: u32,
    signature: u64,
}

/// Counters for the stats report.
#[derive(Debug, Clone, Copy)]
pub struct IndexStats {
    pub lines: u64,
    pub buckets: usize,
    pub buckets_used: usize,
    pub longest_chain: usize,
    pub bloom_bits_set: Option<u64>,
}

pub struct MembershipIndex {
    digester: Digester,
    bloom: Option<Bloom>,
    buckets: Vec<Vec<LineRecord>>,
    source: SourceMap,
    lines: u64,
}

impl MembershipIndex {
    /// Allocate an empty index over `source`.
    pub fn create(source: SourceMap, cfg: IndexConfig) -> Result<Self> {
        cfg.validate()?;
        let digester = Digester::new(&cfg);
        let bloom = cfg.bloom_enabled().then(|| Bloom::new(cfg.bloom_bits));
        let buckets = vec![Vec::new(); cfg.bucket_count];
        Ok(Self {
            digester,
            bloom,
            buckets,
            source,
            lines: 0,
        })
    }

    /// Record one line of the source. Chains stay ordered by offset; equal
    /// content at a different offset gets its own record.
    pub fn insert(&mut self, offset: u64, line: &[u8]) -> Result<()> {
        if line.len() > MAX_LINE_BYTES {
            return Err(SiftError::LineTooLong(line.len()));
        }
        let d = self.digester.digest(line);
        if let Some(bloom) = self.bloom.as_mut() {
            bloom.set_all(&d.bloom);
        }
        let rec = LineRecord {
            offset,
            len: line.len() as u32,
            signature: d.signature,
        };
        let chain = &mut self.buckets[d.bucket];
        let pos = chain.partition_point(|r| r.offset <= rec.offset);
        chain.insert(pos, rec);
        self.lines += 1;
        Ok(())
    }

    /// Feed every line of `input` into the index, offsets counted from the
    /// reader's current position. Returns the number of lines indexed.
    pub fn load<R: BufRead>(&mut self, input: R) -> Result<u64> {
        let mut rdr = LineReader::new(input);
        let mut n = 0u64;
        while let Some(span) = rdr.next_line()? {
            self.insert(span.offset, span.bytes)?;
            n += 1;
        }
        tracing::debug!(lines = n, "indexed reference source");
        Ok(n)
    }

    /// Exact membership: true iff some indexed line has identical bytes.
    pub fn query(&self, line: &[u8]) -> bool {
        if line.len() > MAX_LINE_BYTES {
            // nothing that long was ever indexed
            return false;
        }
        let d = self.digester.digest(line);
        if let Some(bloom) = self.bloom.as_ref() {
            if !bloom.contains_all(&d.bloom) {
                return false;
            }
        }
        let len = line.len() as u32;
        for rec in &self.buckets[d.bucket] {
            if rec.len != len || rec.signature != d.signature {
                continue;
            }
            // signature collisions happen; only the bytes decide
            match self.source.bytes_at(rec.offset, rec.len) {
                Some(stored) if stored == line => return true,
                _ => {}
            }
        }
        false
    }

    pub fn len(&self) -> u64 {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines == 0
    }

    pub fn stats(&self) -> IndexStats {
        let buckets_used = self.buckets.iter().filter(|c| !c.is_empty()).count();
        let longest_chain = self.buckets.iter().map(|c| c.len()).max().unwrap_or(0);
        IndexStats {
            lines: self.lines,
            buckets: self.buckets.len(),
            buckets_used,
            longest_chain,
            bloom_bits_set: self.bloom.as_ref().map(|b| b.set_bit_count()),
        }
    }
}
