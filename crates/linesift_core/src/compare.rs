//! Driving a built index over the second source.

use crate::errors::Result;
use crate::index::MembershipIndex;
use crate::scan::LineReader;
use std::io::BufRead;

/// Totals from one comparison pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub scanned: u64,
    pub missing: u64,
}

/// Stream `input`, invoking `on_missing` for every line the index does not
/// contain. Found lines are left alone; membership is never consumed.
pub fn scan_missing<R, F>(
    index: &MembershipIndex,
    input: R,
    mut on_missing: F,
) -> Result<ScanSummary>
where
    R: BufRead,
    F: FnMut(u64, &[u8]) -> Result<()>,
{
    let mut rdr = LineReader::new(input);
    let mut summary = ScanSummary::default();
    while let Some(span) = rdr.next_line()? {
        summary.scanned += 1;
        if !index.query(span.bytes) {
            summary.missing += 1;
            on_missing(span.offset, span.bytes)?;
        }
    }
    tracing::debug!(
        scanned = summary.scanned,
        missing = summary.missing,
        "comparison pass done"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexConfig;
    use crate::source::SourceMap;
    use std::fs::File;
    use std::io::BufReader;
    use tempfile::tempdir;

    #[test]
    fn reports_only_missing_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, b"apple\nbanana\n").unwrap();

        let cfg = IndexConfig {
            bucket_count: 16,
            bloom_bits: 256,
            bloom_hashes: 2,
        };
        let mut idx = MembershipIndex::create(SourceMap::open(&path).unwrap(), cfg).unwrap();
        idx.load(BufReader::new(File::open(&path).unwrap())).unwrap();

        let b = b"banana\ncherry\napple\ndurian\n";
        let mut missing = Vec::new();
        let summary = scan_missing(&idx, &b[..], |off, line| {
            missing.push((off, line.to_vec()));
            Ok(())
        })
        .unwrap();

        assert_eq!(summary, ScanSummary { scanned: 4, missing: 2 });
        assert_eq!(
            missing,
            vec![(7, b"cherry".to_vec()), (20, b"durian".to_vec())]
        );
    }

    #[test]
    fn empty_candidate_source() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, b"x\n").unwrap();
        let mut idx = MembershipIndex::create(
            SourceMap::open(&path).unwrap(),
            IndexConfig {
                bucket_count: 4,
                bloom_bits: 0,
                bloom_hashes: 0,
            },
        )
        .unwrap();
        idx.load(BufReader::new(File::open(&path).unwrap())).unwrap();

        let summary = scan_missing(&idx, &b""[..], |_, _| panic!("no lines expected")).unwrap();
        assert_eq!(summary, ScanSummary::default());
    }
}
