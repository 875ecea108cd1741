use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use linesift_core::consts::{DEFAULT_BLOOM_BITS, DEFAULT_BLOOM_HASHES, DEFAULT_BUCKET_COUNT};
use linesift_core::{scan_missing, IndexConfig, MembershipIndex, SourceMap};

#[derive(Parser)]
#[command(
    name = "linesift",
    about = "Report lines of FILE_B that do not appear in FILE_A"
)]
struct Cli {
    /// Reference source; its lines are indexed
    file_a: PathBuf,

    /// Candidate source; lines absent from FILE_A are printed
    file_b: PathBuf,

    /// Hash-table bucket count
    #[arg(long, default_value_t = DEFAULT_BUCKET_COUNT)]
    buckets: usize,

    /// Bloom filter size in bits (0 disables the bloom layer)
    #[arg(long, default_value_t = DEFAULT_BLOOM_BITS)]
    bloom_bits: u64,

    /// Bloom hash functions per line (0 disables the bloom layer)
    #[arg(long, default_value_t = DEFAULT_BLOOM_HASHES)]
    bloom_hashes: u32,

    /// Print index and scan statistics to stderr
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let cfg = IndexConfig {
        bucket_count: cli.buckets,
        bloom_bits: cli.bloom_bits,
        bloom_hashes: cli.bloom_hashes,
    };

    let source = SourceMap::open(&cli.file_a)
        .with_context(|| format!("open {}", cli.file_a.display()))?;
    let mut index = MembershipIndex::create(source, cfg)?;

    let a = File::open(&cli.file_a)
        .with_context(|| format!("open {}", cli.file_a.display()))?;
    index
        .load(BufReader::new(a))
        .with_context(|| format!("index {}", cli.file_a.display()))?;

    let b = File::open(&cli.file_b)
        .with_context(|| format!("open {}", cli.file_b.display()))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = scan_missing(&index, BufReader::new(b), |_, line| {
        out.write_all(line)?;
        out.write_all(b"\n")?;
        Ok(())
    })
    .with_context(|| format!("scan {}", cli.file_b.display()))?;
    out.flush()?;

    if cli.stats {
        let st = index.stats();
        eprintln!(
            "index: lines={} buckets={} used={} longest_chain={}",
            st.lines, st.buckets, st.buckets_used, st.longest_chain
        );
        match st.bloom_bits_set {
            Some(set) => eprintln!("bloom: bits_set={set} of {}", cli.bloom_bits),
            None => eprintln!("bloom: disabled"),
        }
        eprintln!("scan : lines={} missing={}", summary.scanned, summary.missing);
    }

    Ok(())
}
