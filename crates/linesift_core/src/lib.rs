pub mod compare;
pub mod consts;
pub mod digest;
pub mod errors;
pub mod filter;
pub mod index;
pub mod scan;
pub mod source;

pub use compare::{scan_missing, ScanSummary};
pub use errors::{Result, SiftError};
pub use index::{IndexConfig, IndexStats, MembershipIndex};
pub use scan::{LineReader, LineSpan};
pub use source::SourceMap;
