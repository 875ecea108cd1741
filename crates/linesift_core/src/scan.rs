//! Binary-safe line scanning with byte offsets.
//!
//! Lines are split on `\n` only; the terminator is excluded from the span and
//! lengths are explicit, so embedded NUL bytes are ordinary data. A final
//! line without a trailing newline is still yielded.

use std::io::{self, BufRead};

/// One scanned line: where it starts in the input and its bytes.
#[derive(Debug, Clone, Copy)]
pub struct LineSpan<'a> {
    pub offset: u64,
    pub bytes: &'a [u8],
}

pub struct LineReader<R> {
    inner: R,
    offset: u64,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    /// Offsets count from the reader's current position, so hand over a
    /// reader positioned at the start of the source.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            offset: 0,
            buf: Vec::new(),
        }
    }

    /// Next line, or None at end of input.
    pub fn next_line(&mut self) -> io::Result<Option<LineSpan<'_>>> {
        self.buf.clear();
        let read = self.inner.read_until(b'\n', &mut self.buf)?;
        if read == 0 {
            return Ok(None);
        }
        let offset = self.offset;
        self.offset += read as u64;
        let mut bytes = self.buf.as_slice();
        if bytes.last() == Some(&b'\n') {
            bytes = &bytes[..bytes.len() - 1];
        }
        Ok(Some(LineSpan { offset, bytes }))
    }
}
