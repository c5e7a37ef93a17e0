//! Newline framing over raw socket bytes.
//!
//! Records are UTF-8 text terminated by a single `\n`. A socket read may
//! deliver any byte split: several complete records, a trailing fragment,
//! or both. The framer consumes only complete records and retains the
//! fragment for the next read.

use bytes::{Buf, Bytes, BytesMut};

/// Accumulates received bytes and yields complete records.
#[derive(Debug, Default)]
pub struct LineFramer {
    buf: BytesMut,
}

impl LineFramer {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(1024),
        }
    }

    /// The receive buffer, for `AsyncReadExt::read_buf`.
    pub fn buffer_mut(&mut self) -> &mut BytesMut {
        &mut self.buf
    }

    /// Append bytes by hand (tests, or copy-based transports).
    pub fn extend(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// The next complete record without its terminator, or `None` when
    /// only an unterminated fragment remains. A trailing `\r` is
    /// stripped so CRLF peers work too.
    pub fn next_record(&mut self) -> Option<Bytes> {
        let pos = self.buf.iter().position(|&b| b == b'\n')?;
        let mut line = self.buf.split_to(pos);
        self.buf.advance(1);
        if line.last() == Some(&b'\r') {
            line.truncate(line.len() - 1);
        }
        Some(line.freeze())
    }

    /// Bytes currently held back as an incomplete fragment.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}
