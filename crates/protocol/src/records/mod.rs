//! Record definitions for the arena-snake wire protocol.
//!
//! Every record is one JSON object on its own `\n`-terminated line.
//! This module contains both client->server and server->client shapes
//! plus the encode helpers that produce framed lines.

mod client;
mod server;

pub use client::*;
pub use server::*;

use bytes::{BufMut, Bytes, BytesMut};
use serde::Serialize;

use crate::ProtocolError;

/// Serialize one record as JSON and append it to `buf`, terminated by
/// `\n`. Used to build the per-tick broadcast buffer incrementally.
pub fn write_record<T: Serialize>(buf: &mut BytesMut, record: &T) -> Result<(), ProtocolError> {
    serde_json::to_writer((&mut *buf).writer(), record)?;
    buf.put_u8(b'\n');
    Ok(())
}

/// Serialize one record as a standalone framed line.
pub fn encode_record<T: Serialize>(record: &T) -> Result<Bytes, ProtocolError> {
    let mut buf = BytesMut::with_capacity(128);
    write_record(&mut buf, record)?;
    Ok(buf.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec2D;

    #[test]
    fn test_encode_is_one_terminated_line() {
        let record = PowerupRecord {
            id: 7,
            loc: Vec2D::new(10.0, -20.0),
            died: false,
        };
        let line = encode_record(&record).unwrap();
        assert_eq!(line.last(), Some(&b'\n'));
        assert_eq!(line.iter().filter(|&&b| b == b'\n').count(), 1);
    }

    #[test]
    fn test_write_record_appends() {
        let mut buf = BytesMut::new();
        let a = PowerupRecord {
            id: 0,
            loc: Vec2D::default(),
            died: false,
        };
        let b = PowerupRecord {
            id: 1,
            loc: Vec2D::default(),
            died: true,
        };
        write_record(&mut buf, &a).unwrap();
        write_record(&mut buf, &b).unwrap();
        let text = String::from_utf8(buf.to_vec()).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
