// Offset bookkeeping over an in-memory payload.

use crate::error::{CodecError, Result};
use std::io::Cursor;

/// Every header in the payload format is two signed bytes.
pub const HEADER_LEN: usize = 2;

pub trait ByteCursor {
    fn offset(&self) -> usize;

    fn length(&self) -> usize;

    fn remaining(&self) -> usize {
        self.length().saturating_sub(self.offset())
    }

    /// `offset < length - 1`: a full header can still be read.
    fn has_header(&self) -> bool {
        self.remaining() >= HEADER_LEN
    }

    fn ensure_header(&self) -> Result<()> {
        if self.has_header() {
            Ok(())
        } else {
            Err(CodecError::BufferOverflow {
                offset: self.offset(),
                length: self.length(),
            })
        }
    }

    /// Reads one byte, or `None` once the payload is exhausted.
    fn next_u8(&mut self) -> Option<u8>;
}

impl<T: AsRef<[u8]>> ByteCursor for Cursor<T> {
    fn offset(&self) -> usize {
        self.position() as usize
    }

    fn length(&self) -> usize {
        self.get_ref().as_ref().len()
    }

    fn next_u8(&mut self) -> Option<u8> {
        let offset = self.offset();
        let byte = *self.get_ref().as_ref().get(offset)?;
        self.set_position(offset as u64 + 1);
        Some(byte)
    }
}

#[test]
fn header_guard_needs_two_bytes() {
    let data = [1u8, 2, 3];
    let mut cursor = Cursor::new(&data[..]);
    assert!(cursor.has_header());

    cursor.set_position(1);
    assert!(cursor.has_header());

    cursor.set_position(2);
    assert!(!cursor.has_header());
    assert!(matches!(
        cursor.ensure_header(),
        Err(CodecError::BufferOverflow {
            offset: 2,
            length: 3
        })
    ));
}

#[test]
fn next_u8_stops_at_end() {
    let data = [7u8, 9];
    let mut cursor = Cursor::new(&data[..]);
    assert_eq!(cursor.next_u8(), Some(7));
    assert_eq!(cursor.next_u8(), Some(9));
    assert_eq!(cursor.next_u8(), None);
    assert_eq!(cursor.offset(), 2);
    assert_eq!(cursor.remaining(), 0);
}

#[test]
fn remaining_saturates_past_end() {
    let data = [0u8; 4];
    let mut cursor = Cursor::new(data.to_vec());
    cursor.set_position(10);
    assert_eq!(cursor.remaining(), 0);
    assert!(!cursor.has_header());
}
