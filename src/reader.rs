//! Sequential byte reader for parsing packed input.
//!
//! The read-side counterpart of [`ByteSink`](crate::ByteSink): a cursor over a
//! borrowed slice that decodes multi-byte values in a fixed byte order. Reads
//! are bounds-checked and never move the cursor when they fail.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::error::Underrun;
use crate::sink::Endianness;

/// Sequential byte reader over a borrowed buffer.
#[derive(Clone, Debug)]
pub struct ByteReader<'a> {
    /// Source data.
    data: &'a [u8],
    /// Order used for every multi-byte read.
    order: Endianness,
    /// Current byte position.
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a reader positioned at the start of `data`.
    pub fn new(order: Endianness, data: &'a [u8]) -> Self {
        Self {
            data,
            order,
            pos: 0,
        }
    }

    /// Get current byte position.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Get number of remaining bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Check if there are more bytes to read.
    #[inline]
    pub fn has_bytes(&self) -> bool {
        self.pos < self.data.len()
    }

    /// Borrow exactly `len` bytes and advance past them.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], Underrun> {
        let remaining = self.remaining();
        if remaining < len {
            return Err(Underrun {
                needed: len,
                remaining,
            });
        }

        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Advance `len` bytes without decoding them.
    pub fn skip(&mut self, len: usize) -> Result<(), Underrun> {
        self.read_bytes(len).map(|_| ())
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8, Underrun> {
        Ok(self.read_bytes(1)?[0])
    }

    /// Read a `u16` in the reader's byte order.
    pub fn read_u16(&mut self) -> Result<u16, Underrun> {
        let order = self.order;
        let bytes = self.read_bytes(2)?;
        Ok(match order {
            Endianness::Big => BigEndian::read_u16(bytes),
            Endianness::Little => LittleEndian::read_u16(bytes),
        })
    }

    /// Read a `u32` in the reader's byte order.
    pub fn read_u32(&mut self) -> Result<u32, Underrun> {
        let order = self.order;
        let bytes = self.read_bytes(4)?;
        Ok(match order {
            Endianness::Big => BigEndian::read_u32(bytes),
            Endianness::Little => LittleEndian::read_u32(bytes),
        })
    }

    /// Read a `u64` in the reader's byte order.
    pub fn read_u64(&mut self) -> Result<u64, Underrun> {
        let order = self.order;
        let bytes = self.read_bytes(8)?;
        Ok(match order {
            Endianness::Big => BigEndian::read_u64(bytes),
            Endianness::Little => LittleEndian::read_u64(bytes),
        })
    }

    /// Read up to the next zero byte.
    ///
    /// Returns the bytes before the terminator and moves past it. Without a
    /// terminator the rest of the buffer is returned and the reader ends up
    /// exhausted.
    pub fn read_until_nul(&mut self) -> &'a [u8] {
        self.read_until_nul_within(usize::MAX)
    }

    /// Like [`read_until_nul`](Self::read_until_nul), but looks at no more
    /// than `limit` bytes. If none of them is zero, all of them are returned
    /// and consumed.
    pub fn read_until_nul_within(&mut self, limit: usize) -> &'a [u8] {
        let start = self.pos.min(self.data.len());
        let window = &self.data[start..start + limit.min(self.data.len() - start)];
        match window.iter().position(|&b| b == 0) {
            Some(end) => {
                self.pos = start + end + 1;
                &window[..end]
            }
            None => {
                self.pos = start + window.len();
                window
            }
        }
    }
}
