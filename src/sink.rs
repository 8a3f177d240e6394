//! Sequential byte sink for building packed output.
//!
//! A [`ByteSink`] appends primitive values to any [`Write`] destination in a
//! byte order chosen once at construction. The first failed write is kept and
//! every later push becomes a no-op, so pushes can be chained and the error
//! checked once at the end:
//!
//! ```rust
//! use binpacker::{ByteSink, Endianness};
//!
//! let mut sink = ByteSink::new(Endianness::Big, Vec::new());
//! sink.push_u16(1).push_str("Hi");
//! assert!(sink.error().is_none());
//! assert_eq!(sink.finish().unwrap(), vec![0, 1, b'H', b'i']);
//! ```

#![allow(clippy::cast_sign_loss)]

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use std::io::{self, Read, Write};

/// Byte order of multi-byte values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endianness {
    /// Most significant byte first (network order).
    #[default]
    Big,
    /// Least significant byte first.
    Little,
}

/// Calls a `byteorder` extension method with the type parameter matching a
/// runtime [`Endianness`].
macro_rules! with_order {
    ($order:expr, $target:ident . $method:ident ( $($arg:expr),* )) => {
        match $order {
            Endianness::Big => $target.$method::<BigEndian>($($arg),*),
            Endianness::Little => $target.$method::<LittleEndian>($($arg),*),
        }
    };
}

/// Byte-order aware writer with a sticky error.
///
/// Not synchronized: one sink serves one sequential writer.
#[derive(Debug)]
pub struct ByteSink<W> {
    /// Output destination.
    writer: W,
    /// Order used for every multi-byte push.
    order: Endianness,
    /// First write failure, if any.
    error: Option<io::Error>,
}

impl<W: Write> ByteSink<W> {
    /// Create a sink writing to `writer` in the given byte order.
    pub fn new(order: Endianness, writer: W) -> Self {
        Self {
            writer,
            order,
            error: None,
        }
    }

    /// First error raised by the destination, if any.
    #[inline]
    pub fn error(&self) -> Option<&io::Error> {
        self.error.as_ref()
    }

    /// Borrow the destination.
    #[inline]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Return the destination, or the retained error if a push failed.
    pub fn finish(self) -> io::Result<W> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.writer),
        }
    }

    /// Return the destination regardless of the error state.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Run `write` unless an earlier push already failed.
    fn attempt<F>(&mut self, write: F) -> &mut Self
    where
        F: FnOnce(&mut W, Endianness) -> io::Result<()>,
    {
        if self.error.is_none() {
            if let Err(err) = write(&mut self.writer, self.order) {
                self.error = Some(err);
            }
        }
        self
    }

    /// Append a single byte.
    pub fn push_byte(&mut self, byte: u8) -> &mut Self {
        self.attempt(|w, _| w.write_u8(byte))
    }

    /// Append bytes verbatim.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.attempt(|w, _| w.write_all(bytes))
    }

    /// Append `count` zero bytes.
    pub fn push_zeros(&mut self, count: usize) -> &mut Self {
        let count = u64::try_from(count).unwrap_or(u64::MAX);
        self.attempt(|w, _| io::copy(&mut io::repeat(0).take(count), w).map(|_| ()))
    }

    /// Append a `u8`.
    pub fn push_u8(&mut self, value: u8) -> &mut Self {
        self.push_byte(value)
    }

    /// Append a `u16` in the sink's byte order.
    pub fn push_u16(&mut self, value: u16) -> &mut Self {
        self.attempt(|w, order| with_order!(order, w.write_u16(value)))
    }

    /// Append a `u32` in the sink's byte order.
    pub fn push_u32(&mut self, value: u32) -> &mut Self {
        self.attempt(|w, order| with_order!(order, w.write_u32(value)))
    }

    /// Append a `u64` in the sink's byte order.
    pub fn push_u64(&mut self, value: u64) -> &mut Self {
        self.attempt(|w, order| with_order!(order, w.write_u64(value)))
    }

    /// Append an `i8` as its unsigned bit pattern.
    pub fn push_i8(&mut self, value: i8) -> &mut Self {
        self.push_u8(value as u8)
    }

    /// Append an `i16` as its unsigned bit pattern.
    pub fn push_i16(&mut self, value: i16) -> &mut Self {
        self.push_u16(value as u16)
    }

    /// Append an `i32` as its unsigned bit pattern.
    pub fn push_i32(&mut self, value: i32) -> &mut Self {
        self.push_u32(value as u32)
    }

    /// Append an `i64` as its unsigned bit pattern.
    pub fn push_i64(&mut self, value: i64) -> &mut Self {
        self.push_u64(value as u64)
    }

    /// Append the IEEE-754 bits of an `f32`.
    pub fn push_f32(&mut self, value: f32) -> &mut Self {
        self.push_u32(value.to_bits())
    }

    /// Append the IEEE-754 bits of an `f64`.
    pub fn push_f64(&mut self, value: f64) -> &mut Self {
        self.push_u64(value.to_bits())
    }

    /// Append the UTF-8 bytes of a string, without padding or terminator.
    pub fn push_str(&mut self, s: &str) -> &mut Self {
        self.push_bytes(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts `capacity` bytes, then refuses every write.
    struct LimitedWriter {
        written: Vec<u8>,
        capacity: usize,
        calls: usize,
    }

    impl LimitedWriter {
        fn new(capacity: usize) -> Self {
            Self {
                written: Vec::new(),
                capacity,
                calls: 0,
            }
        }
    }

    impl Write for LimitedWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.calls += 1;
            if self.written.len() + buf.len() > self.capacity {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "full"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn big() -> ByteSink<Vec<u8>> {
        ByteSink::new(Endianness::Big, Vec::new())
    }

    #[test]
    fn test_push_byte() {
        let mut sink = big();
        sink.push_byte(0x01);
        assert!(sink.error().is_none());
        assert_eq!(sink.get_ref(), &[1]);
    }

    #[test]
    fn test_push_bytes() {
        let mut sink = big();
        sink.push_bytes(&[0x01, 0x02]);
        assert_eq!(sink.into_inner(), vec![1, 2]);
    }

    #[test]
    fn test_push_unsigned_big_endian() {
        let mut sink = big();
        sink.push_u8(1).push_u16(1).push_u32(1).push_u64(1);
        assert_eq!(
            sink.finish().unwrap(),
            vec![1, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1]
        );
    }

    #[test]
    fn test_push_unsigned_little_endian() {
        let mut sink = ByteSink::new(Endianness::Little, Vec::new());
        sink.push_u16(0x0102).push_u32(0x0304_0506);
        assert_eq!(sink.finish().unwrap(), vec![2, 1, 6, 5, 4, 3]);
    }

    #[test]
    fn test_push_signed_uses_bit_pattern() {
        let mut sink = big();
        sink.push_i8(-1).push_i16(-1).push_i32(-1).push_i64(-1);
        assert_eq!(sink.finish().unwrap(), vec![255; 15]);
    }

    #[test]
    fn test_push_smallest_subnormals() {
        let mut sink = big();
        sink.push_f32(f32::from_bits(1)).push_f64(f64::from_bits(1));
        assert_eq!(
            sink.finish().unwrap(),
            vec![0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1]
        );
    }

    #[test]
    fn test_push_zeros() {
        let mut sink = big();
        sink.push_byte(7).push_zeros(3).push_zeros(0);
        assert_eq!(sink.into_inner(), vec![7, 0, 0, 0]);
    }

    #[test]
    fn test_push_zeros_keeps_error() {
        let mut sink = ByteSink::new(Endianness::Big, LimitedWriter::new(2));
        sink.push_zeros(4).push_byte(1);
        assert_eq!(sink.error().map(io::Error::kind), Some(io::ErrorKind::WriteZero));
    }

    #[test]
    fn test_push_str() {
        let mut sink = big();
        sink.push_str("Hi");
        assert_eq!(sink.into_inner(), b"Hi".to_vec());
    }

    #[test]
    fn test_combined_push() {
        let mut sink = big();
        sink.push_u16(1).push_str("Hi");
        assert!(sink.error().is_none());
        assert_eq!(sink.into_inner(), vec![0, 1, b'H', b'i']);
    }

    #[test]
    fn test_error_is_sticky() {
        let mut sink = ByteSink::new(Endianness::Big, LimitedWriter::new(3));
        sink.push_u16(7).push_u16(8).push_byte(9).push_str("late");

        let err = sink.error().expect("second push should fail");
        assert_eq!(err.kind(), io::ErrorKind::WriteZero);

        let writer = sink.into_inner();
        assert_eq!(writer.written, vec![0, 7]);
        // Only the first two pushes reached the destination.
        assert_eq!(writer.calls, 2);
    }

    #[test]
    fn test_finish_returns_first_error() {
        let mut sink = ByteSink::new(Endianness::Big, LimitedWriter::new(0));
        sink.push_byte(1);
        assert!(sink.finish().is_err());
    }

    #[test]
    fn test_default_order_is_big() {
        assert_eq!(Endianness::default(), Endianness::Big);
    }
}
