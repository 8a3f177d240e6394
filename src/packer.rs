//! Byte-order configuration shared by the pack and unpack engines.

use std::io::Write;

use crate::error::PackError;
use crate::pack::pack_into;
use crate::sink::{ByteSink, Endianness};
use crate::unpack::unpack_with;
use crate::value::{Unpacked, Value};

/// Packs and unpacks format strings in a fixed byte order.
///
/// The default is big-endian, which is what [`pack`](crate::pack) and
/// [`unpack`](crate::unpack) use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Packer {
    order: Endianness,
}

impl Packer {
    /// Create a packer for the given byte order.
    pub fn new(order: Endianness) -> Self {
        Self { order }
    }

    /// Byte order used for integer fields.
    pub fn order(self) -> Endianness {
        self.order
    }

    /// Pack into a fresh buffer. See [`pack`](crate::pack) for the lockstep
    /// and truncation rules.
    pub fn pack(&self, format: &str, values: &[Value]) -> Result<Vec<u8>, PackError> {
        let mut buffer = Vec::new();
        self.pack_to(&mut buffer, format, values)?;
        Ok(buffer)
    }

    /// Pack into a caller-supplied writer.
    ///
    /// On failure the bytes written so far stay in `writer`; they are a
    /// partial record and should not be trusted.
    pub fn pack_to<W: Write>(
        &self,
        writer: &mut W,
        format: &str,
        values: &[Value],
    ) -> Result<(), PackError> {
        let mut sink = ByteSink::new(self.order, writer);
        pack_into(&mut sink, format, values)?;
        sink.finish()?;
        Ok(())
    }

    /// Unpack a named format from `buffer`.
    pub fn unpack(&self, format: &str, buffer: &[u8]) -> Result<Unpacked, PackError> {
        unpack_with(self.order, format, buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Accepts up to `limit` bytes, then fails.
    struct ShortWriter {
        accepted: Vec<u8>,
        limit: usize,
    }

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.accepted.len() + buf.len() > self.limit {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.accepted.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_is_big_endian() {
        assert_eq!(Packer::default().order(), Endianness::Big);
    }

    #[test]
    fn test_little_endian_pack() {
        let packer = Packer::new(Endianness::Little);
        let bytes = packer.pack("nN", &[0x0102u16.into(), 0x0304_0506u32.into()]).unwrap();
        assert_eq!(bytes, vec![2, 1, 6, 5, 4, 3]);

        let fields = packer.unpack("na/Nb", &bytes).unwrap();
        assert_eq!(fields.get("a"), Some(&Value::UInt16(0x0102)));
        assert_eq!(fields.get("b"), Some(&Value::UInt32(0x0304_0506)));
    }

    #[test]
    fn test_write_failure_keeps_partial_output() {
        let mut writer = ShortWriter {
            accepted: Vec::new(),
            limit: 3,
        };
        let values: [Value; 3] = [1u16.into(), 2u32.into(), "tail".into()];
        let err = Packer::default()
            .pack_to(&mut writer, "nNa4", &values)
            .unwrap_err();

        assert!(matches!(err, PackError::Write(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
        assert_eq!(writer.accepted, vec![0, 1]);
    }

    #[test]
    fn test_pack_to_appends() {
        let mut out = vec![0xAA];
        Packer::default()
            .pack_to(&mut out, "n", &[5u16.into()])
            .unwrap();
        assert_eq!(out, vec![0xAA, 0, 5]);
    }
}
