//! Unpack engine.
//!
//! Decodes the fields of an unpack format from a byte buffer with a single
//! cursor, strictly in the order the fields appear in the format.

use log::trace;

use crate::directive::{parse_unpack_format, Field, FieldType};
use crate::error::{PackError, Underrun};
use crate::packer::Packer;
use crate::reader::ByteReader;
use crate::sink::Endianness;
use crate::value::{Unpacked, Value};

/// Unpack `buffer` according to a named `format`, big-endian.
///
/// ```rust
/// use binpacker::{unpack, Value};
///
/// let fields = unpack("nfred/Njim/a5shiela", &[0, 1, 0, 0, 0, 2, b'H', b'e', b'l', b'l', b'o'])?;
/// assert_eq!(fields.get("jim"), Some(&Value::UInt32(2)));
/// assert_eq!(fields.names().collect::<Vec<_>>(), ["fred", "jim", "shiela"]);
/// # Ok::<(), binpacker::PackError>(())
/// ```
///
/// # Errors
///
/// [`PackError::Truncated`] when the buffer ends inside a field,
/// [`PackError::InvalidText`] for non UTF-8 strings and
/// [`PackError::DuplicateField`] for repeated names. No fields are returned
/// on failure.
pub fn unpack(format: &str, buffer: &[u8]) -> Result<Unpacked, PackError> {
    Packer::default().unpack(format, buffer)
}

pub(crate) fn unpack_with(
    order: Endianness,
    format: &str,
    buffer: &[u8],
) -> Result<Unpacked, PackError> {
    let fields = parse_unpack_format(format)?;
    let mut reader = ByteReader::new(order, buffer);
    let mut decoded = Unpacked::with_capacity(fields.len());

    for Field { name, kind } in fields {
        trace!("unpack `{name}` ({kind:?}) at offset {}", reader.position());
        let value = read_field(&mut reader, &name, kind)?;
        decoded.push(name, value);
    }

    Ok(decoded)
}

fn read_field(
    reader: &mut ByteReader<'_>,
    name: &str,
    kind: FieldType,
) -> Result<Value, PackError> {
    let truncated = |source: Underrun| PackError::Truncated {
        field: name.to_owned(),
        source,
    };

    match kind {
        FieldType::UInt16 => Ok(Value::UInt16(reader.read_u16().map_err(truncated)?)),
        FieldType::UInt32 => Ok(Value::UInt32(reader.read_u32().map_err(truncated)?)),
        FieldType::FixedString(width) => {
            text(name, reader.read_bytes(width).map_err(truncated)?)
        }
        FieldType::TailString | FieldType::NulTerminated(None) => {
            text(name, reader.read_until_nul())
        }
        FieldType::NulTerminated(Some(width)) => {
            text(name, reader.read_until_nul_within(width))
        }
    }
}

fn text(name: &str, bytes: &[u8]) -> Result<Value, PackError> {
    String::from_utf8(bytes.to_vec())
        .map(Value::Text)
        .map_err(|_| PackError::InvalidText {
            field: name.to_owned(),
        })
}
