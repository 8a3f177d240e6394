//! Pack engine.
//!
//! Walks the directives of a pack format together with the argument list and
//! writes each field to a [`ByteSink`].

use std::io::Write;

use log::{debug, trace};

use crate::directive::{parse_pack_format, Directive};
use crate::error::PackError;
use crate::packer::Packer;
use crate::sink::ByteSink;
use crate::value::Value;

/// Pack `values` according to `format`, big-endian.
///
/// Directives and values are consumed in lockstep and packing stops as soon
/// as either list runs out: directives after the last value (pads included)
/// are not written, and surplus values are ignored. A count mismatch is not an
/// error, so check the output length when it matters.
///
/// ```rust
/// use binpacker::pack;
///
/// let bytes = pack("nNa5xa1", &[1u16.into(), 2u32.into(), "Hello".into(), "!".into()])?;
/// assert_eq!(bytes, [0, 1, 0, 0, 0, 2, b'H', b'e', b'l', b'l', b'o', 0, b'!']);
/// # Ok::<(), binpacker::PackError>(())
/// ```
///
/// # Errors
///
/// A malformed format, or a value that does not suit its directive.
pub fn pack(format: &str, values: &[Value]) -> Result<Vec<u8>, PackError> {
    Packer::default().pack(format, values)
}

/// Pack into an existing sink. Stops early once the sink has failed; the
/// caller turns that state into an error.
pub(crate) fn pack_into<W: Write>(
    sink: &mut ByteSink<W>,
    format: &str,
    values: &[Value],
) -> Result<(), PackError> {
    let directives = parse_pack_format(format)?;

    let mut next = 0;
    let mut executed = 0;
    for &directive in &directives {
        if next == values.len() || sink.error().is_some() {
            break;
        }

        trace!("pack `{}` ({directive:?})", directive.letter());
        write_field(sink, directive, next, &values[next])?;
        if directive.consumes_value() {
            next += 1;
        }
        executed += 1;
    }

    if sink.error().is_none() && (executed < directives.len() || next < values.len()) {
        debug!(
            "pack truncated: ran {executed} of {} directives with {next} of {} values",
            directives.len(),
            values.len()
        );
    }

    Ok(())
}

/// Write one directive. `value` is the next pending argument; `Pad` leaves it
/// for the following directive.
fn write_field<W: Write>(
    sink: &mut ByteSink<W>,
    directive: Directive,
    index: usize,
    value: &Value,
) -> Result<(), PackError> {
    match directive {
        Directive::UInt16 => {
            let wide = integer(directive, index, value)?;
            let narrow = value.as_u16().ok_or(PackError::OutOfRange {
                index,
                directive: directive.letter(),
                value: wide,
            })?;
            sink.push_u16(narrow);
        }
        Directive::UInt32 => {
            sink.push_u32(integer(directive, index, value)?);
        }
        Directive::Pad => {
            sink.push_byte(0);
        }
        Directive::FixedString(width) => {
            let bytes = text(directive, index, value)?.as_bytes();
            let kept = bytes.len().min(width);
            sink.push_bytes(&bytes[..kept]).push_zeros(width - kept);
        }
        Directive::TailString => {
            sink.push_str(text(directive, index, value)?.trim_end_matches('\0'));
        }
    }
    Ok(())
}

fn integer(directive: Directive, index: usize, value: &Value) -> Result<u32, PackError> {
    value.as_u32().ok_or_else(|| PackError::TypeMismatch {
        index,
        directive: directive.letter(),
        expected: "an unsigned integer",
        found: value.kind(),
    })
}

fn text(directive: Directive, index: usize, value: &Value) -> Result<&str, PackError> {
    value.as_str().ok_or_else(|| PackError::TypeMismatch {
        index,
        directive: directive.letter(),
        expected: "text",
        found: value.kind(),
    })
}
