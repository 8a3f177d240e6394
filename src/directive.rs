//! Format-string grammar.
//!
//! Both grammars share one lexical unit: a type letter, optionally followed by
//! decimal digits or `*` (strings only).
//!
//! | Letter | Field                         |
//! |--------|-------------------------------|
//! | `n`    | 16-bit unsigned integer       |
//! | `N`    | 32-bit unsigned integer       |
//! | `x`    | one zero byte (pack only)     |
//! | `a`    | string, see [`Directive`]     |
//!
//! ## Pack grammar
//!
//! Directives are concatenated without separators, e.g. `nNa5xa1`. Digits after
//! `a` are the field width; digits after `n`, `N` or `x` are accepted and
//! ignored, so `n2` is a single 16-bit field. Anything else is a
//! [`PackError::MalformedDirective`].
//!
//! ## Unpack grammar
//!
//! Segments are separated by `/` and carry a field name, e.g.
//! `nfred/Njim/a5shiela/a*xnote`. For `n` and `N` everything after the letter
//! is the name. For `a` an optional width or `*` may follow, then an optional
//! `x` marking a NUL-terminated field, then the name. Unpack fields are
//! described by [`FieldType`] rather than [`Directive`]. A name that itself
//! starts with `x` therefore cannot directly follow a width. Empty segments and
//! segments starting with any other letter are skipped.

use log::debug;

use crate::error::PackError;

/// One directive of a pack format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// `n`: 16-bit unsigned integer.
    UInt16,
    /// `N`: 32-bit unsigned integer.
    UInt32,
    /// `x`: a single zero byte, consumes no value.
    Pad,
    /// `a<width>`: exactly `width` bytes. Packing pads with NUL or truncates;
    /// unpacking keeps the bytes verbatim, NULs included.
    FixedString(usize),
    /// `a*`: trailing NULs are stripped and the rest is written with no
    /// terminator.
    TailString,
}

impl Directive {
    /// Type letter this directive was written with.
    pub fn letter(self) -> char {
        match self {
            Self::UInt16 => 'n',
            Self::UInt32 => 'N',
            Self::Pad => 'x',
            Self::FixedString(_) | Self::TailString => 'a',
        }
    }

    /// Whether packing this directive takes a value from the argument list.
    pub fn consumes_value(self) -> bool {
        !matches!(self, Self::Pad)
    }
}

/// Layout of one field in an unpack format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// `n`: 16-bit unsigned integer.
    UInt16,
    /// `N`: 32-bit unsigned integer.
    UInt32,
    /// `a<width>`: exactly `width` bytes, NULs included.
    FixedString(usize),
    /// `a*`: bytes up to the first NUL, which is not consumed.
    TailString,
    /// `a*x` / `a<width>x`: bytes up to the first NUL, which is consumed.
    /// With a width the scan stops after `width` bytes.
    NulTerminated(Option<usize>),
}

/// A named field from an unpack format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    /// Key of the decoded value.
    pub name: String,
    /// How the value is laid out.
    pub kind: FieldType,
}

impl Field {
    fn new(name: &str, kind: FieldType) -> Self {
        Self {
            name: name.to_owned(),
            kind,
        }
    }
}

/// Parse a pack format into its directives, left to right.
///
/// # Errors
///
/// [`PackError::MalformedDirective`] for an unknown type letter, a `*` that
/// does not follow `a`, or a width that does not fit in `usize`.
pub fn parse_pack_format(format: &str) -> Result<Vec<Directive>, PackError> {
    let mut directives = Vec::new();
    let mut chars = format.char_indices().peekable();

    while let Some((offset, letter)) = chars.next() {
        let body_start = offset + letter.len_utf8();
        let mut end = body_start;

        let tail = letter == 'a' && chars.next_if(|&(_, c)| c == '*').is_some();
        if tail {
            end += 1;
        } else {
            while let Some((i, _)) = chars.next_if(|&(_, c)| c.is_ascii_digit()) {
                end = i + 1;
            }
        }

        let token = &format[offset..end];
        let malformed = || PackError::MalformedDirective {
            token: token.to_owned(),
            offset,
        };

        let directive = match letter {
            'n' => Directive::UInt16,
            'N' => Directive::UInt32,
            'x' => Directive::Pad,
            'a' if tail => Directive::TailString,
            'a' => {
                let digits = &format[body_start..end];
                let width = if digits.is_empty() {
                    0
                } else {
                    digits.parse::<usize>().map_err(|_| malformed())?
                };
                Directive::FixedString(width)
            }
            _ => return Err(malformed()),
        };
        directives.push(directive);
    }

    Ok(directives)
}

/// Parse an unpack format into named fields, in segment order.
///
/// Unknown and malformed segments are skipped.
///
/// # Errors
///
/// [`PackError::DuplicateField`] when two segments share a name.
pub fn parse_unpack_format(format: &str) -> Result<Vec<Field>, PackError> {
    let mut fields: Vec<Field> = Vec::new();

    for segment in format.split('/') {
        let Some(field) = parse_segment(segment) else {
            if !segment.is_empty() {
                debug!("skipping unrecognised unpack segment {segment:?}");
            }
            continue;
        };

        if fields.iter().any(|f| f.name == field.name) {
            return Err(PackError::DuplicateField(field.name));
        }
        fields.push(field);
    }

    Ok(fields)
}

fn parse_segment(segment: &str) -> Option<Field> {
    let mut chars = segment.chars();
    let letter = chars.next()?;
    let rest = chars.as_str();

    match letter {
        'n' => return Some(Field::new(rest, FieldType::UInt16)),
        'N' => return Some(Field::new(rest, FieldType::UInt32)),
        'a' => {}
        _ => return None,
    }

    if let Some(after) = rest.strip_prefix('*') {
        return Some(match after.strip_prefix('x') {
            Some(name) => Field::new(name, FieldType::NulTerminated(None)),
            None => Field::new(after, FieldType::TailString),
        });
    }

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return Some(Field::new(rest, FieldType::FixedString(0)));
    }

    let width = rest[..digits].parse::<usize>().ok()?;
    let after = &rest[digits..];
    Some(match after.strip_prefix('x') {
        Some(name) => Field::new(name, FieldType::NulTerminated(Some(width))),
        None => Field::new(after, FieldType::FixedString(width)),
    })
}
