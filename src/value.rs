//! Values exchanged with the pack and unpack engines.

use std::fmt;

/// A single field value.
///
/// Pack arguments are matched against directives at run time, so the checked
/// accessors below only succeed for lossless conversions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// 16-bit unsigned integer (`n`).
    UInt16(u16),
    /// 32-bit unsigned integer (`N`).
    UInt32(u32),
    /// String (`a`).
    Text(String),
}

impl Value {
    /// Short description of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UInt16(_) => "a 16-bit integer",
            Self::UInt32(_) => "a 32-bit integer",
            Self::Text(_) => "text",
        }
    }

    /// The value as a `u16`, if it is an integer that fits.
    pub fn as_u16(&self) -> Option<u16> {
        match *self {
            Self::UInt16(v) => Some(v),
            Self::UInt32(v) => u16::try_from(v).ok(),
            Self::Text(_) => None,
        }
    }

    /// The value as a `u32`, if it is an integer.
    pub fn as_u32(&self) -> Option<u32> {
        match *self {
            Self::UInt16(v) => Some(u32::from(v)),
            Self::UInt32(v) => Some(v),
            Self::Text(_) => None,
        }
    }

    /// The value as a string slice, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Self::UInt16(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::UInt32(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UInt16(v) => write!(f, "{v}"),
            Self::UInt32(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{}", s.escape_debug()),
        }
    }
}

/// Decoded fields in format-string order.
///
/// Lookup by name is a linear scan; formats are short.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unpacked {
    fields: Vec<(String, Value)>,
}

impl Unpacked {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, name: String, value: Value) {
        self.fields.push((name, value));
    }

    /// Number of decoded fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if nothing was decoded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Value of the field called `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Field names in decoding order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Iterate over `(name, value)` pairs in decoding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Consume into the ordered pairs.
    pub fn into_vec(self) -> Vec<(String, Value)> {
        self.fields
    }
}

impl IntoIterator for Unpacked {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
