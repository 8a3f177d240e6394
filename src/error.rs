//! Error types for packing and unpacking.

use std::io;

/// Not enough input left for a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("needed {needed} bytes but only {remaining} remain")]
pub struct Underrun {
    /// Bytes the read required.
    pub needed: usize,
    /// Bytes left after the cursor.
    pub remaining: usize,
}

/// Errors that can occur while packing or unpacking.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    /// The destination refused a write. Later pushes on the sink were skipped.
    #[error("write to destination failed: {0}")]
    Write(#[from] io::Error),

    /// A pack format token that matches no known directive.
    #[error("malformed directive {token:?} at offset {offset}")]
    MalformedDirective {
        /// The offending text.
        token: String,
        /// Byte offset of the token in the format string.
        offset: usize,
    },

    /// A value of the wrong kind was paired with a directive.
    #[error("value {index} is {found} but directive `{directive}` expects {expected}")]
    TypeMismatch {
        /// Position of the value in the argument list.
        index: usize,
        /// Type letter of the directive.
        directive: char,
        /// What the directive accepts.
        expected: &'static str,
        /// What was supplied.
        found: &'static str,
    },

    /// An integer value too wide for its directive.
    #[error("value {index} ({value}) does not fit directive `{directive}`")]
    OutOfRange {
        /// Position of the value in the argument list.
        index: usize,
        /// Type letter of the directive.
        directive: char,
        /// The rejected value.
        value: u32,
    },

    /// The input buffer ended inside a field.
    #[error("field `{field}`: {source}")]
    Truncated {
        /// Name of the field being decoded.
        field: String,
        /// How far short the buffer was.
        #[source]
        source: Underrun,
    },

    /// Decoded string bytes are not UTF-8.
    #[error("field `{field}` is not valid UTF-8")]
    InvalidText {
        /// Name of the field being decoded.
        field: String,
    },

    /// The same field name appears twice in one unpack format.
    #[error("field name `{0}` appears more than once")]
    DuplicateField(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = PackError::Write(io::Error::new(io::ErrorKind::Other, "disk full"));
        assert!(err.to_string().contains("disk full"));

        let err = PackError::MalformedDirective {
            token: "q".to_string(),
            offset: 3,
        };
        assert!(err.to_string().contains("offset 3"));

        let err = PackError::TypeMismatch {
            index: 1,
            directive: 'n',
            expected: "an unsigned integer",
            found: "text",
        };
        assert!(err.to_string().contains("value 1 is text"));

        let err = PackError::OutOfRange {
            index: 0,
            directive: 'n',
            value: 70_000,
        };
        assert!(err.to_string().contains("70000"));

        let err = PackError::InvalidText {
            field: "name".to_string(),
        };
        assert!(err.to_string().contains("not valid UTF-8"));

        let err = PackError::DuplicateField("fred".to_string());
        assert!(err.to_string().contains("`fred`"));
    }

    #[test]
    fn test_truncated_has_source() {
        let err = PackError::Truncated {
            field: "jim".to_string(),
            source: Underrun {
                needed: 4,
                remaining: 1,
            },
        };
        assert_eq!(
            err.to_string(),
            "field `jim`: needed 4 bytes but only 1 remain"
        );
        assert!(err.source().is_some());
    }
}
