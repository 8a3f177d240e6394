//! # binpacker
//!
//! Pack and unpack binary records described by Perl `pack`-style format
//! strings.
//!
//! ## Design
//!
//! - **Two grammars** - positional pack formats (`nNa5xa1`) and named,
//!   `/`-separated unpack formats (`nfred/Njim/a5shiela`)
//! - **Ordered decoding** - fields are decoded and returned in format order
//! - **Sticky-error sink** - chained pushes, one error check at the end
//! - **Safe Rust** - `#![forbid(unsafe_code)]`
//!
//! ## API Overview
//!
//! ### High-Level Functions
//!
//! - [`pack()`] - Pack values into a big-endian byte buffer
//! - [`unpack()`] - Unpack a byte buffer into named values
//! - [`Packer`] - The same, in a chosen byte order or into any writer
//!
//! ### Low-Level Components
//!
//! - [`ByteSink`] - Byte-order aware writer with a sticky error
//! - [`ByteReader`] - Bounds-checked cursor over a byte slice
//! - [`parse_pack_format`] / [`parse_unpack_format`] - The directive parsers
//!
//! ## Format Letters
//!
//! | Letter | Pack                                   | Unpack                           |
//! |--------|----------------------------------------|----------------------------------|
//! | `n`    | 16-bit unsigned (`n2` is still one)    | 16-bit unsigned                  |
//! | `N`    | 32-bit unsigned                        | 32-bit unsigned                  |
//! | `x`    | one zero byte                          | not recognised, segment skipped  |
//! | `a5`   | 5 bytes, NUL-padded or truncated       | 5 bytes verbatim                 |
//! | `a*`   | string minus trailing NULs             | up to the first NUL              |
//! | `a*x`  | -                                      | up to the first NUL              |
//! | `a5x`  | -                                      | up to the first NUL, at most 5   |
//!
//! ## Usage
//!
//! ```rust
//! use binpacker::{pack, unpack, Value};
//!
//! let bytes = pack("nNa5", &[1u16.into(), 2u32.into(), "Hello".into()])?;
//! assert_eq!(bytes, [0, 1, 0, 0, 0, 2, b'H', b'e', b'l', b'l', b'o']);
//!
//! let fields = unpack("nfred/Njim/a5shiela", &bytes)?;
//! assert_eq!(fields.get("shiela"), Some(&Value::from("Hello")));
//! # Ok::<(), binpacker::PackError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod directive;
mod error;
mod pack;
mod packer;
mod reader;
mod sink;
mod unpack;
mod value;

pub use directive::{parse_pack_format, parse_unpack_format, Directive, Field, FieldType};
pub use error::{PackError, Underrun};
pub use pack::pack;
pub use packer::Packer;
pub use reader::ByteReader;
pub use sink::{ByteSink, Endianness};
pub use unpack::unpack;
pub use value::{Unpacked, Value};
