//! Convert one JSON document into flat `name=value` assignment lines that a
//! POSIX-compatible shell can evaluate directly.
//!
//! Every scalar leaf of the document becomes one line: the configured
//! prefix, the encoded path down to the leaf, the assignment separator,
//! and a literal rendering of the value. Paths are encoded so that the
//! result is always a valid identifier (only letters, digits, and
//! underscore) and so that two distinct paths can never collide, whatever
//! bytes the source keys contain. Values are rendered in the cheapest
//! quoting that round-trips them exactly: bare, single-quoted, or ANSI-C
//! `$'...'`.
//!
//! ```
//! let mut out = Vec::new();
//! json2sh::convert(
//!     &br#"{"name": "widget", "dims": [3, 4]}"#[..],
//!     &mut out,
//!     &json2sh::Options::default(),
//! )
//! .unwrap();
//! assert_eq!(
//!     out,
//!     b"JSON_name=widget\nJSON_dims_1_=3\nJSON_dims_2_=4\n"
//! );
//! ```
//!
//! Parsing is strict and single-pass with one byte of lookahead; any
//! grammar violation aborts with the 1-based line and column of the
//! offending byte. Output streams as it is produced; there is no
//! whole-document buffering, only replay of the already-encoded path
//! prefix when a container continues with another member.

mod arena;
mod convert;
mod error;
mod ident;
mod options;
mod parse;
mod source;
mod unescape;
mod value;

#[cfg(test)]
mod tests;

use std::io::{Read, Write};

use convert::Converter;

pub use error::{Error, ErrorKind};
pub use options::Options;
pub use unescape::unescape;

/// Consume exactly one JSON document from `reader` and write assignment
/// lines to `writer`.
///
/// # Errors
///
/// Fails on malformed JSON, trailing non-whitespace input, nesting beyond
/// the fixed depth limit, or any I/O failure; the error carries the
/// 1-based position. Partial output may already have been written when the
/// error is raised.
pub fn convert<R: Read, W: Write>(reader: R, writer: W, options: &Options) -> Result<(), Error> {
    Converter::new(reader, writer, options).run()
}
