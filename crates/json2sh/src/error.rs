use std::io;

use thiserror::Error;

/// A fatal conversion error, positioned at the byte that triggered it.
///
/// There are exactly two classes of failure: the stream broke
/// ([`ErrorKind::Io`]) or the document is not JSON (everything else). Both
/// abort the conversion at the point of detection; partial output for the
/// current line may already have been written.
#[derive(Error, Debug)]
#[error("{kind} at {line}:{column}")]
pub struct Error {
    pub(crate) kind: ErrorKind,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl Error {
    /// 1-based line of the offending byte.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the offending byte.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// The failure itself, without position.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

/// What went wrong.
#[derive(Error, Debug)]
pub enum ErrorKind {
    /// Reading the input or writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// A structural literal (`{`, `,`, `true`, ...) did not match.
    #[error("expected '{expected}' but got '{found}'")]
    Expected {
        /// The literal the grammar required here.
        expected: &'static str,
        /// The byte found instead.
        found: char,
    },
    /// The lookahead byte can start no JSON value.
    #[error("value expected")]
    ValueExpected,
    /// A digit run was required and absent.
    #[error("number expected")]
    NumberExpected,
    /// A `\u` escape contained a non-hex digit.
    #[error("hex digit expected with character '{0}'")]
    HexDigitExpected(char),
    /// A backslash escape other than the JSON-defined set.
    #[error("unknown escape sequence with character '{0}'")]
    UnknownEscape(char),
    /// A raw byte below 0x20 inside a JSON string.
    #[error("disallowed control character {0:#04x} in JSON string")]
    ControlCharacter(u8),
    /// The input ended mid-document.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// Non-whitespace input after the top-level value.
    #[error("end of input expected")]
    TrailingInput,
    /// Nesting beyond the fixed recursion limit.
    #[error("nesting too deep")]
    TooDeep,
}
