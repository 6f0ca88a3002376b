//! Buffered byte source with one-byte pushback and position tracking.

use std::io::{self, Read};

use crate::error::{Error, ErrorKind};

const CHUNK: usize = 8 * 1024;

/// The byte reader backing the parser.
///
/// The whitespace-skipping accessors ([`peek_nonws`], [`have`], [`expect`])
/// absorb JSON insignificant whitespace at every structural boundary, which
/// keeps the grammar functions free of explicit skip calls. Columns count
/// bytes consumed on the current line, so an error raised right after
/// consuming the offending byte reports that byte's position.
///
/// [`peek_nonws`]: ByteSource::peek_nonws
/// [`have`]: ByteSource::have
/// [`expect`]: ByteSource::expect
pub(crate) struct ByteSource<R> {
    inner: R,
    buf: Vec<u8>,
    pos: usize,
    filled: usize,
    pushback: Option<u8>,
    eof: bool,
    line: usize,
    column: usize,
}

impl<R: Read> ByteSource<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            buf: vec![0; CHUNK],
            pos: 0,
            filled: 0,
            pushback: None,
            eof: false,
            line: 1,
            column: 0,
        }
    }

    /// Build an error pinned to the current position.
    pub(crate) fn error(&self, kind: ErrorKind) -> Error {
        Error {
            kind,
            line: self.line,
            column: self.column.max(1),
        }
    }

    fn fill(&mut self) -> Result<(), Error> {
        loop {
            match self.inner.read(&mut self.buf) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.pos = 0;
                    self.filled = n;
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(self.error(ErrorKind::Io(e))),
            }
        }
    }

    /// Raw read of the next byte, updating line/column.
    pub(crate) fn next(&mut self) -> Result<Option<u8>, Error> {
        let b = if let Some(b) = self.pushback.take() {
            b
        } else {
            if self.pos == self.filled {
                if self.eof {
                    return Ok(None);
                }
                self.fill()?;
                if self.pos == self.filled {
                    return Ok(None);
                }
            }
            let b = self.buf[self.pos];
            self.pos += 1;
            b
        };
        if b == b'\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Ok(Some(b))
    }

    /// Push one byte back, rewinding the column.
    ///
    /// At most one byte may be pending, and a line terminator must never be
    /// pushed back (the line counter cannot rewind).
    fn unread(&mut self, b: u8) {
        debug_assert!(self.pushback.is_none());
        debug_assert!(b != b'\n');
        self.pushback = Some(b);
        self.column -= 1;
    }

    /// Non-consuming peek without whitespace skip. Position is untouched,
    /// so the number grammar can probe for its terminator at end-of-input.
    pub(crate) fn peek_raw(&mut self) -> Result<Option<u8>, Error> {
        if let Some(b) = self.pushback {
            return Ok(Some(b));
        }
        if self.pos == self.filled {
            if self.eof {
                return Ok(None);
            }
            self.fill()?;
            if self.pos == self.filled {
                return Ok(None);
            }
        }
        Ok(Some(self.buf[self.pos]))
    }

    /// Next byte after skipping insignificant whitespace.
    pub(crate) fn next_nonws(&mut self) -> Result<Option<u8>, Error> {
        loop {
            match self.next()? {
                Some(b) if b.is_ascii_whitespace() => {}
                other => return Ok(other),
            }
        }
    }

    /// Peek at the next non-whitespace byte without consuming it.
    pub(crate) fn peek_nonws(&mut self) -> Result<Option<u8>, Error> {
        match self.next_nonws()? {
            Some(b) => {
                self.unread(b);
                Ok(Some(b))
            }
            None => Ok(None),
        }
    }

    /// Consume the next non-whitespace byte iff it equals `want`.
    pub(crate) fn have(&mut self, want: u8) -> Result<bool, Error> {
        match self.next_nonws()? {
            Some(b) if b == want => Ok(true),
            Some(b) => {
                self.unread(b);
                Ok(false)
            }
            None => Ok(false),
        }
    }

    /// Match `literal` exactly, skipping whitespace before its first byte.
    pub(crate) fn expect(&mut self, literal: &'static str) -> Result<(), Error> {
        for (i, want) in literal.bytes().enumerate() {
            let got = if i == 0 { self.next_nonws()? } else { self.next()? };
            match got {
                Some(b) if b == want => {}
                Some(b) => {
                    return Err(self.error(ErrorKind::Expected {
                        expected: literal,
                        found: b as char,
                    }));
                }
                None => return Err(self.error(ErrorKind::UnexpectedEndOfInput)),
            }
        }
        Ok(())
    }

    /// Fetch a byte, failing fatally at end-of-input.
    pub(crate) fn require(&mut self) -> Result<u8, Error> {
        match self.next()? {
            Some(b) => Ok(b),
            None => Err(self.error(ErrorKind::UnexpectedEndOfInput)),
        }
    }
}
