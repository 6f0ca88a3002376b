//! Recursive-descent JSON grammar driving node creation and line emission.
//!
//! ```text
//! value   := object | array | string | number | "true" | "false" | "null"
//! object  := '{' ( member (',' member)* )? '}'
//! member  := string ':' value
//! array   := '[' ( value (',' value)* )? ']'
//! ```
//!
//! One byte of lookahead after whitespace skip selects the production.
//! Every grammar violation is fatal: the encoder has already streamed
//! partial path text for the current line and there is no rollback.

use std::io::{Read, Write};

use crate::arena::{NodeId, NodeKind};
use crate::convert::Converter;
use crate::error::{Error, ErrorKind};
use crate::ident::Esc;

/// Maximum nesting depth. Recursion mirrors document nesting, so the limit
/// is explicit rather than left to the call stack.
pub(crate) const MAX_DEPTH: usize = 256;

impl<R: Read, W: Write> Converter<'_, R, W> {
    pub(crate) fn value(&mut self, parent: NodeId, depth: usize) -> Result<(), Error> {
        if depth >= MAX_DEPTH {
            return Err(self.src.error(ErrorKind::TooDeep));
        }
        match self.src.peek_nonws()? {
            None => Err(self.src.error(ErrorKind::UnexpectedEndOfInput)),
            Some(b'{') => self.object(parent, depth),
            Some(b'[') => self.array(parent, depth),
            Some(b'"') => self.string(parent),
            Some(b't') => self.constant(parent, "true"),
            Some(b'f') => self.constant(parent, "false"),
            Some(b'n') => self.constant(parent, "null"),
            Some(b'-' | b'0'..=b'9') => self.number(parent),
            Some(_) => {
                // consume it so the diagnostic points at the byte
                self.src.next_nonws()?;
                Err(self.src.error(ErrorKind::ValueExpected))
            }
        }
    }

    fn object(&mut self, parent: NodeId, depth: usize) -> Result<(), Error> {
        let node = self.begin(parent, NodeKind::Object)?;
        // The boundary marker keeps "key that looks like a digit run"
        // distinct from an array index. It is redundant directly under an
        // index (indices close their own run) and under the prefix root.
        if !matches!(
            self.arena[parent].kind,
            NodeKind::Index | NodeKind::Prefix
        ) {
            self.esc(node, b'0', Esc::Boundary)?;
        }
        self.src.expect("{")?;
        while !self.src.have(b'}')? {
            if self.child_done(node) {
                self.src.expect(",")?;
            }
            let key = self.key(node)?;
            self.src.expect(":")?;
            self.value(key, depth + 1)?;
        }
        if !self.child_done(node) {
            self.finish(node)?;
            self.write(b"$JSON_nothing_")?;
        }
        Ok(())
    }

    fn array(&mut self, parent: NodeId, depth: usize) -> Result<(), Error> {
        let node = self.begin(parent, NodeKind::Array)?;
        self.src.expect("[")?;
        let mut index = 0usize;
        while !self.src.have(b']')? {
            if self.child_done(node) {
                self.src.expect(",")?;
            }
            index += 1;
            let item = self.begin(node, NodeKind::Index)?;
            self.index_digits(item, index)?;
            self.value(item, depth + 1)?;
        }
        if !self.child_done(node) {
            self.finish(node)?;
            self.write(b"$JSON_empty_")?;
        }
        Ok(())
    }

    /// One object member key, decoded through the string escape rules and
    /// fed codepoint-by-codepoint into the identifier encoder. Any run left
    /// open at the closing quote is sealed when the member's value node
    /// attaches.
    fn key(&mut self, parent: NodeId) -> Result<NodeId, Error> {
        let node = self.begin(parent, NodeKind::Key)?;
        self.src.expect("\"")?;
        while let Some(cp) = self.string_char()? {
            self.ident_char(node, cp)?;
        }
        Ok(node)
    }

    fn string(&mut self, parent: NodeId) -> Result<(), Error> {
        let node = self.begin(parent, NodeKind::Value)?;
        self.finish(node)?;
        self.src.expect("\"")?;
        while let Some(cp) = self.string_char()? {
            self.value_put(node, cp)?;
        }
        self.value_end(node)
    }

    /// Decode one logical character of a JSON string body: a raw byte, or
    /// a backslash escape. Multi-byte UTF-8 stays opaque, each byte comes
    /// through on its own; only `\uHHHH` supplies a real codepoint.
    /// Returns `None` at the closing quote.
    fn string_char(&mut self) -> Result<Option<u32>, Error> {
        let b = self.src.require()?;
        if b < 0x20 {
            return Err(self.src.error(ErrorKind::ControlCharacter(b)));
        }
        if b == b'"' {
            return Ok(None);
        }
        if b != b'\\' {
            return Ok(Some(u32::from(b)));
        }
        let e = self.src.require()?;
        let cp = match e {
            b'"' | b'\\' | b'/' => u32::from(e),
            b'b' => 0x08,
            b'f' => 0x0C,
            b'n' => 0x0A,
            b'r' => 0x0D,
            b't' => 0x09,
            b'u' => {
                let mut cp = 0u32;
                for _ in 0..4 {
                    cp = (cp << 4) | self.hex_digit()?;
                }
                cp
            }
            other => return Err(self.src.error(ErrorKind::UnknownEscape(other as char))),
        };
        Ok(Some(cp))
    }

    fn hex_digit(&mut self) -> Result<u32, Error> {
        let b = self.src.require()?;
        match b {
            b'0'..=b'9' => Ok(u32::from(b - b'0')),
            b'a'..=b'f' => Ok(u32::from(b - b'a' + 10)),
            b'A'..=b'F' => Ok(u32::from(b - b'A' + 10)),
            _ => Err(self.src.error(ErrorKind::HexDigitExpected(b as char))),
        }
    }

    /// Numbers are validated digit-by-digit and render bare; the probe is a
    /// raw non-consuming peek, so a number abutting end-of-input completes
    /// normally.
    fn number(&mut self, parent: NodeId) -> Result<(), Error> {
        let node = self.begin(parent, NodeKind::Value)?;
        self.scan_if(node, |b| b == b'-')?;
        if !self.scan_if(node, |b| b == b'0')? {
            self.digits(node)?;
        }
        if self.scan_if(node, |b| b == b'.')? {
            self.digits(node)?;
        }
        if self.scan_if(node, |b| b == b'e' || b == b'E')? {
            self.scan_if(node, |b| b == b'+' || b == b'-')?;
            self.digits(node)?;
        }
        self.finish(node)?;
        self.value_end(node)
    }

    /// Probe the next raw byte; when `pred` accepts it, consume it, seal
    /// the identifier (first time only), and buffer it.
    fn scan_if(&mut self, id: NodeId, pred: impl Fn(u8) -> bool) -> Result<bool, Error> {
        match self.src.peek_raw()? {
            Some(b) if pred(b) => {
                self.src.next()?;
                self.finish(id)?;
                self.value_bare(id, b);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn digits(&mut self, id: NodeId) -> Result<(), Error> {
        if !self.scan_if(id, |b| b.is_ascii_digit())? {
            // consume the offender, if any, to place the diagnostic
            self.src.next()?;
            return Err(self.src.error(ErrorKind::NumberExpected));
        }
        while self.scan_if(id, |b| b.is_ascii_digit())? {}
        Ok(())
    }

    /// `true`, `false`, `null`: matched literally, emitted as a fixed
    /// placeholder expansion so the evaluating shell can decide what the
    /// three constants mean. The `JSON_` stem of the placeholder is fixed
    /// regardless of the configured prefix.
    fn constant(&mut self, parent: NodeId, name: &'static str) -> Result<(), Error> {
        self.src.expect(name)?;
        let node = self.begin(parent, NodeKind::Value)?;
        self.finish(node)?;
        self.write(b"$JSON_")?;
        self.write(name.as_bytes())?;
        self.write(b"_")
    }
}
