//! Identifier encoder: maps raw bytes and codepoints to identifier-safe
//! runs.
//!
//! Every emitted identifier is built from maximal *runs* of characters
//! sharing one escape state, with a `_` separator wherever two adjacent
//! runs would otherwise be ambiguous. Invertibility falls out of the
//! construction: plain text is ASCII alphanumerics, index runs are decimal
//! digits, and arbitrary-escape runs draw from alphabets disjoint from both
//! (uppercase page letters, the dedicated hex-nibble set, and the mnemonic
//! control letters), so no two distinct paths can render the same text.
//!
//! A literal `_` is doubled in plain state and becomes the reserved letter
//! `c` inside an open escape run. Arbitrary characters render as a
//! page-change marker (base-26, emitted only when the high byte of the
//! codepoint changes within a node) followed by two hex nibbles of the low
//! byte.

use std::io::{Read, Write};

use crate::arena::NodeId;
use crate::convert::Converter;
use crate::error::Error;

/// Run separator between incompatible escape states.
pub(crate) const SEPARATOR: u8 = b'_';

/// Hex-nibble alphabet for arbitrary-escape runs, value 0 through 15.
/// Disjoint from the plain alphanumerics, the page letters, and the
/// mnemonic letters `a b c d e f n r t v`.
const HEX: &[u8; 16] = b"zyxwusqpomlkjihg";

/// Escape state of the identifier encoder: which kind of run is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Esc {
    /// ASCII letters and digits, emitted verbatim.
    Plain,
    /// A 1-based array-index digit run.
    Index,
    /// The object-boundary marker digit.
    Boundary,
    /// Everything else: page letters, hex nibbles, mnemonic letters.
    Arbitrary,
}

/// Run compatibility, kept as data: `Plain` borders on nothing, the escaped
/// states border only on themselves. Two incompatible adjacent runs get a
/// separator between them.
const COMPATIBLE: [[bool; 4]; 4] = [
    [true, false, false, false],
    [false, true, false, false],
    [false, false, true, false],
    [false, false, false, true],
];

impl Esc {
    pub(crate) fn compatible(self, other: Esc) -> bool {
        COMPATIBLE[self as usize][other as usize]
    }
}

/// True for the bytes/codepoints that pass through unescaped.
pub(crate) fn is_word(cp: u32) -> bool {
    cp < 0x80 && (cp as u8).is_ascii_alphanumeric()
}

fn mnemonic(cp: u32) -> Option<u8> {
    match cp {
        0x07 => Some(b'a'),
        0x08 => Some(b'b'),
        0x7F => Some(b'd'),
        0x1B => Some(b'e'),
        0x0C => Some(b'f'),
        0x0A => Some(b'n'),
        0x0D => Some(b'r'),
        0x09 => Some(b't'),
        0x0B => Some(b'v'),
        _ => None,
    }
}

impl<R: Read, W: Write> Converter<'_, R, W> {
    /// Close any open escape run with a separator and reset page tracking.
    pub(crate) fn esc_end(&mut self, id: NodeId) -> Result<(), Error> {
        if self.arena[id].esc != Esc::Plain {
            self.put(id, SEPARATOR)?;
        }
        let node = &mut self.arena[id];
        node.esc = Esc::Plain;
        node.page = 0;
        Ok(())
    }

    /// Emit one identifier byte under escape state `state`, inserting run
    /// separators per the compatibility table.
    pub(crate) fn esc(&mut self, id: NodeId, b: u8, state: Esc) -> Result<(), Error> {
        let current = self.arena[id].esc;
        if current != state && !current.compatible(state) {
            self.esc_end(id)?;
            if state != Esc::Plain {
                self.put(id, SEPARATOR)?;
            }
        }
        self.arena[id].esc = state;
        self.put(id, b)
    }

    /// Feed one key codepoint through the identifier rules.
    pub(crate) fn ident_char(&mut self, id: NodeId, cp: u32) -> Result<(), Error> {
        if cp == u32::from(b'_') {
            if self.arena[id].esc != Esc::Plain {
                return self.esc(id, b'c', Esc::Arbitrary);
            }
            self.esc(id, b'_', Esc::Plain)?;
            return self.esc(id, b'_', Esc::Plain);
        }
        if let Some(m) = mnemonic(cp) {
            return self.esc(id, m, Esc::Arbitrary);
        }
        if is_word(cp) {
            return self.esc(id, cp as u8, Esc::Plain);
        }
        self.page(id, cp >> 8)?;
        self.hex(id, (cp >> 4) as u8)?;
        self.hex(id, cp as u8)
    }

    /// Emit a page-change marker when `page` differs from the node's last
    /// one; consecutive same-page characters carry no marker.
    fn page(&mut self, id: NodeId, page: u32) -> Result<(), Error> {
        if self.arena[id].page == page {
            return Ok(());
        }
        self.arena[id].page = page;
        self.page26(id, page)
    }

    /// Recursive base-26 page number, most-significant letter first.
    fn page26(&mut self, id: NodeId, n: u32) -> Result<(), Error> {
        if n > 25 {
            self.page26(id, n / 26)?;
        }
        self.esc(id, b'A' + (n % 26) as u8, Esc::Arbitrary)
    }

    /// One hex nibble from the identifier-safe alphabet.
    fn hex(&mut self, id: NodeId, nibble: u8) -> Result<(), Error> {
        self.esc(id, HEX[usize::from(nibble & 0xF)], Esc::Arbitrary)
    }

    /// Write a 1-based array index as an `Index`-state digit run.
    ///
    /// The inherited run is force-closed first, so index digits are never
    /// adjacent to a previous run of any kind: nested single-element arrays
    /// (`__1__1_`) cannot collide with a two-digit index (`_11_`).
    pub(crate) fn index_digits(&mut self, id: NodeId, index: usize) -> Result<(), Error> {
        self.esc_end(id)?;
        let digits = index.to_string();
        for d in digits.bytes() {
            self.esc(id, d, Esc::Index)?;
        }
        Ok(())
    }

    /// Install the configured prefix verbatim as the root node's text.
    pub(crate) fn set_prefix(&mut self) -> Result<(), Error> {
        let root = self.root;
        for i in 0..self.opts.prefix.len() {
            let b = self.opts.prefix[i];
            self.esc(root, b, Esc::Plain)?;
        }
        Ok(())
    }
}
