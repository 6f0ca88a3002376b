//! The converter: owns the byte source, the output stream, and the node
//! arena, and provides the node-lifecycle operations the grammar drives.
//!
//! Exactly one chain of live nodes exists at any time, from the prefix root
//! down to the node being built; it mirrors the parser's recursion. When a
//! subtree finishes it is *cut*: the chain below its parent is released
//! back to the pool and the `done` flags fold upward, so the parent knows
//! whether a continuing sibling must *replay*: re-open the output line by
//! writing the terminator followed by every live ancestor's buffered text.

use std::io::{Read, Write};

use crate::arena::{NodeArena, NodeId, NodeKind};
use crate::error::{Error, ErrorKind};
use crate::options::Options;
use crate::source::ByteSource;

pub(crate) struct Converter<'a, R, W> {
    pub(crate) src: ByteSource<R>,
    pub(crate) out: W,
    pub(crate) arena: NodeArena,
    pub(crate) root: NodeId,
    pub(crate) opts: &'a Options,
}

impl<'a, R: Read, W: Write> Converter<'a, R, W> {
    pub(crate) fn new(reader: R, writer: W, opts: &'a Options) -> Self {
        let mut arena = NodeArena::new();
        let root = arena.acquire(NodeKind::Prefix);
        Self {
            src: ByteSource::new(reader),
            out: writer,
            arena,
            root,
            opts,
        }
    }

    /// Run one conversion: prefix, document, trailing-input check, final
    /// terminator.
    pub(crate) fn run(&mut self) -> Result<(), Error> {
        self.set_prefix()?;
        let root = self.root;
        self.value(root, 0)?;
        if self.src.peek_nonws()?.is_some() {
            self.src.next_nonws()?;
            return Err(self.src.error(ErrorKind::TrailingInput));
        }
        if self.child_done(root) {
            self.write_terminator()?;
        }
        Ok(())
    }

    /// Write raw bytes to the output, pinning I/O failures to the current
    /// input position.
    pub(crate) fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let Self { src, out, .. } = self;
        out.write_all(bytes)
            .map_err(|e| src.error(ErrorKind::Io(e)))
    }

    /// Write a node's accumulated text to the output.
    pub(crate) fn write_buf(&mut self, id: NodeId) -> Result<(), Error> {
        let Self { src, out, arena, .. } = self;
        out.write_all(&arena[id].buf)
            .map_err(|e| src.error(ErrorKind::Io(e)))
    }

    fn write_separator(&mut self) -> Result<(), Error> {
        let opts = self.opts;
        self.write(&opts.separator)
    }

    fn write_terminator(&mut self) -> Result<(), Error> {
        let opts = self.opts;
        self.write(&opts.terminator)
    }

    /// Append one byte to a node's text, echoing it to the output unless
    /// the node is a value (value text is buffered until finalize).
    pub(crate) fn put(&mut self, id: NodeId, b: u8) -> Result<(), Error> {
        let echo = self.arena[id].kind != NodeKind::Value;
        self.arena[id].buf.push(b);
        if echo {
            self.write(&[b])?;
        }
        Ok(())
    }

    /// Release the finished chain below `parent`, folding `done` upward.
    fn cut(&mut self, parent: NodeId) {
        let mut next = self.arena[parent].child.take();
        while let Some(id) = next {
            if self.arena[id].done {
                self.arena[parent].done = true;
            }
            next = self.arena[id].child.take();
            self.arena.release(id);
        }
    }

    /// Cut, then report whether this subtree has emitted a line yet.
    pub(crate) fn child_done(&mut self, parent: NodeId) -> bool {
        self.cut(parent);
        self.arena[parent].done
    }

    /// Re-open the output line: terminator, then every live ancestor's
    /// buffer from the root down, clearing `done` along the chain.
    fn replay(&mut self) -> Result<(), Error> {
        self.write_terminator()?;
        let mut cur = Some(self.root);
        while let Some(id) = cur {
            self.write_buf(id)?;
            let node = &mut self.arena[id];
            node.done = false;
            cur = node.child;
        }
        Ok(())
    }

    /// Start a child of `parent`: cut the finished chain, replay the path
    /// if a previous sibling already produced output, then acquire and
    /// attach the new node.
    pub(crate) fn begin(&mut self, parent: NodeId, kind: NodeKind) -> Result<NodeId, Error> {
        self.cut(parent);
        if self.arena[parent].done {
            self.replay()?;
        }
        let id = self.arena.acquire(kind);
        self.attach(parent, id)?;
        Ok(id)
    }

    /// Link `id` under `parent`, carrying the encoding continuity context
    /// forward. A value child force-closes the parent's open run so the
    /// identifier ends cleanly before the assignment separator.
    fn attach(&mut self, parent: NodeId, id: NodeId) -> Result<(), Error> {
        assert!(self.arena[parent].kind != NodeKind::Vacant);
        assert!(
            self.arena[parent].child.is_none(),
            "parent has an unflushed child"
        );
        if self.arena[id].kind == NodeKind::Value {
            self.esc_end(parent)?;
        }
        let (esc, page) = {
            let p = &self.arena[parent];
            (p.esc, p.page)
        };
        let node = &mut self.arena[id];
        node.esc = esc;
        node.page = page;
        self.arena[parent].child = Some(id);
        Ok(())
    }

    /// Seal a node's identifier and emit the assignment separator once.
    pub(crate) fn finish(&mut self, id: NodeId) -> Result<(), Error> {
        self.esc_end(id)?;
        if !self.arena[id].done {
            self.write_separator()?;
        }
        self.arena[id].done = true;
        Ok(())
    }
}
