//! Index-addressed pool of path-segment nodes.
//!
//! One conversion owns one [`NodeArena`]; nothing survives the run. Slots
//! are recycled LIFO through a free list, and a recycled slot keeps its
//! text buffer's capacity, so steady-state parsing allocates nothing per
//! node. The arena is pure storage; linking, replay, and cutting live in
//! the converter, which also owns the output stream those operations write
//! to.

use std::fmt;
use std::ops::{Index, IndexMut};

use bstr::BStr;

use crate::ident::Esc;
use crate::value::Mode;

/// Role of a node in the live path chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind {
    /// Free-pool slot; never part of a live chain.
    Vacant,
    /// The configured name prefix, root of every chain.
    Prefix,
    /// An array container (no text of its own).
    Array,
    /// A 1-based array index.
    Index,
    /// An object container (holds the boundary marker, if any).
    Object,
    /// An object member key.
    Key,
    /// A scalar leaf; its buffer accumulates the value bytes.
    Value,
}

/// One path segment and its encoded text.
pub(crate) struct Node {
    pub(crate) kind: NodeKind,
    /// Already-encoded identifier or literal text. Cleared on reuse, never
    /// shrunk.
    pub(crate) buf: Vec<u8>,
    /// Which encoding run is currently open.
    pub(crate) esc: Esc,
    /// Last-emitted high-byte page of an arbitrary-escape run.
    pub(crate) page: u32,
    /// Literal-rendering mode; meaningful for `Value` nodes only.
    pub(crate) mode: Mode,
    /// True once this subtree has emitted at least one line.
    pub(crate) done: bool,
    /// The currently-live child, if any.
    pub(crate) child: Option<NodeId>,
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind)
            .field("buf", &BStr::new(&self.buf))
            .field("esc", &self.esc)
            .field("page", &self.page)
            .field("mode", &self.mode)
            .field("done", &self.done)
            .field("child", &self.child)
            .finish()
    }
}

/// Copyable handle into a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeId(usize);

/// Slot vector plus free list.
#[derive(Debug)]
pub(crate) struct NodeArena {
    slots: Vec<Node>,
    free: Vec<NodeId>,
}

impl NodeArena {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Draw a node from the pool and stamp it with `kind`.
    ///
    /// Every logical field is reset; the text buffer keeps its capacity.
    /// Panics if the recycled slot is not vacant: that is a bookkeeping
    /// bug, not a user error.
    pub(crate) fn acquire(&mut self, kind: NodeKind) -> NodeId {
        assert!(kind != NodeKind::Vacant);
        let id = match self.free.pop() {
            Some(id) => id,
            None => {
                let id = NodeId(self.slots.len());
                self.slots.push(Node {
                    kind: NodeKind::Vacant,
                    buf: Vec::new(),
                    esc: Esc::Plain,
                    page: 0,
                    mode: Mode::Bare,
                    done: false,
                    child: None,
                });
                id
            }
        };
        let node = &mut self.slots[id.0];
        assert!(node.kind == NodeKind::Vacant, "acquired a live node");
        node.kind = kind;
        node.buf.clear();
        node.esc = Esc::Plain;
        node.page = 0;
        node.mode = Mode::Bare;
        node.done = false;
        node.child = None;
        id
    }

    /// Return a node to the pool. The buffer is retained for reuse.
    pub(crate) fn release(&mut self, id: NodeId) {
        let node = &mut self.slots[id.0];
        assert!(node.kind != NodeKind::Vacant, "released a vacant node");
        node.kind = NodeKind::Vacant;
        node.child = None;
        self.free.push(id);
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.slots[id.0]
    }
}

impl IndexMut<NodeId> for NodeArena {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.slots[id.0]
    }
}
