//! Traversal cursor: a tree position that advances with a parent-pointer
//! pre-order walk, using only the links stored in nodes.

use crate::node_arena::{NodeArena, NodeKey};

/// A position inside a [`TreeHashMap`](crate::TreeHashMap).
///
/// Cursors compare by node identity; the end cursor references no node.
/// A cursor stays valid until the next insert or erase on its map, with
/// one exception: the cursor returned by the mutating call itself. The
/// arena's generational keys make a stale cursor resolve to `None`
/// rather than alias whatever reuses the slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub(crate) node: Option<NodeKey>,
}

impl Cursor {
    pub(crate) fn new(node: NodeKey) -> Self {
        Self { node: Some(node) }
    }

    /// The past-the-last position.
    pub fn end() -> Self {
        Self { node: None }
    }

    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// Hash of the referenced entry, or `None` for the end cursor and
    /// stale cursors.
    pub fn hash<V>(&self, arena: &NodeArena<V>) -> Option<u64> {
        self.node.and_then(|k| arena.get(k)).map(|n| n.hash)
    }

    /// Borrow the referenced value.
    pub fn value<'a, V>(&self, arena: &'a NodeArena<V>) -> Option<&'a V> {
        self.node.and_then(|k| arena.get(k)).map(|n| &n.value)
    }

    /// Mutably borrow the referenced value.
    pub fn value_mut<'a, V>(&self, arena: &'a mut NodeArena<V>) -> Option<&'a mut V> {
        self.node
            .and_then(|k| arena.get_mut(k))
            .map(|n| &mut n.value)
    }

    /// Advance to the next node of the walk.
    ///
    /// Panics when called on the end cursor.
    #[must_use]
    pub fn next<V>(self, arena: &NodeArena<V>) -> Cursor {
        let node = self.node.expect("cursor advanced past the end");
        Cursor {
            node: step(arena, node),
        }
    }

    /// Advance `n` times.
    #[must_use]
    pub fn advanced_by<V>(self, arena: &NodeArena<V>, n: usize) -> Cursor {
        let mut cur = self;
        for _ in 0..n {
            cur = cur.next(arena);
        }
        cur
    }
}

/// One step of the walk: left child, else right child, else climb until
/// a parent offers a right child we did not come from, else done. Every
/// node is visited exactly once and the full walk is O(node count).
pub(crate) fn step<V>(arena: &NodeArena<V>, node: NodeKey) -> Option<NodeKey> {
    let n = arena.node(node);
    if let Some(left) = n.left {
        return Some(left);
    }
    if let Some(right) = n.right {
        return Some(right);
    }
    let mut prev = node;
    let mut cur = n.parent;
    while let Some(p) = cur {
        let pn = arena.node(p);
        match pn.right {
            Some(right) if right != prev => return Some(right),
            _ => {
                prev = p;
                cur = pn.parent;
            }
        }
    }
    None
}
