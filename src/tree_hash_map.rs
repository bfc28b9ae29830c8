//! TreeHashMap: the public façade binding a key-hashing strategy to the
//! tree engine.

use crate::cursor::{self, Cursor};
use crate::hash::{DefaultHasher, KeyHasher};
use crate::node_arena::{NodeArena, NodeKey};
use crate::tree;
use core::marker::PhantomData;

/// A map from hashed keys to values, stored as an unbalanced binary
/// search tree ordered by the 64-bit hash of the key.
///
/// The map owns the root link and nothing else. Nodes live in a
/// [`NodeArena`] that every mutating operation receives explicitly, so
/// the arena that allocated a node is the one asked to free it. A map
/// that still holds entries must be emptied with [`destroy`] before it
/// goes out of scope; dropping it non-empty is a contract violation and
/// panics, because the map holds no arena to free the nodes with.
///
/// Keys are never stored: insertion and lookup compare hashes only, so
/// two distinct keys whose hashes collide are two distinct entries that
/// lookup cannot tell apart; `find` returns whichever collider sits
/// closest to the root. That trade is safe when keys are pre-hashed
/// unique identifiers and must be accounted for with arbitrary keys.
///
/// Moving a map transfers the root in O(1). Copying is intentionally
/// unsupported.
///
/// [`destroy`]: TreeHashMap::destroy
pub struct TreeHashMap<K: ?Sized, V, H = DefaultHasher<K>> {
    root: Option<NodeKey>,
    hasher: H,
    _keys: PhantomData<fn(&K) -> V>,
}

impl<K: ?Sized, V> TreeHashMap<K, V> {
    /// An empty map using the key's [`ComputeHash`](crate::ComputeHash).
    /// Allocates nothing.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHasher::new())
    }
}

impl<K: ?Sized, V> Default for TreeHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ?Sized, V, H> TreeHashMap<K, V, H> {
    /// An empty map using a caller-supplied hashing strategy.
    pub fn with_hasher(hasher: H) -> Self {
        Self {
            root: None,
            hasher,
            _keys: PhantomData,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Cursor at the first node of the walk (the root), or the end
    /// cursor for an empty map.
    pub fn begin(&self) -> Cursor {
        Cursor { node: self.root }
    }

    pub fn end(&self) -> Cursor {
        Cursor::end()
    }

    /// Remove the node a cursor references and hand its value back.
    ///
    /// Panics on the end cursor and on a cursor from a previous
    /// generation of the slot (double erase). The arena must be the one
    /// that allocated the node; a foreign arena is caught only when the
    /// key happens not to resolve in it.
    pub fn erase(&mut self, arena: &mut NodeArena<V>, cursor: Cursor) -> V {
        let node = cursor.node.expect("erase through the end cursor");
        assert!(arena.contains(node), "erase through a stale cursor");
        tree::remove_node(arena, &mut self.root, node);
        arena.free(node).value
    }

    /// Free every node post-order and reset the map to empty. The only
    /// sanctioned way to empty a non-empty map.
    pub fn destroy(&mut self, arena: &mut NodeArena<V>) {
        let mut cur = self.root.take();
        while let Some(node) = cur {
            let (left, right) = {
                let n = arena.node(node);
                (n.left, n.right)
            };
            if let Some(left) = left {
                cur = Some(left);
            } else if let Some(right) = right {
                cur = Some(right);
            } else {
                let parent = arena.node(node).parent;
                if let Some(p) = parent {
                    let pn = arena.node_mut(p);
                    if pn.left == Some(node) {
                        pn.left = None;
                    } else {
                        pn.right = None;
                    }
                }
                arena.free(node);
                cur = parent;
            }
        }
    }

    /// Visit every value in walk order, yielding `(Cursor, &V)`.
    pub fn iter<'a>(&self, arena: &'a NodeArena<V>) -> Iter<'a, V> {
        Iter {
            arena,
            cur: self.root,
        }
    }

    #[cfg(test)]
    pub(crate) fn root_key(&self) -> Option<NodeKey> {
        self.root
    }
}

impl<K: ?Sized, V, H: KeyHasher<K>> TreeHashMap<K, V, H> {
    /// Cursor at the first node whose hash matches the key's, or the end
    /// cursor when no hash matches. Absence is not an error.
    pub fn find(&self, arena: &NodeArena<V>, key: &K) -> Cursor {
        Cursor {
            node: tree::find_node(arena, self.root, self.hasher.hash_key(key)),
        }
    }

    /// Allocate a node for `value` in `arena` and link it into the tree.
    /// Returns a cursor at the new node. Equal hashes are kept, never
    /// deduplicated.
    pub fn insert(&mut self, arena: &mut NodeArena<V>, key: &K, value: V) -> Cursor {
        let hash = self.hasher.hash_key(key);
        let node = arena.alloc(hash, value);
        tree::insert_node(arena, &mut self.root, node);
        Cursor::new(node)
    }

    /// Like [`insert`], constructing the value at insert time.
    ///
    /// [`insert`]: TreeHashMap::insert
    pub fn insert_with<F>(&mut self, arena: &mut NodeArena<V>, key: &K, make: F) -> Cursor
    where
        F: FnOnce() -> V,
    {
        let hash = self.hasher.hash_key(key);
        let node = arena.alloc(hash, make());
        tree::insert_node(arena, &mut self.root, node);
        Cursor::new(node)
    }
}

impl<K: ?Sized, V, H> Drop for TreeHashMap<K, V, H> {
    fn drop(&mut self) {
        if self.root.is_some() && !std::thread::panicking() {
            panic!("TreeHashMap dropped while non-empty: call destroy() first");
        }
    }
}

/// Walk-order iterator over a map's entries.
pub struct Iter<'a, V> {
    arena: &'a NodeArena<V>,
    cur: Option<NodeKey>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (Cursor, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.cur?;
        self.cur = cursor::step(self.arena, node);
        Some((Cursor::new(node), &self.arena.node(node).value))
    }
}
