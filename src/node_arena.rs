//! Arena storage for tree nodes.
//!
//! Nodes live in a caller-owned arena, not inside the map: the map keeps
//! only the root link and the topology wires nodes together by key. The
//! arena is the container's allocator capability: every mutating map
//! operation receives it by argument, and a node must be freed through
//! the same arena that allocated it.

use slotmap::{DefaultKey, SlotMap};

/// Stable, generational reference to a node owned by a [`NodeArena`].
pub(crate) type NodeKey = DefaultKey;

/// One stored entry: the key's hash, the owned value, and three tree
/// links. Children are owned by the topology; the parent link is a
/// non-owning back-reference kept consistent with every structural
/// change so traversal and removal need no auxiliary stack.
#[derive(Debug)]
pub(crate) struct Node<V> {
    pub(crate) hash: u64,
    pub(crate) value: V,
    pub(crate) left: Option<NodeKey>,
    pub(crate) right: Option<NodeKey>,
    pub(crate) parent: Option<NodeKey>,
}

/// Node storage with generational keys.
///
/// Generational keys double as cursor validation: once a node is freed,
/// its key stops resolving instead of aliasing whatever reuses the slot.
#[derive(Debug)]
pub struct NodeArena<V> {
    slots: SlotMap<DefaultKey, Node<V>>,
}

impl<V> NodeArena<V> {
    pub fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Number of live nodes, across every map allocating from this arena.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn alloc(&mut self, hash: u64, value: V) -> NodeKey {
        self.slots.insert(Node {
            hash,
            value,
            left: None,
            right: None,
            parent: None,
        })
    }

    pub(crate) fn free(&mut self, key: NodeKey) -> Node<V> {
        self.slots
            .remove(key)
            .expect("node freed through the arena that allocated it")
    }

    pub(crate) fn contains(&self, key: NodeKey) -> bool {
        self.slots.contains_key(key)
    }

    pub(crate) fn get(&self, key: NodeKey) -> Option<&Node<V>> {
        self.slots.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: NodeKey) -> Option<&mut Node<V>> {
        self.slots.get_mut(key)
    }

    /// Resolve a key the topology guarantees is live.
    pub(crate) fn node(&self, key: NodeKey) -> &Node<V> {
        &self.slots[key]
    }

    pub(crate) fn node_mut(&mut self, key: NodeKey) -> &mut Node<V> {
        &mut self.slots[key]
    }
}

impl<V> Default for NodeArena<V> {
    fn default() -> Self {
        Self::new()
    }
}
