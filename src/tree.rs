//! Tree engine: insert, find, and remove on a hash-ordered topology.
//!
//! These routines own no memory and allocate nothing; they only rewire
//! the links of nodes that the caller allocated. The ordering rule is
//! fixed here once: hashes compare with `<`, the equal case descends
//! right, so colliding hashes form a right chain under the first one
//! inserted.
//!
//! Two invariants hold on entry and exit of every routine:
//! - hash order: every node in `n.left`'s subtree hashes strictly below
//!   `n.hash`, every node in `n.right`'s subtree at or above it;
//! - parent links: `n.left.parent == n` and `n.right.parent == n`
//!   whenever those children exist, and the root has no parent.

use crate::node_arena::{NodeArena, NodeKey};

/// Link a freshly allocated node into the tree.
pub(crate) fn insert_node<V>(
    arena: &mut NodeArena<V>,
    root: &mut Option<NodeKey>,
    node: NodeKey,
) {
    let hash = arena.node(node).hash;
    let Some(mut cur) = *root else {
        *root = Some(node);
        return;
    };
    loop {
        let n = arena.node(cur);
        let go_left = hash < n.hash;
        match if go_left { n.left } else { n.right } {
            Some(child) => cur = child,
            None => {
                let slot = arena.node_mut(cur);
                if go_left {
                    slot.left = Some(node);
                } else {
                    slot.right = Some(node);
                }
                arena.node_mut(node).parent = Some(cur);
                return;
            }
        }
    }
}

/// Walk from the root to the first node with a matching hash.
pub(crate) fn find_node<V>(
    arena: &NodeArena<V>,
    root: Option<NodeKey>,
    hash: u64,
) -> Option<NodeKey> {
    let mut cur = root;
    while let Some(key) = cur {
        let n = arena.node(key);
        if hash == n.hash {
            return Some(key);
        }
        cur = if hash < n.hash { n.left } else { n.right };
    }
    None
}

/// Unlink `del` from the tree, preserving hash order and parent links.
///
/// The node itself stays in the arena; the caller frees it afterwards.
/// For the two-children case the in-order successor node (leftmost of
/// the right subtree) is relinked into the vacated position, so the slot
/// the caller releases is exactly the one the erased cursor referenced.
pub(crate) fn remove_node<V>(
    arena: &mut NodeArena<V>,
    root: &mut Option<NodeKey>,
    del: NodeKey,
) {
    let (left, right, parent) = {
        let n = arena.node(del);
        (n.left, n.right, n.parent)
    };
    match (left, right) {
        // Leaf: clear the slot that pointed at it.
        (None, None) => replace_child(arena, root, parent, del, None),
        // One child: splice the child up.
        (Some(child), None) | (None, Some(child)) => {
            replace_child(arena, root, parent, del, Some(child));
        }
        // Two children: the successor has no left child, so detaching it
        // reduces to the one-child case; it then takes over del's links.
        (Some(left), Some(right)) => {
            let mut succ = right;
            while let Some(l) = arena.node(succ).left {
                succ = l;
            }
            if succ != right {
                let succ_right = arena.node(succ).right;
                let succ_parent = arena
                    .node(succ)
                    .parent
                    .expect("successor below the right child has a parent");
                arena.node_mut(succ_parent).left = succ_right;
                if let Some(r) = succ_right {
                    arena.node_mut(r).parent = Some(succ_parent);
                }
                arena.node_mut(succ).right = Some(right);
                arena.node_mut(right).parent = Some(succ);
            }
            arena.node_mut(succ).left = Some(left);
            arena.node_mut(left).parent = Some(succ);
            replace_child(arena, root, parent, del, Some(succ));
        }
    }
}

/// Point the link in `parent` that referenced `old` at `new`, and `new`'s
/// parent back at `parent`. A missing parent means `old` was the root.
fn replace_child<V>(
    arena: &mut NodeArena<V>,
    root: &mut Option<NodeKey>,
    parent: Option<NodeKey>,
    old: NodeKey,
    new: Option<NodeKey>,
) {
    match parent {
        None => {
            debug_assert_eq!(*root, Some(old));
            *root = new;
        }
        Some(p) => {
            let n = arena.node_mut(p);
            if n.left == Some(old) {
                n.left = new;
            } else {
                debug_assert_eq!(n.right, Some(old));
                n.right = new;
            }
        }
    }
    if let Some(key) = new {
        arena.node_mut(key).parent = parent;
    }
}

/// Walk the whole tree asserting the hash-order and parent-link
/// invariants; returns the number of nodes seen.
#[cfg(test)]
pub(crate) fn check_invariants<V>(arena: &NodeArena<V>, root: Option<NodeKey>) -> usize {
    fn walk<V>(
        arena: &NodeArena<V>,
        key: NodeKey,
        parent: Option<NodeKey>,
        lo: Option<u64>,
        hi: Option<u64>,
    ) -> usize {
        let n = arena.node(key);
        assert_eq!(n.parent, parent, "parent link out of sync");
        if let Some(lo) = lo {
            assert!(n.hash >= lo, "hash below the subtree's lower bound");
        }
        if let Some(hi) = hi {
            assert!(n.hash < hi, "hash at or above the subtree's upper bound");
        }
        let mut count = 1;
        if let Some(l) = n.left {
            count += walk(arena, l, Some(key), lo, Some(n.hash));
        }
        if let Some(r) = n.right {
            count += walk(arena, r, Some(key), Some(n.hash), hi);
        }
        count
    }
    match root {
        Some(key) => {
            assert_eq!(arena.node(key).parent, None, "root must have no parent");
            walk(arena, key, None, None, None)
        }
        None => 0,
    }
}

/// Height of the tree in nodes (empty tree is 0).
#[cfg(test)]
pub(crate) fn height<V>(arena: &NodeArena<V>, root: Option<NodeKey>) -> usize {
    fn depth<V>(arena: &NodeArena<V>, key: Option<NodeKey>) -> usize {
        match key {
            None => 0,
            Some(k) => {
                let n = arena.node(k);
                1 + depth(arena, n.left).max(depth(arena, n.right))
            }
        }
    }
    depth(arena, root)
}
