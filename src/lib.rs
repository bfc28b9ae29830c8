//! tree-hashmap: a single-threaded map that keeps entries in an
//! unbalanced binary search tree ordered by the 64-bit hash of the key,
//! with nodes owned by an external arena and addressed by stable cursors.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: express a hash-ordered BST with an explicit allocator
//!   capability in safe, verifiable layers so each piece can be reasoned
//!   about independently.
//! - Layers:
//!   - NodeArena<V>: generational-arena storage for nodes (hash, value,
//!     left/right/parent links). The arena is the allocator: the map
//!     never captures it, every mutating operation receives it by
//!     argument, and whoever allocates a node is the one asked to free
//!     it.
//!   - tree: the link-surgery algorithms (insert, find, remove) that
//!     operate purely on hashes and node links and own no memory.
//!   - Cursor: a position that advances across the whole tree with a
//!     parent-pointer pre-order walk, O(1) extra memory, no mutation of
//!     the tree.
//!   - TreeHashMap<K, V, H>: the public façade binding a key-hashing
//!     strategy to the tree engine; owns the root link and nothing else.
//!
//! Constraints
//! - Single-threaded: no internal synchronization anywhere; concurrent
//!   mutation is the caller's bug to prevent.
//! - Hash-only ordering: keys are never stored and never compared for
//!   equality. Distinct keys with colliding hashes are distinct entries;
//!   `find` returns the collider closest to the root. Safe for
//!   pre-hashed unique identifiers, a caveat for arbitrary keys.
//! - No rebalancing: tree height is whatever insertion order produces.
//!   Uniformly distributed hashes give expected logarithmic height;
//!   monotone hashes degrade to a linear chain.
//! - Manual teardown: a non-empty map refuses to drop, because it holds
//!   no arena to free its nodes with. `destroy` is the only sanctioned
//!   way to empty it.
//!
//! Why this split?
//! - Localize invariants: the tree module alone maintains hash order and
//!   parent-link consistency; the cursor only reads links; the façade
//!   only binds hashing and ownership policy.
//! - Cursor validity is checkable: nodes are addressed by generational
//!   keys, so a stale cursor stops resolving instead of aliasing a
//!   reused slot.
//!
//! Contract violations (panics, not errors)
//! - dropping a non-empty map without `destroy`;
//! - erasing through the end cursor or a stale cursor (double erase);
//! - advancing the end cursor.
//!
//! Absence is not an error: `find` returns the end cursor and accessors
//! on it return `None`.

mod cursor;
mod hash;
mod node_arena;
mod tree;
mod tree_hash_map;
mod tree_hash_map_proptest;

// Public surface
pub use cursor::Cursor;
pub use hash::{ComputeHash, DefaultHasher, KeyHasher};
pub use node_arena::NodeArena;
pub use tree_hash_map::{Iter, TreeHashMap};
