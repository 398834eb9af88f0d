//! Self-balancing binary search tree where the heights of the two child subtrees of any node
//! differ by at most one.
//!
//! Nodes live in an arena and link to their parents, so rebalancing after an insert or a remove
//! walks upward from the modified leaf and stops as soon as a subtree's height is unchanged.

mod map;
mod node;
mod serialize;
mod set;
mod tree;

pub use self::map::{AvlMap, AvlMapIntoIter, AvlMapIter, AvlMapIterMut};
pub use self::set::{AvlSet, AvlSetIntoIter, AvlSetIter};
