//! Unbalanced binary search tree over arena-allocated nodes with parent links.
//!
//! This is the base layer that balanced trees build on. Nodes carry an auxiliary payload `A` that
//! the base layer stores but never interprets.

mod node;
mod tree;

pub use self::node::{Node, Side};
pub use self::tree::{BinarySearchTree, Insertion};
