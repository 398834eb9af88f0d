//! An avl tree map and set backed by an arena of parent-linked nodes, plus a leaf-depth check for
//! plain binary trees.
//!
//! # Examples
//!
//! ```
//! use avl_collections::avl_tree::AvlMap;
//!
//! let mut map = AvlMap::new();
//! for key in 1..8 {
//!     map.insert(key, key * 10);
//! }
//!
//! assert_eq!(map.height(), Some(2));
//! assert_eq!(map.remove(&4), Some((4, 40)));
//! assert_eq!(map.iter().map(|(key, _)| *key).collect::<Vec<u32>>(), vec![1, 2, 3, 5, 6, 7]);
//! ```

mod arena;
mod bst;
mod entry;
pub mod avl_tree;
pub mod binary_tree;
pub mod error;
