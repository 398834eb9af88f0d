//! Plain binary trees with no ordering or balance constraints, and a check for whether every leaf
//! lies at the same depth.

use std::cmp;

pub type Tree<T> = Option<Box<Node<T>>>;

/// A node of a plain binary tree.
#[derive(Debug)]
pub struct Node<T> {
    pub value: T,
    pub left: Tree<T>,
    pub right: Tree<T>,
}

impl<T> Node<T> {
    pub fn new(value: T) -> Self {
        Node {
            value,
            left: None,
            right: None,
        }
    }

    /// Returns a tree consisting of a single leaf.
    pub fn leaf(value: T) -> Tree<T> {
        Some(Box::new(Node::new(value)))
    }

    /// Returns a tree rooted at a node with the given subtrees.
    pub fn branch(value: T, left: Tree<T>, right: Tree<T>) -> Tree<T> {
        Some(Box::new(Node { value, left, right }))
    }
}

/// Returns the number of nodes on the longest path from the root to a leaf.
pub fn height<T>(tree: &Tree<T>) -> usize {
    match tree {
        None => 0,
        Some(node) => cmp::max(height(&node.left), height(&node.right)) + 1,
    }
}

// Minimum and maximum depth of a leaf below `tree`, or `None` if `tree` is empty.
fn leaf_depths<T>(tree: &Tree<T>, depth: usize) -> Option<(usize, usize)> {
    let node = tree.as_ref()?;
    if node.left.is_none() && node.right.is_none() {
        return Some((depth, depth));
    }
    let left = leaf_depths(&node.left, depth + 1);
    let right = leaf_depths(&node.right, depth + 1);
    match (left, right) {
        (Some((left_min, left_max)), Some((right_min, right_max))) => Some((
            cmp::min(left_min, right_min),
            cmp::max(left_max, right_max),
        )),
        (depths, None) | (None, depths) => depths,
    }
}

/// Returns `true` if every leaf of the tree is at the same depth. An empty tree has no paths and
/// trivially satisfies this.
///
/// # Examples
///
/// ```
/// use avl_collections::binary_tree::{self, Node};
///
/// let balanced = Node::branch(1, Node::leaf(2), Node::leaf(3));
/// assert!(binary_tree::equal_paths(&balanced));
///
/// let lopsided = Node::branch(1, Node::branch(2, Node::leaf(4), None), Node::leaf(3));
/// assert!(!binary_tree::equal_paths(&lopsided));
///
/// assert!(binary_tree::equal_paths::<u32>(&None));
/// ```
pub fn equal_paths<T>(tree: &Tree<T>) -> bool {
    match leaf_depths(tree, 0) {
        None => true,
        Some((min_depth, max_depth)) => min_depth == max_depth,
    }
}

#[cfg(test)]
mod tests {
    use super::{equal_paths, height, Node, Tree};

    #[test]
    fn test_empty() {
        let tree: Tree<u32> = None;
        assert!(equal_paths(&tree));
        assert_eq!(height(&tree), 0);
    }

    #[test]
    fn test_single_node() {
        assert!(equal_paths(&Node::leaf(1)));
        assert_eq!(height(&Node::leaf(1)), 1);
    }

    #[test]
    fn test_chain() {
        // A chain has exactly one leaf.
        let tree = Node::branch(1, Node::branch(2, None, Node::leaf(3)), None);
        assert!(equal_paths(&tree));
        assert_eq!(height(&tree), 3);
    }

    #[test]
    fn test_leaves_at_different_depths() {
        let tree = Node::branch(
            1,
            Node::branch(2, Node::leaf(4), Node::leaf(5)),
            Node::branch(3, Node::branch(6, Node::leaf(7), None), None),
        );
        assert!(!equal_paths(&tree));
    }

    #[test]
    fn test_full_tree() {
        let tree = Node::branch(
            1,
            Node::branch(2, Node::leaf(4), Node::leaf(5)),
            Node::branch(3, Node::leaf(6), Node::leaf(7)),
        );
        assert!(equal_paths(&tree));
    }

    #[test]
    fn test_missing_child_with_equal_leaves() {
        let tree = Node::branch(
            1,
            Node::branch(2, Node::leaf(4), None),
            Node::branch(3, None, Node::leaf(5)),
        );
        assert!(equal_paths(&tree));
    }
}
