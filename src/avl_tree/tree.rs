use crate::arena::Handle;
use crate::avl_tree::node::Tree;
use crate::bst::{Insertion, Side};
use crate::entry::Entry;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;
use tracing::trace;

/// Lifts `node`, the right child of `parent`, into the place of `parent`. Balance factors are left
/// to the caller.
pub fn rotate_left<T, U>(tree: &mut Tree<T, U>, parent: Handle, node: Handle) {
    assert_eq!(
        tree.right(parent),
        Some(node),
        "Expected rotated node to be the right child of its parent.",
    );
    let grandparent = tree.parent(parent);
    let inner = tree.left(node);

    tree.set_right(parent, inner);
    if let Some(inner) = inner {
        tree.set_parent(inner, Some(parent));
    }
    tree.replace_child(grandparent, parent, Some(node));
    tree.set_parent(node, grandparent);
    tree.set_left(node, Some(parent));
    tree.set_parent(parent, Some(node));
    trace!(?parent, ?node, "rotated left");
}

/// Lifts `node`, the left child of `parent`, into the place of `parent`. Balance factors are left
/// to the caller.
pub fn rotate_right<T, U>(tree: &mut Tree<T, U>, parent: Handle, node: Handle) {
    assert_eq!(
        tree.left(parent),
        Some(node),
        "Expected rotated node to be the left child of its parent.",
    );
    let grandparent = tree.parent(parent);
    let inner = tree.right(node);

    tree.set_left(parent, inner);
    if let Some(inner) = inner {
        tree.set_parent(inner, Some(parent));
    }
    tree.replace_child(grandparent, parent, Some(node));
    tree.set_parent(node, grandparent);
    tree.set_right(node, Some(parent));
    tree.set_parent(parent, Some(node));
    trace!(?parent, ?node, "rotated right");
}

// `node` is the child of `parent` on `side`.
fn rotate_up<T, U>(tree: &mut Tree<T, U>, parent: Handle, node: Handle, side: Side) {
    match side {
        Side::Left => rotate_right(tree, parent, node),
        Side::Right => rotate_left(tree, parent, node),
    }
}

fn balance<T, U>(tree: &Tree<T, U>, node: Handle) -> i8 {
    tree.node(node).balance()
}

fn set_balance<T, U>(tree: &mut Tree<T, U>, node: Handle, balance: i8) {
    tree.node_mut(node).set_balance(balance);
}

// Balance factors of the outer child and the old subtree root after a double rotation lifts
// `pivot` over both of them. `side` is the side of the outer child under the old root.
fn zig_zag_balances(pivot_balance: i8, side: Side) -> (i8, i8) {
    let sign = side.sign();
    if pivot_balance == sign {
        (0, -sign)
    } else if pivot_balance == -sign {
        (sign, 0)
    } else {
        (0, 0)
    }
}

/// Exchanges the positions of two nodes, keeping each balance factor with its position.
pub fn node_swap<T, U>(tree: &mut Tree<T, U>, a: Handle, b: Handle) {
    if a == b {
        return;
    }
    tree.node_swap(a, b);
    let (a_node, b_node) = tree.nodes_mut(a, b);
    mem::swap(&mut a_node.aux, &mut b_node.aux);
}

pub fn insert<T, U>(tree: &mut Tree<T, U>, key: T, value: U) -> Option<Entry<T, U>>
where
    T: Ord,
{
    let node = match tree.attach(key, value, 0) {
        Insertion::Replaced(entry) => return Some(entry),
        Insertion::Attached(node) => node,
    };

    if let Some(parent) = tree.parent(node) {
        if balance(tree, parent) != 0 {
            // The parent already had one child, so its height is unchanged.
            set_balance(tree, parent, 0);
        } else {
            let side = tree
                .side_of(node)
                .expect("Expected attached node to have a parent.");
            set_balance(tree, parent, side.sign());
            insert_fix(tree, parent, node);
        }
    }
    None
}

// The subtree rooted at `parent` grew by one, and `node` is the child of `parent` on the taller
// side.
fn insert_fix<T, U>(tree: &mut Tree<T, U>, mut parent: Handle, mut node: Handle) {
    while let Some(grandparent) = tree.parent(parent) {
        let side = tree
            .side_of(parent)
            .expect("Expected parent to be linked under the grandparent.");
        let new_balance = tree.node_mut(grandparent).update_balance(side.sign());

        match new_balance.abs() {
            0 => return,
            1 => {
                node = parent;
                parent = grandparent;
                continue;
            },
            _ => {},
        }

        if tree.child(parent, side) == Some(node) {
            rotate_up(tree, grandparent, parent, side);
            set_balance(tree, parent, 0);
            set_balance(tree, grandparent, 0);
        } else {
            let node_balance = balance(tree, node);
            rotate_up(tree, parent, node, side.opposite());
            rotate_up(tree, grandparent, node, side);
            let (parent_balance, grandparent_balance) = zig_zag_balances(node_balance, side);
            set_balance(tree, parent, parent_balance);
            set_balance(tree, grandparent, grandparent_balance);
            set_balance(tree, node, 0);
        }
        trace!(?side, "insert rebalanced by rotation");
        return;
    }
}

pub fn remove<T, U, V>(tree: &mut Tree<T, U>, key: &V) -> Option<Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let node = tree.find(key)?;
    if tree.left(node).is_some() && tree.right(node).is_some() {
        let predecessor = tree
            .predecessor(node)
            .expect("Expected node with a left subtree to have a predecessor.");
        node_swap(tree, node, predecessor);
    }

    let parent = tree.parent(node);
    let diff = tree.side_of(node).map_or(0, |side| -side.sign());
    let removed = tree.splice(node);
    if let Some(parent) = parent {
        remove_fix(tree, parent, diff);
    }
    Some(removed.entry)
}

// The subtree of `node` on one side shrank by one. `diff` is the resulting change to the balance
// factor of `node`: `1` if the left side shrank, `-1` if the right side shrank.
fn remove_fix<T, U>(tree: &mut Tree<T, U>, node: Handle, diff: i8) {
    let mut current = Some(node);
    let mut diff = diff;

    while let Some(node) = current {
        let parent = tree.parent(node);
        let next_diff = tree.side_of(node).map_or(0, |side| -side.sign());
        let taller = if diff < 0 { Side::Left } else { Side::Right };
        let sign = taller.sign();
        let new_balance = balance(tree, node) + diff;

        if new_balance == sign {
            // Height of the subtree is unchanged.
            set_balance(tree, node, new_balance);
            return;
        }

        if new_balance == 0 {
            set_balance(tree, node, 0);
            current = parent;
            diff = next_diff;
            continue;
        }

        let child = tree
            .child(node, taller)
            .expect("Expected the taller subtree to be non-empty.");
        let child_balance = balance(tree, child);
        if child_balance == 0 {
            rotate_up(tree, node, child, taller);
            set_balance(tree, node, sign);
            set_balance(tree, child, -sign);
            trace!(?taller, "remove rebalanced without height change");
            return;
        } else if child_balance == sign {
            rotate_up(tree, node, child, taller);
            set_balance(tree, node, 0);
            set_balance(tree, child, 0);
        } else {
            let grandchild = tree
                .child(child, taller.opposite())
                .expect("Expected the inner grandchild to be `Some`.");
            let grandchild_balance = balance(tree, grandchild);
            rotate_up(tree, child, grandchild, taller.opposite());
            rotate_up(tree, node, grandchild, taller);
            let (child_balance, node_balance) = zig_zag_balances(grandchild_balance, taller);
            set_balance(tree, node, node_balance);
            set_balance(tree, child, child_balance);
            set_balance(tree, grandchild, 0);
        }

        current = parent;
        diff = next_diff;
    }
}

/// Returns the number of edges on the longest path from the root to a leaf. The path is found by
/// descending along the taller child at each node.
pub fn height<T, U>(tree: &Tree<T, U>) -> Option<usize> {
    let mut current = tree.root()?;
    let mut height = 0;
    while !tree.node(current).is_leaf() {
        current = if balance(tree, current) > 0 {
            tree.right(current)
        } else {
            tree.left(current)
        }
        .expect("Expected the taller child of an internal node to be `Some`.");
        height += 1;
    }
    Some(height)
}

// Returns the height and the node count of the subtree rooted at `node`.
fn assert_subtree<T, U>(tree: &Tree<T, U>, node: Option<Handle>) -> (isize, usize)
where
    T: Ord,
{
    let node = match node {
        Some(node) => node,
        None => return (-1, 0),
    };

    let mut heights = [0; 2];
    let mut count = 1;
    for (index, &side) in [Side::Left, Side::Right].iter().enumerate() {
        let child = tree.child(node, side);
        if let Some(child) = child {
            assert_eq!(tree.parent(child), Some(node), "parent link does not match child slot");
            let expected = match side {
                Side::Left => Ordering::Less,
                Side::Right => Ordering::Greater,
            };
            assert_eq!(tree.key(child).cmp(tree.key(node)), expected, "child key out of order");
        }
        let (height, child_count) = assert_subtree(tree, child);
        heights[index] = height;
        count += child_count;
    }

    let actual = heights[1] - heights[0];
    assert!(actual.abs() <= 1, "subtree heights differ by {}", actual);
    assert_eq!(
        balance(tree, node) as isize,
        actual,
        "stored balance factor does not match subtree heights",
    );
    (heights[0].max(heights[1]) + 1, count)
}

/// Panics unless every parent link, ordering constraint and balance factor in the tree holds.
pub fn assert_invariants<T, U>(tree: &Tree<T, U>)
where
    T: Ord,
{
    if let Some(root) = tree.root() {
        assert_eq!(tree.parent(root), None, "root has a parent");
    }
    let (_, count) = assert_subtree(tree, tree.root());
    assert_eq!(count, tree.len(), "reachable nodes do not match the node count");

    let mut current = tree.first();
    while let Some(node) = current {
        current = tree.successor(node);
        if let Some(next) = current {
            assert!(tree.key(node) < tree.key(next), "in-order keys are not ascending");
        }
    }
}
