use crate::arena::{Arena, Handle};
use crate::bst::node::{Node, Side};
use crate::entry::Entry;
use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::mem;

/// The outcome of attaching a key to the tree.
pub enum Insertion<T, U> {
    /// A new leaf was allocated at this handle.
    Attached(Handle),
    /// The key already existed; the old entry was replaced in place.
    Replaced(Entry<T, U>),
}

/// An unbalanced binary search tree whose nodes live in an arena and link to their parents.
///
/// All structural primitives keep the parent handle of every node consistent with the child slot
/// that refers to it.
pub struct BinarySearchTree<T, U, A> {
    arena: Arena<Node<T, U, A>>,
    root: Option<Handle>,
}

impl<T, U, A> BinarySearchTree<T, U, A> {
    pub fn new() -> Self {
        BinarySearchTree {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        BinarySearchTree {
            arena: Arena::with_capacity(capacity),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    pub fn root(&self) -> Option<Handle> {
        self.root
    }

    pub fn node(&self, node: Handle) -> &Node<T, U, A> {
        &self.arena[node]
    }

    pub fn node_mut(&mut self, node: Handle) -> &mut Node<T, U, A> {
        &mut self.arena[node]
    }

    pub fn nodes_mut(&mut self, a: Handle, b: Handle) -> (&mut Node<T, U, A>, &mut Node<T, U, A>) {
        self.arena.pair_mut(a, b)
    }

    pub fn entry(&self, node: Handle) -> &Entry<T, U> {
        &self.arena[node].entry
    }

    pub fn key(&self, node: Handle) -> &T {
        &self.arena[node].entry.key
    }

    pub fn value(&self, node: Handle) -> &U {
        &self.arena[node].entry.value
    }

    pub fn value_mut(&mut self, node: Handle) -> &mut U {
        &mut self.arena[node].entry.value
    }

    pub fn parent(&self, node: Handle) -> Option<Handle> {
        self.arena[node].parent
    }

    pub fn left(&self, node: Handle) -> Option<Handle> {
        self.arena[node].left
    }

    pub fn right(&self, node: Handle) -> Option<Handle> {
        self.arena[node].right
    }

    pub fn child(&self, node: Handle, side: Side) -> Option<Handle> {
        self.arena[node].child(side)
    }

    pub fn set_parent(&mut self, node: Handle, parent: Option<Handle>) {
        self.arena[node].parent = parent;
    }

    pub fn set_left(&mut self, node: Handle, child: Option<Handle>) {
        self.arena[node].left = child;
    }

    pub fn set_right(&mut self, node: Handle, child: Option<Handle>) {
        self.arena[node].right = child;
    }

    pub fn set_child(&mut self, node: Handle, side: Side, child: Option<Handle>) {
        self.arena[node].set_child(side, child);
    }

    /// Returns which child of its parent `node` is, or `None` if `node` is the root.
    pub fn side_of(&self, node: Handle) -> Option<Side> {
        self.parent(node).map(|parent| {
            self.arena[parent]
                .side_of_child(node)
                .expect("Expected parent to link back to its child.")
        })
    }

    /// Points the slot of `parent` that holds `old` at `new` instead. A `parent` of `None` means
    /// `old` is the root.
    pub fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            Some(parent) => {
                let side = self.arena[parent]
                    .side_of_child(old)
                    .expect("Expected node to be a child of the given parent.");
                self.arena[parent].set_child(side, new);
            },
            None => {
                debug_assert_eq!(self.root, Some(old));
                self.root = new;
            },
        }
    }

    fn extreme(&self, mut node: Handle, side: Side) -> Handle {
        while let Some(child) = self.child(node, side) {
            node = child;
        }
        node
    }

    pub fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, Side::Left))
    }

    pub fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, Side::Right))
    }

    // In-order neighbour of `node` on `side`.
    fn neighbour(&self, node: Handle, side: Side) -> Option<Handle> {
        if let Some(child) = self.child(node, side) {
            return Some(self.extreme(child, side.opposite()));
        }
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            if self.child(parent, side.opposite()) == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Returns the in-order predecessor of `node`.
    pub fn predecessor(&self, node: Handle) -> Option<Handle> {
        self.neighbour(node, Side::Left)
    }

    /// Returns the in-order successor of `node`.
    pub fn successor(&self, node: Handle) -> Option<Handle> {
        self.neighbour(node, Side::Right)
    }

    /// Returns the handles of all nodes in in-order.
    pub fn in_order(&self) -> Vec<Handle> {
        let mut ret = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        let mut current = self.root;
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = self.left(node);
            }
            match stack.pop() {
                Some(node) => {
                    ret.push(node);
                    current = self.right(node);
                },
                None => return ret,
            }
        }
    }

    /// Returns mutable references to every entry in in-order.
    pub fn entries_mut(&mut self) -> Vec<&mut Entry<T, U>> {
        let order = self.in_order();
        let mut slots: Vec<Option<&mut Entry<T, U>>> =
            (0..self.arena.slot_count()).map(|_| None).collect();
        for (handle, node) in self.arena.iter_mut() {
            slots[handle.index()] = Some(&mut node.entry);
        }
        order
            .into_iter()
            .map(|handle| {
                slots[handle.index()]
                    .take()
                    .expect("Expected every linked node to be live.")
            })
            .collect()
    }

    pub fn into_parts(self) -> (Arena<Node<T, U, A>>, Option<Handle>) {
        (self.arena, self.root)
    }

    pub fn find<V>(&self, key: &V) -> Option<Handle>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(node) = current {
            current = match key.cmp(self.key(node).borrow()) {
                Ordering::Less => self.left(node),
                Ordering::Greater => self.right(node),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Returns the node whose key is nearest to `key` on `side`: the greatest key below it for
    /// `Side::Left` and the least key above it for `Side::Right`. An equal key is returned only if
    /// `inclusive` is set.
    pub fn bound<V>(&self, key: &V, side: Side, inclusive: bool) -> Option<Handle>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut best = None;
        let mut current = self.root;
        while let Some(node) = current {
            let next = match (key.cmp(self.key(node).borrow()), side) {
                (Ordering::Equal, _) if inclusive => return Some(node),
                (Ordering::Equal, _) => side,
                (Ordering::Greater, Side::Left) | (Ordering::Less, Side::Right) => {
                    best = Some(node);
                    side.opposite()
                },
                (Ordering::Less, Side::Left) => Side::Left,
                (Ordering::Greater, Side::Right) => Side::Right,
            };
            current = self.child(node, next);
        }
        best
    }

    /// Inserts a key as a new leaf without rebalancing. An existing key has its entry replaced in
    /// place and the tree shape is left untouched.
    pub fn attach(&mut self, key: T, value: U, aux: A) -> Insertion<T, U>
    where
        T: Ord,
    {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;
        while let Some(node) = current {
            let node_ref = &mut self.arena[node];
            side = match key.cmp(&node_ref.entry.key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    let old_entry = mem::replace(&mut node_ref.entry, Entry { key, value });
                    return Insertion::Replaced(old_entry);
                },
            };
            parent = Some(node);
            current = node_ref.child(side);
        }

        let handle = self.arena.allocate(Node::new(key, value, aux, parent));
        match parent {
            Some(parent) => self.set_child(parent, side, Some(handle)),
            None => self.root = Some(handle),
        }
        Insertion::Attached(handle)
    }

    /// Unlinks a node with at most one child, lifting the child into its place, and frees it.
    ///
    /// # Panics
    ///
    /// Panics if `node` has two children.
    pub fn splice(&mut self, node: Handle) -> Node<T, U, A> {
        let (parent, child) = {
            let node_ref = &self.arena[node];
            assert!(
                node_ref.left.is_none() || node_ref.right.is_none(),
                "Expected node to have at most one child.",
            );
            (node_ref.parent, node_ref.left.or(node_ref.right))
        };
        self.replace_child(parent, node, child);
        if let Some(child) = child {
            self.set_parent(child, parent);
        }
        self.arena.free(node)
    }

    /// Exchanges the tree positions of two nodes. Entries and payloads stay with their handles.
    pub fn node_swap(&mut self, a: Handle, b: Handle) {
        if a == b {
            return;
        }
        let swapped = |link: Option<Handle>| {
            link.map(|node| {
                if node == a {
                    b
                } else if node == b {
                    a
                } else {
                    node
                }
            })
        };

        let links = |node: &Node<T, U, A>| [node.parent, node.left, node.right];
        let a_links = links(&self.arena[a]);
        let b_links = links(&self.arena[b]);

        let mut neighbours: Vec<Handle> = a_links
            .iter()
            .chain(b_links.iter())
            .filter_map(|link| *link)
            .filter(|&node| node != a && node != b)
            .collect();
        neighbours.sort_by_key(|node| node.index());
        neighbours.dedup();

        for node in neighbours {
            let node_ref = &mut self.arena[node];
            node_ref.parent = swapped(node_ref.parent);
            node_ref.left = swapped(node_ref.left);
            node_ref.right = swapped(node_ref.right);
        }

        {
            let (a_ref, b_ref) = self.arena.pair_mut(a, b);
            a_ref.parent = swapped(b_links[0]);
            a_ref.left = swapped(b_links[1]);
            a_ref.right = swapped(b_links[2]);
            b_ref.parent = swapped(a_links[0]);
            b_ref.left = swapped(a_links[1]);
            b_ref.right = swapped(a_links[2]);
        }
        self.root = swapped(self.root);
    }

    /// Returns the height of the subtree rooted at `node` if every node in it has child heights
    /// that differ by at most one. Heights count edges; an empty subtree has height `-1`.
    pub fn balanced_height(&self, node: Option<Handle>) -> Option<isize> {
        match node {
            None => Some(-1),
            Some(node) => {
                let left = self.balanced_height(self.left(node))?;
                let right = self.balanced_height(self.right(node))?;
                if (left - right).abs() > 1 {
                    return None;
                }
                Some(cmp::max(left, right) + 1)
            },
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.balanced_height(self.root).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{BinarySearchTree, Insertion};
    use crate::arena::Handle;
    use crate::bst::Side;

    fn build(keys: &[u32]) -> BinarySearchTree<u32, u32, ()> {
        let mut tree = BinarySearchTree::new();
        for &key in keys {
            tree.attach(key, key * 10, ());
        }
        tree
    }

    fn keys(tree: &BinarySearchTree<u32, u32, ()>) -> Vec<u32> {
        tree.in_order().into_iter().map(|node| *tree.key(node)).collect()
    }

    fn assert_links(tree: &BinarySearchTree<u32, u32, ()>) {
        if let Some(root) = tree.root() {
            assert_eq!(tree.parent(root), None);
        }
        for node in tree.in_order() {
            for &side in &[Side::Left, Side::Right] {
                if let Some(child) = tree.child(node, side) {
                    assert_eq!(tree.parent(child), Some(node));
                }
            }
        }
    }

    fn handle_of(tree: &BinarySearchTree<u32, u32, ()>, key: u32) -> Handle {
        tree.find(&key).unwrap()
    }

    #[test]
    fn test_attach_replace() {
        let mut tree = build(&[2, 1, 3]);
        match tree.attach(1, 5, ()) {
            Insertion::Replaced(entry) => assert_eq!((entry.key, entry.value), (1, 10)),
            Insertion::Attached(_) => panic!("Expected existing key to be replaced."),
        }
        assert_eq!(tree.len(), 3);
        assert_eq!(*tree.value(handle_of(&tree, 1)), 5);
    }

    #[test]
    fn test_find() {
        let tree = build(&[5, 3, 8, 1, 4]);
        assert_eq!(tree.find(&4).map(|node| *tree.key(node)), Some(4));
        assert!(tree.find(&7).is_none());
    }

    #[test]
    fn test_predecessor_successor() {
        let tree = build(&[5, 3, 8, 1, 4, 7, 9]);
        let four = handle_of(&tree, 4);
        let five = handle_of(&tree, 5);
        let seven = handle_of(&tree, 7);
        assert_eq!(tree.predecessor(five), Some(four));
        assert_eq!(tree.successor(four), Some(five));
        assert_eq!(tree.predecessor(seven), Some(five));
        assert_eq!(tree.predecessor(handle_of(&tree, 1)), None);
        assert_eq!(tree.successor(handle_of(&tree, 9)), None);
    }

    #[test]
    fn test_bound() {
        let tree = build(&[5, 3, 8]);
        let key_of = |node: Option<Handle>| node.map(|node| *tree.key(node));
        assert_eq!(key_of(tree.bound(&5, Side::Left, true)), Some(5));
        assert_eq!(key_of(tree.bound(&5, Side::Left, false)), Some(3));
        assert_eq!(key_of(tree.bound(&5, Side::Right, false)), Some(8));
        assert_eq!(key_of(tree.bound(&4, Side::Right, true)), Some(5));
        assert_eq!(key_of(tree.bound(&2, Side::Left, true)), None);
        assert_eq!(key_of(tree.bound(&8, Side::Right, false)), None);
    }

    #[test]
    fn test_splice() {
        let mut tree = build(&[5, 3, 8, 1]);
        let three = handle_of(&tree, 3);
        let removed = tree.splice(three);
        assert_eq!(removed.entry.key, 3);
        assert_eq!(keys(&tree), vec![1, 5, 8]);
        assert_eq!(tree.left(handle_of(&tree, 5)), Some(handle_of(&tree, 1)));
        assert_links(&tree);
    }

    #[test]
    fn test_splice_root() {
        let mut tree = build(&[5, 8]);
        tree.splice(handle_of(&tree, 5));
        assert_eq!(tree.root(), Some(handle_of(&tree, 8)));
        assert_links(&tree);
    }

    #[test]
    #[should_panic]
    fn test_splice_two_children() {
        let mut tree = build(&[5, 3, 8]);
        let root = tree.root().unwrap();
        tree.splice(root);
    }

    #[test]
    fn test_node_swap_adjacent() {
        let mut tree = build(&[5, 3, 8, 1, 4]);
        let five = handle_of(&tree, 5);
        let three = handle_of(&tree, 3);
        tree.node_swap(five, three);

        assert_eq!(tree.root(), Some(three));
        assert_eq!(tree.left(three), Some(five));
        assert_eq!(tree.parent(five), Some(three));
        assert_eq!(tree.left(five), Some(handle_of(&tree, 1)));
        assert_eq!(tree.right(five), Some(handle_of(&tree, 4)));
        assert_links(&tree);
    }

    #[test]
    fn test_node_swap_distant() {
        let mut tree = build(&[5, 3, 8, 1, 4, 7, 9]);
        let five = handle_of(&tree, 5);
        let four = handle_of(&tree, 4);
        tree.node_swap(five, four);

        // Keys travel with their handles, so in-order now shows them exchanged.
        assert_eq!(keys(&tree), vec![1, 3, 5, 4, 7, 8, 9]);
        assert_eq!(tree.root(), Some(four));
        assert!(tree.node(five).is_leaf());
        assert_links(&tree);
    }

    #[test]
    fn test_node_swap_siblings() {
        let mut tree = build(&[5, 3, 8]);
        let three = handle_of(&tree, 3);
        let eight = handle_of(&tree, 8);
        tree.node_swap(three, eight);
        let root = tree.root().unwrap();
        assert_eq!(tree.left(root), Some(eight));
        assert_eq!(tree.right(root), Some(three));
        assert_links(&tree);
    }

    #[test]
    fn test_is_balanced() {
        assert!(build(&[]).is_balanced());
        assert!(build(&[2, 1, 3]).is_balanced());
        assert!(!build(&[1, 2, 3]).is_balanced());

        let tree = build(&[2, 1, 3, 4]);
        assert_eq!(tree.balanced_height(tree.root()), Some(2));
    }

    #[test]
    fn test_entries_mut() {
        let mut tree = build(&[2, 1, 3]);
        for entry in tree.entries_mut() {
            entry.value += 1;
        }
        let values: Vec<u32> = tree.in_order().into_iter().map(|node| *tree.value(node)).collect();
        assert_eq!(values, vec![11, 21, 31]);
    }
}
