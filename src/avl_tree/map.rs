use crate::arena::{Arena, Handle};
use crate::avl_tree::node::{Node, Tree};
use crate::avl_tree::tree;
use crate::bst::Side;
use crate::entry::Entry;
use crate::error::{Error, Result};
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};
use std::vec;

/// An ordered map implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one. Every node stores its balance
/// factor and a link to its parent, so rebalancing after an insertion or a removal walks upward
/// from the modified position and stops as soon as a subtree keeps its height.
///
/// # Examples
///
/// ```
/// use avl_collections::avl_tree::AvlMap;
///
/// let mut map = AvlMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some(&0));
/// assert_eq!(map.ceil(&2), Some(&3));
///
/// map[&0] = 2;
/// assert_eq!(map.remove(&0), Some((0, 2)));
/// assert_eq!(map.remove(&1), None);
/// ```
pub struct AvlMap<T, U> {
    tree: Tree<T, U>,
}

impl<T, U> AvlMap<T, U> {
    /// Constructs a new, empty `AvlMap<T, U>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let map: AvlMap<u32, u32> = AvlMap::new();
    /// ```
    pub fn new() -> Self {
        AvlMap { tree: Tree::new() }
    }

    /// Constructs a new, empty `AvlMap<T, U>` that can hold `capacity` entries before its node
    /// storage reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let map: AvlMap<u32, u32> = AvlMap::with_capacity(1024);
    /// assert!(map.is_empty());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        AvlMap {
            tree: Tree::with_capacity(capacity),
        }
    }

    /// Inserts a key-value pair into the map. If the key already exists in the map, it will return
    /// and replace the old key-value pair without changing the shape of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.insert(1, 2), Some((1, 1)));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Option<(T, U)>
    where
        T: Ord,
    {
        tree::insert(&mut self.tree, key, value).map(Entry::into_pair)
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<(T, U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::remove(&mut self.tree, key).map(Entry::into_pair)
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.find(key).is_some()
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get<V>(&self, key: &V) -> Option<&U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.find(key).map(|node| self.tree.value(node))
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut<V>(&mut self, key: &V) -> Option<&mut U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        match self.tree.find(key) {
            Some(node) => Some(self.tree.value_mut(node)),
            None => None,
        }
    }

    /// Returns an immutable reference to the value associated with a particular key, or
    /// `Error::KeyNotFound` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    /// use avl_collections::error::Error;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.try_get(&1), Ok(&1));
    /// assert_eq!(map.try_get(&0), Err(Error::KeyNotFound));
    /// ```
    pub fn try_get<V>(&self, key: &V) -> Result<&U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let map: AvlMap<u32, u32> = AvlMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the number of edges on the longest path from the root to a leaf, or `None` if the
    /// map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.height(), None);
    /// for key in 1..8 {
    ///     map.insert(key, key);
    /// }
    /// assert_eq!(map.height(), Some(2));
    /// ```
    pub fn height(&self) -> Option<usize> {
        tree::height(&self.tree)
    }

    /// Returns `true` if the heights of the two child subtrees of every node differ by at most
    /// one. Heights are recomputed from the structure.
    pub fn is_balanced(&self) -> bool {
        self.tree.is_balanced()
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self)
    where
        T: Ord,
    {
        tree::assert_invariants(&self.tree);
    }

    fn key_of(&self, node: Option<Handle>) -> Option<&T> {
        node.map(|node| self.tree.key(node))
    }

    /// Returns a key in the map that is less than or equal to a particular key. Returns `None` if
    /// such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.floor(&0), None);
    /// assert_eq!(map.floor(&2), Some(&1));
    /// ```
    pub fn floor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.key_of(self.tree.bound(key, Side::Left, true))
    }

    /// Returns a key in the map that is greater than or equal to a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.ceil(&0), Some(&1));
    /// assert_eq!(map.ceil(&2), None);
    /// ```
    pub fn ceil<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.key_of(self.tree.bound(key, Side::Right, true))
    }

    /// Returns the greatest key in the map that is strictly less than a particular key. The key
    /// itself does not need to be in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.predecessor(&3), Some(&1));
    /// assert_eq!(map.predecessor(&1), None);
    /// ```
    pub fn predecessor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.key_of(self.tree.bound(key, Side::Left, false))
    }

    /// Returns the least key in the map that is strictly greater than a particular key. The key
    /// itself does not need to be in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.successor(&1), Some(&3));
    /// assert_eq!(map.successor(&2), Some(&3));
    /// assert_eq!(map.successor(&3), None);
    /// ```
    pub fn successor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.key_of(self.tree.bound(key, Side::Right, false))
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.key_of(self.tree.first())
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        self.key_of(self.tree.last())
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> AvlMapIter<'_, T, U> {
        AvlMapIter {
            tree: &self.tree,
            current: self.tree.root(),
            stack: Vec::new(),
        }
    }

    /// Returns a mutable iterator over the map. The iterator will yield key-value pairs using
    /// in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// for (key, value) in &mut map {
    ///     *value += 1;
    /// }
    ///
    /// let mut iterator = map.iter_mut();
    /// assert_eq!(iterator.next(), Some((&1, &mut 2)));
    /// assert_eq!(iterator.next(), Some((&2, &mut 3)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter_mut(&mut self) -> AvlMapIterMut<'_, T, U> {
        AvlMapIterMut {
            entries: self.tree.entries_mut().into_iter(),
        }
    }
}

impl<T, U> IntoIterator for AvlMap<T, U> {
    type IntoIter = AvlMapIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(self) -> Self::IntoIter {
        let (arena, root) = self.tree.into_parts();
        Self::IntoIter {
            arena,
            current: root,
            stack: Vec::new(),
        }
    }
}

impl<'a, T, U> IntoIterator for &'a AvlMap<T, U>
where
    T: 'a,
    U: 'a,
{
    type IntoIter = AvlMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, U> IntoIterator for &'a mut AvlMap<T, U>
where
    T: 'a,
    U: 'a,
{
    type IntoIter = AvlMapIterMut<'a, T, U>;
    type Item = (&'a T, &'a mut U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An owning iterator for `AvlMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields owned entries.
pub struct AvlMapIntoIter<T, U> {
    arena: Arena<Node<T, U>>,
    current: Option<Handle>,
    stack: Vec<Handle>,
}

impl<T, U> Iterator for AvlMapIntoIter<T, U> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.current = self.arena[node].left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            let Node { entry, right, .. } = self.arena.free(node);
            self.current = right;
            entry.into_pair()
        })
    }
}

/// An iterator for `AvlMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
pub struct AvlMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    tree: &'a Tree<T, U>,
    current: Option<Handle>,
    stack: Vec<Handle>,
}

impl<'a, T, U> Iterator for AvlMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some(node) = self.current {
            self.current = tree.left(node);
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            self.current = tree.right(node);
            let Entry { ref key, ref value } = *tree.entry(node);
            (key, value)
        })
    }
}

/// A mutable iterator for `AvlMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields mutable references.
pub struct AvlMapIterMut<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    entries: vec::IntoIter<&'a mut Entry<T, U>>,
}

impl<'a, T, U> Iterator for AvlMapIterMut<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a mut U);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|entry| {
            let Entry {
                ref key,
                ref mut value,
            } = *entry;
            (key, value)
        })
    }
}

impl<T, U> Default for AvlMap<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U> FromIterator<(T, U)> for AvlMap<T, U>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (T, U)>,
    {
        let mut map = AvlMap::new();
        map.extend(iter);
        map
    }
}

impl<T, U> Extend<(T, U)> for AvlMap<T, U>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (T, U)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<T, U> fmt::Debug for AvlMap<T, U>
where
    T: fmt::Debug,
    U: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<T, U> PartialEq for AvlMap<T, U>
where
    T: PartialEq,
    U: PartialEq,
{
    fn eq(&self, other: &AvlMap<T, U>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, U> Eq for AvlMap<T, U>
where
    T: Eq,
    U: Eq,
{
}

impl<'a, T, U, V> Index<&'a V> for AvlMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    type Output = U;

    fn index(&self, key: &V) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, T, U, V> IndexMut<&'a V> for AvlMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    fn index_mut(&mut self, key: &V) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}

#[cfg(test)]
mod tests {
    use super::AvlMap;
    use crate::error::Error;

    #[test]
    fn test_len_empty() {
        let map: AvlMap<u32, u32> = AvlMap::new();
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let map: AvlMap<u32, u32> = AvlMap::new();
        assert!(map.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let map: AvlMap<u32, u32> = AvlMap::new();
        assert_eq!(map.min(), None);
        assert_eq!(map.max(), None);
    }

    #[test]
    fn test_insert() {
        let mut map = AvlMap::new();
        assert_eq!(map.insert(1, 1), None);
        assert!(map.contains_key(&1));
        assert_eq!(map.get(&1), Some(&1));
    }

    #[test]
    fn test_insert_replace() {
        let mut map = AvlMap::new();
        assert_eq!(map.insert(1, 1), None);
        assert_eq!(map.insert(1, 3), Some((1, 1)));
        assert_eq!(map.get(&1), Some(&3));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_insert_ascending() {
        let mut map = AvlMap::new();
        for key in 1..8 {
            map.insert(key, key);
            map.assert_invariants();
        }
        assert_eq!(map.height(), Some(2));
        assert_eq!(map.tree.key(map.tree.root().unwrap()), &4);
    }

    #[test]
    fn test_remove() {
        let mut map = AvlMap::new();
        map.insert(1, 1);
        assert_eq!(map.remove(&1), Some((1, 1)));
        assert!(!map.contains_key(&1));
        assert!(map.is_empty());
        assert_eq!(map.height(), None);
    }

    #[test]
    fn test_remove_min_of_five() {
        let mut map: AvlMap<u32, u32> = (1..6).map(|key| (key, key)).collect();
        assert_eq!(map.remove(&1), Some((1, 1)));
        map.assert_invariants();
        assert_eq!(map.iter().map(|(key, _)| *key).collect::<Vec<u32>>(), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_insert_then_remove_restores_keys() {
        let mut map: AvlMap<u32, u32> = (0..20).map(|key| (key * 2, key)).collect();
        let before: Vec<u32> = map.iter().map(|(key, _)| *key).collect();
        map.insert(7, 7);
        map.remove(&7);
        map.assert_invariants();
        assert_eq!(map.iter().map(|(key, _)| *key).collect::<Vec<u32>>(), before);
    }

    #[test]
    fn test_try_get() {
        let mut map = AvlMap::new();
        map.insert(1, 1);
        assert_eq!(map.try_get(&1), Ok(&1));
        assert_eq!(map.try_get(&2), Err(Error::KeyNotFound));
    }

    #[test]
    fn test_min_max() {
        let mut map = AvlMap::new();
        map.insert(1, 1);
        map.insert(3, 3);
        map.insert(5, 5);

        assert_eq!(map.min(), Some(&1));
        assert_eq!(map.max(), Some(&5));
    }

    #[test]
    fn test_get_mut() {
        let mut map = AvlMap::new();
        map.insert(1, 1);
        {
            let value = map.get_mut(&1);
            *value.unwrap() = 3;
        }
        assert_eq!(map.get(&1), Some(&3));
    }

    #[test]
    fn test_floor_ceil() {
        let mut map = AvlMap::new();
        map.insert(1, 1);
        map.insert(3, 3);
        map.insert(5, 5);

        assert_eq!(map.floor(&0), None);
        assert_eq!(map.floor(&2), Some(&1));
        assert_eq!(map.floor(&4), Some(&3));
        assert_eq!(map.floor(&6), Some(&5));

        assert_eq!(map.ceil(&0), Some(&1));
        assert_eq!(map.ceil(&2), Some(&3));
        assert_eq!(map.ceil(&4), Some(&5));
        assert_eq!(map.ceil(&6), None);
    }

    #[test]
    fn test_predecessor_successor() {
        let mut map = AvlMap::new();
        map.insert(1, 1);
        map.insert(3, 3);
        map.insert(5, 5);

        assert_eq!(map.predecessor(&1), None);
        assert_eq!(map.predecessor(&3), Some(&1));
        assert_eq!(map.predecessor(&4), Some(&3));
        assert_eq!(map.successor(&3), Some(&5));
        assert_eq!(map.successor(&0), Some(&1));
        assert_eq!(map.successor(&5), None);
    }

    #[test]
    fn test_into_iter() {
        let mut map = AvlMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        assert_eq!(
            map.into_iter().collect::<Vec<(u32, u32)>>(),
            vec![(1, 2), (3, 4), (5, 6)],
        );
    }

    #[test]
    fn test_into_iter_partial() {
        let map: AvlMap<u32, String> = (0..10).map(|key| (key, key.to_string())).collect();
        let mut iter = map.into_iter();
        assert_eq!(iter.next(), Some((0, String::from("0"))));
        assert_eq!(iter.next(), Some((1, String::from("1"))));
    }

    #[test]
    fn test_iter() {
        let mut map = AvlMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        assert_eq!(
            map.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&1, &2), (&3, &4), (&5, &6)],
        );
    }

    #[test]
    fn test_iter_mut() {
        let mut map = AvlMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        for (_, value) in &mut map {
            *value += 1;
        }

        assert_eq!(
            map.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&1, &3), (&3, &5), (&5, &7)],
        );
    }

    #[test]
    fn test_iter_mut_after_removals() {
        let mut map: AvlMap<u32, u32> = (0..8).map(|key| (key, key)).collect();
        map.remove(&2);
        map.remove(&5);
        map.insert(9, 9);
        for (key, value) in map.iter_mut() {
            *value = key * 10;
        }
        assert_eq!(
            map.into_iter().collect::<Vec<(u32, u32)>>(),
            vec![(0, 0), (1, 10), (3, 30), (4, 40), (6, 60), (7, 70), (9, 90)],
        );
    }

    #[test]
    fn test_index() {
        let mut map = AvlMap::new();
        map.insert(1, 1);
        map[&1] = 4;
        assert_eq!(map[&1], 4);
    }

    #[test]
    #[should_panic]
    fn test_index_absent() {
        let map: AvlMap<u32, u32> = AvlMap::new();
        let _value = map[&1];
    }

    #[test]
    fn test_eq_debug() {
        let a: AvlMap<u32, u32> = vec![(2, 20), (1, 10)].into_iter().collect();
        let b: AvlMap<u32, u32> = vec![(1, 10), (2, 20)].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(format!("{:?}", a), "{1: 10, 2: 20}");
    }

    #[test]
    fn test_clear() {
        let mut map: AvlMap<u32, u32> = (0..4).map(|key| (key, key)).collect();
        map.clear();
        assert!(map.is_empty());
        map.insert(1, 1);
        map.assert_invariants();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_is_balanced() {
        let mut map = AvlMap::new();
        assert!(map.is_balanced());
        for key in (0..64).rev() {
            map.insert(key, ());
            assert!(map.is_balanced());
        }
    }
}
