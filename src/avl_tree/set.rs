use crate::avl_tree::map::{AvlMap, AvlMapIntoIter, AvlMapIter};
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;

/// An ordered set of keys stored in an avl tree.
///
/// `AvlSet<T>` is an `AvlMap<T, ()>` with the values hidden. Lookups accept any borrowed form of
/// the key, so an `AvlSet<String>` can be queried with a `&str`.
///
/// # Examples
///
/// ```
/// use avl_collections::avl_tree::AvlSet;
///
/// let mut set: AvlSet<String> = ["pear", "fig", "apple"].iter().map(|s| s.to_string()).collect();
/// assert!(set.contains("fig"));
/// assert_eq!(set.ceil("b").map(String::as_str), Some("fig"));
///
/// assert_eq!(set.remove("fig"), Some(String::from("fig")));
/// assert_eq!(set.iter().map(String::as_str).collect::<Vec<&str>>(), vec!["apple", "pear"]);
/// ```
pub struct AvlSet<T> {
    map: AvlMap<T, ()>,
}

impl<T> AvlSet<T> {
    pub fn new() -> Self {
        AvlSet { map: AvlMap::new() }
    }

    /// Reserves node storage for `capacity` keys up front.
    pub fn with_capacity(capacity: usize) -> Self {
        AvlSet {
            map: AvlMap::with_capacity(capacity),
        }
    }

    /// Adds `key` to the set. When an equal key is already present it is replaced and the previous
    /// key is returned, leaving the shape of the tree unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert_eq!(set.insert(7), None);
    /// assert_eq!(set.insert(7), Some(7));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> Option<T>
    where
        T: Ord,
    {
        self.map.insert(key, ()).map(|(old, ())| old)
    }

    /// Takes `key` out of the set and rebalances. Returns `None` and leaves the set untouched when
    /// the key is absent.
    pub fn remove<V>(&mut self, key: &V) -> Option<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.map.remove(key).map(|(old, ())| old)
    }

    pub fn contains<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Edges on the longest root-to-leaf path, or `None` for an empty set.
    pub fn height(&self) -> Option<usize> {
        self.map.height()
    }

    /// Recomputes subtree heights and checks that siblings differ by at most one everywhere.
    pub fn is_balanced(&self) -> bool {
        self.map.is_balanced()
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self)
    where
        T: Ord,
    {
        self.map.assert_invariants();
    }

    /// Largest key less than or equal to `key`.
    pub fn floor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.map.floor(key)
    }

    /// Smallest key greater than or equal to `key`.
    pub fn ceil<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.map.ceil(key)
    }

    /// Largest key strictly less than `key`, which need not be in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = vec![10, 20, 30].into_iter().collect();
    /// assert_eq!(set.predecessor(&20), Some(&10));
    /// assert_eq!(set.predecessor(&25), Some(&20));
    /// assert_eq!(set.predecessor(&10), None);
    /// ```
    pub fn predecessor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.map.predecessor(key)
    }

    /// Smallest key strictly greater than `key`, which need not be in the set.
    pub fn successor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.map.successor(key)
    }

    pub fn min(&self) -> Option<&T> {
        self.map.min()
    }

    pub fn max(&self) -> Option<&T> {
        self.map.max()
    }

    /// Borrows the keys in ascending order.
    pub fn iter(&self) -> AvlSetIter<'_, T> {
        AvlSetIter(self.map.iter())
    }
}

impl<T> IntoIterator for AvlSet<T> {
    type IntoIter = AvlSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        AvlSetIntoIter(self.map.into_iter())
    }
}

impl<'a, T> IntoIterator for &'a AvlSet<T>
where
    T: 'a,
{
    type IntoIter = AvlSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Consumes an `AvlSet<T>`, yielding its keys in ascending order.
pub struct AvlSetIntoIter<T>(AvlMapIntoIter<T, ()>);

impl<T> Iterator for AvlSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, ())| key)
    }
}

/// Borrowing iterator over an `AvlSet<T>` in ascending key order.
pub struct AvlSetIter<'a, T>(AvlMapIter<'a, T, ()>)
where
    T: 'a;

impl<'a, T> Iterator for AvlSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, _)| key)
    }
}

impl<T> Default for AvlSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for AvlSet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        AvlSet {
            map: iter.into_iter().map(|key| (key, ())).collect(),
        }
    }
}

impl<T> Extend<T> for AvlSet<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.map.extend(iter.into_iter().map(|key| (key, ())));
    }
}

impl<T> fmt::Debug for AvlSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for AvlSet<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &AvlSet<T>) -> bool {
        self.map == other.map
    }
}

impl<T> Eq for AvlSet<T> where T: Eq {}
