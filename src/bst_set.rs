//! An ordered set on an unbalanced binary search tree.
//!
//! See [`BstSet`] for the collection itself; this module also holds its iterators.

use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;

use crate::comparator::{Comparator, NaturalOrder};
use crate::cursor::{Cursor, CursorError};
use crate::raw::{Handle, Node, RawBst};

mod capacity;

/// An ordered set based on an unbalanced binary search tree with parent links.
///
/// Values are kept in ascending order as defined by the comparator `C`, which defaults to
/// [`NaturalOrder`] (the values' own [`Ord`]). Inserting a value equal to one already
/// present leaves the set unchanged.
///
/// The tree is deliberately **not** self-balancing. Each node records its height and
/// balance factor, but no rotation ever happens, so lookups, insertions and removals take
/// O(h) where h can reach `len() - 1` (for example after inserting values in sorted
/// order). No operation recurses, so a deep tree is slow but never overflows the stack.
///
/// Positions are represented by [`Cursor`]s, which do not borrow the set and are checked
/// on every use: see the [`Cursor`] documentation for when they become invalid. For plain
/// traversal, [`BstSet::iter`] returns an ordinary borrowing iterator.
///
/// It is a logic error for a value to be modified in such a way that its ordering relative
/// to any other value, as determined by the comparator, changes while it is in the set.
/// The behavior resulting from such a logic error is not specified, but will be
/// encapsulated to the `BstSet` that observed it and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use parent_bst::BstSet;
///
/// let mut set = BstSet::new();
/// set.insert(10);
/// set.insert(-10);
/// set.insert(20);
/// set.insert(10);
/// set.insert(0);
///
/// assert_eq!(set.len(), 4);
/// assert!(set.iter().eq([-10, 0, 10, 20].iter()));
///
/// // Walk with cursors, the way the iterator does internally.
/// let mut cursor = set.begin();
/// let mut seen = Vec::new();
/// while cursor != set.end() {
///     seen.push(*set.get(cursor).unwrap());
///     cursor = set.advance(cursor).unwrap();
/// }
/// assert_eq!(seen, [-10, 0, 10, 20]);
/// ```
pub struct BstSet<T, C = NaturalOrder> {
    raw: RawBst<T, C>,
}

/// An iterator over the values of a `BstSet`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`BstSet`].
/// Each step follows the in-order successor through child and parent links, which is
/// amortized O(1).
///
/// # Examples
///
/// ```
/// use parent_bst::BstSet;
///
/// let set = BstSet::from([3, 1, 2]);
/// let mut iter = set.iter();
/// assert_eq!(iter.len(), 3);
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), Some(&3));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: BstSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a, C: 'a = NaturalOrder> {
    tree: &'a RawBst<T, C>,
    next: Option<Handle>,
    remaining: usize,
}

/// An owning iterator over the values of a `BstSet`, in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`BstSet`]
/// (provided by the [`IntoIterator`] trait).
///
/// # Examples
///
/// ```
/// use parent_bst::BstSet;
///
/// let set = BstSet::from([1, 2, 3]);
/// let mut iter = set.into_iter();
/// assert_eq!(iter.next(), Some(1));
/// assert_eq!(iter.next_back(), Some(3));
/// assert_eq!(iter.next(), Some(2));
/// ```
///
/// [`into_iter`]: BstSet#method.into_iter
pub struct IntoIter<T> {
    inner: alloc::vec::IntoIter<T>,
}

impl<T> BstSet<T> {
    /// Makes a new, empty `BstSet` ordered by `T`'s [`Ord`] implementation.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BstSet;
    ///
    /// let set: BstSet<i32> = BstSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T, C> BstSet<T, C> {
    /// Makes a new, empty `BstSet` ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BstSet;
    ///
    /// let mut set = BstSet::with_comparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
    /// set.insert("ccc");
    /// set.insert("a");
    /// set.insert("bb");
    /// // Equal length means equal value, so this one is rejected.
    /// assert!(!set.insert("dd"));
    ///
    /// assert!(set.iter().eq(["a", "bb", "ccc"].iter()));
    /// ```
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        BstSet {
            raw: RawBst::new(comparator),
        }
    }

    /// Returns a reference to the comparator that orders this set.
    #[must_use]
    pub fn comparator(&self) -> &C {
        self.raw.comparator()
    }

    /// Returns the number of values in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BstSet;
    ///
    /// let mut v = BstSet::new();
    /// assert_eq!(v.len(), 0);
    /// v.insert(1);
    /// assert_eq!(v.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the set contains no values.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BstSet;
    ///
    /// let mut v = BstSet::new();
    /// assert!(v.is_empty());
    /// v.insert(1);
    /// assert!(!v.is_empty());
    /// ```
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns a cursor on the smallest value, or the end cursor if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BstSet;
    ///
    /// let set = BstSet::from([2, 1]);
    /// assert_eq!(set.get(set.begin()), Ok(&1));
    /// ```
    #[must_use]
    pub fn begin(&self) -> Cursor {
        self.cursor_for(self.raw.first())
    }

    /// Returns the end cursor, positioned past the largest value.
    ///
    /// This is always [`Cursor::END`].
    #[must_use]
    pub fn end(&self) -> Cursor {
        Cursor::END
    }

    /// Returns the value under `cursor`.
    ///
    /// # Errors
    ///
    /// [`CursorError::End`] for the end cursor, [`CursorError::Invalidated`] if the value
    /// the cursor referred to has since been erased or overwritten.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::{BstSet, CursorError};
    ///
    /// let set = BstSet::from([7]);
    /// assert_eq!(set.get(set.find(&7)), Ok(&7));
    /// assert_eq!(set.get(set.end()), Err(CursorError::End));
    /// ```
    pub fn get(&self, cursor: Cursor) -> Result<&T, CursorError> {
        self.node_at(cursor).map(|(_, node)| node.value())
    }

    /// Moves `cursor` to the next larger value, or to the end if it was on the largest.
    ///
    /// Advancing the end cursor yields the end cursor.
    ///
    /// # Errors
    ///
    /// [`CursorError::Invalidated`] if `cursor` no longer refers to a value in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BstSet;
    ///
    /// let set = BstSet::from([1, 3]);
    /// let cursor = set.advance(set.begin()).unwrap();
    /// assert_eq!(set.get(cursor), Ok(&3));
    /// assert_eq!(set.advance(cursor), Ok(set.end()));
    /// assert_eq!(set.advance(set.end()), Ok(set.end()));
    /// ```
    pub fn advance(&self, cursor: Cursor) -> Result<Cursor, CursorError> {
        if cursor.is_end() {
            return Ok(Cursor::END);
        }
        let (handle, _) = self.node_at(cursor)?;
        Ok(self.cursor_for(self.raw.successor(handle)))
    }

    /// Removes the value under `cursor`. Erasing at the end cursor does nothing.
    ///
    /// This invalidates `cursor` and every copy of it. If the erased value's node had two
    /// children, cursors on its in-order successor are invalidated too, because that value
    /// moves into the erased value's node.
    ///
    /// # Errors
    ///
    /// [`CursorError::Invalidated`] if `cursor` no longer refers to a value in the set. The
    /// set is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BstSet;
    ///
    /// let mut set = BstSet::from([1, 3, 5, 2, 4]);
    /// set.erase(set.find(&3)).unwrap();
    ///
    /// assert!(set.iter().eq([1, 2, 4, 5].iter()));
    /// assert_eq!(set.find(&3), set.end());
    ///
    /// set.erase(set.end()).unwrap();
    /// assert_eq!(set.len(), 4);
    /// ```
    pub fn erase(&mut self, cursor: Cursor) -> Result<(), CursorError> {
        if cursor.is_end() {
            return Ok(());
        }
        let (handle, _) = self.node_at(cursor)?;
        drop(self.raw.erase(handle));
        Ok(())
    }

    /// Gets an iterator that visits the values in the `BstSet` in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BstSet;
    ///
    /// let set = BstSet::from([3, 1, 2]);
    /// let mut set_iter = set.iter();
    /// assert_eq!(set_iter.next(), Some(&1));
    /// assert_eq!(set_iter.next(), Some(&2));
    /// assert_eq!(set_iter.next(), Some(&3));
    /// assert_eq!(set_iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T, C> {
        Iter {
            tree: &self.raw,
            next: self.raw.first(),
            remaining: self.raw.len(),
        }
    }

    /// Returns a reference to the smallest value in the set, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BstSet;
    ///
    /// let mut set = BstSet::new();
    /// assert_eq!(set.first(), None);
    /// set.insert(1);
    /// assert_eq!(set.first(), Some(&1));
    /// set.insert(0);
    /// assert_eq!(set.first(), Some(&0));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.first().map(|handle| self.raw.node(handle).value())
    }

    /// Returns a reference to the largest value in the set, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BstSet;
    ///
    /// let set = BstSet::from([1, 9, 4]);
    /// assert_eq!(set.last(), Some(&9));
    /// ```
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.last().map(|handle| self.raw.node(handle).value())
    }

    /// Clears the set, removing all values and invalidating every cursor.
    ///
    /// Allocated node storage is kept for reuse.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BstSet;
    ///
    /// let mut v = BstSet::from([1, 2]);
    /// let cursor = v.begin();
    /// v.clear();
    /// assert!(v.is_empty());
    /// assert!(v.get(cursor).is_err());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the height of the tree: the number of links on the longest path from the
    /// root to a leaf. `None` for an empty set.
    ///
    /// The tree never rebalances, so this is anywhere from `log2(len)` to `len - 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BstSet;
    ///
    /// let sorted: BstSet<i32> = (0..10).collect();
    /// assert_eq!(sorted.height(), Some(9));
    ///
    /// let bushy = BstSet::from([2, 1, 3]);
    /// assert_eq!(bushy.height(), Some(1));
    /// ```
    #[must_use]
    pub fn height(&self) -> Option<usize> {
        self.raw.height().map(|height| height as usize)
    }

    /// Returns the balance factor of the node under `cursor`: the height of its left
    /// subtree minus the height of its right subtree, an absent subtree counting as -1.
    ///
    /// This is informational; the set never acts on it.
    ///
    /// # Errors
    ///
    /// Same as [`BstSet::get`].
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BstSet;
    ///
    /// let set = BstSet::from([1, 2, 3]);
    /// assert_eq!(set.balance_factor(set.find(&1)), Ok(-2));
    /// assert_eq!(set.balance_factor(set.find(&3)), Ok(0));
    /// ```
    pub fn balance_factor(&self, cursor: Cursor) -> Result<isize, CursorError> {
        self.node_at(cursor).map(|(_, node)| node.balance_factor())
    }

    fn cursor_for(&self, handle: Option<Handle>) -> Cursor {
        handle.map_or(Cursor::END, |handle| Cursor::at(handle, self.raw.generation(handle)))
    }

    fn node_at(&self, cursor: Cursor) -> Result<(Handle, &Node<T>), CursorError> {
        let position = cursor.position().ok_or(CursorError::End)?;
        self.raw
            .node_if_current(position.node, position.generation)
            .map(|node| (position.node, node))
            .ok_or(CursorError::Invalidated)
    }
}

impl<T, C: Comparator<T>> BstSet<T, C> {
    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. That is:
    ///
    /// - If the set did not previously contain an equal value, `true` is returned.
    /// - If the set already contained an equal value, `false` is returned, and the set is
    ///   not modified: the stored value is kept and `value` is dropped.
    ///
    /// Inserting never invalidates cursors.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BstSet;
    ///
    /// let mut set = BstSet::new();
    ///
    /// assert_eq!(set.insert(2), true);
    /// assert_eq!(set.insert(2), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        self.raw.insert(value)
    }

    /// Returns a cursor on the value equal to `value`, or the end cursor if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BstSet;
    ///
    /// let set = BstSet::from([10, -10, 20, 0]);
    /// assert_eq!(set.get(set.find(&10)), Ok(&10));
    /// assert_eq!(set.find(&-20), set.end());
    /// ```
    #[must_use]
    pub fn find(&self, value: &T) -> Cursor {
        self.cursor_for(self.raw.find(value))
    }

    /// Returns `true` if the set contains a value equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BstSet;
    ///
    /// let set = BstSet::from([1, 2, 3]);
    /// assert_eq!(set.contains(&1), true);
    /// assert_eq!(set.contains(&4), false);
    /// ```
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.raw.find(value).is_some()
    }

    /// If the set contains a value equal to `value`, removes it. Returns whether such a
    /// value was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BstSet;
    ///
    /// let mut set = BstSet::new();
    ///
    /// set.insert(2);
    /// assert_eq!(set.remove(&2), true);
    /// assert_eq!(set.remove(&2), false);
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes and returns the value in the set, if any, that is equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BstSet;
    ///
    /// let mut set = BstSet::from([1, 2, 3]);
    /// assert_eq!(set.take(&2), Some(2));
    /// assert_eq!(set.take(&2), None);
    /// ```
    pub fn take(&mut self, value: &T) -> Option<T> {
        let handle = self.raw.find(value)?;
        Some(self.raw.erase(handle))
    }
}

impl<T: Clone, C: Clone> Clone for BstSet<T, C> {
    fn clone(&self) -> Self {
        BstSet { raw: self.raw.clone() }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for BstSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C: Default> Default for BstSet<T, C> {
    /// Creates an empty `BstSet` with the comparator's default value.
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T: PartialEq, C> PartialEq for BstSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for BstSet<T, C> {}

impl<T: Ord> FromIterator<T> for BstSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T, C: Comparator<T>> Extend<T> for BstSet<T, C> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: 'a + Copy, C: Comparator<T>> Extend<&'a T> for BstSet<T, C> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for BstSet<T> {
    /// Converts a `[T; N]` into a `BstSet<T>`. Duplicates are dropped.
    ///
    /// ```
    /// use parent_bst::BstSet;
    ///
    /// let set1 = BstSet::from([1, 2, 3, 4]);
    /// let set2: BstSet<_> = [1, 2, 3, 4].into();
    /// assert_eq!(set1, set2);
    /// ```
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T, C> IntoIterator for BstSet<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the `BstSet`'s contents in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BstSet;
    ///
    /// let set = BstSet::from([1, 2, 3, 4]);
    ///
    /// let v: Vec<_> = set.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(mut self) -> IntoIter<T> {
        let values: Vec<T> = self.raw.drain_to_vec();
        IntoIter {
            inner: values.into_iter(),
        }
    }
}

impl<'a, T, C> IntoIterator for &'a BstSet<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Iter<'a, T, C> {
        self.iter()
    }
}

impl<'a, T, C> Iterator for Iter<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let handle = self.next?;
        self.next = self.tree.successor(handle);
        self.remaining -= 1;
        Some(self.tree.node(handle).value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, C> ExactSizeIterator for Iter<'_, T, C> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T, C> FusedIterator for Iter<'_, T, C> {}

impl<T, C> Clone for Iter<'_, T, C> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Iter<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let remaining: Vec<&T> = self.clone().collect();
        f.debug_tuple("Iter").field(&remaining).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner.as_slice()).finish()
    }
}

impl<T> Default for IntoIter<T> {
    /// Creates an empty `bst_set::IntoIter`.
    ///
    /// ```
    /// # use parent_bst::bst_set;
    /// let iter: bst_set::IntoIter<u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter {
            inner: Vec::new().into_iter(),
        }
    }
}
