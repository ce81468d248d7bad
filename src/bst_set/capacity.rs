use super::BstSet;
use crate::comparator::NaturalOrder;
use crate::raw::RawBst;

impl<T> BstSet<T, NaturalOrder> {
    /// Creates an empty set with room for at least `capacity` values before the node
    /// store reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BstSet;
    ///
    /// let set: BstSet<i32> = BstSet::with_capacity(16);
    /// assert!(set.is_empty());
    /// assert!(set.capacity() >= 16);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, NaturalOrder)
    }
}

impl<T, C> BstSet<T, C> {
    /// Creates an empty set ordered by `comparator` with room for at least `capacity`
    /// values.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        BstSet {
            raw: RawBst::with_capacity(capacity, comparator),
        }
    }

    /// Returns the number of values the set can hold without reallocating its node store.
    ///
    /// Slots freed by erasing are reused, so the capacity never shrinks.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::BstSet;
    ///
    /// let mut set: BstSet<i32> = BstSet::with_capacity(32);
    /// set.extend(0..32);
    /// set.clear();
    /// assert!(set.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
