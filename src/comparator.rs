use core::cmp::Ordering;

/// A total order over `T`, supplied when a [`BstSet`](crate::BstSet) is constructed.
///
/// The set only ever asks the comparator to order two values; it never falls back
/// to `T`'s own [`Ord`] implementation. It is a logic error for a comparator to be
/// inconsistent (not a total order, or changing its answer for the same pair while
/// the values are in a set). The behavior resulting from such a logic error is not
/// specified, but will be encapsulated to the set that observed it and not result in
/// undefined behavior.
///
/// Any closure `Fn(&T, &T) -> Ordering` is a comparator.
///
/// # Examples
///
/// ```
/// use parent_bst::BstSet;
///
/// let mut set = BstSet::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// set.insert(1);
/// set.insert(3);
/// set.insert(2);
///
/// assert!(set.iter().eq([3, 2, 1].iter()));
/// ```
pub trait Comparator<T: ?Sized> {
    /// Compares `a` with `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The comparator used by [`BstSet::new`](crate::BstSet::new): `T`'s own [`Ord`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
