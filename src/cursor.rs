use core::fmt;

use crate::raw::{Generation, Handle};

/// A position in the ascending sequence of a [`BstSet`](crate::BstSet): either an
/// element or the end sentinel.
///
/// A cursor does not borrow the set, so it can be held across mutations. It is read
/// through [`BstSet::get`](crate::BstSet::get) and moved forward with
/// [`BstSet::advance`](crate::BstSet::advance).
///
/// # Invalidation
///
/// A cursor becomes invalid when the element it refers to is erased, or when that
/// element's node takes over its successor's value during the erase of an element with
/// two children. Every access through an invalid cursor returns
/// [`CursorError::Invalidated`]; it never reads another element. Inserting never
/// invalidates cursors.
///
/// Cursors are only meaningful for the set that produced them. Passing a cursor to a
/// different set is a logic error: it may return `Invalidated` or an unrelated element,
/// but never results in undefined behavior.
///
/// # Examples
///
/// ```
/// use parent_bst::{BstSet, CursorError};
///
/// let mut set = BstSet::from([1, 3, 5, 2, 4]);
/// let three = set.find(&3);
/// assert_eq!(set.get(three), Ok(&3));
///
/// set.erase(three).unwrap();
/// assert_eq!(set.get(three), Err(CursorError::Invalidated));
/// assert_eq!(set.find(&3), set.end());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Cursor {
    position: Option<Position>,
}

/// A node handle plus the slot generation observed when the cursor was made.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) struct Position {
    pub(crate) node: Handle,
    pub(crate) generation: Generation,
}

impl Cursor {
    /// The end sentinel, positioned past the last element.
    pub const END: Self = Self { position: None };

    pub(crate) const fn at(node: Handle, generation: Generation) -> Self {
        Self {
            position: Some(Position { node, generation }),
        }
    }

    pub(crate) const fn position(self) -> Option<Position> {
        self.position
    }

    /// Returns `true` if this is the end sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::{BstSet, Cursor};
    ///
    /// let set: BstSet<i32> = BstSet::new();
    /// assert!(set.begin().is_end());
    /// assert!(Cursor::END.is_end());
    /// ```
    #[must_use]
    pub const fn is_end(self) -> bool {
        self.position.is_none()
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::END
    }
}

/// The error returned when a [`Cursor`] cannot be dereferenced or moved.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CursorError {
    /// The cursor is the end sentinel and refers to no element.
    End,
    /// The element the cursor referred to has been erased or overwritten.
    Invalidated,
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::End => write!(f, "cursor is at the end of the set and refers to no element"),
            Self::Invalidated => write!(f, "cursor refers to an element that was erased or overwritten"),
        }
    }
}

impl core::error::Error for CursorError {}
