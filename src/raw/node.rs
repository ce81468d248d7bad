use super::handle::Handle;

/// A tree node. Children are owned through the arena; `parent` is a back-link only.
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    value: T,
    left: Option<Handle>,
    right: Option<Handle>,
    parent: Option<Handle>,
    // Bookkeeping only: maintained along mutation paths, never used to rotate.
    height: u32,
    balance_factor: isize,
}

/// Which child slot of its parent a node occupies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl<T> Node<T> {
    /// Creates a detached leaf.
    pub(crate) fn new(value: T, parent: Option<Handle>) -> Self {
        Self {
            value,
            left: None,
            right: None,
            parent,
            height: 0,
            balance_factor: 0,
        }
    }

    #[inline]
    pub(crate) fn value(&self) -> &T {
        &self.value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub(crate) fn into_value(self) -> T {
        self.value
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    /// Returns the side `child` hangs from. `child` must be a child of this node.
    pub(crate) fn side_of(&self, child: Handle) -> Side {
        if self.left == Some(child) { Side::Left } else { Side::Right }
    }

    /// Height of this subtree; a leaf has height 0.
    #[inline]
    pub(crate) fn height(&self) -> u32 {
        self.height
    }

    /// `height(left) - height(right)`, where an absent subtree counts as -1.
    #[inline]
    pub(crate) fn balance_factor(&self) -> isize {
        self.balance_factor
    }

    /// Stores freshly computed bookkeeping. Returns `true` if the height changed, which is
    /// the only thing ancestors depend on.
    pub(crate) fn set_bookkeeping(&mut self, height: u32, balance_factor: isize) -> bool {
        let changed = self.height != height;
        self.height = height;
        self.balance_factor = balance_factor;
        changed
    }
}

/// Computes `(height, balance_factor)` of a node from the heights of its children.
#[allow(clippy::cast_possible_wrap)]
pub(crate) fn bookkeeping(left: Option<u32>, right: Option<u32>) -> (u32, isize) {
    let height = left.max(right).map_or(0, |h| h + 1);
    let signed = |h: Option<u32>| h.map_or(-1, |h| h as isize);
    (height, signed(left) - signed(right))
}
