use alloc::vec::Vec;
use core::cmp::Ordering::{Equal, Greater, Less};
use core::mem;

use super::arena::{Arena, Generation};
use super::handle::Handle;
use super::node::{Node, Side, bookkeeping};
use crate::comparator::Comparator;

/// The unbalanced binary search tree backing `BstSet`.
///
/// Nodes live in an arena and point at each other through handles: `left` and `right`
/// own, `parent` is a back-link. No operation recurses, so a degenerate chain (from
/// sorted insertion) is as safe as a balanced tree, only slower.
#[derive(Clone)]
pub(crate) struct RawBst<T, C> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of values in the tree.
    len: usize,
    /// Total order used for every descent.
    comparator: C,
}

/// Where a search for a value ended.
pub(crate) enum SearchResult {
    /// The value is stored in this node.
    Found(Handle),
    /// The value is absent; a new node would hang from this parent on this side.
    /// `None` means the tree is empty and the new node would become the root.
    NotFound(Option<(Handle, Side)>),
}

impl<T, C> RawBst<T, C> {
    /// Creates a new, empty tree.
    pub(crate) const fn new(comparator: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            comparator,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize, comparator: C) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            comparator,
        }
    }

    /// Returns the number of values in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no values.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn comparator(&self) -> &C {
        &self.comparator
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn generation(&self, handle: Handle) -> Generation {
        self.nodes.generation(handle)
    }

    /// Resolves a handle that was recorded outside the tree (by a cursor).
    pub(crate) fn node_if_current(&self, handle: Handle, generation: Generation) -> Option<&Node<T>> {
        self.nodes.get_current(handle, generation)
    }

    /// Height of the whole tree, `None` when empty.
    pub(crate) fn height(&self) -> Option<u32> {
        self.subtree_height(self.root)
    }

    fn subtree_height(&self, handle: Option<Handle>) -> Option<u32> {
        handle.map(|h| self.nodes.get(h).height())
    }

    /// The leftmost (smallest) node of the subtree rooted at `handle`.
    pub(crate) fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.nodes.get(handle).left() {
            handle = left;
        }
        handle
    }

    /// The rightmost (largest) node of the subtree rooted at `handle`.
    pub(crate) fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.nodes.get(handle).right() {
            handle = right;
        }
        handle
    }

    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.leftmost(root))
    }

    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.rightmost(root))
    }

    /// Returns the in-order successor of `handle`, or `None` if it holds the maximum.
    ///
    /// With a right subtree the successor is that subtree's leftmost node. Otherwise we
    /// climb while we are a right child; the first ancestor reached from its left side
    /// is the successor.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.nodes.get(handle).right() {
            return Some(self.leftmost(right));
        }

        let mut current = handle;
        while let Some(parent) = self.nodes.get(current).parent() {
            if self.nodes.get(parent).left() == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Removes the node at `handle` and returns the value that was stored there.
    ///
    /// A node with two children keeps its place in the tree: it takes over its
    /// successor's value and the successor (which has no left child) is spliced out
    /// instead. The node's generation is bumped so cursors that saw the old value are
    /// invalidated; if the generation is exhausted the node moves to a fresh slot.
    pub(crate) fn erase(&mut self, handle: Handle) -> T {
        let node = self.nodes.get(handle);
        match (node.left(), node.right()) {
            (Some(_), Some(right)) => {
                let successor = self.leftmost(right);
                let orphan = self.nodes.get(successor).right();
                let value = self.splice_out(successor, orphan);
                let handle = if self.nodes.bump_generation(handle) { handle } else { self.relocate(handle) };
                mem::replace(self.nodes.get_mut(handle).value_mut(), value)
            }
            (None, None) => self.splice_out(handle, None),
            (child @ Some(_), None) | (None, child @ Some(_)) => self.splice_out(handle, child),
        }
    }

    /// Unlinks a node with at most one child, hoisting `child` into its place.
    fn splice_out(&mut self, handle: Handle, child: Option<Handle>) -> T {
        let node = self.nodes.take(handle);
        let parent = node.parent();

        if let Some(child) = child {
            self.nodes.get_mut(child).set_parent(parent);
        }
        match parent {
            None => self.root = child,
            Some(parent) => {
                let parent_node = self.nodes.get_mut(parent);
                let side = parent_node.side_of(handle);
                parent_node.set_child(side, child);
            }
        }

        self.len -= 1;
        debug_assert_eq!(self.len, self.nodes.len());
        self.update_bookkeeping_from(parent);
        node.into_value()
    }

    /// Moves the node at `handle` into another slot and relinks its neighbours.
    fn relocate(&mut self, handle: Handle) -> Handle {
        let node = self.nodes.take(handle);
        let (parent, left, right) = (node.parent(), node.left(), node.right());
        let moved = self.nodes.alloc(node);

        for child in [left, right].into_iter().flatten() {
            self.nodes.get_mut(child).set_parent(Some(moved));
        }
        match parent {
            None => self.root = Some(moved),
            Some(parent) => {
                let parent_node = self.nodes.get_mut(parent);
                let side = parent_node.side_of(handle);
                parent_node.set_child(side, Some(moved));
            }
        }
        moved
    }

    /// Recomputes height and balance factor from `start` towards the root.
    ///
    /// Stops as soon as a node's height is unchanged, since nothing above it can differ.
    fn update_bookkeeping_from(&mut self, start: Option<Handle>) {
        let mut current = start;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let (height, balance_factor) =
                bookkeeping(self.subtree_height(node.left()), self.subtree_height(node.right()));

            let node = self.nodes.get_mut(handle);
            if !node.set_bookkeeping(height, balance_factor) {
                break;
            }
            current = node.parent();
        }
    }

    /// Empties the tree by erasing the root until nothing is left.
    ///
    /// Every slot is vacated through `erase`, so cursors into the tree are all
    /// invalidated and the arena keeps its capacity.
    pub(crate) fn clear(&mut self) {
        while let Some(root) = self.root {
            drop(self.erase(root));
        }
        debug_assert!(self.nodes.is_empty());
    }

    /// Moves every value out of the tree in ascending order.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<T> {
        let mut order = Vec::with_capacity(self.len);
        let mut current = self.first();
        while let Some(handle) = current {
            order.push(handle);
            current = self.successor(handle);
        }

        let values = order.into_iter().map(|handle| self.nodes.take(handle).into_value()).collect();
        self.root = None;
        self.len = 0;
        values
    }
}

impl<T, C: Comparator<T>> RawBst<T, C> {
    /// Descends from the root looking for `value`.
    pub(crate) fn search(&self, value: &T) -> SearchResult {
        let Some(mut current) = self.root else {
            return SearchResult::NotFound(None);
        };

        loop {
            let node = self.nodes.get(current);
            let side = match self.comparator.compare(value, node.value()) {
                Less => Side::Left,
                Greater => Side::Right,
                Equal => return SearchResult::Found(current),
            };
            match node.child(side) {
                Some(child) => current = child,
                None => return SearchResult::NotFound(Some((current, side))),
            }
        }
    }

    pub(crate) fn find(&self, value: &T) -> Option<Handle> {
        match self.search(value) {
            SearchResult::Found(handle) => Some(handle),
            SearchResult::NotFound(_) => None,
        }
    }

    /// Inserts `value` unless an equal value is present. Returns `true` if inserted.
    pub(crate) fn insert(&mut self, value: T) -> bool {
        let slot = match self.search(&value) {
            SearchResult::Found(_) => return false,
            SearchResult::NotFound(slot) => slot,
        };

        let parent = slot.map(|(parent, _)| parent);
        let handle = self.nodes.alloc(Node::new(value, parent));
        match slot {
            None => self.root = Some(handle),
            Some((parent, side)) => self.nodes.get_mut(parent).set_child(side, Some(handle)),
        }

        self.len += 1;
        debug_assert_eq!(self.len, self.nodes.len());
        self.update_bookkeeping_from(parent);
        true
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::uninlined_format_args, clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
mod tests {
    use super::*;
    use crate::comparator::NaturalOrder;
    use alloc::collections::BTreeSet;
    use alloc::string::String;
    use alloc::vec;
    use core::fmt::Debug;
    use proptest::prelude::*;

    impl<T: Debug, C: Comparator<T>> RawBst<T, C> {
        /// Validates every tree invariant. Panics listing all violations found.
        pub(crate) fn validate_invariants(&self) {
            let mut errors: Vec<String> = Vec::new();

            let Some(root) = self.root else {
                if self.len != 0 {
                    errors.push(alloc::format!("Empty tree has len {}", self.len));
                }
                if !self.nodes.is_empty() {
                    errors.push(alloc::format!("Empty tree still holds {} nodes", self.nodes.len()));
                }
                assert!(errors.is_empty(), "Tree invariant violations:\n{}", errors.join("\n"));
                return;
            };

            if let Some(parent) = self.nodes.get(root).parent() {
                errors.push(alloc::format!("Root {:?} has parent {:?}", root, parent));
            }

            // Explicit stack of (node, exclusive lower bound, exclusive upper bound).
            let mut reachable = 0usize;
            let mut stack: Vec<(Handle, Option<Handle>, Option<Handle>)> = vec![(root, None, None)];
            while let Some((handle, lower, upper)) = stack.pop() {
                reachable += 1;
                let node = self.nodes.get(handle);

                if let Some(lower) = lower
                    && self.comparator.compare(self.nodes.get(lower).value(), node.value()) != Less
                {
                    errors.push(alloc::format!("Order violated: {:?} is not above {:?}", node.value(), self.nodes.get(lower).value()));
                }
                if let Some(upper) = upper
                    && self.comparator.compare(node.value(), self.nodes.get(upper).value()) != Less
                {
                    errors.push(alloc::format!("Order violated: {:?} is not below {:?}", node.value(), self.nodes.get(upper).value()));
                }

                for child in [node.left(), node.right()].into_iter().flatten() {
                    let back = self.nodes.get(child).parent();
                    if back != Some(handle) {
                        errors.push(alloc::format!("Child {:?} of {:?} points back at {:?}", child, handle, back));
                    }
                }

                let expected = bookkeeping(self.subtree_height(node.left()), self.subtree_height(node.right()));
                if (node.height(), node.balance_factor()) != expected {
                    errors.push(alloc::format!(
                        "Bookkeeping mismatch at {:?}: stored={:?}, computed={:?}",
                        handle,
                        (node.height(), node.balance_factor()),
                        expected
                    ));
                }

                if let Some(left) = node.left() {
                    stack.push((left, lower, Some(handle)));
                }
                if let Some(right) = node.right() {
                    stack.push((right, Some(handle), upper));
                }
            }

            if reachable != self.len {
                errors.push(alloc::format!("len mismatch: self.len={}, reachable={}", self.len, reachable));
            }
            if self.nodes.len() != self.len {
                errors.push(alloc::format!("Arena holds {} nodes, len={}", self.nodes.len(), self.len));
            }

            assert!(errors.is_empty(), "Tree invariant violations:\n{}", errors.join("\n"));
        }

        fn values_in_order(&self) -> Vec<&T> {
            let mut values = Vec::new();
            let mut current = self.first();
            while let Some(handle) = current {
                values.push(self.node(handle).value());
                current = self.successor(handle);
            }
            values
        }
    }

    fn tree_of(values: &[i32]) -> RawBst<i32, NaturalOrder> {
        let mut tree = RawBst::new(NaturalOrder);
        for &value in values {
            tree.insert(value);
        }
        tree.validate_invariants();
        tree
    }

    fn handle_of(tree: &RawBst<i32, NaturalOrder>, value: i32) -> Handle {
        tree.find(&value).unwrap()
    }

    fn value_at(tree: &RawBst<i32, NaturalOrder>, handle: Option<Handle>) -> Option<i32> {
        handle.map(|h| *tree.node(h).value())
    }

    #[test]
    fn empty_tree() {
        let tree: RawBst<i32, NaturalOrder> = RawBst::new(NaturalOrder);
        tree.validate_invariants();
        assert!(tree.is_empty());
        assert_eq!(tree.first(), None);
        assert_eq!(tree.last(), None);
        assert_eq!(tree.height(), None);
        assert_eq!(tree.find(&1), None);
    }

    #[test]
    fn duplicates_are_suppressed() {
        let mut tree = tree_of(&[10, -10, 20, 10, 0]);
        assert_eq!(tree.len(), 4);
        assert!(!tree.insert(20));
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.values_in_order(), [&-10, &0, &10, &20]);
    }

    #[test]
    fn parent_links_after_insert() {
        let tree = tree_of(&[5, 3, 8, 4]);
        let five = handle_of(&tree, 5);
        let three = handle_of(&tree, 3);
        let four = handle_of(&tree, 4);

        assert_eq!(tree.root, Some(five));
        assert_eq!(tree.node(three).parent(), Some(five));
        assert_eq!(tree.node(four).parent(), Some(three));
        assert_eq!(tree.node(three).right(), Some(four));
        assert_eq!(tree.node(five).height(), 2);
        assert_eq!(tree.node(five).balance_factor(), 1);
        assert_eq!(tree.node(three).balance_factor(), -1);
    }

    #[test]
    fn successor_from_every_node() {
        let values = [50, 30, 70, 20, 40, 60, 80, 35, 45, 65];
        let tree = tree_of(&values);
        let mut sorted = values.to_vec();
        sorted.sort_unstable();

        for pair in sorted.windows(2) {
            let next = tree.successor(handle_of(&tree, pair[0]));
            assert_eq!(value_at(&tree, next), Some(pair[1]), "successor of {}", pair[0]);
        }
        assert_eq!(tree.successor(handle_of(&tree, 80)), None);
    }

    #[test]
    fn sorted_insertion_degenerates_to_a_chain() {
        let values: Vec<i32> = (0..200).collect();
        let tree = tree_of(&values);

        assert_eq!(tree.height(), Some(199));
        let root = tree.root.unwrap();
        assert_eq!(tree.node(root).balance_factor(), -199);
        assert_eq!(tree.node(tree.last().unwrap()).balance_factor(), 0);
        assert_eq!(tree.values_in_order().len(), 200);
    }

    #[test]
    fn erase_leaf() {
        let mut tree = tree_of(&[5, 3, 8]);
        assert_eq!(tree.erase(handle_of(&tree, 3)), 3);
        tree.validate_invariants();

        let five = handle_of(&tree, 5);
        assert_eq!(tree.node(five).left(), None);
        assert_eq!(tree.node(five).balance_factor(), -1);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn erase_lone_root() {
        let mut tree = tree_of(&[5]);
        let root = tree.root.unwrap();
        assert_eq!(tree.erase(root), 5);
        tree.validate_invariants();
        assert_eq!(tree.root, None);
        assert!(tree.is_empty());
    }

    #[test]
    fn erase_node_with_one_child() {
        let mut tree = tree_of(&[5, 3, 8, 9]);
        let nine = handle_of(&tree, 9);

        assert_eq!(tree.erase(handle_of(&tree, 8)), 8);
        tree.validate_invariants();

        let five = handle_of(&tree, 5);
        assert_eq!(tree.node(five).right(), Some(nine));
        assert_eq!(tree.node(nine).parent(), Some(five));
        assert_eq!(tree.height(), Some(1));
    }

    #[test]
    fn erase_root_with_one_child_promotes_child() {
        let mut tree = tree_of(&[5, 3, 1]);
        let three = handle_of(&tree, 3);

        assert_eq!(tree.erase(tree.root.unwrap()), 5);
        tree.validate_invariants();

        assert_eq!(tree.root, Some(three));
        assert_eq!(tree.node(three).parent(), None);
    }

    #[test]
    fn erase_node_with_two_children_takes_successor_value() {
        let mut tree = tree_of(&[1, 3, 5, 2, 4]);
        let three = handle_of(&tree, 3);
        let four = handle_of(&tree, 4);
        let stamp = tree.generation(three);

        assert_eq!(tree.erase(three), 3);
        tree.validate_invariants();

        // The node keeps its position, the successor's node is gone.
        assert_eq!(handle_of(&tree, 4), three);
        assert!(tree.node_if_current(four, 0).is_none());
        assert!(tree.node_if_current(three, stamp).is_none());
        assert_eq!(tree.find(&3), None);
        assert_eq!(tree.values_in_order(), [&1, &2, &4, &5]);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn erase_two_children_successor_with_right_child() {
        let mut tree = tree_of(&[10, 5, 20, 15, 30, 17]);

        assert_eq!(tree.erase(tree.root.unwrap()), 10);
        tree.validate_invariants();

        let fifteen = handle_of(&tree, 15);
        assert_eq!(tree.root, Some(fifteen));
        let twenty = handle_of(&tree, 20);
        let seventeen = handle_of(&tree, 17);
        assert_eq!(tree.node(twenty).left(), Some(seventeen));
        assert_eq!(tree.node(seventeen).parent(), Some(twenty));
    }

    #[test]
    fn erase_two_children_with_exhausted_generation_moves_node() {
        let mut tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
        let root = tree.root.unwrap();
        let two = handle_of(&tree, 2);
        let six = handle_of(&tree, 6);
        while tree.nodes.bump_generation(root) {}

        assert_eq!(tree.erase(root), 4);
        tree.validate_invariants();

        let moved = tree.root.unwrap();
        assert_ne!(moved, root);
        assert_eq!(tree.node(moved).value(), &5);
        assert_eq!(tree.node(two).parent(), Some(moved));
        assert_eq!(tree.node(six).parent(), Some(moved));
        assert!(tree.node_if_current(root, Generation::MAX).is_none());
        assert_eq!(tree.values_in_order(), [&1, &2, &3, &5, &6, &7]);

        // The retired slot is not handed out again.
        assert!(tree.insert(8));
        assert_ne!(handle_of(&tree, 8), root);
        tree.validate_invariants();
    }

    #[test]
    fn erase_two_children_relinks_moved_node_under_its_parent() {
        let mut tree = tree_of(&[10, 4, 2, 6, 5]);
        let four = handle_of(&tree, 4);
        while tree.nodes.bump_generation(four) {}

        assert_eq!(tree.erase(four), 4);
        tree.validate_invariants();

        let moved = handle_of(&tree, 5);
        assert_ne!(moved, four);
        assert_eq!(tree.node(tree.root.unwrap()).left(), Some(moved));
        assert_eq!(tree.values_in_order(), [&2, &5, &6, &10]);
    }

    #[test]
    fn clear_erases_through_the_root() {
        let mut tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
        let leaf = handle_of(&tree, 1);
        let stamp = tree.generation(leaf);

        tree.clear();
        tree.validate_invariants();
        assert!(tree.is_empty());
        assert!(tree.node_if_current(leaf, stamp).is_none());

        assert!(tree.insert(9));
        tree.validate_invariants();
    }

    #[test]
    fn drain_to_vec_is_sorted() {
        let mut tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
        assert_eq!(tree.drain_to_vec(), [1, 2, 3, 4, 5, 6, 7]);
        tree.validate_invariants();
        assert!(tree.is_empty());
    }

    #[test]
    fn custom_comparator_orders_descending() {
        let mut tree = RawBst::new(|a: &i32, b: &i32| b.cmp(a));
        for value in [1, 5, 3] {
            tree.insert(value);
        }
        tree.validate_invariants();
        assert_eq!(tree.values_in_order(), [&5, &3, &1]);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i32),
        Erase(i32),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0i32..500).prop_map(Op::Insert),
            2 => (0i32..500).prop_map(Op::Erase),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn tree_invariants_maintained_after_operations(ops in prop::collection::vec(op_strategy(), 0..500)) {
            let mut tree: RawBst<i32, NaturalOrder> = RawBst::new(NaturalOrder);
            let mut model: BTreeSet<i32> = BTreeSet::new();

            for op in ops {
                match op {
                    Op::Insert(value) => {
                        prop_assert_eq!(tree.insert(value), model.insert(value));
                    }
                    Op::Erase(value) => {
                        let erased = tree.find(&value).map(|handle| tree.erase(handle));
                        prop_assert_eq!(erased, model.take(&value));
                    }
                }
                tree.validate_invariants();
                prop_assert!(tree.values_in_order().into_iter().eq(model.iter()));
            }
        }
    }
}
