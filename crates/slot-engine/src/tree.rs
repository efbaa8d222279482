//! Augmented interval tree keyed by interval start.
//!
//! A plain (unbalanced) binary search tree on `start`. Every node additionally
//! records `max_end`, the largest `end` anywhere in its subtree, which lets an
//! overlap query skip left subtrees that end before the query begins.
//!
//! Intervals with `start < node.start` go left; everything else, including equal
//! starts, goes right. There is no deletion and no rebalancing, so depth is
//! O(n) for sorted insertion order.

use std::fmt;

use crate::interval::Interval;

struct IntervalNode<T> {
    interval: Interval<T>,
    /// `max(interval.end, left.max_end, right.max_end)`
    max_end: T,
    left: Option<Box<IntervalNode<T>>>,
    right: Option<Box<IntervalNode<T>>>,
}

impl<T: Copy> IntervalNode<T> {
    fn leaf(interval: Interval<T>) -> Self {
        Self {
            interval,
            max_end: interval.end,
            left: None,
            right: None,
        }
    }
}

/// An insert-only interval tree answering "which stored intervals overlap `[s, e]`?".
///
/// The tree exclusively owns its nodes; dropping it reclaims every node.
/// It is not synchronized: wrap it in a lock if it must be shared.
pub struct IntervalTree<T> {
    root: Option<Box<IntervalNode<T>>>,
    len: usize,
}

impl<T> Default for IntervalTree<T> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<T: Ord + Copy> IntervalTree<T> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored intervals (duplicates counted separately).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Largest `end` stored in the tree, or `None` when empty.
    pub fn max_end(&self) -> Option<T> {
        self.root.as_ref().map(|node| node.max_end)
    }

    /// Insert `[start, end]` as a new leaf.
    ///
    /// Never merges or rejects: inserting the same interval twice stores it twice.
    /// `start <= end` is assumed, not checked.
    pub fn insert(&mut self, start: T, end: T) {
        self.insert_interval(Interval::new(start, end));
    }

    /// Insert an already-built [`Interval`]. See [`IntervalTree::insert`].
    pub fn insert_interval(&mut self, interval: Interval<T>) {
        // Every node on the descent path is an ancestor of the new leaf, so its
        // max_end can be raised on the way down.
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            node.max_end = node.max_end.max(interval.end);
            slot = if interval.start < node.interval.start {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *slot = Some(Box::new(IntervalNode::leaf(interval)));
        self.len += 1;
    }

    /// Every stored interval overlapping `[start, end]` (inclusive on both ends).
    ///
    /// A left subtree is visited only when its `max_end >= start`; the right
    /// subtree is always visited. Each stored interval appears at most once per
    /// insertion. Result order is the pre-order of the visit and carries no
    /// meaning for callers.
    pub fn query(&self, start: T, end: T) -> Vec<Interval<T>> {
        self.query_interval(&Interval::new(start, end))
    }

    /// [`IntervalTree::query`] taking the range as an [`Interval`].
    pub fn query_interval(&self, range: &Interval<T>) -> Vec<Interval<T>> {
        let mut found = Vec::new();
        let mut pending: Vec<&IntervalNode<T>> = self.root.as_deref().into_iter().collect();

        while let Some(node) = pending.pop() {
            if node.interval.overlaps(range) {
                found.push(node.interval);
            }
            if let Some(right) = node.right.as_deref() {
                pending.push(right);
            }
            // Pushed last so the left side is visited before the right.
            if let Some(left) = node.left.as_deref() {
                if left.max_end >= range.start {
                    pending.push(left);
                }
            }
        }

        found
    }

    /// In-order traversal: intervals sorted by start, ties in insertion order.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter { stack: Vec::new() };
        iter.descend_left(self.root.as_deref());
        iter
    }
}

/// In-order iterator over the intervals of an [`IntervalTree`].
pub struct Iter<'a, T> {
    stack: Vec<&'a IntervalNode<T>>,
}

impl<'a, T> Iter<'a, T> {
    fn descend_left(&mut self, mut node: Option<&'a IntervalNode<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, T: Copy> Iterator for Iter<'a, T> {
    type Item = Interval<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend_left(node.right.as_deref());
        Some(node.interval)
    }
}

impl<'a, T: Ord + Copy> IntoIterator for &'a IntervalTree<T> {
    type Item = Interval<T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Ord + Copy> Extend<Interval<T>> for IntervalTree<T> {
    fn extend<I: IntoIterator<Item = Interval<T>>>(&mut self, iter: I) {
        for interval in iter {
            self.insert_interval(interval);
        }
    }
}

impl<T: Ord + Copy> FromIterator<Interval<T>> for IntervalTree<T> {
    fn from_iter<I: IntoIterator<Item = Interval<T>>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord + Copy + fmt::Debug> fmt::Debug for IntervalTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// Unlinks nodes onto a heap stack instead of recursing through Box drops, which
// would overflow on a degenerate (list-shaped) tree.
impl<T> Drop for IntervalTree<T> {
    fn drop(&mut self) {
        let mut stack: Vec<Box<IntervalNode<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}
