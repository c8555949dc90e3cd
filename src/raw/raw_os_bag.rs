use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};
use core::iter::FusedIterator;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{self, Node};

/// The weight-balanced tree backing `OSBag`.
///
/// Every distinct key occupies one node and carries its multiplicity. Each node
/// also tracks the number of distinct keys and the number of occurrences in its
/// subtree: the former keeps the tree weight-balanced, the latter answers rank
/// queries.
#[derive(Clone)]
pub(crate) struct RawOSBag<T> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<T>>,
    /// Handle to the root node, if the bag is non-empty.
    root: Option<Handle>,
    /// Node holding the smallest key, refreshed after every mutation.
    first: Option<Handle>,
    /// Node holding the largest key, refreshed after every mutation.
    last: Option<Handle>,
}

/// Outcome of a removal below a given node.
enum Removal {
    /// The key is not in this subtree.
    Missing,
    /// `count` occurrences were removed; `root` is the new subtree root.
    Removed { root: Option<Handle>, count: usize },
}

/// How many occurrences a removal takes out.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Occurrences {
    One,
    All,
}

/// In-order traversal stack; deeper trees spill to the heap.
type Stack = SmallVec<[Handle; 32]>;

impl<T> RawOSBag<T> {
    /// Creates a new, empty bag.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            first: None,
            last: None,
        }
    }

    /// Creates a new bag with room for `capacity` distinct keys.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            first: None,
            last: None,
        }
    }

    /// Returns the number of occurrences in the bag.
    pub(crate) fn len(&self) -> usize {
        self.totals(self.root).1
    }

    /// Returns the number of distinct keys in the bag.
    pub(crate) fn distinct_len(&self) -> usize {
        debug_assert_eq!(self.nodes.len(), self.totals(self.root).0);
        self.nodes.len()
    }

    /// Returns true if the bag holds no occurrences.
    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of distinct keys the bag can hold without reallocating.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Removes every occurrence.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.first = None;
        self.last = None;
    }

    /// Returns the smallest key.
    pub(crate) fn first(&self) -> Option<&T> {
        self.first.map(|h| self.nodes.get(h).key())
    }

    /// Returns the largest key.
    pub(crate) fn last(&self) -> Option<&T> {
        self.last.map(|h| self.nodes.get(h).key())
    }

    /// Returns an ascending iterator that yields every occurrence.
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter {
            nodes: &self.nodes,
            stack: Stack::new(),
            current: None,
            remaining: self.len(),
        };
        iter.descend(self.root);
        iter
    }

    /// Gets the key at `rank` (0-indexed position in sorted order, counting
    /// every occurrence).
    pub(crate) fn get_by_rank(&self, rank: usize) -> Option<&T> {
        if rank >= self.len() {
            return None;
        }

        let mut current = self.root?;
        let mut remaining = rank;

        loop {
            let node = self.nodes.get(current);
            let left_len = self.totals(node.left()).1;
            if remaining < left_len {
                current = node.left()?;
            } else if remaining < left_len + node.count() {
                return Some(node.key());
            } else {
                remaining -= left_len + node.count();
                current = node.right()?;
            }
        }
    }

    /// Returns `(distinct keys, occurrences)` for the subtree at `at`.
    #[inline]
    fn totals(&self, at: Option<Handle>) -> (usize, usize) {
        at.map_or((0, 0), |h| {
            let node = self.nodes.get(h);
            (node.nodes(), node.len())
        })
    }

    #[inline]
    fn weight(&self, at: Option<Handle>) -> usize {
        node::weight(self.totals(at).0)
    }

    #[inline]
    fn children(&self, h: Handle) -> (Option<Handle>, Option<Handle>) {
        let node = self.nodes.get(h);
        (node.left(), node.right())
    }

    fn update(&mut self, h: Handle) {
        let (left, right) = self.children(h);
        let (left, right) = (self.totals(left), self.totals(right));
        self.nodes.get_mut(h).update(left, right);
    }

    fn rotate_left(&mut self, h: Handle) -> Handle {
        let r = self.nodes.get(h).right().expect("`RawOSBag::rotate_left()` - missing right child");
        let inner = self.nodes.get(r).left();
        self.nodes.get_mut(h).set_right(inner);
        self.update(h);
        self.nodes.get_mut(r).set_left(Some(h));
        self.update(r);
        r
    }

    fn rotate_right(&mut self, h: Handle) -> Handle {
        let l = self.nodes.get(h).left().expect("`RawOSBag::rotate_right()` - missing left child");
        let inner = self.nodes.get(l).right();
        self.nodes.get_mut(h).set_left(inner);
        self.update(h);
        self.nodes.get_mut(l).set_right(Some(h));
        self.update(l);
        l
    }

    /// Recomputes the totals of `h` and restores the weight balance at `h`,
    /// assuming both subtrees are balanced and a single key was added or
    /// removed below. Returns the new subtree root.
    fn balance(&mut self, h: Handle) -> Handle {
        self.update(h);
        let (left, right) = self.children(h);
        let (left_weight, right_weight) = (self.weight(left), self.weight(right));

        if !node::is_balanced(left_weight, right_weight) {
            let r = right.expect("`RawOSBag::balance()` - heavy right subtree is empty");
            let (inner, outer) = self.children(r);
            if !node::is_single(self.weight(inner), self.weight(outer)) {
                let r = self.rotate_right(r);
                self.nodes.get_mut(h).set_right(Some(r));
            }
            self.rotate_left(h)
        } else if !node::is_balanced(right_weight, left_weight) {
            let l = left.expect("`RawOSBag::balance()` - heavy left subtree is empty");
            let (outer, inner) = self.children(l);
            if !node::is_single(self.weight(inner), self.weight(outer)) {
                let l = self.rotate_left(l);
                self.nodes.get_mut(h).set_left(Some(l));
            }
            self.rotate_right(h)
        } else {
            h
        }
    }

    /// Detaches the leftmost node under `h`. Returns the rebalanced remainder
    /// and the detached node.
    fn detach_min(&mut self, h: Handle) -> (Option<Handle>, Handle) {
        match self.nodes.get(h).left() {
            None => (self.nodes.get(h).right(), h),
            Some(l) => {
                let (rest, min) = self.detach_min(l);
                self.nodes.get_mut(h).set_left(rest);
                (Some(self.balance(h)), min)
            }
        }
    }

    /// Detaches the rightmost node under `h`. Returns the rebalanced remainder
    /// and the detached node.
    fn detach_max(&mut self, h: Handle) -> (Option<Handle>, Handle) {
        match self.nodes.get(h).right() {
            None => (self.nodes.get(h).left(), h),
            Some(r) => {
                let (rest, max) = self.detach_max(r);
                self.nodes.get_mut(h).set_right(rest);
                (Some(self.balance(h)), max)
            }
        }
    }

    /// Frees `h` and returns the subtree that takes its place.
    fn unlink(&mut self, h: Handle) -> Option<Handle> {
        let replacement = match self.children(h) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(child),
            (Some(l), Some(r)) => {
                // Borrow the neighbour from the heavier side.
                let successor = if self.weight(Some(l)) > self.weight(Some(r)) {
                    let (rest, max) = self.detach_max(l);
                    let successor = self.nodes.get_mut(max);
                    successor.set_left(rest);
                    successor.set_right(Some(r));
                    max
                } else {
                    let (rest, min) = self.detach_min(r);
                    let successor = self.nodes.get_mut(min);
                    successor.set_left(Some(l));
                    successor.set_right(rest);
                    min
                };
                Some(self.balance(successor))
            }
        };
        drop(self.nodes.take(h));
        replacement
    }

    fn refresh_bounds(&mut self) {
        self.first = self.root.map(|mut h| {
            while let Some(l) = self.nodes.get(h).left() {
                h = l;
            }
            h
        });
        self.last = self.root.map(|mut h| {
            while let Some(r) = self.nodes.get(h).right() {
                h = r;
            }
            h
        });
    }
}

impl<T: Ord> RawOSBag<T> {
    /// Searches for a key and returns its node.
    fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.nodes.get(h);
            current = match key.cmp(node.key().borrow()) {
                Less => node.left(),
                Equal => return Some(h),
                Greater => node.right(),
            };
        }
        None
    }

    /// Returns the number of occurrences of `key`.
    pub(crate) fn count<Q>(&self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map_or(0, |h| self.nodes.get(h).count())
    }

    /// Returns the rank of the first occurrence of `key`.
    pub(crate) fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        let mut rank = 0;

        while let Some(h) = current {
            let node = self.nodes.get(h);
            let left_len = self.totals(node.left()).1;
            match key.cmp(node.key().borrow()) {
                Less => current = node.left(),
                Equal => return Some(rank + left_len),
                Greater => {
                    rank += left_len + node.count();
                    current = node.right();
                }
            }
        }
        None
    }

    /// Adds one occurrence of `key`.
    pub(crate) fn insert(&mut self, key: T) {
        let root = self.insert_at(self.root, key);
        self.root = Some(root);
        self.refresh_bounds();
    }

    fn insert_at(&mut self, at: Option<Handle>, key: T) -> Handle {
        let Some(h) = at else {
            return self.nodes.alloc(Node::new(key));
        };

        let (left, right) = self.children(h);
        match key.cmp(self.nodes.get(h).key()) {
            Equal => {
                self.nodes.get_mut(h).increment();
                return h;
            }
            Less => {
                let left = self.insert_at(left, key);
                self.nodes.get_mut(h).set_left(Some(left));
            }
            Greater => {
                let right = self.insert_at(right, key);
                self.nodes.get_mut(h).set_right(Some(right));
            }
        }
        self.balance(h)
    }

    /// Removes one occurrence of `key`. Returns false if there was none.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.remove_occurrences(key, Occurrences::One) > 0
    }

    /// Removes every occurrence of `key`. Returns how many there were.
    pub(crate) fn remove_all<Q>(&mut self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.remove_occurrences(key, Occurrences::All)
    }

    fn remove_occurrences<Q>(&mut self, key: &Q, occurrences: Occurrences) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some(root) = self.root else {
            return 0;
        };

        match self.remove_at(root, key, occurrences) {
            Removal::Missing => 0,
            Removal::Removed { root, count } => {
                self.root = root;
                self.refresh_bounds();
                count
            }
        }
    }

    fn remove_at<Q>(&mut self, h: Handle, key: &Q, occurrences: Occurrences) -> Removal
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let (left, right) = self.children(h);
        match key.cmp(self.nodes.get(h).key().borrow()) {
            Less => {
                let Some(left) = left else {
                    return Removal::Missing;
                };
                match self.remove_at(left, key, occurrences) {
                    Removal::Missing => Removal::Missing,
                    Removal::Removed { root, count } => {
                        self.nodes.get_mut(h).set_left(root);
                        Removal::Removed {
                            root: Some(self.balance(h)),
                            count,
                        }
                    }
                }
            }
            Greater => {
                let Some(right) = right else {
                    return Removal::Missing;
                };
                match self.remove_at(right, key, occurrences) {
                    Removal::Missing => Removal::Missing,
                    Removal::Removed { root, count } => {
                        self.nodes.get_mut(h).set_right(root);
                        Removal::Removed {
                            root: Some(self.balance(h)),
                            count,
                        }
                    }
                }
            }
            Equal => {
                let count = self.nodes.get(h).count();
                if occurrences == Occurrences::One && count > 1 {
                    self.nodes.get_mut(h).decrement();
                    return Removal::Removed { root: Some(h), count: 1 };
                }
                Removal::Removed {
                    root: self.unlink(h),
                    count,
                }
            }
        }
    }
}

impl<T: Clone + Ord> RawOSBag<T> {
    /// Removes and returns one occurrence of the smallest key.
    pub(crate) fn pop_first(&mut self) -> Option<T> {
        let h = self.first?;
        self.pop_at(h)
    }

    /// Removes and returns one occurrence of the largest key.
    pub(crate) fn pop_last(&mut self) -> Option<T> {
        let h = self.last?;
        self.pop_at(h)
    }

    fn pop_at(&mut self, h: Handle) -> Option<T> {
        let key = self.nodes.get(h).key().clone();
        let removed = self.remove(&key);
        debug_assert!(removed, "`RawOSBag::pop_at()` - cached bound is stale");
        Some(key)
    }
}

/// An ascending iterator over every occurrence in a `RawOSBag`.
pub(crate) struct Iter<'a, T> {
    nodes: &'a Arena<Node<T>>,
    stack: Stack,
    // Key being repeated and how many repeats are left.
    current: Option<(&'a T, usize)>,
    remaining: usize,
}

impl<T> Iter<'_, T> {
    fn descend(&mut self, mut at: Option<Handle>) {
        while let Some(h) = at {
            self.stack.push(h);
            at = self.nodes.get(h).left();
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            stack: self.stack.clone(),
            current: self.current,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        loop {
            if let Some((key, repeats)) = self.current.as_mut()
                && *repeats > 0
            {
                *repeats -= 1;
                self.remaining -= 1;
                return Some(*key);
            }

            let h = self.stack.pop()?;
            let nodes = self.nodes;
            let node = nodes.get(h);
            self.descend(node.right());
            self.current = Some((node.key(), node.count()));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
