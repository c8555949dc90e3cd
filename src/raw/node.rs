use super::handle::Handle;
use super::size::Size;

/// Weight-balance parameters `(Δ, Γ)` = `(3, 2)`.
///
/// A node is balanced when neither subtree's weight exceeds `DELTA` times the
/// other's. When a rotation is needed, a single rotation is used if the inner
/// grandchild's weight is below `GAMMA` times the outer one's, otherwise a
/// double rotation. `(3, 2)` is the only integer pair valid for both insertion
/// and deletion.
pub(crate) const DELTA: usize = 3;
pub(crate) const GAMMA: usize = 2;

/// A tree node: one distinct key together with its multiplicity.
#[derive(Clone)]
pub(crate) struct Node<T> {
    key: T,
    // Occurrences of `key`; never zero while the node is linked. Not bounded
    // by the arena, so kept as a plain `usize`.
    count: usize,
    // Distinct keys in this subtree, drives the weight balance.
    nodes: Size,
    // Occurrences in this subtree, drives the order statistics.
    len: usize,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl<T> Node<T> {
    /// Creates a detached node holding a single occurrence of `key`.
    pub(crate) fn new(key: T) -> Self {
        Self {
            key,
            count: 1,
            nodes: Size::ONE,
            len: 1,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &T {
        &self.key
    }

    #[inline]
    pub(crate) fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub(crate) fn nodes(&self) -> usize {
        self.nodes.to_usize()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<Handle> {
        self.right
    }

    pub(crate) fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    pub(crate) fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }

    /// Adds one occurrence of the key. Subtree totals are adjusted in place
    /// since the shape of the tree does not change.
    pub(crate) fn increment(&mut self) {
        self.count += 1;
        self.len += 1;
    }

    /// Drops one occurrence of the key. The caller unlinks the node instead
    /// when this is the last one.
    pub(crate) fn decrement(&mut self) {
        debug_assert!(self.count() > 1, "`Node::decrement()` - last occurrence must be unlinked");
        self.count -= 1;
        self.len -= 1;
    }

    /// Recomputes the subtree totals from the children's totals.
    pub(crate) fn update(&mut self, left: (usize, usize), right: (usize, usize)) {
        let (left_nodes, left_len) = left;
        let (right_nodes, right_len) = right;
        self.nodes = Size::from_usize(1 + left_nodes + right_nodes);
        self.len = self.count + left_len + right_len;
    }
}

/// Weight of a subtree holding `nodes` distinct keys.
#[inline]
pub(crate) const fn weight(nodes: usize) -> usize {
    nodes + 1
}

/// Returns true if subtrees of the given weights may sit side by side.
#[inline]
pub(crate) const fn is_balanced(weight_a: usize, weight_b: usize) -> bool {
    DELTA * weight_a >= weight_b
}

/// Returns true if a single rotation restores balance, given the weights of
/// the inner and outer grandchildren on the heavy side.
#[inline]
pub(crate) const fn is_single(inner: usize, outer: usize) -> bool {
    inner < GAMMA * outer
}
