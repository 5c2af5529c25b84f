//! Borrowed node handles and tree introspection.

use std::fmt;

use crate::quadtree::{Node, NodeId, Payload, QuadTree, Quadrant, Rect};
use crate::Point;

/// Read-only view of one node of a [`QuadTree`]
///
/// Cheap to copy. Every query in [`queries`](crate::queries) can be issued
/// from any node, not only the root.
pub struct NodeRef<'a, T> {
    pub(crate) tree: &'a QuadTree<T>,
    pub(crate) id: NodeId,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T> PartialEq for NodeRef<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl<T> Eq for NodeRef<'_, T> {}

impl<T> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("top_left", &self.top_left())
            .field("bottom_right", &self.bottom_right())
            .field("depth", &self.depth())
            .field("size", &self.size())
            .finish_non_exhaustive()
    }
}

impl<'a, T> NodeRef<'a, T> {
    #[inline]
    pub(crate) fn new(tree: &'a QuadTree<T>, id: NodeId) -> Self {
        Self { tree, id }
    }

    #[inline]
    fn node(&self) -> &'a Node {
        &self.tree.nodes[self.id.0]
    }

    #[inline]
    pub(crate) fn rect(&self) -> Rect {
        self.node().rect()
    }

    /// Arena handle of this node
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Upper-left corner
    #[must_use]
    pub fn top_left(&self) -> Point {
        self.node().top_left
    }

    /// Lower-right corner
    #[must_use]
    pub fn bottom_right(&self) -> Point {
        self.node().bottom_right
    }

    /// Midpoint of the rectangle, used for quadrant routing
    #[must_use]
    pub fn center(&self) -> Point {
        self.node().center()
    }

    /// True if no child slot is populated
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    /// Payloads held directly by this node; always empty for internal nodes
    pub fn payloads(self) -> impl Iterator<Item = &'a Payload<T>> + 'a {
        let tree = self.tree;
        self.node().bucket.iter().map(move |p| &tree.payloads[p.0])
    }

    /// Payload count of the whole subtree, in O(1)
    #[must_use]
    pub fn size(&self) -> usize {
        self.node().count
    }

    /// 1 at the root, +1 per generation
    #[must_use]
    pub fn depth(&self) -> usize {
        self.node().depth
    }

    /// Parent node, `None` at the root
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.node().parent.map(|id| Self::new(self.tree, id))
    }

    /// Child in `quadrant`, if materialized
    #[must_use]
    pub fn child(&self, quadrant: Quadrant) -> Option<Self> {
        self.node().children[quadrant.index()].map(|id| Self::new(self.tree, id))
    }

    /// Upper-left child
    #[must_use]
    pub fn top_left_child(&self) -> Option<Self> {
        self.child(Quadrant::TopLeft)
    }

    /// Upper-right child
    #[must_use]
    pub fn top_right_child(&self) -> Option<Self> {
        self.child(Quadrant::TopRight)
    }

    /// Lower-left child
    #[must_use]
    pub fn bottom_left_child(&self) -> Option<Self> {
        self.child(Quadrant::BottomLeft)
    }

    /// Lower-right child
    #[must_use]
    pub fn bottom_right_child(&self) -> Option<Self> {
        self.child(Quadrant::BottomRight)
    }

    /// Materialized children in canonical order
    pub fn children(self) -> impl Iterator<Item = Self> + 'a {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .flatten()
            .map(move |&id| Self::new(tree, id))
    }

    /// True if `other` is a strict ancestor of this node
    #[must_use]
    pub fn child_of(&self, other: &Self) -> bool {
        if !std::ptr::eq(self.tree, other.tree) {
            return false;
        }
        let mut current = self.parent();
        while let Some(node) = current {
            if node.id == other.id {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// True if `other` is a strict descendant of this node
    ///
    /// Walks child links: a node's center always routes into the quadrant
    /// that holds it, so the descent is a single path.
    #[must_use]
    pub fn parent_of(&self, other: &Self) -> bool {
        if !std::ptr::eq(self.tree, other.tree) || other.depth() <= self.depth() {
            return false;
        }
        let target = other.center();
        let mut current = *self;
        while current.depth() < other.depth() {
            match current.child(Quadrant::of(&target, &current.center())) {
                Some(child) => current = child,
                None => return false,
            }
        }
        current.id == other.id
    }

    /// Whether `p` lies in this node's closed rectangle
    #[must_use]
    pub fn contains_point(&self, p: &Point) -> bool {
        self.rect().contains_point(p)
    }

    /// Whether the closed rectangle `[top_left, bottom_right]` lies entirely
    /// inside this node
    #[must_use]
    pub fn contains_rect(&self, top_left: &Point, bottom_right: &Point) -> bool {
        self.rect().contains_rect(&Rect::from_corners(top_left, bottom_right))
    }

    /// Whether the closed rectangle `[top_left, bottom_right]` touches this node
    #[must_use]
    pub fn intersects_rect(&self, top_left: &Point, bottom_right: &Point) -> bool {
        self.rect().intersects(&Rect::from_corners(top_left, bottom_right))
    }

    /// Clamps `p` into this node's rectangle, axis by axis; `z` is untouched
    #[must_use]
    pub fn clip_point(&self, p: &Point) -> Point {
        self.rect().clip(p)
    }

    /// Every payload of the subtree, depth first in canonical order
    ///
    /// Stops as soon as `max_count` payloads are collected.
    #[must_use]
    pub fn get_contained_payloads(&self, max_count: Option<usize>) -> Vec<&'a Payload<T>> {
        let limit = max_count.unwrap_or(usize::MAX);
        let mut out = Vec::with_capacity(self.size().min(limit));
        self.collect_contained(limit, &mut out);
        out
    }

    /// Appends subtree payloads to `out` until it holds `limit` entries
    pub(crate) fn collect_contained(&self, limit: usize, out: &mut Vec<&'a Payload<T>>) {
        if out.len() >= limit {
            return;
        }
        let remaining = limit - out.len();
        out.extend(self.payloads().take(remaining));
        for child in self.children() {
            if out.len() >= limit {
                return;
            }
            child.collect_contained(limit, out);
        }
    }

    /// Mean location of every payload in the subtree, `None` if empty
    ///
    /// A subtree of coincident payloads returns their exact location.
    #[must_use]
    pub fn center_of_mass(&self) -> Option<Point> {
        let payloads = self.get_contained_payloads(None);
        let first = payloads.first()?.location();
        if payloads.iter().all(|p| p.location() == first) {
            return Some(first);
        }
        let sum = payloads
            .iter()
            .fold(Point::new(0.0, 0.0), |acc, p| acc + p.location());
        let n = payloads.len() as f64;
        Some(Point {
            x: sum.x / n,
            y: sum.y / n,
            z: sum.z.map(|z| z / n),
        })
    }

    /// Visits leaves depth first in canonical order
    ///
    /// A node at `max_depth` is visited in place of its subtree, so a small
    /// limit yields coarse stand-ins for deep chains.
    pub fn leaves_each<F>(&self, max_depth: usize, mut visit: F)
    where
        F: FnMut(NodeRef<'a, T>),
    {
        self.walk_leaves(max_depth, &mut visit);
    }

    fn walk_leaves<F>(&self, max_depth: usize, visit: &mut F)
    where
        F: FnMut(NodeRef<'a, T>),
    {
        if self.is_leaf() || self.depth() >= max_depth {
            visit(*self);
            return;
        }
        for child in self.children() {
            child.walk_leaves(max_depth, visit);
        }
    }
}
