//! Point quadtree: node arena, configuration and the insertion/splitting engine.
//!
//! Nodes live in a single `Vec` and refer to each other by [`NodeId`]. The
//! root is always slot 0. A parent owns up to four child slots, each child
//! keeps the index of its parent, and every payload keeps the index of the
//! leaf whose bucket currently holds it. Nodes are never removed, so indices
//! stay valid for the lifetime of the tree.

use log::{debug, trace};

use crate::error::{QuadTreeError, Result};
use crate::node::NodeRef;
use crate::Point;

/// Default cap on node depth (root is depth 1)
///
/// Each level halves the rectangle, so 64 levels exhaust `f64` precision for
/// any realistic extent.
pub const DEFAULT_MAX_DEPTH: usize = 64;

const ROOT: NodeId = NodeId(0);

/// Tuning knobs for a [`QuadTree`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuadTreeConfig {
    /// Deepest level a node may be created at. A leaf at this depth never
    /// splits; distinct points reaching it share its bucket.
    pub max_depth: usize,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl QuadTreeConfig {
    /// Returns a copy with a different depth cap
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(QuadTreeError::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Stable handle to a node in a [`QuadTree`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Arena slot of this node; the root is 0
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Stable handle to a payload, in insertion order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PayloadId(pub(crate) usize);

impl PayloadId {
    /// Insertion index of this payload
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One of the four child slots, listed in canonical order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Upper-left quarter
    TopLeft,
    /// Upper-right quarter
    TopRight,
    /// Lower-left quarter
    BottomLeft,
    /// Lower-right quarter
    BottomRight,
}

impl Quadrant {
    /// Canonical traversal order
    pub const ALL: [Self; 4] = [Self::TopLeft, Self::TopRight, Self::BottomLeft, Self::BottomRight];

    /// Slot index in canonical order
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomLeft => 2,
            Self::BottomRight => 3,
        }
    }

    /// Routes `p` against the center `c`. Ties go left and top.
    #[inline]
    #[must_use]
    pub fn of(p: &Point, c: &Point) -> Self {
        match (p.x <= c.x, p.y >= c.y) {
            (true, true) => Self::TopLeft,
            (false, true) => Self::TopRight,
            (true, false) => Self::BottomLeft,
            (false, false) => Self::BottomRight,
        }
    }
}

/// Closed axis-aligned rectangle: `min_x`, `min_y`, `max_x`, `max_y`
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Rect {
    pub(crate) min_x: f64,
    pub(crate) min_y: f64,
    pub(crate) max_x: f64,
    pub(crate) max_y: f64,
}

impl Rect {
    /// Rectangle spanned by two opposite corners, in any order
    pub(crate) fn from_corners(a: &Point, b: &Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    #[inline]
    pub(crate) fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    #[inline]
    pub(crate) fn intersects(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    #[inline]
    pub(crate) fn contains_rect(&self, other: &Self) -> bool {
        self.min_x <= other.min_x
            && self.max_x >= other.max_x
            && self.min_y <= other.min_y
            && self.max_y >= other.max_y
    }

    pub(crate) fn clip(&self, p: &Point) -> Point {
        Point {
            x: p.x.clamp(self.min_x, self.max_x),
            y: p.y.clamp(self.min_y, self.max_y),
            z: p.z,
        }
    }
}

/// Opaque caller data stored at a location
#[derive(Clone, Debug)]
pub struct Payload<T> {
    location: Point,
    data: T,
    node: NodeId,
}

impl<T> Payload<T> {
    /// Where the payload was inserted
    #[inline]
    #[must_use]
    pub fn location(&self) -> Point {
        self.location
    }

    /// Caller data, unmodified
    #[inline]
    #[must_use]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Leaf whose bucket currently holds this payload
    #[inline]
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Consumes the payload, returning the caller data
    #[must_use]
    pub fn into_data(self) -> T {
        self.data
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) top_left: Point,
    pub(crate) bottom_right: Point,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: [Option<NodeId>; 4],
    pub(crate) bucket: Vec<PayloadId>,
    /// Root is 1
    pub(crate) depth: usize,
    /// Payloads anywhere in this subtree
    pub(crate) count: usize,
}

impl Node {
    fn new(top_left: Point, bottom_right: Point, parent: Option<NodeId>, depth: usize) -> Self {
        Self {
            top_left,
            bottom_right,
            parent,
            children: [None; 4],
            bucket: Vec::new(),
            depth,
            count: 0,
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    #[inline]
    pub(crate) fn center(&self) -> Point {
        Point::new(
            self.top_left.x / 2.0 + self.bottom_right.x / 2.0,
            self.top_left.y / 2.0 + self.bottom_right.y / 2.0,
        )
    }

    #[inline]
    pub(crate) fn rect(&self) -> Rect {
        Rect::from_corners(&self.top_left, &self.bottom_right)
    }

    /// Corners of the sub-rectangle covered by `quadrant`
    fn quadrant_bounds(&self, quadrant: Quadrant) -> (Point, Point) {
        let tl = self.top_left;
        let br = self.bottom_right;
        let c = self.center();
        match quadrant {
            Quadrant::TopLeft => (tl, c),
            Quadrant::TopRight => (Point::new(c.x, tl.y), Point::new(br.x, c.y)),
            Quadrant::BottomLeft => (Point::new(tl.x, c.y), Point::new(c.x, br.y)),
            Quadrant::BottomRight => (c, br),
        }
    }
}

/// Point quadtree over a fixed bounding rectangle
///
/// Payloads are stored in leaf buckets. A leaf splits as soon as it would hold
/// two payloads at different locations; coincident payloads share a bucket.
/// Child nodes are only created for quadrants that receive a point.
#[derive(Clone, Debug)]
pub struct QuadTree<T> {
    pub(crate) nodes: Vec<Node>,
    pub(crate) payloads: Vec<Payload<T>>,
    config: QuadTreeConfig,
}

impl<T> QuadTree<T> {
    /// Creates an empty tree covering `[top_left, bottom_right]`
    ///
    /// `y` increases upward, so `top_left` must have the smaller `x` and the
    /// larger `y`.
    ///
    /// # Errors
    /// [`QuadTreeError::InvalidBounds`] when the rectangle is degenerate or
    /// the corners are swapped.
    pub fn new(top_left: Point, bottom_right: Point) -> Result<Self> {
        Self::with_config(top_left, bottom_right, QuadTreeConfig::default())
    }

    /// Creates an empty tree with explicit configuration
    ///
    /// # Errors
    /// [`QuadTreeError::InvalidBounds`] for a degenerate rectangle,
    /// [`QuadTreeError::InvalidConfig`] for a zero depth cap.
    pub fn with_config(top_left: Point, bottom_right: Point, config: QuadTreeConfig) -> Result<Self> {
        // Written so NaN coordinates are rejected too
        if !(top_left.x < bottom_right.x && top_left.y > bottom_right.y) {
            return Err(QuadTreeError::InvalidBounds {
                top_left,
                bottom_right,
            });
        }
        config.validate()?;
        debug!(
            "new quadtree over ({}, {})-({}, {}), max_depth {}",
            top_left.x, top_left.y, bottom_right.x, bottom_right.y, config.max_depth
        );
        Ok(Self {
            nodes: vec![Node::new(top_left, bottom_right, None, 1)],
            payloads: Vec::new(),
            config,
        })
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &QuadTreeConfig {
        &self.config
    }

    /// Stores `data` at `location` and returns its handle
    ///
    /// A location outside the root rectangle is clamped onto its boundary
    /// (see [`NodeRef::clip_point`]) and stored clamped.
    pub fn add(&mut self, location: Point, data: T) -> PayloadId {
        let stored = self.nodes[ROOT.0].rect().clip(&location);
        if stored != location {
            debug!(
                "clamped out-of-bounds point ({}, {}) to ({}, {})",
                location.x, location.y, stored.x, stored.y
            );
        }
        let id = PayloadId(self.payloads.len());
        self.payloads.push(Payload {
            location: stored,
            data,
            node: ROOT,
        });
        self.insert(ROOT, id);
        id
    }

    /// Total number of payloads
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    /// Same as [`len`](Self::len)
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.len()
    }

    /// True if nothing has been added
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    /// Number of materialized nodes, root included
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Handle to the root node
    #[must_use]
    pub fn root(&self) -> NodeRef<'_, T> {
        NodeRef::new(self, ROOT)
    }

    /// Handle to the node with id `id`, if it exists in this tree
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        (id.0 < self.nodes.len()).then(|| NodeRef::new(self, id))
    }

    /// Payload by handle
    #[must_use]
    pub fn payload(&self, id: PayloadId) -> Option<&Payload<T>> {
        self.payloads.get(id.0)
    }

    /// All payloads in insertion order
    pub fn payloads(&self) -> impl Iterator<Item = &Payload<T>> + '_ {
        self.payloads.iter()
    }

    // --- Insertion engine ---

    /// Pushes `payload` down from `start` until some leaf accepts it
    fn insert(&mut self, start: NodeId, payload: PayloadId) {
        let location = self.payloads[payload.0].location;
        let mut current = start;
        loop {
            self.nodes[current.0].count += 1;
            if self.nodes[current.0].is_leaf() {
                if self.accepts(current, &location) {
                    self.nodes[current.0].bucket.push(payload);
                    self.payloads[payload.0].node = current;
                    return;
                }
                self.split(current);
            }
            let node = &self.nodes[current.0];
            let quadrant = Quadrant::of(&location, &node.center());
            current = self.child_or_create(current, quadrant);
        }
    }

    /// Whether leaf `id` can take `location` into its own bucket
    fn accepts(&self, id: NodeId, location: &Point) -> bool {
        let node = &self.nodes[id.0];
        if node.bucket.is_empty() || node.bucket.iter().all(|p| self.payloads[p.0].location == *location) {
            return true;
        }
        if node.depth >= self.config.max_depth {
            debug!(
                "depth cap {} reached at node {}, coalescing {} payloads",
                self.config.max_depth,
                id.0,
                node.bucket.len() + 1
            );
            return true;
        }
        false
    }

    /// Moves the bucket of leaf `id` into freshly routed children
    fn split(&mut self, id: NodeId) {
        let bucket = std::mem::take(&mut self.nodes[id.0].bucket);
        trace!(
            "splitting node {} at depth {} ({} payloads)",
            id.0,
            self.nodes[id.0].depth,
            bucket.len()
        );
        let center = self.nodes[id.0].center();
        for payload in bucket {
            let quadrant = Quadrant::of(&self.payloads[payload.0].location, &center);
            let child = self.child_or_create(id, quadrant);
            self.insert(child, payload);
        }
    }

    fn child_or_create(&mut self, parent: NodeId, quadrant: Quadrant) -> NodeId {
        if let Some(child) = self.nodes[parent.0].children[quadrant.index()] {
            return child;
        }
        let node = &self.nodes[parent.0];
        let (top_left, bottom_right) = node.quadrant_bounds(quadrant);
        let child = NodeId(self.nodes.len());
        let depth = node.depth + 1;
        self.nodes.push(Node::new(top_left, bottom_right, Some(parent), depth));
        self.nodes[parent.0].children[quadrant.index()] = Some(child);
        child
    }
}
