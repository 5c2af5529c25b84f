//! Spatial queries over a [`QuadTree`] subtree.
//!
//! All queries prune with node rectangles and walk children in canonical
//! order (top-left, top-right, bottom-left, bottom-right). They are total:
//! an empty tree or an out-of-range rectangle simply yields nothing.

use crate::node::NodeRef;
use crate::quadtree::{NodeId, Payload, QuadTree, Quadrant, Rect};
use crate::Point;

/// Summary of a dense subtree returned by
/// [`payloads_and_centers_in_region`](NodeRef::payloads_and_centers_in_region)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detail {
    /// Collapsed subtree
    pub node: NodeId,
    /// Center of mass of the subtree
    pub center: Point,
    /// Payloads in the subtree
    pub count: usize,
}

/// Result of a level-of-detail region query
#[derive(Debug)]
pub struct RegionDetail<'a, T> {
    /// Payloads from sparse subtrees, individually
    pub payloads: Vec<&'a Payload<T>>,
    /// One entry per dense subtree
    pub details: Vec<Detail>,
}

impl<T> Default for RegionDetail<'_, T> {
    fn default() -> Self {
        Self {
            payloads: Vec::new(),
            details: Vec::new(),
        }
    }
}

impl<'a, T> NodeRef<'a, T> {
    /// Payloads whose location lies in the closed rectangle `[top_left, bottom_right]`
    ///
    /// With `max_count`, traversal stops once that many matches are found; the
    /// result is a prefix of the canonical-order enumeration.
    #[must_use]
    pub fn payloads_in_region(
        &self,
        top_left: &Point,
        bottom_right: &Point,
        max_count: Option<usize>,
    ) -> Vec<&'a Payload<T>> {
        let query = Rect::from_corners(top_left, bottom_right);
        let limit = max_count.unwrap_or(usize::MAX);
        let mut results = Vec::new();
        self.region_internal(&query, limit, &mut results);
        results
    }

    fn region_internal(&self, query: &Rect, limit: usize, results: &mut Vec<&'a Payload<T>>) {
        if results.len() >= limit || !self.rect().intersects(query) {
            return;
        }
        for payload in self.payloads() {
            if results.len() >= limit {
                return;
            }
            if query.contains_point(&payload.location()) {
                results.push(payload);
            }
        }
        for child in self.children() {
            child.region_internal(query, limit, results);
        }
    }

    /// Up to `count` payloads spatially local to `point`
    ///
    /// Not a true k-nearest search. Descends along the insertion route of
    /// `point` to the deepest existing node, takes its payloads, then climbs
    /// back toward this node collecting sibling subtrees in canonical order
    /// until `count` payloads are gathered or the subtree is exhausted.
    #[must_use]
    pub fn approx_near(&self, point: &Point, count: usize) -> Vec<&'a Payload<T>> {
        let mut results = Vec::new();
        if count == 0 {
            return results;
        }

        let mut current = *self;
        while !current.is_leaf() {
            match current.child(Quadrant::of(point, &current.center())) {
                Some(child) => current = child,
                None => break,
            }
        }
        current.collect_contained(count, &mut results);

        let mut visited = current;
        while results.len() < count && visited.id != self.id {
            let Some(parent) = visited.parent() else {
                break;
            };
            for sibling in parent.children() {
                if results.len() >= count {
                    break;
                }
                if sibling.id != visited.id {
                    sibling.collect_contained(count, &mut results);
                }
            }
            visited = parent;
        }
        results
    }

    /// Size of the smallest node on the path from here to the root whose
    /// rectangle contains `[top_left, bottom_right]`
    ///
    /// Falls back to the root's size when even the root does not cover it.
    #[must_use]
    pub fn family_size_at_width(&self, top_left: &Point, bottom_right: &Point) -> usize {
        let query = Rect::from_corners(top_left, bottom_right);
        let mut node = *self;
        loop {
            if node.rect().contains_rect(&query) {
                return node.size();
            }
            match node.parent() {
                Some(parent) => node = parent,
                None => return node.size(),
            }
        }
    }

    /// Level-of-detail region query
    ///
    /// The node the query runs on is always opened. Below it, every child
    /// touching the region whose subtree holds more than `detail_threshold`
    /// payloads collapses into one [`Detail`]; sparser subtrees contribute
    /// their in-region payloads individually.
    #[must_use]
    pub fn payloads_and_centers_in_region(
        &self,
        top_left: &Point,
        bottom_right: &Point,
        detail_threshold: usize,
    ) -> RegionDetail<'a, T> {
        let query = Rect::from_corners(top_left, bottom_right);
        let mut out = RegionDetail::default();
        if !self.rect().intersects(&query) {
            return out;
        }
        self.push_region_payloads(&query, &mut out.payloads);
        for child in self.children() {
            child.lod_internal(&query, detail_threshold, &mut out);
        }
        out
    }

    fn lod_internal(&self, query: &Rect, threshold: usize, out: &mut RegionDetail<'a, T>) {
        if !self.rect().intersects(query) {
            return;
        }
        if self.size() > threshold {
            if let Some(center) = self.center_of_mass() {
                out.details.push(Detail {
                    node: self.id,
                    center,
                    count: self.size(),
                });
            }
            return;
        }
        self.push_region_payloads(query, &mut out.payloads);
        for child in self.children() {
            child.lod_internal(query, threshold, out);
        }
    }

    fn push_region_payloads(&self, query: &Rect, out: &mut Vec<&'a Payload<T>>) {
        out.extend(self.payloads().filter(|p| query.contains_point(&p.location())));
    }
}

impl<T> QuadTree<T> {
    /// [`NodeRef::payloads_in_region`] from the root
    #[must_use]
    pub fn payloads_in_region(
        &self,
        top_left: &Point,
        bottom_right: &Point,
        max_count: Option<usize>,
    ) -> Vec<&Payload<T>> {
        self.root().payloads_in_region(top_left, bottom_right, max_count)
    }

    /// [`NodeRef::approx_near`] from the root
    #[must_use]
    pub fn approx_near(&self, point: &Point, count: usize) -> Vec<&Payload<T>> {
        self.root().approx_near(point, count)
    }

    /// [`NodeRef::family_size_at_width`] from the root
    #[must_use]
    pub fn family_size_at_width(&self, top_left: &Point, bottom_right: &Point) -> usize {
        self.root().family_size_at_width(top_left, bottom_right)
    }

    /// [`NodeRef::payloads_and_centers_in_region`] from the root
    #[must_use]
    pub fn payloads_and_centers_in_region(
        &self,
        top_left: &Point,
        bottom_right: &Point,
        detail_threshold: usize,
    ) -> RegionDetail<'_, T> {
        self.root()
            .payloads_and_centers_in_region(top_left, bottom_right, detail_threshold)
    }

    /// [`NodeRef::get_contained_payloads`] from the root
    #[must_use]
    pub fn get_contained_payloads(&self, max_count: Option<usize>) -> Vec<&Payload<T>> {
        self.root().get_contained_payloads(max_count)
    }

    /// [`NodeRef::center_of_mass`] of the whole tree
    #[must_use]
    pub fn center_of_mass(&self) -> Option<Point> {
        self.root().center_of_mass()
    }

    /// [`NodeRef::leaves_each`] from the root
    pub fn leaves_each<'a, F>(&'a self, max_depth: usize, visit: F)
    where
        F: FnMut(NodeRef<'a, T>),
    {
        self.root().leaves_each(max_depth, visit);
    }
}
