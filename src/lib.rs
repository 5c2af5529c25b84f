//! # Quadtree - Point Quadtree Spatial Index
//!
//! A Rust library providing a point quadtree that stores 2-D points (with an
//! optional, non-partitioning `z`) carrying arbitrary payload data.
//!
//! ## Features
//!
//! - **Split on Difference**: A leaf splits only when it would hold two distinct locations; coincident points share a bucket
//! - **Lazy Children**: Only quadrants that receive a point are materialized
//! - **Region Queries**: Closed-rectangle search with an optional result cap
//! - **Approximate Nearest**: Spatially local candidates found by descending and climbing the tree
//! - **Level of Detail**: Dense subtrees collapse into center-of-mass summaries
//! - **Bounded Depth**: A configurable depth cap stops runaway splitting of nearly equal points
//!
//! ## Quick Start
//!
//! ```rust
//! use quadtree::prelude::*;
//!
//! // Bounds use y-up coordinates: top-left then bottom-right
//! let mut tree = QuadTree::new(Point::new(0.0, 100.0), Point::new(100.0, 0.0))?;
//!
//! tree.add(Point::new(10.0, 10.0), "a");
//! tree.add(Point::new(75.0, 75.0), "b");
//! tree.add(Point::new(5.0, 99.0), "c");
//! tree.add(Point::new(99.0, 5.0), "d");
//! tree.add(Point::new(99.0, 4.0), "e");
//! assert_eq!(tree.size(), 5);
//!
//! // Everything in the closed rectangle (98, 10)-(100, 0)
//! let found = tree.payloads_in_region(&Point::new(98.0, 10.0), &Point::new(100.0, 0.0), None);
//! assert_eq!(found.len(), 2);
//!
//! // A few points near (99, 1)
//! let near = tree.approx_near(&Point::new(99.0, 1.0), 3);
//! assert!(near.iter().any(|p| *p.data() == "e"));
//!
//! // Dense subtrees summarized, sparse ones listed
//! let lod = tree.payloads_and_centers_in_region(&Point::new(0.0, 100.0), &Point::new(100.0, 0.0), 1);
//! assert_eq!(lod.payloads.len(), 3);
//! assert_eq!(lod.details[0].count, 2);
//! # Ok::<(), quadtree::QuadTreeError>(())
//! ```
//!
//! ## How It Works
//!
//! Nodes are kept in a flat arena and refer to each other by index. A point is
//! routed against a node's center: `x <= cx` goes left, `y >= cy` goes up, so
//! boundary points always lean top-left. Every node keeps a count of the
//! payloads beneath it, which makes subtree sizes O(1) and lets density
//! queries avoid enumeration.
//!
//! The tree is single-writer: `add` takes `&mut self`, and all queries borrow
//! it immutably through [`NodeRef`] handles.

pub mod error;
pub mod node;
pub mod point;
pub mod prelude;
pub mod quadtree;
pub mod queries;

pub use error::{QuadTreeError, Result};
pub use node::NodeRef;
pub use point::Point;
pub use quadtree::{DEFAULT_MAX_DEPTH, NodeId, Payload, PayloadId, QuadTree, QuadTreeConfig, Quadrant};
pub use queries::{Detail, RegionDetail};

#[cfg(test)]
mod integration_test;
