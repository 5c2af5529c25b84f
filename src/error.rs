//! Error types for quadtree construction

use crate::Point;
use thiserror::Error;

/// Errors raised when building a [`QuadTree`](crate::QuadTree)
///
/// Queries never fail; only construction is validated.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum QuadTreeError {
    /// `top_left` must be strictly left of and above `bottom_right`
    #[error("invalid bounds: top-left {top_left:?} must be left of and above bottom-right {bottom_right:?}")]
    InvalidBounds {
        /// Requested upper-left corner
        top_left: Point,
        /// Requested lower-right corner
        bottom_right: Point,
    },

    /// Rejected configuration value
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for quadtree construction
pub type Result<T> = std::result::Result<T, QuadTreeError>;
