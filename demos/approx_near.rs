//! Gather spatially local candidates around a point.
//!
//! `approx_near` is not an exact k-nearest search: it returns the payloads of
//! the leaf the point routes to, then widens to sibling subtrees.

use quadtree::prelude::*;

fn main() -> Result<(), QuadTreeError> {
    let mut tree = QuadTree::new(Point::new(0.0, 100.0), Point::new(100.0, 0.0))?;
    for (i, (x, y)) in [(10.0, 10.0), (75.0, 75.0), (5.0, 99.0), (99.0, 5.0), (99.0, 4.0)]
        .into_iter()
        .enumerate()
    {
        tree.add(Point::new(x, y), i);
    }

    let query = Point::new(99.0, 1.0);
    for count in [1, 3, 10] {
        let near = tree.approx_near(&query, count);
        let spots: Vec<_> = near.iter().map(|p| (p.location().x, p.location().y)).collect();
        println!("{count} near {query:?}: {spots:?}");
    }
    Ok(())
}
