//! Find payloads inside a query rectangle.
use quadtree::prelude::*;

fn main() -> Result<(), QuadTreeError> {
    let mut tree = QuadTree::new(Point::new(0.0, 100.0), Point::new(100.0, 0.0))?;
    tree.add(Point::new(10.0, 10.0), "a");
    tree.add(Point::new(75.0, 75.0), "b");
    tree.add(Point::new(99.0, 5.0), "c"); // inside query
    tree.add(Point::new(99.0, 4.0), "d"); // inside query

    let found = tree.payloads_in_region(&Point::new(98.0, 10.0), &Point::new(100.0, 0.0), None);
    let names: Vec<_> = found.iter().map(|p| *p.data()).collect();
    println!("In region: {names:?}");
    assert_eq!(names, vec!["c", "d"], "Expected the two bottom-right points");

    let first = tree.payloads_in_region(&Point::new(98.0, 10.0), &Point::new(100.0, 0.0), Some(1));
    println!("Capped at 1: {:?}", first.iter().map(|p| *p.data()).collect::<Vec<_>>());
    Ok(())
}
