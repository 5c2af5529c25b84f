//! Collapse dense regions into center-of-mass summaries.
use quadtree::prelude::*;

fn main() -> Result<(), QuadTreeError> {
    let mut tree = QuadTree::new(Point::new(0.0, 100.0), Point::new(100.0, 0.0))?;

    // A dense cluster near (80, 20) and a few scattered points
    for i in 0..50_i32 {
        let offset = f64::from(i) * 0.1;
        tree.add(Point::new(80.0 + offset, 20.0 - offset), i);
    }
    tree.add(Point::new(10.0, 90.0), 100);
    tree.add(Point::new(30.0, 60.0), 101);

    let lod = tree.payloads_and_centers_in_region(&Point::new(0.0, 100.0), &Point::new(100.0, 0.0), 5);
    println!("Exact payloads: {}", lod.payloads.len());
    for detail in &lod.details {
        println!("Summary at ({:.2}, {:.2}) stands for {} points", detail.center.x, detail.center.y, detail.count);
    }

    let mut coarse = 0;
    tree.leaves_each(4, |_| coarse += 1);
    println!("Nodes visited at depth limit 4: {coarse}");
    println!("Points near the cluster footprint: {}", tree.family_size_at_width(&Point::new(75.0, 25.0), &Point::new(90.0, 10.0)));
    Ok(())
}
