//! Profiling benchmark for the density and level-of-detail queries

use quadtree::{Point, QuadTree};
use rand::Rng;
use rand::SeedableRng;
use std::time::Instant;

/// Clustered points: a few dense blobs over a sparse background
fn clustered_points<R: Rng>(rng: &mut R, count: usize) -> Vec<Point> {
    let centers = [(20.0, 20.0), (70.0, 80.0), (85.0, 15.0)];
    (0..count)
        .map(|i| {
            if i % 4 == 0 {
                Point::new(rng.random_range(0.0..100.0), rng.random_range(0.0..100.0))
            } else {
                let (cx, cy) = centers[i % centers.len()];
                let x: f64 = cx + rng.random_range(-2.0..2.0);
                let y: f64 = cy + rng.random_range(-2.0..2.0);
                Point::new(x, y)
            }
        })
        .collect()
}

fn main() {
    println!("Quadtree LOD Profiling Benchmark");
    println!("================================\n");

    let num_items = 500_000;
    let num_tests = 1_000;

    let seed = 95756739_u64;
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let points = clustered_points(&mut rng, num_items);
    let mut tree = QuadTree::new(Point::new(0.0, 100.0), Point::new(100.0, 0.0)).unwrap();
    let build_start = Instant::now();
    for (i, p) in points.into_iter().enumerate() {
        tree.add(p, i);
    }
    let build_total = build_start.elapsed();
    println!("build tree {} items: {:>12.2}ms", num_items, build_total.as_secs_f64() * 1000.0);

    let full_tl = Point::new(0.0, 100.0);
    let full_br = Point::new(100.0, 0.0);
    for threshold in [10, 100, 1_000, 10_000] {
        let start = Instant::now();
        let mut details = 0;
        let mut exact = 0;
        for _ in 0..num_tests / 10 {
            let lod = tree.payloads_and_centers_in_region(&full_tl, &full_br, threshold);
            details += lod.details.len();
            exact += lod.payloads.len();
        }
        println!(
            "LOD threshold {:>6}: {:>10.2}ms ({} summaries, {} exact per query)",
            threshold,
            start.elapsed().as_secs_f64() * 1000.0,
            details / (num_tests / 10),
            exact / (num_tests / 10)
        );
    }

    let start = Instant::now();
    let mut total = 0;
    for _ in 0..num_tests {
        let x = rng.random_range(0.0..99.0);
        let y = rng.random_range(1.0..100.0);
        let node = tree.root();
        total += node.family_size_at_width(&Point::new(x, y), &Point::new(x + 1.0, y - 1.0));
    }
    println!(
        "family_size_at_width x{}: {:>10.2}ms (mean {})",
        num_tests,
        start.elapsed().as_secs_f64() * 1000.0,
        total / num_tests
    );

    for depth in [4, 8, 16] {
        let start = Instant::now();
        let mut visited = 0;
        tree.leaves_each(depth, |_| visited += 1);
        println!(
            "leaves_each depth {:>2}: {:>10.2}ms ({} nodes)",
            depth,
            start.elapsed().as_secs_f64() * 1000.0,
            visited
        );
    }
}
