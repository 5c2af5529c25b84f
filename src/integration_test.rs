#[cfg(test)]
mod integration_tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::{NodeRef, Point, QuadTree};

    fn random_tree(seed: u64, count: usize) -> QuadTree<usize> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut tree = QuadTree::new(Point::new(0.0, 100.0), Point::new(100.0, 0.0)).unwrap();
        for i in 0..count {
            // Coarse grid so some points coincide
            let x = f64::from(rng.random_range(0..400_u32)) / 4.0;
            let y = f64::from(rng.random_range(0..400_u32)) / 4.0;
            tree.add(Point::new(x, y), i);
        }
        tree
    }

    fn check_node(node: NodeRef<'_, usize>) -> usize {
        if node.is_leaf() {
            let mut payloads = node.payloads();
            if let Some(first) = payloads.next() {
                assert!(
                    payloads.all(|p| p.location() == first.location()),
                    "Leaf bucket below the depth cap holds only coincident points"
                );
            }
            for p in node.payloads() {
                assert_eq!(p.node(), node.id(), "Payload back-reference names its leaf");
                assert!(node.contains_point(&p.location()), "Payload lies inside its leaf");
            }
            assert_eq!(node.size(), node.payloads().count());
            return node.size();
        }

        assert_eq!(node.payloads().count(), 0, "Internal node never holds payloads");
        let mut total = 0;
        for child in node.children() {
            assert_eq!(child.parent(), Some(node), "Child points back at its parent");
            assert_eq!(child.depth(), node.depth() + 1);
            assert!(child.child_of(&node));
            assert!(node.parent_of(&child));
            total += check_node(child);
        }
        assert_eq!(node.size(), total, "Subtree counter matches its children");
        total
    }

    #[test]
    fn test_random_tree_invariants() {
        let tree = random_tree(95756739, 2_000);
        assert_eq!(tree.size(), 2_000);
        assert_eq!(check_node(tree.root()), 2_000);
    }

    #[test]
    fn test_random_region_queries_match_brute_force() {
        let tree = random_tree(42, 1_000);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let x0 = rng.random_range(0.0..100.0);
            let x1 = rng.random_range(0.0..100.0);
            let y0 = rng.random_range(0.0..100.0);
            let y1 = rng.random_range(0.0..100.0);
            let tl = Point::new(f64::min(x0, x1), f64::max(y0, y1));
            let br = Point::new(f64::max(x0, x1), f64::min(y0, y1));

            let mut found: Vec<usize> = tree
                .payloads_in_region(&tl, &br, None)
                .iter()
                .map(|p| *p.data())
                .collect();
            found.sort_unstable();

            let expected: Vec<usize> = tree
                .payloads()
                .filter(|p| {
                    let l = p.location();
                    l.x >= tl.x && l.x <= br.x && l.y <= tl.y && l.y >= br.y
                })
                .map(|p| *p.data())
                .collect();
            assert_eq!(found, expected, "Pruned search must agree with a full scan");
        }
    }

    #[test]
    fn test_random_approx_near_counts() {
        let tree = random_tree(1234, 500);
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            let p = Point::new(rng.random_range(0.0..100.0), rng.random_range(0.0..100.0));
            let k = rng.random_range(1..50);
            let near = tree.approx_near(&p, k);
            assert_eq!(near.len(), k, "Enough payloads exist, so exactly k come back");
            let mut ids: Vec<usize> = near.iter().map(|p| *p.data()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), k, "No payload is returned twice");
        }
    }

    #[test]
    fn test_random_lod_accounts_for_every_payload() {
        let tree = random_tree(555, 800);
        let tl = Point::new(0.0, 100.0);
        let br = Point::new(100.0, 0.0);
        for threshold in [0, 1, 5, 25, 1_000] {
            let lod = tree.payloads_and_centers_in_region(&tl, &br, threshold);
            let summarized: usize = lod.details.iter().map(|d| d.count).sum();
            assert_eq!(lod.payloads.len() + summarized, 800, "threshold {threshold}");
            assert!(lod.details.iter().all(|d| d.count > threshold));
        }
    }

    #[test]
    fn test_leaves_each_depth_limit_coarsens() {
        let tree = random_tree(31337, 300);
        let mut true_leaves = 0;
        let mut covered = 0;
        tree.leaves_each(usize::MAX, |leaf| {
            assert!(leaf.is_leaf());
            true_leaves += 1;
            covered += leaf.size();
        });
        assert_eq!(covered, 300);

        let mut coarse = 0;
        tree.leaves_each(3, |node| {
            assert!(node.depth() <= 3);
            coarse += 1;
        });
        assert!(coarse < true_leaves, "Small depth limit coalesces deep chains");
    }
}
