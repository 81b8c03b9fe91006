use narwhal::extent::compute_extents;
use narwhal::position::position;
use narwhal::tree::{Tree, build_tree};
use narwhal::{Graph, LayoutConfig, Node, Point};
use std::collections::BTreeMap;

fn config(sibling_spacing: f64) -> LayoutConfig {
    LayoutConfig {
        node_width: 100.0,
        node_height: 50.0,
        level_spacing: 150.0,
        sibling_spacing,
        ..Default::default()
    }
}

fn graph(ids: &[&str], edges: &[(&str, &str)]) -> Graph {
    let mut g = Graph::new();
    for id in ids {
        g.add_node(Node::new(*id));
    }
    for (s, t) in edges {
        g.add_edge(*s, *t);
    }
    g
}

fn run(g: &Graph, cfg: &LayoutConfig) -> (Tree, Vec<Point>) {
    let tree = build_tree(g).unwrap().tree;
    let extents = compute_extents(&tree, cfg).unwrap();
    let points = position(&tree, &extents, cfg);
    (tree, points)
}

fn by_id(tree: &Tree, points: &[Point]) -> BTreeMap<String, Point> {
    tree.nodes
        .iter()
        .zip(points)
        .map(|(n, p)| (n.id.clone(), *p))
        .collect()
}

/// Small deterministic generator so property checks do not need an RNG crate.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}

fn random_graph(seed: u64) -> Graph {
    let mut rng = Lcg(seed);
    let n = 2 + (rng.next() % 120) as usize;
    let mut g = Graph::new();
    for i in 0..n {
        let width = 40.0 + (rng.next() % 160) as f64;
        g.add_node(Node::new(format!("n{i}")).with_size(width, 30.0));
    }
    for i in 1..n {
        let parent = (rng.next() % i as u64) as usize;
        g.add_edge(format!("n{parent}"), format!("n{i}"));
    }
    g
}

#[test]
fn position_places_a_single_node_at_the_origin() {
    let (tree, points) = run(&graph(&["solo"], &[]), &config(20.0));
    assert!(tree.root().children.is_empty());
    assert_eq!(points, vec![Point::new(0.0, 0.0)]);
}

#[test]
fn position_lays_out_a_balanced_binary_tree() {
    let g = graph(
        &["r", "a", "b", "a1", "a2", "b1", "b2"],
        &[
            ("r", "a"),
            ("r", "b"),
            ("a", "a1"),
            ("a", "a2"),
            ("b", "b1"),
            ("b", "b2"),
        ],
    );
    let (tree, points) = run(&g, &config(20.0));
    let p = by_id(&tree, &points);

    assert_eq!(p["a2"].x - p["a1"].x, 120.0);
    assert_eq!(p["b2"].x - p["b1"].x, 120.0);
    // Each subtree is 220 wide; their halves plus the spacing keep them from crossing.
    assert_eq!(p["b"].x - p["a"].x, 240.0);
    assert_eq!(p["b1"].x - p["a2"].x, 120.0);

    assert_eq!(p["r"], Point::new(0.0, 0.0));
    assert_eq!(p["a"], Point::new(-120.0, 150.0));
    assert_eq!(p["b1"], Point::new(60.0, 300.0));
}

#[test]
fn position_spreads_small_subtrees_evenly_between_conflicting_neighbours() {
    let mut ids = vec!["r", "L", "m1", "m2", "R"];
    let left: Vec<String> = (1..=5).map(|i| format!("l{i}")).collect();
    let right: Vec<String> = (1..=5).map(|i| format!("r{i}")).collect();
    ids.extend(left.iter().map(String::as_str));
    ids.extend(right.iter().map(String::as_str));
    let mut edges = vec![("r", "L"), ("r", "m1"), ("r", "m2"), ("r", "R")];
    edges.extend(left.iter().map(|l| ("L", l.as_str())));
    edges.extend(right.iter().map(|r| ("R", r.as_str())));

    let (tree, points) = run(&graph(&ids, &edges), &config(20.0));
    let p = by_id(&tree, &points);

    // L and R collide two levels down; the shift is shared by m1 and m2 instead of being dumped
    // on R alone.
    assert_eq!(p["m1"].x - p["L"].x, 200.0);
    assert_eq!(p["m2"].x - p["m1"].x, 200.0);
    assert_eq!(p["R"].x - p["m2"].x, 200.0);
    assert_eq!(p["r1"].x - p["l5"].x, 120.0);
    assert_eq!(p["r"].x, 0.0);
}

#[test]
fn position_honors_declared_widths_between_siblings() {
    let mut g = graph(&["r"], &[]);
    g.add_node(Node::new("narrow").with_size(100.0, 40.0))
        .add_node(Node::new("wide").with_size(300.0, 40.0))
        .add_node(Node::new("tiny").with_size(50.0, 40.0));
    g.add_edge("r", "narrow")
        .add_edge("r", "wide")
        .add_edge("r", "tiny");

    let (tree, points) = run(&g, &config(10.0));
    let p = by_id(&tree, &points);
    assert_eq!(p["wide"].x - p["narrow"].x, 210.0);
    assert_eq!(p["tiny"].x - p["wide"].x, 185.0);
}

#[test]
fn position_lets_nodes_touch_with_zero_spacing() {
    let g = graph(&["r", "a", "b", "c"], &[("r", "a"), ("r", "b"), ("r", "c")]);
    let (tree, points) = run(&g, &config(0.0));
    let p = by_id(&tree, &points);
    assert_eq!(p["b"].x - p["a"].x, 100.0);
    assert_eq!(p["c"].x - p["b"].x, 100.0);
    assert_eq!(p["b"].x, 0.0);
}

#[test]
fn position_keeps_deep_chains_in_one_column() {
    let n = 10_000;
    let mut g = Graph::new();
    for i in 0..n {
        g.add_node(Node::new(format!("n{i}")));
    }
    for i in 1..n {
        g.add_edge(format!("n{}", i - 1), format!("n{i}"));
    }
    let cfg = config(20.0);
    let (tree, points) = run(&g, &cfg);
    for (node, p) in tree.nodes.iter().zip(&points) {
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, node.level as f64 * cfg.level_spacing);
    }
}

#[test]
fn position_maps_depth_to_y_independent_of_shape() {
    for seed in 0..20 {
        let cfg = config(15.0);
        let (tree, points) = run(&random_graph(seed), &cfg);
        for (node, p) in tree.nodes.iter().zip(&points) {
            assert_eq!(p.y, node.level as f64 * cfg.level_spacing);
        }
    }
}

#[test]
fn position_never_overlaps_nodes_on_the_same_level() {
    for seed in 0..150 {
        let g = random_graph(seed);
        let cfg = config([0.0, 10.0, 25.0][(seed % 3) as usize]);
        let (tree, points) = run(&g, &cfg);
        let widths: Vec<f64> = tree.nodes.iter().map(|n| n.width.unwrap()).collect();

        let mut rows: BTreeMap<usize, Vec<(f64, f64)>> = BTreeMap::new();
        for (idx, node) in tree.nodes.iter().enumerate() {
            rows.entry(node.level)
                .or_default()
                .push((points[idx].x, widths[idx]));
        }
        for (level, mut row) in rows {
            row.sort_by(|a, b| a.0.total_cmp(&b.0));
            for pair in row.windows(2) {
                let (xa, wa) = pair[0];
                let (xb, wb) = pair[1];
                let required = (wa + wb) / 2.0 + cfg.sibling_spacing;
                assert!(
                    xb - xa >= required - 1e-6,
                    "seed {seed}, level {level}: gap {} < {required}",
                    xb - xa
                );
            }
        }

        for (idx, node) in tree.nodes.iter().enumerate() {
            for pair in node.children.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                let required = (widths[a] + widths[b]) / 2.0 + cfg.sibling_spacing;
                assert!(points[b].x - points[a].x >= required - 1e-6);
            }
            if let (Some(&first), Some(&last)) = (node.children.first(), node.children.last()) {
                let mid = (points[first].x + points[last].x) / 2.0;
                assert!(
                    (points[idx].x - mid).abs() < 1e-6,
                    "seed {seed}: parent {} is not centered over its children",
                    node.id
                );
            }
        }
    }
}

#[test]
fn position_is_deterministic() {
    for seed in [3, 17, 99] {
        let g = random_graph(seed);
        let cfg = config(12.5);
        let (_, first) = run(&g, &cfg);
        let (_, second) = run(&g, &cfg);
        let bits = |ps: &[Point]| -> Vec<(u64, u64)> {
            ps.iter().map(|p| (p.x.to_bits(), p.y.to_bits())).collect()
        };
        assert_eq!(bits(&first), bits(&second));
    }
}
