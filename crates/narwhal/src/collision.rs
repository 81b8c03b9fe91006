//! Bounded pairwise relaxation that pushes overlapping nodes on the same or adjacent levels apart.
//!
//! This is a best-effort cleanup pass, not a simulation run to convergence: it stops after the
//! first pass without a collision or after `max_iterations` passes, whichever comes first, and
//! reports whatever overlap is left.

use crate::config::CollisionOptions;
use crate::graph::PlacedNode;
use serde::Serialize;
use std::collections::BTreeMap;

/// Distances below this are treated as coincident centers.
const COINCIDENT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollisionReport {
    /// Relaxation passes that were run (including the final clean one, if any).
    pub iterations: usize,
    /// `true` when the last pass found no colliding pair.
    pub resolved: bool,
    /// Colliding pairs left after the last pass.
    pub residual_overlaps: usize,
}

pub fn resolve_collisions(nodes: &mut [PlacedNode], opts: &CollisionOptions) -> CollisionReport {
    let pairs = candidate_pairs(nodes);
    let mut report = CollisionReport::default();

    while report.iterations < opts.max_iterations {
        report.iterations += 1;
        let mut collisions = 0usize;
        for &(i, j) in &pairs {
            if relax_pair(nodes, i, j, opts) {
                collisions += 1;
            }
        }
        tracing::trace!(iteration = report.iterations, collisions, "collision pass");
        if collisions == 0 {
            report.resolved = true;
            return report;
        }
    }

    report.residual_overlaps = count_pair_overlaps(nodes, &pairs, opts.margin);
    report.resolved = report.residual_overlaps == 0;
    if !report.resolved {
        tracing::warn!(
            iterations = report.iterations,
            residual = report.residual_overlaps,
            "collision resolution hit the iteration cap"
        );
    }
    report
}

/// Number of same-or-adjacent-level pairs that are closer than the collision threshold.
pub fn count_overlaps(nodes: &[PlacedNode], margin: f64) -> usize {
    count_pair_overlaps(nodes, &candidate_pairs(nodes), margin)
}

fn count_pair_overlaps(nodes: &[PlacedNode], pairs: &[(usize, usize)], margin: f64) -> usize {
    pairs
        .iter()
        .filter(|&&(i, j)| {
            let (_, _, dist) = separation(&nodes[i], &nodes[j]);
            dist < threshold(&nodes[i], &nodes[j], margin)
        })
        .count()
}

/// Index pairs `(i, j)` with `i < j` whose levels differ by at most one, in a fixed order.
fn candidate_pairs(nodes: &[PlacedNode]) -> Vec<(usize, usize)> {
    let mut by_level: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (idx, n) in nodes.iter().enumerate() {
        by_level.entry(n.level).or_default().push(idx);
    }

    let mut pairs: Vec<(usize, usize)> = Vec::new();
    for (&level, members) in &by_level {
        for (k, &a) in members.iter().enumerate() {
            for &b in &members[k + 1..] {
                pairs.push((a.min(b), a.max(b)));
            }
        }
        if let Some(below) = level.checked_add(1).and_then(|l| by_level.get(&l)) {
            for &a in members {
                for &b in below {
                    pairs.push((a.min(b), a.max(b)));
                }
            }
        }
    }
    pairs.sort_unstable();
    pairs
}

fn threshold(a: &PlacedNode, b: &PlacedNode, margin: f64) -> f64 {
    a.size.width.max(b.size.width) + margin
}

fn separation(a: &PlacedNode, b: &PlacedNode) -> (f64, f64, f64) {
    let dx = b.position.x - a.position.x;
    let dy = b.position.y - a.position.y;
    (dx, dy, dx.hypot(dy))
}

/// Pushes `i` and `j` apart when they collide. Returns whether they did.
fn relax_pair(nodes: &mut [PlacedNode], i: usize, j: usize, opts: &CollisionOptions) -> bool {
    let (dx, dy, dist) = separation(&nodes[i], &nodes[j]);
    let min_dist = threshold(&nodes[i], &nodes[j], opts.margin);
    if dist >= min_dist {
        return false;
    }

    let (ux, uy) = if dist < COINCIDENT_EPSILON {
        (1.0, 0.0)
    } else {
        (dx / dist, dy / dist)
    };
    let half = (min_dist - dist) / 2.0;
    let move_x = half * ux;
    let move_y = half * uy * opts.vertical_damping;

    nodes[i].position.x -= move_x;
    nodes[i].position.y -= move_y;
    nodes[j].position.x += move_x;
    nodes[j].position.y += move_y;
    true
}
