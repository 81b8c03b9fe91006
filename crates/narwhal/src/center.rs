use crate::graph::{Bounds, PlacedNode, Point};

/// Translations smaller than this (on both axes) are skipped, which keeps centering idempotent
/// under floating point rounding.
const CENTER_EPSILON: f64 = 1e-9;

/// Axis-aligned box around every node's footprint.
pub fn bounds(nodes: &[PlacedNode]) -> Option<Bounds> {
    let mut iter = nodes.iter();
    let first = iter.next()?;
    let mut b = Bounds {
        min_x: first.left(),
        min_y: first.top(),
        max_x: first.right(),
        max_y: first.bottom(),
    };
    for n in iter {
        b.min_x = b.min_x.min(n.left());
        b.min_y = b.min_y.min(n.top());
        b.max_x = b.max_x.max(n.right());
        b.max_y = b.max_y.max(n.bottom());
    }
    if !(b.min_x.is_finite() && b.min_y.is_finite() && b.max_x.is_finite() && b.max_y.is_finite())
    {
        return None;
    }
    Some(b)
}

/// Moves all nodes so the center of their bounding box lands on `origin`.
///
/// Returns the translation that was applied, or `None` when there was nothing to move.
pub fn center_on(nodes: &mut [PlacedNode], origin: Point) -> Option<Point> {
    let center = bounds(nodes)?.center();
    let dx = origin.x - center.x;
    let dy = origin.y - center.y;
    if dx.abs() < CENTER_EPSILON && dy.abs() < CENTER_EPSILON {
        return None;
    }
    translate(nodes, dx, dy);
    Some(Point { x: dx, y: dy })
}

pub fn translate(nodes: &mut [PlacedNode], dx: f64, dy: f64) {
    for n in nodes {
        n.position.x += dx;
        n.position.y += dy;
    }
}
