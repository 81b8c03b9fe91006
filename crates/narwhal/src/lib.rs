#![forbid(unsafe_code)]

//! Deterministic hierarchical (tidy tree) layout for mind maps and flowcharts.
//!
//! `narwhal` takes a flat node/edge graph that reduces to a single rooted tree and assigns every
//! node a center point:
//!
//! 1. [`tree::build_tree`] picks the root and rejects cycles, shared children and multiple roots.
//! 2. [`extent::compute_extents`] resolves node footprints against the configured defaults.
//! 3. [`position::position`] runs the two-pass tidy tree algorithm.
//! 4. [`collision::resolve_collisions`] optionally relaxes leftover overlaps.
//! 5. [`center::center_on`] optionally centers the result on a caller supplied origin.
//!
//! [`incremental::place_children`] is a separate, cheap entry point for nodes that gain children
//! after the initial layout.
//!
//! Everything is synchronous and pure: identical inputs always yield bit-identical outputs.

pub mod center;
pub mod collision;
pub mod config;
pub mod error;
pub mod extent;
pub mod graph;
pub mod incremental;
pub mod position;
pub mod tree;

pub use collision::{CollisionReport, resolve_collisions};
pub use config::{CollisionOptions, LayoutConfig};
pub use error::{Error, Result, StructuralError};
pub use graph::{Bounds, Edge, Graph, Node, PlacedNode, Point, Size};
pub use incremental::{ChildSpec, place_children};

use serde::Serialize;
use std::collections::BTreeMap;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    /// Laid out nodes in tree preorder (root first).
    pub nodes: Vec<PlacedNode>,
    /// Final center point per node id, for merging back into the caller's model.
    pub positions: BTreeMap<String, Point>,
    pub diagnostics: Diagnostics,
}

impl LayoutResult {
    pub fn bounds(&self) -> Option<Bounds> {
        center::bounds(&self.nodes)
    }

    pub fn position(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    /// Nodes unreachable from the root; they are absent from the layout.
    pub orphans: Vec<String>,
    /// Present when collision detection ran.
    pub collision: Option<CollisionReport>,
}

impl Diagnostics {
    pub fn residual_overlaps(&self) -> usize {
        self.collision.map(|c| c.residual_overlaps).unwrap_or(0)
    }
}

/// Full layout entry point.
///
/// Structural problems (no single root, cycles, shared children) and invalid options fail the
/// whole call; orphans and residual overlaps are only reported in [`LayoutResult::diagnostics`].
pub fn layout(graph: &Graph, config: &LayoutConfig) -> Result<LayoutResult> {
    config.validate()?;

    let built = tree::build_tree(graph)?;
    let tree = built.tree;
    tracing::debug!(
        nodes = tree.len(),
        orphans = built.orphans.len(),
        root = %tree.root().id,
        "tree built"
    );

    let extents = extent::compute_extents(&tree, config)?;
    let points = position::position(&tree, &extents, config);

    let mut nodes: Vec<PlacedNode> = tree
        .nodes
        .iter()
        .zip(extents)
        .zip(points)
        .map(|((n, size), position)| PlacedNode {
            id: n.id.clone(),
            level: n.level,
            position,
            size,
        })
        .collect();

    let collision = if config.collision_detection {
        Some(collision::resolve_collisions(&mut nodes, &config.collision))
    } else {
        None
    };

    if config.center_alignment {
        if let Some(shift) = center::center_on(&mut nodes, config.origin) {
            tracing::debug!(dx = shift.x, dy = shift.y, "layout centered");
        }
    }

    let positions = nodes
        .iter()
        .map(|n| (n.id.clone(), n.position))
        .collect::<BTreeMap<_, _>>();

    Ok(LayoutResult {
        nodes,
        positions,
        diagnostics: Diagnostics {
            orphans: built.orphans,
            collision,
        },
    })
}
