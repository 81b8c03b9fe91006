//! Incremental Child Placer: stacks newly attached children under an already placed parent
//! without touching the rest of the layout.

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::extent::resolve_size;
use crate::graph::{PlacedNode, Point};
use serde::{Deserialize, Serialize};

/// A child being attached to an existing node. Only its own footprint is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildSpec {
    pub id: String,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

impl ChildSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            width: None,
            height: None,
        }
    }
}

/// Places `children` in one column below `parent`: the first one `level_spacing` under it and
/// each following one a further `child_spacing` down.
///
/// The collision resolver is not run; call [`crate::resolve_collisions`] over the affected region
/// when that matters.
pub fn place_children(
    parent: &PlacedNode,
    children: &[ChildSpec],
    config: &LayoutConfig,
) -> Result<Vec<PlacedNode>> {
    config.validate()?;

    let placed = children
        .iter()
        .enumerate()
        .map(|(i, c)| -> Result<PlacedNode> {
            Ok(PlacedNode {
                id: c.id.clone(),
                level: parent.level + 1,
                position: Point {
                    x: parent.position.x,
                    y: parent.position.y + config.level_spacing + i as f64 * config.child_spacing,
                },
                size: resolve_size(&c.id, c.width, c.height, config)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        parent = %parent.id,
        children = placed.len(),
        "placed children incrementally"
    );
    Ok(placed)
}
