//! Extent Calculator: resolves every node's footprint.

use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::graph::Size;
use crate::tree::Tree;

/// One `Size` per tree node, indexed like `tree.nodes`.
pub fn compute_extents(tree: &Tree, config: &LayoutConfig) -> Result<Vec<Size>> {
    tree.nodes
        .iter()
        .map(|n| resolve_size(&n.id, n.width, n.height, config))
        .collect()
}

/// Declared dimensions win; missing ones fall back to the configured defaults.
pub fn resolve_size(
    id: &str,
    width: Option<f64>,
    height: Option<f64>,
    config: &LayoutConfig,
) -> Result<Size> {
    let size = Size {
        width: width.unwrap_or(config.node_width),
        height: height.unwrap_or(config.node_height),
    };
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(size.width) || !valid(size.height) {
        return Err(Error::InvalidFootprint {
            id: id.to_string(),
            width: size.width,
            height: size.height,
        });
    }
    Ok(size)
}
