//! Two-pass tidy tree positioning (Walker's algorithm with Buchheim et al.'s linear-time
//! apportioning).
//!
//! The first walk visits nodes bottom-up and assigns each one a preliminary x coordinate relative
//! to its parent's frame, pushing neighbouring subtrees apart where their contours would overlap.
//! The second walk runs top-down and turns the accumulated modifiers into absolute coordinates.
//!
//! All per-node state lives in one arena indexed exactly like [`Tree::nodes`]; sibling, thread and
//! ancestor links are plain indices.

mod apportion;

use crate::config::LayoutConfig;
use crate::graph::{Point, Size};
use crate::tree::Tree;

#[derive(Debug, Clone)]
struct LayoutNode {
    level: usize,
    parent: Option<usize>,
    children: Vec<usize>,
    /// Position among siblings, left to right.
    number: usize,
    left_sibling: Option<usize>,
    width: f64,

    prelim: f64,
    /// Horizontal offset applied to every descendant. Stays 0 for leaves.
    modifier: f64,
    /// Midpoint of the first and last child once the children are arranged.
    children_center: f64,

    /// Next node on the contour when this node has no children of its own.
    thread: Option<usize>,
    /// Contour offset compensation that goes with `thread`.
    thread_offset: f64,
    ancestor: usize,
    shift: f64,
    change: f64,
}

impl LayoutNode {
    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

struct Walker {
    nodes: Vec<LayoutNode>,
    sibling_spacing: f64,
}

/// Computes one center point per tree node (indexed like `tree.nodes`).
///
/// The root lands on `x = 0`; `y = level * level_spacing`. Total over any valid tree.
pub fn position(tree: &Tree, extents: &[Size], config: &LayoutConfig) -> Vec<Point> {
    if tree.is_empty() {
        return Vec::new();
    }

    let mut walker = Walker::new(tree, extents, config.sibling_spacing);
    walker.first_walk();
    let points = walker.second_walk(config.level_spacing);

    tracing::debug!(
        nodes = points.len(),
        depth = tree.depth(),
        "tidy tree positions computed"
    );
    points
}

impl Walker {
    fn new(tree: &Tree, extents: &[Size], sibling_spacing: f64) -> Self {
        let mut nodes: Vec<LayoutNode> = tree
            .nodes
            .iter()
            .enumerate()
            .map(|(idx, n)| LayoutNode {
                level: n.level,
                parent: n.parent,
                children: n.children.clone(),
                number: 0,
                left_sibling: None,
                width: extents.get(idx).map(|s| s.width).unwrap_or(0.0),
                prelim: 0.0,
                modifier: 0.0,
                children_center: 0.0,
                thread: None,
                thread_offset: 0.0,
                ancestor: idx,
                shift: 0.0,
                change: 0.0,
            })
            .collect();

        for v in 0..nodes.len() {
            for i in 0..nodes[v].children.len() {
                let child = nodes[v].children[i];
                let left = i.checked_sub(1).map(|l| nodes[v].children[l]);
                nodes[child].number = i;
                nodes[child].left_sibling = left;
            }
        }

        Self {
            nodes,
            sibling_spacing: sibling_spacing.max(0.0),
        }
    }

    /// Required center-to-center distance between two horizontally adjacent nodes.
    fn distance(&self, a: usize, b: usize) -> f64 {
        ((self.nodes[a].width + self.nodes[b].width) / 2.0 + self.sibling_spacing).max(0.0)
    }

    fn first_walk(&mut self) {
        // Arena indices are preorder, so walking them backwards reaches every node after all of
        // its descendants.
        for v in (0..self.nodes.len()).rev() {
            if !self.nodes[v].is_leaf() {
                self.arrange_children(v);
            }
        }
        self.place(Tree::ROOT);
    }

    /// Places `v`'s children left to right, resolving contour conflicts as each one is added.
    fn arrange_children(&mut self, v: usize) {
        let count = self.nodes[v].children.len();
        let mut default_ancestor = self.nodes[v].children[0];
        for i in 0..count {
            let w = self.nodes[v].children[i];
            self.place(w);
            default_ancestor = self.apportion(w, default_ancestor);
        }
        self.execute_shifts(v);

        let first = self.nodes[v].children[0];
        let last = self.nodes[v].children[count - 1];
        self.nodes[v].children_center = (self.nodes[first].prelim + self.nodes[last].prelim) / 2.0;
    }

    /// Sets `w`'s preliminary x next to its left sibling (or over its children when it has none).
    fn place(&mut self, w: usize) {
        let own = if self.nodes[w].is_leaf() {
            0.0
        } else {
            self.nodes[w].children_center
        };
        match self.nodes[w].left_sibling {
            Some(l) => {
                let prelim = self.nodes[l].prelim + self.distance(l, w);
                self.nodes[w].prelim = prelim;
                if !self.nodes[w].is_leaf() {
                    self.nodes[w].modifier = prelim - own;
                }
            }
            None => self.nodes[w].prelim = own,
        }
    }

    fn second_walk(&self, level_spacing: f64) -> Vec<Point> {
        let root_prelim = self.nodes[Tree::ROOT].prelim;
        let mut offset: Vec<f64> = vec![0.0; self.nodes.len()];
        let mut points: Vec<Point> = Vec::with_capacity(self.nodes.len());
        for (v, n) in self.nodes.iter().enumerate() {
            if let Some(p) = n.parent {
                offset[v] = offset[p] + self.nodes[p].modifier;
            }
            points.push(Point {
                x: n.prelim + offset[v] - root_prelim,
                y: n.level as f64 * level_spacing,
            });
        }
        points
    }
}
