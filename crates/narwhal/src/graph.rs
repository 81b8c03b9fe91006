use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Input graph: a flat node list plus directed parent -> child edges.
///
/// Edge order is significant: a node's children are laid out left to right in the order their
/// edges appear here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deserializes a `{ "nodes": [...], "edges": [...] }` JSON value.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        Ok(Graph::deserialize(value)?)
    }

    pub fn add_node(&mut self, node: Node) -> &mut Self {
        self.nodes.push(node);
        self
    }

    pub fn add_edge(&mut self, source: impl Into<String>, target: impl Into<String>) -> &mut Self {
        self.edges.push(Edge {
            source: source.into(),
            target: target.into(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    /// Declared footprint; `None` falls back to `LayoutConfig::node_width`.
    #[serde(default)]
    pub width: Option<f64>,
    /// Declared footprint; `None` falls back to `LayoutConfig::node_height`.
    #[serde(default)]
    pub height: Option<f64>,
    /// Marks the semantic root (the mind-map "subject"). Wins over in-degree based detection.
    #[serde(default)]
    pub is_root: bool,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            width: None,
            height: None,
            is_root: false,
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn root(mut self) -> Self {
        self.is_root = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned box in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point {
            x: (self.min_x + self.max_x) / 2.0,
            y: (self.min_y + self.max_y) / 2.0,
        }
    }
}

/// A node with a resolved footprint and a center position.
///
/// This is the unit shared by the pipeline output, the collision resolver, the centering pass and
/// the incremental child placer, so their results can be fed into one another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedNode {
    pub id: String,
    pub level: usize,
    pub position: Point,
    pub size: Size,
}

impl PlacedNode {
    pub fn left(&self) -> f64 {
        self.position.x - self.size.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.position.x + self.size.width / 2.0
    }

    pub fn top(&self) -> f64 {
        self.position.y - self.size.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.position.y + self.size.height / 2.0
    }
}
