/// Graph shapes that cannot be laid out as a single rooted tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructuralError {
    #[error("graph has no nodes")]
    EmptyGraph,

    #[error("graph has no root: every node has an incoming edge")]
    NoRoot,

    #[error("graph has multiple roots: {}", roots.join(", "))]
    MultipleRoots { roots: Vec<String> },

    #[error("cycle detected at node `{node}`")]
    Cycle { node: String },

    #[error("node `{node}` is reachable from more than one parent")]
    SharedChild { node: String },

    #[error("duplicate node id `{id}`")]
    DuplicateNode { id: String },

    #[error("edge `{from}` -> `{to}` references a missing node")]
    MissingEndpoint { from: String, to: String },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid graph, cannot lay out: {0}")]
    Structural(#[from] StructuralError),

    #[error("invalid layout option `{option}`: {value} (must be {requirement})")]
    InvalidConfig {
        option: &'static str,
        value: f64,
        requirement: &'static str,
    },

    #[error("node `{id}` has an invalid footprint {width}x{height}")]
    InvalidFootprint { id: String, width: f64, height: f64 },

    #[error("layout JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// `true` when the graph itself prevented layout (as opposed to bad options or JSON).
    pub fn is_structural(&self) -> bool {
        matches!(self, Error::Structural(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
