//! Tree Builder: reduces a flat node/edge graph to a single rooted tree.

use crate::error::{Result, StructuralError};
use crate::graph::Graph;
use rustc_hash::FxHashMap as HashMap;

/// Arena-backed rooted tree. Index 0 is the root and indices follow preorder.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub id: String,
    pub level: usize,
    pub parent: Option<usize>,
    /// Ordered by edge insertion order.
    pub children: Vec<usize>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl Tree {
    pub const ROOT: usize = 0;

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> &TreeNode {
        &self.nodes[Self::ROOT]
    }

    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.level).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltTree {
    pub tree: Tree,
    /// Nodes unreachable from the root, in input order. They are excluded from layout.
    pub orphans: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unseen,
    OnPath,
    Done,
}

pub fn build_tree(graph: &Graph) -> Result<BuiltTree> {
    if graph.nodes.is_empty() {
        return Err(StructuralError::EmptyGraph.into());
    }

    let mut index: HashMap<&str, usize> = HashMap::default();
    for (idx, n) in graph.nodes.iter().enumerate() {
        if index.insert(n.id.as_str(), idx).is_some() {
            return Err(StructuralError::DuplicateNode { id: n.id.clone() }.into());
        }
    }

    let mut out: Vec<Vec<usize>> = vec![Vec::new(); graph.nodes.len()];
    let mut in_degree: Vec<usize> = vec![0; graph.nodes.len()];
    for e in &graph.edges {
        let (Some(&s), Some(&t)) = (index.get(e.source.as_str()), index.get(e.target.as_str()))
        else {
            return Err(StructuralError::MissingEndpoint {
                from: e.source.clone(),
                to: e.target.clone(),
            }
            .into());
        };
        out[s].push(t);
        in_degree[t] += 1;
    }

    let root = select_root(graph, &in_degree)?;

    let mut state = vec![Visit::Unseen; graph.nodes.len()];
    let mut nodes: Vec<TreeNode> = Vec::with_capacity(graph.nodes.len());
    nodes.push(tree_node(graph, root, 0, None));
    state[root] = Visit::OnPath;

    // (graph index, arena index, next outgoing edge to follow)
    let mut stack: Vec<(usize, usize, usize)> = vec![(root, Tree::ROOT, 0)];
    while let Some(frame) = stack.last_mut() {
        let (g, a, cursor) = *frame;
        let Some(&child) = out[g].get(cursor) else {
            state[g] = Visit::Done;
            stack.pop();
            continue;
        };
        frame.2 += 1;

        match state[child] {
            Visit::OnPath => {
                return Err(StructuralError::Cycle {
                    node: graph.nodes[child].id.clone(),
                }
                .into());
            }
            Visit::Done => {
                return Err(StructuralError::SharedChild {
                    node: graph.nodes[child].id.clone(),
                }
                .into());
            }
            Visit::Unseen => {
                let child_arena = nodes.len();
                let level = nodes[a].level + 1;
                nodes.push(tree_node(graph, child, level, Some(a)));
                nodes[a].children.push(child_arena);
                state[child] = Visit::OnPath;
                stack.push((child, child_arena, 0));
            }
        }
    }

    let orphans: Vec<String> = graph
        .nodes
        .iter()
        .zip(&state)
        .filter(|(_, s)| **s == Visit::Unseen)
        .map(|(n, _)| n.id.clone())
        .collect();
    if !orphans.is_empty() {
        tracing::warn!(
            count = orphans.len(),
            orphans = ?orphans,
            "excluding nodes unreachable from the root"
        );
    }

    Ok(BuiltTree {
        tree: Tree { nodes },
        orphans,
    })
}

fn select_root(graph: &Graph, in_degree: &[usize]) -> Result<usize> {
    let flagged: Vec<usize> = graph
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, n)| n.is_root)
        .map(|(idx, _)| idx)
        .collect();
    match flagged.as_slice() {
        [only] => return Ok(*only),
        [] => {}
        many => return Err(multiple_roots(graph, many)),
    }

    let sources: Vec<usize> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, d)| **d == 0)
        .map(|(idx, _)| idx)
        .collect();
    match sources.as_slice() {
        [only] => Ok(*only),
        [] => Err(StructuralError::NoRoot.into()),
        many => Err(multiple_roots(graph, many)),
    }
}

fn multiple_roots(graph: &Graph, candidates: &[usize]) -> crate::Error {
    StructuralError::MultipleRoots {
        roots: candidates
            .iter()
            .map(|&idx| graph.nodes[idx].id.clone())
            .collect(),
    }
    .into()
}

fn tree_node(graph: &Graph, idx: usize, level: usize, parent: Option<usize>) -> TreeNode {
    let n = &graph.nodes[idx];
    TreeNode {
        id: n.id.clone(),
        level,
        parent,
        children: Vec::new(),
        width: n.width,
        height: n.height,
    }
}
