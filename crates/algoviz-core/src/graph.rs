//! Directed graph shown by the SCC visualization.

/// A positioned graph vertex.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphNode {
    pub id: usize,
    pub value: i64,
    pub x: f64,
    pub y: f64,
}

/// Directed edge `source -> target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphEdge {
    pub source: usize,
    pub target: usize,
    pub weight: Option<u32>,
}

impl GraphEdge {
    pub fn new(source: usize, target: usize) -> Self {
        Self {
            source,
            target,
            weight: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    /// Unpositioned graph with nodes `0..n` and the given edges.
    pub fn with_edges(n: usize, edges: &[(usize, usize)]) -> Self {
        Self {
            nodes: (0..n)
                .map(|id| GraphNode {
                    id,
                    value: id as i64,
                    x: 0.0,
                    y: 0.0,
                })
                .collect(),
            edges: edges.iter().map(|&(s, t)| GraphEdge::new(s, t)).collect(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Outgoing adjacency lists; edges pointing outside the node set are skipped.
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        let n = self.nodes.len();
        let mut adj = vec![Vec::new(); n];
        for e in &self.edges {
            if e.source < n && e.target < n {
                adj[e.source].push(e.target);
            }
        }
        adj
    }

    /// Same vertices with every edge reversed.
    pub fn transpose(&self) -> Graph {
        Graph {
            nodes: self.nodes.clone(),
            edges: self
                .edges
                .iter()
                .map(|e| GraphEdge {
                    source: e.target,
                    target: e.source,
                    weight: e.weight,
                })
                .collect(),
        }
    }

    pub fn has_edge(&self, source: usize, target: usize) -> bool {
        self.edges
            .iter()
            .any(|e| e.source == source && e.target == target)
    }
}
