//! Strongly connected components (Kosaraju) and random graph generation.

use std::f64::consts::PI;

use algoviz_core::{AnimationStep, Graph, GraphEdge, GraphNode, StepLog};
use rand::Rng;

/// Node count of a generated graph.
pub const GRAPH_NODES: usize = 8;
/// Centre of the circle generated nodes are placed on.
pub const GRAPH_CENTER: (f64, f64) = (400.0, 250.0);
pub const GRAPH_RADIUS: f64 = 200.0;

/// Random directed graph on a circle.
///
/// A random spanning tree (edge direction picked per edge) keeps the graph
/// weakly connected; every node then gets one or two extra outgoing edges
/// to random targets. Self-loops and duplicate edges are skipped.
pub fn random_graph<R: Rng + ?Sized>(rng: &mut R) -> Graph {
    random_graph_with(GRAPH_NODES, rng)
}

pub fn random_graph_with<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Graph {
    let (cx, cy) = GRAPH_CENTER;
    let nodes = (0..n)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / n as f64;
            GraphNode {
                id: i,
                value: i as i64,
                x: cx + GRAPH_RADIUS * angle.cos(),
                y: cy + GRAPH_RADIUS * angle.sin(),
            }
        })
        .collect();
    let mut graph = Graph {
        nodes,
        edges: Vec::new(),
    };

    fn add(graph: &mut Graph, s: usize, t: usize) {
        if s != t && !graph.has_edge(s, t) {
            graph.edges.push(GraphEdge::new(s, t));
        }
    }
    for i in 1..n {
        let j = rng.gen_range(0..i);
        if rng.gen_bool(0.5) {
            add(&mut graph, i, j);
        } else {
            add(&mut graph, j, i);
        }
    }
    for i in 0..n {
        let extra = rng.gen_range(1..=2);
        for _ in 0..extra {
            let t = rng.gen_range(0..n);
            add(&mut graph, i, t);
        }
    }
    graph
}

/// Kosaraju's two-pass SCC.
///
/// Every node starts with component `-1` in the aux track. The first pass
/// runs DFS on the graph, emitting `compare [u]` on discovery and
/// `highlight [u]` when `u` is pushed on the finish stack. The second pass
/// pops that stack and floods the transposed graph, giving each node
/// reached `updateAux [v] = component` followed by `found [v]`.
pub fn kosaraju(graph: &Graph) -> StepLog {
    let mut steps = StepLog::new();
    let n = graph.node_count();
    for v in 0..n {
        steps.push(AnimationStep::update_aux(v, -1));
    }

    let adj = graph.adjacency();
    let mut seen = vec![false; n];
    let mut finished = Vec::with_capacity(n);
    for root in 0..n {
        if seen[root] {
            continue;
        }
        seen[root] = true;
        steps.push(AnimationStep::compare([root]));
        // (node, index of the next edge to follow)
        let mut stack = vec![(root, 0usize)];
        while let Some(top) = stack.last_mut() {
            let (u, next) = *top;
            if let Some(&v) = adj[u].get(next) {
                top.1 += 1;
                if !seen[v] {
                    seen[v] = true;
                    steps.push(AnimationStep::compare([v]));
                    stack.push((v, 0));
                }
            } else {
                stack.pop();
                finished.push(u);
                steps.push(AnimationStep::highlight([u]));
            }
        }
    }

    let radj = graph.transpose().adjacency();
    let mut component = vec![None; n];
    let mut count = 0i64;
    while let Some(root) = finished.pop() {
        if component[root].is_some() {
            continue;
        }
        component[root] = Some(count);
        let mut stack = vec![root];
        while let Some(v) = stack.pop() {
            steps.push(AnimationStep::update_aux(v, count));
            steps.push(AnimationStep::found([v]));
            for &w in &radj[v] {
                if component[w].is_none() {
                    component[w] = Some(count);
                    stack.push(w);
                }
            }
        }
        count += 1;
    }
    steps
}

/// Final component id per node, read back from the aux track of a log.
pub fn component_ids(steps: &[AnimationStep], n: usize) -> Vec<i64> {
    let mut ids = vec![-1; n];
    for step in steps {
        if let AnimationStep::UpdateAux { indices, value } = step {
            if let Some(slot) = ids.get_mut(indices[0]) {
                *slot = *value;
            }
        }
    }
    ids
}
