//! Live state the renderer draws from.
//!
//! [`VisualState`] is the only thing the replay engine mutates. Each
//! [`AnimationStep`] is applied exactly once, in order, by
//! [`VisualState::apply`]. Steps naming positions outside the current data
//! are skipped with a `debug!` trace so a stale log can never panic the
//! engine.

use algoviz_algorithms::distribution::BUCKET_COUNT;
use algoviz_core::{
    AnimationStep, Coord, DpTable, Graph, Grid, NodeId, NodeStatus, TreeNode, Verdict,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tree traversal progress shown next to the tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraversalView {
    pub visited: Vec<NodeId>,
    pub active: Option<NodeId>,
    /// Values visited so far, joined with `" -> "`.
    pub result: String,
}

impl TraversalView {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Everything the rendering collaborator observes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualState {
    pub array: Vec<i64>,
    pub grid: Grid,
    pub tree: Option<TreeNode>,
    pub graph: Graph,
    pub dp_table: DpTable,
    pub aux: Vec<i64>,
    pub buckets: Vec<Vec<i64>>,
    /// Array slots lifted into a bucket.
    pub hidden: Vec<usize>,
    pub highlight: Vec<usize>,
    pub swapped: Vec<usize>,
    pub found: Vec<usize>,
    pub target: Vec<usize>,
    pub verdict: Option<Verdict>,
    /// Index of the last applied step.
    pub current_step: Option<usize>,
    pub is_playing: bool,
    /// Set when a run finishes without being stopped.
    pub is_sorted: bool,
    pub traversal: TraversalView,
}

impl Default for VisualState {
    fn default() -> Self {
        Self {
            array: Vec::new(),
            grid: Grid::default(),
            tree: None,
            graph: Graph::default(),
            dp_table: DpTable::default(),
            aux: Vec::new(),
            buckets: vec![Vec::new(); BUCKET_COUNT],
            hidden: Vec::new(),
            highlight: Vec::new(),
            swapped: Vec::new(),
            found: Vec::new(),
            target: Vec::new(),
            verdict: None,
            current_step: None,
            is_playing: false,
            is_sorted: false,
            traversal: TraversalView::default(),
        }
    }
}

impl VisualState {
    /// Apply the mutation of one step.
    pub fn apply(&mut self, step: &AnimationStep) {
        match step {
            AnimationStep::Compare { indices } => {
                self.highlight.clone_from(indices);
                self.swapped.clear();
            }
            AnimationStep::Swap { indices: [a, b] } => {
                self.swapped = vec![*a, *b];
                self.highlight.clear();
                if *a < self.array.len() && *b < self.array.len() {
                    self.array.swap(*a, *b);
                } else {
                    debug!("swap [{}, {}] outside array of {}", a, b, self.array.len());
                }
            }
            AnimationStep::Overwrite { indices, value } => {
                self.highlight.clone_from(indices);
                self.swapped.clear();
                if let Some(value) = value {
                    for &i in indices {
                        match self.array.get_mut(i) {
                            Some(slot) => *slot = *value,
                            None => debug!("overwrite [{}] outside array of {}", i, self.array.len()),
                        }
                    }
                }
            }
            AnimationStep::Highlight { indices, verdict } => {
                self.highlight.clone_from(indices);
                self.verdict = *verdict;
            }
            AnimationStep::Visit { indices } => self.mark_cell(indices, NodeStatus::Visited),
            AnimationStep::Path { indices } => self.mark_cell(indices, NodeStatus::Path),
            AnimationStep::Wall { indices } => {
                let Some(node) = cell(indices).and_then(|c| self.grid.get_mut(c)) else {
                    debug!("wall {:?} outside grid", indices);
                    return;
                };
                if !(node.is_start || node.is_finish) {
                    node.is_wall = true;
                    node.status = NodeStatus::Wall;
                }
            }
            AnimationStep::Found { indices } => {
                self.found.clone_from(indices);
                self.highlight.clear();
                self.swapped.clear();
            }
            AnimationStep::Target { indices } => {
                self.target.clone_from(indices);
            }
            AnimationStep::Replace { new_array } => {
                self.array.clone_from(new_array);
                let len = self.array.len();
                self.hidden.retain(|&i| i < len);
            }
            AnimationStep::UpdateAux { indices: [i], value } => {
                if *i >= self.aux.len() {
                    self.aux.resize(*i + 1, 0);
                }
                self.aux[*i] = *value;
            }
            AnimationStep::MoveToBucket {
                indices: [i],
                value,
                bucket,
            } => match self.buckets.get_mut(*bucket) {
                Some(b) => {
                    b.push(*value);
                    if !self.hidden.contains(i) {
                        self.hidden.push(*i);
                    }
                }
                None => debug!("bucket {} does not exist", bucket),
            },
            AnimationStep::Restore {
                indices: [i],
                value,
                bucket,
            } => {
                let Some(slot) = self.array.get_mut(*i) else {
                    debug!("restore [{}] outside array of {}", i, self.array.len());
                    return;
                };
                *slot = *value;
                self.hidden.retain(|h| h != i);
                if let Some(b) = bucket.and_then(|b| self.buckets.get_mut(b)) {
                    if !b.is_empty() {
                        b.remove(0);
                    }
                }
            }
            AnimationStep::UpdateTable { row, col, val } => {
                if !self.dp_table.set(*row, *col, val.clone()) {
                    debug!("table cell [{}, {}] outside {}x{} table", row, col, self.dp_table.rows(), self.dp_table.cols());
                }
            }
        }
    }

    fn mark_cell(&mut self, indices: &[usize], status: NodeStatus) {
        let Some(node) = cell(indices).and_then(|c| self.grid.get_mut(c)) else {
            debug!("{:?} cell {:?} outside grid", status, indices);
            return;
        };
        node.is_visited = true;
        // Endpoints keep their own colour.
        if !(node.is_start || node.is_finish) {
            node.status = status;
        }
    }

    /// Drop the marks a run leaves behind: emphasis, aux track and buckets.
    /// Array, grid, table and tree contents are kept.
    pub fn clear_transient(&mut self) {
        self.highlight.clear();
        self.swapped.clear();
        self.found.clear();
        self.target.clear();
        self.verdict = None;
        self.aux.clear();
        self.buckets = vec![Vec::new(); BUCKET_COUNT];
        self.hidden.clear();
    }

    /// End-of-run cleanup: per-step emphasis goes, terminal marks stay.
    pub fn clear_step_emphasis(&mut self) {
        self.highlight.clear();
        self.swapped.clear();
    }
}

fn cell(indices: &[usize]) -> Option<Coord> {
    match indices {
        [row, col] => Some(Coord::new(*row, *col)),
        _ => None,
    }
}
