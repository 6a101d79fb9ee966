//! Algoviz Core
//!
//! Data model shared by the step generators and the replay engine.
//!
//! # Architecture
//!
//! - **Steps**: `AnimationStep`, the closed vocabulary every generator emits
//! - **Grid**: row-major board of `Node`s with coordinate back-references
//! - **Tree**: owned binary tree nodes with stable ids
//! - **Graph**: directed graph for component visualizations
//! - **Table**: labeled DP table
//!
//! Enable the `serde` feature to put any of these on the wire.

mod error;
mod graph;
mod grid;
mod step;
mod table;
mod tree;

pub use error::{Error, Result};
pub use graph::{Graph, GraphEdge, GraphNode};
pub use grid::{Coord, Grid, Node, NodeStatus, DEFAULT_COLS, DEFAULT_FINISH, DEFAULT_ROWS, DEFAULT_START};
pub use step::{AnimationStep, StepLog, Verdict};
pub use table::{DpTable, TableValue};
pub use tree::{height, NodeId, TreeNode};
