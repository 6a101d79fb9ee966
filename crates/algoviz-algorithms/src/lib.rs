//! Algoviz Algorithms
//!
//! Step generators for every visualization. Each generator runs the real
//! algorithm on a private working copy of its input and records what it does
//! as an ordered [`StepLog`](algoviz_core::StepLog). The caller's data is
//! never touched; only the log survives.
//!
//! # Architecture
//!
//! - **Sorting**: comparison sorts in [`sorting`], distribution sorts in
//!   [`distribution`]
//! - **Searching**: linear and binary search over the array
//! - **Pathfinding**: grid searches from Dijkstra to Floyd-Warshall
//! - **Mazes and grid graphs**: wall carving, spanning trees, components
//! - **Puzzles and DP**: N-Queens, Sudoku, knapsack, LCS, LIS
//! - **Strings**: KMP and Rabin-Karp
//! - **Interactive structures**: trees, heaps, stacks, queues, lists and SCC
//!   graphs, driven one user action at a time
//! - **Registry**: the [`Algorithm`] enum and the [`generate_steps`] entry
//!   point
//!
//! # Usage
//!
//! ```rust,ignore
//! use algoviz_algorithms::{generate_steps, Algorithm, Inputs};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let steps = generate_steps(Algorithm::Bubble, &Inputs::array(&[5, 1, 4, 2]), &mut rng);
//! ```

pub mod backtracking;
mod catalog;
pub mod distribution;
pub mod dp;
mod error;
pub mod grid_graph;
pub mod maze;
pub mod pathfinding;
mod pseudocode;
mod registry;
pub mod replay;
pub mod scc;
pub mod searching;
pub mod sorting;
pub mod strings;
pub mod structures;
pub mod tree;

pub use catalog::{AlgorithmInfo, Category, Complexity};
pub use error::ParseError;
pub use pseudocode::{describe, pseudocode, Pseudocode};
pub use registry::{
    generate_steps, run, Algorithm, GridGraphKind, Inputs, Job, MatchKind, MazeKind, PathKind,
    SearchKind, SortKind,
};
