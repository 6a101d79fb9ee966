//! Step-generation dispatcher.
//!
//! [`Algorithm`] names every visualization. [`Algorithm::prepare`] checks the
//! inputs a family needs and packs them into a [`Job`]; [`run`] turns a job
//! into its step log. [`generate_steps`] chains the two and never fails: bad
//! inputs and user-driven algorithms both produce an empty log.

use std::fmt;
use std::str::FromStr;

use algoviz_core::{Error, Grid, Result, StepLog};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::backtracking::{n_queens, sudoku, QUEENS};
use crate::distribution::{bucket_sort, counting_sort, radix_sort};
use crate::dp::{knapsack, lcs, lis, KnapsackProblem};
use crate::error::ParseError;
use crate::grid_graph::{connected_components, kruskals_mst, prims_mst};
use crate::maze::{binary_tree_maze, prims_maze, recursive_division};
use crate::pathfinding::{
    astar, bellman_ford, bfs, bidirectional, dfs, dijkstra, floyd_warshall, greedy_best_first,
    jump_point_search,
};
use crate::searching::{binary_search, linear_search};
use crate::sorting::{
    bubble_sort, heap_sort, insertion_sort, merge_sort, quick_sort, selection_sort, shell_sort,
};
use crate::strings::{kmp, rabin_karp_with, RabinKarpParams};

/// Every visualization the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Algorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
    Shell,
    Counting,
    Radix,
    Bucket,
    Linear,
    Binary,
    Dijkstra,
    #[cfg_attr(feature = "serde", serde(rename = "ASTAR"))]
    AStar,
    Bfs,
    Dfs,
    GreedyBfs,
    Bidirectional,
    Jps,
    BellmanFord,
    FloydWarshall,
    RecursiveDivision,
    PrimsMaze,
    BinaryTreeMaze,
    Prims,
    Kruskals,
    ConnectedComponents,
    #[cfg_attr(feature = "serde", serde(rename = "NQUEENS"))]
    NQueens,
    Sudoku,
    Knapsack,
    Lcs,
    Lis,
    Kmp,
    RabinKarp,
    Stack,
    Queue,
    LinkedList,
    MinHeap,
    MaxHeap,
    Bst,
    Avl,
    Scc,
}

impl Algorithm {
    pub const ALL: [Algorithm; 42] = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
        Algorithm::Merge,
        Algorithm::Quick,
        Algorithm::Heap,
        Algorithm::Shell,
        Algorithm::Counting,
        Algorithm::Radix,
        Algorithm::Bucket,
        Algorithm::Linear,
        Algorithm::Binary,
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::GreedyBfs,
        Algorithm::Bidirectional,
        Algorithm::Jps,
        Algorithm::BellmanFord,
        Algorithm::FloydWarshall,
        Algorithm::RecursiveDivision,
        Algorithm::PrimsMaze,
        Algorithm::BinaryTreeMaze,
        Algorithm::Prims,
        Algorithm::Kruskals,
        Algorithm::ConnectedComponents,
        Algorithm::NQueens,
        Algorithm::Sudoku,
        Algorithm::Knapsack,
        Algorithm::Lcs,
        Algorithm::Lis,
        Algorithm::Kmp,
        Algorithm::RabinKarp,
        Algorithm::Stack,
        Algorithm::Queue,
        Algorithm::LinkedList,
        Algorithm::MinHeap,
        Algorithm::MaxHeap,
        Algorithm::Bst,
        Algorithm::Avl,
        Algorithm::Scc,
    ];

    /// Wire identifier, e.g. `"GREEDY_BFS"`.
    pub fn id(self) -> &'static str {
        match self {
            Algorithm::Bubble => "BUBBLE",
            Algorithm::Selection => "SELECTION",
            Algorithm::Insertion => "INSERTION",
            Algorithm::Merge => "MERGE",
            Algorithm::Quick => "QUICK",
            Algorithm::Heap => "HEAP",
            Algorithm::Shell => "SHELL",
            Algorithm::Counting => "COUNTING",
            Algorithm::Radix => "RADIX",
            Algorithm::Bucket => "BUCKET",
            Algorithm::Linear => "LINEAR",
            Algorithm::Binary => "BINARY",
            Algorithm::Dijkstra => "DIJKSTRA",
            Algorithm::AStar => "ASTAR",
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::GreedyBfs => "GREEDY_BFS",
            Algorithm::Bidirectional => "BIDIRECTIONAL",
            Algorithm::Jps => "JPS",
            Algorithm::BellmanFord => "BELLMAN_FORD",
            Algorithm::FloydWarshall => "FLOYD_WARSHALL",
            Algorithm::RecursiveDivision => "RECURSIVE_DIVISION",
            Algorithm::PrimsMaze => "PRIMS_MAZE",
            Algorithm::BinaryTreeMaze => "BINARY_TREE_MAZE",
            Algorithm::Prims => "PRIMS",
            Algorithm::Kruskals => "KRUSKALS",
            Algorithm::ConnectedComponents => "CONNECTED_COMPONENTS",
            Algorithm::NQueens => "NQUEENS",
            Algorithm::Sudoku => "SUDOKU",
            Algorithm::Knapsack => "KNAPSACK",
            Algorithm::Lcs => "LCS",
            Algorithm::Lis => "LIS",
            Algorithm::Kmp => "KMP",
            Algorithm::RabinKarp => "RABIN_KARP",
            Algorithm::Stack => "STACK",
            Algorithm::Queue => "QUEUE",
            Algorithm::LinkedList => "LINKED_LIST",
            Algorithm::MinHeap => "MIN_HEAP",
            Algorithm::MaxHeap => "MAX_HEAP",
            Algorithm::Bst => "BST",
            Algorithm::Avl => "AVL",
            Algorithm::Scc => "SCC",
        }
    }

    /// Algorithms driven by user actions instead of a generated log.
    pub fn is_interactive(self) -> bool {
        matches!(
            self,
            Algorithm::Stack
                | Algorithm::Queue
                | Algorithm::LinkedList
                | Algorithm::MinHeap
                | Algorithm::MaxHeap
                | Algorithm::Bst
                | Algorithm::Avl
                | Algorithm::Scc
        )
    }

    /// Validate `inputs` and build the job for this algorithm. Returns
    /// `Ok(None)` for interactive algorithms.
    pub fn prepare(self, inputs: &Inputs<'_>) -> Result<Option<Job>> {
        let array = || inputs.array.to_vec();
        let job = match self {
            Algorithm::Bubble => Job::Sort(SortKind::Bubble, array()),
            Algorithm::Selection => Job::Sort(SortKind::Selection, array()),
            Algorithm::Insertion => Job::Sort(SortKind::Insertion, array()),
            Algorithm::Merge => Job::Sort(SortKind::Merge, array()),
            Algorithm::Quick => Job::Sort(SortKind::Quick, array()),
            Algorithm::Heap => Job::Sort(SortKind::Heap, array()),
            Algorithm::Shell => Job::Sort(SortKind::Shell, array()),
            Algorithm::Counting => Job::Sort(SortKind::Counting, array()),
            Algorithm::Radix => Job::Sort(SortKind::Radix, array()),
            Algorithm::Bucket => Job::Sort(SortKind::Bucket, array()),
            Algorithm::Linear => Job::Search(SearchKind::Linear, non_empty(inputs.array)?),
            Algorithm::Binary => Job::Search(SearchKind::Binary, non_empty(inputs.array)?),
            Algorithm::Dijkstra => Job::Path(PathKind::Dijkstra, with_endpoints(inputs.grid)?),
            Algorithm::AStar => Job::Path(PathKind::AStar, with_endpoints(inputs.grid)?),
            Algorithm::Bfs => Job::Path(PathKind::Bfs, with_endpoints(inputs.grid)?),
            Algorithm::Dfs => Job::Path(PathKind::Dfs, with_endpoints(inputs.grid)?),
            Algorithm::GreedyBfs => Job::Path(PathKind::GreedyBfs, with_endpoints(inputs.grid)?),
            Algorithm::Bidirectional => {
                Job::Path(PathKind::Bidirectional, with_endpoints(inputs.grid)?)
            }
            Algorithm::Jps => Job::Path(PathKind::Jps, with_endpoints(inputs.grid)?),
            Algorithm::BellmanFord => {
                Job::Path(PathKind::BellmanFord, with_endpoints(inputs.grid)?)
            }
            Algorithm::FloydWarshall => {
                Job::Path(PathKind::FloydWarshall, with_endpoints(inputs.grid)?)
            }
            Algorithm::RecursiveDivision => {
                Job::Maze(MazeKind::RecursiveDivision, with_endpoints(inputs.grid)?)
            }
            Algorithm::PrimsMaze => Job::Maze(MazeKind::Prims, with_endpoints(inputs.grid)?),
            Algorithm::BinaryTreeMaze => {
                Job::Maze(MazeKind::BinaryTree, with_endpoints(inputs.grid)?)
            }
            Algorithm::Prims => Job::GridGraph(GridGraphKind::Prims, with_endpoints(inputs.grid)?),
            Algorithm::Kruskals => {
                Job::GridGraph(GridGraphKind::Kruskals, with_endpoints(inputs.grid)?)
            }
            Algorithm::ConnectedComponents => {
                let grid = inputs.grid.ok_or(Error::EmptyInput("grid"))?;
                Job::GridGraph(GridGraphKind::Components, grid.clone())
            }
            Algorithm::NQueens => Job::NQueens(QUEENS),
            Algorithm::Sudoku => {
                if inputs.array.len() != 81 {
                    return Err(Error::BoardSize {
                        expected: 81,
                        found: inputs.array.len(),
                    });
                }
                Job::Sudoku(array())
            }
            Algorithm::Knapsack => Job::Knapsack(inputs.knapsack.cloned().unwrap_or_default()),
            Algorithm::Lcs => {
                let (a, b) = strings(inputs)?;
                Job::Lcs { a, b }
            }
            Algorithm::Lis => Job::Lis(array()),
            Algorithm::Kmp => {
                let (text, pattern) = strings(inputs)?;
                Job::Match {
                    kind: MatchKind::Kmp,
                    text,
                    pattern,
                }
            }
            Algorithm::RabinKarp => {
                let (text, pattern) = strings(inputs)?;
                Job::Match {
                    kind: MatchKind::RabinKarp(inputs.rabin_karp),
                    text,
                    pattern,
                }
            }
            Algorithm::Stack
            | Algorithm::Queue
            | Algorithm::LinkedList
            | Algorithm::MinHeap
            | Algorithm::MaxHeap
            | Algorithm::Bst
            | Algorithm::Avl
            | Algorithm::Scc => return Ok(None),
        };
        Ok(Some(job))
    }
}

fn non_empty(array: &[i64]) -> Result<Vec<i64>> {
    if array.is_empty() {
        return Err(Error::EmptyInput("array"));
    }
    Ok(array.to_vec())
}

fn with_endpoints(grid: Option<&Grid>) -> Result<Grid> {
    let grid = grid.ok_or(Error::EmptyInput("grid"))?;
    grid.endpoints()?;
    Ok(grid.clone())
}

fn strings(inputs: &Inputs<'_>) -> Result<(String, String)> {
    let (a, b) = inputs.strings.ok_or(Error::EmptyInput("text"))?;
    if a.is_empty() {
        return Err(Error::EmptyInput("text"));
    }
    if b.is_empty() {
        return Err(Error::EmptyInput("pattern"));
    }
    Ok((a.to_string(), b.to_string()))
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Algorithm {
    type Err = ParseError;

    /// Accepts the wire identifier in any case, with `-` or `_` separators.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        Algorithm::ALL
            .iter()
            .copied()
            .find(|a| a.id() == wanted)
            .ok_or_else(|| ParseError::UnknownAlgorithm(s.to_string()))
    }
}

/// Everything a generator may read. Only what the chosen algorithm needs
/// has to be present.
#[derive(Debug, Clone, Copy, Default)]
pub struct Inputs<'a> {
    pub array: &'a [i64],
    pub grid: Option<&'a Grid>,
    /// Text and pattern for matchers, the two sequences for LCS.
    pub strings: Option<(&'a str, &'a str)>,
    pub knapsack: Option<&'a KnapsackProblem>,
    pub rabin_karp: RabinKarpParams,
}

impl<'a> Inputs<'a> {
    pub fn array(array: &'a [i64]) -> Self {
        Self {
            array,
            ..Self::default()
        }
    }

    pub fn grid(grid: &'a Grid) -> Self {
        Self {
            grid: Some(grid),
            ..Self::default()
        }
    }

    pub fn strings(a: &'a str, b: &'a str) -> Self {
        Self {
            strings: Some((a, b)),
            ..Self::default()
        }
    }

    pub fn with_knapsack(mut self, problem: &'a KnapsackProblem) -> Self {
        self.knapsack = Some(problem);
        self
    }

    pub fn with_rabin_karp(mut self, params: RabinKarpParams) -> Self {
        self.rabin_karp = params;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
    Shell,
    Counting,
    Radix,
    Bucket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Linear,
    Binary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Dijkstra,
    AStar,
    Bfs,
    Dfs,
    GreedyBfs,
    Bidirectional,
    Jps,
    BellmanFord,
    FloydWarshall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeKind {
    RecursiveDivision,
    Prims,
    BinaryTree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridGraphKind {
    Prims,
    Kruskals,
    Components,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Kmp,
    RabinKarp(RabinKarpParams),
}

/// Validated generator input, one variant per family.
#[derive(Debug, Clone)]
pub enum Job {
    Sort(SortKind, Vec<i64>),
    Search(SearchKind, Vec<i64>),
    Path(PathKind, Grid),
    Maze(MazeKind, Grid),
    GridGraph(GridGraphKind, Grid),
    NQueens(usize),
    Sudoku(Vec<i64>),
    Knapsack(KnapsackProblem),
    Lcs { a: String, b: String },
    Lis(Vec<i64>),
    Match {
        kind: MatchKind,
        text: String,
        pattern: String,
    },
}

/// Generate the step log for a prepared job. Randomized generators draw
/// from `rng`; everything else ignores it.
pub fn run<R: Rng + ?Sized>(job: Job, rng: &mut R) -> StepLog {
    match job {
        Job::Sort(kind, array) => match kind {
            SortKind::Bubble => bubble_sort(&array),
            SortKind::Selection => selection_sort(&array),
            SortKind::Insertion => insertion_sort(&array),
            SortKind::Merge => merge_sort(&array),
            SortKind::Quick => quick_sort(&array),
            SortKind::Heap => heap_sort(&array),
            SortKind::Shell => shell_sort(&array),
            SortKind::Counting => counting_sort(&array),
            SortKind::Radix => radix_sort(&array),
            SortKind::Bucket => bucket_sort(&array),
        },
        Job::Search(kind, array) => match kind {
            SearchKind::Linear => linear_search(&array, rng),
            SearchKind::Binary => binary_search(&array, rng),
        },
        Job::Path(kind, grid) => match kind {
            PathKind::Dijkstra => dijkstra(&grid),
            PathKind::AStar => astar(&grid),
            PathKind::Bfs => bfs(&grid),
            PathKind::Dfs => dfs(&grid),
            PathKind::GreedyBfs => greedy_best_first(&grid),
            PathKind::Bidirectional => bidirectional(&grid),
            PathKind::Jps => jump_point_search(&grid),
            PathKind::BellmanFord => bellman_ford(&grid),
            PathKind::FloydWarshall => floyd_warshall(&grid),
        },
        Job::Maze(kind, grid) => match kind {
            MazeKind::RecursiveDivision => recursive_division(&grid, rng),
            MazeKind::Prims => prims_maze(&grid, rng),
            MazeKind::BinaryTree => binary_tree_maze(&grid, rng),
        },
        Job::GridGraph(kind, grid) => match kind {
            GridGraphKind::Prims => prims_mst(&grid, rng),
            GridGraphKind::Kruskals => kruskals_mst(&grid, rng),
            GridGraphKind::Components => connected_components(&grid),
        },
        Job::NQueens(n) => n_queens(n),
        Job::Sudoku(board) => sudoku(&board),
        Job::Knapsack(problem) => knapsack(&problem),
        Job::Lcs { a, b } => lcs(&a, &b),
        Job::Lis(array) => lis(&array),
        Job::Match {
            kind,
            text,
            pattern,
        } => match kind {
            MatchKind::Kmp => kmp(&text, &pattern),
            MatchKind::RabinKarp(params) => rabin_karp_with(&text, &pattern, params),
        },
    }
}

/// Single entry point: prepare and run, degrading to an empty log.
pub fn generate_steps<R: Rng + ?Sized>(
    algorithm: Algorithm,
    inputs: &Inputs<'_>,
    rng: &mut R,
) -> StepLog {
    match algorithm.prepare(inputs) {
        Ok(Some(job)) => {
            let steps = run(job, rng);
            debug!("{} generated {} steps", algorithm, steps.len());
            steps
        }
        Ok(None) => {
            info!("{} is driven by user actions, no step log generated", algorithm);
            StepLog::new()
        }
        Err(e) => {
            warn!("Cannot run {}: {}", algorithm, e);
            StepLog::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backtracking::SUDOKU_PUZZLE;
    use algoviz_core::{AnimationStep, Coord};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn ids_round_trip_through_from_str() {
        for alg in Algorithm::ALL {
            assert_eq!(alg.id().parse::<Algorithm>(), Ok(alg));
        }
        assert_eq!("greedy-bfs".parse::<Algorithm>(), Ok(Algorithm::GreedyBfs));
        assert!(matches!(
            "TOPOLOGICAL".parse::<Algorithm>(),
            Err(ParseError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn grid_algorithms_need_endpoints() {
        let mut grid = Grid::empty(5, 5);
        assert_eq!(
            Algorithm::Dijkstra.prepare(&Inputs::grid(&grid)).err(),
            Some(Error::MissingEndpoints)
        );
        assert_eq!(
            Algorithm::Bfs.prepare(&Inputs::default()).err(),
            Some(Error::EmptyInput("grid"))
        );
        // components only need the board itself
        assert!(Algorithm::ConnectedComponents
            .prepare(&Inputs::grid(&grid))
            .is_ok_and(|job| job.is_some()));
        grid = Grid::new(5, 5, Coord::new(0, 0), Coord::new(4, 4));
        assert!(!generate_steps(Algorithm::AStar, &Inputs::grid(&grid), &mut rng()).is_empty());
    }

    #[test]
    fn precondition_failures_yield_empty_logs() {
        let mut r = rng();
        assert!(generate_steps(Algorithm::Jps, &Inputs::default(), &mut r).is_empty());
        assert!(generate_steps(Algorithm::Kmp, &Inputs::strings("", "a"), &mut r).is_empty());
        assert!(generate_steps(Algorithm::Lcs, &Inputs::default(), &mut r).is_empty());
        assert!(generate_steps(Algorithm::Linear, &Inputs::array(&[]), &mut r).is_empty());
        assert!(generate_steps(Algorithm::Sudoku, &Inputs::array(&[1, 2]), &mut r).is_empty());
    }

    #[test]
    fn interactive_algorithms_have_no_job() {
        for alg in Algorithm::ALL {
            let job = alg.prepare(&Inputs::array(&[3, 1, 2]));
            if alg.is_interactive() {
                assert!(matches!(job, Ok(None)), "{}", alg);
            }
        }
    }

    #[test]
    fn dispatch_reaches_each_family() {
        let mut r = rng();
        let array = [4, 2, 9, 1];
        assert_eq!(
            generate_steps(Algorithm::Quick, &Inputs::array(&array), &mut r),
            quick_sort(&array)
        );
        assert!(!generate_steps(Algorithm::Sudoku, &Inputs::array(&SUDOKU_PUZZLE), &mut r).is_empty());
        assert!(!generate_steps(Algorithm::NQueens, &Inputs::default(), &mut r).is_empty());
        assert!(!generate_steps(Algorithm::Knapsack, &Inputs::default(), &mut r).is_empty());
        let matches = generate_steps(Algorithm::RabinKarp, &Inputs::strings("abab", "ab"), &mut r);
        assert_eq!(
            matches
                .iter()
                .filter(|s| matches!(s, AnimationStep::Found { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn sorts_accept_empty_arrays() {
        assert!(matches!(
            Algorithm::Merge.prepare(&Inputs::array(&[])),
            Ok(Some(Job::Sort(SortKind::Merge, _)))
        ));
    }
}
