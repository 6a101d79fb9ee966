//! The state container: one user's selected algorithm, inputs and replay.
//!
//! A [`Session`] owns the [`VisualState`] together with the engines that
//! mutate it. Every entry point the UI needs lives here; nothing is global.

use algoviz_algorithms::backtracking::{empty_queens_board, QUEENS, SUDOKU_PUZZLE};
use algoviz_algorithms::dp::{knapsack_table, lcs_table, KnapsackProblem};
use algoviz_algorithms::scc::{kosaraju, random_graph};
use algoviz_algorithms::strings::RabinKarpParams;
use algoviz_algorithms::structures::{
    heap_build, heap_extract, heap_insert, structure_steps, HeapKind, StructureOp,
};
use algoviz_algorithms::tree::{BinaryTree, TraversalOrder, TreeFlavor};
use algoviz_algorithms::{generate_steps, Algorithm, Category, Inputs};
use algoviz_core::{AnimationStep, Coord, DpTable, Grid, NodeId, StepLog};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::VisConfig;
use crate::driver::CancelFlag;
use crate::error::{Result, VisError};
use crate::playback::{Playback, Speed, Tick};
use crate::store::VisualState;
use crate::traversal::{TraversalPlayback, TraversalTick};

/// Bars used by radix and bucket sort, which show buckets below the array.
pub const BUCKET_ARRAY_LEN: usize = 30;

/// Initial LCS pair.
pub const DEFAULT_STRINGS: (&str, &str) = ("AGGTAB", "GXTXAYB");

/// Longest text, pattern or LCS sequence accepted.
pub const MAX_STRING_LEN: usize = 32;
/// Knapsack table bounds: at most this many item rows and capacity columns.
pub const MAX_KNAPSACK_ITEMS: usize = 12;
pub const MAX_KNAPSACK_CAPACITY: usize = 50;
/// Largest absolute item value, so table sums stay far from overflow.
pub const MAX_ITEM_VALUE: i64 = 1_000_000;
/// Most values a heap can be built from in one go.
pub const MAX_HEAP_BUILD: usize = 64;

pub struct Session {
    state: VisualState,
    playback: Playback,
    traversal: TraversalPlayback,
    algorithm: Algorithm,
    tree: BinaryTree,
    strings: (String, String),
    knapsack: KnapsackProblem,
    rabin_karp: RabinKarpParams,
    mouse_pressed: bool,
    cancel: CancelFlag,
    rng: StdRng,
    config: VisConfig,
}

impl Session {
    pub fn new(config: VisConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut playback = Playback::new();
        playback.set_speed(config.speed);

        let mut session = Self {
            state: VisualState::default(),
            playback,
            traversal: TraversalPlayback::new(),
            algorithm: config.algorithm,
            tree: BinaryTree::new(tree_flavor(config.algorithm)),
            strings: (DEFAULT_STRINGS.0.to_string(), DEFAULT_STRINGS.1.to_string()),
            knapsack: KnapsackProblem::default(),
            rabin_karp: RabinKarpParams::default(),
            mouse_pressed: false,
            cancel: CancelFlag::new(),
            rng,
            config,
        };
        session.generate_array();
        session
    }

    pub fn state(&self) -> &VisualState {
        &self.state
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn config(&self) -> &VisConfig {
        &self.config
    }

    pub fn strings(&self) -> (&str, &str) {
        (&self.strings.0, &self.strings.1)
    }

    /// Flag the driver polls between steps.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// A run or traversal is in flight.
    pub fn is_playing(&self) -> bool {
        self.playback.is_active() || self.traversal.is_running()
    }

    // ------------------------------------------------------------------
    // Selection and presets
    // ------------------------------------------------------------------

    /// Select an algorithm. Stops any running animation and loads the
    /// algorithm's preset.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        info!("Selected {}", algorithm);
        self.algorithm = algorithm;
        let flavor = tree_flavor(algorithm);
        if flavor != self.tree.flavor() {
            self.tree = BinaryTree::new(flavor);
        }
        self.generate_array();
    }

    pub fn speed(&self) -> Speed {
        self.playback.speed()
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.playback.set_speed(speed);
    }

    pub fn delay(&self) -> std::time::Duration {
        self.playback.delay()
    }

    /// Text/pattern for matchers, the sequence pair for LCS. Both must be
    /// non-empty and at most [`MAX_STRING_LEN`] characters.
    pub fn set_strings(&mut self, a: impl Into<String>, b: impl Into<String>) -> Result<()> {
        let (a, b) = (a.into(), b.into());
        for s in [&a, &b] {
            let len = s.chars().count();
            if len == 0 || len > MAX_STRING_LEN {
                return Err(VisError::InvalidInput(format!(
                    "strings must be 1 to {} characters, got {}",
                    MAX_STRING_LEN, len
                )));
            }
        }
        self.strings = (a, b);
        Ok(())
    }

    /// Replace the knapsack problem. The table it sizes is bounded by
    /// [`MAX_KNAPSACK_ITEMS`] and [`MAX_KNAPSACK_CAPACITY`].
    pub fn set_knapsack(&mut self, problem: KnapsackProblem) -> Result<()> {
        validate_knapsack(&problem)?;
        self.knapsack = problem;
        if self.algorithm == Algorithm::Knapsack && !self.is_playing() {
            self.state.dp_table = knapsack_table(&self.knapsack);
        }
        Ok(())
    }

    pub fn set_rabin_karp(&mut self, params: RabinKarpParams) {
        self.rabin_karp = params;
    }

    /// Reload the preset for the current algorithm. Ignored while playing.
    pub fn reset_array(&mut self) -> bool {
        if self.is_playing() {
            return false;
        }
        self.generate_array();
        true
    }

    fn generate_array(&mut self) {
        self.stop_animation();
        self.state.traversal.clear();

        match self.algorithm {
            Algorithm::Sudoku => self.state.array = SUDOKU_PUZZLE.to_vec(),
            Algorithm::NQueens => self.state.array = empty_queens_board(QUEENS),
            Algorithm::Radix | Algorithm::Bucket => {
                self.state.array = self.random_values(BUCKET_ARRAY_LEN)
            }
            Algorithm::Knapsack => {
                self.state.dp_table = knapsack_table(&self.knapsack);
                self.state.array.clear();
            }
            Algorithm::Lcs | Algorithm::Kmp | Algorithm::RabinKarp => {
                self.state.dp_table = DpTable::default();
                self.state.array.clear();
                self.state.tree = None;
            }
            Algorithm::Stack
            | Algorithm::Queue
            | Algorithm::LinkedList
            | Algorithm::MinHeap
            | Algorithm::MaxHeap => self.state.array.clear(),
            Algorithm::Bst | Algorithm::Avl => {
                self.tree.clear();
                self.state.tree = None;
                self.state.array.clear();
            }
            Algorithm::Scc => self.state.graph = Default::default(),
            _ => {
                self.state.tree = None;
                self.state.array = self.random_values(self.config.array_len);
            }
        }

        self.state.is_sorted = false;
        self.state.clear_transient();
        self.state.current_step = None;
        self.playback.reset();
    }

    fn random_values(&mut self, len: usize) -> Vec<i64> {
        (0..len).map(|_| self.rng.gen_range(5..=104)).collect()
    }

    // ------------------------------------------------------------------
    // Grid painting
    // ------------------------------------------------------------------

    /// Fresh board with the default endpoints. Ignored while playing.
    pub fn clear_board(&mut self) -> bool {
        if self.is_playing() {
            return false;
        }
        self.state.grid = Grid::default();
        true
    }

    pub fn mouse_down(&mut self, row: usize, col: usize) {
        if self.is_playing() {
            return;
        }
        self.toggle_wall(row, col);
        self.mouse_pressed = true;
    }

    pub fn mouse_enter(&mut self, row: usize, col: usize) {
        if !self.mouse_pressed || self.is_playing() {
            return;
        }
        self.toggle_wall(row, col);
    }

    pub fn mouse_up(&mut self) {
        self.mouse_pressed = false;
    }

    fn toggle_wall(&mut self, row: usize, col: usize) {
        if let Err(e) = self.state.grid.toggle_wall(Coord::new(row, col)) {
            debug!("Wall toggle ignored: {}", e);
        }
    }

    /// New random graph for the SCC view. Ignored while playing.
    pub fn generate_graph(&mut self) -> bool {
        if self.is_playing() {
            return false;
        }
        self.state.graph = random_graph(&mut self.rng);
        self.state.clear_transient();
        debug!(
            "Generated graph with {} nodes and {} edges",
            self.state.graph.node_count(),
            self.state.graph.edges.len()
        );
        true
    }

    // ------------------------------------------------------------------
    // Runs
    // ------------------------------------------------------------------

    /// Generate the log for the selected algorithm and start playing it.
    /// Returns the number of steps captured.
    pub fn visualize(&mut self) -> Result<usize> {
        if self.is_playing() {
            return Err(VisError::AlreadyRunning);
        }
        let algorithm = self.algorithm;
        let steps = match algorithm {
            Algorithm::Scc => {
                self.state.clear_transient();
                kosaraju(&self.state.graph)
            }
            a if a.is_interactive() => return Err(VisError::Interactive(a)),
            _ => {
                self.prepare_surface();
                let (a, b) = (self.strings.0.as_str(), self.strings.1.as_str());
                let inputs = Inputs {
                    array: &self.state.array,
                    grid: Some(&self.state.grid),
                    strings: Some((a, b)),
                    knapsack: Some(&self.knapsack),
                    rabin_karp: self.rabin_karp,
                };
                generate_steps(algorithm, &inputs, &mut self.rng)
            }
        };

        if steps.is_empty() {
            info!("No steps generated for {}", algorithm);
            return Err(VisError::NothingToAnimate(algorithm));
        }
        let count = steps.len();
        self.run_animation(steps)?;
        info!("Playing {} steps of {}", count, algorithm);
        Ok(count)
    }

    /// Reset whatever surface the algorithm draws on.
    fn prepare_surface(&mut self) {
        match self.algorithm.category() {
            Category::Maze => self.state.grid.clear_walls(),
            Category::Pathfinding | Category::Mst | Category::Graph => {
                self.state.grid.reset_scratch()
            }
            Category::Dp if self.algorithm == Algorithm::Lcs => {
                self.state.dp_table = lcs_table(&self.strings.0, &self.strings.1);
            }
            Category::Dp if self.algorithm == Algorithm::Knapsack => {
                self.state.dp_table = knapsack_table(&self.knapsack);
            }
            _ => {}
        }
    }

    /// Start replaying a captured log.
    pub fn run_animation(&mut self, steps: StepLog) -> Result<()> {
        if self.traversal.is_running() {
            return Err(VisError::AlreadyRunning);
        }
        self.playback.start(steps, &mut self.state)?;
        self.cancel = CancelFlag::new();
        Ok(())
    }

    /// Cancel the run or traversal in flight.
    pub fn stop_animation(&mut self) -> bool {
        self.cancel.cancel();
        let stopped = self.playback.stop(&mut self.state) | self.traversal.stop(&mut self.state);
        if stopped {
            info!("Animation stopped");
        }
        stopped
    }

    pub fn tick(&mut self) -> Tick {
        self.playback.tick(&mut self.state)
    }

    pub fn pause(&mut self) -> bool {
        self.playback.pause()
    }

    pub fn resume(&mut self) -> bool {
        self.playback.resume()
    }

    pub fn step_forward(&mut self) -> Result<Option<usize>> {
        self.playback.step_forward(&mut self.state)
    }

    pub fn seek(&mut self, position: usize) -> Result<usize> {
        self.playback.seek(position, &mut self.state)
    }

    /// Tick until the run completes, without delays. Returns the number of
    /// steps applied.
    pub fn run_to_completion(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.tick() {
                Tick::Applied(_) => applied += 1,
                Tick::Completed | Tick::Inactive => return applied,
                Tick::Held => {
                    self.resume();
                }
            }
        }
    }

    /// The step most recently applied.
    pub fn current_step(&self) -> Option<&AnimationStep> {
        self.playback
            .current_step()
            .and_then(|i| self.playback.steps().get(i))
    }

    // ------------------------------------------------------------------
    // Trees
    // ------------------------------------------------------------------

    pub fn tree(&self) -> &BinaryTree {
        &self.tree
    }

    /// Insert into the BST/AVL and lay the tree out again.
    pub fn tree_insert(&mut self, value: i64) -> Result<Option<NodeId>> {
        self.require_tree("insert")?;
        self.state.traversal.clear();
        let id = self.tree.insert(value);
        if !self.tree.last_rotations().is_empty() {
            debug!("Insert {} rotated {:?}", value, self.tree.last_rotations());
        }
        self.sync_tree();
        Ok(id)
    }

    pub fn tree_delete(&mut self, value: i64) -> Result<bool> {
        self.require_tree("delete")?;
        self.state.traversal.clear();
        let removed = self.tree.delete(value);
        if !self.tree.last_rotations().is_empty() {
            debug!("Delete {} rotated {:?}", value, self.tree.last_rotations());
        }
        self.sync_tree();
        Ok(removed)
    }

    pub fn tree_clear(&mut self) {
        self.traversal.stop(&mut self.state);
        self.tree.clear();
        self.state.tree = None;
        self.state.traversal.clear();
    }

    pub fn traverse(&mut self, order: TraversalOrder) -> Result<()> {
        if self.playback.is_active() {
            return Err(VisError::AlreadyRunning);
        }
        self.traversal.start(&self.tree, order, &mut self.state)?;
        self.cancel = CancelFlag::new();
        info!("Traversing {} nodes {}", self.tree.len(), order);
        Ok(())
    }

    pub fn tick_traversal(&mut self) -> TraversalTick {
        self.traversal.tick(&mut self.state)
    }

    fn require_tree(&self, op: &'static str) -> Result<()> {
        if self.traversal.is_running() {
            return Err(VisError::AlreadyRunning);
        }
        match self.algorithm {
            Algorithm::Bst | Algorithm::Avl => Ok(()),
            algorithm => Err(VisError::WrongAlgorithm { op, algorithm }),
        }
    }

    fn sync_tree(&mut self) {
        self.tree.layout();
        self.state.tree = self.tree.root().cloned();
    }

    // ------------------------------------------------------------------
    // Linear structures and heaps
    // ------------------------------------------------------------------

    /// Play the script for one stack/queue/list action.
    pub fn apply_structure(&mut self, op: StructureOp) -> Result<usize> {
        let allowed = match op {
            StructureOp::Push(_) | StructureOp::Pop => self.algorithm == Algorithm::Stack,
            StructureOp::Enqueue(_) | StructureOp::Dequeue => self.algorithm == Algorithm::Queue,
            _ => self.algorithm == Algorithm::LinkedList,
        };
        if !allowed {
            return Err(VisError::WrongAlgorithm {
                op: "this operation",
                algorithm: self.algorithm,
            });
        }
        debug!("{} on {:?}", op, self.state.array);
        let steps = structure_steps(&self.state.array, op);
        self.play_script(steps)
    }

    pub fn heap_insert(&mut self, value: i64) -> Result<usize> {
        let kind = self.heap_kind("insert")?;
        let steps = heap_insert(&self.state.array, value, kind);
        self.play_script(steps)
    }

    pub fn heap_extract(&mut self) -> Result<usize> {
        let kind = self.heap_kind("extract")?;
        let steps = heap_extract(&self.state.array, kind);
        self.play_script(steps)
    }

    /// Replace the heap with `values`, heapified.
    pub fn heap_build(&mut self, values: &[i64]) -> Result<usize> {
        let kind = self.heap_kind("build")?;
        if values.len() > MAX_HEAP_BUILD {
            return Err(VisError::InvalidInput(format!(
                "at most {} values, got {}",
                MAX_HEAP_BUILD,
                values.len()
            )));
        }
        let steps = heap_build(values, kind);
        self.play_script(steps)
    }

    fn heap_kind(&self, op: &'static str) -> Result<HeapKind> {
        match self.algorithm {
            Algorithm::MinHeap => Ok(HeapKind::Min),
            Algorithm::MaxHeap => Ok(HeapKind::Max),
            algorithm => Err(VisError::WrongAlgorithm { op, algorithm }),
        }
    }

    fn play_script(&mut self, steps: StepLog) -> Result<usize> {
        if steps.is_empty() {
            return Err(VisError::NothingToAnimate(self.algorithm));
        }
        let count = steps.len();
        self.run_animation(steps)?;
        Ok(count)
    }
}

fn validate_knapsack(problem: &KnapsackProblem) -> Result<()> {
    let invalid = |msg: String| Err(VisError::InvalidInput(msg));
    if problem.items.is_empty() || problem.items.len() > MAX_KNAPSACK_ITEMS {
        return invalid(format!(
            "knapsack needs 1 to {} items, got {}",
            MAX_KNAPSACK_ITEMS,
            problem.items.len()
        ));
    }
    if problem.capacity > MAX_KNAPSACK_CAPACITY {
        return invalid(format!(
            "capacity {} exceeds {}",
            problem.capacity, MAX_KNAPSACK_CAPACITY
        ));
    }
    if let Some(item) = problem
        .items
        .iter()
        .find(|item| item.value.unsigned_abs() > MAX_ITEM_VALUE as u64)
    {
        return invalid(format!("{} value {} is out of range", item.name, item.value));
    }
    Ok(())
}

fn tree_flavor(algorithm: Algorithm) -> TreeFlavor {
    match algorithm {
        Algorithm::Avl => TreeFlavor::Avl,
        _ => TreeFlavor::Bst,
    }
}
