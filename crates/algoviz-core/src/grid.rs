//! Rectangular board shared by pathfinders, maze generators and grid graphs.

use crate::error::{Error, Result};

/// Default board height.
pub const DEFAULT_ROWS: usize = 20;
/// Default board width.
pub const DEFAULT_COLS: usize = 50;
/// Default start cell.
pub const DEFAULT_START: Coord = Coord::new(10, 10);
/// Default finish cell.
pub const DEFAULT_FINISH: Coord = Coord::new(10, 40);

/// Cell position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn manhattan(self, other: Coord) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// Visual state of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NodeStatus {
    #[default]
    Unvisited,
    Visited,
    Wall,
    Path,
    Start,
    Finish,
}

/// One grid cell with its search scratch fields.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub row: usize,
    pub col: usize,
    pub is_start: bool,
    pub is_finish: bool,
    pub is_wall: bool,
    /// Tentative distance; `None` is infinity.
    pub distance: Option<u32>,
    pub is_visited: bool,
    /// Predecessor on the search tree.
    pub previous: Option<Coord>,
    pub status: NodeStatus,
}

impl Node {
    fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            is_start: false,
            is_finish: false,
            is_wall: false,
            distance: None,
            is_visited: false,
            previous: None,
            status: NodeStatus::Unvisited,
        }
    }

    pub fn coord(&self) -> Coord {
        Coord::new(self.row, self.col)
    }

    /// Status implied by the structural flags alone.
    pub fn base_status(&self) -> NodeStatus {
        if self.is_start {
            NodeStatus::Start
        } else if self.is_finish {
            NodeStatus::Finish
        } else if self.is_wall {
            NodeStatus::Wall
        } else {
            NodeStatus::Unvisited
        }
    }

    fn reset_scratch(&mut self) {
        self.distance = None;
        self.is_visited = false;
        self.previous = None;
        self.status = self.base_status();
    }
}

/// Row-major grid of nodes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    rows: usize,
    cols: usize,
    nodes: Vec<Node>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS, DEFAULT_START, DEFAULT_FINISH)
    }
}

impl Grid {
    /// Board with the given endpoints. Endpoints outside the board are dropped.
    pub fn new(rows: usize, cols: usize, start: Coord, finish: Coord) -> Self {
        let mut grid = Self::empty(rows, cols);
        if let Some(node) = grid.get_mut(start) {
            node.is_start = true;
            node.status = NodeStatus::Start;
        }
        if let Some(node) = grid.get_mut(finish) {
            node.is_finish = true;
            node.status = NodeStatus::Finish;
        }
        grid
    }

    /// Board without start or finish.
    pub fn empty(rows: usize, cols: usize) -> Self {
        let nodes = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Node::new(row, col)))
            .collect();
        Self { rows, cols, nodes }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Row-major index of a coordinate.
    pub fn index(&self, c: Coord) -> usize {
        c.row * self.cols + c.col
    }

    pub fn coord(&self, index: usize) -> Coord {
        Coord::new(index / self.cols, index % self.cols)
    }

    pub fn contains(&self, c: Coord) -> bool {
        c.row < self.rows && c.col < self.cols
    }

    pub fn get(&self, c: Coord) -> Option<&Node> {
        if self.contains(c) {
            self.nodes.get(self.index(c))
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, c: Coord) -> Option<&mut Node> {
        if self.contains(c) {
            let idx = self.index(c);
            self.nodes.get_mut(idx)
        } else {
            None
        }
    }

    /// Node at `c`. Panics when `c` is outside the board.
    pub fn node(&self, c: Coord) -> &Node {
        &self.nodes[self.index(c)]
    }

    /// Mutable node at `c`. Panics when `c` is outside the board.
    pub fn node_mut(&mut self, c: Coord) -> &mut Node {
        let idx = self.index(c);
        &mut self.nodes[idx]
    }

    /// In bounds and not a wall.
    pub fn walkable(&self, c: Coord) -> bool {
        self.get(c).is_some_and(|n| !n.is_wall)
    }

    /// Signed-offset walkability test; off-board counts as blocked.
    pub fn walkable_at(&self, row: isize, col: isize) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        self.walkable(Coord::new(row as usize, col as usize))
    }

    /// The unique start and finish cells.
    pub fn endpoints(&self) -> Result<(Coord, Coord)> {
        let mut starts = self.nodes.iter().filter(|n| n.is_start);
        let mut finishes = self.nodes.iter().filter(|n| n.is_finish);
        match (starts.next(), starts.next(), finishes.next(), finishes.next()) {
            (Some(s), None, Some(f), None) => Ok((s.coord(), f.coord())),
            _ => Err(Error::MissingEndpoints),
        }
    }

    pub fn start(&self) -> Option<Coord> {
        self.nodes.iter().find(|n| n.is_start).map(Node::coord)
    }

    pub fn finish(&self) -> Option<Coord> {
        self.nodes.iter().find(|n| n.is_finish).map(Node::coord)
    }

    /// Flip the wall flag of a cell; returns the new flag.
    pub fn toggle_wall(&mut self, c: Coord) -> Result<bool> {
        let node = self
            .get_mut(c)
            .ok_or(Error::OutOfBounds { row: c.row, col: c.col })?;
        if node.is_start || node.is_finish {
            return Err(Error::ProtectedCell { row: c.row, col: c.col });
        }
        node.is_wall = !node.is_wall;
        node.status = if node.is_wall {
            NodeStatus::Wall
        } else {
            NodeStatus::Unvisited
        };
        Ok(node.is_wall)
    }

    /// Turn a cell into a wall.
    pub fn set_wall(&mut self, c: Coord) -> Result<()> {
        let node = self
            .get_mut(c)
            .ok_or(Error::OutOfBounds { row: c.row, col: c.col })?;
        if node.is_start || node.is_finish {
            return Err(Error::ProtectedCell { row: c.row, col: c.col });
        }
        node.is_wall = true;
        node.status = NodeStatus::Wall;
        Ok(())
    }

    /// Reset distance, visited, predecessor and status on every cell.
    pub fn reset_scratch(&mut self) {
        for node in &mut self.nodes {
            node.reset_scratch();
        }
    }

    /// Remove every wall and all search marks.
    pub fn clear_walls(&mut self) {
        for node in &mut self.nodes {
            node.is_wall = false;
            node.reset_scratch();
        }
    }

    pub fn wall_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_wall).count()
    }

    /// In-bounds orthogonal neighbours in Up, Right, Down, Left order.
    pub fn neighbors4(&self, c: Coord) -> impl Iterator<Item = Coord> + '_ {
        const DIRS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];
        DIRS.iter().filter_map(move |&(dr, dc)| self.offset(c, dr, dc))
    }

    /// Walkable orthogonal neighbours in Up, Right, Down, Left order.
    pub fn open_neighbors(&self, c: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.neighbors4(c).filter(move |&n| self.walkable(n))
    }

    /// `c` shifted by `(dr, dc)` when the result stays on the board.
    pub fn offset(&self, c: Coord, dr: isize, dc: isize) -> Option<Coord> {
        let row = c.row.checked_add_signed(dr)?;
        let col = c.col.checked_add_signed(dc)?;
        let next = Coord::new(row, col);
        self.contains(next).then_some(next)
    }
}
