//! Maze generators.
//!
//! Mazes live on a room lattice aligned with the start cell: a cell is a
//! room when its row and column have the same parity as the start's. Links
//! sit between two rooms; pillars and the board margin are always walls.
//! Each generator picks which links stay open so that the rooms form a
//! spanning tree, then emits only `wall` steps. Start and finish are never
//! walled, and an off-lattice finish gets a short corridor to the maze.

use std::collections::VecDeque;

use algoviz_core::{AnimationStep, Coord, Grid, StepLog};
use rand::seq::SliceRandom;
use rand::Rng;

struct Lattice {
    rows: usize,
    cols: usize,
    row_parity: usize,
    col_parity: usize,
    room_rows: usize,
    room_cols: usize,
}

impl Lattice {
    fn new(grid: &Grid, start: Coord) -> Self {
        let (rows, cols) = (grid.rows(), grid.cols());
        let row_parity = start.row % 2;
        let col_parity = start.col % 2;
        Self {
            rows,
            cols,
            row_parity,
            col_parity,
            room_rows: (rows.saturating_sub(row_parity) + 1) / 2,
            room_cols: (cols.saturating_sub(col_parity) + 1) / 2,
        }
    }

    fn room(&self, i: usize, j: usize) -> Coord {
        Coord::new(self.row_parity + 2 * i, self.col_parity + 2 * j)
    }

    fn is_room(&self, c: Coord) -> bool {
        c.row >= self.row_parity
            && c.col >= self.col_parity
            && (c.row - self.row_parity) % 2 == 0
            && (c.col - self.col_parity) % 2 == 0
    }

    /// Cell between two orthogonally adjacent rooms.
    fn link(&self, a: (usize, usize), b: (usize, usize)) -> Coord {
        let ca = self.room(a.0, a.1);
        let cb = self.room(b.0, b.1);
        Coord::new((ca.row + cb.row) / 2, (ca.col + cb.col) / 2)
    }

    fn index(&self, c: Coord) -> usize {
        c.row * self.cols + c.col
    }
}

/// Turn an ordered wall candidate list into `wall` steps: drop duplicates,
/// protected cells and whatever a finish corridor needs.
fn finish_maze(grid: &Grid, lattice: &Lattice, order: Vec<Coord>) -> StepLog {
    let Ok((start, finish)) = grid.endpoints() else {
        return StepLog::new();
    };
    let mut wall = vec![false; grid.len()];
    for &c in &order {
        if c != start && c != finish {
            wall[lattice.index(c)] = true;
        }
    }

    connect_finish(lattice, &mut wall, start, finish);

    let mut emitted = vec![false; grid.len()];
    let mut steps = StepLog::new();
    for c in order {
        let idx = lattice.index(c);
        if wall[idx] && !emitted[idx] {
            emitted[idx] = true;
            steps.push(AnimationStep::wall(c.row, c.col));
        }
    }
    steps
}

fn neighbours(lattice: &Lattice, c: Coord) -> impl Iterator<Item = Coord> + '_ {
    [(-1isize, 0isize), (0, 1), (1, 0), (0, -1)]
        .into_iter()
        .filter_map(move |(dr, dc)| {
            let row = c.row.checked_add_signed(dr)?;
            let col = c.col.checked_add_signed(dc)?;
            (row < lattice.rows && col < lattice.cols).then_some(Coord::new(row, col))
        })
}

/// Clear walls along the shortest wall-crossing route from `finish` to the
/// region reachable from `start`, if the two are separated.
fn connect_finish(lattice: &Lattice, wall: &mut [bool], start: Coord, finish: Coord) {
    let mut reached = vec![false; wall.len()];
    let mut queue = VecDeque::from([start]);
    reached[lattice.index(start)] = true;
    while let Some(c) = queue.pop_front() {
        for n in neighbours(lattice, c) {
            let idx = lattice.index(n);
            if !wall[idx] && !reached[idx] {
                reached[idx] = true;
                queue.push_back(n);
            }
        }
    }
    if reached[lattice.index(finish)] {
        return;
    }

    let mut parent: Vec<Option<Coord>> = vec![None; wall.len()];
    let mut seen = vec![false; wall.len()];
    let mut queue = VecDeque::from([finish]);
    seen[lattice.index(finish)] = true;
    while let Some(c) = queue.pop_front() {
        if reached[lattice.index(c)] {
            let mut cur = c;
            while let Some(p) = parent[lattice.index(cur)] {
                wall[lattice.index(cur)] = false;
                cur = p;
            }
            return;
        }
        for n in neighbours(lattice, c) {
            let idx = lattice.index(n);
            if !seen[idx] {
                seen[idx] = true;
                parent[idx] = Some(c);
                queue.push_back(n);
            }
        }
    }
}

/// Every cell that is neither a room nor an open link, row-major.
fn closed_cells(lattice: &Lattice, open_links: &[bool]) -> Vec<Coord> {
    let mut out = Vec::new();
    for row in 0..lattice.rows {
        for col in 0..lattice.cols {
            let c = Coord::new(row, col);
            if !lattice.is_room(c) && !open_links[lattice.index(c)] {
                out.push(c);
            }
        }
    }
    out
}

/// Recursive division: walls grow inward as chambers are split, each
/// dividing line keeping one gap at a room position.
pub fn recursive_division<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> StepLog {
    let Some(start) = grid.start() else {
        return StepLog::new();
    };
    let lattice = Lattice::new(grid, start);
    let mut order = Vec::new();

    // margin rows and columns outside the room lattice
    let last_room_row = lattice.row_parity + 2 * lattice.room_rows.saturating_sub(1);
    let last_room_col = lattice.col_parity + 2 * lattice.room_cols.saturating_sub(1);
    for row in 0..lattice.rows {
        for col in 0..lattice.cols {
            if row < lattice.row_parity
                || row > last_room_row
                || col < lattice.col_parity
                || col > last_room_col
            {
                order.push(Coord::new(row, col));
            }
        }
    }

    if lattice.room_rows > 0 && lattice.room_cols > 0 {
        divide(
            &lattice,
            (0, lattice.room_rows - 1),
            (0, lattice.room_cols - 1),
            rng,
            &mut order,
        );
    }
    finish_maze(grid, &lattice, order)
}

fn divide<R: Rng + ?Sized>(
    lattice: &Lattice,
    (r0, r1): (usize, usize),
    (c0, c1): (usize, usize),
    rng: &mut R,
    order: &mut Vec<Coord>,
) {
    let height = r1 - r0 + 1;
    let width = c1 - c0 + 1;
    if height < 2 && width < 2 {
        return;
    }
    let horizontal = if height < 2 {
        false
    } else if width < 2 {
        true
    } else if height != width {
        height > width
    } else {
        rng.gen_bool(0.5)
    };

    if horizontal {
        let split = rng.gen_range(r0..r1);
        let gap = rng.gen_range(c0..=c1);
        let row = lattice.row_parity + 2 * split + 1;
        let first = lattice.col_parity + 2 * c0;
        let last = lattice.col_parity + 2 * c1;
        for col in first..=last {
            if col != lattice.col_parity + 2 * gap {
                order.push(Coord::new(row, col));
            }
        }
        divide(lattice, (r0, split), (c0, c1), rng, order);
        divide(lattice, (split + 1, r1), (c0, c1), rng, order);
    } else {
        let split = rng.gen_range(c0..c1);
        let gap = rng.gen_range(r0..=r1);
        let col = lattice.col_parity + 2 * split + 1;
        let first = lattice.row_parity + 2 * r0;
        let last = lattice.row_parity + 2 * r1;
        for row in first..=last {
            if row != lattice.row_parity + 2 * gap {
                order.push(Coord::new(row, col));
            }
        }
        divide(lattice, (r0, r1), (c0, split), rng, order);
        divide(lattice, (r0, r1), (split + 1, c1), rng, order);
    }
}

/// Randomized Prim's: grow the maze from the start room, opening the link
/// to a random frontier room each round.
pub fn prims_maze<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> StepLog {
    let Some(start) = grid.start() else {
        return StepLog::new();
    };
    let lattice = Lattice::new(grid, start);
    let mut open_links = vec![false; grid.len()];
    let (rr, rc) = (lattice.room_rows, lattice.room_cols);
    if rr == 0 || rc == 0 {
        return finish_maze(grid, &lattice, closed_cells(&lattice, &open_links));
    }

    let mut in_maze = vec![false; rr * rc];
    let origin = ((start.row - lattice.row_parity) / 2, (start.col - lattice.col_parity) / 2);
    in_maze[origin.0 * rc + origin.1] = true;

    let room_neighbours = |(i, j): (usize, usize)| {
        let mut out = Vec::with_capacity(4);
        if i > 0 {
            out.push((i - 1, j));
        }
        if j + 1 < rc {
            out.push((i, j + 1));
        }
        if i + 1 < rr {
            out.push((i + 1, j));
        }
        if j > 0 {
            out.push((i, j - 1));
        }
        out
    };

    let mut frontier: Vec<((usize, usize), (usize, usize))> = room_neighbours(origin)
        .into_iter()
        .map(|n| (n, origin))
        .collect();

    while !frontier.is_empty() {
        let pick = rng.gen_range(0..frontier.len());
        let (room, from) = frontier.swap_remove(pick);
        if in_maze[room.0 * rc + room.1] {
            continue;
        }
        in_maze[room.0 * rc + room.1] = true;
        open_links[lattice.index(lattice.link(room, from))] = true;
        for n in room_neighbours(room) {
            if !in_maze[n.0 * rc + n.1] {
                frontier.push((n, room));
            }
        }
    }

    finish_maze(grid, &lattice, closed_cells(&lattice, &open_links))
}

/// Binary tree maze: every room opens its link to the north or to the east.
pub fn binary_tree_maze<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> StepLog {
    let Some(start) = grid.start() else {
        return StepLog::new();
    };
    let lattice = Lattice::new(grid, start);
    let mut open_links = vec![false; grid.len()];

    for i in 0..lattice.room_rows {
        for j in 0..lattice.room_cols {
            let mut options = Vec::with_capacity(2);
            if i > 0 {
                options.push((i - 1, j));
            }
            if j + 1 < lattice.room_cols {
                options.push((i, j + 1));
            }
            if let Some(&to) = options.choose(rng) {
                open_links[lattice.index(lattice.link((i, j), to))] = true;
            }
        }
    }

    finish_maze(grid, &lattice, closed_cells(&lattice, &open_links))
}
