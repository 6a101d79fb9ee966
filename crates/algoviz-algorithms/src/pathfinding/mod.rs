//! Grid pathfinders.
//!
//! All searches run on a private copy of the board with scratch fields
//! reset, treat walls as impassable, move in four directions with unit cost
//! and emit:
//!
//! - `visit [r, c]` each time a cell is settled or dequeued
//! - `path [r, c]` for every cell of the final route, start to finish
//!
//! An unreachable finish leaves a log of visits only.

mod best_first;
mod jps;
mod relaxation;
mod uninformed;

pub use best_first::{astar, dijkstra, greedy_best_first};
pub use jps::jump_point_search;
pub use relaxation::{bellman_ford, floyd_warshall};
pub use uninformed::{bfs, bidirectional, dfs};

use algoviz_core::{AnimationStep, Coord, Grid, StepLog};

/// Clone the board, clear scratch state and locate the endpoints.
pub(crate) fn working_copy(grid: &Grid) -> Option<(Grid, Coord, Coord)> {
    let (start, finish) = grid.endpoints().ok()?;
    let mut work = grid.clone();
    work.reset_scratch();
    Some((work, start, finish))
}

/// Follow `previous` links from `finish` back to `start`.
pub(crate) fn trace_previous(grid: &Grid, start: Coord, finish: Coord) -> Option<Vec<Coord>> {
    let mut path = vec![finish];
    let mut cur = finish;
    while cur != start {
        cur = grid.node(cur).previous?;
        path.push(cur);
    }
    path.reverse();
    Some(path)
}

pub(crate) fn emit_path(steps: &mut StepLog, path: &[Coord]) {
    steps.extend(path.iter().map(|c| AnimationStep::path(c.row, c.col)));
}

/// Cells named by the `path` steps of a log, in order.
pub fn path_cells(steps: &[AnimationStep]) -> Vec<Coord> {
    steps
        .iter()
        .filter_map(|s| match s {
            AnimationStep::Path { indices } if indices.len() == 2 => {
                Some(Coord::new(indices[0], indices[1]))
            }
            _ => None,
        })
        .collect()
}

/// Cells named by the `visit` steps of a log, in order.
pub fn visited_cells(steps: &[AnimationStep]) -> Vec<Coord> {
    steps
        .iter()
        .filter_map(|s| match s {
            AnimationStep::Visit { indices } if indices.len() == 2 => {
                Some(Coord::new(indices[0], indices[1]))
            }
            _ => None,
        })
        .collect()
}
