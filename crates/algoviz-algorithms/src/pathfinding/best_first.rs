//! Priority-queue searches: Dijkstra, A* and greedy best-first.
//!
//! Ties are broken by insertion order so runs are deterministic.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use algoviz_core::{AnimationStep, Coord, Grid, StepLog};

use super::{emit_path, trace_previous, working_copy};

/// Dijkstra's algorithm with unit edge weights.
pub fn dijkstra(grid: &Grid) -> StepLog {
    let mut steps = StepLog::new();
    let Some((mut work, start, finish)) = working_copy(grid) else {
        return steps;
    };

    let mut seq = 0u64;
    let mut open = BinaryHeap::new();
    work.node_mut(start).distance = Some(0);
    open.push(Reverse((0u32, seq, start)));

    while let Some(Reverse((dist, _, cur))) = open.pop() {
        if work.node(cur).is_visited {
            continue;
        }
        work.node_mut(cur).is_visited = true;
        steps.push(AnimationStep::visit(cur.row, cur.col));

        if cur == finish {
            if let Some(path) = trace_previous(&work, start, finish) {
                emit_path(&mut steps, &path);
            }
            break;
        }

        let around: Vec<Coord> = work.open_neighbors(cur).collect();
        for next in around {
            let node = work.node_mut(next);
            if node.is_visited {
                continue;
            }
            let candidate = dist + 1;
            if node.distance.map_or(true, |d| candidate < d) {
                node.distance = Some(candidate);
                node.previous = Some(cur);
                seq += 1;
                open.push(Reverse((candidate, seq, next)));
            }
        }
    }
    steps
}

/// A* with the Manhattan heuristic; ties prefer the smaller heuristic.
pub fn astar(grid: &Grid) -> StepLog {
    let mut steps = StepLog::new();
    let Some((mut work, start, finish)) = working_copy(grid) else {
        return steps;
    };

    let h = |c: Coord| c.manhattan(finish) as u32;
    let mut seq = 0u64;
    let mut open = BinaryHeap::new();
    work.node_mut(start).distance = Some(0);
    open.push(Reverse((h(start), h(start), seq, start)));

    while let Some(Reverse((_, _, _, cur))) = open.pop() {
        if work.node(cur).is_visited {
            continue;
        }
        work.node_mut(cur).is_visited = true;
        steps.push(AnimationStep::visit(cur.row, cur.col));

        if cur == finish {
            if let Some(path) = trace_previous(&work, start, finish) {
                emit_path(&mut steps, &path);
            }
            break;
        }

        let g = work.node(cur).distance.unwrap_or(0);
        let around: Vec<Coord> = work.open_neighbors(cur).collect();
        for next in around {
            let node = work.node_mut(next);
            if node.is_visited {
                continue;
            }
            let candidate = g + 1;
            if node.distance.map_or(true, |d| candidate < d) {
                node.distance = Some(candidate);
                node.previous = Some(cur);
                seq += 1;
                open.push(Reverse((candidate + h(next), h(next), seq, next)));
            }
        }
    }
    steps
}

/// Greedy best-first: ordered by heuristic only. Cells are claimed on
/// discovery, so the route is valid but not necessarily shortest.
pub fn greedy_best_first(grid: &Grid) -> StepLog {
    let mut steps = StepLog::new();
    let Some((mut work, start, finish)) = working_copy(grid) else {
        return steps;
    };

    let h = |c: Coord| c.manhattan(finish);
    let mut seq = 0u64;
    let mut open = BinaryHeap::new();
    let mut discovered = vec![false; work.len()];
    discovered[work.index(start)] = true;
    open.push(Reverse((h(start), seq, start)));

    while let Some(Reverse((_, _, cur))) = open.pop() {
        work.node_mut(cur).is_visited = true;
        steps.push(AnimationStep::visit(cur.row, cur.col));

        if cur == finish {
            if let Some(path) = trace_previous(&work, start, finish) {
                emit_path(&mut steps, &path);
            }
            break;
        }

        let around: Vec<Coord> = work.open_neighbors(cur).collect();
        for next in around {
            let idx = work.index(next);
            if discovered[idx] {
                continue;
            }
            discovered[idx] = true;
            work.node_mut(next).previous = Some(cur);
            seq += 1;
            open.push(Reverse((h(next), seq, next)));
        }
    }
    steps
}
