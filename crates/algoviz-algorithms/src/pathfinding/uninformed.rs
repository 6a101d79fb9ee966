//! Breadth-first, depth-first and bidirectional breadth-first search.

use std::collections::VecDeque;

use algoviz_core::{AnimationStep, Coord, Grid, StepLog};

use super::{emit_path, trace_previous, working_copy};

/// Breadth-first search; cells are marked when enqueued, visited when dequeued.
pub fn bfs(grid: &Grid) -> StepLog {
    let mut steps = StepLog::new();
    let Some((mut work, start, finish)) = working_copy(grid) else {
        return steps;
    };

    let mut queue = VecDeque::from([start]);
    let node = work.node_mut(start);
    node.is_visited = true;
    node.distance = Some(0);

    while let Some(cur) = queue.pop_front() {
        steps.push(AnimationStep::visit(cur.row, cur.col));
        if cur == finish {
            if let Some(path) = trace_previous(&work, start, finish) {
                emit_path(&mut steps, &path);
            }
            break;
        }

        let dist = work.node(cur).distance.unwrap_or(0);
        let around: Vec<Coord> = work.open_neighbors(cur).collect();
        for next in around {
            let node = work.node_mut(next);
            if node.is_visited {
                continue;
            }
            node.is_visited = true;
            node.distance = Some(dist + 1);
            node.previous = Some(cur);
            queue.push_back(next);
        }
    }
    steps
}

/// Depth-first search exploring Up, Right, Down, Left. Not shortest.
pub fn dfs(grid: &Grid) -> StepLog {
    let mut steps = StepLog::new();
    let Some((mut work, start, finish)) = working_copy(grid) else {
        return steps;
    };

    let mut stack: Vec<(Coord, Option<Coord>)> = vec![(start, None)];
    while let Some((cur, parent)) = stack.pop() {
        let node = work.node_mut(cur);
        if node.is_visited {
            continue;
        }
        node.is_visited = true;
        node.previous = parent;
        steps.push(AnimationStep::visit(cur.row, cur.col));

        if cur == finish {
            if let Some(path) = trace_previous(&work, start, finish) {
                emit_path(&mut steps, &path);
            }
            break;
        }

        let around: Vec<Coord> = work.open_neighbors(cur).collect();
        for next in around.into_iter().rev() {
            if !work.node(next).is_visited {
                stack.push((next, Some(cur)));
            }
        }
    }
    steps
}

struct Frontier {
    queue: VecDeque<Coord>,
    seen: Vec<bool>,
    parent: Vec<Option<Coord>>,
}

impl Frontier {
    fn new(grid: &Grid, origin: Coord) -> Self {
        let mut seen = vec![false; grid.len()];
        seen[grid.index(origin)] = true;
        Self {
            queue: VecDeque::from([origin]),
            seen,
            parent: vec![None; grid.len()],
        }
    }

    /// Chain of parents from `from` back to this frontier's origin.
    fn chain(&self, grid: &Grid, from: Coord) -> Vec<Coord> {
        let mut out = vec![from];
        let mut cur = from;
        while let Some(p) = self.parent[grid.index(cur)] {
            out.push(p);
            cur = p;
        }
        out
    }
}

/// Expand one cell of `side`; returns the meeting cell if it was already
/// reached by `other`.
fn expand(grid: &Grid, side: &mut Frontier, other: &Frontier, steps: &mut StepLog) -> Option<Coord> {
    let cur = side.queue.pop_front()?;
    steps.push(AnimationStep::visit(cur.row, cur.col));
    if other.seen[grid.index(cur)] {
        return Some(cur);
    }
    for next in grid.open_neighbors(cur) {
        let idx = grid.index(next);
        if !side.seen[idx] {
            side.seen[idx] = true;
            side.parent[idx] = Some(cur);
            side.queue.push_back(next);
        }
    }
    None
}

/// Two breadth-first frontiers, one from each endpoint, expanded
/// alternately. Each side keeps its own parent map; the route is stitched
/// together at the first cell dequeued by one side that the other has seen.
pub fn bidirectional(grid: &Grid) -> StepLog {
    let mut steps = StepLog::new();
    let Some((work, start, finish)) = working_copy(grid) else {
        return steps;
    };

    let mut forward = Frontier::new(&work, start);
    let mut backward = Frontier::new(&work, finish);

    let meet = loop {
        if forward.queue.is_empty() || backward.queue.is_empty() {
            break None;
        }
        if let Some(m) = expand(&work, &mut forward, &backward, &mut steps) {
            break Some(m);
        }
        if let Some(m) = expand(&work, &mut backward, &forward, &mut steps) {
            break Some(m);
        }
    };

    if let Some(meet) = meet {
        let mut path = forward.chain(&work, meet);
        path.reverse();
        path.extend(backward.chain(&work, meet).into_iter().skip(1));
        emit_path(&mut steps, &path);
        steps.push(AnimationStep::found([meet.row, meet.col]));
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinding::test_grids::{assert_valid_path, parse};
    use crate::pathfinding::{path_cells, visited_cells};

    #[test]
    fn bfs_three_by_three_scenario() {
        let grid = parse(&["S..", "...", "..F"]);
        let steps = bfs(&grid);
        let path = path_cells(&steps);
        assert_eq!(path.len(), 5);
        assert_valid_path(&grid, &path);
        // every cell of a 3x3 board is dequeued before the corner
        assert_eq!(visited_cells(&steps).len(), 9);
    }

    #[test]
    fn bfs_shortest_around_obstacles() {
        let grid = parse(&[
            "S.#.....",
            "..#.##..",
            "..#..#..",
            "....#..F",
        ]);
        let path = path_cells(&bfs(&grid));
        assert_valid_path(&grid, &path);
        assert_eq!(path.len(), 17);
    }

    #[test]
    fn dfs_prefers_up_then_right() {
        let grid = parse(&["...", "S.F", "..."]);
        let visits = visited_cells(&dfs(&grid));
        assert_eq!(visits[0], Coord::new(1, 0));
        assert_eq!(visits[1], Coord::new(0, 0));
        let path = path_cells(&dfs(&grid));
        assert_valid_path(&grid, &path);
    }

    #[test]
    fn bidirectional_builds_full_route() {
        let grid = parse(&[
            "S...#....",
            ".##.#.##.",
            ".#..#..#.",
            ".#.###.#.",
            "........F",
        ]);
        let steps = bidirectional(&grid);
        let path = path_cells(&steps);
        assert_valid_path(&grid, &path);
        assert!(matches!(steps.last(), Some(AnimationStep::Found { .. })));
    }

    #[test]
    fn bidirectional_disconnected() {
        let grid = parse(&["S#.", "##.", "..F"]);
        let steps = bidirectional(&grid);
        assert!(path_cells(&steps).is_empty());
        assert!(!steps.iter().any(|s| matches!(s, AnimationStep::Found { .. })));
    }

    #[test]
    fn missing_endpoints_give_empty_log() {
        let grid = Grid::empty(4, 4);
        assert!(bfs(&grid).is_empty());
        assert!(dfs(&grid).is_empty());
        assert!(bidirectional(&grid).is_empty());
    }
}
