//! Jump point search restricted to orthogonal moves.
//!
//! Straight runs are scanned without queueing intermediate cells. A run
//! stops at a jump point: the goal, a cell with a forced neighbour, or (for
//! vertical runs) a cell from which a horizontal scan finds a jump point.
//! Scanned cells are reported with `compare`; only expanded jump points are
//! `visit`ed. The final route is interpolated cell by cell between jump
//! points, so its length matches A*.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use algoviz_core::{AnimationStep, Coord, Grid, StepLog};

use super::{emit_path, working_copy};

const ALL_DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

pub fn jump_point_search(grid: &Grid) -> StepLog {
    let mut steps = StepLog::new();
    let Some((mut work, start, goal)) = working_copy(grid) else {
        return steps;
    };

    let h = |c: Coord| c.manhattan(goal) as u32;
    let mut seq = 0u64;
    let mut open = BinaryHeap::new();
    work.node_mut(start).distance = Some(0);
    open.push(Reverse((h(start), h(start), seq, start)));

    let mut reached = false;
    while let Some(Reverse((_, _, _, cur))) = open.pop() {
        if work.node(cur).is_visited {
            continue;
        }
        work.node_mut(cur).is_visited = true;
        steps.push(AnimationStep::visit(cur.row, cur.col));

        if cur == goal {
            reached = true;
            break;
        }

        let g = work.node(cur).distance.unwrap_or(0);
        for (dr, dc) in pruned_directions(cur, work.node(cur).previous) {
            let Some(jp) = jump(&work, cur, dr, dc, goal, &mut steps) else {
                continue;
            };
            let node = work.node_mut(jp);
            if node.is_visited {
                continue;
            }
            let candidate = g + cur.manhattan(jp) as u32;
            if node.distance.map_or(true, |d| candidate < d) {
                node.distance = Some(candidate);
                node.previous = Some(cur);
                seq += 1;
                open.push(Reverse((candidate + h(jp), h(jp), seq, jp)));
            }
        }
    }

    if reached {
        let path = interpolate(&work, start, goal);
        emit_path(&mut steps, &path);
    }
    steps
}

fn signum(from: usize, to: usize) -> isize {
    match to.cmp(&from) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}

/// Directions worth scanning from `cur` given the jump point it came from.
fn pruned_directions(cur: Coord, parent: Option<Coord>) -> Vec<(isize, isize)> {
    let Some(p) = parent else {
        return ALL_DIRECTIONS.to_vec();
    };
    let dr = signum(p.row, cur.row);
    let dc = signum(p.col, cur.col);
    if dc != 0 {
        vec![(0, dc), (-1, 0), (1, 0)]
    } else {
        vec![(dr, 0), (0, -1), (0, 1)]
    }
}

/// Scan from `from` in direction `(dr, dc)` until a jump point or a dead end.
fn jump(
    grid: &Grid,
    from: Coord,
    dr: isize,
    dc: isize,
    goal: Coord,
    steps: &mut StepLog,
) -> Option<Coord> {
    let mut cur = from;
    loop {
        let next = grid.offset(cur, dr, dc)?;
        if !grid.walkable(next) {
            return None;
        }
        steps.push(AnimationStep::compare([next.row, next.col]));
        if next == goal {
            return Some(next);
        }

        let (r, c) = (next.row as isize, next.col as isize);
        if dc != 0 {
            if (grid.walkable_at(r - 1, c) && !grid.walkable_at(r - 1, c - dc))
                || (grid.walkable_at(r + 1, c) && !grid.walkable_at(r + 1, c - dc))
            {
                return Some(next);
            }
        } else {
            if (grid.walkable_at(r, c - 1) && !grid.walkable_at(r - dr, c - 1))
                || (grid.walkable_at(r, c + 1) && !grid.walkable_at(r - dr, c + 1))
            {
                return Some(next);
            }
            if jump(grid, next, 0, 1, goal, steps).is_some()
                || jump(grid, next, 0, -1, goal, steps).is_some()
            {
                return Some(next);
            }
        }
        cur = next;
    }
}

/// Expand the jump-point chain into every cell along it.
fn interpolate(grid: &Grid, start: Coord, goal: Coord) -> Vec<Coord> {
    let mut points = vec![goal];
    let mut cur = goal;
    while cur != start {
        match grid.node(cur).previous {
            Some(p) => {
                points.push(p);
                cur = p;
            }
            None => break,
        }
    }
    points.reverse();

    let mut path = vec![start];
    for pair in points.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let dr = signum(from.row, to.row);
        let dc = signum(from.col, to.col);
        let mut c = from;
        while c != to {
            match grid.offset(c, dr, dc) {
                Some(n) => c = n,
                None => break,
            }
            path.push(c);
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinding::test_grids::{assert_valid_path, parse};
    use crate::pathfinding::{astar, bfs, path_cells, visited_cells};

    #[test]
    fn matches_astar_on_open_board() {
        let grid = Grid::default();
        let jps = path_cells(&jump_point_search(&grid));
        assert_valid_path(&grid, &jps);
        assert_eq!(jps.len(), path_cells(&astar(&grid)).len());
        assert_eq!(jps.len(), 31);
    }

    #[test]
    fn visits_fewer_cells_than_bfs_on_open_board() {
        let grid = Grid::default();
        let jps = visited_cells(&jump_point_search(&grid)).len();
        let plain = visited_cells(&bfs(&grid)).len();
        assert!(jps <= plain, "jps visited {} vs bfs {}", jps, plain);
    }

    #[test]
    fn matches_astar_through_gaps() {
        let boards: [&[&str]; 3] = [
            &["S.#....", "..#.#..", "....#.F"],
            &[
                "S..#......",
                ".#.#.####.",
                ".#...#....",
                ".####.#.#.",
                "......#.#F",
            ],
            &["..........", ".########.", ".#S.....#.", ".######.#.", "F.......#."],
        ];
        for rows in boards {
            let grid = parse(rows);
            let jps = path_cells(&jump_point_search(&grid));
            let reference = path_cells(&astar(&grid));
            assert_eq!(jps.len(), reference.len(), "board {:?}", rows);
            if !jps.is_empty() {
                assert_valid_path(&grid, &jps);
            }
        }
    }

    #[test]
    fn unreachable_goal() {
        let grid = parse(&["S.#", "###", "..F"]);
        assert!(path_cells(&jump_point_search(&grid)).is_empty());
    }

    #[test]
    fn scanned_cells_are_compares() {
        let grid = parse(&["S...F"]);
        let steps = jump_point_search(&grid);
        assert!(steps.iter().any(|s| matches!(s, AnimationStep::Compare { .. })));
        assert_eq!(visited_cells(&steps), vec![Coord::new(0, 0), Coord::new(0, 4)]);
    }
}
