//! Edge-relaxation searches: Bellman-Ford and Floyd-Warshall on the grid graph.

use algoviz_core::{AnimationStep, Coord, Grid, StepLog};

use super::{emit_path, working_copy};

fn edge_compare(u: Coord, v: Coord) -> AnimationStep {
    AnimationStep::compare([u.row, u.col, v.row, v.col])
}

/// Round-based Bellman-Ford. Each edge check is a `compare [r1, c1, r2, c2]`;
/// a cell is `visit`ed the first time it becomes reachable. Stops after a
/// round without updates.
pub fn bellman_ford(grid: &Grid) -> StepLog {
    let mut steps = StepLog::new();
    let Some((mut work, start, finish)) = working_copy(grid) else {
        return steps;
    };

    let cells: Vec<Coord> = work
        .nodes()
        .iter()
        .filter(|n| !n.is_wall)
        .map(|n| n.coord())
        .collect();

    work.node_mut(start).distance = Some(0);
    work.node_mut(start).is_visited = true;
    steps.push(AnimationStep::visit(start.row, start.col));

    for _ in 1..cells.len() {
        let mut changed = false;
        for &u in &cells {
            let Some(du) = work.node(u).distance else {
                continue;
            };
            let around: Vec<Coord> = work.open_neighbors(u).collect();
            for v in around {
                steps.push(edge_compare(u, v));
                let node = work.node_mut(v);
                if node.distance.map_or(true, |dv| du + 1 < dv) {
                    node.distance = Some(du + 1);
                    node.previous = Some(u);
                    changed = true;
                    if !node.is_visited {
                        node.is_visited = true;
                        steps.push(AnimationStep::visit(v.row, v.col));
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }

    if work.node(finish).distance.is_some() {
        if let Some(path) = super::trace_previous(&work, start, finish) {
            emit_path(&mut steps, &path);
        }
    }
    steps
}

const UNREACHED: u32 = u32::MAX;
const NO_HOP: u32 = u32::MAX;

/// All-pairs Floyd-Warshall over open cells.
///
/// Emits a `visit` per intermediate cell `k` and a `compare` for every
/// relaxation that improves the start cell's row. The route is rebuilt from
/// the next-hop matrix. Cost is cubic in open cells, so large open boards
/// take a while to generate.
pub fn floyd_warshall(grid: &Grid) -> StepLog {
    let mut steps = StepLog::new();
    let Some((work, start, finish)) = working_copy(grid) else {
        return steps;
    };

    let cells: Vec<Coord> = work
        .nodes()
        .iter()
        .filter(|n| !n.is_wall)
        .map(|n| n.coord())
        .collect();
    let n = cells.len();
    let mut slot = vec![usize::MAX; work.len()];
    for (i, c) in cells.iter().enumerate() {
        slot[work.index(*c)] = i;
    }

    let mut dist = vec![UNREACHED; n * n];
    let mut next = vec![NO_HOP; n * n];
    for (i, &c) in cells.iter().enumerate() {
        dist[i * n + i] = 0;
        next[i * n + i] = i as u32;
        for nb in work.open_neighbors(c) {
            let j = slot[work.index(nb)];
            dist[i * n + j] = 1;
            next[i * n + j] = j as u32;
        }
    }

    let s = slot[work.index(start)];
    let f = slot[work.index(finish)];

    for k in 0..n {
        steps.push(AnimationStep::visit(cells[k].row, cells[k].col));
        for i in 0..n {
            let dik = dist[i * n + k];
            if dik == UNREACHED {
                continue;
            }
            for j in 0..n {
                let dkj = dist[k * n + j];
                if dkj == UNREACHED {
                    continue;
                }
                let through = dik + dkj;
                if through < dist[i * n + j] {
                    dist[i * n + j] = through;
                    next[i * n + j] = next[i * n + k];
                    if i == s {
                        steps.push(edge_compare(cells[i], cells[j]));
                    }
                }
            }
        }
    }

    if next[s * n + f] != NO_HOP {
        let mut path = vec![cells[s]];
        let mut u = s;
        while u != f {
            u = next[u * n + f] as usize;
            path.push(cells[u]);
        }
        emit_path(&mut steps, &path);
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinding::test_grids::{assert_valid_path, parse};
    use crate::pathfinding::{bfs, path_cells};

    fn board() -> Grid {
        parse(&[
            "S..#....",
            ".#.#.##.",
            ".#...#..",
            ".####.#F",
            "........",
        ])
    }

    #[test]
    fn bellman_ford_matches_bfs_length() {
        let grid = board();
        let path = path_cells(&bellman_ford(&grid));
        assert_valid_path(&grid, &path);
        assert_eq!(path.len(), path_cells(&bfs(&grid)).len());
    }

    #[test]
    fn floyd_warshall_matches_bfs_length() {
        let grid = board();
        let path = path_cells(&floyd_warshall(&grid));
        assert_valid_path(&grid, &path);
        assert_eq!(path.len(), path_cells(&bfs(&grid)).len());
    }

    #[test]
    fn bellman_ford_edge_compares_have_four_indices() {
        let steps = bellman_ford(&parse(&["S.F"]));
        assert!(steps
            .iter()
            .filter(|s| matches!(s, AnimationStep::Compare { .. }))
            .all(|s| s.indices().len() == 4));
    }

    #[test]
    fn unreachable_finish_has_no_path() {
        let grid = parse(&["S#F"]);
        assert!(path_cells(&bellman_ford(&grid)).is_empty());
        assert!(path_cells(&floyd_warshall(&grid)).is_empty());
    }

    #[test]
    fn floyd_warshall_visits_every_open_cell_once() {
        let grid = parse(&["S.#", "..F"]);
        let visits = crate::pathfinding::visited_cells(&floyd_warshall(&grid));
        assert_eq!(visits.len(), 5);
    }
}
