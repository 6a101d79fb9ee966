//! The board as a graph: open cells are vertices, orthogonal neighbours are
//! edges. Spanning trees and connected components.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use algoviz_core::{AnimationStep, Coord, Grid, StepLog};
use rand::seq::SliceRandom;
use rand::Rng;

fn edge_compare(u: Coord, v: Coord) -> AnimationStep {
    AnimationStep::compare([u.row, u.col, v.row, v.col])
}

fn open_edges(grid: &Grid) -> Vec<(Coord, Coord)> {
    let mut edges = Vec::new();
    for node in grid.nodes().iter().filter(|n| !n.is_wall) {
        let c = node.coord();
        for (dr, dc) in [(0isize, 1isize), (1, 0)] {
            if let Some(n) = grid.offset(c, dr, dc) {
                if grid.walkable(n) {
                    edges.push((c, n));
                }
            }
        }
    }
    edges
}

/// Prim's minimum spanning tree from the start cell with random edge weights.
///
/// `compare` marks each edge taken off the heap; a cell joining the tree is
/// `visit`ed and the accepted edge's endpoints are marked `path`.
pub fn prims_mst<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> StepLog {
    let mut steps = StepLog::new();
    let Some(root) = grid
        .start()
        .or_else(|| grid.nodes().iter().find(|n| !n.is_wall).map(|n| n.coord()))
    else {
        return steps;
    };

    // one weight per horizontal and per vertical edge slot
    let mut right = vec![0u32; grid.len()];
    let mut down = vec![0u32; grid.len()];
    for i in 0..grid.len() {
        right[i] = rng.gen_range(1..=100);
        down[i] = rng.gen_range(1..=100);
    }
    let weight = |a: Coord, b: Coord| -> u32 {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if lo.row == hi.row {
            right[grid.index(lo)]
        } else {
            down[grid.index(lo)]
        }
    };

    let mut in_tree = vec![false; grid.len()];
    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;
    in_tree[grid.index(root)] = true;
    steps.push(AnimationStep::visit(root.row, root.col));
    for n in grid.open_neighbors(root) {
        seq += 1;
        heap.push(Reverse((weight(root, n), seq, root, n)));
    }

    while let Some(Reverse((_, _, from, to))) = heap.pop() {
        if in_tree[grid.index(to)] {
            continue;
        }
        steps.push(edge_compare(from, to));
        in_tree[grid.index(to)] = true;
        steps.push(AnimationStep::visit(to.row, to.col));
        steps.push(AnimationStep::path(from.row, from.col));
        steps.push(AnimationStep::path(to.row, to.col));
        for n in grid.open_neighbors(to) {
            if !in_tree[grid.index(n)] {
                seq += 1;
                heap.push(Reverse((weight(to, n), seq, to, n)));
            }
        }
    }
    steps
}

struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}

/// Kruskal's spanning forest over shuffled edges (a random weight order).
/// Each edge considered is a `compare`; accepted edges mark both ends `path`.
pub fn kruskals_mst<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> StepLog {
    let mut steps = StepLog::new();
    let mut edges = open_edges(grid);
    edges.shuffle(rng);

    let mut sets = DisjointSet::new(grid.len());
    for (u, v) in edges {
        steps.push(edge_compare(u, v));
        if sets.union(grid.index(u), grid.index(v)) {
            steps.push(AnimationStep::path(u.row, u.col));
            steps.push(AnimationStep::path(v.row, v.col));
        }
    }
    steps
}

/// Flood every connected region of open cells, row-major seed order.
pub fn connected_components(grid: &Grid) -> StepLog {
    let mut steps = StepLog::new();
    let mut seen = vec![false; grid.len()];

    for seed in grid.nodes().iter().filter(|n| !n.is_wall).map(|n| n.coord()) {
        if seen[grid.index(seed)] {
            continue;
        }
        seen[grid.index(seed)] = true;
        let mut queue = VecDeque::from([seed]);
        while let Some(c) = queue.pop_front() {
            steps.push(AnimationStep::visit(c.row, c.col));
            for n in grid.open_neighbors(c) {
                let idx = grid.index(n);
                if !seen[idx] {
                    seen[idx] = true;
                    queue.push_back(n);
                }
            }
        }
    }
    steps
}

/// Number of connected regions of open cells.
pub fn count_components(grid: &Grid) -> usize {
    let mut sets = DisjointSet::new(grid.len());
    let mut regions = grid.nodes().iter().filter(|n| !n.is_wall).count();
    for (u, v) in open_edges(grid) {
        if sets.union(grid.index(u), grid.index(v)) {
            regions -= 1;
        }
    }
    regions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinding::visited_cells;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn accepted_edges(steps: &[AnimationStep]) -> usize {
        steps
            .iter()
            .filter(|s| matches!(s, AnimationStep::Path { .. }))
            .count()
            / 2
    }

    fn split_board() -> Grid {
        let mut grid = Grid::new(4, 5, Coord::new(0, 0), Coord::new(3, 4));
        for row in 0..4 {
            grid.set_wall(Coord::new(row, 2)).unwrap();
        }
        grid
    }

    #[test]
    fn prims_spans_the_start_region() {
        let grid = split_board();
        let steps = prims_mst(&grid, &mut StdRng::seed_from_u64(1));
        // left region is 4 x 2 cells
        assert_eq!(visited_cells(&steps).len(), 8);
        assert_eq!(accepted_edges(&steps), 7);
    }

    #[test]
    fn kruskal_builds_spanning_forest() {
        let grid = split_board();
        let steps = kruskals_mst(&grid, &mut StdRng::seed_from_u64(5));
        let open = grid.len() - grid.wall_count();
        assert_eq!(accepted_edges(&steps), open - count_components(&grid));
    }

    #[test]
    fn components_visit_every_open_cell_once() {
        let grid = split_board();
        let visits = visited_cells(&connected_components(&grid));
        assert_eq!(visits.len(), 16);
        assert_eq!(count_components(&grid), 2);
    }
}
