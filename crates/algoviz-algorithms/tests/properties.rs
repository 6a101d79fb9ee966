//! Property-based tests for the step generators.
//!
//! Invariants checked against independent oracles:
//! 1. Every sort replays to the sorted input
//! 2. Optimal grid searches return shortest routes; the others return valid ones
//! 3. Kosaraju groups exactly the mutually reachable vertices
//! 4. BST inorder is sorted and AVL heights stay balanced
//! 5. KMP and Rabin-Karp report exactly the naive match offsets
//! 6. Knapsack and LCS tracebacks reach the reference optimum
//! 7. Generation is deterministic for a fixed seed

use std::collections::VecDeque;

use algoviz_algorithms::dp::{knapsack, lcs, KnapsackItem, KnapsackProblem};
use algoviz_algorithms::pathfinding::{
    astar, bellman_ford, bfs, bidirectional, dfs, dijkstra, greedy_best_first,
    jump_point_search, path_cells,
};
use algoviz_algorithms::replay::replay_array;
use algoviz_algorithms::scc::{component_ids, kosaraju, random_graph_with};
use algoviz_algorithms::strings::{kmp, match_starts, rabin_karp};
use algoviz_algorithms::tree::{BinaryTree, TraversalOrder, TreeFlavor};
use algoviz_algorithms::{distribution, generate_steps, sorting, Algorithm, Inputs};
use algoviz_core::{height, AnimationStep, Coord, Grid, StepLog, TreeNode};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ============================================================================
// Strategies
// ============================================================================

fn array_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-50i64..200, 0..40)
}

/// Board of 4..10 by 4..14 cells with corner endpoints and scattered walls.
fn grid_strategy() -> impl Strategy<Value = Grid> {
    (4usize..10, 4usize..14)
        .prop_flat_map(|(rows, cols)| {
            (
                Just(rows),
                Just(cols),
                prop::collection::vec(prop::bool::weighted(0.25), rows * cols),
            )
        })
        .prop_map(|(rows, cols, walls)| {
            let mut grid = Grid::new(rows, cols, Coord::new(0, 0), Coord::new(rows - 1, cols - 1));
            for (i, wall) in walls.into_iter().enumerate() {
                if wall {
                    // Endpoints refuse to become walls.
                    let _ = grid.set_wall(Coord::new(i / cols, i % cols));
                }
            }
            grid
        })
}

fn text_strategy() -> impl Strategy<Value = String> {
    "[ab]{0,24}"
}

fn pattern_strategy() -> impl Strategy<Value = String> {
    "[ab]{1,4}"
}

fn knapsack_strategy() -> impl Strategy<Value = KnapsackProblem> {
    (
        prop::collection::vec((1usize..6, 1i64..20), 1..7),
        1usize..12,
    )
        .prop_map(|(items, capacity)| KnapsackProblem {
            items: items
                .into_iter()
                .enumerate()
                .map(|(i, (weight, value))| KnapsackItem {
                    name: format!("Item {}", i + 1),
                    weight,
                    value,
                })
                .collect(),
            capacity,
        })
}

// ============================================================================
// Oracles
// ============================================================================

fn shortest_distance(grid: &Grid) -> Option<usize> {
    let (start, finish) = grid.endpoints().ok()?;
    let mut dist = vec![usize::MAX; grid.len()];
    let mut queue = VecDeque::from([start]);
    dist[grid.index(start)] = 0;
    while let Some(cur) = queue.pop_front() {
        if cur == finish {
            return Some(dist[grid.index(cur)]);
        }
        for next in grid.open_neighbors(cur) {
            let slot = grid.index(next);
            if dist[slot] == usize::MAX {
                dist[slot] = dist[grid.index(cur)] + 1;
                queue.push_back(next);
            }
        }
    }
    None
}

fn check_route(grid: &Grid, route: &[Coord]) -> Result<(), TestCaseError> {
    let (start, finish) = grid.endpoints().map_err(|e| TestCaseError::fail(e.to_string()))?;
    prop_assert_eq!(route.first().copied(), Some(start));
    prop_assert_eq!(route.last().copied(), Some(finish));
    for pair in route.windows(2) {
        prop_assert_eq!(pair[0].manhattan(pair[1]), 1, "route jumps at {:?}", pair);
    }
    for c in route {
        prop_assert!(grid.walkable(*c), "route crosses wall at {:?}", c);
    }
    Ok(())
}

fn naive_matches(text: &str, pattern: &str) -> Vec<usize> {
    let t: Vec<char> = text.chars().collect();
    let p: Vec<char> = pattern.chars().collect();
    if p.is_empty() || p.len() > t.len() {
        return Vec::new();
    }
    (0..=t.len() - p.len())
        .filter(|&i| t[i..i + p.len()] == p[..])
        .collect()
}

fn best_knapsack_value(problem: &KnapsackProblem) -> i64 {
    let n = problem.items.len();
    (0u32..1 << n)
        .filter_map(|mask| {
            let picked = problem.items.iter().enumerate().filter(|&(i, _)| mask & (1 << i) != 0);
            let (weight, value) = picked.fold((0, 0), |(w, v), (_, it)| (w + it.weight, v + it.value));
            (weight <= problem.capacity).then_some(value)
        })
        .max()
        .unwrap_or(0)
}

fn lcs_length(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev = vec![0usize; b.len() + 1];
    for ca in a.chars() {
        let mut cur = vec![0usize; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            cur[j + 1] = if ca == *cb { prev[j] + 1 } else { prev[j + 1].max(cur[j]) };
        }
        prev = cur;
    }
    prev[b.len()]
}

fn check_avl(node: &Option<Box<TreeNode>>) -> Result<u32, TestCaseError> {
    let Some(n) = node else {
        return Ok(0);
    };
    let left = check_avl(&n.left)?;
    let right = check_avl(&n.right)?;
    prop_assert!(left.abs_diff(right) <= 1, "unbalanced at {}", n.value);
    prop_assert_eq!(n.height, 1 + left.max(right));
    Ok(n.height)
}

// ============================================================================
// Sorting
// ============================================================================

const SORTS: [(&str, fn(&[i64]) -> StepLog); 10] = [
    ("bubble", sorting::bubble_sort),
    ("selection", sorting::selection_sort),
    ("insertion", sorting::insertion_sort),
    ("merge", sorting::merge_sort),
    ("quick", sorting::quick_sort),
    ("heap", sorting::heap_sort),
    ("shell", sorting::shell_sort),
    ("counting", distribution::counting_sort),
    ("radix", distribution::radix_sort),
    ("bucket", distribution::bucket_sort),
];

proptest! {
    #[test]
    fn every_sort_replays_to_sorted(array in array_strategy()) {
        let mut expected = array.clone();
        expected.sort_unstable();
        for (name, sort) in SORTS {
            let steps = sort(&array);
            prop_assert_eq!(&replay_array(&array, &steps), &expected, "{} sort", name);
        }
    }

    #[test]
    fn bubble_compares_every_pair_of_reversed_input(n in 0usize..30) {
        let array: Vec<i64> = (0..n as i64).rev().collect();
        let compares = sorting::bubble_sort(&array)
            .iter()
            .filter(|s| matches!(s, AnimationStep::Compare { .. }))
            .count();
        prop_assert_eq!(compares, n * n.saturating_sub(1) / 2);
    }
}

// ============================================================================
// Pathfinding
// ============================================================================

proptest! {
    #[test]
    fn optimal_searches_find_shortest_routes(grid in grid_strategy()) {
        let best = shortest_distance(&grid);
        for (name, search) in [
            ("dijkstra", dijkstra as fn(&Grid) -> StepLog),
            ("astar", astar),
            ("bfs", bfs),
            ("jps", jump_point_search),
            ("bellman-ford", bellman_ford),
        ] {
            let route = path_cells(&search(&grid));
            match best {
                Some(d) => {
                    check_route(&grid, &route)?;
                    prop_assert_eq!(route.len(), d + 1, "{} route length", name);
                }
                None => prop_assert!(route.is_empty(), "{} invented a route", name),
            }
        }
    }

    #[test]
    fn other_searches_find_valid_routes(grid in grid_strategy()) {
        let reachable = shortest_distance(&grid).is_some();
        for (name, search) in [
            ("dfs", dfs as fn(&Grid) -> StepLog),
            ("greedy", greedy_best_first),
            ("bidirectional", bidirectional),
        ] {
            let route = path_cells(&search(&grid));
            if reachable {
                check_route(&grid, &route)?;
            } else {
                prop_assert!(route.is_empty(), "{} invented a route", name);
            }
        }
    }

    #[test]
    fn searches_leave_the_board_untouched(grid in grid_strategy()) {
        let before = grid.clone();
        let _ = astar(&grid);
        let _ = jump_point_search(&grid);
        prop_assert_eq!(grid, before);
    }
}

// ============================================================================
// Graphs
// ============================================================================

proptest! {
    #[test]
    fn kosaraju_matches_mutual_reachability(n in 1usize..12, seed in any::<u64>()) {
        let graph = random_graph_with(n, &mut StdRng::seed_from_u64(seed));
        let adj = graph.adjacency();
        let reach: Vec<Vec<bool>> = (0..n)
            .map(|s| {
                let mut seen = vec![false; n];
                let mut stack = vec![s];
                seen[s] = true;
                while let Some(u) = stack.pop() {
                    for &v in &adj[u] {
                        if !seen[v] {
                            seen[v] = true;
                            stack.push(v);
                        }
                    }
                }
                seen
            })
            .collect();

        let ids = component_ids(&kosaraju(&graph), n);
        for a in 0..n {
            prop_assert!(ids[a] >= 0);
            for b in 0..n {
                let together = ids[a] == ids[b];
                prop_assert_eq!(together, reach[a][b] && reach[b][a], "nodes {} and {}", a, b);
            }
        }
    }
}

// ============================================================================
// Trees
// ============================================================================

proptest! {
    #[test]
    fn bst_inorder_is_sorted_and_deduplicated(values in prop::collection::vec(-100i64..100, 0..40)) {
        let mut tree = BinaryTree::new(TreeFlavor::Bst);
        for v in &values {
            tree.insert(*v);
        }
        let mut expected = values.clone();
        expected.sort_unstable();
        expected.dedup();
        prop_assert_eq!(tree.traverse_values(TraversalOrder::Inorder), expected);
    }

    #[test]
    fn avl_stays_balanced_through_deletes(
        values in prop::collection::vec(-100i64..100, 1..50),
        removals in prop::collection::vec(-100i64..100, 0..25),
    ) {
        let mut tree = BinaryTree::new(TreeFlavor::Avl);
        for v in &values {
            tree.insert(*v);
        }
        for v in &removals {
            let had = tree.contains(*v);
            prop_assert_eq!(tree.delete(*v), had);
            let root = tree.root().cloned().map(Box::new);
            check_avl(&root)?;
        }
        let root = tree.root().cloned().map(Box::new);
        let h = check_avl(&root)?;
        prop_assert_eq!(h, height(&root));
        // Height bound of an AVL tree: h < 1.45 log2(n + 2).
        let bound = 1.45 * ((tree.len() + 2) as f64).log2();
        prop_assert!((h as f64) < bound + 1.0);
    }
}

// ============================================================================
// Strings and DP
// ============================================================================

proptest! {
    #[test]
    fn matchers_agree_with_naive_search(text in text_strategy(), pattern in pattern_strategy()) {
        let expected = naive_matches(&text, &pattern);
        prop_assert_eq!(match_starts(&kmp(&text, &pattern)), expected.clone());
        prop_assert_eq!(match_starts(&rabin_karp(&text, &pattern)), expected);
    }

    #[test]
    fn knapsack_reaches_the_optimum(problem in knapsack_strategy()) {
        let steps = knapsack(&problem);
        let picked: Vec<usize> = steps
            .iter()
            .rev()
            .find_map(|s| match s {
                AnimationStep::Found { indices } => Some(indices.chunks(2).map(|p| p[0]).collect()),
                _ => None,
            })
            .unwrap_or_default();

        let weight: usize = picked.iter().map(|&i| problem.items[i - 1].weight).sum();
        let value: i64 = picked.iter().map(|&i| problem.items[i - 1].value).sum();
        prop_assert!(weight <= problem.capacity);
        prop_assert_eq!(value, best_knapsack_value(&problem));
    }

    #[test]
    fn lcs_traceback_spells_a_longest_common_subsequence(a in "[ACGT]{1,10}", b in "[ACGT]{1,10}") {
        let steps = lcs(&a, &b);
        let (m, n) = (a.chars().count(), b.chars().count());
        let corner = steps.iter().rev().find_map(|s| match s {
            AnimationStep::UpdateTable { row, col, val } if *row == m && *col == n => val.as_int(),
            _ => None,
        });
        let expected = lcs_length(&a, &b);
        prop_assert_eq!(corner, Some(expected as i64));

        let mut cells: Vec<(usize, usize)> = steps
            .iter()
            .rev()
            .find_map(|s| match s {
                AnimationStep::Found { indices } => Some(indices.chunks(2).map(|p| (p[0], p[1])).collect()),
                _ => None,
            })
            .unwrap_or_default();
        cells.reverse();
        prop_assert_eq!(cells.len(), expected);

        let (ac, bc): (Vec<char>, Vec<char>) = (a.chars().collect(), b.chars().collect());
        for pair in cells.windows(2) {
            prop_assert!(pair[0].0 < pair[1].0 && pair[0].1 < pair[1].1);
        }
        for (i, j) in cells {
            prop_assert_eq!(ac[i - 1], bc[j - 1]);
        }
    }
}

// ============================================================================
// Determinism
// ============================================================================

proptest! {
    #[test]
    fn generation_is_repeatable_for_a_seed(array in array_strategy(), seed in any::<u64>()) {
        for alg in [Algorithm::Quick, Algorithm::Linear, Algorithm::Binary, Algorithm::Lis] {
            let a = generate_steps(alg, &Inputs::array(&array), &mut StdRng::seed_from_u64(seed));
            let b = generate_steps(alg, &Inputs::array(&array), &mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(a, b, "{}", alg);
        }
    }

    #[test]
    fn mazes_are_repeatable_for_a_seed(seed in any::<u64>()) {
        let grid = Grid::default();
        for alg in [Algorithm::RecursiveDivision, Algorithm::PrimsMaze, Algorithm::BinaryTreeMaze] {
            let a = generate_steps(alg, &Inputs::grid(&grid), &mut StdRng::seed_from_u64(seed));
            let b = generate_steps(alg, &Inputs::grid(&grid), &mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(a, b, "{}", alg);
        }
    }
}
