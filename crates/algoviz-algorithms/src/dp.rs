//! Dynamic programming: 0/1 knapsack, longest common subsequence and
//! longest increasing subsequence.
//!
//! Table cells are addressed as `[row, col]`. `target` and `found` steps
//! that name several cells carry them as consecutive `row, col` pairs, and
//! traceback `found` steps are cumulative: each one lists every cell found
//! so far.

use algoviz_core::{AnimationStep, DpTable, StepLog, TableValue};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnapsackItem {
    pub name: String,
    pub weight: usize,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnapsackProblem {
    pub items: Vec<KnapsackItem>,
    pub capacity: usize,
}

impl Default for KnapsackProblem {
    /// Three items, capacity 6; the best load is items 1 and 3 for 14.
    fn default() -> Self {
        let item = |n: usize, weight: usize, value: i64| KnapsackItem {
            name: format!("Item {}", n),
            weight,
            value,
        };
        Self {
            items: vec![item(1, 1, 4), item(2, 3, 9), item(3, 4, 10)],
            capacity: 6,
        }
    }
}

/// Labeled table with the zero row and column pre-filled.
pub fn knapsack_table(problem: &KnapsackProblem) -> DpTable {
    let rows = problem.items.len() + 1;
    let cols = problem.capacity + 1;
    let mut table = DpTable::new(rows, cols);
    for (r, row) in table.cells.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            if r == 0 || c == 0 {
                *cell = Some(TableValue::Int(0));
            }
        }
    }
    table.row_labels = std::iter::once("-".to_string())
        .chain(
            problem
                .items
                .iter()
                .map(|i| format!("{} (w:{}, v:{})", i.name, i.weight, i.value)),
        )
        .collect();
    table.col_labels = (0..cols).map(|c| format!("C{}", c)).collect();
    table.problem_statement = std::iter::once(format!(
        "Problem: Maximize Value (Capacity: {})",
        problem.capacity
    ))
    .chain(
        problem
            .items
            .iter()
            .map(|i| format!("• {}: W={}, V={}", i.name, i.weight, i.value)),
    )
    .collect::<Vec<_>>()
    .join("\n");
    table
}

/// Bottom-up 0/1 knapsack followed by the item traceback.
pub fn knapsack(problem: &KnapsackProblem) -> StepLog {
    let mut steps = StepLog::new();
    let n = problem.items.len();
    let cap = problem.capacity;
    let mut dp = vec![vec![0i64; cap + 1]; n + 1];

    for i in 1..=n {
        let item = &problem.items[i - 1];
        for w in 1..=cap {
            steps.push(AnimationStep::compare([i, w]));
            if item.weight <= w {
                steps.push(AnimationStep::target([i - 1, w, i - 1, w - item.weight]));
                dp[i][w] = dp[i - 1][w].max(item.value + dp[i - 1][w - item.weight]);
            } else {
                steps.push(AnimationStep::target([i - 1, w]));
                dp[i][w] = dp[i - 1][w];
            }
            steps.push(AnimationStep::update_table(i, w, dp[i][w]));
        }
    }

    let mut chosen = Vec::new();
    let mut w = cap;
    for i in (1..=n).rev() {
        if dp[i][w] != dp[i - 1][w] {
            chosen.extend([i, w]);
            steps.push(AnimationStep::found(chosen.clone()));
            w -= problem.items[i - 1].weight;
        }
    }
    steps
}

/// Labeled LCS table with the empty-prefix row and column pre-filled.
pub fn lcs_table(a: &str, b: &str) -> DpTable {
    let (m, n) = (a.chars().count(), b.chars().count());
    let mut table = DpTable::new(m + 1, n + 1);
    for (r, row) in table.cells.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            if r == 0 || c == 0 {
                *cell = Some(TableValue::Int(0));
            }
        }
    }
    table.row_labels = std::iter::once("ε".to_string())
        .chain(a.chars().map(String::from))
        .collect();
    table.col_labels = std::iter::once("ε".to_string())
        .chain(b.chars().map(String::from))
        .collect();
    table.problem_statement = format!(
        "Longest Common Subsequence\nString 1: \"{}\"\nString 2: \"{}\"",
        a, b
    );
    table
}

/// LCS table fill, then a traceback emitting cumulative `found` cells for
/// every matched character.
pub fn lcs(a: &str, b: &str) -> StepLog {
    let mut steps = StepLog::new();
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());
    let mut dp = vec![vec![0i64; n + 1]; m + 1];

    for i in 1..=m {
        for j in 1..=n {
            steps.push(AnimationStep::compare([i, j]));
            if a[i - 1] == b[j - 1] {
                steps.push(AnimationStep::target([i - 1, j - 1]));
                dp[i][j] = dp[i - 1][j - 1] + 1;
            } else {
                steps.push(AnimationStep::target([i - 1, j, i, j - 1]));
                dp[i][j] = dp[i - 1][j].max(dp[i][j - 1]);
            }
            steps.push(AnimationStep::update_table(i, j, dp[i][j]));
        }
    }

    let mut found = Vec::new();
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            found.extend([i, j]);
            steps.push(AnimationStep::found(found.clone()));
            i -= 1;
            j -= 1;
        } else if dp[i - 1][j] > dp[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    steps
}

/// Quadratic LIS with the length table in the aux track and the chosen
/// subsequence reported by a final `found`.
pub fn lis(array: &[i64]) -> StepLog {
    let mut steps = StepLog::new();
    let n = array.len();
    if n == 0 {
        return steps;
    }
    let mut len = vec![1i64; n];
    let mut prev: Vec<Option<usize>> = vec![None; n];
    for i in 0..n {
        steps.push(AnimationStep::update_aux(i, 1));
    }

    for i in 1..n {
        for j in 0..i {
            steps.push(AnimationStep::compare([i, j]));
            if array[j] < array[i] && len[j] + 1 > len[i] {
                len[i] = len[j] + 1;
                prev[i] = Some(j);
                steps.push(AnimationStep::flash(i));
                steps.push(AnimationStep::update_aux(i, len[i]));
            }
        }
    }

    let mut best = 0;
    for i in 1..n {
        if len[i] > len[best] {
            best = i;
        }
    }
    let mut path = vec![best];
    let mut cur = best;
    while let Some(p) = prev[cur] {
        path.push(p);
        cur = p;
    }
    path.reverse();
    steps.push(AnimationStep::found(path));
    steps
}
