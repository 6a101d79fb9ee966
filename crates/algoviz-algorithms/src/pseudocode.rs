//! Maps steps back to pseudocode lines and human-readable log lines.

use algoviz_core::AnimationStep;

use crate::registry::Algorithm;

/// Pseudocode listing with a step-kind to line mapping. Line numbers are
/// zero-based indices into `lines`.
#[derive(Debug)]
pub struct Pseudocode {
    pub lines: &'static [&'static str],
    rules: &'static [(&'static str, usize)],
    /// Line shown for step kinds without a rule.
    pub fallback: usize,
}

impl Pseudocode {
    pub fn line_for(&self, step: &AnimationStep) -> usize {
        let kind = step.kind();
        self.rules
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(self.fallback, |&(_, line)| line)
    }
}

static BUBBLE: Pseudocode = Pseudocode {
    lines: &[
        "for i = 0 to n-1:",
        "  for j = 0 to n-i-1:",
        "    if arr[j] > arr[j+1]:",
        "      swap(arr[j], arr[j+1])",
        "  if no swaps: break",
    ],
    rules: &[("compare", 2), ("swap", 3)],
    fallback: 1,
};

static SELECTION: Pseudocode = Pseudocode {
    lines: &[
        "for i = 0 to n-1:",
        "  min_idx = i",
        "  for j = i+1 to n:",
        "    if arr[j] < arr[min_idx]:",
        "      min_idx = j",
        "  swap(arr[i], arr[min_idx])",
    ],
    rules: &[("compare", 3), ("swap", 5)],
    fallback: 2,
};

static INSERTION: Pseudocode = Pseudocode {
    lines: &[
        "for i = 1 to n:",
        "  key = arr[i], j = i-1",
        "  while j >= 0 and arr[j] > key:",
        "    arr[j+1] = arr[j]",
        "    j = j - 1",
        "  arr[j+1] = key",
    ],
    rules: &[("compare", 2), ("swap", 3), ("overwrite", 3)],
    fallback: 0,
};

static MERGE: Pseudocode = Pseudocode {
    lines: &[
        "function mergeSort(arr, l, r):",
        "  if l >= r: return",
        "  m = (l + r) / 2",
        "  mergeSort(arr, l, m)",
        "  mergeSort(arr, m+1, r)",
        "  merge(arr, l, m, r)",
    ],
    rules: &[("compare", 5), ("overwrite", 5)],
    fallback: 2,
};

static QUICK: Pseudocode = Pseudocode {
    lines: &[
        "function partition(arr, low, high):",
        "  pivot = arr[high]",
        "  i = low - 1",
        "  for j = low to high - 1:",
        "    if arr[j] < pivot:",
        "      i++, swap(arr[i], arr[j])",
        "  swap(arr[i + 1], arr[high])",
        "  return i + 1",
    ],
    rules: &[("highlight", 1), ("compare", 4), ("swap", 5)],
    fallback: 3,
};

static HEAP: Pseudocode = Pseudocode {
    lines: &[
        "buildMaxHeap(arr)",
        "for i = n-1 to 1:",
        "  swap(arr[0], arr[i])",
        "  heapify(arr, 0, i)",
    ],
    rules: &[("swap", 2), ("compare", 3)],
    fallback: 1,
};

static LINEAR: Pseudocode = Pseudocode {
    lines: &[
        "for i = 0 to n-1:",
        "  if arr[i] == target:",
        "    return i",
        "return -1",
    ],
    rules: &[("compare", 1), ("found", 2)],
    fallback: 0,
};

static BINARY: Pseudocode = Pseudocode {
    lines: &[
        "lo = 0, hi = n-1",
        "while lo <= hi:",
        "  mid = (lo + hi) / 2",
        "  if arr[mid] == target: return mid",
        "  if arr[mid] < target: lo = mid + 1",
        "  else: hi = mid - 1",
    ],
    rules: &[("replace", 0), ("target", 0), ("compare", 2), ("found", 3)],
    fallback: 1,
};

static BFS: Pseudocode = Pseudocode {
    lines: &[
        "Q.push(start), mark visited",
        "while Q is not empty:",
        "  u = Q.pop()",
        "  for each neighbor v of u:",
        "    if v not visited:",
        "      mark v visited",
        "      Q.push(v)",
    ],
    rules: &[("visit", 2), ("path", 5)],
    fallback: 1,
};

static DFS: Pseudocode = Pseudocode {
    lines: &[
        "function DFS(u):",
        "  mark u as visited",
        "  for each neighbor v of u:",
        "    if v not visited:",
        "      DFS(v)",
    ],
    rules: &[("visit", 1), ("path", 3)],
    fallback: 0,
};

static DIJKSTRA: Pseudocode = Pseudocode {
    lines: &[
        "dist[start] = 0, PQ.push(start)",
        "while PQ is not empty:",
        "  u = PQ.popMin()",
        "  if u == finish: break",
        "  for each neighbor v of u:",
        "    if dist[u] + 1 < dist[v]:",
        "      dist[v] = dist[u] + 1, prev[v] = u",
        "walk prev from finish to start",
    ],
    rules: &[("visit", 2), ("path", 7)],
    fallback: 1,
};

static ASTAR: Pseudocode = Pseudocode {
    lines: &[
        "g[start] = 0, open.push(start, h(start))",
        "while open is not empty:",
        "  u = open.popMin(g + h)",
        "  if u == finish: break",
        "  for each neighbor v of u:",
        "    if g[u] + 1 < g[v]:",
        "      g[v] = g[u] + 1, prev[v] = u",
        "      open.push(v, g[v] + h(v))",
        "walk prev from finish to start",
    ],
    rules: &[("visit", 2), ("path", 8)],
    fallback: 1,
};

static KMP: Pseudocode = Pseudocode {
    lines: &[
        "build lps[] for pattern",
        "i = 0, j = 0",
        "while i < n:",
        "  if text[i] == pattern[j]: i++, j++",
        "  if j == m: report i - j, j = lps[j-1]",
        "  else if mismatch:",
        "    if j > 0: j = lps[j-1] else: i++",
    ],
    rules: &[("updateAux", 0), ("compare", 3), ("found", 4)],
    fallback: 2,
};

static KNAPSACK: Pseudocode = Pseudocode {
    lines: &[
        "for i = 1 to n:",
        "  for w = 1 to W:",
        "    if wt[i] <= w:",
        "      dp[i][w] = max(dp[i-1][w], val[i] + dp[i-1][w-wt[i]])",
        "    else:",
        "      dp[i][w] = dp[i-1][w]",
        "trace back from dp[n][W]",
    ],
    rules: &[("compare", 2), ("target", 3), ("updateTable", 3), ("found", 6)],
    fallback: 1,
};

static LCS: Pseudocode = Pseudocode {
    lines: &[
        "for i = 1 to m:",
        "  for j = 1 to n:",
        "    if a[i] == b[j]:",
        "      dp[i][j] = dp[i-1][j-1] + 1",
        "    else:",
        "      dp[i][j] = max(dp[i-1][j], dp[i][j-1])",
        "trace back from dp[m][n]",
    ],
    rules: &[("compare", 2), ("updateTable", 5), ("found", 6)],
    fallback: 1,
};

static NQUEENS: Pseudocode = Pseudocode {
    lines: &[
        "function solve(row):",
        "  if row == N: return true",
        "  for col = 0 to N-1:",
        "    if safe(row, col):",
        "      place queen, if solve(row+1): return true",
        "      remove queen",
        "  return false",
    ],
    rules: &[("compare", 3), ("found", 4), ("target", 5)],
    fallback: 2,
};

/// Pseudocode listing for `algorithm`, if it has one.
pub fn pseudocode(algorithm: Algorithm) -> Option<&'static Pseudocode> {
    let code = match algorithm {
        Algorithm::Bubble => &BUBBLE,
        Algorithm::Selection => &SELECTION,
        Algorithm::Insertion => &INSERTION,
        Algorithm::Merge => &MERGE,
        Algorithm::Quick => &QUICK,
        Algorithm::Heap => &HEAP,
        Algorithm::Linear => &LINEAR,
        Algorithm::Binary => &BINARY,
        Algorithm::Bfs => &BFS,
        Algorithm::Dfs => &DFS,
        Algorithm::Dijkstra => &DIJKSTRA,
        Algorithm::AStar => &ASTAR,
        Algorithm::Kmp => &KMP,
        Algorithm::Knapsack => &KNAPSACK,
        Algorithm::Lcs => &LCS,
        Algorithm::NQueens => &NQUEENS,
        _ => return None,
    };
    Some(code)
}

fn join(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_matcher(algorithm: Algorithm) -> bool {
    matches!(algorithm, Algorithm::Kmp | Algorithm::RabinKarp)
}

/// One log line for `step` as produced by `algorithm`.
pub fn describe(step: &AnimationStep, algorithm: Algorithm) -> String {
    match step {
        AnimationStep::Compare { indices } => match indices.as_slice() {
            [t, p] if is_matcher(algorithm) => {
                format!("Comparing text[{}] with pattern[{}]", t, p)
            }
            [r1, c1, r2, c2] => format!("Checking edge ({}, {}) -> ({}, {})", r1, c1, r2, c2),
            _ => format!("Comparing elements at indices [{}]", join(indices)),
        },
        AnimationStep::Swap { indices } => {
            format!("Swapping elements at indices [{}]", join(indices))
        }
        AnimationStep::Overwrite { indices, value } => match value {
            Some(v) => format!("Overwriting index {} with value {}", indices[0], v),
            None => format!("Overwriting index {}", indices[0]),
        },
        AnimationStep::Highlight { indices, verdict } => match verdict {
            Some(v) => format!("Character at [{}]: {:?}", join(indices), v),
            None if indices.is_empty() => "Clearing highlight".to_string(),
            None => format!("Highlighting [{}]", join(indices)),
        },
        AnimationStep::Visit { indices } => format!("Visiting node at [{}]", join(indices)),
        AnimationStep::Path { indices } => format!("Marking path at [{}]", join(indices)),
        AnimationStep::Wall { indices } => format!("Placing wall at [{}]", join(indices)),
        AnimationStep::Found { indices } => match algorithm {
            Algorithm::Scc => format!("Node {} joins its component", join(indices)),
            _ if is_matcher(algorithm) => format!(
                "Pattern found at text index {}",
                indices.first().copied().unwrap_or_default()
            ),
            _ => format!("Found target at [{}]", join(indices)),
        },
        AnimationStep::Target { indices } => format!("Target set at [{}]", join(indices)),
        AnimationStep::Replace { new_array } => {
            format!("Replacing contents ({} elements)", new_array.len())
        }
        AnimationStep::UpdateAux { indices, value } => match algorithm {
            Algorithm::Kmp => format!("lps[{}] = {}", indices[0], value),
            Algorithm::RabinKarp if indices[0] == 0 => format!("Pattern hash = {}", value),
            Algorithm::RabinKarp => format!("Window hash = {}", value),
            Algorithm::Scc => format!("Node {} assigned to component {}", indices[0], value),
            _ => format!("Updating auxiliary array index {} with {}", indices[0], value),
        },
        AnimationStep::MoveToBucket {
            value, bucket, ..
        } => format!("Moving value {} to bucket {}", value, bucket),
        AnimationStep::Restore { indices, value, .. } => {
            format!("Restoring value {} from bucket to index {}", value, indices[0])
        }
        AnimationStep::UpdateTable { row, col, val } => {
            format!("Updating DP table at [{}, {}] with {}", row, col, val)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_core::Verdict;

    #[test]
    fn mapped_and_fallback_lines() {
        let code = pseudocode(Algorithm::Bubble).unwrap();
        assert_eq!(code.line_for(&AnimationStep::compare([0, 1])), 2);
        assert_eq!(code.line_for(&AnimationStep::swap(0, 1)), 3);
        assert_eq!(code.line_for(&AnimationStep::found([0])), code.fallback);
    }

    #[test]
    fn every_line_number_is_in_range() {
        let probes = [
            AnimationStep::compare([0]),
            AnimationStep::swap(0, 1),
            AnimationStep::overwrite(0, 1),
            AnimationStep::highlight([0]),
            AnimationStep::visit(0, 0),
            AnimationStep::path(0, 0),
            AnimationStep::found([0]),
            AnimationStep::target([0]),
            AnimationStep::replace(vec![]),
            AnimationStep::update_aux(0, 0),
            AnimationStep::update_table(1, 1, 0i64),
        ];
        for alg in Algorithm::ALL {
            if let Some(code) = pseudocode(alg) {
                for step in &probes {
                    assert!(code.line_for(step) < code.lines.len(), "{} {}", alg, step.kind());
                }
            }
        }
        assert!(pseudocode(Algorithm::Scc).is_none());
    }

    #[test]
    fn descriptions() {
        assert_eq!(
            describe(&AnimationStep::compare([3, 1]), Algorithm::Kmp),
            "Comparing text[3] with pattern[1]"
        );
        assert_eq!(
            describe(&AnimationStep::compare([3, 1]), Algorithm::Bubble),
            "Comparing elements at indices [3, 1]"
        );
        assert_eq!(
            describe(&AnimationStep::move_to_bucket(2, 42, 4), Algorithm::Radix),
            "Moving value 42 to bucket 4"
        );
        assert_eq!(
            describe(&AnimationStep::update_table(2, 3, 7i64), Algorithm::Lcs),
            "Updating DP table at [2, 3] with 7"
        );
        assert_eq!(
            describe(&AnimationStep::verdict([2], Verdict::Match), Algorithm::Kmp),
            "Character at [2]: Match"
        );
        assert_eq!(describe(&AnimationStep::flash(5), Algorithm::Lis), "Overwriting index 5");
    }
}
