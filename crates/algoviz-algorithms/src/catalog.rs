//! Display metadata for the algorithm picker and info panel.

use std::fmt;

use crate::registry::Algorithm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    Sorting,
    Searching,
    Pathfinding,
    Maze,
    Mst,
    Graph,
    Backtracking,
    Dp,
    String,
    DataStructure,
    Tree,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Sorting => "Sorting",
            Category::Searching => "Searching",
            Category::Pathfinding => "Pathfinding",
            Category::Maze => "Maze",
            Category::Mst => "MST",
            Category::Graph => "Graph",
            Category::Backtracking => "Backtracking",
            Category::Dp => "DP",
            Category::String => "String",
            Category::DataStructure => "Data Structure",
            Category::Tree => "Tree",
        };
        f.write_str(label)
    }
}

/// Asymptotic cost shown next to an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Complexity {
    pub time: &'static str,
    pub space: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlgorithmInfo {
    pub name: &'static str,
    pub category: Category,
    pub complexity: Complexity,
    pub description: &'static str,
}

const fn info(
    name: &'static str,
    category: Category,
    time: &'static str,
    space: &'static str,
    description: &'static str,
) -> AlgorithmInfo {
    AlgorithmInfo {
        name,
        category,
        complexity: Complexity { time, space },
        description,
    }
}

impl Algorithm {
    pub fn info(self) -> AlgorithmInfo {
        use Category::*;
        match self {
            Algorithm::Bubble => info(
                "Bubble Sort",
                Sorting,
                "O(n²)",
                "O(1)",
                "Repeatedly swaps adjacent elements that are out of order.",
            ),
            Algorithm::Selection => info(
                "Selection Sort",
                Sorting,
                "O(n²)",
                "O(1)",
                "Grows a sorted prefix by selecting the smallest remaining element.",
            ),
            Algorithm::Insertion => info(
                "Insertion Sort",
                Sorting,
                "O(n²)",
                "O(1)",
                "Builds the sorted array one item at a time.",
            ),
            Algorithm::Merge => info(
                "Merge Sort",
                Sorting,
                "O(n log n)",
                "O(n)",
                "Splits the array, sorts both halves and merges them.",
            ),
            Algorithm::Quick => info(
                "Quick Sort",
                Sorting,
                "O(n log n)",
                "O(log n)",
                "Partitions around a pivot, then sorts each side.",
            ),
            Algorithm::Heap => info(
                "Heap Sort",
                Sorting,
                "O(n log n)",
                "O(1)",
                "Builds a max heap, then repeatedly moves the root to the end.",
            ),
            Algorithm::Shell => info(
                "Shell Sort",
                Sorting,
                "O(n log² n)",
                "O(1)",
                "Insertion sort over shrinking gaps.",
            ),
            Algorithm::Counting => info(
                "Counting Sort",
                Sorting,
                "O(n + k)",
                "O(k)",
                "Counts occurrences of each value and writes them back in order.",
            ),
            Algorithm::Radix => info(
                "Radix Sort",
                Sorting,
                "O(nk)",
                "O(n + k)",
                "Sorts digit by digit from least to most significant.",
            ),
            Algorithm::Bucket => info(
                "Bucket Sort",
                Sorting,
                "O(n + k)",
                "O(n)",
                "Scatters values into range buckets, gathers them and finishes with insertion sort.",
            ),
            Algorithm::Linear => info(
                "Linear Search",
                Searching,
                "O(n)",
                "O(1)",
                "Checks each element in turn.",
            ),
            Algorithm::Binary => info(
                "Binary Search",
                Searching,
                "O(log n)",
                "O(1)",
                "Halves the search interval of a sorted array on every probe.",
            ),
            Algorithm::Dijkstra => info(
                "Dijkstra's Algorithm",
                Pathfinding,
                "O(E + V log V)",
                "O(V)",
                "Settles nodes in order of distance from the start.",
            ),
            Algorithm::AStar => info(
                "A* Search",
                Pathfinding,
                "O(E)",
                "O(V)",
                "Dijkstra guided by a Manhattan distance heuristic.",
            ),
            Algorithm::Bfs => info(
                "Breadth-First Search",
                Pathfinding,
                "O(V + E)",
                "O(V)",
                "Explores the grid level by level; shortest on unweighted grids.",
            ),
            Algorithm::Dfs => info(
                "Depth-First Search",
                Pathfinding,
                "O(V + E)",
                "O(V)",
                "Follows one branch as far as possible before backtracking.",
            ),
            Algorithm::GreedyBfs => info(
                "Greedy Best-First Search",
                Pathfinding,
                "O(b^d)",
                "O(b^d)",
                "Always expands the node that looks closest to the goal.",
            ),
            Algorithm::Bidirectional => info(
                "Bidirectional Search",
                Pathfinding,
                "O(b^(d/2))",
                "O(b^(d/2))",
                "Searches from start and goal at once until the frontiers meet.",
            ),
            Algorithm::Jps => info(
                "Jump Point Search",
                Pathfinding,
                "O(E)",
                "O(V)",
                "A* on uniform grids that jumps over symmetric paths.",
            ),
            Algorithm::BellmanFord => info(
                "Bellman-Ford Algorithm",
                Pathfinding,
                "O(VE)",
                "O(V)",
                "Relaxes every edge round after round until nothing changes.",
            ),
            Algorithm::FloydWarshall => info(
                "Floyd-Warshall Algorithm",
                Pathfinding,
                "O(V³)",
                "O(V²)",
                "All-pairs shortest paths by dynamic programming over intermediates.",
            ),
            Algorithm::RecursiveDivision => info(
                "Recursive Division",
                Maze,
                "O(V)",
                "O(log V)",
                "Splits chambers with walls that each keep one gap.",
            ),
            Algorithm::PrimsMaze => info(
                "Prim's Maze",
                Maze,
                "O(V log V)",
                "O(V)",
                "Grows a maze from the start by opening random frontier walls.",
            ),
            Algorithm::BinaryTreeMaze => info(
                "Binary Tree Maze",
                Maze,
                "O(V)",
                "O(1)",
                "Links every room north or east at random.",
            ),
            Algorithm::Prims => info(
                "Prim's Algorithm",
                Mst,
                "O(E log V)",
                "O(V)",
                "Grows a minimum spanning tree from a starting vertex.",
            ),
            Algorithm::Kruskals => info(
                "Kruskal's Algorithm",
                Mst,
                "O(E log E)",
                "O(V)",
                "Adds edges in weight order unless they close a cycle.",
            ),
            Algorithm::ConnectedComponents => info(
                "Connected Components",
                Graph,
                "O(V + E)",
                "O(V)",
                "Floods every connected region of open cells.",
            ),
            Algorithm::NQueens => info(
                "N-Queens",
                Backtracking,
                "O(N!)",
                "O(N)",
                "Places N queens so that no two attack each other.",
            ),
            Algorithm::Sudoku => info(
                "Sudoku Solver",
                Backtracking,
                "O(9^m)",
                "O(m)",
                "Fills the grid so every row, column and box holds 1 to 9.",
            ),
            Algorithm::Knapsack => info(
                "0/1 Knapsack",
                Dp,
                "O(nW)",
                "O(nW)",
                "Maximizes the value packed into a limited capacity.",
            ),
            Algorithm::Lcs => info(
                "Longest Common Subsequence",
                Dp,
                "O(nm)",
                "O(nm)",
                "Finds the longest subsequence shared by two strings.",
            ),
            Algorithm::Lis => info(
                "Longest Increasing Subsequence",
                Dp,
                "O(n²)",
                "O(n)",
                "Finds the longest strictly increasing subsequence.",
            ),
            Algorithm::Kmp => info(
                "KMP Algorithm",
                String,
                "O(n + m)",
                "O(m)",
                "Pattern search that reuses a prefix table on mismatch.",
            ),
            Algorithm::RabinKarp => info(
                "Rabin-Karp",
                String,
                "O(n + m)",
                "O(1)",
                "Pattern search over a rolling hash of the text window.",
            ),
            Algorithm::Stack => info(
                "Stack",
                DataStructure,
                "O(1)",
                "O(n)",
                "Last in, first out.",
            ),
            Algorithm::Queue => info(
                "Queue",
                DataStructure,
                "O(1)",
                "O(n)",
                "First in, first out.",
            ),
            Algorithm::LinkedList => info(
                "Linked List",
                DataStructure,
                "O(n)",
                "O(n)",
                "Nodes chained by next pointers.",
            ),
            Algorithm::MinHeap => info(
                "Min Heap",
                DataStructure,
                "O(log n)",
                "O(n)",
                "Binary heap where every parent is at most its children.",
            ),
            Algorithm::MaxHeap => info(
                "Max Heap",
                DataStructure,
                "O(log n)",
                "O(n)",
                "Binary heap where every parent is at least its children.",
            ),
            Algorithm::Bst => info(
                "Binary Search Tree",
                Tree,
                "O(h)",
                "O(h)",
                "Ordered binary tree for lookup, insertion and removal.",
            ),
            Algorithm::Avl => info(
                "AVL Tree",
                Tree,
                "O(log n)",
                "O(n)",
                "Self-balancing search tree; sibling heights differ by at most one.",
            ),
            Algorithm::Scc => info(
                "Strongly Connected Components",
                Graph,
                "O(V + E)",
                "O(V)",
                "Groups vertices that can all reach one another.",
            ),
        }
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn category(self) -> Category {
        self.info().category
    }

    /// Algorithms in `category`, in picker order.
    pub fn in_category(category: Category) -> impl Iterator<Item = Algorithm> {
        Algorithm::ALL
            .into_iter()
            .filter(move |a| a.category() == category)
    }
}
