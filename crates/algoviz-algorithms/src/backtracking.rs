//! Backtracking puzzles: N-Queens and Sudoku.
//!
//! Cells are addressed as `row * n + col`. Placing emits `overwrite` then
//! `found`; undoing a placement emits the reverting `overwrite` then
//! `target`. N-Queens writes into the per-row board array (`-1` = empty),
//! Sudoku into the flattened 81-cell board (`0` = empty).

use algoviz_core::{AnimationStep, StepLog};

/// Board size used by the dispatcher.
pub const QUEENS: usize = 8;

/// Empty N-Queens board: one column slot per row.
pub fn empty_queens_board(n: usize) -> Vec<i64> {
    vec![-1; n]
}

/// Place `n` queens row by row, trying columns left to right.
pub fn n_queens(n: usize) -> StepLog {
    let mut steps = StepLog::new();
    let mut board = empty_queens_board(n);
    place_queen(&mut board, 0, &mut steps);
    steps
}

fn queen_is_safe(board: &[i64], row: usize, col: usize) -> bool {
    board[..row].iter().enumerate().all(|(prev_row, &prev_col)| {
        let prev_col = prev_col as usize;
        prev_col != col && row - prev_row != col.abs_diff(prev_col)
    })
}

fn place_queen(board: &mut [i64], row: usize, steps: &mut StepLog) -> bool {
    let n = board.len();
    if row == n {
        return true;
    }
    for col in 0..n {
        let cell = row * n + col;
        steps.push(AnimationStep::compare([cell]));
        if !queen_is_safe(board, row, col) {
            steps.push(AnimationStep::target([cell]));
            continue;
        }
        board[row] = col as i64;
        steps.push(AnimationStep::overwrite(row, col as i64));
        steps.push(AnimationStep::found([cell]));
        if place_queen(board, row + 1, steps) {
            return true;
        }
        board[row] = -1;
        steps.push(AnimationStep::overwrite(row, -1));
        steps.push(AnimationStep::target([cell]));
    }
    false
}

/// Sudoku demo puzzle, row-major, `0` = empty.
pub const SUDOKU_PUZZLE: [i64; 81] = [
    5, 3, 0, 0, 7, 0, 0, 0, 0, //
    6, 0, 0, 1, 9, 5, 0, 0, 0, //
    0, 9, 8, 0, 0, 0, 0, 6, 0, //
    8, 0, 0, 0, 6, 0, 0, 0, 3, //
    4, 0, 0, 8, 0, 3, 0, 0, 1, //
    7, 0, 0, 0, 2, 0, 0, 0, 6, //
    0, 6, 0, 0, 0, 0, 2, 8, 0, //
    0, 0, 0, 4, 1, 9, 0, 0, 5, //
    0, 0, 0, 0, 8, 0, 0, 7, 9, //
];

fn sudoku_allows(board: &[i64], idx: usize, num: i64) -> bool {
    let (row, col) = (idx / 9, idx % 9);
    let (box_row, box_col) = (row - row % 3, col - col % 3);
    (0..9).all(|x| board[row * 9 + x] != num && board[x * 9 + col] != num)
        && (0..9).all(|k| board[(box_row + k / 3) * 9 + box_col + k % 3] != num)
}

/// First-fit Sudoku solver over the first empty cell, digits 1 to 9.
/// Boards that are not 81 cells long produce an empty log.
pub fn sudoku(board: &[i64]) -> StepLog {
    let mut steps = StepLog::new();
    if board.len() != 81 {
        return steps;
    }
    let mut work = board.to_vec();
    solve_sudoku(&mut work, &mut steps);
    steps
}

fn solve_sudoku(board: &mut [i64], steps: &mut StepLog) -> bool {
    let Some(idx) = board.iter().position(|&v| v == 0) else {
        return true;
    };
    for num in 1..=9 {
        steps.push(AnimationStep::compare([idx]));
        if !sudoku_allows(board, idx, num) {
            continue;
        }
        board[idx] = num;
        steps.push(AnimationStep::overwrite(idx, num));
        steps.push(AnimationStep::found([idx]));
        if solve_sudoku(board, steps) {
            return true;
        }
        board[idx] = 0;
        steps.push(AnimationStep::overwrite(idx, 0));
        steps.push(AnimationStep::target([idx]));
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::replay_array;

    #[test]
    fn eight_queens_final_board_is_valid() {
        let steps = n_queens(QUEENS);
        let board = replay_array(&empty_queens_board(QUEENS), &steps);
        assert!(board.iter().all(|&c| c >= 0));
        for r1 in 0..QUEENS {
            for r2 in r1 + 1..QUEENS {
                let (c1, c2) = (board[r1], board[r2]);
                assert_ne!(c1, c2, "rows {} and {} share a column", r1, r2);
                assert_ne!((r2 - r1) as i64, (c1 - c2).abs(), "diagonal clash");
            }
        }
        // first solution found by left-to-right search
        assert_eq!(board, vec![0, 4, 7, 5, 2, 6, 1, 3]);
    }

    #[test]
    fn unsolvable_sizes_end_with_empty_board() {
        let steps = n_queens(3);
        let board = replay_array(&empty_queens_board(3), &steps);
        assert_eq!(board, vec![-1, -1, -1]);
    }

    #[test]
    fn sudoku_solution_is_consistent() {
        let steps = sudoku(&SUDOKU_PUZZLE);
        let solved = replay_array(&SUDOKU_PUZZLE, &steps);
        assert!(solved.iter().all(|&v| (1..=9).contains(&v)));
        for (i, &given) in SUDOKU_PUZZLE.iter().enumerate() {
            if given != 0 {
                assert_eq!(solved[i], given, "given clue {} changed", i);
            }
        }
        for unit in 0..9 {
            let mut row: Vec<i64> = (0..9).map(|c| solved[unit * 9 + c]).collect();
            let mut col: Vec<i64> = (0..9).map(|r| solved[r * 9 + unit]).collect();
            let (br, bc) = (unit / 3 * 3, unit % 3 * 3);
            let mut sq: Vec<i64> = (0..9).map(|k| solved[(br + k / 3) * 9 + bc + k % 3]).collect();
            for group in [&mut row, &mut col, &mut sq] {
                group.sort();
                assert_eq!(*group, (1..=9).collect::<Vec<i64>>());
            }
        }
    }

    #[test]
    fn sudoku_rejects_wrong_size() {
        assert!(sudoku(&[0; 10]).is_empty());
    }
}
