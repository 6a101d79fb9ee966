//! Comparison sorts.
//!
//! Each sort works on its own copy of the input and records one `compare`
//! per comparison it actually performs, followed by the `swap` or
//! `overwrite` that mutation causes. Inputs of length 0 or 1 yield an
//! empty log.

use algoviz_core::{AnimationStep, StepLog};

/// Bubble sort with a shrinking bound and early exit on a quiet pass.
pub fn bubble_sort(array: &[i64]) -> StepLog {
    let mut arr = array.to_vec();
    let mut steps = StepLog::new();
    let n = arr.len();

    for i in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - i - 1 {
            steps.push(AnimationStep::compare([j, j + 1]));
            if arr[j] > arr[j + 1] {
                arr.swap(j, j + 1);
                steps.push(AnimationStep::swap(j, j + 1));
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
    steps
}

/// Selection sort; swaps only when a smaller element was found.
pub fn selection_sort(array: &[i64]) -> StepLog {
    let mut arr = array.to_vec();
    let mut steps = StepLog::new();
    let n = arr.len();

    for i in 0..n {
        let mut min_idx = i;
        for j in i + 1..n {
            steps.push(AnimationStep::compare([min_idx, j]));
            if arr[j] < arr[min_idx] {
                min_idx = j;
            }
        }
        if min_idx != i {
            arr.swap(i, min_idx);
            steps.push(AnimationStep::swap(i, min_idx));
        }
    }
    steps
}

/// Insertion sort by adjacent swaps.
pub fn insertion_sort(array: &[i64]) -> StepLog {
    let mut arr = array.to_vec();
    let mut steps = StepLog::new();

    for i in 1..arr.len() {
        let mut j = i;
        while j > 0 {
            steps.push(AnimationStep::compare([j, j - 1]));
            if arr[j] >= arr[j - 1] {
                break;
            }
            arr.swap(j, j - 1);
            steps.push(AnimationStep::swap(j, j - 1));
            j -= 1;
        }
    }
    steps
}

/// Top-down merge sort. Merged values are written back with `overwrite`.
pub fn merge_sort(array: &[i64]) -> StepLog {
    let mut arr = array.to_vec();
    let mut steps = StepLog::new();
    if arr.len() > 1 {
        let hi = arr.len() - 1;
        merge_sort_range(&mut arr, 0, hi, &mut steps);
    }
    steps
}

fn merge_sort_range(arr: &mut [i64], lo: usize, hi: usize, steps: &mut StepLog) {
    if lo >= hi {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    merge_sort_range(arr, lo, mid, steps);
    merge_sort_range(arr, mid + 1, hi, steps);

    let left = arr[lo..=mid].to_vec();
    let right = arr[mid + 1..=hi].to_vec();
    let (mut i, mut j, mut k) = (0, 0, lo);

    while i < left.len() && j < right.len() {
        steps.push(AnimationStep::compare([lo + i, mid + 1 + j]));
        let value = if left[i] <= right[j] {
            i += 1;
            left[i - 1]
        } else {
            j += 1;
            right[j - 1]
        };
        arr[k] = value;
        steps.push(AnimationStep::overwrite(k, value));
        k += 1;
    }
    for &value in left[i..].iter().chain(&right[j..]) {
        arr[k] = value;
        steps.push(AnimationStep::overwrite(k, value));
        k += 1;
    }
}

/// Quick sort with Lomuto partitioning around the last element.
pub fn quick_sort(array: &[i64]) -> StepLog {
    let mut arr = array.to_vec();
    let mut steps = StepLog::new();
    if arr.len() > 1 {
        let hi = arr.len() - 1;
        quick_sort_range(&mut arr, 0, hi, &mut steps);
    }
    steps
}

fn quick_sort_range(arr: &mut [i64], lo: usize, hi: usize, steps: &mut StepLog) {
    if lo >= hi {
        return;
    }
    let p = partition(arr, lo, hi, steps);
    if p > lo {
        quick_sort_range(arr, lo, p - 1, steps);
    }
    quick_sort_range(arr, p + 1, hi, steps);
}

fn partition(arr: &mut [i64], lo: usize, hi: usize, steps: &mut StepLog) -> usize {
    let pivot = arr[hi];
    steps.push(AnimationStep::highlight([hi]));

    let mut store = lo;
    for j in lo..hi {
        steps.push(AnimationStep::compare([j, hi]));
        if arr[j] <= pivot {
            if store != j {
                arr.swap(store, j);
                steps.push(AnimationStep::swap(store, j));
            }
            store += 1;
        }
    }
    if store != hi {
        arr.swap(store, hi);
        steps.push(AnimationStep::swap(store, hi));
    }
    store
}

/// Heap sort: build a max-heap, then repeatedly move the root to the end.
pub fn heap_sort(array: &[i64]) -> StepLog {
    let mut arr = array.to_vec();
    let mut steps = StepLog::new();
    let n = arr.len();

    for i in (0..n / 2).rev() {
        sift_down(&mut arr, n, i, &mut steps);
    }
    for end in (1..n).rev() {
        arr.swap(0, end);
        steps.push(AnimationStep::swap(0, end));
        sift_down(&mut arr, end, 0, &mut steps);
    }
    steps
}

fn sift_down(arr: &mut [i64], size: usize, mut i: usize, steps: &mut StepLog) {
    loop {
        let mut largest = i;
        let (l, r) = (2 * i + 1, 2 * i + 2);
        if l < size {
            steps.push(AnimationStep::compare([largest, l]));
            if arr[l] > arr[largest] {
                largest = l;
            }
        }
        if r < size {
            steps.push(AnimationStep::compare([largest, r]));
            if arr[r] > arr[largest] {
                largest = r;
            }
        }
        if largest == i {
            return;
        }
        arr.swap(i, largest);
        steps.push(AnimationStep::swap(i, largest));
        i = largest;
    }
}

/// Shell sort with gaps n/2, n/4, ..., 1.
pub fn shell_sort(array: &[i64]) -> StepLog {
    let mut arr = array.to_vec();
    let mut steps = StepLog::new();
    let n = arr.len();
    let mut gap = n / 2;

    while gap > 0 {
        for i in gap..n {
            steps.push(AnimationStep::highlight([i]));
            let temp = arr[i];
            let mut j = i;
            while j >= gap {
                steps.push(AnimationStep::compare([j, j - gap]));
                if arr[j - gap] <= temp {
                    break;
                }
                arr[j] = arr[j - gap];
                steps.push(AnimationStep::overwrite(j, arr[j]));
                j -= gap;
            }
            if j != i {
                arr[j] = temp;
                steps.push(AnimationStep::overwrite(j, temp));
            }
        }
        gap /= 2;
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::replay_array;

    type Sort = fn(&[i64]) -> StepLog;

    const SORTS: [(&str, Sort); 7] = [
        ("bubble", bubble_sort),
        ("selection", selection_sort),
        ("insertion", insertion_sort),
        ("merge", merge_sort),
        ("quick", quick_sort),
        ("heap", heap_sort),
        ("shell", shell_sort),
    ];

    fn compares(steps: &[AnimationStep]) -> usize {
        steps
            .iter()
            .filter(|s| matches!(s, AnimationStep::Compare { .. }))
            .count()
    }

    #[test]
    fn every_sort_sorts() {
        let input = [38, -4, 27, 0, 43, 3, 9, 82, 10, 3, 27];
        let mut expected = input.to_vec();
        expected.sort();
        for (name, sort) in SORTS {
            let out = replay_array(&input, &sort(&input));
            assert_eq!(out, expected, "{} sort produced wrong order", name);
        }
    }

    #[test]
    fn trivial_inputs_yield_empty_logs() {
        for (name, sort) in SORTS {
            assert!(sort(&[]).is_empty(), "{} on empty input", name);
            assert!(sort(&[7]).is_empty(), "{} on one element", name);
        }
    }

    #[test]
    fn bubble_scenario() {
        let steps = bubble_sort(&[5, 1, 4, 2]);
        let expected = vec![
            AnimationStep::compare([0, 1]),
            AnimationStep::swap(0, 1),
            AnimationStep::compare([1, 2]),
            AnimationStep::swap(1, 2),
            AnimationStep::compare([2, 3]),
            AnimationStep::swap(2, 3),
            AnimationStep::compare([0, 1]),
            AnimationStep::compare([1, 2]),
            AnimationStep::swap(1, 2),
            AnimationStep::compare([0, 1]),
        ];
        assert_eq!(steps, expected);
        assert_eq!(replay_array(&[5, 1, 4, 2], &steps), vec![1, 2, 4, 5]);
    }

    #[test]
    fn bubble_reverse_sorted_compares() {
        for n in 2..12usize {
            let input: Vec<i64> = (0..n as i64).rev().collect();
            assert_eq!(compares(&bubble_sort(&input)), n * (n - 1) / 2);
        }
    }

    #[test]
    fn bubble_sorted_input_single_pass() {
        let input: Vec<i64> = (0..10).collect();
        let steps = bubble_sort(&input);
        assert_eq!(compares(&steps), 9);
        assert!(steps.iter().all(|s| matches!(s, AnimationStep::Compare { .. })));
    }

    #[test]
    fn selection_compares_are_quadratic() {
        let input = [3, 1, 2, 5, 4];
        assert_eq!(compares(&selection_sort(&input)), 10);
    }

    #[test]
    fn selection_skips_self_swap() {
        let steps = selection_sort(&[1, 2, 3]);
        assert!(steps.iter().all(|s| !matches!(s, AnimationStep::Swap { .. })));
    }

    #[test]
    fn merge_compare_count_bounded() {
        let input: Vec<i64> = (0..16).rev().collect();
        let c = compares(&merge_sort(&input));
        // n log2 n upper bound
        assert!(c <= 64, "merge sort used {} compares", c);
    }

    #[test]
    fn quick_highlights_pivot() {
        let steps = quick_sort(&[3, 1, 2]);
        assert_eq!(steps[0], AnimationStep::highlight([2]));
    }

    #[test]
    fn heap_first_swap_moves_max_to_end() {
        let input = [4, 10, 3, 5, 1];
        let steps = heap_sort(&input);
        let first_root_swap = steps
            .iter()
            .position(|s| *s == AnimationStep::swap(0, 4))
            .expect("root is swapped to the end");
        let heap = replay_array(&input, &steps[..first_root_swap]);
        assert_eq!(heap[0], 10);
    }
}
