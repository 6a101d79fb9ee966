//! Linear and binary search over the value array.

use algoviz_core::{AnimationStep, StepLog};
use rand::Rng;

/// Linear search for a randomly chosen element of `array`.
pub fn linear_search<R: Rng + ?Sized>(array: &[i64], rng: &mut R) -> StepLog {
    if array.is_empty() {
        return StepLog::new();
    }
    let target_index = rng.gen_range(0..array.len());
    linear_search_for(array, target_index)
}

/// Linear search for the value currently at `target_index`.
pub fn linear_search_for(array: &[i64], target_index: usize) -> StepLog {
    let mut steps = StepLog::new();
    let Some(&target) = array.get(target_index) else {
        return steps;
    };
    steps.push(AnimationStep::target([target_index]));

    for (i, &value) in array.iter().enumerate() {
        steps.push(AnimationStep::compare([i]));
        if value == target {
            steps.push(AnimationStep::found([i]));
            break;
        }
    }
    steps
}

/// Binary search: reveal a sorted copy, then search a random element of it.
pub fn binary_search<R: Rng + ?Sized>(array: &[i64], rng: &mut R) -> StepLog {
    if array.is_empty() {
        return StepLog::new();
    }
    let target_index = rng.gen_range(0..array.len());
    binary_search_for(array, target_index)
}

/// Binary search for the value at `target_index` of the sorted copy.
pub fn binary_search_for(array: &[i64], target_index: usize) -> StepLog {
    let mut steps = StepLog::new();
    let mut sorted = array.to_vec();
    sorted.sort_unstable();
    let Some(&target) = sorted.get(target_index) else {
        return steps;
    };

    steps.push(AnimationStep::replace(sorted.clone()));
    steps.push(AnimationStep::target([target_index]));

    let (mut lo, mut hi) = (0usize, sorted.len() - 1);
    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        steps.push(AnimationStep::compare([mid]));
        match sorted[mid].cmp(&target) {
            std::cmp::Ordering::Equal => {
                steps.push(AnimationStep::found([mid]));
                break;
            }
            std::cmp::Ordering::Less => lo = mid + 1,
            std::cmp::Ordering::Greater => {
                if mid == 0 {
                    break;
                }
                hi = mid - 1;
            }
        }
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn linear_scenario() {
        let steps = linear_search_for(&[7, 3, 9, 1], 2);
        assert_eq!(
            steps,
            vec![
                AnimationStep::target([2]),
                AnimationStep::compare([0]),
                AnimationStep::compare([1]),
                AnimationStep::compare([2]),
                AnimationStep::found([2]),
            ]
        );
    }

    #[test]
    fn binary_scenario() {
        let steps = binary_search_for(&[1, 3, 5, 7, 9, 11, 13], 5);
        assert_eq!(steps[0], AnimationStep::replace(vec![1, 3, 5, 7, 9, 11, 13]));
        assert_eq!(steps[1], AnimationStep::target([5]));
        assert_eq!(steps[2], AnimationStep::compare([3]));
        assert_eq!(steps[3], AnimationStep::compare([5]));
        assert_eq!(steps[4], AnimationStep::found([5]));
        assert_eq!(steps.len(), 5);
    }

    #[test]
    fn binary_probes_are_logarithmic() {
        let array: Vec<i64> = (0..1000).collect();
        for t in [0, 1, 499, 998, 999] {
            let steps = binary_search_for(&array, t);
            let probes = steps
                .iter()
                .filter(|s| matches!(s, AnimationStep::Compare { .. }))
                .count();
            assert!(probes <= 10, "target {} took {} probes", t, probes);
            assert_eq!(steps.last(), Some(&AnimationStep::found([t])));
        }
    }

    #[test]
    fn seeded_searches_are_reproducible() {
        let array = [5, 8, 1, 9, 3];
        let a = linear_search(&array, &mut StdRng::seed_from_u64(7));
        let b = linear_search(&array, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!(matches!(a.last(), Some(AnimationStep::Found { .. })));
        assert!(binary_search(&[], &mut StdRng::seed_from_u64(1)).is_empty());
    }
}
