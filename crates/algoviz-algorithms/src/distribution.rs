//! Distribution sorts: counting, radix and bucket.
//!
//! Keys are offset by the minimum value, so negative inputs work. Key
//! arithmetic is done on the unsigned distance from the minimum, so any
//! `i64` range is safe; only counting sort is limited by its range.

use algoviz_core::{AnimationStep, StepLog};
use tracing::warn;

/// Number of buckets used by radix (one per digit) and bucket sort.
pub const BUCKET_COUNT: usize = 10;

/// Widest `max - min` counting sort will allocate a count array for.
pub const MAX_COUNTING_RANGE: u64 = 1 << 16;

fn min_max(arr: &[i64]) -> Option<(i64, i64)> {
    let min = *arr.iter().min()?;
    let max = *arr.iter().max()?;
    Some((min, max))
}

/// Counting sort with the count array mirrored into the aux track.
///
/// Inputs spanning more than [`MAX_COUNTING_RANGE`] values produce an
/// empty log.
pub fn counting_sort(array: &[i64]) -> StepLog {
    let mut arr = array.to_vec();
    let mut steps = StepLog::new();
    let Some((min, max)) = min_max(&arr) else {
        return steps;
    };

    let spread = max.abs_diff(min);
    if spread > MAX_COUNTING_RANGE {
        warn!("Counting sort range {} exceeds {}", spread, MAX_COUNTING_RANGE);
        return steps;
    }
    let range = spread as usize + 1;
    let mut count = vec![0i64; range];
    for k in 0..range {
        steps.push(AnimationStep::update_aux(k, 0));
    }

    for (i, &value) in arr.iter().enumerate() {
        steps.push(AnimationStep::highlight([i]));
        let k = value.abs_diff(min) as usize;
        count[k] += 1;
        steps.push(AnimationStep::update_aux(k, count[k]));
    }

    let mut out = 0;
    for (k, c) in count.iter_mut().enumerate() {
        while *c > 0 {
            let value = min + k as i64;
            arr[out] = value;
            steps.push(AnimationStep::overwrite(out, value));
            *c -= 1;
            steps.push(AnimationStep::update_aux(k, *c));
            out += 1;
        }
    }
    steps
}

/// LSD radix sort, base 10, one bucket per digit.
pub fn radix_sort(array: &[i64]) -> StepLog {
    let mut arr = array.to_vec();
    let mut steps = StepLog::new();
    let Some((min, max)) = min_max(&arr) else {
        return steps;
    };

    let max_key = max.abs_diff(min);
    let mut exp = 1u64;
    let mut buckets: Vec<Vec<i64>> = vec![Vec::new(); BUCKET_COUNT];

    while max_key / exp > 0 {
        for (i, &value) in arr.iter().enumerate() {
            steps.push(AnimationStep::highlight([i]));
            let digit = ((value.abs_diff(min) / exp) % 10) as usize;
            buckets[digit].push(value);
            steps.push(AnimationStep::move_to_bucket(i, value, digit));
        }

        let mut idx = 0;
        for (b, bucket) in buckets.iter_mut().enumerate() {
            for value in bucket.drain(..) {
                arr[idx] = value;
                steps.push(AnimationStep::restore(idx, value, Some(b)));
                idx += 1;
            }
        }

        match exp.checked_mul(10) {
            Some(next) => exp = next,
            None => break,
        }
    }
    steps
}

/// Bucket sort: scatter by normalized value, gather, then an insertion pass.
pub fn bucket_sort(array: &[i64]) -> StepLog {
    let mut arr = array.to_vec();
    let mut steps = StepLog::new();
    let Some((min, max)) = min_max(&arr) else {
        return steps;
    };

    let span = i128::from(max.abs_diff(min)) + 1;
    let mut buckets: Vec<Vec<i64>> = vec![Vec::new(); BUCKET_COUNT];
    for (i, &value) in arr.iter().enumerate() {
        steps.push(AnimationStep::highlight([i]));
        let b = (i128::from(value.abs_diff(min)) * BUCKET_COUNT as i128 / span) as usize;
        buckets[b].push(value);
        steps.push(AnimationStep::move_to_bucket(i, value, b));
    }

    let mut idx = 0;
    for (b, bucket) in buckets.iter_mut().enumerate() {
        for value in bucket.drain(..) {
            arr[idx] = value;
            steps.push(AnimationStep::restore(idx, value, Some(b)));
            idx += 1;
        }
    }

    for i in 1..arr.len() {
        let key = arr[i];
        steps.push(AnimationStep::highlight([i]));
        let mut j = i;
        while j > 0 {
            steps.push(AnimationStep::compare([j - 1, i]));
            if arr[j - 1] <= key {
                break;
            }
            arr[j] = arr[j - 1];
            steps.push(AnimationStep::overwrite(j, arr[j]));
            j -= 1;
        }
        if j != i {
            arr[j] = key;
            steps.push(AnimationStep::overwrite(j, key));
        }
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::replay_array;

    fn sorted(v: &[i64]) -> Vec<i64> {
        let mut v = v.to_vec();
        v.sort();
        v
    }

    #[test]
    fn distribution_sorts_handle_negatives() {
        let input = [12, -7, 0, 45, -7, 3, 99, 18];
        for (name, sort) in [
            ("counting", counting_sort as fn(&[i64]) -> StepLog),
            ("radix", radix_sort),
            ("bucket", bucket_sort),
        ] {
            assert_eq!(replay_array(&input, &sort(&input)), sorted(&input), "{}", name);
            assert!(sort(&[]).is_empty(), "{} on empty input", name);
        }
    }

    #[test]
    fn counting_initializes_aux_range() {
        let steps = counting_sort(&[3, 1, 2]);
        let inits = steps
            .iter()
            .take_while(|s| matches!(s, AnimationStep::UpdateAux { value: 0, .. }))
            .count();
        assert_eq!(inits, 3);
    }

    #[test]
    fn radix_bucket_moves_are_balanced() {
        let steps = radix_sort(&[170, 45, 75, 90, 802, 24, 2, 66]);
        let moved = steps
            .iter()
            .filter(|s| matches!(s, AnimationStep::MoveToBucket { .. }))
            .count();
        let restored = steps
            .iter()
            .filter(|s| matches!(s, AnimationStep::Restore { .. }))
            .count();
        assert_eq!(moved, restored);
        // three digit passes over eight values
        assert_eq!(moved, 24);
    }

    #[test]
    fn radix_equal_values_need_no_passes() {
        assert!(radix_sort(&[4, 4, 4]).is_empty());
    }

    #[test]
    fn extreme_ranges_do_not_overflow() {
        let input = [i64::MAX, 0, i64::MIN, -1, 7];
        assert_eq!(replay_array(&input, &radix_sort(&input)), sorted(&input));
        assert_eq!(replay_array(&input, &bucket_sort(&input)), sorted(&input));
        assert!(counting_sort(&input).is_empty());
    }

    #[test]
    fn counting_accepts_its_widest_range() {
        let input = [0, MAX_COUNTING_RANGE as i64];
        assert_eq!(replay_array(&input, &counting_sort(&input)), sorted(&input));
        assert!(counting_sort(&[0, MAX_COUNTING_RANGE as i64 + 1]).is_empty());
    }

    #[test]
    fn bucket_indices_stay_in_range() {
        let steps = bucket_sort(&[1, 100, 50, 99, 2]);
        for step in &steps {
            if let AnimationStep::MoveToBucket { bucket, .. } = step {
                assert!(*bucket < BUCKET_COUNT);
            }
        }
    }
}
