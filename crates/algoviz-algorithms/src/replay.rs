//! Array-only step application, used to check generated logs.

use algoviz_core::AnimationStep;

/// Apply the array-mutating part of one step.
///
/// Only `swap`, valued `overwrite`, `replace` and `restore` touch the
/// array; everything else is emphasis or belongs to another surface.
/// Out-of-range indices are ignored.
pub fn apply_array_step(array: &mut Vec<i64>, step: &AnimationStep) {
    match step {
        AnimationStep::Swap { indices: [a, b] } => {
            if *a < array.len() && *b < array.len() {
                array.swap(*a, *b);
            }
        }
        AnimationStep::Overwrite {
            indices,
            value: Some(value),
        } => {
            for &i in indices {
                if let Some(slot) = array.get_mut(i) {
                    *slot = *value;
                }
            }
        }
        AnimationStep::Replace { new_array } => {
            array.clone_from(new_array);
        }
        AnimationStep::Restore {
            indices: [i], value, ..
        } => {
            if let Some(slot) = array.get_mut(*i) {
                *slot = *value;
            }
        }
        _ => {}
    }
}

/// Replay a whole log over a copy of `initial`.
pub fn replay_array(initial: &[i64], steps: &[AnimationStep]) -> Vec<i64> {
    let mut array = initial.to_vec();
    for step in steps {
        apply_array_step(&mut array, step);
    }
    array
}
