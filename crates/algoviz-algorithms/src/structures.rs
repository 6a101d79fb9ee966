//! Linear structure and binary heap mutators.
//!
//! These are not searches: each user action yields a short script against the
//! current contents. Linear structures highlight the old boundary, `replace`
//! the array, tag the new element with `overwrite` and clear the highlight.
//! Heaps use `replace` for size changes and `compare`/`swap` while sifting.

use std::fmt;

use algoviz_core::{AnimationStep, StepLog};

/// A single action on a stack, queue or linked list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "op", content = "value", rename_all = "camelCase"))]
pub enum StructureOp {
    Push(i64),
    Pop,
    Enqueue(i64),
    Dequeue,
    InsertHead(i64),
    InsertTail(i64),
    DeleteHead,
    DeleteTail,
}

impl StructureOp {
    /// Contents after the operation.
    pub fn apply(self, current: &[i64]) -> Vec<i64> {
        let mut next = current.to_vec();
        match self {
            StructureOp::Push(v) | StructureOp::Enqueue(v) | StructureOp::InsertTail(v) => {
                next.push(v)
            }
            StructureOp::InsertHead(v) => next.insert(0, v),
            StructureOp::Pop | StructureOp::DeleteTail => {
                next.pop();
            }
            StructureOp::Dequeue | StructureOp::DeleteHead => {
                if !next.is_empty() {
                    next.remove(0);
                }
            }
        }
        next
    }
}

impl fmt::Display for StructureOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureOp::Push(v) => write!(f, "push {}", v),
            StructureOp::Pop => f.write_str("pop"),
            StructureOp::Enqueue(v) => write!(f, "enqueue {}", v),
            StructureOp::Dequeue => f.write_str("dequeue"),
            StructureOp::InsertHead(v) => write!(f, "insert {} at head", v),
            StructureOp::InsertTail(v) => write!(f, "insert {} at tail", v),
            StructureOp::DeleteHead => f.write_str("delete head"),
            StructureOp::DeleteTail => f.write_str("delete tail"),
        }
    }
}

/// Step script for `op` against `current`. Removing from an empty
/// structure yields no steps.
pub fn structure_steps(current: &[i64], op: StructureOp) -> StepLog {
    match op {
        StructureOp::Push(v) | StructureOp::Enqueue(v) | StructureOp::InsertTail(v) => {
            append_tail(current, v)
        }
        StructureOp::InsertHead(v) => insert_head(current, v),
        StructureOp::Pop | StructureOp::DeleteTail => remove_tail(current),
        StructureOp::Dequeue => remove_head(current, true),
        StructureOp::DeleteHead => remove_head(current, false),
    }
}

fn append_tail(current: &[i64], value: i64) -> StepLog {
    let mut steps = StepLog::new();
    if let Some(last) = current.len().checked_sub(1) {
        steps.push(AnimationStep::highlight([last]));
    }
    let mut next = current.to_vec();
    next.push(value);
    steps.push(AnimationStep::replace(next));
    steps.push(AnimationStep::overwrite(current.len(), value));
    steps.push(AnimationStep::highlight(Vec::new()));
    steps
}

fn insert_head(current: &[i64], value: i64) -> StepLog {
    let mut steps = StepLog::new();
    if !current.is_empty() {
        steps.push(AnimationStep::highlight([0]));
    }
    let mut next = Vec::with_capacity(current.len() + 1);
    next.push(value);
    next.extend_from_slice(current);
    steps.push(AnimationStep::replace(next));
    steps.push(AnimationStep::overwrite(0, value));
    steps.push(AnimationStep::highlight(Vec::new()));
    steps
}

fn remove_tail(current: &[i64]) -> StepLog {
    let mut steps = StepLog::new();
    let Some(last) = current.len().checked_sub(1) else {
        return steps;
    };
    steps.push(AnimationStep::compare([last]));
    steps.push(AnimationStep::replace(current[..last].to_vec()));
    if last > 0 {
        steps.push(AnimationStep::highlight([last - 1]));
    }
    steps
}

fn remove_head(current: &[i64], mark_new_head: bool) -> StepLog {
    let mut steps = StepLog::new();
    if current.is_empty() {
        return steps;
    }
    steps.push(AnimationStep::compare([0]));
    steps.push(AnimationStep::replace(current[1..].to_vec()));
    if mark_new_head && current.len() > 1 {
        steps.push(AnimationStep::highlight([0]));
    }
    steps
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HeapKind {
    #[default]
    Min,
    Max,
}

impl HeapKind {
    /// Whether `child` belongs above `parent`.
    fn outranks(self, child: i64, parent: i64) -> bool {
        match self {
            HeapKind::Min => child < parent,
            HeapKind::Max => child > parent,
        }
    }
}

/// A heap slot positioned for drawing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeapNode {
    pub index: usize,
    pub value: i64,
    pub x: f64,
    pub y: f64,
}

/// Tree layout of an array heap, using the same geometry as the tree views.
pub fn heap_layout(heap: &[i64]) -> Vec<HeapNode> {
    use crate::tree::{LEVEL_HEIGHT, ROOT_OFFSET, ROOT_X, ROOT_Y};

    fn place(heap: &[i64], index: usize, x: f64, y: f64, offset: f64, out: &mut Vec<HeapNode>) {
        if index >= heap.len() {
            return;
        }
        out.push(HeapNode {
            index,
            value: heap[index],
            x,
            y,
        });
        place(heap, 2 * index + 1, x - offset, y + LEVEL_HEIGHT, offset / 2.0, out);
        place(heap, 2 * index + 2, x + offset, y + LEVEL_HEIGHT, offset / 2.0, out);
    }

    let mut out = Vec::with_capacity(heap.len());
    place(heap, 0, ROOT_X, ROOT_Y, ROOT_OFFSET, &mut out);
    out
}

fn sift_up(heap: &mut [i64], mut i: usize, kind: HeapKind, steps: &mut StepLog) {
    while i > 0 {
        let parent = (i - 1) / 2;
        steps.push(AnimationStep::compare([i, parent]));
        if !kind.outranks(heap[i], heap[parent]) {
            break;
        }
        heap.swap(i, parent);
        steps.push(AnimationStep::swap(i, parent));
        i = parent;
    }
}

fn sift_down(heap: &mut [i64], mut i: usize, kind: HeapKind, steps: &mut StepLog) {
    let n = heap.len();
    loop {
        let mut best = i;
        for child in [2 * i + 1, 2 * i + 2] {
            if child < n {
                steps.push(AnimationStep::compare([best, child]));
                if kind.outranks(heap[child], heap[best]) {
                    best = child;
                }
            }
        }
        if best == i {
            break;
        }
        heap.swap(i, best);
        steps.push(AnimationStep::swap(i, best));
        i = best;
    }
}

/// Append `value` and sift it up.
pub fn heap_insert(heap: &[i64], value: i64, kind: HeapKind) -> StepLog {
    let mut steps = StepLog::new();
    let mut work = heap.to_vec();
    work.push(value);
    steps.push(AnimationStep::replace(work.clone()));
    let last = work.len() - 1;
    sift_up(&mut work, last, kind, &mut steps);
    steps
}

/// Remove the root: swap it with the last slot, drop that slot and sift the
/// new root down.
pub fn heap_extract(heap: &[i64], kind: HeapKind) -> StepLog {
    let mut steps = StepLog::new();
    let Some(last) = heap.len().checked_sub(1) else {
        return steps;
    };
    steps.push(AnimationStep::highlight([0]));
    let mut work = heap.to_vec();
    if last > 0 {
        work.swap(0, last);
        steps.push(AnimationStep::swap(0, last));
    }
    work.pop();
    steps.push(AnimationStep::replace(work.clone()));
    if !work.is_empty() {
        sift_down(&mut work, 0, kind, &mut steps);
    }
    steps
}

/// Bottom-up heapify of arbitrary contents.
pub fn heap_build(array: &[i64], kind: HeapKind) -> StepLog {
    let mut steps = StepLog::new();
    let mut work = array.to_vec();
    steps.push(AnimationStep::replace(work.clone()));
    for i in (0..work.len() / 2).rev() {
        sift_down(&mut work, i, kind, &mut steps);
    }
    steps
}

/// Whether `heap` satisfies the heap property for `kind`.
pub fn is_heap(heap: &[i64], kind: HeapKind) -> bool {
    (1..heap.len()).all(|i| !kind.outranks(heap[i], heap[(i - 1) / 2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::replay_array;

    fn run(current: &[i64], op: StructureOp) -> Vec<i64> {
        replay_array(current, &structure_steps(current, op))
    }

    #[test]
    fn stack_script_shape() {
        let steps = structure_steps(&[1, 2], StructureOp::Push(7));
        let kinds: Vec<&str> = steps.iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, vec!["highlight", "replace", "overwrite", "highlight"]);
        assert!(steps[3].indices().is_empty());
        assert_eq!(run(&[1, 2], StructureOp::Push(7)), vec![1, 2, 7]);
        assert_eq!(run(&[1, 2], StructureOp::Pop), vec![1]);
    }

    #[test]
    fn queue_and_list_results_match_apply() {
        let start = [4, 5, 6];
        for op in [
            StructureOp::Enqueue(9),
            StructureOp::Dequeue,
            StructureOp::InsertHead(1),
            StructureOp::InsertTail(2),
            StructureOp::DeleteHead,
            StructureOp::DeleteTail,
        ] {
            assert_eq!(run(&start, op), op.apply(&start), "{}", op);
        }
    }

    #[test]
    fn removing_from_empty_is_a_no_op() {
        for op in [StructureOp::Pop, StructureOp::Dequeue, StructureOp::DeleteHead, StructureOp::DeleteTail] {
            assert!(structure_steps(&[], op).is_empty());
        }
        // first push has no old boundary to highlight
        assert_eq!(structure_steps(&[], StructureOp::Push(3))[0].kind(), "replace");
    }

    #[test]
    fn heap_operations_keep_heap_property() {
        for kind in [HeapKind::Min, HeapKind::Max] {
            let mut heap: Vec<i64> = Vec::new();
            for v in [5, 3, 8, 1, 9, 2, 7] {
                let next = replay_array(&heap, &heap_insert(&heap, v, kind));
                assert!(is_heap(&next, kind), "{:?} after insert {}", kind, v);
                heap = next;
            }
            let mut drained = Vec::new();
            while let Some(&root) = heap.first() {
                drained.push(root);
                heap = replay_array(&heap, &heap_extract(&heap, kind));
                assert!(is_heap(&heap, kind));
            }
            let mut expected = vec![5, 3, 8, 1, 9, 2, 7];
            expected.sort();
            if kind == HeapKind::Max {
                expected.reverse();
            }
            assert_eq!(drained, expected);
        }
    }

    #[test]
    fn build_heapifies() {
        let input = [9, 4, 7, 1, 0, 3, 8, 2];
        let heap = replay_array(&input, &heap_build(&input, HeapKind::Min));
        assert!(is_heap(&heap, HeapKind::Min));
        assert_eq!(heap[0], 0);
    }

    #[test]
    fn heap_layout_positions_children() {
        let nodes = heap_layout(&[1, 2, 3]);
        assert_eq!(nodes.len(), 3);
        assert_eq!((nodes[0].x, nodes[0].y), (500.0, 50.0));
        assert_eq!((nodes[1].x, nodes[2].x), (250.0, 750.0));
    }
}
